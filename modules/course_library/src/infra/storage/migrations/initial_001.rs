use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::ConnectionTrait;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let conn = manager.get_connection();

        let sql = match backend {
            sea_orm::DatabaseBackend::Postgres => {
                r"
CREATE TABLE IF NOT EXISTS authors (
    id UUID PRIMARY KEY NOT NULL,
    first_name VARCHAR(50) NOT NULL,
    last_name VARCHAR(50) NOT NULL,
    date_of_birth TIMESTAMPTZ NOT NULL,
    date_of_death TIMESTAMPTZ NULL,
    main_category VARCHAR(50) NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_authors_main_category ON authors(main_category);
CREATE INDEX IF NOT EXISTS idx_authors_name ON authors(first_name, last_name);

CREATE TABLE IF NOT EXISTS courses (
    id UUID PRIMARY KEY NOT NULL,
    title VARCHAR(100) NOT NULL,
    description VARCHAR(1500) NULL,
    author_id UUID NOT NULL,
    CONSTRAINT fk_courses_author FOREIGN KEY (author_id) REFERENCES authors(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_courses_author ON courses(author_id);
                "
            }
            sea_orm::DatabaseBackend::MySql => {
                r"
CREATE TABLE IF NOT EXISTS authors (
    id VARCHAR(36) PRIMARY KEY NOT NULL,
    first_name VARCHAR(50) NOT NULL,
    last_name VARCHAR(50) NOT NULL,
    date_of_birth TIMESTAMP NOT NULL,
    date_of_death TIMESTAMP NULL,
    main_category VARCHAR(50) NOT NULL,
    INDEX idx_authors_main_category (main_category),
    INDEX idx_authors_name (first_name, last_name)
);

CREATE TABLE IF NOT EXISTS courses (
    id VARCHAR(36) PRIMARY KEY NOT NULL,
    title VARCHAR(100) NOT NULL,
    description VARCHAR(1500) NULL,
    author_id VARCHAR(36) NOT NULL,
    INDEX idx_courses_author (author_id),
    CONSTRAINT fk_courses_author FOREIGN KEY (author_id) REFERENCES authors(id) ON DELETE CASCADE
);
                "
            }
            sea_orm::DatabaseBackend::Sqlite => {
                r"
CREATE TABLE IF NOT EXISTS authors (
    id TEXT PRIMARY KEY NOT NULL,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    date_of_birth TEXT NOT NULL,
    date_of_death TEXT NULL,
    main_category TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_authors_main_category ON authors(main_category);
CREATE INDEX IF NOT EXISTS idx_authors_name ON authors(first_name, last_name);

CREATE TABLE IF NOT EXISTS courses (
    id TEXT PRIMARY KEY NOT NULL,
    title TEXT NOT NULL,
    description TEXT NULL,
    author_id TEXT NOT NULL,
    FOREIGN KEY (author_id) REFERENCES authors(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_courses_author ON courses(author_id);
                "
            }
        };

        conn.execute_unprepared(sql).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();

        let sql = r"
DROP TABLE IF EXISTS courses;
DROP TABLE IF EXISTS authors;
        ";

        conn.execute_unprepared(sql).await?;
        Ok(())
    }
}
