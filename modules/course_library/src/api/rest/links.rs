//! Hypermedia link construction for author resources.

use serde::Serialize;
use uuid::Uuid;

use crate::api::rest::dto::LinkDto;

pub const AUTHORS_PATH: &str = "/api/authors";
pub const AUTHOR_COLLECTIONS_PATH: &str = "/api/authorcollections";

/// Which page of the author list a link points to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLink {
    Previous,
    Current,
    Next,
}

/// Effective list parameters echoed into paging links.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorsPageQuery<'a> {
    pub page_number: u32,
    pub page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_category: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_query: Option<&'a str>,
    pub order_by: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<&'a str>,
}

fn with_query<T: Serialize>(path: &str, query: &T) -> String {
    match serde_urlencoded::to_string(query) {
        Ok(qs) if qs.is_empty() => path.to_owned(),
        Ok(qs) => format!("{path}?{qs}"),
        Err(e) => {
            tracing::warn!(error = %e, path, "Failed to encode link query");
            path.to_owned()
        }
    }
}

#[must_use]
pub fn author_path(author_id: Uuid) -> String {
    format!("{AUTHORS_PATH}/{author_id}")
}

#[must_use]
pub fn author_courses_path(author_id: Uuid) -> String {
    format!("{AUTHORS_PATH}/{author_id}/courses")
}

#[must_use]
pub fn course_path(author_id: Uuid, course_id: Uuid) -> String {
    format!("{AUTHORS_PATH}/{author_id}/courses/{course_id}")
}

#[must_use]
pub fn author_collection_path(ids: &[Uuid]) -> String {
    let joined = ids
        .iter()
        .map(Uuid::to_string)
        .collect::<Vec<_>>()
        .join(",");
    format!("{AUTHOR_COLLECTIONS_PATH}/({joined})")
}

#[must_use]
pub fn authors_page_link(query: &AuthorsPageQuery<'_>, which: PageLink) -> String {
    let page_number = match which {
        PageLink::Previous => query.page_number.saturating_sub(1).max(1),
        PageLink::Current => query.page_number,
        PageLink::Next => query.page_number.saturating_add(1),
    };
    let query = AuthorsPageQuery {
        page_number,
        ..query.clone()
    };
    with_query(AUTHORS_PATH, &query)
}

/// `self` plus `nextPage`/`previousPage` links for an author list page.
#[must_use]
pub fn links_for_authors(
    query: &AuthorsPageQuery<'_>,
    has_next: bool,
    has_previous: bool,
) -> Vec<LinkDto> {
    let mut links = vec![LinkDto::new(
        authors_page_link(query, PageLink::Current),
        "self",
        "GET",
    )];
    if has_next {
        links.push(LinkDto::new(
            authors_page_link(query, PageLink::Next),
            "nextPage",
            "GET",
        ));
    }
    if has_previous {
        links.push(LinkDto::new(
            authors_page_link(query, PageLink::Previous),
            "previousPage",
            "GET",
        ));
    }
    links
}

#[derive(Serialize)]
struct FieldsOnly<'a> {
    fields: &'a str,
}

/// Links for a single author; `self` repeats the field selection if any.
#[must_use]
pub fn links_for_author(author_id: Uuid, fields: Option<&str>) -> Vec<LinkDto> {
    let self_href = match fields.map(str::trim).filter(|f| !f.is_empty()) {
        Some(fields) => with_query(&author_path(author_id), &FieldsOnly { fields }),
        None => author_path(author_id),
    };
    vec![
        LinkDto::new(self_href, "self", "GET"),
        LinkDto::new(author_courses_path(author_id), "create_course_for_author", "POST"),
        LinkDto::new(author_courses_path(author_id), "courses", "GET"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query() -> AuthorsPageQuery<'static> {
        AuthorsPageQuery {
            page_number: 2,
            page_size: 5,
            main_category: Some("Rum & Grog"),
            search_query: None,
            order_by: "Name",
            fields: None,
        }
    }

    #[test]
    fn page_links_carry_effective_parameters() {
        assert_eq!(
            authors_page_link(&query(), PageLink::Next),
            "/api/authors?pageNumber=3&pageSize=5&mainCategory=Rum+%26+Grog&orderBy=Name"
        );
        assert!(
            authors_page_link(&query(), PageLink::Previous)
                .starts_with("/api/authors?pageNumber=1&")
        );
    }

    #[test]
    fn list_links_depend_on_neighbours() {
        let rels: Vec<_> = links_for_authors(&query(), true, false)
            .into_iter()
            .map(|l| l.rel)
            .collect();
        assert_eq!(rels, vec!["self", "nextPage"]);
        assert_eq!(links_for_authors(&query(), false, true)[1].rel, "previousPage");
    }

    #[test]
    fn author_links_include_fields_only_when_given() {
        let id = Uuid::nil();
        let plain = links_for_author(id, None);
        assert_eq!(plain[0].href, format!("/api/authors/{id}"));
        assert_eq!(plain[1].method, "POST");
        assert_eq!(plain[2].href, format!("/api/authors/{id}/courses"));

        let shaped = links_for_author(id, Some("id,name"));
        assert_eq!(shaped[0].href, format!("/api/authors/{id}?fields=id%2Cname"));
    }

    #[test]
    fn collection_path_lists_ids_in_parentheses() {
        let a = Uuid::nil();
        let b = Uuid::from_u128(1);
        assert_eq!(
            author_collection_path(&[a, b]),
            format!("/api/authorcollections/({a},{b})")
        );
    }
}
