use serde::{Deserialize, Serialize};

/// Configuration for the course library module
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CourseLibraryConfig {
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u32,
    /// Sort expression applied when a list request carries no `orderBy`.
    #[serde(default = "default_order_by")]
    pub default_order_by: String,
}

impl Default for CourseLibraryConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            default_order_by: default_order_by(),
        }
    }
}

impl CourseLibraryConfig {
    /// Clamp a requested page size into `1..=max_page_size`, falling back to the
    /// default when absent.
    #[must_use]
    pub fn effective_page_size(&self, requested: Option<u32>) -> u32 {
        requested
            .unwrap_or(self.default_page_size)
            .clamp(1, self.max_page_size.max(1))
    }
}

fn default_page_size() -> u32 {
    10
}

fn default_max_page_size() -> u32 {
    20
}

fn default_order_by() -> String {
    "Name".to_owned()
}
