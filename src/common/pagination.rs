use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Response wrapper for paginated listings.
///
/// Page numbering is zero-based: `page=0` is the first page.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub current_page: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, current_page: u64, total_items: u64, total_pages: u64) -> Self {
        Self {
            items,
            current_page,
            total_items,
            total_pages,
        }
    }

    /// Map the page items into another representation, keeping the metadata.
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Paginated<U> {
        Paginated {
            items: self.items.into_iter().map(f).collect(),
            current_page: self.current_page,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}

fn default_page() -> u64 {
    0
}

fn default_size() -> u64 {
    10
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct PageQuery {
    /// Zero-based page number
    #[serde(default = "default_page")]
    pub page: u64,
    /// Page size (must be at least 1)
    #[serde(default = "default_size")]
    pub size: u64,
}
