use crate::{ApiResult, FieldErrors};

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

/// `?page=&size=`; pages are zero-based.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub page: i64,
    #[serde(default = "default_page_size")]
    pub size: i64,
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageQuery {
    pub fn validate(&self) -> ApiResult<()> {
        let mut errors = FieldErrors::new();
        errors.check(self.page >= 0, "page", "page must not be negative");
        errors.check(
            (1..=MAX_PAGE_SIZE).contains(&self.size),
            "size",
            format!("size must be between 1 and {}", MAX_PAGE_SIZE),
        );
        errors.finish()
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: i64,
    pub size: i64,
    pub total_elements: i64,
    pub total_pages: i64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, query: PageQuery, total_elements: i64) -> Self {
        Self {
            content,
            page: query.page,
            size: query.size,
            total_elements,
            total_pages: (total_elements + query.size - 1) / query.size,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        }
    }
}
