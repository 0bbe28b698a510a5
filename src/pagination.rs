/**
 * Pagination
 *
 * Query parameters and response envelope for paged listings. Pages are
 * zero-based; `size` is clamped to keep a single request from dragging
 * the whole table over the wire.
 */

use serde::{Deserialize, Serialize};

const DEFAULT_PAGE_SIZE: i64 = 20;
const MAX_PAGE_SIZE: i64 = 100;

/// `?page=&size=` query parameters.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageParams {
    #[serde(default)]
    pub page: i64,
    #[serde(default = "default_size")]
    pub size: i64,
}

fn default_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageParams {
    /// Page size clamped to `1..=MAX_PAGE_SIZE`.
    pub fn limit(&self) -> i64 {
        self.size.clamp(1, MAX_PAGE_SIZE)
    }

    /// Row offset for the (non-negative) page index.
    pub fn offset(&self) -> i64 {
        self.page.max(0) * self.limit()
    }
}

/// One page of results plus the totals clients need for paging UI.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: i64,
    pub size: i64,
    pub total_elements: i64,
    pub total_pages: i64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, params: PageParams, total_elements: i64) -> Self {
        let size = params.limit();
        let total_pages = if total_elements == 0 {
            0
        } else {
            (total_elements + size - 1) / size
        };
        Self {
            content,
            page: params.page.max(0),
            size,
            total_elements,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let params = PageParams::default();
        assert_eq!(params.limit(), 20);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_size_is_clamped() {
        let params = PageParams { page: 0, size: 10_000 };
        assert_eq!(params.limit(), 100);
        let params = PageParams { page: 0, size: 0 };
        assert_eq!(params.limit(), 1);
    }

    #[test]
    fn test_negative_page_is_treated_as_first() {
        let params = PageParams { page: -3, size: 20 };
        assert_eq!(params.offset(), 0);
        let page = Page::new(Vec::<i32>::new(), params, 0);
        assert_eq!(page.page, 0);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let params = PageParams { page: 1, size: 20 };
        let page = Page::new(vec![1, 2, 3], params, 41);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_elements, 41);
        assert_eq!(page.page, 1);
    }

    #[test]
    fn test_empty_result_has_zero_pages() {
        let page = Page::new(Vec::<i32>::new(), PageParams::default(), 0);
        assert_eq!(page.total_pages, 0);
    }
}
