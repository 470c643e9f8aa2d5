//! `?page=&per_page=` query parameters shared by list endpoints.

use serde::Deserialize;

use portal_core::types::pagination::{DEFAULT_PAGE_SIZE, PageRequest};

/// Raw paging parameters; out-of-range values are clamped by [`PageRequest`].
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PaginationParams {
    #[serde(default)]
    pub page: Option<u64>,
    #[serde(default, alias = "page_size")]
    pub per_page: Option<u64>,
}

impl PaginationParams {
    pub fn into_page_request(self) -> PageRequest {
        PageRequest::new(
            self.page.unwrap_or(1),
            self.per_page.unwrap_or(DEFAULT_PAGE_SIZE),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_core::types::pagination::MAX_PAGE_SIZE;

    fn parse(query: &str) -> PageRequest {
        let params: PaginationParams =
            serde_json::from_value(serde_json::from_str(query).unwrap()).unwrap();
        params.into_page_request()
    }

    #[test]
    fn test_defaults() {
        assert_eq!(parse("{}"), PageRequest::default());
    }

    #[test]
    fn test_alias_and_clamp() {
        let req = parse(r#"{"page": 0, "page_size": 1000}"#);
        assert_eq!(req.page, 1);
        assert_eq!(req.page_size, MAX_PAGE_SIZE);
    }
}
