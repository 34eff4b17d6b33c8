use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_LIMIT: u32 = 20;

/// Pagination metadata a list page displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    pub has_next_page: bool,
    pub has_prev_page: bool,
    pub limit: u32,
    pub total_items: Option<u64>,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            current_page: 1,
            total_pages: 1,
            has_next_page: false,
            has_prev_page: false,
            limit: DEFAULT_PAGE_LIMIT,
            total_items: None,
        }
    }
}

/// Pagination as the server sends it: any field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationPatch {
    #[serde(default, alias = "page")]
    pub current_page: Option<u32>,
    #[serde(default, alias = "pages")]
    pub total_pages: Option<u32>,
    #[serde(default, alias = "hasNext")]
    pub has_next_page: Option<bool>,
    #[serde(default, alias = "hasPrev", alias = "hasPreviousPage")]
    pub has_prev_page: Option<bool>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default, alias = "total", alias = "totalCount")]
    pub total_items: Option<u64>,
}

impl Pagination {
    /// Overwrites the fields the server supplied; omitted ones keep their
    /// prior value.
    pub fn merge(&mut self, patch: &PaginationPatch) {
        if let Some(page) = patch.current_page {
            self.current_page = page.max(1);
        }
        if let Some(total) = patch.total_pages {
            self.total_pages = total;
        }
        if let Some(next) = patch.has_next_page {
            self.has_next_page = next;
        }
        if let Some(prev) = patch.has_prev_page {
            self.has_prev_page = prev;
        }
        if let Some(limit) = patch.limit {
            self.limit = limit;
        }
        if patch.total_items.is_some() {
            self.total_items = patch.total_items;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_list_page_defaults() {
        let p = Pagination::default();
        assert_eq!((p.current_page, p.total_pages, p.limit), (1, 1, 20));
        assert!(!p.has_next_page && !p.has_prev_page);
    }

    #[test]
    fn merge_keeps_omitted_fields() {
        let mut p = Pagination { total_pages: 4, has_next_page: true, ..Pagination::default() };
        let patch: PaginationPatch = serde_json::from_str(r#"{"page":2,"hasPrev":true}"#).unwrap();
        p.merge(&patch);
        assert_eq!(p.current_page, 2);
        assert_eq!(p.total_pages, 4);
        assert!(p.has_next_page);
        assert!(p.has_prev_page);
        assert_eq!(p.limit, 20);
    }

    #[test]
    fn merge_accepts_total_aliases() {
        let mut p = Pagination::default();
        let patch: PaginationPatch =
            serde_json::from_str(r#"{"currentPage":1,"totalPages":3,"total":55,"limit":25}"#).unwrap();
        p.merge(&patch);
        assert_eq!(p.total_items, Some(55));
        assert_eq!(p.limit, 25);
        assert_eq!(p.total_pages, 3);
    }
}
