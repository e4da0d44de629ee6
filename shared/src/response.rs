//! API Response types
//!
//! Response shapes of the sales API.

use serde::{Deserialize, Serialize};

use crate::models::Sale;

/// One page of `GET /sales`
///
/// `Default` is the empty page (`data: [], total: 0, pages: 0`) that stands
/// in for a failed fetch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesPage {
    #[serde(default)]
    pub data: Vec<Sale>,
    /// Total number of matching records
    #[serde(default)]
    pub total: u64,
    /// Page number the server answered for (older servers omit it)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Total number of pages
    #[serde(default)]
    pub pages: u32,
}

impl SalesPage {
    /// Build a page the way the API computes its totals
    pub fn new(data: Vec<Sale>, total: u64, page: u32, limit: u32) -> Self {
        let pages = if limit > 0 {
            total.div_ceil(limit as u64) as u32
        } else {
            0
        };

        Self {
            data,
            total,
            page: Some(page),
            pages,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sales_page_totals() {
        let page = SalesPage::new(Vec::new(), 101, 2, 10);
        assert_eq!(page.total, 101);
        assert_eq!(page.pages, 11);
        assert_eq!(page.page, Some(2));

        let empty = SalesPage::new(Vec::new(), 0, 1, 10);
        assert_eq!(empty.pages, 0);
    }

    #[test]
    fn test_default_is_empty_page() {
        let page = SalesPage::default();
        assert!(page.is_empty());
        assert_eq!(page.total, 0);
        assert_eq!(page.pages, 0);
    }

    #[test]
    fn test_lenient_decoding() {
        let page: SalesPage = serde_json::from_str(r#"{"data": [], "total": 0, "pages": 0}"#).unwrap();
        assert_eq!(page.page, None);
    }
}
