use serde::{Deserialize, Serialize};

/// One page of a paginated endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    /// Items on this page
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    /// Items across all pages
    #[serde(default)]
    pub total: u64,
    /// Number of pages
    #[serde(default)]
    pub total_page: u32,
    /// 1-based page number
    #[serde(default = "first_page")]
    pub page: u32,
    /// Page size the server applied
    #[serde(default)]
    pub limit: u32,
}

fn first_page() -> u32 {
    1
}

impl<T> Paginated<T> {
    /// Wrap a complete list as a single page
    #[must_use]
    pub fn single_page(data: Vec<T>) -> Self {
        let len = data.len();
        Self {
            total: len as u64,
            total_page: u32::from(len > 0),
            page: 1,
            limit: u32::try_from(len).unwrap_or(u32::MAX),
            data,
        }
    }

    /// Check whether a later page exists
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page < self.total_page
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paginated_wire_shape() {
        let page: Paginated<String> = serde_json::from_str(
            r#"{"data":["a","b"],"total":12,"totalPage":6,"page":2,"limit":2}"#,
        )
        .unwrap();
        assert_eq!(page.data.len(), 2);
        assert_eq!(page.total_page, 6);
        assert!(page.has_next());
    }

    #[test]
    fn test_single_page() {
        let page = Paginated::single_page(vec![1, 2, 3]);
        assert_eq!(page.total, 3);
        assert_eq!(page.total_page, 1);
        assert!(!page.has_next());

        let empty = Paginated::<u8>::single_page(Vec::new());
        assert_eq!(empty.total_page, 0);
        assert!(empty.data.is_empty());
        assert!(!empty.has_next());
    }
}
