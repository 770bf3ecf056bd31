//! Request types for the shared crate
//!
//! List queries sent to the paginated endpoints of the health backend.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Default page size used by the console list screens
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Sort direction for a list column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// The opposite direction
    pub fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters for one page of a list endpoint.
///
/// `page_index` is 1-based and never drops below 1. Every mutator other
/// than [`ListQuery::set_page`] sends the query back to the first page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub page_index: u32,
    pub page_size: u32,
    #[serde(default)]
    pub search_term: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_by: Option<String>,
    #[serde(default)]
    pub order_direction: SortDirection,
    #[serde(default)]
    pub filters: BTreeMap<String, String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl ListQuery {
    /// First page, no search, no sort, no filters
    pub fn new(page_size: u32) -> Self {
        Self {
            page_index: 1,
            page_size: page_size.max(1),
            search_term: String::new(),
            order_by: None,
            order_direction: SortDirection::Asc,
            filters: BTreeMap::new(),
        }
    }

    /// Builder: initial sort column (ascending)
    pub fn ordered_by(mut self, column: impl Into<String>) -> Self {
        self.order_by = Some(column.into());
        self.order_direction = SortDirection::Asc;
        self
    }

    /// Builder: initial filter value
    pub fn filtered(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_filter(key, value);
        self
    }

    /// Jump to a page. Callers keep `n` within `[1, total_pages]`.
    pub fn set_page(&mut self, n: u32) {
        self.page_index = n.max(1);
    }

    pub fn set_page_size(&mut self, size: u32) {
        self.page_size = size.max(1);
        self.page_index = 1;
    }

    /// Sort by `column`; the same column twice flips the direction.
    pub fn toggle_sort(&mut self, column: &str) {
        if self.order_by.as_deref() == Some(column) {
            self.order_direction = self.order_direction.flipped();
        } else {
            self.order_by = Some(column.to_string());
            self.order_direction = SortDirection::Asc;
        }
        self.page_index = 1;
    }

    /// Set a filter value. An empty value removes the filter ("All").
    pub fn set_filter(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if value.trim().is_empty() {
            self.filters.remove(&key);
        } else {
            self.filters.insert(key, value);
        }
        self.page_index = 1;
    }

    /// Replace the search term. Returns `false` (and leaves the page alone)
    /// when the trimmed term did not change.
    pub fn set_search_term(&mut self, term: &str) -> bool {
        let term = term.trim();
        if term == self.search_term {
            return false;
        }
        self.search_term = term.to_string();
        self.page_index = 1;
        true
    }

    /// Query-string pairs in the order the backend documents them.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("pageIndex".to_string(), self.page_index.to_string()),
            ("pageSize".to_string(), self.page_size.to_string()),
        ];
        if !self.search_term.is_empty() {
            pairs.push(("searchTerm".to_string(), self.search_term.clone()));
        }
        if let Some(column) = &self.order_by {
            pairs.push(("orderBy".to_string(), column.clone()));
            pairs.push((
                "orderDirection".to_string(),
                self.order_direction.as_str().to_string(),
            ));
        }
        for (key, value) in &self.filters {
            pairs.push((key.clone(), value.clone()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
        pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_new_query_starts_on_first_page() {
        let query = ListQuery::new(10);
        assert_eq!(query.page_index, 1);
        assert_eq!(query.page_size, 10);
        assert!(query.search_term.is_empty());
        assert!(query.order_by.is_none());

        assert_eq!(ListQuery::new(0).page_size, 1);
    }

    #[test]
    fn test_toggle_sort_same_column_twice_restores_direction() {
        let mut query = ListQuery::new(10).ordered_by("fullName");
        assert_eq!(query.order_direction, SortDirection::Asc);

        query.toggle_sort("fullName");
        assert_eq!(query.order_direction, SortDirection::Desc);
        query.toggle_sort("fullName");
        assert_eq!(query.order_direction, SortDirection::Asc);
    }

    #[test]
    fn test_toggle_sort_new_column_resets_direction() {
        let mut query = ListQuery::new(10).ordered_by("fullName");
        query.toggle_sort("fullName");
        assert_eq!(query.order_direction, SortDirection::Desc);

        query.toggle_sort("email");
        assert_eq!(query.order_by.as_deref(), Some("email"));
        assert_eq!(query.order_direction, SortDirection::Asc);
    }

    #[test]
    fn test_mutators_reset_page() {
        let mut query = ListQuery::new(10);

        query.set_page(4);
        query.toggle_sort("email");
        assert_eq!(query.page_index, 1);

        query.set_page(4);
        query.set_filter("role", "Nurse");
        assert_eq!(query.page_index, 1);

        query.set_page(4);
        assert!(query.set_search_term("lan"));
        assert_eq!(query.page_index, 1);

        query.set_page(4);
        query.set_page_size(25);
        assert_eq!(query.page_index, 1);
    }

    #[test]
    fn test_set_page_leaves_other_fields() {
        let mut query = ListQuery::new(10).ordered_by("fullName").filtered("role", "Nurse");
        query.set_search_term("an");
        let before = query.clone();

        query.set_page(3);
        assert_eq!(query.page_index, 3);
        assert_eq!(query.order_by, before.order_by);
        assert_eq!(query.order_direction, before.order_direction);
        assert_eq!(query.filters, before.filters);
        assert_eq!(query.search_term, before.search_term);

        query.set_page(0);
        assert_eq!(query.page_index, 1);
    }

    #[test]
    fn test_unchanged_search_keeps_page() {
        let mut query = ListQuery::new(10);
        query.set_search_term("minh");
        query.set_page(2);

        assert!(!query.set_search_term("  minh "));
        assert_eq!(query.page_index, 2);
    }

    #[test]
    fn test_empty_filter_value_removes_filter() {
        let mut query = ListQuery::new(10).filtered("role", "Nurse");
        assert_eq!(query.filters.get("role").map(String::as_str), Some("Nurse"));

        query.set_filter("role", "");
        assert!(query.filters.is_empty());
    }

    #[test]
    fn test_query_pairs() {
        let mut query = ListQuery::new(10).ordered_by("fullName").filtered("role", "Manager");
        let pairs = query.to_query_pairs();
        assert_eq!(lookup(&pairs, "pageIndex"), Some("1"));
        assert_eq!(lookup(&pairs, "pageSize"), Some("10"));
        assert_eq!(lookup(&pairs, "searchTerm"), None);
        assert_eq!(lookup(&pairs, "orderBy"), Some("fullName"));
        assert_eq!(lookup(&pairs, "orderDirection"), Some("asc"));
        assert_eq!(lookup(&pairs, "role"), Some("Manager"));

        query.set_search_term(" hoa ");
        let pairs = query.to_query_pairs();
        assert_eq!(lookup(&pairs, "searchTerm"), Some("hoa"));
    }

    #[test]
    fn test_query_pairs_without_sort() {
        let pairs = ListQuery::new(20).to_query_pairs();
        assert_eq!(pairs.len(), 2);
        assert_eq!(lookup(&pairs, "orderBy"), None);
        assert_eq!(lookup(&pairs, "orderDirection"), None);
    }
}
