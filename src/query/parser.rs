//! # Query Parameter Parser
//!
//! Parses list query parameters into filters and a page window.
//!
//! Parameters arrive as an ordered list of pairs: filters narrow the
//! result in the order they appear, so the order must survive parsing.

use super::filter::{Filter, FilterKey};
use crate::core::DexResult;

/// Page used when `page` is absent or not a positive integer
pub const DEFAULT_PAGE: usize = 1;

/// Limit used when `limit` is absent or not a positive integer
pub const DEFAULT_LIMIT: usize = 20;

/// Parsed query parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParams {
    /// Filters in application order
    pub filters: Vec<Filter>,

    /// 1-based page number
    pub page: usize,

    /// Records per page
    pub limit: usize,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            filters: Vec::new(),
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl QueryParams {
    /// Parse query parameters from ordered `(key, value)` pairs.
    ///
    /// Every non-pagination key must resolve to a filter, even when its
    /// value is empty; empty values are then dropped.
    pub fn parse<K, V>(pairs: &[(K, V)]) -> DexResult<Self>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut result = QueryParams::default();

        for (key, value) in pairs {
            let (key, value) = (key.as_ref(), value.as_ref());
            match key {
                "page" => result.page = parse_positive(value).unwrap_or(DEFAULT_PAGE),
                "limit" => result.limit = parse_positive(value).unwrap_or(DEFAULT_LIMIT),
                _ => {
                    let filter_key = FilterKey::resolve(key)?;
                    if !value.trim().is_empty() {
                        result.filters.push(Filter::new(filter_key, value));
                    }
                }
            }
        }

        Ok(result)
    }

    /// Builder-style filter append, in application order
    pub fn with_filter(mut self, key: FilterKey, value: &str) -> Self {
        self.filters.push(Filter::new(key, value));
        self
    }

    pub fn with_page(mut self, page: usize, limit: usize) -> Self {
        self.page = if page == 0 { DEFAULT_PAGE } else { page };
        self.limit = if limit == 0 { DEFAULT_LIMIT } else { limit };
        self
    }

    /// Number of filtered records skipped before the page starts
    pub fn offset(&self) -> usize {
        self.limit.saturating_mul(self.page.saturating_sub(1))
    }
}

fn parse_positive(value: &str) -> Option<usize> {
    value.trim().parse::<usize>().ok().filter(|n| *n > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DexError;
    use crate::query::filter::ScalarField;

    #[test]
    fn test_defaults() {
        let empty: [(&str, &str); 0] = [];
        let params = QueryParams::parse(&empty).unwrap();
        assert_eq!(params, QueryParams::default());
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_bad_pagination_falls_back() {
        let params = QueryParams::parse(&[("page", "0"), ("limit", "abc")]).unwrap();
        assert_eq!(params.page, DEFAULT_PAGE);
        assert_eq!(params.limit, DEFAULT_LIMIT);

        let params = QueryParams::parse(&[("page", "-2"), ("limit", "")]).unwrap();
        assert_eq!(params.page, DEFAULT_PAGE);
        assert_eq!(params.limit, DEFAULT_LIMIT);
    }

    #[test]
    fn test_offset() {
        let params = QueryParams::parse(&[("page", "3"), ("limit", "10")]).unwrap();
        assert_eq!(params.offset(), 20);
    }

    #[test]
    fn test_offset_of_page_zero_is_first_page() {
        let params = QueryParams {
            page: 0,
            ..Default::default()
        };
        assert_eq!(params.offset(), 0);
        assert!(crate::query::execute(&[], &params).data.is_empty());
    }

    #[test]
    fn test_filter_order_preserved() {
        let params =
            QueryParams::parse(&[("type", "fire"), ("search", "char"), ("id", "4")]).unwrap();
        let keys: Vec<FilterKey> = params.filters.iter().map(|f| f.key).collect();
        assert_eq!(
            keys,
            vec![
                FilterKey::Type,
                FilterKey::Search,
                FilterKey::Field(ScalarField::Id)
            ]
        );
    }

    #[test]
    fn test_empty_values_dropped() {
        let params = QueryParams::parse(&[("search", ""), ("type", "  ")]).unwrap();
        assert!(params.filters.is_empty());
    }

    #[test]
    fn test_unsupported_key_rejected_even_when_empty() {
        let result = QueryParams::parse(&[("foo", "")]);
        assert!(matches!(result, Err(DexError::UnsupportedFilter(_))));
    }
}
