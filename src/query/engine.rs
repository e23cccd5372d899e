//! # Query Engine
//!
//! Linear-scan filtering and pagination over a collection snapshot.

use serde::Serialize;

use super::parser::QueryParams;
use crate::record::Record;

/// One page of matching records
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryResult {
    pub data: Vec<Record>,
    /// Length of `data`, not the size of the whole filtered set
    pub count: usize,
}

impl QueryResult {
    pub fn new(data: Vec<Record>) -> Self {
        let count = data.len();
        Self { data, count }
    }
}

/// Runs `params` against `records`.
///
/// Each filter narrows the result of the previous one, in order. An
/// offset past the end yields an empty page.
pub fn execute(records: &[Record], params: &QueryParams) -> QueryResult {
    let mut result: Vec<&Record> = records.iter().collect();

    for filter in &params.filters {
        result.retain(|record| filter.matches(record));
    }

    let page = result
        .into_iter()
        .skip(params.offset())
        .take(params.limit)
        .cloned()
        .collect();

    QueryResult::new(page)
}
