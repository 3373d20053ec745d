//! Ready-made result handlers for [`QueryCoordinator`](crate::QueryCoordinator).

use crate::error::{AggregationError, HandlerResult};
use crate::models::QueryResult;
use indexmap::IndexMap;

/// Maps every result name to its payload.
///
/// Names are expected to be unique within a batch. When they are not, the
/// entry that comes later in the results sequence overwrites the earlier one.
pub fn merge_handler<T>(results: Vec<QueryResult<T>>) -> HandlerResult<IndexMap<String, Vec<T>>> {
    let mut merged = IndexMap::with_capacity(results.len());
    for result in results {
        merged.insert(result.name, result.payload);
    }
    Ok(merged)
}

/// Hands the results back untouched.
pub fn collect_handler<T>(results: Vec<QueryResult<T>>) -> HandlerResult<Vec<QueryResult<T>>> {
    Ok(results)
}

pub fn single_handler<T>(results: Vec<QueryResult<T>>) -> HandlerResult<QueryResult<T>> {
    let actual = results.len();
    let mut results = results.into_iter();
    match (results.next(), results.next()) {
        (Some(result), None) => Ok(result),
        _ => Err(AggregationError::UnexpectedCount {
            expected: 1,
            actual,
        }),
    }
}
