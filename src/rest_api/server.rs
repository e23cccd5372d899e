//! # Record Routes
//!
//! - `GET    /pokemons`      list with search, type, field filters and paging
//! - `GET    /pokemons/:id`  one record with its numeric neighbors
//! - `POST   /pokemons`      insert a caller-identified record
//! - `DELETE /pokemons/:id`  remove a record

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde_json::Value;

use crate::adjacency::Adjacent;
use crate::core::DexError;
use crate::query::{QueryParams, QueryResult};
use crate::record::Record;
use crate::schema::CandidateRecord;
use crate::storage::RecordStore;

use super::errors::RestResult;
use super::response::{DeleteResponse, SingleResponse};

/// Build the record router
pub fn record_routes(store: RecordStore) -> Router {
    Router::new()
        .route("/pokemons", get(list_handler).post(insert_handler))
        .route("/pokemons/:id", get(get_handler).delete(delete_handler))
        .with_state(store)
}

/// Path ids that are not positive integers cannot name a record.
fn parse_id(raw: &str) -> RestResult<u64> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| DexError::not_found(raw.to_string()))
}

/// List records handler
async fn list_handler(
    State(store): State<RecordStore>,
    Query(query): Query<Vec<(String, String)>>,
) -> RestResult<Json<QueryResult>> {
    let params = QueryParams::parse(&query)?;
    Ok(Json(store.query(&params)?))
}

/// Get single record handler
async fn get_handler(
    State(store): State<RecordStore>,
    Path(id): Path<String>,
) -> RestResult<Json<SingleResponse<Adjacent>>> {
    let adjacent = store.lookup(parse_id(&id)?)?;
    Ok(Json(SingleResponse::new(adjacent)))
}

/// Insert record handler
///
/// The body is decoded by hand so that an empty or malformed payload is
/// reported like any other missing field, with the JSON error body.
async fn insert_handler(
    State(store): State<RecordStore>,
    body: Bytes,
) -> RestResult<Json<Record>> {
    let body: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let candidate = CandidateRecord::from_value(&body);
    Ok(Json(store.insert(&candidate)?))
}

/// Delete record handler
async fn delete_handler(
    State(store): State<RecordStore>,
    Path(id): Path<String>,
) -> RestResult<Json<DeleteResponse>> {
    store.delete(parse_id(&id)?)?;
    Ok(Json(DeleteResponse::success()))
}
