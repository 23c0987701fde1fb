//! Normalization of listing payloads whose shape varies by endpoint.
//!
//! Payload shapes are tried in a fixed priority order; the first matcher
//! that recognises the payload wins and anything unrecognised becomes an
//! empty result.

use crate::api::error::ApiError;
use crate::models::PaginatedResult;
use serde_json::Value;
use tracing::{debug, warn};

/// Page size reported when neither the caller nor the payload provides one
pub const DEFAULT_PAGE_SIZE: u32 = 12;

/// How a matched payload maps onto pagination fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pagination {
    /// Envelope that may carry `count`, `next` and `previous`
    Envelope,
    /// Bare array: everything is on one page
    Bare,
}

/// A recognised payload shape: predicate and extractor in one
struct ShapeMatcher {
    name: &'static str,
    extract: fn(&Value) -> Option<&Vec<Value>>,
    pagination: Pagination,
}

const SHAPES: &[ShapeMatcher] = &[
    ShapeMatcher {
        name: "results",
        extract: |raw| raw.get("results").and_then(Value::as_array),
        pagination: Pagination::Envelope,
    },
    ShapeMatcher {
        name: "array",
        extract: Value::as_array,
        pagination: Pagination::Bare,
    },
    ShapeMatcher {
        name: "items",
        extract: |raw| raw.get("items").and_then(Value::as_array),
        pagination: Pagination::Envelope,
    },
    ShapeMatcher {
        name: "data",
        extract: |raw| raw.get("data").and_then(Value::as_array),
        pagination: Pagination::Envelope,
    },
];

fn match_shape(raw: &Value) -> Option<(&ShapeMatcher, &Vec<Value>)> {
    let matched = SHAPES
        .iter()
        .find_map(|shape| (shape.extract)(raw).map(|entries| (shape, entries)));

    match matched {
        Some((shape, entries)) => debug!("Payload matched {} shape with {} entries", shape.name, entries.len()),
        None if raw.is_null() => debug!("Empty payload"),
        None => warn!("Unexpected payload shape, treating as empty: {}", describe(raw)),
    }

    matched
}

/// Normalize a listing payload into a paginated result. Never fails.
pub fn normalize_list(
    raw: &Value,
    requested_page: Option<u32>,
    requested_page_size: Option<u32>,
) -> PaginatedResult {
    let Some((shape, entries)) = match_shape(raw) else {
        return PaginatedResult::empty(
            requested_page.unwrap_or(1),
            requested_page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        );
    };

    let len = entries.len();
    match shape.pagination {
        Pagination::Bare => PaginatedResult {
            results: entries.clone(),
            count: len as u64,
            next: None,
            previous: None,
            page: 1,
            page_size: len as u32,
        },
        Pagination::Envelope => PaginatedResult {
            results: entries.clone(),
            count: raw.get("count").and_then(Value::as_u64).unwrap_or(len as u64),
            next: link(raw, "next"),
            previous: link(raw, "previous"),
            page: requested_page.unwrap_or(1),
            page_size: requested_page_size.unwrap_or(len as u32),
        },
    }
}

/// Normalize a payload into a bare list for non-paginated endpoints
pub fn normalize_flat_list(raw: &Value) -> Vec<Value> {
    match_shape(raw)
        .map(|(_, entries)| entries.clone())
        .unwrap_or_default()
}

/// Turn a fetch outcome into a listing result.
///
/// Transport failures degrade to an empty result, except authentication
/// failures, which the caller needs to see.
pub fn recover_list(
    outcome: Result<Value, ApiError>,
    requested_page: Option<u32>,
    requested_page_size: Option<u32>,
) -> Result<PaginatedResult, ApiError> {
    match outcome {
        Ok(raw) => Ok(normalize_list(&raw, requested_page, requested_page_size)),
        Err(err) if err.is_auth_error() => Err(err),
        Err(err) => {
            warn!("Listing fetch failed, showing no results: {}", err);
            Ok(normalize_list(&Value::Null, requested_page, requested_page_size))
        }
    }
}

fn link(raw: &Value, key: &str) -> Option<String> {
    raw.get(key)
        .and_then(Value::as_str)
        .filter(|url| !url.is_empty())
        .map(str::to_string)
}

fn describe(raw: &Value) -> String {
    match raw {
        Value::Object(map) => format!("object with keys {:?}", map.keys().collect::<Vec<_>>()),
        Value::Array(_) => "array".to_string(),
        Value::String(_) => "string".to_string(),
        Value::Number(_) => "number".to_string(),
        Value::Bool(_) => "bool".to_string(),
        Value::Null => "null".to_string(),
    }
}
