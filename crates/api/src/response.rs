//! Shared response envelope for API handlers.
//!
//! Every successful response wraps its payload in `{ "data": ... }`; using
//! the typed envelope instead of ad-hoc `serde_json::json!` keeps the shape
//! consistent across handlers.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
