//! Wire types for the WooCommerce-style batch update endpoint.
//!
//! The batch endpoint takes `{"update": [...]}` and answers with a
//! per-item result array: plain product objects for successes,
//! `{"id": ..., "error": {...}}` entries for rejections. Unknown
//! fields are ignored for forward compatibility.

use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

/// Request body for a batch update call.
#[derive(Debug, Serialize)]
pub struct BatchUpdateRequest<'a> {
    pub update: &'a [Json],
}

/// Response from a batch update call.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BatchResponse {
    #[serde(default)]
    pub update: Vec<BatchItemResult>,
}

/// One item's result within a batch response.
#[derive(Debug, Clone, Deserialize)]
pub struct BatchItemResult {
    pub id: Option<i64>,
    #[serde(default)]
    pub error: Option<BatchItemError>,
}

/// Structured per-item error from the remote.
#[derive(Debug, Clone, Deserialize)]
pub struct BatchItemError {
    pub code: Option<String>,
    pub message: Option<String>,
}

impl BatchItemResult {
    /// True when the remote accepted this item.
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

impl BatchItemError {
    /// Whether this error means the product no longer exists upstream
    /// (deleted remotely) — a recoverable skip, not a run-fatal error.
    pub fn is_not_found(&self) -> bool {
        self.code
            .as_deref()
            .is_some_and(|code| code.contains("invalid_id") || code.contains("not_found"))
    }

    /// Human-readable reason for reports.
    pub fn describe(&self) -> String {
        match (&self.code, &self.message) {
            (Some(code), Some(message)) => format!("{code}: {message}"),
            (Some(code), None) => code.clone(),
            (None, Some(message)) => message.clone(),
            (None, None) => "unspecified remote error".to_string(),
        }
    }
}

impl BatchResponse {
    /// Find the result entry for a remote id, if the response mentions
    /// it at all.
    pub fn result_for(&self, remote_id: i64) -> Option<&BatchItemResult> {
        self.update.iter().find(|r| r.id == Some(remote_id))
    }
}
