pub mod artifact;
pub mod bridge;
pub mod flows;

use crate::error::AppError;
use axum::body::Bytes;
use sentinel_core::paths::expand_home;
use serde_json::{Map, Value};
use std::path::PathBuf;

/// Parsed JSON object body shared by every POST route.
pub struct RequestBody(Map<String, Value>);

impl RequestBody {
    /// Reject anything that is not a JSON object.
    pub fn parse(raw: &Bytes) -> Result<Self, AppError> {
        match serde_json::from_slice::<Value>(raw) {
            Ok(Value::Object(map)) => Ok(Self(map)),
            Ok(_) => Err(AppError::bad_request("Request JSON must be an object")),
            Err(_) => Err(AppError::bad_request("Request body must be valid JSON")),
        }
    }

    /// A required string field that is not blank. The value is returned as
    /// sent; whitespace only matters for the blank test.
    pub fn required_str(&self, field: &str) -> Result<String, AppError> {
        match self.0.get(field).and_then(Value::as_str) {
            Some(s) if !s.trim().is_empty() => Ok(s.to_string()),
            _ => Err(AppError::bad_request(format!("`{field}` is required"))),
        }
    }

    pub fn flag(&self, field: &str, default: bool) -> bool {
        self.0.get(field).and_then(Value::as_bool).unwrap_or(default)
    }

    /// `project_path` with `~` expanded, resolved to an existing directory.
    pub fn project(&self) -> Result<PathBuf, AppError> {
        let raw = self.required_str("project_path")?;
        Ok(sentinel_core::flow::resolve_project(&expand_home(&raw))?)
    }
}

/// Run a blocking core call off the async runtime and serialize its result.
pub async fn run_blocking<T, F>(f: F) -> Result<Value, AppError>
where
    F: FnOnce() -> sentinel_core::Result<T> + Send + 'static,
    T: serde::Serialize + Send + 'static,
{
    let result = tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;
    Ok(serde_json::to_value(result)?)
}
