use axum::body::Bytes;
use axum::Json;
use serde_json::Value;

use super::{run_blocking, RequestBody};
use crate::error::AppError;

/// POST /api/artifact: preview a generated file inside the project.
pub async fn read_artifact(body: Bytes) -> Result<Json<Value>, AppError> {
    let req = RequestBody::parse(&body)?;
    let project = req.project()?;
    let artifact_path = req.required_str("artifact_path")?;
    Ok(Json(
        run_blocking(move || sentinel_core::flow::read_artifact(&project, &artifact_path)).await?,
    ))
}
