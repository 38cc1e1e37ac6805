use axum::body::Bytes;
use axum::Json;
use serde_json::Value;
use sentinel_core::flow;

use super::{run_blocking, RequestBody};
use crate::error::AppError;

/// POST /api/audit: audit the project and write the report.
pub async fn audit(body: Bytes) -> Result<Json<Value>, AppError> {
    let project = RequestBody::parse(&body)?.project()?;
    Ok(Json(run_blocking(move || flow::audit_flow(&project)).await?))
}

/// POST /api/roadmap
pub async fn roadmap(body: Bytes) -> Result<Json<Value>, AppError> {
    let project = RequestBody::parse(&body)?.project()?;
    Ok(Json(run_blocking(move || flow::roadmap_flow(&project)).await?))
}

/// POST /api/coach: `apply_safe` defaults to false.
pub async fn coach(body: Bytes) -> Result<Json<Value>, AppError> {
    let req = RequestBody::parse(&body)?;
    let project = req.project()?;
    let apply_safe = req.flag("apply_safe", false);
    Ok(Json(
        run_blocking(move || flow::coach_flow(&project, apply_safe)).await?,
    ))
}

/// POST /api/agent-pack
pub async fn agent_pack(body: Bytes) -> Result<Json<Value>, AppError> {
    let project = RequestBody::parse(&body)?.project()?;
    Ok(Json(
        run_blocking(move || flow::agent_pack_flow(&project)).await?,
    ))
}

/// POST /api/ship: `apply_safe` defaults to true.
pub async fn ship(body: Bytes) -> Result<Json<Value>, AppError> {
    let req = RequestBody::parse(&body)?;
    let project = req.project()?;
    let apply_safe = req.flag("apply_safe", true);
    Ok(Json(
        run_blocking(move || flow::ship_flow(&project, apply_safe)).await?,
    ))
}
