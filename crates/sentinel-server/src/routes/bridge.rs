//! OpenClaw bridge endpoints for external agent orchestrators. Hidden (404)
//! unless the bridge is enabled; gated by `X-OpenClaw-Key` when a key is
//! configured.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde_json::{json, Value};
use sentinel_core::flow;

use super::{run_blocking, RequestBody};
use crate::error::AppError;
use crate::state::{AppState, BridgeConfig};

pub const KEY_HEADER: &str = "x-openclaw-key";
pub const ACTIONS: &[&str] = &["audit", "roadmap", "coach", "agent-pack", "ship"];

pub const STATUS_PATH: &str = "/api/openclaw/status";
pub const EXECUTE_PATH: &str = "/api/openclaw/execute";
pub const ARTIFACT_PATH: &str = "/api/openclaw/artifact";

fn authorize(bridge: &BridgeConfig, headers: &HeaderMap) -> Result<(), AppError> {
    if !bridge.enabled {
        return Err(AppError::not_found(
            "OpenClaw bridge is disabled for this Studio session.",
        ));
    }
    if let Some(expected) = &bridge.key {
        let provided = headers
            .get(KEY_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .unwrap_or("");
        if provided != expected {
            return Err(AppError::unauthorized("Invalid or missing OpenClaw API key."));
        }
    }
    Ok(())
}

/// GET /api/openclaw/status
pub async fn status(
    State(app): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Value>, AppError> {
    authorize(&app.bridge, &headers)?;
    Ok(Json(json!({
        "bridge": "openclaw",
        "enabled": true,
        "requires_api_key": app.bridge.requires_key(),
        "actions": ACTIONS,
        "endpoints": {
            "execute": EXECUTE_PATH,
            "artifact": ARTIFACT_PATH,
        },
    })))
}

/// POST /api/openclaw/execute: run one named flow.
pub async fn execute(
    State(app): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    authorize(&app.bridge, &headers)?;
    let req = RequestBody::parse(&body)?;
    let project = req.project()?;
    let action = req
        .required_str("action")
        .map_err(|_| AppError::bad_request(format!("`action` is required for {EXECUTE_PATH}")))?
        .trim()
        .to_string();

    let result = match action.as_str() {
        "audit" => run_blocking(move || flow::audit_flow(&project)).await?,
        "roadmap" => run_blocking(move || flow::roadmap_flow(&project)).await?,
        "coach" => {
            let apply_safe = req.flag("apply_safe", false);
            run_blocking(move || flow::coach_flow(&project, apply_safe)).await?
        }
        "agent-pack" => run_blocking(move || flow::agent_pack_flow(&project)).await?,
        "ship" => {
            let apply_safe = req.flag("apply_safe", true);
            run_blocking(move || flow::ship_flow(&project, apply_safe)).await?
        }
        _ => {
            return Err(AppError::bad_request(format!(
                "Unsupported action. Valid actions: {}.",
                ACTIONS.join(", ")
            )))
        }
    };
    tracing::info!(action = %action, "openclaw action complete");
    Ok(Json(json!({ "action": action, "result": result })))
}

/// POST /api/openclaw/artifact
pub async fn artifact(
    State(app): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    authorize(&app.bridge, &headers)?;
    let req = RequestBody::parse(&body)?;
    let project = req.project()?;
    let artifact_path = req.required_str("artifact_path")?;

    let display = project.display().to_string();
    let preview =
        run_blocking(move || flow::read_artifact(&project, &artifact_path)).await?;
    Ok(Json(json!({ "artifact": preview, "project_path": display })))
}
