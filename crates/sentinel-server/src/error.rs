use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use sentinel_core::SentinelError;

// ---------------------------------------------------------------------------
// Explicit status sentinels
// ---------------------------------------------------------------------------

/// Carries an explicit HTTP status through the `anyhow::Error` chain without
/// widening `SentinelError` with transport concerns.
#[derive(Debug)]
struct StatusError {
    status: StatusCode,
    message: String,
}

impl std::fmt::Display for StatusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for StatusError {}

// ---------------------------------------------------------------------------
// AppError
// ---------------------------------------------------------------------------

/// Unified error type for HTTP responses.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl AppError {
    fn with_status(status: StatusCode, msg: impl Into<String>) -> Self {
        Self(
            StatusError {
                status,
                message: msg.into(),
            }
            .into(),
        )
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::with_status(StatusCode::BAD_REQUEST, msg)
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::with_status(StatusCode::UNAUTHORIZED, msg)
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::with_status(StatusCode::NOT_FOUND, msg)
    }

    fn status(&self) -> StatusCode {
        if let Some(e) = self.0.downcast_ref::<StatusError>() {
            return e.status;
        }
        match self.0.downcast_ref::<SentinelError>() {
            Some(SentinelError::ProjectNotFound(_))
            | Some(SentinelError::ArtifactOutsideProject(_)) => StatusCode::BAD_REQUEST,
            Some(SentinelError::ReportNotFound(_)) | Some(SentinelError::ArtifactNotFound(_)) => {
                StatusCode::NOT_FOUND
            }
            Some(SentinelError::ArtifactTooLarge { .. }) => StatusCode::PAYLOAD_TOO_LARGE,
            Some(SentinelError::MalformedReport { .. }) => StatusCode::UNPROCESSABLE_ENTITY,
            Some(SentinelError::Io(_)) | Some(SentinelError::Json(_)) | None => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %format!("{:#}", self.0), "request failed");
            "internal server error".to_string()
        } else {
            self.0.to_string()
        };
        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn project_not_found_maps_to_400() {
        let err = AppError(SentinelError::ProjectNotFound(PathBuf::from("/nope")).into());
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn outside_project_maps_to_400() {
        let err = AppError(SentinelError::ArtifactOutsideProject("../x".into()).into());
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn artifact_not_found_maps_to_404() {
        let err = AppError(SentinelError::ArtifactNotFound(PathBuf::from("a.md")).into());
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn artifact_too_large_maps_to_413() {
        let err = AppError(
            SentinelError::ArtifactTooLarge {
                path: PathBuf::from("big"),
                size: 3_000_000,
            }
            .into(),
        );
        assert_eq!(err.into_response().status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[test]
    fn malformed_report_maps_to_422() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = AppError(
            SentinelError::MalformedReport {
                path: PathBuf::from("report.json"),
                source,
            }
            .into(),
        );
        assert_eq!(
            err.into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn io_error_maps_to_500() {
        let err = AppError(SentinelError::Io(std::io::Error::other("disk full")).into());
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn foreign_error_maps_to_500() {
        let err = AppError(anyhow::anyhow!("something unexpected"));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn constructors() {
        assert_eq!(
            AppError::bad_request("x").into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::unauthorized("x").into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::not_found("x").into_response().status(),
            StatusCode::NOT_FOUND
        );
    }

    #[tokio::test]
    async fn internal_error_body_is_generic() {
        use http_body_util::BodyExt;
        let response = AppError(anyhow::anyhow!("connection string leaked")).into_response();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "internal server error");
    }
}
