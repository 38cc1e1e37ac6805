use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SentinelError {
    #[error("project path does not exist or is not a directory: {}", .0.display())]
    ProjectNotFound(PathBuf),

    #[error("report file not found: {}", .0.display())]
    ReportNotFound(PathBuf),

    #[error("malformed report {}: {source}", path.display())]
    MalformedReport {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("artifact path must stay inside the project directory: {0}")]
    ArtifactOutsideProject(String),

    #[error("artifact not found: {}", .0.display())]
    ArtifactNotFound(PathBuf),

    #[error("artifact is too large to preview ({size} bytes, max 2MB): {}", path.display())]
    ArtifactTooLarge { path: PathBuf, size: u64 },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SentinelError>;
