use thiserror::Error;

#[derive(Error, Debug)]
pub enum MotionError {
    #[error("Shape not found: {0}")]
    ShapeNotFound(String),
    #[error("Keyframe not found: {0}")]
    KeyframeNotFound(String),
    #[error("Invalid export settings: {0}")]
    InvalidSettings(String),
    #[error("Export cancelled before frame {frame}")]
    Cancelled { frame: usize },
    #[error("Script error: {0}")]
    Script(String),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

pub type Result<T, E = MotionError> = std::result::Result<T, E>;
