use thiserror::Error;

/// Rejected puzzle input. Raised before any search starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("board dimensions must be non-zero, got {width}x{height}")]
    EmptyBoard { width: u32, height: u32 },

    #[error("puzzle has no pieces")]
    NoPieces,

    #[error("piece #{index} has a zero dimension")]
    ZeroPiece { index: usize },

    #[error("{0}")]
    InvalidDimensions(String),

    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}
