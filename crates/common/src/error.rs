//! Error types shared across xcast crates.

/// Top-level error type for xcast operations.
#[derive(Debug, thiserror::Error)]
pub enum XcastError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error(
        "Capture region {width}x{height} at ({x},{y}) exceeds display bounds {max_width}x{max_height}"
    )]
    OutOfBounds {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        max_width: u32,
        max_height: u32,
    },

    #[error("Discovery error: {message}")]
    Discovery { message: String },

    #[error("A recording is already in progress")]
    AlreadyRecording,

    #[error("Process error: {message}")]
    Process { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using XcastError.
pub type XcastResult<T> = Result<T, XcastError>;

impl XcastError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn discovery(msg: impl Into<String>) -> Self {
        Self::Discovery {
            message: msg.into(),
        }
    }

    pub fn process(msg: impl Into<String>) -> Self {
        Self::Process {
            message: msg.into(),
        }
    }
}
