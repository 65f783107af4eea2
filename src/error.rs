use thiserror::Error;

/// Errors surfaced by the game core and its serving layer
#[derive(Error, Debug)]
pub enum GameError {
    #[error("Invalid coordinate ({row}, {column}): rows and columns must be in [0, 3)")]
    InvalidCoordinate { row: usize, column: usize },

    #[error("Malformed command: {0}")]
    MalformedCommand(#[from] serde_json::Error),

    #[error("Could not load resource {path}: {source}")]
    Resource {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tungstenite::Error),
}

/// Convenience Result type for game operations
pub type Result<T> = std::result::Result<T, GameError>;
