use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid note in column {column}: tail {tail} ms is not after head {head} ms")]
    InvalidNote { column: usize, head: u32, tail: u32 },

    #[error("Non-finite value in {stage} stage at {time_ms} ms")]
    NonFiniteValue { stage: &'static str, time_ms: usize },

    #[error("Internal computation fault: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
