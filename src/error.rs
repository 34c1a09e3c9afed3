use thiserror::Error;

/// Failure kinds surfaced by the pipeline. Each request is all-or-nothing:
/// any of these terminates the request with no partial result.
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("acquisition failed: {0}")]
    AcquisitionFailed(String),

    #[error("transcode failed: {0}")]
    TranscodeFailed(String),

    #[error("transcription failed: {0}")]
    Transcription(String),

    #[error("summarization failed: {0}")]
    Summarization(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
