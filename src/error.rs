use reqwest::StatusCode;
use thiserror::Error;

/// Why a run-reports response could not be read as a checklist.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChecklistError {
    #[error("checklist response is not a JSON object")]
    NotAnObject,

    #[error("checklist response is missing key `{0}`")]
    MissingKey(&'static str),

    #[error("checklist response has unexpected key `{0}`")]
    UnknownKey(String),

    #[error("checklist value for `{0}` is not a boolean")]
    NotABoolean(String),
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server answered with status {0}")]
    Status(StatusCode),

    #[error("malformed checklist: {0}")]
    Checklist(#[from] ChecklistError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid server url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("no files to upload")]
    NoFiles,
}

pub type Result<T> = std::result::Result<T, ClientError>;
