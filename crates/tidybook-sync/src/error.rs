use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("missing churchsuite setting: {0}")]
    MissingSetting(&'static str),
    #[error("{0}")]
    Unavailable(String),
    #[error("api returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[cfg(feature = "churchsuite")]
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[cfg(feature = "churchsuite")]
    #[error("url error: {0}")]
    Url(#[from] url::ParseError),
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Parse(err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, FetchError>;
