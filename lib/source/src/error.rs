use http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("request to REST source failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("REST source returned {status} for '{path}'")]
    UnexpectedStatus { status: StatusCode, path: String },
}
