use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Request never reached the service or the response never arrived.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The service answered with a non-success status.
    #[error("service returned {status} for {url}")]
    Service { status: u16, url: String },
    /// The listing body did not match the expected shape.
    #[error("malformed listing: {0}")]
    MalformedListing(#[source] serde_json::Error),
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(String),
    #[error("invalid path: {0}")]
    InvalidPath(String),
    #[error("not a folder: {0}")]
    NotAFolder(String),
    #[error("not a file: {0}")]
    NotAFile(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
