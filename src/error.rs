use thiserror::Error;

#[derive(Debug, Error)]
pub enum BannerError {
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Request error: {0}")]
    RequestError(String),
    #[error("Response error: {0}")]
    ResponseError(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("HTTP error: {0}")]
    HttpError(String),
    #[error("AWS error: {0}")]
    AwsError(String),
    #[error("Dispatch error: {0}")]
    DispatchError(String),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<reqwest::Error> for BannerError {
    fn from(err: reqwest::Error) -> Self {
        BannerError::HttpError(err.to_string())
    }
}

impl From<serde_json::Error> for BannerError {
    fn from(err: serde_json::Error) -> Self {
        BannerError::SerializationError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, BannerError>;
