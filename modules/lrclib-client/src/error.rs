use thiserror::Error;

pub type Result<T> = std::result::Result<T, LrclibError>;

#[derive(Debug, Error)]
pub enum LrclibError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out")]
    Timeout,

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for LrclibError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return LrclibError::Timeout;
        }
        if err.is_decode() {
            return LrclibError::Parse(err.to_string());
        }
        LrclibError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for LrclibError {
    fn from(err: serde_json::Error) -> Self {
        LrclibError::Parse(err.to_string())
    }
}
