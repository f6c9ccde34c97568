use hmac::digest::InvalidLength;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Config Error: {0}")]
    Config(String),
    #[error("Invalid Object Key: {0}")]
    InvalidKey(String),
    #[error("Invalid Expiry: {0} seconds is outside 1..=604800")]
    InvalidExpiry(i64),
    #[error("Sign Error: {0}")]
    Sign(String),
    #[error("Build Request Error: {0}")]
    Request(String),
}

impl From<InvalidLength> for Error {
    fn from(e: InvalidLength) -> Self {
        Self::Sign(e.to_string())
    }
}

impl From<reqwest::header::InvalidHeaderValue> for Error {
    fn from(e: reqwest::header::InvalidHeaderValue) -> Self {
        Self::Request(e.to_string())
    }
}

impl From<reqwest::header::InvalidHeaderName> for Error {
    fn from(e: reqwest::header::InvalidHeaderName) -> Self {
        Self::Request(e.to_string())
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
