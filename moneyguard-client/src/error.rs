//! Error types for the wallet client

use thiserror::Error;

/// Failures talking to the wallet API.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("wallet API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid header value: {0}")]
    Header(#[from] reqwest::header::InvalidHeaderValue),

    #[error("wallet API unreachable: {0}")]
    Unavailable(String),
}

/// Failures of the local key/value store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("store lock poisoned")]
    Poisoned,
}

#[derive(Error, Debug)]
pub enum ClientError {
    /// Statistics requested without a session token; nothing was sent.
    #[error("No token")]
    NoToken,

    /// Session refresh with no saved token.
    #[error("Token is not exist")]
    TokenMissing,

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// A cached value exists but cannot be decoded.
    #[error("corrupt cache entry '{key}': {source}")]
    Cache {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, ClientError>;
