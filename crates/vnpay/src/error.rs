use thiserror::Error;

/// Reasons a signature could not be produced.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SignatureError {
    #[error("empty HMAC key")]
    EmptyKey,

    #[error("invalid HMAC key: {0}")]
    InvalidKey(String),
}

/// Reasons the client address could not be read from a request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientIpError {
    #[error("no peer address on connection")]
    MissingPeerAddr,

    #[error("{0}")]
    Unreadable(String),
}

/// Errors raised while assembling a [`GatewayConfig`](crate::GatewayConfig).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingRequired(&'static str),

    #[error("invalid URL in {var}: {value}")]
    InvalidUrl { var: &'static str, value: String },

    #[error("invalid environment: {0} (expected sandbox or production)")]
    InvalidEnvironment(String),
}
