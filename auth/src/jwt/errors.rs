use thiserror::Error;

/// Error type for token operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is expired")]
    Expired,

    #[error("Token is malformed: {0}")]
    Malformed(String),
}

/// Error for rejected signing material or lifetimes.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum KeyError {
    #[error("{kind} secret too short: minimum {min} bytes, got {actual}")]
    SecretTooShort {
        kind: String,
        min: usize,
        actual: usize,
    },

    #[error("Access and refresh tokens must use different secrets")]
    SharedSecret,

    #[error("{kind} token lifetime must be positive and at most {max_days} days")]
    InvalidTtl { kind: String, max_days: i64 },

    #[error("Expected a codec for {expected} tokens, got {actual}")]
    WrongKind { expected: String, actual: String },
}
