//! Error kinds for the secret sharing engine

use thiserror::Error;

/// Result type specialized for secret sharing operations.
pub type Result<T> = std::result::Result<T, SssError>;

/// Errors raised while validating, hiding or recovering a message.
///
/// Every validation error is raised before any random draw or polynomial
/// evaluation, so a failed `hide` never emits a partial share set.
#[derive(Debug, Error)]
pub enum SssError {
    #[error("configuration is required")]
    ConfigRequired,
    #[error("invalid number of shares: {0}")]
    InvalidShareCount(String),
    #[error("invalid threshold: {0}")]
    InvalidThreshold(String),
    #[error("invalid prime: {0}")]
    InvalidPrime(String),
    #[error("message too long: {length} bytes (max {max})")]
    MessageTooLong { length: usize, max: usize },
    #[error("malformed share: {0}")]
    MalformedShare(String),
    #[error("{field} {value} exceeds the share format capacity (max {max})")]
    IndexOutOfRange {
        field: &'static str,
        value: u64,
        max: u64,
    },
    #[error("random source unavailable: {0}")]
    RandomUnavailable(#[source] rand::Error),
    #[error("message could not be split into chunks")]
    EncodingFailed,
    #[error("value has no inverse modulo the prime")]
    NoInverse,
    #[error("no shares provided")]
    NoShares,
    #[error("no shares found for chunk {0}")]
    MissingChunk(u32),
}
