//! Error types for lrucache

use std::fmt;

/// Result type alias for lrucache operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for cache operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Requested capacity was zero or negative
    InvalidCapacity,

    /// Key is not present in the cache
    KeyNotFound(String),

    /// Configuration text could not be interpreted
    InvalidConfig(String),
}

impl Error {
    /// Returns true for a routine cache miss
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::KeyNotFound(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidCapacity => write!(f, "capacity must be greater than zero"),
            Error::KeyNotFound(key) => write!(f, "key '{}' not found in cache", key),
            Error::InvalidConfig(msg) => write!(f, "invalid cache configuration: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_capacity_message() {
        assert_eq!(
            Error::InvalidCapacity.to_string(),
            "capacity must be greater than zero"
        );
    }

    #[test]
    fn test_key_not_found_message() {
        let err = Error::KeyNotFound("2".to_string());
        assert_eq!(err.to_string(), "key '2' not found in cache");
        assert!(err.is_not_found());
        assert!(!Error::InvalidCapacity.is_not_found());
    }

    #[test]
    fn test_empty_key_message() {
        let err = Error::KeyNotFound(String::new());
        assert_eq!(err.to_string(), "key '' not found in cache");
    }
}
