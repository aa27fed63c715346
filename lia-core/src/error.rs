//! # Error Types for LIA
//!
//! Unified error handling across all LIA crates.

use thiserror::Error;

/// Main error type for LIA operations
#[derive(Error, Debug)]
pub enum LiaError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// An experience source failed to deliver
    #[error("Collector error: {0}")]
    Collector(String),

    /// Network error
    #[error("Network error: {0}")]
    Network(String),

    /// Persistence sink error
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A component found its own state inconsistent
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

/// Result type for LIA operations
pub type LiaResult<T> = Result<T, LiaError>;

impl LiaError {
    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a collector error
    pub fn collector(msg: impl Into<String>) -> Self {
        Self::Collector(msg.into())
    }

    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Create a persistence error
    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }

    /// Create a serialization error
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// Create an invariant violation
    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }
}

impl From<serde_json::Error> for LiaError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}
