//! Error types for the cache key crate

// Rust 1.92 compiler bug: false positives for thiserror/miette derive macro fields
// https://github.com/rust-lang/rust/issues/147648
#![allow(unused_assignments)]

use miette::Diagnostic;
use thiserror::Error;

/// Error type for cache key operations
///
/// A missing classloader hash is not an error; it yields an invalid key.
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    /// A caller passed an input property name the builder cannot absorb
    #[error("Invalid input property name: {name:?}")]
    #[diagnostic(
        code(buildkey::cache::invalid_name),
        help("Input property names must be non-empty")
    )]
    InvalidPropertyName {
        /// The rejected name
        name: String,
    },

    /// Configuration or validation error
    #[error("Cache key configuration error: {message}")]
    #[diagnostic(code(buildkey::cache::config))]
    Configuration {
        /// Error message describing the configuration issue
        message: String,
    },

    /// Serialization error
    #[error("Serialization error: {message}")]
    #[diagnostic(code(buildkey::cache::serialization))]
    Serialization {
        /// Error message describing the serialization issue
        message: String,
    },

    /// Digest or algorithm error from the hashing layer
    #[error(transparent)]
    #[diagnostic(transparent)]
    Hashing(#[from] buildkey_hashing::Error),
}

impl Error {
    /// Create an invalid input property name error
    #[must_use]
    pub fn invalid_name(name: impl Into<String>) -> Self {
        Self::InvalidPropertyName { name: name.into() }
    }

    /// Create a configuration error
    #[must_use]
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration {
            message: msg.into(),
        }
    }

    /// Create a serialization error
    #[must_use]
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization {
            message: msg.into(),
        }
    }
}

/// Result type for cache key operations
pub type Result<T> = std::result::Result<T, Error>;
