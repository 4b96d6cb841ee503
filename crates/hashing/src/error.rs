//! Error types for the hashing crate

// Rust 1.92 compiler bug: false positives for thiserror/miette derive macro fields
// https://github.com/rust-lang/rust/issues/147648
#![allow(unused_assignments)]

use miette::Diagnostic;
use thiserror::Error;

/// Error type for digest parsing and hasher selection
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum Error {
    /// A digest must contain at least one byte
    #[error("Hash code must not be empty")]
    #[diagnostic(code(buildkey::hashing::empty))]
    Empty,

    /// The digest string is not valid hex
    #[error("Invalid hex hash code: {input}")]
    #[diagnostic(
        code(buildkey::hashing::invalid_hex),
        help("Hash codes are written as an even number of hex digits")
    )]
    InvalidHex {
        /// The rejected input
        input: String,
    },

    /// The hash algorithm name is not recognised
    #[error("Unknown hash algorithm: {name}")]
    #[diagnostic(
        code(buildkey::hashing::unknown_algorithm),
        help("Supported algorithms are sha256 and sha512")
    )]
    UnknownAlgorithm {
        /// The rejected algorithm name
        name: String,
    },
}

impl Error {
    /// Create an invalid hex error
    #[must_use]
    pub fn invalid_hex(input: impl Into<String>) -> Self {
        Self::InvalidHex {
            input: input.into(),
        }
    }

    /// Create an unknown algorithm error
    #[must_use]
    pub fn unknown_algorithm(name: impl Into<String>) -> Self {
        Self::UnknownAlgorithm { name: name.into() }
    }
}

/// Result type for hashing operations
pub type Result<T> = std::result::Result<T, Error>;
