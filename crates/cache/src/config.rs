//! Cache key builder configuration

use crate::{Error, Result};
use buildkey_hashing::HashAlgorithm;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Environment variable selecting the digest algorithm
pub const HASH_ALGORITHM_ENV: &str = "BUILDKEY_HASH_ALGORITHM";

/// Environment variable selecting how input properties are absorbed
pub const INPUT_ORDERING_ENV: &str = "BUILDKEY_INPUT_ORDERING";

/// How the builder absorbs input property hashes.
///
/// Switching away from [`InputOrdering::CallOrder`] changes every produced
/// digest, so keys built in one mode never match keys built in the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InputOrdering {
    /// Absorb each input property when it is appended. The caller owns the
    /// canonical order.
    #[default]
    CallOrder,
    /// Defer input properties until `build` and absorb the final
    /// `name -> digest` map sorted by name.
    SortedByName,
}

impl fmt::Display for InputOrdering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::CallOrder => "call-order",
            Self::SortedByName => "sorted-by-name",
        })
    }
}

impl FromStr for InputOrdering {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "call-order" => Ok(Self::CallOrder),
            "sorted-by-name" => Ok(Self::SortedByName),
            other => Err(Error::configuration(format!(
                "unknown input ordering '{other}', expected 'call-order' or 'sorted-by-name'"
            ))),
        }
    }
}

/// Settings shared by every builder created for a build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CacheKeyConfig {
    /// Digest algorithm of the final key
    pub algorithm: HashAlgorithm,
    /// Absorption order of input properties
    pub input_ordering: InputOrdering,
}

impl CacheKeyConfig {
    /// Parse a JSON document; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::serialization(format!("Failed to parse cache key config: {e}")))
    }

    /// Resolve configuration from `BUILDKEY_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve configuration through an arbitrary variable lookup.
    ///
    /// Unset and blank variables keep the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let read = |key: &str| lookup(key).filter(|s| !s.trim().is_empty());

        let mut config = Self::default();
        if let Some(value) = read(HASH_ALGORITHM_ENV) {
            config.algorithm = value.parse()?;
        }
        if let Some(value) = read(INPUT_ORDERING_ENV) {
            config.input_ordering = value.parse()?;
        }
        Ok(config)
    }
}
