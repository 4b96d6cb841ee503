//! Built cache keys and the facts recorded alongside them

use crate::{Error, Result};
use buildkey_hashing::HashCode;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Snapshot of everything appended to a builder, kept for diagnostics.
///
/// Only the digest takes part in cache lookups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheKeyInputs {
    /// Identity of the code defining the task type
    pub class_loader_hash: Option<HashCode>,
    /// Identity of the code defining the task's actions
    pub actions_class_loader_hash: Option<HashCode>,
    /// Last appended hash per input property
    pub input_hashes: BTreeMap<String, HashCode>,
    /// Declared output property names
    pub output_property_names: BTreeSet<String>,
    /// Task implementation class name
    pub task_class_name: Option<String>,
}

impl CacheKeyInputs {
    /// Which classloader identities are absent, if any
    #[must_use]
    pub fn missing_identity(&self) -> Option<MissingIdentity> {
        match (&self.class_loader_hash, &self.actions_class_loader_hash) {
            (Some(_), Some(_)) => None,
            (None, Some(_)) => Some(MissingIdentity::ClassLoader),
            (Some(_), None) => Some(MissingIdentity::ActionsClassLoader),
            (None, None) => Some(MissingIdentity::Both),
        }
    }

    /// JSON form of the snapshot
    pub fn to_json(&self) -> Result<serde_json::Value> {
        serde_json::to_value(self)
            .map_err(|e| Error::serialization(format!("Failed to encode cache key inputs: {e}")))
    }
}

fn write_optional(f: &mut fmt::Formatter<'_>, value: Option<&HashCode>) -> fmt::Result {
    match value {
        Some(hash) => write!(f, "{hash}"),
        None => f.write_str("null"),
    }
}

impl fmt::Display for CacheKeyInputs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CacheKeyInputs{classLoaderHash=")?;
        write_optional(f, self.class_loader_hash.as_ref())?;
        f.write_str(", actionsClassLoaderHash=")?;
        write_optional(f, self.actions_class_loader_hash.as_ref())?;
        f.write_str(", inputHashes={")?;
        for (i, (name, hash)) in self.input_hashes.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}={hash}")?;
        }
        f.write_str("}, outputPropertyNames=[")?;
        for (i, name) in self.output_property_names.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(name)?;
        }
        f.write_str("]}")
    }
}

/// Which classloader identity made a key invalid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingIdentity {
    /// The task type classloader hash was absent
    ClassLoader,
    /// The actions classloader hash was absent
    ActionsClassLoader,
    /// Both classloader hashes were absent
    Both,
}

impl fmt::Display for MissingIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ClassLoader => "task classloader hash is unavailable",
            Self::ActionsClassLoader => "actions classloader hash is unavailable",
            Self::Both => "task and actions classloader hashes are unavailable",
        })
    }
}

/// Result of building a cache key.
///
/// An invalid key carries no digest; the task must run without touching the
/// cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskCacheKey {
    /// Usable key
    Valid {
        /// Digest used for cache lookup and store
        hash_code: HashCode,
        /// Facts the digest was computed from
        inputs: CacheKeyInputs,
    },
    /// Key that must not be used for caching
    Invalid {
        /// Facts recorded before the build
        inputs: CacheKeyInputs,
    },
}

impl TaskCacheKey {
    /// Whether the key may be used for cache lookup
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid { .. })
    }

    /// The digest, present only for valid keys
    #[must_use]
    pub fn hash_code(&self) -> Option<&HashCode> {
        match self {
            Self::Valid { hash_code, .. } => Some(hash_code),
            Self::Invalid { .. } => None,
        }
    }

    /// The recorded facts
    #[must_use]
    pub fn inputs(&self) -> &CacheKeyInputs {
        match self {
            Self::Valid { inputs, .. } | Self::Invalid { inputs } => inputs,
        }
    }

    /// Consume the key and keep only the recorded facts
    #[must_use]
    pub fn into_inputs(self) -> CacheKeyInputs {
        match self {
            Self::Valid { inputs, .. } | Self::Invalid { inputs } => inputs,
        }
    }

    /// Why the key is invalid; `None` for valid keys
    #[must_use]
    pub fn missing_identity(&self) -> Option<MissingIdentity> {
        match self {
            Self::Valid { .. } => None,
            Self::Invalid { inputs } => inputs.missing_identity(),
        }
    }
}

impl fmt::Display for TaskCacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid { hash_code, .. } => write!(f, "{hash_code}"),
            Self::Invalid { .. } => f.write_str("INVALID"),
        }
    }
}
