//! Hooks for tracing what goes into a cache key

use buildkey_hashing::HashCode;
use std::fmt;

/// A single fact appended to a [`crate::TaskCacheKeyBuilder`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheKeyFact<'a> {
    /// Identity of the code defining the task type
    ClassLoaderHash(Option<&'a HashCode>),
    /// Identity of the code defining the task's actions
    ActionsClassLoaderHash(Option<&'a HashCode>),
    /// Hash of a declared input property
    InputPropertyHash {
        /// Property name
        name: &'a str,
        /// Property value hash
        hash: &'a HashCode,
    },
    /// Name of a declared output property
    OutputPropertyName(&'a str),
    /// Task implementation class name
    TaskClass(&'a str),
}

impl CacheKeyFact<'_> {
    /// Stable name of the fact, used as a log field
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ClassLoaderHash(_) => "classLoaderHash",
            Self::ActionsClassLoaderHash(_) => "actionsClassLoaderHash",
            Self::InputPropertyHash { .. } => "inputPropertyHash",
            Self::OutputPropertyName(_) => "outputPropertyName",
            Self::TaskClass(_) => "taskClass",
        }
    }
}

impl fmt::Display for CacheKeyFact<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClassLoaderHash(hash) | Self::ActionsClassLoaderHash(hash) => match hash {
                Some(hash) => write!(f, "{hash}"),
                None => f.write_str("null"),
            },
            Self::InputPropertyHash { name, hash } => write!(f, "{name}={hash}"),
            Self::OutputPropertyName(name) | Self::TaskClass(name) => f.write_str(name),
        }
    }
}

/// Receives every fact appended to a builder, in call order
pub trait CacheKeyObserver: Send {
    /// Called once per append, after the fact has been absorbed
    fn fact_appended(&self, fact: &CacheKeyFact<'_>);
}

/// Observer that logs each appended fact at debug level
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl CacheKeyObserver for TracingObserver {
    fn fact_appended(&self, fact: &CacheKeyFact<'_>) {
        tracing::debug!(
            target: "buildkey::cache_key",
            fact = fact.name(),
            value = %fact,
            "Appending {} to build cache key",
            fact.name()
        );
    }
}
