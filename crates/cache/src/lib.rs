//! Deterministic build cache keys for task outputs
//!
//! A cache key folds everything that can affect a task's output into one
//! digest:
//! - Identity hashes of the code defining the task type and its actions
//! - Hashes of the declared input properties
//! - Names of the declared output properties
//! - The task implementation class name
//!
//! # Ordering
//!
//! [`TaskCacheKeyBuilder`] absorbs facts in the order they are appended.
//! The same call sequence always yields the same digest, and a different
//! sequence yields a different one. [`calculate_cache_key`] appends a
//! [`TaskExecutionState`] in a canonical order and is the usual entry point.
//!
//! # Validity
//!
//! A key built without both classloader hashes is [`TaskCacheKey::Invalid`].
//! That is a routine outcome for tasks whose code cannot be identified; such
//! tasks run without consulting the cache.
//!
//! ```
//! use buildkey_cache::{CacheKeyConfig, TaskExecutionState, calculate_cache_key};
//! use buildkey_hashing::HashAlgorithm;
//!
//! let state = TaskExecutionState {
//!     task_class_name: "Compile".to_string(),
//!     class_loader_hash: Some(HashAlgorithm::Sha256.digest(b"compile-plugin-1.0")),
//!     actions_class_loader_hash: Some(HashAlgorithm::Sha256.digest(b"build-script")),
//!     ..TaskExecutionState::default()
//! };
//! let key = calculate_cache_key(&state, &CacheKeyConfig::default())?;
//! assert!(key.is_valid());
//! # Ok::<(), buildkey_cache::Error>(())
//! ```

mod builder;
mod calculator;
pub mod config;
mod error;
pub mod key;
pub mod observer;

pub use error::{Error, Result};

pub use builder::TaskCacheKeyBuilder;
pub use calculator::{TaskExecutionState, calculate_cache_key};
pub use config::{CacheKeyConfig, InputOrdering};
pub use key::{CacheKeyInputs, MissingIdentity, TaskCacheKey};
pub use observer::{CacheKeyFact, CacheKeyObserver, TracingObserver};
