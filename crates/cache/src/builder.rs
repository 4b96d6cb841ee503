//! Incremental cache key builder
//!
//! Facts are absorbed into the hasher in exactly the order the `append_*`
//! methods are called. The builder never sorts or deduplicates, so callers
//! must append in a reproducible order (see [`crate::calculate_cache_key`]).

use crate::config::{CacheKeyConfig, InputOrdering};
use crate::key::{CacheKeyInputs, TaskCacheKey};
use crate::observer::{CacheKeyFact, CacheKeyObserver, TracingObserver};
use crate::{Error, Result};
use buildkey_hashing::{BuildCacheHasher, DefaultBuildCacheHasher, HashCode};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Single-use accumulator of everything that affects a task's output.
///
/// `build` consumes the builder, so it cannot be appended to or built again.
pub struct TaskCacheKeyBuilder<H = DefaultBuildCacheHasher> {
    hasher: H,
    input_ordering: InputOrdering,
    observer: Box<dyn CacheKeyObserver>,
    class_loader_hash: Option<HashCode>,
    actions_class_loader_hash: Option<HashCode>,
    input_hashes: BTreeMap<String, HashCode>,
    output_property_names: BTreeSet<String>,
    task_class_name: Option<String>,
}

impl TaskCacheKeyBuilder {
    /// Builder with SHA-256 and call-order absorption
    #[must_use]
    pub fn new() -> Self {
        Self::with_hasher(DefaultBuildCacheHasher::default())
    }

    /// Builder using the configured algorithm and input ordering
    #[must_use]
    pub fn from_config(config: &CacheKeyConfig) -> Self {
        Self::with_hasher(DefaultBuildCacheHasher::new(config.algorithm))
            .with_input_ordering(config.input_ordering)
    }
}

impl Default for TaskCacheKeyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: BuildCacheHasher> TaskCacheKeyBuilder<H> {
    /// Builder over a caller-supplied hasher
    pub fn with_hasher(hasher: H) -> Self {
        Self {
            hasher,
            input_ordering: InputOrdering::default(),
            observer: Box::new(TracingObserver),
            class_loader_hash: None,
            actions_class_loader_hash: None,
            input_hashes: BTreeMap::new(),
            output_property_names: BTreeSet::new(),
            task_class_name: None,
        }
    }

    /// Select how input properties are absorbed
    #[must_use]
    pub fn with_input_ordering(mut self, ordering: InputOrdering) -> Self {
        self.input_ordering = ordering;
        self
    }

    /// Replace the default tracing observer
    #[must_use]
    pub fn with_observer(mut self, observer: Box<dyn CacheKeyObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Record the identity of the code defining the task type.
    ///
    /// `None` is accepted and makes the built key invalid.
    pub fn append_class_loader_hash(&mut self, hash: Option<&HashCode>) -> &mut Self {
        if let Some(hash) = hash {
            self.hasher.put_bytes(hash.as_bytes());
        }
        self.class_loader_hash = hash.cloned();
        self.observer
            .fact_appended(&CacheKeyFact::ClassLoaderHash(hash));
        self
    }

    /// Record the identity of the code defining the task's actions.
    ///
    /// `None` is accepted and makes the built key invalid.
    pub fn append_actions_class_loader_hash(&mut self, hash: Option<&HashCode>) -> &mut Self {
        if let Some(hash) = hash {
            self.hasher.put_bytes(hash.as_bytes());
        }
        self.actions_class_loader_hash = hash.cloned();
        self.observer
            .fact_appended(&CacheKeyFact::ActionsClassLoaderHash(hash));
        self
    }

    /// Absorb an input property name followed by its hash.
    ///
    /// Appending the same name twice keeps the last hash in the snapshot but
    /// absorbs both contributions.
    ///
    /// An empty name is rejected before anything is absorbed.
    pub fn append_input_property_hash(&mut self, name: &str, hash: &HashCode) -> Result<&mut Self> {
        if name.is_empty() {
            return Err(Error::invalid_name(name));
        }
        if self.input_ordering == InputOrdering::CallOrder {
            self.hasher.put_string(name);
            self.hasher.put_bytes(hash.as_bytes());
        }
        self.input_hashes.insert(name.to_string(), hash.clone());
        self.observer
            .fact_appended(&CacheKeyFact::InputPropertyHash { name, hash });
        Ok(self)
    }

    /// Absorb a declared output property name
    pub fn append_output_property_name(&mut self, name: &str) -> &mut Self {
        self.hasher.put_string(name);
        self.output_property_names.insert(name.to_string());
        self.observer
            .fact_appended(&CacheKeyFact::OutputPropertyName(name));
        self
    }

    /// Absorb the task implementation class name
    pub fn append_task_class_name(&mut self, class_name: &str) -> &mut Self {
        self.hasher.put_string(class_name);
        self.task_class_name = Some(class_name.to_string());
        self.observer
            .fact_appended(&CacheKeyFact::TaskClass(class_name));
        self
    }

    /// Finish the key.
    ///
    /// Returns [`TaskCacheKey::Invalid`] without finalizing the hasher when
    /// either classloader hash is absent.
    #[must_use]
    pub fn build(self) -> TaskCacheKey {
        let Self {
            mut hasher,
            input_ordering,
            class_loader_hash,
            actions_class_loader_hash,
            input_hashes,
            output_property_names,
            task_class_name,
            ..
        } = self;

        let inputs = CacheKeyInputs {
            class_loader_hash,
            actions_class_loader_hash,
            input_hashes,
            output_property_names,
            task_class_name,
        };

        if let Some(missing) = inputs.missing_identity() {
            tracing::debug!(
                target: "buildkey::cache_key",
                reason = %missing,
                "Build cache key is invalid"
            );
            return TaskCacheKey::Invalid { inputs };
        }

        if input_ordering == InputOrdering::SortedByName {
            for (name, hash) in &inputs.input_hashes {
                hasher.put_string(name);
                hasher.put_bytes(hash.as_bytes());
            }
        }

        let hash_code = hasher.hash();
        tracing::debug!(
            target: "buildkey::cache_key",
            key = %hash_code,
            inputs = inputs.input_hashes.len(),
            outputs = inputs.output_property_names.len(),
            "Built cache key"
        );
        TaskCacheKey::Valid { hash_code, inputs }
    }
}

impl<H> fmt::Debug for TaskCacheKeyBuilder<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskCacheKeyBuilder")
            .field("input_ordering", &self.input_ordering)
            .field("class_loader_hash", &self.class_loader_hash)
            .field("actions_class_loader_hash", &self.actions_class_loader_hash)
            .field("input_hashes", &self.input_hashes)
            .field("output_property_names", &self.output_property_names)
            .field("task_class_name", &self.task_class_name)
            .finish_non_exhaustive()
    }
}
