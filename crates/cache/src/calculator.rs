//! Canonical-order cache key calculation for a task execution

use crate::builder::TaskCacheKeyBuilder;
use crate::config::CacheKeyConfig;
use crate::key::TaskCacheKey;
use crate::Result;
use buildkey_hashing::HashCode;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Everything about one task execution attempt that can affect its outputs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskExecutionState {
    /// Task implementation class name
    pub task_class_name: String,
    /// Identity of the code defining the task type, if it could be snapshotted
    #[serde(default)]
    pub class_loader_hash: Option<HashCode>,
    /// Identity of the code defining the task's actions, if it could be snapshotted
    #[serde(default)]
    pub actions_class_loader_hash: Option<HashCode>,
    /// Hash of every declared input property
    #[serde(default)]
    pub input_hashes: BTreeMap<String, HashCode>,
    /// Every declared output property
    #[serde(default)]
    pub output_property_names: BTreeSet<String>,
}

/// Build the cache key for `state`.
///
/// Facts are appended in a fixed order: task class, classloader hash, actions
/// classloader hash, input properties by name, output properties by name.
/// A non-cacheable task yields an invalid key, not an error.
pub fn calculate_cache_key(
    state: &TaskExecutionState,
    config: &CacheKeyConfig,
) -> Result<TaskCacheKey> {
    let mut builder = TaskCacheKeyBuilder::from_config(config);
    builder
        .append_task_class_name(&state.task_class_name)
        .append_class_loader_hash(state.class_loader_hash.as_ref())
        .append_actions_class_loader_hash(state.actions_class_loader_hash.as_ref());
    for (name, hash) in &state.input_hashes {
        builder.append_input_property_hash(name, hash)?;
    }
    for name in &state.output_property_names {
        builder.append_output_property_name(name);
    }

    let key = builder.build();
    if let Some(missing) = key.missing_identity() {
        tracing::info!(
            target: "buildkey::cache_key",
            task_class = %state.task_class_name,
            reason = %missing,
            "Task is not cacheable"
        );
    }
    Ok(key)
}
