//! Configuration struct definitions.

use crate::fmt::{DATE_PATTERN, StatusLayout};
use serde::Deserialize;
use std::collections::HashMap;

/// Tuning for reusable message holders and the per-thread pool.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Render buffers that grew past this many bytes are shrunk back when a holder is reused.
    pub max_reusable_message_size: usize,
    /// Capacity reserved the first time a holder renders.
    pub initial_buffer_size: usize,
    /// When false every acquire allocates a fresh holder and nothing is cached per thread.
    pub thread_local_pooling: bool,
}

impl EngineConfig {
    pub const DEFAULT_MAX_REUSABLE_MESSAGE_SIZE: usize = 518;
    pub const DEFAULT_INITIAL_BUFFER_SIZE: usize = 512;

    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_reusable_message_size: Self::DEFAULT_MAX_REUSABLE_MESSAGE_SIZE,
            initial_buffer_size: Self::DEFAULT_INITIAL_BUFFER_SIZE,
            thread_local_pooling: true,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// The crate's own status output.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StatusConfig {
    /// Minimum level (`trace`, `debug`, `info`, `warn`, `error`, `off`).
    pub level: String,
    /// Line layout with `{timestamp}`, `{level}`, `{scope}` and `{msg}` fields.
    pub structure: String,
    /// strftime pattern for `{timestamp}`.
    pub timestamp_format: String,
    /// Per-scope level overrides, e.g. `POOL = "debug"`.
    pub scopes: HashMap<String, String>,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            structure: StatusLayout::DEFAULT.to_string(),
            timestamp_format: DATE_PATTERN.to_string(),
            scopes: HashMap::new(),
        }
    }
}
