//! Compiler options.

use serde::{Deserialize, Serialize};

/// Where restoration goals come from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestorationStrategy {
    /// Ground and snapshot every tracked fluent
    #[default]
    Auto,

    /// Only the domain's hand-picked restore conditions
    Manual,

    /// Snapshot equivalences, then the hand-picked conditions
    Both,
}

impl RestorationStrategy {
    pub fn snapshots(self) -> bool {
        matches!(self, Self::Auto | Self::Both)
    }

    pub fn uses_manual(self) -> bool {
        matches!(self, Self::Manual | Self::Both)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileOptions {
    /// Prepended to a tracked fluent's name to form its shadow's name
    #[serde(default = "default_shadow_prefix")]
    pub shadow_prefix: String,

    /// Refuse to ground more than this many candidate instances in total
    #[serde(default)]
    pub max_instances: Option<u64>,

    #[serde(default)]
    pub restoration: RestorationStrategy,
}

fn default_shadow_prefix() -> String {
    "initial_".to_string()
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            shadow_prefix: default_shadow_prefix(),
            max_instances: None,
            restoration: RestorationStrategy::default(),
        }
    }
}

impl CompileOptions {
    pub fn with_shadow_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.shadow_prefix = prefix.into();
        self
    }

    pub fn with_max_instances(mut self, limit: u64) -> Self {
        self.max_instances = Some(limit);
        self
    }

    pub fn with_restoration(mut self, strategy: RestorationStrategy) -> Self {
        self.restoration = strategy;
        self
    }
}
