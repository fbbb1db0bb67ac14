//! Compile receipts

use std::time::Duration;

use chrono::{DateTime, Utc};
use restore_model::Formula;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::compile::{CompileSummary, SchemaSummary};
use crate::{CompileError, Result};

/// Deterministic hash of an ordered goal list.
pub fn goal_set_hash(goals: &[Formula]) -> Result<String> {
    let json =
        serde_json::to_string(goals).map_err(|e| CompileError::Receipt(e.to_string()))?;
    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    Ok(hex::encode(hasher.finalize()))
}

/// Record of one compilation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompileReceipt {
    /// Domain the model was authored by
    pub domain: String,

    /// Hash of the goals this compilation added, in order
    pub goal_hash: String,

    /// Per-fluent grounding and shadow counts
    pub schemas: Vec<SchemaSummary>,

    pub restoration_goals: usize,

    pub success_goals: usize,

    /// Generation timestamp
    pub generated_at: DateTime<Utc>,

    /// Compile time in milliseconds
    pub compile_time_ms: u64,
}

impl CompileReceipt {
    pub fn new(
        domain: impl Into<String>,
        summary: &CompileSummary,
        goals: &[Formula],
    ) -> Result<Self> {
        Ok(Self {
            domain: domain.into(),
            goal_hash: goal_set_hash(goals)?,
            schemas: summary.schemas.clone(),
            restoration_goals: summary.restoration_goals,
            success_goals: summary.success_goals,
            generated_at: Utc::now(),
            compile_time_ms: 0,
        })
    }

    pub fn with_compile_time(mut self, elapsed: Duration) -> Self {
        self.compile_time_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Total goals added.
    pub fn goal_count(&self) -> usize {
        self.restoration_goals + self.success_goals
    }
}
