//! Snapshot compiler
//!
//! Plans one shadow fluent per distinct tracked fluent and records each
//! defined initial value under the shadow instance with the same argument
//! tuple. Planning only reads the model; [`SnapshotPlan::commit`] applies
//! the plan once every check has passed.

use std::collections::BTreeSet;

use restore_model::{Atom, FluentSchema, Model, Value};

use crate::grounding::GroundInstance;
use crate::{CompileError, Result};

/// Shadow fluent name for `original` under `prefix`.
pub fn shadow_name(prefix: &str, original: &str) -> String {
    format!("{}{}", prefix, original)
}

/// A shadow fluent mirroring a tracked fluent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShadowSchema {
    pub original: String,
    pub schema: FluentSchema,
    /// Already registered by an earlier compilation
    pub reused: bool,
}

/// Shadow fluents and snapshot values, ready to be applied to a model.
#[derive(Debug, Clone, Default)]
pub struct SnapshotPlan {
    shadows: Vec<ShadowSchema>,
    values: Vec<(Atom, Value)>,
}

impl SnapshotPlan {
    /// Plan shadows for `grounded`, a list of tracked fluents with their
    /// defined instances. A fluent listed twice is shadowed once.
    pub fn prepare(
        model: &Model,
        grounded: &[(FluentSchema, Vec<GroundInstance>)],
        prefix: &str,
    ) -> Result<Self> {
        let mut plan = Self::default();
        let mut planned: BTreeSet<String> = BTreeSet::new();

        for (schema, instances) in grounded {
            if plan.shadow_for(&schema.name).is_some() {
                continue;
            }

            let shadow = match model.shadow_of(&schema.name) {
                Some(existing) => {
                    let existing = model
                        .fluent(existing)
                        .ok_or_else(|| CompileError::UnregisteredSchema(existing.to_string()))?;
                    ShadowSchema {
                        original: schema.name.clone(),
                        schema: existing.clone(),
                        reused: true,
                    }
                }
                None => {
                    let name = shadow_name(prefix, &schema.name);
                    if model.has_fluent(&name) || planned.contains(&name) {
                        return Err(CompileError::ShadowNameCollision {
                            original: schema.name.clone(),
                            shadow: name,
                        });
                    }
                    ShadowSchema {
                        original: schema.name.clone(),
                        schema: FluentSchema::new(
                            name,
                            schema.domain,
                            schema.params.clone(),
                        ),
                        reused: false,
                    }
                }
            };

            planned.insert(shadow.schema.name.clone());
            plan.values.extend(
                instances
                    .iter()
                    .map(|i| (i.atom.renamed(shadow.schema.name.clone()), i.value)),
            );
            plan.shadows.push(shadow);
        }

        Ok(plan)
    }

    /// Shadow fluent name planned for `original`.
    pub fn shadow_for(&self, original: &str) -> Option<&str> {
        self.shadows
            .iter()
            .find(|s| s.original == original)
            .map(|s| s.schema.name.as_str())
    }

    pub fn shadows(&self) -> &[ShadowSchema] {
        &self.shadows
    }

    /// Snapshot assignments in grounding order.
    pub fn values(&self) -> &[(Atom, Value)] {
        &self.values
    }

    /// Register new shadow fluents and write the snapshot values.
    pub fn commit(self, model: &mut Model) -> Result<()> {
        for shadow in self.shadows {
            if !shadow.reused {
                model.add_shadow_fluent(&shadow.original, shadow.schema)?;
            }
        }
        for (atom, value) in self.values {
            model.set_initial_value(atom, value)?;
        }
        Ok(())
    }
}
