//! Compile driver
//!
//! Runs grounding, snapshot planning and goal synthesis against a borrowed
//! model, then commits the result in one step. Any error leaves the model
//! exactly as it was.

use std::ops::Range;
use std::time::Instant;

use restore_model::{Domain, DomainSetup, FluentSchema, Formula, Model, State};
use serde::{Deserialize, Serialize};

use crate::goals::{restoration_goal, GoalSet};
use crate::grounding::{ground_defined, instance_count, GroundInstance};
use crate::options::CompileOptions;
use crate::receipt::CompileReceipt;
use crate::snapshot::SnapshotPlan;
use crate::{CompileError, Result};

/// Per-fluent outcome of a compilation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaSummary {
    pub fluent: String,
    pub shadow: String,
    /// Candidate instances before value lookup
    pub candidates: u128,
    /// Instances with a defined initial value
    pub defined: usize,
}

/// What one compilation added to the model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileSummary {
    pub schemas: Vec<SchemaSummary>,
    pub restoration_goals: usize,
    pub success_goals: usize,
}

/// The restoration compiler.
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    options: CompileOptions,
}

impl Compiler {
    pub fn new(options: CompileOptions) -> Self {
        Self { options }
    }

    /// Distinct tracked fluents, checked against the model.
    ///
    /// Parameter types are checked before registration, so a schema over an
    /// unknown type reports [`CompileError::UnknownType`].
    fn resolve_tracked<'m>(
        &self,
        model: &'m Model,
        setup: &DomainSetup,
    ) -> Result<Vec<&'m FluentSchema>> {
        let mut resolved: Vec<&FluentSchema> = Vec::new();
        for tracked in &setup.tracked {
            instance_count(model, tracked)?;
            let registered = model
                .fluent(&tracked.name)
                .filter(|r| r.same_signature(tracked))
                .ok_or_else(|| CompileError::UnregisteredSchema(tracked.name.clone()))?;
            if !resolved.iter().any(|r| r.name == registered.name) {
                resolved.push(registered);
            }
        }
        Ok(resolved)
    }

    /// Candidate instance count per distinct tracked fluent, without
    /// grounding anything.
    pub fn count(&self, model: &Model, setup: &DomainSetup) -> Result<Vec<(String, u128)>> {
        self.resolve_tracked(model, setup)?
            .into_iter()
            .map(|schema| Ok((schema.name.clone(), instance_count(model, schema)?)))
            .collect()
    }

    /// Compile `setup`'s restoration and success goals into `model`.
    ///
    /// Tracked fluents are validated under every strategy. When a tracked
    /// fluent already has a shadow from an earlier compilation, equivalences
    /// already in the model are not added again. Manual and success
    /// conditions are always appended as given.
    pub fn compile_model(&self, model: &mut Model, setup: &DomainSetup) -> Result<CompileSummary> {
        let strategy = self.options.restoration;
        let mut summary = CompileSummary::default();
        let mut goals = GoalSet::new();

        let tracked = self.resolve_tracked(model, setup)?;

        if strategy.snapshots() {
            let mut total: u128 = 0;
            for schema in &tracked {
                total = total.saturating_add(instance_count(model, schema)?);
            }
            if let Some(limit) = self.options.max_instances {
                if total > u128::from(limit) {
                    return Err(CompileError::TooManyInstances { total, limit });
                }
            }

            let mut grounded: Vec<(FluentSchema, Vec<GroundInstance>)> =
                Vec::with_capacity(tracked.len());
            for schema in tracked {
                let candidates = instance_count(model, schema)?;
                if candidates == 0 {
                    tracing::warn!(fluent = %schema.name, "Tracked fluent has no instances");
                }
                grounded.push((schema.clone(), ground_defined(model, schema)?));
                summary.schemas.push(SchemaSummary {
                    fluent: schema.name.clone(),
                    shadow: String::new(),
                    candidates,
                    defined: 0,
                });
            }

            let plan = SnapshotPlan::prepare(model, &grounded, &self.options.shadow_prefix)?;

            for ((schema, instances), entry) in grounded.iter().zip(summary.schemas.iter_mut()) {
                let shadow = plan
                    .shadows()
                    .iter()
                    .find(|s| s.original == schema.name)
                    .ok_or_else(|| CompileError::UnregisteredSchema(schema.name.clone()))?;
                let name = shadow.schema.name.as_str();
                if shadow.reused {
                    goals.restore_instances(
                        instances
                            .iter()
                            .filter(|i| !model.goals().contains(&restoration_goal(i, name))),
                        name,
                    );
                } else {
                    goals.restore_instances(instances, name);
                }
                entry.shadow = name.to_string();
                entry.defined = instances.len();
            }

            plan.commit(model)?;
        }

        if strategy.uses_manual() {
            goals.restore_conditions(&setup.restore_conditions);
        }
        goals.succeed_when(&setup.success_conditions);

        for goal in goals.restoration {
            model.add_goal(goal);
            summary.restoration_goals += 1;
        }
        for goal in goals.success {
            model.add_goal(goal);
            summary.success_goals += 1;
        }

        tracing::info!(
            model = %model.name(),
            fluents = summary.schemas.len(),
            restoration_goals = summary.restoration_goals,
            success_goals = summary.success_goals,
            "Compiled restoration goals"
        );

        Ok(summary)
    }
}

/// A model augmented with shadow fluents, snapshot values and the full
/// goal set.
#[derive(Debug, Clone)]
pub struct CompiledModel {
    domain: String,
    model: Model,
    summary: CompileSummary,
    restoration: Range<usize>,
    success: Range<usize>,
    receipt: CompileReceipt,
}

impl CompiledModel {
    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn summary(&self) -> &CompileSummary {
        &self.summary
    }

    pub fn receipt(&self) -> &CompileReceipt {
        &self.receipt
    }

    /// The complete goal set.
    pub fn goals(&self) -> &[Formula] {
        self.model.goals()
    }

    pub fn restoration_goals(&self) -> &[Formula] {
        &self.model.goals()[self.restoration.clone()]
    }

    pub fn success_goals(&self) -> &[Formula] {
        &self.model.goals()[self.success.clone()]
    }

    pub fn initial_state(&self) -> State {
        State::initial(&self.model)
    }
}

/// Build a fresh model from `domain` and compile it.
pub fn compile(domain: &dyn Domain, options: &CompileOptions) -> Result<CompiledModel> {
    let started = Instant::now();

    let mut model = Model::new(domain.name());
    let setup = domain.author(&mut model)?;
    tracing::debug!(
        domain = %domain.name(),
        objects = model.object_count(),
        fluents = model.fluents().len(),
        actions = model.actions().len(),
        "Authored domain"
    );

    let goals_before = model.goals().len();
    let summary = Compiler::new(options.clone()).compile_model(&mut model, &setup)?;

    let restoration_end = goals_before + summary.restoration_goals;
    let success_end = restoration_end + summary.success_goals;

    let elapsed = started.elapsed();
    let receipt = CompileReceipt::new(domain.name(), &summary, &model.goals()[goals_before..])?
        .with_compile_time(elapsed);

    Ok(CompiledModel {
        domain: domain.name().to_string(),
        model,
        summary,
        restoration: goals_before..restoration_end,
        success: restoration_end..success_end,
        receipt,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::RestorationStrategy;
    use restore_model::{Atom, ModelError};

    fn blocks(model: &mut Model) -> restore_model::Result<DomainSetup> {
        model.add_type("block", None)?;
        model.add_objects(["A", "B", "C"], "block")?;
        let on = FluentSchema::boolean("on", &[("x", "block"), ("y", "block")]);
        let hand_empty = FluentSchema::boolean("hand_empty", &[]).with_default(true);
        model.add_fluent(on.clone())?;
        model.add_fluent(hand_empty.clone())?;
        model.set_initial_value(on.atom(["A", "B"]), true)?;
        Ok(DomainSetup::new()
            .track(&on)
            .restore(on.holds(["A", "B"]))
            .succeed_when(hand_empty.holds(Vec::<String>::new())))
    }

    #[test]
    fn test_compile_orders_restoration_before_success() {
        let compiled = compile(&("blocks", blocks), &CompileOptions::default()).unwrap();

        let rendered: Vec<String> = compiled.goals().iter().map(|g| g.to_string()).collect();
        assert_eq!(
            rendered,
            vec!["(on(A, B) ↔ initial_on(A, B))", "hand_empty"]
        );
        assert_eq!(compiled.restoration_goals().len(), 1);
        assert_eq!(compiled.success_goals().len(), 1);
        assert_eq!(compiled.summary().schemas[0].candidates, 9);
        assert_eq!(compiled.summary().schemas[0].defined, 1);
    }

    #[test]
    fn test_manual_strategy_skips_snapshot() {
        let options = CompileOptions::default().with_restoration(RestorationStrategy::Manual);
        let compiled = compile(&("blocks", blocks), &options).unwrap();

        assert!(compiled.model().shadow_of("on").is_none());
        assert_eq!(
            compiled.restoration_goals(),
            &[Formula::atom(Atom::new("on", ["A", "B"]))]
        );
    }

    #[test]
    fn test_both_strategy_appends_manual_after_snapshot() {
        let options = CompileOptions::default().with_restoration(RestorationStrategy::Both);
        let compiled = compile(&("blocks", blocks), &options).unwrap();

        let rendered: Vec<String> = compiled
            .restoration_goals()
            .iter()
            .map(|g| g.to_string())
            .collect();
        assert_eq!(rendered, vec!["(on(A, B) ↔ initial_on(A, B))", "on(A, B)"]);
    }

    #[test]
    fn test_both_strategy_keeps_repeated_manual_conditions() {
        let twice = |model: &mut Model| -> restore_model::Result<DomainSetup> {
            let setup = blocks(model)?;
            let on = Atom::new("on", ["A", "B"]);
            Ok(setup.restore(Formula::atom(on)))
        };
        let options = CompileOptions::default().with_restoration(RestorationStrategy::Both);
        let compiled = compile(&("blocks", twice), &options).unwrap();

        let rendered: Vec<String> = compiled
            .restoration_goals()
            .iter()
            .map(|g| g.to_string())
            .collect();
        assert_eq!(
            rendered,
            vec!["(on(A, B) ↔ initial_on(A, B))", "on(A, B)", "on(A, B)"]
        );
        assert_eq!(compiled.summary().restoration_goals, 3);
    }

    #[test]
    fn test_authoring_error_propagates() {
        let broken = |model: &mut Model| -> restore_model::Result<DomainSetup> {
            model.add_object("A", "block")?;
            Ok(DomainSetup::new())
        };
        let err = compile(&("broken", broken), &CompileOptions::default()).unwrap_err();
        assert_eq!(
            err,
            CompileError::Model(ModelError::UnknownType("block".to_string()))
        );
    }

    #[test]
    fn test_limit_checked_before_mutation() {
        let mut model = Model::new("blocks");
        let setup = blocks(&mut model).unwrap();
        let compiler = Compiler::new(CompileOptions::default().with_max_instances(8));

        let err = compiler.compile_model(&mut model, &setup).unwrap_err();
        assert_eq!(err, CompileError::TooManyInstances { total: 9, limit: 8 });
        assert!(model.goals().is_empty());
        assert!(!model.has_fluent("initial_on"));
    }

    #[test]
    fn test_recompile_does_not_duplicate_restoration() {
        let mut model = Model::new("blocks");
        let setup = blocks(&mut model).unwrap();
        let compiler = Compiler::default();

        compiler.compile_model(&mut model, &setup).unwrap();
        let second = compiler.compile_model(&mut model, &setup).unwrap();

        assert_eq!(second.restoration_goals, 0);
        assert_eq!(model.shadows().count(), 1);
        let restoration = model
            .goals()
            .iter()
            .filter(|g| matches!(g, Formula::Iff(_, _)))
            .count();
        assert_eq!(restoration, 1);
    }
}
