//! Goal synthesizer
//!
//! Turns snapshotted instances into equivalence goals and merges them with
//! hand-picked restore conditions and domain success conditions.

use restore_model::{Formula, Term, ValueDomain};

use crate::grounding::GroundInstance;

/// Goal requiring `instance` to end with its snapshotted value.
///
/// Boolean fluents get a biconditional against the shadow instance, so both
/// "was true, stays true" and "was false, stays false" are enforced. Integer
/// fluents get an equality.
pub fn restoration_goal(instance: &GroundInstance, shadow: &str) -> Formula {
    let shadow_atom = instance.atom.renamed(shadow);
    match instance.value.domain() {
        ValueDomain::Bool => Formula::iff(
            Formula::atom(instance.atom.clone()),
            Formula::atom(shadow_atom),
        ),
        ValueDomain::Int => Formula::equals(
            Term::fluent(instance.atom.clone()),
            Term::fluent(shadow_atom),
        ),
    }
}

/// Goals produced by one compilation, split by origin.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GoalSet {
    pub restoration: Vec<Formula>,
    pub success: Vec<Formula>,
}

impl GoalSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one equivalence per instance, in the given order.
    pub fn restore_instances<'a, I>(&mut self, instances: I, shadow: &str)
    where
        I: IntoIterator<Item = &'a GroundInstance>,
    {
        self.restoration
            .extend(instances.into_iter().map(|i| restoration_goal(i, shadow)));
    }

    /// Append hand-picked restoration goals verbatim.
    pub fn restore_conditions<'a, I>(&mut self, conditions: I)
    where
        I: IntoIterator<Item = &'a Formula>,
    {
        self.restoration.extend(conditions.into_iter().cloned());
    }

    /// Append domain success conditions verbatim.
    pub fn succeed_when<'a, I>(&mut self, conditions: I)
    where
        I: IntoIterator<Item = &'a Formula>,
    {
        self.success.extend(conditions.into_iter().cloned());
    }

    pub fn len(&self) -> usize {
        self.restoration.len() + self.success.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Restoration goals first, then success goals, each in insertion
    /// order. Nothing is reordered or deduplicated.
    pub fn iter(&self) -> impl Iterator<Item = &Formula> {
        self.restoration.iter().chain(self.success.iter())
    }
}
