//! Solver seam
//!
//! Compiled models are handed to a [`Solver`]. Failing to find a plan is an
//! outcome, not an error; [`SolverError`] is reserved for goals a solver
//! cannot evaluate at all.

use restore_model::{Formula, State};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::compile::CompiledModel;

/// Result of a solve attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveOutcome {
    /// Ground action names, in execution order
    Plan(Vec<String>),

    /// The solver finished without finding a plan
    NoPlan,
}

impl SolveOutcome {
    pub fn plan(&self) -> Option<&[String]> {
        match self {
            Self::Plan(steps) => Some(steps),
            Self::NoPlan => None,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SolverError {
    #[error("Goal reads an undefined fluent instance: {0}")]
    UndefinedGoal(String),
}

pub trait Solver {
    fn name(&self) -> &str;

    fn solve(&self, model: &CompiledModel) -> Result<SolveOutcome, SolverError>;
}

/// Accepts the empty plan when the initial state already satisfies every
/// goal. Performs no search.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyPlanCheck;

impl EmptyPlanCheck {
    /// Check `goals` against `state`.
    pub fn check(goals: &[Formula], state: &State) -> Result<SolveOutcome, SolverError> {
        for goal in goals {
            match goal.evaluate(state) {
                Some(true) => continue,
                Some(false) => return Ok(SolveOutcome::NoPlan),
                None => return Err(SolverError::UndefinedGoal(goal.to_string())),
            }
        }
        Ok(SolveOutcome::Plan(Vec::new()))
    }
}

impl Solver for EmptyPlanCheck {
    fn name(&self) -> &str {
        "empty-plan-check"
    }

    fn solve(&self, model: &CompiledModel) -> Result<SolveOutcome, SolverError> {
        Self::check(model.goals(), &model.initial_state())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use restore_model::{Atom, Value};

    #[test]
    fn test_check_outcomes() {
        let mut state = State::default();
        state.set(Atom::nullary("p"), Value::Bool(true));
        state.set(Atom::nullary("q"), Value::Bool(false));

        let p = Formula::atom(Atom::nullary("p"));
        let q = Formula::atom(Atom::nullary("q"));
        let r = Formula::atom(Atom::nullary("r"));

        assert_eq!(
            EmptyPlanCheck::check(&[p.clone()], &state),
            Ok(SolveOutcome::Plan(vec![]))
        );
        assert_eq!(
            EmptyPlanCheck::check(&[p.clone(), q], &state),
            Ok(SolveOutcome::NoPlan)
        );
        assert_eq!(
            EmptyPlanCheck::check(&[p, r], &state),
            Err(SolverError::UndefinedGoal("r".to_string()))
        );
    }
}
