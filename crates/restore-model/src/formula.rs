//! Formula types for goals, preconditions and effect conditions
//!
//! Formulas are built over fluent atoms. An atom is ground when every
//! argument names an object, and lifted when arguments name action
//! parameters; the formula AST does not distinguish the two.

use serde::{Deserialize, Serialize};

use crate::state::State;
use crate::value::Value;

/// A fluent applied to an argument tuple, e.g. `on(A, B)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Atom {
    pub fluent: String,
    pub args: Vec<String>,
}

impl Atom {
    pub fn new<I, S>(fluent: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fluent: fluent.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// A zero-arity atom.
    pub fn nullary(fluent: impl Into<String>) -> Self {
        Self {
            fluent: fluent.into(),
            args: Vec::new(),
        }
    }

    pub fn arity(&self) -> usize {
        self.args.len()
    }

    /// The same argument tuple under a different fluent name.
    pub fn renamed(&self, fluent: impl Into<String>) -> Self {
        Self {
            fluent: fluent.into(),
            args: self.args.clone(),
        }
    }
}

impl std::fmt::Display for Atom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.args.is_empty() {
            write!(f, "{}", self.fluent)
        } else {
            write!(f, "{}({})", self.fluent, self.args.join(", "))
        }
    }
}

/// An operand of an equality test.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Term {
    /// The current value of a fluent instance
    Fluent(Atom),

    /// An object or action-parameter name
    Symbol(String),

    /// A literal value
    Const(Value),
}

impl Term {
    pub fn fluent(atom: Atom) -> Self {
        Self::Fluent(atom)
    }

    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Symbol(name.into())
    }

    pub fn constant(value: impl Into<Value>) -> Self {
        Self::Const(value.into())
    }

    fn value(&self, state: &State) -> Option<Value> {
        match self {
            Self::Fluent(atom) => state.get(atom),
            Self::Const(v) => Some(*v),
            Self::Symbol(_) => None,
        }
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fluent(atom) => write!(f, "{}", atom),
            Self::Symbol(name) => write!(f, "{}", name),
            Self::Const(v) => write!(f, "{}", v),
        }
    }
}

/// Logical formula over fluent atoms
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Formula {
    /// Logical true (⊤)
    Top,

    /// Logical false (⊥)
    Bottom,

    /// Boolean fluent instance
    Atom(Atom),

    /// Negation (¬φ)
    Not(Box<Formula>),

    /// Conjunction (φ ∧ ψ)
    And(Box<Formula>, Box<Formula>),

    /// Disjunction (φ ∨ ψ)
    Or(Box<Formula>, Box<Formula>),

    /// Material implication (φ → ψ)
    Implies(Box<Formula>, Box<Formula>),

    /// Biconditional (φ ↔ ψ)
    Iff(Box<Formula>, Box<Formula>),

    /// Equality of two terms (s = t)
    Equals(Term, Term),
}

impl Formula {
    pub fn top() -> Self {
        Self::Top
    }

    pub fn bottom() -> Self {
        Self::Bottom
    }

    pub fn atom(atom: Atom) -> Self {
        Self::Atom(atom)
    }

    pub fn not(f: Formula) -> Self {
        Self::Not(Box::new(f))
    }

    pub fn and(left: Formula, right: Formula) -> Self {
        Self::And(Box::new(left), Box::new(right))
    }

    pub fn or(left: Formula, right: Formula) -> Self {
        Self::Or(Box::new(left), Box::new(right))
    }

    pub fn implies(antecedent: Formula, consequent: Formula) -> Self {
        Self::Implies(Box::new(antecedent), Box::new(consequent))
    }

    pub fn iff(left: Formula, right: Formula) -> Self {
        Self::Iff(Box::new(left), Box::new(right))
    }

    pub fn equals(left: Term, right: Term) -> Self {
        Self::Equals(left, right)
    }

    /// Right-nested conjunction of `parts`; `⊤` when empty.
    pub fn all<I>(parts: I) -> Self
    where
        I: IntoIterator<Item = Formula>,
        I::IntoIter: DoubleEndedIterator,
    {
        let mut rev = parts.into_iter().rev();
        let Some(mut result) = rev.next() else {
            return Self::Top;
        };
        for c in rev {
            result = Self::and(c, result);
        }
        result
    }

    /// Evaluate against a state.
    ///
    /// Returns `None` when the formula reads a fluent instance the state
    /// leaves undefined, or compares incomparable terms.
    pub fn evaluate(&self, state: &State) -> Option<bool> {
        match self {
            Self::Top => Some(true),
            Self::Bottom => Some(false),
            Self::Atom(atom) => state.get(atom)?.as_bool(),
            Self::Not(f) => f.evaluate(state).map(|b| !b),
            Self::And(l, r) => Some(l.evaluate(state)? && r.evaluate(state)?),
            Self::Or(l, r) => Some(l.evaluate(state)? || r.evaluate(state)?),
            Self::Implies(l, r) => Some(!l.evaluate(state)? || r.evaluate(state)?),
            Self::Iff(l, r) => Some(l.evaluate(state)? == r.evaluate(state)?),
            Self::Equals(Term::Symbol(a), Term::Symbol(b)) => Some(a == b),
            Self::Equals(l, r) => Some(l.value(state)? == r.value(state)?),
        }
    }

    /// Every fluent atom the formula reads, in left-to-right order.
    pub fn atoms(&self) -> Vec<&Atom> {
        let mut out = Vec::new();
        self.collect_atoms(&mut out);
        out
    }

    fn collect_atoms<'a>(&'a self, out: &mut Vec<&'a Atom>) {
        match self {
            Self::Top | Self::Bottom => {}
            Self::Atom(atom) => out.push(atom),
            Self::Not(f) => f.collect_atoms(out),
            Self::And(l, r) | Self::Or(l, r) | Self::Implies(l, r) | Self::Iff(l, r) => {
                l.collect_atoms(out);
                r.collect_atoms(out);
            }
            Self::Equals(l, r) => {
                for t in [l, r] {
                    if let Term::Fluent(atom) = t {
                        out.push(atom);
                    }
                }
            }
        }
    }

    /// Whether the formula reads `atom` anywhere.
    pub fn mentions(&self, atom: &Atom) -> bool {
        self.atoms().into_iter().any(|a| a == atom)
    }
}

impl From<Atom> for Formula {
    fn from(atom: Atom) -> Self {
        Self::Atom(atom)
    }
}

/// Pretty-print a formula in mathematical notation
impl std::fmt::Display for Formula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Top => write!(f, "⊤"),
            Self::Bottom => write!(f, "⊥"),
            Self::Atom(atom) => write!(f, "{}", atom),
            Self::Not(inner) => write!(f, "¬{}", inner),
            Self::And(l, r) => write!(f, "({} ∧ {})", l, r),
            Self::Or(l, r) => write!(f, "({} ∨ {})", l, r),
            Self::Implies(l, r) => write!(f, "({} → {})", l, r),
            Self::Iff(l, r) => write!(f, "({} ↔ {})", l, r),
            Self::Equals(l, r) => write!(f, "({} = {})", l, r),
        }
    }
}
