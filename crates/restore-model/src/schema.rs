//! Fluent and action schemas.

use serde::{Deserialize, Serialize};

use crate::formula::{Atom, Formula};
use crate::value::{Value, ValueDomain};

/// A named, typed parameter slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }
}

/// A state-variable schema: a name, an ordered typed signature and a
/// value domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FluentSchema {
    pub name: String,
    pub params: Vec<Parameter>,
    pub domain: ValueDomain,
    /// Value of every instance not explicitly assigned
    #[serde(default)]
    pub default: Option<Value>,
}

impl FluentSchema {
    pub fn new(name: impl Into<String>, domain: ValueDomain, params: Vec<Parameter>) -> Self {
        Self {
            name: name.into(),
            params,
            domain,
            default: None,
        }
    }

    /// A boolean fluent over `(parameter name, type)` pairs.
    pub fn boolean(name: impl Into<String>, params: &[(&str, &str)]) -> Self {
        Self::new(
            name,
            ValueDomain::Bool,
            params.iter().map(|(n, t)| Parameter::new(*n, *t)).collect(),
        )
    }

    /// An integer fluent over `(parameter name, type)` pairs.
    pub fn int(name: impl Into<String>, params: &[(&str, &str)]) -> Self {
        Self::new(
            name,
            ValueDomain::Int,
            params.iter().map(|(n, t)| Parameter::new(*n, *t)).collect(),
        )
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Parameter types, in order.
    pub fn signature(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|p| p.ty.as_str())
    }

    /// Whether `other` has the same parameter types and value domain.
    pub fn same_signature(&self, other: &FluentSchema) -> bool {
        self.domain == other.domain && self.signature().eq(other.signature())
    }

    /// Apply the schema to an argument tuple.
    pub fn atom<I, S>(&self, args: I) -> Atom
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Atom::new(self.name.clone(), args)
    }

    /// Boolean formula reading this schema at `args`.
    pub fn holds<I, S>(&self, args: I) -> Formula
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Formula::atom(self.atom(args))
    }
}

/// An assignment performed by an action, optionally guarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Effect {
    pub atom: Atom,
    pub value: Value,
    #[serde(default)]
    pub condition: Option<Formula>,
}

impl Effect {
    pub fn set(atom: Atom, value: impl Into<Value>) -> Self {
        Self {
            atom,
            value: value.into(),
            condition: None,
        }
    }

    pub fn when(mut self, condition: Formula) -> Self {
        self.condition = Some(condition);
        self
    }
}

/// A lifted action schema.
///
/// Action schemas are authoring data handed through to solvers; the
/// restoration compiler never reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSchema {
    pub name: String,
    pub params: Vec<Parameter>,
    pub preconditions: Vec<Formula>,
    pub effects: Vec<Effect>,
    pub cost: u32,
}

impl ActionSchema {
    pub fn new(name: impl Into<String>, params: &[(&str, &str)]) -> Self {
        Self {
            name: name.into(),
            params: params.iter().map(|(n, t)| Parameter::new(*n, *t)).collect(),
            preconditions: Vec::new(),
            effects: Vec::new(),
            cost: 1,
        }
    }

    pub fn with_precondition(mut self, formula: Formula) -> Self {
        self.preconditions.push(formula);
        self
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_cost(mut self, cost: u32) -> Self {
        self.cost = cost;
        self
    }
}
