//! Concrete world states.

use std::collections::BTreeMap;

use crate::formula::Atom;
use crate::model::Model;
use crate::value::Value;

/// An assignment of values to ground fluent instances.
///
/// Instances without an explicit value fall back to their fluent's default,
/// if it has one; otherwise they are undefined.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct State {
    values: BTreeMap<Atom, Value>,
    defaults: BTreeMap<String, Value>,
}

impl State {
    /// The model's initial state.
    pub fn initial(model: &Model) -> Self {
        Self {
            values: model
                .initial_values()
                .map(|(atom, value)| (atom.clone(), *value))
                .collect(),
            defaults: model
                .fluents()
                .iter()
                .filter_map(|f| f.default.map(|d| (f.name.clone(), d)))
                .collect(),
        }
    }

    pub fn get(&self, atom: &Atom) -> Option<Value> {
        self.values
            .get(atom)
            .or_else(|| self.defaults.get(&atom.fluent))
            .copied()
    }

    pub fn set(&mut self, atom: Atom, value: Value) {
        self.values.insert(atom, value);
    }

    /// Explicitly assigned instances, in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&Atom, &Value)> {
        self.values.iter()
    }
}
