//! Grounding engine
//!
//! Enumerates the concrete instances of a fluent schema: the cartesian
//! product of its parameters' object domains. Enumeration is lazy and runs
//! in odometer order: the rightmost parameter varies fastest, and each
//! parameter walks its type's domain in object-registration order. A
//! zero-arity schema has exactly one instance, the empty tuple.

use restore_model::{Atom, FluentSchema, Model, Value};

use crate::{CompileError, Result};

/// A ground instance together with its defined initial value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroundInstance {
    pub atom: Atom,
    pub value: Value,
}

/// Per-parameter object domains of `schema`.
///
/// Fails with [`CompileError::UnknownType`] on the first parameter whose type
/// the model does not know.
fn parameter_domains<'m>(model: &'m Model, schema: &FluentSchema) -> Result<Vec<Vec<&'m str>>> {
    schema
        .params
        .iter()
        .map(|p| {
            model.objects_of(&p.ty).ok_or_else(|| CompileError::UnknownType {
                fluent: schema.name.clone(),
                param: p.name.clone(),
                ty: p.ty.clone(),
            })
        })
        .collect()
}

/// Number of candidate instances of `schema`, computed without enumerating
/// them. Saturates at `u128::MAX`.
pub fn instance_count(model: &Model, schema: &FluentSchema) -> Result<u128> {
    Ok(parameter_domains(model, schema)?
        .iter()
        .fold(1u128, |acc, d| acc.saturating_mul(d.len() as u128)))
}

/// Lazy, restartable enumeration of a schema's candidate instances.
#[derive(Debug, Clone)]
pub struct Groundings<'m> {
    fluent: String,
    domains: Vec<Vec<&'m str>>,
    /// Index into each domain; `None` once exhausted
    cursor: Option<Vec<usize>>,
}

impl<'m> Groundings<'m> {
    fn new(fluent: String, domains: Vec<Vec<&'m str>>) -> Self {
        let mut g = Self {
            fluent,
            domains,
            cursor: None,
        };
        g.restart();
        g
    }

    /// Rewind to the first instance.
    pub fn restart(&mut self) {
        self.cursor = if self.domains.iter().any(|d| d.is_empty()) {
            None
        } else {
            Some(vec![0; self.domains.len()])
        };
    }

    /// Total instances over a full pass.
    pub fn total(&self) -> u128 {
        self.domains
            .iter()
            .fold(1u128, |acc, d| acc.saturating_mul(d.len() as u128))
    }

    fn advance(&mut self) {
        let Some(cursor) = self.cursor.as_mut() else {
            return;
        };
        for i in (0..cursor.len()).rev() {
            cursor[i] += 1;
            if cursor[i] < self.domains[i].len() {
                return;
            }
            cursor[i] = 0;
        }
        // Every position wrapped: the pass is complete.
        self.cursor = None;
    }
}

impl Iterator for Groundings<'_> {
    type Item = Atom;

    fn next(&mut self) -> Option<Atom> {
        let cursor = self.cursor.as_ref()?;
        let atom = Atom::new(
            self.fluent.clone(),
            cursor.iter().zip(&self.domains).map(|(&i, d)| d[i]),
        );
        self.advance();
        Some(atom)
    }
}

/// Enumerate every candidate instance of `schema` over the model's objects.
pub fn ground<'m>(model: &'m Model, schema: &FluentSchema) -> Result<Groundings<'m>> {
    let domains = parameter_domains(model, schema)?;
    Ok(Groundings::new(schema.name.clone(), domains))
}

/// Ground `schema` and keep the instances with a defined initial value.
///
/// Undefined instances are skipped, not reported.
pub fn ground_defined(model: &Model, schema: &FluentSchema) -> Result<Vec<GroundInstance>> {
    let groundings = ground(model, schema)?;
    let candidates = groundings.total();

    let defined: Vec<GroundInstance> = groundings
        .filter_map(|atom| {
            model
                .initial_value(&atom)
                .map(|value| GroundInstance { atom, value })
        })
        .collect();

    tracing::debug!(
        fluent = %schema.name,
        candidates = %candidates,
        defined = defined.len(),
        "Grounded fluent"
    );

    Ok(defined)
}
