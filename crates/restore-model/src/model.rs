//! The planning model: type and object registry, fluent schemas, initial
//! valuation, action schemas and goals.

use std::collections::BTreeMap;

use crate::formula::{Atom, Formula};
use crate::schema::{ActionSchema, FluentSchema};
use crate::value::Value;
use crate::{ModelError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
struct TypeDecl {
    parent: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ObjectDecl {
    name: String,
    ty: String,
}

/// A typed planning problem under construction.
#[derive(Debug, Clone, Default)]
pub struct Model {
    name: String,
    types: Vec<TypeDecl>,
    type_index: BTreeMap<String, usize>,
    objects: Vec<ObjectDecl>,
    object_index: BTreeMap<String, usize>,
    fluents: Vec<FluentSchema>,
    fluent_index: BTreeMap<String, usize>,
    /// Original fluent name -> shadow fluent name
    shadows: BTreeMap<String, String>,
    initial: BTreeMap<Atom, Value>,
    actions: Vec<ActionSchema>,
    goals: Vec<Formula>,
}

impl Model {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    // === Types and objects ===

    /// Register a type, optionally below an already registered parent.
    pub fn add_type(&mut self, name: impl Into<String>, parent: Option<&str>) -> Result<()> {
        let name = name.into();
        if self.type_index.contains_key(&name) {
            return Err(ModelError::DuplicateType(name));
        }
        if let Some(parent) = parent {
            if !self.has_type(parent) {
                return Err(ModelError::UnknownType(parent.to_string()));
            }
        }
        self.type_index.insert(name, self.types.len());
        self.types.push(TypeDecl {
            parent: parent.map(str::to_string),
        });
        Ok(())
    }

    pub fn has_type(&self, name: &str) -> bool {
        self.type_index.contains_key(name)
    }

    /// Whether `ty` is `ancestor` or one of its descendants.
    pub fn is_subtype(&self, ty: &str, ancestor: &str) -> bool {
        let mut current = Some(ty);
        while let Some(name) = current {
            if name == ancestor {
                return true;
            }
            current = self
                .type_index
                .get(name)
                .and_then(|&i| self.types[i].parent.as_deref());
        }
        false
    }

    pub fn add_object(&mut self, name: impl Into<String>, ty: &str) -> Result<()> {
        let name = name.into();
        if !self.has_type(ty) {
            return Err(ModelError::UnknownType(ty.to_string()));
        }
        if self.object_index.contains_key(&name) {
            return Err(ModelError::DuplicateObject(name));
        }
        self.object_index.insert(name.clone(), self.objects.len());
        self.objects.push(ObjectDecl {
            name,
            ty: ty.to_string(),
        });
        Ok(())
    }

    pub fn add_objects<I, S>(&mut self, names: I, ty: &str) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            self.add_object(name, ty)?;
        }
        Ok(())
    }

    pub fn object_type(&self, object: &str) -> Option<&str> {
        self.object_index
            .get(object)
            .map(|&i| self.objects[i].ty.as_str())
    }

    /// The object domain of `ty`: every object of `ty` or a subtype, in
    /// registration order. `None` if `ty` is not registered.
    pub fn objects_of(&self, ty: &str) -> Option<Vec<&str>> {
        if !self.has_type(ty) {
            return None;
        }
        Some(
            self.objects
                .iter()
                .filter(|o| self.is_subtype(&o.ty, ty))
                .map(|o| o.name.as_str())
                .collect(),
        )
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    // === Fluents ===

    pub fn add_fluent(&mut self, schema: FluentSchema) -> Result<()> {
        if self.fluent_index.contains_key(&schema.name) {
            return Err(ModelError::DuplicateFluent(schema.name));
        }
        for ty in schema.signature() {
            if !self.has_type(ty) {
                return Err(ModelError::UnknownType(ty.to_string()));
            }
        }
        if let Some(default) = schema.default {
            if default.domain() != schema.domain {
                return Err(ModelError::ValueDomainMismatch {
                    fluent: schema.name,
                    expected: schema.domain,
                    actual: default.domain(),
                });
            }
        }
        self.fluent_index
            .insert(schema.name.clone(), self.fluents.len());
        self.fluents.push(schema);
        Ok(())
    }

    pub fn fluent(&self, name: &str) -> Option<&FluentSchema> {
        self.fluent_index.get(name).map(|&i| &self.fluents[i])
    }

    pub fn has_fluent(&self, name: &str) -> bool {
        self.fluent_index.contains_key(name)
    }

    /// Registered fluents, in registration order.
    pub fn fluents(&self) -> &[FluentSchema] {
        &self.fluents
    }

    /// Register `shadow` as the snapshot fluent mirroring `original`.
    pub fn add_shadow_fluent(&mut self, original: &str, shadow: FluentSchema) -> Result<()> {
        if !self.has_fluent(original) {
            return Err(ModelError::UnregisteredFluent(original.to_string()));
        }
        let shadow_name = shadow.name.clone();
        self.add_fluent(shadow)?;
        self.shadows.insert(original.to_string(), shadow_name);
        Ok(())
    }

    /// Name of the shadow fluent mirroring `original`, if one exists.
    pub fn shadow_of(&self, original: &str) -> Option<&str> {
        self.shadows.get(original).map(String::as_str)
    }

    /// `(original, shadow)` fluent name pairs.
    pub fn shadows(&self) -> impl Iterator<Item = (&str, &str)> {
        self.shadows
            .iter()
            .map(|(o, s)| (o.as_str(), s.as_str()))
    }

    // === Initial valuation ===

    pub fn set_initial_value(&mut self, atom: Atom, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        self.check_atom(&atom)?;
        let schema = &self.fluents[self.fluent_index[&atom.fluent]];
        if value.domain() != schema.domain {
            return Err(ModelError::ValueDomainMismatch {
                fluent: schema.name.clone(),
                expected: schema.domain,
                actual: value.domain(),
            });
        }
        self.initial.insert(atom, value);
        Ok(())
    }

    /// Initial value of a ground instance: its explicit assignment, else the
    /// fluent's default, else `None` (undefined).
    pub fn initial_value(&self, atom: &Atom) -> Option<Value> {
        self.initial.get(atom).copied().or_else(|| {
            self.fluent(&atom.fluent)
                .and_then(|schema| schema.default)
        })
    }

    /// Explicit initial assignments, in key order.
    pub fn initial_values(&self) -> impl Iterator<Item = (&Atom, &Value)> {
        self.initial.iter()
    }

    /// Validate that `atom` is a well-typed ground instance.
    pub fn check_atom(&self, atom: &Atom) -> Result<()> {
        let schema = self
            .fluent(&atom.fluent)
            .ok_or_else(|| ModelError::UnregisteredFluent(atom.fluent.clone()))?;
        if schema.arity() != atom.arity() {
            return Err(ModelError::ArityMismatch {
                fluent: schema.name.clone(),
                expected: schema.arity(),
                actual: atom.arity(),
            });
        }
        for (arg, param) in atom.args.iter().zip(&schema.params) {
            let ty = self
                .object_type(arg)
                .ok_or_else(|| ModelError::UnknownObject(arg.clone()))?;
            if !self.is_subtype(ty, &param.ty) {
                return Err(ModelError::ObjectTypeMismatch {
                    object: arg.clone(),
                    expected: param.ty.clone(),
                    actual: ty.to_string(),
                });
            }
        }
        Ok(())
    }

    // === Actions and goals ===

    pub fn add_action(&mut self, action: ActionSchema) -> Result<()> {
        if self.actions.iter().any(|a| a.name == action.name) {
            return Err(ModelError::DuplicateAction(action.name));
        }
        for param in &action.params {
            if !self.has_type(&param.ty) {
                return Err(ModelError::UnknownType(param.ty.clone()));
            }
        }
        self.actions.push(action);
        Ok(())
    }

    pub fn actions(&self) -> &[ActionSchema] {
        &self.actions
    }

    pub fn add_goal(&mut self, goal: Formula) {
        self.goals.push(goal);
    }

    /// Goals in insertion order.
    pub fn goals(&self) -> &[Formula] {
        &self.goals
    }
}
