//! The domain-authoring contract.

use crate::formula::Formula;
use crate::model::Model;
use crate::schema::FluentSchema;
use crate::Result;

/// What a domain hands back after populating a model.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DomainSetup {
    /// Fluent schemas whose initial valuation must hold again at the end
    pub tracked: Vec<FluentSchema>,

    /// Hand-picked restoration goals, for domains that list them manually
    pub restore_conditions: Vec<Formula>,

    /// Domain success goals over the original fluents
    pub success_conditions: Vec<Formula>,
}

impl DomainSetup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn track(mut self, schema: &FluentSchema) -> Self {
        self.tracked.push(schema.clone());
        self
    }

    pub fn restore(mut self, condition: Formula) -> Self {
        self.restore_conditions.push(condition);
        self
    }

    pub fn succeed_when(mut self, condition: Formula) -> Self {
        self.success_conditions.push(condition);
        self
    }
}

/// A planning domain: registers types, objects, fluents, initial values and
/// actions on a fresh model.
pub trait Domain {
    fn name(&self) -> &str;

    fn author(&self, model: &mut Model) -> Result<DomainSetup>;
}

impl<F> Domain for (&str, F)
where
    F: Fn(&mut Model) -> Result<DomainSetup>,
{
    fn name(&self) -> &str {
        self.0
    }

    fn author(&self, model: &mut Model) -> Result<DomainSetup> {
        (self.1)(model)
    }
}
