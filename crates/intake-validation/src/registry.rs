//! Validator registry
//!
//! Provides [`ValidatorRegistry`], the table from step id to validator, built
//! once per category from the step catalog.

use indexmap::IndexMap;
use intake_form::FormState;
use intake_schema::{step_ids, Category, StepId};
use tracing::debug;

use crate::error_map::ErrorMap;
use crate::rules::{evaluate_all, Rule};
use crate::steps::rules_for;

/// Validates the fields owned by one step
///
/// Implementations must be pure: the same form always yields the same map.
pub trait StepValidator: Send + Sync + std::fmt::Debug {
    /// Step this validator belongs to
    fn step(&self) -> StepId;

    /// Validate the step's fields
    fn validate(&self, form: &FormState) -> ErrorMap;

    /// Rules the validator evaluates (used for dependent-field tracking)
    fn rules(&self) -> &[Rule];
}

/// Validator backed by a declarative rule list
#[derive(Debug, Clone)]
pub struct RuleSetValidator {
    step: StepId,
    rules: Vec<Rule>,
}

impl RuleSetValidator {
    /// Create from explicit rules
    #[must_use]
    pub fn new(step: StepId, rules: Vec<Rule>) -> Self {
        Self { step, rules }
    }

    /// Registered rules of a step for a category
    #[must_use]
    pub fn for_step(step: StepId, category: Category) -> Self {
        Self::new(step, rules_for(step, category))
    }
}

impl StepValidator for RuleSetValidator {
    fn step(&self) -> StepId {
        self.step
    }

    fn validate(&self, form: &FormState) -> ErrorMap {
        evaluate_all(&self.rules, form)
    }

    fn rules(&self) -> &[Rule] {
        &self.rules
    }
}

/// Step id to validator, for one category
#[derive(Debug)]
pub struct ValidatorRegistry {
    category: Category,
    validators: IndexMap<StepId, Box<dyn StepValidator>>,
}

impl ValidatorRegistry {
    /// Build the registry for every step of a category, in catalog order
    #[must_use]
    pub fn for_category(category: Category) -> Self {
        let validators = step_ids(category)
            .into_iter()
            .map(|step| {
                let validator: Box<dyn StepValidator> = Box::new(RuleSetValidator::for_step(step, category));
                (step, validator)
            })
            .collect();
        Self { category, validators }
    }

    /// Category the registry was built for
    #[inline]
    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }

    /// Replace (or add) the validator for its step
    pub fn register(&mut self, validator: Box<dyn StepValidator>) {
        self.validators.insert(validator.step(), validator);
    }

    /// Validator for a step
    #[must_use]
    pub fn get(&self, step: StepId) -> Option<&dyn StepValidator> {
        self.validators.get(&step).map(|v| &**v)
    }

    /// Validate a step; steps outside the category produce no errors
    #[must_use]
    pub fn validate(&self, step: StepId, form: &FormState) -> ErrorMap {
        let errors = self
            .validators
            .get(&step)
            .map(|v| v.validate(form))
            .unwrap_or_default();
        debug!(category = %self.category, step = %step, errors = errors.len(), "step validated");
        errors
    }

    /// Every rule of every step, in catalog order
    pub fn rules(&self) -> impl Iterator<Item = (StepId, &Rule)> {
        self.validators
            .iter()
            .flat_map(|(step, v)| v.rules().iter().map(move |rule| (*step, rule)))
    }

    /// Iterate over `(step, validator)` in catalog order
    pub fn iter(&self) -> impl Iterator<Item = (StepId, &dyn StepValidator)> {
        self.validators.iter().map(|(step, v)| (*step, &**v))
    }

    /// Number of registered steps
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    /// Check if no steps are registered
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

/// Validate one step of a category without building a registry
#[must_use]
pub fn validate(step: StepId, form: &FormState, category: Category) -> ErrorMap {
    evaluate_all(&rules_for(step, category), form)
}
