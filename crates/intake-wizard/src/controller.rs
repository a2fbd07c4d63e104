//! Wizard controller
//!
//! Drives a [`WizardSession`] through its steps. Every operation takes the
//! session by `&mut`, checks it is still open, and replaces the session's form
//! and error map with new values computed by the form store and the error
//! state manager.

use indexmap::IndexMap;
use intake_form::{FieldValue, FormState, Section};
use intake_schema::paths::consent;
use intake_schema::{Category, FieldPath, FieldSchema, StepId};
use intake_validation::{
    deactivated, ErrorMap, ErrorStateManager, Rule, StepValidator, ValidatorRegistry,
};
use tracing::{debug, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::config::{DependentFieldPolicy, WizardConfig};
use crate::error::{Result, WizardError};
use crate::navigation::{Advance, Retreat, StepSummary};
use crate::session::{Representative, SessionStatus, WizardSession};
use crate::submission::{SignatureArtifact, SubmissionRecord};

/// Per-category lookup tables, built once
#[derive(Debug)]
struct Engine {
    schema: FieldSchema,
    registry: ValidatorRegistry,
    errors: ErrorStateManager,
}

impl Engine {
    fn for_category(category: Category) -> Self {
        Self {
            schema: FieldSchema::for_category(category),
            registry: ValidatorRegistry::for_category(category),
            errors: ErrorStateManager::for_category(category),
        }
    }
}

/// Navigation and editing over wizard sessions
pub struct WizardController {
    config: WizardConfig,
    clock: Box<dyn Clock>,
    engines: IndexMap<Category, Engine>,
}

impl std::fmt::Debug for WizardController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WizardController")
            .field("config", &self.config)
            .field("categories", &self.engines.len())
            .finish_non_exhaustive()
    }
}

impl Default for WizardController {
    fn default() -> Self {
        Self::new(WizardConfig::default())
    }
}

impl WizardController {
    /// Controller using the wall clock
    #[must_use]
    pub fn new(config: WizardConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }

    /// Controller with an injected clock
    #[must_use]
    pub fn with_clock(config: WizardConfig, clock: impl Clock + 'static) -> Self {
        let engines = Category::ALL
            .into_iter()
            .map(|category| (category, Engine::for_category(category)))
            .collect();
        Self {
            config,
            clock: Box::new(clock),
            engines,
        }
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &WizardConfig {
        &self.config
    }

    /// Replace one step's validator for a category
    pub fn register_validator(&mut self, category: Category, validator: Box<dyn StepValidator>) {
        if let Some(engine) = self.engines.get_mut(&category) {
            engine.registry.register(validator);
        }
    }

    /// Start a session for a category id
    ///
    /// # Errors
    /// Returns [`WizardError::Catalog`] for an unknown category id.
    pub fn start(&self, category_id: &str, representative: Option<Representative>) -> Result<WizardSession> {
        let category: Category = category_id.parse()?;
        let session = WizardSession::new(category, representative);
        info!(session = %session.id(), category = %category, steps = session.steps().len(), "session started");
        Ok(session)
    }

    /// Write one field
    ///
    /// The write is checked against the category's schema. Dependent fields
    /// whose guards the edit switched off are reset (per
    /// [`DependentFieldPolicy`]), and the edited field's error is dropped or
    /// refreshed per configuration.
    ///
    /// # Errors
    /// - [`WizardError::AlreadySubmitted`] on a submitted session
    /// - [`WizardError::Form`] for an undeclared path or mismatched value
    pub fn set_field(&self, session: &mut WizardSession, path: &FieldPath, value: FieldValue) -> Result<()> {
        Self::ensure_open(session)?;
        let engine = self.engine(session.category())?;

        let before = session.form.clone();
        let after = before.write(&engine.schema, path, value).map_err(|err| {
            warn!(session = %session.id(), path = %path, error = %err, "write rejected");
            err
        })?;

        let mut errors = session.errors.clone();
        let form = match self.config.dependent_field_policy {
            DependentFieldPolicy::ClearOnDeactivate => {
                let (form, reset) = Self::clear_dependents(engine, path, &before, after)?;
                for stale in &reset {
                    errors = ErrorStateManager::clear_field(&errors, stale);
                }
                form
            }
            DependentFieldPolicy::Retain => after,
        };

        if self.config.clear_error_on_edit {
            errors = ErrorStateManager::clear_field(&errors, path);
        }
        if self.config.validate_on_edit {
            let step = session.current_step();
            if engine.errors.ownership().owns(step, path) {
                let fresh = engine.registry.validate(step, &form);
                errors = match fresh.get(path) {
                    Some(error) => {
                        let mut refreshed = errors;
                        refreshed.insert(path.clone(), error.clone());
                        refreshed
                    }
                    None => ErrorStateManager::clear_field(&errors, path),
                };
            }
        }

        session.form = form;
        session.errors = errors;
        Ok(())
    }

    /// Write one field of a section by name
    ///
    /// # Errors
    /// As [`set_field`](Self::set_field), plus [`WizardError::Path`] for a
    /// malformed field name.
    pub fn set_section(
        &self,
        session: &mut WizardSession,
        section: Section,
        field: &str,
        value: impl Into<FieldValue>,
    ) -> Result<()> {
        let path = section.field(field)?;
        self.set_field(session, &path, value.into())
    }

    /// Attach the resolved signature
    ///
    /// # Errors
    /// As [`set_field`](Self::set_field).
    pub fn set_signature(&self, session: &mut WizardSession, signature: SignatureArtifact) -> Result<()> {
        self.set_field(session, &consent::DIGITAL_SIGNATURE, signature.data.into())?;
        self.set_field(
            session,
            &consent::SIGNATURE_TYPE,
            signature.signature_type.as_str().into(),
        )?;
        let file_name = signature.file_name.unwrap_or_default();
        self.set_field(session, &consent::SIGNATURE_FILE_NAME, file_name.into())
    }

    /// Record the consent flag
    ///
    /// # Errors
    /// As [`set_field`](Self::set_field).
    pub fn set_consent(&self, session: &mut WizardSession, given: bool) -> Result<()> {
        self.set_field(session, &consent::CONSENT_GIVEN, given.into())
    }

    /// Validate the current step and move forward if it passes
    ///
    /// # Errors
    /// - [`WizardError::AlreadySubmitted`] on a submitted session
    /// - [`WizardError::MissingConsent`] if the last step's validator was
    ///   replaced and let an unsigned form through
    pub fn advance(&self, session: &mut WizardSession) -> Result<Advance> {
        Self::ensure_open(session)?;
        let engine = self.engine(session.category())?;
        let step = session.current_step();

        let failures = engine.registry.validate(step, &session.form);
        if !failures.is_empty() {
            session.errors = ErrorStateManager::merge(&session.errors, &failures);
            info!(session = %session.id(), step = %step, errors = failures.len(), "advance blocked");
            return Ok(Advance::Blocked { step, errors: failures });
        }
        session.errors = engine.errors.clear_for_step(&session.errors, step);

        if session.is_last_step() {
            let record = SubmissionRecord::build(
                session.category(),
                &session.form,
                session.representative().cloned(),
                self.clock.now(),
            )?;
            session.status = SessionStatus::Submitted;
            info!(session = %session.id(), category = %session.category(), "session submitted");
            return Ok(Advance::Submitted(Box::new(record)));
        }

        let next = session.current_step_index() + 1;
        session.set_current_step_index(next);
        let to = session.current_step();
        info!(session = %session.id(), from = %step, to = %to, "advanced");
        Ok(Advance::Moved { from: step, to })
    }

    /// Move back one step without validating
    ///
    /// # Errors
    /// Returns [`WizardError::AlreadySubmitted`] on a submitted session.
    pub fn retreat(&self, session: &mut WizardSession) -> Result<Retreat> {
        Self::ensure_open(session)?;
        let index = session.current_step_index();
        if index == 0 {
            debug!(session = %session.id(), "retreat from first step");
            return Ok(Retreat::Exit);
        }
        let from = session.current_step();
        session.set_current_step_index(index - 1);
        let to = session.current_step();
        info!(session = %session.id(), from = %from, to = %to, "retreated");
        Ok(Retreat::Moved { from, to })
    }

    /// Jump back to an earlier step
    ///
    /// # Errors
    /// - [`WizardError::AlreadySubmitted`] on a submitted session
    /// - [`WizardError::JumpsDisabled`] if backward jumps are turned off
    /// - [`WizardError::InvalidStepIndex`] for an index past the last step
    /// - [`WizardError::ForwardJump`] for an index ahead of the current step
    pub fn go_to(&self, session: &mut WizardSession, index: usize) -> Result<StepId> {
        Self::ensure_open(session)?;
        if !self.config.allow_backward_jumps {
            return Err(WizardError::JumpsDisabled);
        }
        let len = session.steps().len();
        if index >= len {
            return Err(WizardError::InvalidStepIndex { index, len });
        }
        let current = session.current_step_index();
        if index > current {
            return Err(WizardError::ForwardJump { from: current, to: index });
        }
        session.set_current_step_index(index);
        let step = session.current_step();
        info!(session = %session.id(), step = %step, "jumped back");
        Ok(step)
    }

    /// Evaluate any step without touching the session
    ///
    /// # Errors
    /// Returns [`WizardError::UnsupportedCategory`] if the controller has no
    /// engine for the session's category.
    pub fn validate_step(&self, session: &WizardSession, step: StepId) -> Result<ErrorMap> {
        let engine = self.engine(session.category())?;
        Ok(engine.registry.validate(step, &session.form))
    }

    /// Each step with its recorded and outstanding error counts
    ///
    /// # Errors
    /// Returns [`WizardError::UnsupportedCategory`] if the controller has no
    /// engine for the session's category.
    pub fn review_summary(&self, session: &WizardSession) -> Result<Vec<StepSummary>> {
        let engine = self.engine(session.category())?;
        let known = engine.errors.counts_by_step(&session.errors);
        Ok(session
            .steps()
            .iter()
            .enumerate()
            .map(|(index, step)| StepSummary {
                step: *step,
                visited: index < session.current_step_index(),
                known_errors: known.get(&step.id).copied().unwrap_or(0),
                outstanding_errors: engine.registry.validate(step.id, &session.form).len(),
            })
            .collect())
    }

    fn engine(&self, category: Category) -> Result<&Engine> {
        self.engines
            .get(&category)
            .ok_or(WizardError::UnsupportedCategory(category))
    }

    fn ensure_open(session: &WizardSession) -> Result<()> {
        if session.is_submitted() {
            warn!(session = %session.id(), "mutation after submission");
            return Err(WizardError::AlreadySubmitted(session.id()));
        }
        Ok(())
    }

    /// Reset dependents until no further guard switches off
    ///
    /// The edited path itself is never reset.
    fn clear_dependents(
        engine: &Engine,
        edited: &FieldPath,
        before: &FormState,
        after: FormState,
    ) -> Result<(FormState, Vec<FieldPath>)> {
        let rules: Vec<&Rule> = engine.registry.rules().map(|(_, rule)| rule).collect();
        let mut reset: Vec<FieldPath> = Vec::new();
        let mut previous = before.clone();
        let mut current = after;

        loop {
            let stale: Vec<FieldPath> = deactivated(rules.iter().copied(), &previous, &current)
                .into_iter()
                .filter(|path| path != edited && !reset.contains(path))
                .collect();
            if stale.is_empty() {
                break;
            }
            let mut next = current.clone();
            for path in &stale {
                next = next.reset(&engine.schema, path)?;
            }
            debug!(fields = ?stale.iter().map(FieldPath::as_str).collect::<Vec<_>>(), "dependent fields reset");
            reset.extend(stale);
            if next == current {
                break;
            }
            previous = current;
            current = next;
        }

        Ok((current, reset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::MockClock;
    use chrono::{TimeZone, Utc};
    use intake_schema::paths::{claims, personal};
    use intake_schema::risk;
    use intake_test_utils::{valid_form, VALID_ID_NUMBER};
    use pretty_assertions::assert_eq;

    fn session_with(category: Category, form: FormState) -> WizardSession {
        let mut session = WizardSession::new(category, None);
        session.form = form;
        session
    }

    #[test]
    fn submission_uses_injected_clock() {
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap();
        let mut clock = MockClock::new();
        clock.expect_now().times(1).return_const(at);

        let controller = WizardController::with_clock(WizardConfig::default(), clock);
        let mut session = session_with(Category::Travel, valid_form(Category::Travel));
        let last = session.steps().len() - 1;
        session.set_current_step_index(last);

        match controller.advance(&mut session).unwrap() {
            Advance::Submitted(record) => assert_eq!(record.consent_timestamp, at),
            other => panic!("expected submission, got {other:?}"),
        }
        assert!(session.is_submitted());
    }

    #[test]
    fn blocked_advance_does_not_read_clock() {
        let mut clock = MockClock::new();
        clock.expect_now().times(0);
        let controller = WizardController::with_clock(WizardConfig::default(), clock);
        let mut session = controller.start("travel", None).unwrap();
        let outcome = controller.advance(&mut session).unwrap();
        assert!(outcome.is_blocked());
        assert_eq!(session.current_step_index(), 0);
    }

    #[test]
    fn dependent_reset_cascades() {
        let controller = WizardController::default();
        let form = valid_form(Category::Vehicle)
            .set_path(&claims::HAS_CLAIMS_LAST_THREE_YEARS, true.into())
            .set_path(&claims::NUMBER_OF_CLAIMS, "3".into())
            .set_path(&claims::MULTIPLE_CLAIMS_EXPLANATION, "Hail twice".into());
        let mut session = session_with(Category::Vehicle, form);

        controller
            .set_field(&mut session, &claims::HAS_CLAIMS_LAST_THREE_YEARS, false.into())
            .unwrap();
        assert_eq!(session.form().get(&claims::NUMBER_OF_CLAIMS), Some(&FieldValue::from("")));
        assert_eq!(
            session.form().get(&claims::MULTIPLE_CLAIMS_EXPLANATION),
            Some(&FieldValue::from(""))
        );
    }

    #[test]
    fn retain_policy_keeps_stale_values() {
        let controller =
            WizardController::new(WizardConfig::new().with_dependent_field_policy(DependentFieldPolicy::Retain));
        let mut session = session_with(Category::Property, valid_form(Category::Property));
        controller
            .set_field(&mut session, &risk("armedResponse"), false.into())
            .unwrap();
        assert_eq!(
            session.form().get(&risk("armedResponseProvider")),
            Some(&FieldValue::from("ADT"))
        );
    }

    #[test]
    fn validate_on_edit_refreshes_only_edited_field() {
        let controller = WizardController::new(WizardConfig::new().with_validate_on_edit(true));
        let mut session = controller.start("travel", None).unwrap();

        controller
            .set_field(&mut session, &personal::ID_NUMBER, "123".into())
            .unwrap();
        assert!(session.field_error(&personal::ID_NUMBER).is_some());
        assert!(session.field_error(&personal::FIRST_NAME).is_none());

        controller
            .set_field(&mut session, &personal::ID_NUMBER, VALID_ID_NUMBER.into())
            .unwrap();
        assert!(session.field_error(&personal::ID_NUMBER).is_none());
    }
}
