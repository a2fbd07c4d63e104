//! Session model
//!
//! A [`WizardSession`] is an explicit value owned by the caller. The controller
//! takes it by `&mut` for each operation; nothing else holds a reference to it,
//! so it can be serialised between requests and restored later.

use intake_form::FormState;
use intake_schema::{step_ids, steps, Category, FieldPath, Step, StepId};
use intake_validation::{ErrorMap, FieldError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SessionStatus {
    /// Steps are still being filled in
    #[default]
    InProgress,
    /// Terminal: the submission record was produced
    Submitted,
}

/// Agent or broker attached to the session; passed through untouched
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Representative {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// Position in the step sequence, for progress bars
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    /// 1-based number of the current step
    pub current: usize,
    /// Number of steps
    pub total: usize,
    /// Whole-number percentage, 100 once submitted
    pub percent: u8,
    /// Current step
    pub step: StepId,
}

/// Snapshot that does not describe a reachable session
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    /// Step list differs from the category's catalog
    #[error("steps do not match the {category} catalog (expected {expected:?}, found {found:?})")]
    StepsMismatch {
        category: Category,
        expected: Vec<StepId>,
        found: Vec<StepId>,
    },

    /// Current step index lies outside the step list
    #[error("current step index {index} out of range (session has {len} steps)")]
    IndexOutOfRange { index: usize, len: usize },
}

/// One intake session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "SessionRepr")]
pub struct WizardSession {
    id: Uuid,
    category: Category,
    steps: Vec<Step>,
    current_step_index: usize,
    pub(crate) form: FormState,
    pub(crate) errors: ErrorMap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    representative: Option<Representative>,
    pub(crate) status: SessionStatus,
}

impl WizardSession {
    /// Fresh session at the first step with an empty form
    #[must_use]
    pub fn new(category: Category, representative: Option<Representative>) -> Self {
        Self {
            id: Uuid::new_v4(),
            category,
            steps: steps(category),
            current_step_index: 0,
            form: FormState::for_category(category),
            errors: ErrorMap::new(),
            representative,
            status: SessionStatus::InProgress,
        }
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[inline]
    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }

    /// Ordered steps of the session's category
    #[inline]
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    #[inline]
    #[must_use]
    pub fn current_step_index(&self) -> usize {
        self.current_step_index
    }

    /// Step at the current index
    #[must_use]
    pub fn current_step(&self) -> StepId {
        self.steps
            .get(self.current_step_index)
            .map_or(StepId::Consent, |step| step.id)
    }

    /// Check whether the current step is the last one
    #[inline]
    #[must_use]
    pub fn is_last_step(&self) -> bool {
        self.current_step_index + 1 >= self.steps.len()
    }

    #[inline]
    #[must_use]
    pub fn form(&self) -> &FormState {
        &self.form
    }

    /// Known field errors
    #[inline]
    #[must_use]
    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    /// Error shown next to a field
    #[inline]
    #[must_use]
    pub fn field_error(&self, path: &FieldPath) -> Option<&FieldError> {
        self.errors.get(path)
    }

    #[inline]
    #[must_use]
    pub fn representative(&self) -> Option<&Representative> {
        self.representative.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    #[inline]
    #[must_use]
    pub fn is_submitted(&self) -> bool {
        self.status == SessionStatus::Submitted
    }

    /// Progress through the step sequence
    #[must_use]
    pub fn progress(&self) -> Progress {
        let total = self.steps.len().max(1);
        let current = (self.current_step_index + 1).min(total);
        let percent = if self.is_submitted() {
            100
        } else {
            u8::try_from(current * 100 / total).unwrap_or(100)
        };
        Progress {
            current,
            total,
            percent,
            step: self.current_step(),
        }
    }

    pub(crate) fn set_current_step_index(&mut self, index: usize) {
        self.current_step_index = index;
    }
}

/// Wire form of a session, checked against the catalog before use
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionRepr {
    id: Uuid,
    category: Category,
    steps: Vec<Step>,
    current_step_index: usize,
    form: FormState,
    errors: ErrorMap,
    #[serde(default)]
    representative: Option<Representative>,
    status: SessionStatus,
}

impl TryFrom<SessionRepr> for WizardSession {
    type Error = SnapshotError;

    fn try_from(repr: SessionRepr) -> Result<Self, Self::Error> {
        let expected = step_ids(repr.category);
        let found: Vec<StepId> = repr.steps.iter().map(|step| step.id).collect();
        if found != expected {
            return Err(SnapshotError::StepsMismatch {
                category: repr.category,
                expected,
                found,
            });
        }
        if repr.current_step_index >= repr.steps.len() {
            return Err(SnapshotError::IndexOutOfRange {
                index: repr.current_step_index,
                len: repr.steps.len(),
            });
        }

        Ok(Self {
            id: repr.id,
            category: repr.category,
            steps: repr.steps,
            current_step_index: repr.current_step_index,
            form: repr.form,
            errors: repr.errors,
            representative: repr.representative,
            status: repr.status,
        })
    }
}
