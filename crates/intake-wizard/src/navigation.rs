//! Navigation outcomes
//!
//! The step index moves forward only through a successful advance. Retreat
//! never validates. From the last step a successful advance ends the session.

use intake_schema::{Step, StepId};
use intake_validation::ErrorMap;
use serde::Serialize;

use crate::submission::SubmissionRecord;

/// Result of [`advance`](crate::WizardController::advance)
#[derive(Debug, Clone, PartialEq)]
pub enum Advance {
    /// Step passed; the session moved to the next step
    Moved { from: StepId, to: StepId },
    /// Step failed; the session stays and the failures were merged in
    Blocked { step: StepId, errors: ErrorMap },
    /// Last step passed; the session is now terminal
    Submitted(Box<SubmissionRecord>),
}

impl Advance {
    /// Check whether the session stayed on its step
    #[inline]
    #[must_use]
    pub fn is_blocked(&self) -> bool {
        matches!(self, Advance::Blocked { .. })
    }
}

/// Result of [`retreat`](crate::WizardController::retreat)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retreat {
    /// Moved to the previous step
    Moved { from: StepId, to: StepId },
    /// Already at the first step; the caller should leave the wizard
    Exit,
}

/// One line of the review summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepSummary {
    pub step: Step,
    /// Step lies before the current one
    pub visited: bool,
    /// Errors already recorded on the session for this step
    pub known_errors: usize,
    /// Errors a fresh validation of the step reports
    pub outstanding_errors: usize,
}

impl StepSummary {
    /// Check whether the step currently validates
    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.outstanding_errors == 0
    }
}
