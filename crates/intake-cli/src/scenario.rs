//! Scenario files
//!
//! A scenario names a category and lists the edits and navigation actions to
//! replay against a fresh session. JSON and YAML are both accepted; the
//! format follows the file extension.
//!
//! ```yaml
//! category: travel
//! now: 2025-03-01T09:30:00Z
//! actions:
//!   - action: fill
//!     fields:
//!       personalInfo.firstName: Thandi
//!       personalInfo.lastName: Nkosi
//!   - action: advance
//!   - action: goTo
//!     index: 0
//!   - action: consent
//!     given: true
//! ```

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use intake_form::FieldValue;
use intake_schema::{FieldPath, StepId};
use intake_validation::ErrorMap;
use intake_wizard::{
    Advance, FixedClock, Representative, Retreat, SignatureArtifact, SubmissionRecord, WizardConfig,
    WizardController, WizardError, WizardSession,
};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Replayable wizard session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    /// Category id, e.g. `vehicle`
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub representative: Option<Representative>,
    /// Submission time; the wall clock is used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub now: Option<DateTime<Utc>>,
    #[serde(default)]
    pub actions: Vec<Action>,
}

/// One scripted step of a scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Action {
    /// Write one field
    Set { path: String, value: FieldValue },
    /// Write several fields in order
    Fill { fields: IndexMap<String, FieldValue> },
    Consent { given: bool },
    Signature(SignatureArtifact),
    Advance,
    Retreat,
    GoTo { index: usize },
}

impl Action {
    /// Check whether the action only edits the form
    #[must_use]
    pub fn is_edit(&self) -> bool {
        matches!(
            self,
            Action::Set { .. } | Action::Fill { .. } | Action::Consent { .. } | Action::Signature(_)
        )
    }
}

/// Scenario loading and replay errors
#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    /// File could not be read
    #[error("failed to read scenario {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON scenario: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML scenario: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// An action was rejected by the controller
    #[error("action {index}: {source}")]
    Action {
        index: usize,
        #[source]
        source: WizardError,
    },

    #[error(transparent)]
    Wizard(#[from] WizardError),
}

impl Scenario {
    /// Parse a JSON scenario
    ///
    /// # Errors
    /// Returns [`ScenarioError::Json`] for malformed input.
    pub fn from_json_str(input: &str) -> Result<Self, ScenarioError> {
        Ok(serde_json::from_str(input)?)
    }

    /// Parse a YAML scenario
    ///
    /// # Errors
    /// Returns [`ScenarioError::Yaml`] for malformed input.
    pub fn from_yaml_str(input: &str) -> Result<Self, ScenarioError> {
        Ok(serde_yaml::from_str(input)?)
    }

    /// Load a scenario; `.yaml` and `.yml` files are YAML, anything else JSON
    ///
    /// # Errors
    /// - [`ScenarioError::Read`] if the file cannot be read
    /// - [`ScenarioError::Json`] / [`ScenarioError::Yaml`] for malformed contents
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ScenarioError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => Self::from_yaml_str(&contents),
            _ => Self::from_json_str(&contents),
        }
    }

    /// Controller for this scenario, pinned to `now` when given
    #[must_use]
    pub fn controller(&self, config: WizardConfig) -> WizardController {
        match self.now {
            Some(at) => WizardController::with_clock(config, FixedClock(at)),
            None => WizardController::new(config),
        }
    }
}

/// What one replayed action did
#[derive(Debug, Clone, PartialEq)]
pub enum ReplayEvent {
    Edited { path: FieldPath },
    Moved { from: StepId, to: StepId },
    Blocked { step: StepId, errors: ErrorMap },
    Submitted,
    Exit,
    Jumped { to: StepId },
}

impl Display for ReplayEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ReplayEvent::Edited { path } => write!(f, "set {path}"),
            ReplayEvent::Moved { from, to } => write!(f, "advance {from} -> {to}"),
            ReplayEvent::Blocked { step, errors } => {
                write!(f, "blocked on {step} ({} errors)", errors.len())
            }
            ReplayEvent::Submitted => f.write_str("submitted"),
            ReplayEvent::Exit => f.write_str("exit requested"),
            ReplayEvent::Jumped { to } => write!(f, "back to {to}"),
        }
    }
}

/// Session state after a replay
#[derive(Debug, Clone)]
pub struct Replay {
    pub session: WizardSession,
    pub events: Vec<ReplayEvent>,
    pub submission: Option<SubmissionRecord>,
}

impl Replay {
    #[inline]
    #[must_use]
    pub fn is_submitted(&self) -> bool {
        self.submission.is_some()
    }

    /// Most recent blocked advance, if any
    #[must_use]
    pub fn last_blocked(&self) -> Option<(StepId, &ErrorMap)> {
        self.events.iter().rev().find_map(|event| match event {
            ReplayEvent::Blocked { step, errors } => Some((*step, errors)),
            _ => None,
        })
    }
}

/// Replay every action of a scenario against a fresh session
///
/// # Errors
/// - [`ScenarioError::Wizard`] if the category is unknown
/// - [`ScenarioError::Action`] for the first action the controller rejects
pub fn replay(controller: &WizardController, scenario: &Scenario) -> Result<Replay, ScenarioError> {
    let mut session = controller.start(&scenario.category, scenario.representative.clone())?;
    let mut events = Vec::with_capacity(scenario.actions.len());
    let mut submission = None;

    for (index, action) in scenario.actions.iter().enumerate() {
        debug!(index, "replaying action");
        apply(controller, &mut session, action, &mut events, &mut submission)
            .map_err(|source| ScenarioError::Action { index, source })?;
    }

    info!(
        session = %session.id(),
        actions = scenario.actions.len(),
        submitted = submission.is_some(),
        "scenario replayed"
    );
    Ok(Replay {
        session,
        events,
        submission,
    })
}

/// Apply only the edits of a scenario, then evaluate every step
///
/// Navigation actions are skipped, so each step is judged on the final form.
///
/// # Errors
/// As [`replay`].
pub fn validate(
    controller: &WizardController,
    scenario: &Scenario,
) -> Result<Vec<(StepId, ErrorMap)>, ScenarioError> {
    let mut session = controller.start(&scenario.category, scenario.representative.clone())?;
    let mut events = Vec::new();
    let mut submission = None;

    for (index, action) in scenario.actions.iter().enumerate().filter(|(_, a)| a.is_edit()) {
        apply(controller, &mut session, action, &mut events, &mut submission)
            .map_err(|source| ScenarioError::Action { index, source })?;
    }

    let mut report = Vec::with_capacity(session.steps().len());
    for step in session.steps() {
        report.push((step.id, controller.validate_step(&session, step.id)?));
    }
    Ok(report)
}

fn apply(
    controller: &WizardController,
    session: &mut WizardSession,
    action: &Action,
    events: &mut Vec<ReplayEvent>,
    submission: &mut Option<SubmissionRecord>,
) -> intake_wizard::Result<()> {
    match action {
        Action::Set { path, value } => {
            let path = FieldPath::parse(path)?;
            controller.set_field(session, &path, value.clone())?;
            events.push(ReplayEvent::Edited { path });
        }
        Action::Fill { fields } => {
            for (path, value) in fields {
                let path = FieldPath::parse(path)?;
                controller.set_field(session, &path, value.clone())?;
                events.push(ReplayEvent::Edited { path });
            }
        }
        Action::Consent { given } => {
            controller.set_consent(session, *given)?;
            events.push(ReplayEvent::Edited {
                path: intake_schema::paths::consent::CONSENT_GIVEN,
            });
        }
        Action::Signature(signature) => {
            controller.set_signature(session, signature.clone())?;
            events.push(ReplayEvent::Edited {
                path: intake_schema::paths::consent::DIGITAL_SIGNATURE,
            });
        }
        Action::Advance => match controller.advance(session)? {
            Advance::Moved { from, to } => events.push(ReplayEvent::Moved { from, to }),
            Advance::Blocked { step, errors } => events.push(ReplayEvent::Blocked { step, errors }),
            Advance::Submitted(record) => {
                *submission = Some(*record);
                events.push(ReplayEvent::Submitted);
            }
        },
        Action::Retreat => match controller.retreat(session)? {
            Retreat::Moved { from, to } => events.push(ReplayEvent::Moved { from, to }),
            Retreat::Exit => events.push(ReplayEvent::Exit),
        },
        Action::GoTo { index } => {
            let to = controller.go_to(session, *index)?;
            events.push(ReplayEvent::Jumped { to });
        }
    }
    Ok(())
}
