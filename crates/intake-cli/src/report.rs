//! Plain-text rendering for the command line
//!
//! Every writer goes straight to an [`io::Write`] sink and propagates its
//! errors, so a closed pipe ends the command instead of being ignored.

use intake_schema::{Step, StepId};
use intake_validation::ErrorMap;
use std::io::{self, Write};

use crate::scenario::Replay;

/// Numbered step list for a category
///
/// # Errors
/// Returns the sink's error if a write fails.
pub fn write_steps(out: &mut impl Write, steps: &[Step]) -> io::Result<()> {
    for (index, step) in steps.iter().enumerate() {
        writeln!(out, "{:>2}. {:<22} {}", index + 1, step.id.as_str(), step.title)?;
    }
    Ok(())
}

/// Per-step validation result, one block per step
///
/// # Errors
/// Returns the sink's error if a write fails.
pub fn write_validation(out: &mut impl Write, report: &[(StepId, ErrorMap)]) -> io::Result<()> {
    for (step, errors) in report {
        if errors.is_empty() {
            writeln!(out, "ok    {step}")?;
            continue;
        }
        writeln!(out, "FAIL  {step}")?;
        for (path, error) in errors.iter() {
            writeln!(out, "      {path}: {} [{}]", error.message, error.kind.as_str())?;
        }
    }
    Ok(())
}

/// Replay log followed by the session position
///
/// # Errors
/// Returns the sink's error if a write fails.
pub fn write_replay(out: &mut impl Write, replay: &Replay) -> io::Result<()> {
    for (index, event) in replay.events.iter().enumerate() {
        writeln!(out, "[{index:>3}] {event}")?;
    }

    let progress = replay.session.progress();
    writeln!(out)?;
    writeln!(
        out,
        "Session {} ({}): step {}/{} {} ({}%)",
        replay.session.id(),
        replay.session.category(),
        progress.current,
        progress.total,
        progress.step,
        progress.percent
    )?;

    if !replay.is_submitted() {
        if let Some((step, errors)) = replay.last_blocked() {
            writeln!(out, "Last blocked on {step}:")?;
            for (path, message) in errors.messages() {
                writeln!(out, "  {path}: {message}")?;
            }
        }
    }
    Ok(())
}

/// Has every step passed
#[must_use]
pub fn all_valid(report: &[(StepId, ErrorMap)]) -> bool {
    report.iter().all(|(_, errors)| errors.is_empty())
}
