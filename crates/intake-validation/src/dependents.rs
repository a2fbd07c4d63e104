//! Dependent-field tracking
//!
//! A field is *dependent* when every rule on it is guarded. When an edit turns
//! such a field's guards from active to inactive, the value the user typed
//! under the old answer no longer means anything; [`deactivated`] reports those
//! fields so the caller can reset them.

use intake_form::FormState;
use intake_schema::FieldPath;

use crate::rules::Rule;

/// Dependent fields whose guards were active in `before` and none of which
/// remain active in `after`
///
/// Fields with at least one unguarded rule are never reported. Order follows
/// rule order; each path appears once.
#[must_use]
pub fn deactivated<'r>(
    rules: impl IntoIterator<Item = &'r Rule> + Clone,
    before: &FormState,
    after: &FormState,
) -> Vec<FieldPath> {
    let mut out: Vec<FieldPath> = Vec::new();

    for rule in rules.clone() {
        let Some(guard) = rule.guard() else { continue };
        if out.contains(rule.path()) {
            continue;
        }
        let flipped = guard.condition.holds(before) && !guard.condition.holds(after);
        if !flipped {
            continue;
        }

        let mut same_field = rules.clone().into_iter().filter(|r| r.path() == rule.path());
        let still_dependent = same_field.all(|r| r.guard().is_some_and(|g| !g.condition.holds(after)));
        if still_dependent {
            out.push(rule.path().clone());
        }
    }

    out
}
