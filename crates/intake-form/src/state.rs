//! Persistent form state
//!
//! [`FormState`] is an immutable tree of records. Every update returns a new
//! state that shares unchanged subtrees with the old one, so earlier snapshots
//! stay valid and cheap to keep around.

use intake_schema::{Category, FieldPath, FieldSchema};
use serde::{Deserialize, Serialize};

use crate::error::{FormError, Result};
use crate::section::Section;
use crate::value::{FieldValue, Record};

/// Nested form record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormState {
    root: Record,
}

impl FormState {
    /// State with no sections at all
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Initial state for a category
    ///
    /// Every preallocated leaf of the category's schema is set to the empty
    /// value of its kind. Optional records (co-insured) stay absent.
    #[must_use]
    pub fn for_category(category: Category) -> Self {
        let schema = FieldSchema::for_category(category);
        schema
            .preallocated()
            .fold(Self::empty(), |state, (path, kind)| {
                state.set_path(path, FieldValue::default_for(kind))
            })
    }

    /// Wrap an existing record
    #[inline]
    #[must_use]
    pub fn from_record(root: Record) -> Self {
        Self { root }
    }

    /// Root record
    #[inline]
    #[must_use]
    pub fn as_record(&self) -> &Record {
        &self.root
    }

    /// Read the value at a path
    #[must_use]
    pub fn get(&self, path: &FieldPath) -> Option<&FieldValue> {
        let mut segments = path.segments();
        let first = segments.next()?;
        let mut current = self.root.get(first)?;
        for segment in segments {
            current = current.as_record()?.get(segment)?;
        }
        Some(current)
    }

    /// Check whether a path holds a non-empty value
    #[inline]
    #[must_use]
    pub fn is_filled(&self, path: &FieldPath) -> bool {
        self.get(path).is_some_and(|v| !v.is_empty())
    }

    /// Replace the value at a path, creating intermediate records
    ///
    /// A non-record value sitting where a container is needed is replaced
    /// by a fresh record.
    #[must_use]
    pub fn set_path(&self, path: &FieldPath, value: FieldValue) -> Self {
        let segments: Vec<&str> = path.segments().collect();
        Self {
            root: set_in(&self.root, &segments, value),
        }
    }

    /// Set one field of a section
    ///
    /// Sibling fields are preserved. A missing section is created.
    ///
    /// # Errors
    /// Returns [`FormError::Path`] if `field` is not a valid segment.
    pub fn set_section(
        &self,
        section: Section,
        field: &str,
        value: impl Into<FieldValue>,
    ) -> Result<Self> {
        let path = section.field(field)?;
        Ok(self.set_path(&path, value.into()))
    }

    /// Remove the value at a path
    ///
    /// Removing an absent path returns an equal state.
    #[must_use]
    pub fn remove_path(&self, path: &FieldPath) -> Self {
        let segments: Vec<&str> = path.segments().collect();
        Self {
            root: remove_in(&self.root, &segments),
        }
    }

    /// Section record, if present
    #[must_use]
    pub fn section(&self, section: Section) -> Option<&Record> {
        self.root.get(section.key()).and_then(FieldValue::as_record)
    }

    /// Copy of the state without a top-level section
    #[must_use]
    pub fn without_section(&self, section: Section) -> Self {
        Self {
            root: self.root.without(section.key()),
        }
    }

    /// Schema-checked write
    ///
    /// # Errors
    /// - [`FormError::UnknownField`] if the path is not declared for the
    ///   schema's category
    /// - [`FormError::KindMismatch`] if the value does not fit the field kind
    pub fn write(&self, schema: &FieldSchema, path: &FieldPath, value: FieldValue) -> Result<Self> {
        let spec = schema.get(path).ok_or_else(|| FormError::UnknownField {
            path: path.clone(),
            category: schema.category(),
        })?;
        if !value.matches_kind(spec.kind) {
            return Err(FormError::KindMismatch {
                path: path.clone(),
                expected: spec.kind,
                found: value.type_name(),
            });
        }
        Ok(self.set_path(path, value))
    }

    /// Reset a declared field to the empty value of its kind
    ///
    /// Fields inside an optional record are removed instead, so an
    /// abandoned co-insured record does not linger half-filled.
    ///
    /// # Errors
    /// Returns [`FormError::UnknownField`] if the path is not declared.
    pub fn reset(&self, schema: &FieldSchema, path: &FieldPath) -> Result<Self> {
        let spec = schema.get(path).ok_or_else(|| FormError::UnknownField {
            path: path.clone(),
            category: schema.category(),
        })?;
        if spec.optional_record {
            Ok(self.remove_path(path))
        } else {
            Ok(self.set_path(path, FieldValue::default_for(spec.kind)))
        }
    }

    /// Flatten into `(path, value)` leaves in key order
    #[must_use]
    pub fn leaves(&self) -> Vec<(FieldPath, FieldValue)> {
        let mut out = Vec::new();
        collect_leaves(&self.root, None, &mut out);
        out
    }
}

fn set_in(record: &Record, segments: &[&str], value: FieldValue) -> Record {
    match segments {
        [] => record.clone(),
        [leaf] => record.update((*leaf).to_string(), value),
        [head, rest @ ..] => {
            let child = match record.get(*head) {
                Some(FieldValue::Record(inner)) => set_in(inner, rest, value),
                _ => set_in(&Record::new(), rest, value),
            };
            record.update((*head).to_string(), FieldValue::Record(child))
        }
    }
}

fn remove_in(record: &Record, segments: &[&str]) -> Record {
    match segments {
        [] => record.clone(),
        [leaf] => record.without(*leaf),
        [head, rest @ ..] => match record.get(*head) {
            Some(FieldValue::Record(inner)) => {
                record.update((*head).to_string(), FieldValue::Record(remove_in(inner, rest)))
            }
            _ => record.clone(),
        },
    }
}

// Keys that are not valid path segments (only reachable through a
// hand-edited snapshot) are skipped.
fn collect_leaves(record: &Record, prefix: Option<&FieldPath>, out: &mut Vec<(FieldPath, FieldValue)>) {
    for (key, value) in record {
        let raw = match prefix {
            Some(parent) => format!("{parent}.{key}"),
            None => key.clone(),
        };
        let Ok(path) = raw.parse::<FieldPath>() else {
            continue;
        };
        match value {
            FieldValue::Record(inner) => collect_leaves(inner, Some(&path), out),
            leaf => out.push((path, leaf.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use intake_schema::{info, paths};

    #[test]
    fn initial_state_preallocates_sections() {
        let state = FormState::for_category(Category::Vehicle);
        assert_eq!(state.get(&paths::personal::EMAIL), Some(&FieldValue::from("")));
        assert_eq!(
            state.get(&paths::claims::HAS_CLAIMS_LAST_THREE_YEARS),
            Some(&FieldValue::Bool(false))
        );
        assert_eq!(state.get(&info("vehicleMake")), Some(&FieldValue::from("")));
        assert!(state.get(&paths::co_insured::FIRST_NAME).is_none());
        assert!(state.get(&paths::company::COMPANY_NAME).is_none());
    }

    #[test]
    fn construction_has_top_level_scalars() {
        let state = FormState::for_category(Category::Construction);
        assert_eq!(state.get(&paths::project::PROJECT_NAME), Some(&FieldValue::from("")));
        assert!(state.section(Section::CompanyInfo).is_some());
    }

    #[test]
    fn set_section_preserves_siblings() {
        let state = FormState::for_category(Category::Property)
            .set_section(Section::PersonalInfo, "firstName", "Thandi")
            .unwrap()
            .set_section(Section::PersonalInfo, "lastName", "Mokoena")
            .unwrap();
        assert_eq!(state.get(&paths::personal::FIRST_NAME), Some(&FieldValue::from("Thandi")));
        assert_eq!(state.get(&paths::personal::LAST_NAME), Some(&FieldValue::from("Mokoena")));
        assert_eq!(state.get(&paths::personal::EMAIL), Some(&FieldValue::from("")));
    }

    #[test]
    fn set_section_creates_missing_section() {
        let state = FormState::empty()
            .set_section(Section::CoInsured, "firstName", "Sipho")
            .unwrap();
        assert_eq!(state.get(&paths::co_insured::FIRST_NAME), Some(&FieldValue::from("Sipho")));
    }

    #[test]
    fn set_path_replaces_scalar_container() {
        let state = FormState::empty()
            .set_path(&paths::CO_INSURED, FieldValue::from("oops"))
            .set_path(&paths::co_insured::ADDRESS_CITY, FieldValue::from("Durban"));
        assert_eq!(state.get(&paths::co_insured::ADDRESS_CITY), Some(&FieldValue::from("Durban")));
    }

    #[test]
    fn updates_do_not_touch_the_previous_state() {
        let before = FormState::for_category(Category::Travel);
        let after = before.set_path(&paths::personal::EMAIL, FieldValue::from("a@b.co"));
        assert_eq!(before.get(&paths::personal::EMAIL), Some(&FieldValue::from("")));
        assert_ne!(before, after);
    }

    #[test]
    fn remove_path_is_idempotent() {
        let state = FormState::empty()
            .set_path(&paths::co_insured::FIRST_NAME, FieldValue::from("Sipho"));
        let removed = state.remove_path(&paths::co_insured::FIRST_NAME);
        assert!(removed.get(&paths::co_insured::FIRST_NAME).is_none());
        assert_eq!(removed.remove_path(&paths::co_insured::FIRST_NAME), removed);
        assert_eq!(removed.remove_path(&paths::personal::EMAIL), removed);
    }

    #[test]
    fn typed_write_checks_schema() {
        let schema = FieldSchema::for_category(Category::Cyber);
        let state = FormState::for_category(Category::Cyber);

        assert!(matches!(
            state.write(&schema, &info("vehicleMake"), FieldValue::from("VW")),
            Err(FormError::UnknownField { .. })
        ));
        assert!(matches!(
            state.write(&schema, &info("recordsHeld"), FieldValue::from("many")),
            Err(FormError::KindMismatch { .. })
        ));
        let written = state
            .write(&schema, &info("recordsHeld"), FieldValue::from(150_000_i64))
            .unwrap();
        assert_eq!(written.get(&info("recordsHeld")).and_then(FieldValue::as_number), Some(150_000.0));
    }

    #[test]
    fn reset_restores_default_or_removes_optional() {
        let schema = FieldSchema::for_category(Category::Property);
        let state = FormState::for_category(Category::Property)
            .set_path(&info("bondHolder"), FieldValue::from("FNB"))
            .set_path(&paths::co_insured::FIRST_NAME, FieldValue::from("Sipho"));

        let reset = state.reset(&schema, &info("bondHolder")).unwrap();
        assert_eq!(reset.get(&info("bondHolder")), Some(&FieldValue::from("")));

        let reset = reset.reset(&schema, &paths::co_insured::FIRST_NAME).unwrap();
        assert!(reset.get(&paths::co_insured::FIRST_NAME).is_none());
    }

    #[test]
    fn without_section_drops_only_that_section() {
        let state = FormState::for_category(Category::Events);
        let stripped = state.without_section(Section::Consent);
        assert!(stripped.section(Section::Consent).is_none());
        assert!(stripped.section(Section::Disclosure).is_some());
    }

    #[test]
    fn leaves_flatten_nested_records() {
        let state = FormState::empty()
            .set_path(&paths::co_insured::ADDRESS_CITY, FieldValue::from("Durban"))
            .set_path(&paths::project::PROJECT_NAME, FieldValue::from("Bridge"));
        let leaves = state.leaves();
        assert_eq!(
            leaves,
            vec![
                (paths::co_insured::ADDRESS_CITY, FieldValue::from("Durban")),
                (paths::project::PROJECT_NAME, FieldValue::from("Bridge")),
            ]
        );
    }

    #[test]
    fn json_is_a_plain_object() {
        let state = FormState::empty().set_path(&paths::personal::EMAIL, FieldValue::from("a@b.co"));
        assert_eq!(
            serde_json::to_string(&state).unwrap(),
            r#"{"personalInfo":{"email":"a@b.co"}}"#
        );
    }
}
