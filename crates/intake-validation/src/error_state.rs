//! Error state management
//!
//! [`ErrorStateManager`] merges validation results into a session's error map
//! and clears entries scoped to the step that owns them. Every operation takes
//! the existing map and returns a new one.

use indexmap::IndexMap;
use intake_schema::{Category, FieldPath, OwnershipTable, StepId};
use tracing::debug;

use crate::error_map::{ErrorMap, FieldError};

/// Scoped merge/clear over an [`ErrorMap`], for one category
#[derive(Debug, Clone)]
pub struct ErrorStateManager {
    ownership: OwnershipTable,
}

impl ErrorStateManager {
    /// Manager using the category's ownership table
    #[must_use]
    pub fn for_category(category: Category) -> Self {
        Self {
            ownership: OwnershipTable::for_category(category),
        }
    }

    /// Ownership table in use
    #[inline]
    #[must_use]
    pub fn ownership(&self) -> &OwnershipTable {
        &self.ownership
    }

    /// Union of both maps; `new` wins on shared paths
    #[must_use]
    pub fn merge(existing: &ErrorMap, new: &ErrorMap) -> ErrorMap {
        let mut merged = existing.clone();
        merged.extend(new.iter().map(|(path, error)| (path.clone(), error.clone())));
        merged
    }

    /// Drop every entry owned by `step`, keeping all others
    #[must_use]
    pub fn clear_for_step(&self, existing: &ErrorMap, step: StepId) -> ErrorMap {
        let mut cleared = existing.clone();
        cleared.retain(|path, _| !self.ownership.owns(step, path));
        debug!(step = %step, removed = existing.len() - cleared.len(), "cleared step errors");
        cleared
    }

    /// Drop the entry for one field
    #[must_use]
    pub fn clear_field(existing: &ErrorMap, path: &FieldPath) -> ErrorMap {
        let mut cleared = existing.clone();
        cleared.remove(path);
        cleared
    }

    /// Error for a field
    #[inline]
    #[must_use]
    pub fn field_error<'a>(errors: &'a ErrorMap, path: &FieldPath) -> Option<&'a FieldError> {
        errors.get(path)
    }

    /// Check whether a field has an error
    #[inline]
    #[must_use]
    pub fn has_error(errors: &ErrorMap, path: &FieldPath) -> bool {
        errors.contains(path)
    }

    /// Entries owned by `step`
    #[must_use]
    pub fn errors_for_step(&self, errors: &ErrorMap, step: StepId) -> ErrorMap {
        errors
            .iter()
            .filter(|(path, _)| self.ownership.owns(step, path))
            .map(|(path, error)| (path.clone(), error.clone()))
            .collect()
    }

    /// Number of entries per owning step, in catalog order
    ///
    /// Entries no step owns are not counted.
    #[must_use]
    pub fn counts_by_step(&self, errors: &ErrorMap) -> IndexMap<StepId, usize> {
        let mut counts: IndexMap<StepId, usize> = self.ownership.iter().map(|(step, _)| (step, 0)).collect();
        for path in errors.paths() {
            if let Some(step) = self.ownership.owner_of(path) {
                if let Some(count) = counts.get_mut(&step) {
                    *count += 1;
                }
            }
        }
        counts
    }
}
