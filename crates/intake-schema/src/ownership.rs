//! Step ownership of form paths
//!
//! Each step owns a fixed set of path prefixes. Error clearing after a
//! successful step is scoped to these prefixes, so the table must never let two
//! steps of one category claim overlapping paths. Open-bag keys are owned
//! individually (the bag root is never claimed) because several steps write
//! into the same bag.

use indexmap::IndexMap;

use crate::catalog::step_ids;
use crate::category::Category;
use crate::fields::{bag_fields, paths};
use crate::path::FieldPath;
use crate::step::StepId;

/// Fixed prefixes owned by a step, before open-bag keys are added
fn fixed_prefixes(step: StepId) -> Vec<FieldPath> {
    match step {
        StepId::PersonalInfo => vec![paths::PERSONAL_INFO, paths::CO_INSURED],
        StepId::CompanyInfo => vec![paths::COMPANY_INFO, paths::PERSONAL_INFO],
        StepId::CurrentSituation => vec![paths::CURRENT_SITUATION],
        StepId::CoverageNeeds => vec![paths::COVERAGE_PREFERENCES],
        StepId::Preferences => vec![paths::BUDGET_PREFERENCES],
        StepId::DriverDetails => vec![paths::DRIVER_DETAILS],
        StepId::ProjectDetails => vec![
            paths::project::PROJECT_NAME,
            paths::project::PROJECT_DESCRIPTION,
            paths::project::CONTRACT_VALUE,
            paths::project::PROJECT_START_DATE,
            paths::project::PROJECT_END_DATE,
            paths::project::SITE_ADDRESS,
            paths::project::SITE_POSTAL_CODE,
        ],
        StepId::Disclosure => vec![paths::DISCLOSURE],
        StepId::Consent => vec![paths::CONSENT],
        _ => Vec::new(),
    }
}

/// Mapping from step to the path prefixes it owns, for one category
#[derive(Debug, Clone)]
pub struct OwnershipTable {
    category: Category,
    owned: IndexMap<StepId, Vec<FieldPath>>,
}

impl OwnershipTable {
    /// Build the table for a category, in catalog order
    #[must_use]
    pub fn for_category(category: Category) -> Self {
        let mut owned: IndexMap<StepId, Vec<FieldPath>> = step_ids(category)
            .into_iter()
            .map(|step| (step, fixed_prefixes(step)))
            .collect();

        for def in bag_fields(category) {
            if let Some(prefixes) = owned.get_mut(&def.owner) {
                prefixes.push(def.path());
            }
        }

        Self { category, owned }
    }

    /// Category the table was built for
    #[inline]
    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }

    /// Prefixes owned by a step (empty for steps outside the category)
    #[must_use]
    pub fn owned(&self, step: StepId) -> &[FieldPath] {
        self.owned.get(&step).map_or(&[], Vec::as_slice)
    }

    /// Check whether a step owns a path
    #[must_use]
    pub fn owns(&self, step: StepId, path: &FieldPath) -> bool {
        self.owned(step).iter().any(|prefix| prefix.is_prefix_of(path))
    }

    /// Find the step owning a path
    #[must_use]
    pub fn owner_of(&self, path: &FieldPath) -> Option<StepId> {
        self.owned
            .iter()
            .find(|(_, prefixes)| prefixes.iter().any(|p| p.is_prefix_of(path)))
            .map(|(step, _)| *step)
    }

    /// Iterate over `(step, prefixes)` in catalog order
    pub fn iter(&self) -> impl Iterator<Item = (StepId, &[FieldPath])> {
        self.owned.iter().map(|(step, prefixes)| (*step, prefixes.as_slice()))
    }

    /// Validate that no two steps claim overlapping prefixes
    ///
    /// # Errors
    /// Returns [`OwnershipError::OverlappingClaims`] naming the first conflict.
    ///
    /// # Performance
    /// O(n²) in the number of owned prefixes; tables hold well under a hundred.
    pub fn check_disjoint(&self) -> Result<(), OwnershipError> {
        let claims: Vec<(StepId, &FieldPath)> = self
            .owned
            .iter()
            .flat_map(|(step, prefixes)| prefixes.iter().map(move |p| (*step, p)))
            .collect();

        for a in 0..claims.len() {
            for b in (a + 1)..claims.len() {
                let (step_a, path_a) = claims[a];
                let (step_b, path_b) = claims[b];
                if step_a != step_b && path_a.overlaps(path_b) {
                    return Err(OwnershipError::OverlappingClaims {
                        first: step_a,
                        second: step_b,
                        first_path: path_a.to_string(),
                        second_path: path_b.to_string(),
                    });
                }
            }
        }

        Ok(())
    }
}

/// Ownership table errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OwnershipError {
    /// Two steps claim overlapping paths
    #[error("overlapping claims: {first} owns '{first_path}', {second} owns '{second_path}'")]
    OverlappingClaims {
        first: StepId,
        second: StepId,
        first_path: String,
        second_path: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{info, risk};

    #[test]
    fn ownership_is_disjoint_for_every_category() {
        for category in Category::ALL {
            OwnershipTable::for_category(category)
                .check_disjoint()
                .unwrap_or_else(|e| panic!("{category}: {e}"));
        }
    }

    #[test]
    fn shared_bag_is_split_by_key() {
        let table = OwnershipTable::for_category(Category::Property);
        assert!(table.owns(StepId::RiskFactors, &risk("roofType")));
        assert!(table.owns(StepId::SecurityFeatures, &risk("alarmSystem")));
        assert!(!table.owns(StepId::RiskFactors, &risk("alarmSystem")));
        assert!(!table.owns(StepId::SecurityFeatures, &risk("roofType")));
    }

    #[test]
    fn owner_lookup() {
        let table = OwnershipTable::for_category(Category::Vehicle);
        assert_eq!(
            table.owner_of(&paths::personal::EMAIL),
            Some(StepId::PersonalInfo)
        );
        assert_eq!(
            table.owner_of(&paths::claims::NUMBER_OF_CLAIMS),
            Some(StepId::CurrentSituation)
        );
        assert_eq!(table.owner_of(&info("vehicleMake")), Some(StepId::VehicleDetails));
        assert_eq!(table.owner_of(&info("recordsHeld")), None);
    }

    #[test]
    fn company_step_owns_contact_person() {
        let table = OwnershipTable::for_category(Category::Business);
        assert!(table.owns(StepId::CompanyInfo, &paths::personal::EMAIL));
        assert!(table.owned(StepId::PersonalInfo).is_empty());
    }

    #[test]
    fn review_owns_nothing() {
        let table = OwnershipTable::for_category(Category::Travel);
        assert!(table.owned(StepId::Review).is_empty());
    }

    #[test]
    fn overlapping_claims_are_reported() {
        let mut table = OwnershipTable::for_category(Category::Travel);
        table
            .owned
            .get_mut(&StepId::Review)
            .unwrap()
            .push(paths::personal::EMAIL);
        assert!(matches!(
            table.check_disjoint(),
            Err(OwnershipError::OverlappingClaims { .. })
        ));
    }
}
