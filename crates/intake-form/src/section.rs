//! Top-level sections of the form record

use intake_schema::{paths, FieldPath, PathError};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Named top-level section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Section {
    PersonalInfo,
    CompanyInfo,
    CoInsured,
    NeedsAnalysis,
    InsuranceInfo,
    Disclosure,
    Consent,
}

impl Section {
    /// Every section
    pub const ALL: [Section; 7] = [
        Section::PersonalInfo,
        Section::CompanyInfo,
        Section::CoInsured,
        Section::NeedsAnalysis,
        Section::InsuranceInfo,
        Section::Disclosure,
        Section::Consent,
    ];

    /// Root path of the section
    #[must_use]
    pub fn path(&self) -> FieldPath {
        match self {
            Section::PersonalInfo => paths::PERSONAL_INFO,
            Section::CompanyInfo => paths::COMPANY_INFO,
            Section::CoInsured => paths::CO_INSURED,
            Section::NeedsAnalysis => paths::NEEDS_ANALYSIS,
            Section::InsuranceInfo => paths::INSURANCE_INFO,
            Section::Disclosure => paths::DISCLOSURE,
            Section::Consent => paths::CONSENT,
        }
    }

    /// Record key of the section
    #[inline]
    #[must_use]
    pub fn key(&self) -> &'static str {
        match self {
            Section::PersonalInfo => "personalInfo",
            Section::CompanyInfo => "companyInfo",
            Section::CoInsured => "coInsured",
            Section::NeedsAnalysis => "needsAnalysis",
            Section::InsuranceInfo => "insuranceInfo",
            Section::Disclosure => "disclosure",
            Section::Consent => "consent",
        }
    }

    /// Path of a direct field of the section
    ///
    /// # Errors
    /// Returns [`PathError`] if `field` is not a single valid segment.
    pub fn field(&self, field: &str) -> Result<FieldPath, PathError> {
        if field.contains('.') {
            return Err(PathError::InvalidSegment(field.to_string()));
        }
        format!("{}.{}", self.key(), field).parse()
    }
}

impl Display for Section {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_key_matches_path() {
        for section in Section::ALL {
            assert_eq!(section.path().as_str(), section.key());
        }
    }

    #[test]
    fn section_field_paths() {
        assert_eq!(
            Section::PersonalInfo.field("email").unwrap(),
            paths::personal::EMAIL
        );
        assert!(Section::PersonalInfo.field("a.b").is_err());
        assert!(Section::PersonalInfo.field("").is_err());
    }
}
