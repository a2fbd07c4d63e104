//! Signature capture and the final submission record

use chrono::{DateTime, Utc};
use intake_form::{FieldValue, FormState, Record, Section};
use intake_schema::paths::consent;
use intake_schema::Category;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

use crate::error::{Result, WizardError};
use crate::session::Representative;

/// How the signature was captured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignatureType {
    #[default]
    Drawn,
    Uploaded,
}

impl SignatureType {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            SignatureType::Drawn => "drawn",
            SignatureType::Uploaded => "uploaded",
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "drawn" => Some(SignatureType::Drawn),
            "uploaded" => Some(SignatureType::Uploaded),
            _ => None,
        }
    }
}

impl Display for SignatureType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Already-resolved signature (drawing or upload), treated as an opaque string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureArtifact {
    /// Data URL or other opaque reference
    pub data: String,
    pub signature_type: SignatureType,
    /// Original file name of an uploaded signature
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

impl SignatureArtifact {
    /// Signature drawn on screen
    #[must_use]
    pub fn drawn(data: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            signature_type: SignatureType::Drawn,
            file_name: None,
        }
    }

    /// Uploaded signature image
    #[must_use]
    pub fn uploaded(data: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            signature_type: SignatureType::Uploaded,
            file_name: Some(file_name.into()),
        }
    }
}

/// Record handed to the downstream consumer on submission
///
/// The form is flattened at the top level without its consent section; the
/// consent fields appear alongside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    #[serde(flatten)]
    pub form: Record,
    pub category: Category,
    pub consent_given: bool,
    pub consent_timestamp: DateTime<Utc>,
    pub digital_signature: String,
    pub signature_type: SignatureType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature_file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub representative: Option<Representative>,
}

impl SubmissionRecord {
    /// Assemble the record from a completed form
    ///
    /// # Errors
    /// Returns [`WizardError::MissingConsent`] unless consent is given and a
    /// signature is present.
    pub fn build(
        category: Category,
        form: &FormState,
        representative: Option<Representative>,
        consent_timestamp: DateTime<Utc>,
    ) -> Result<Self> {
        let consent_given = form.get(&consent::CONSENT_GIVEN).and_then(FieldValue::as_bool) == Some(true);
        let digital_signature = form
            .get(&consent::DIGITAL_SIGNATURE)
            .and_then(FieldValue::as_text)
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string);
        let Some(digital_signature) = digital_signature.filter(|_| consent_given) else {
            return Err(WizardError::MissingConsent);
        };

        let signature_type = form
            .get(&consent::SIGNATURE_TYPE)
            .and_then(FieldValue::as_text)
            .and_then(SignatureType::parse)
            .unwrap_or_default();
        let signature_file_name = form
            .get(&consent::SIGNATURE_FILE_NAME)
            .and_then(FieldValue::as_text)
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string);

        Ok(Self {
            form: form.without_section(Section::Consent).as_record().clone(),
            category,
            consent_given,
            consent_timestamp,
            digital_signature,
            signature_type,
            signature_file_name,
            representative,
        })
    }

    /// JSON document for the downstream consumer
    ///
    /// # Errors
    /// Propagates serialisation failures from `serde_json`.
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use intake_schema::paths;
    use intake_test_utils::{valid_form, SIGNATURE_DATA_URL};
    use pretty_assertions::assert_eq;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap()
    }

    #[test]
    fn record_flattens_form_without_consent() {
        let form = valid_form(Category::Travel);
        let record = SubmissionRecord::build(Category::Travel, &form, None, at()).unwrap();
        let json = record.to_json().unwrap();

        assert_eq!(json["category"], "travel");
        assert_eq!(json["consentGiven"], true);
        assert_eq!(json["consentTimestamp"], "2025-03-01T09:30:00Z");
        assert_eq!(json["digitalSignature"], SIGNATURE_DATA_URL);
        assert_eq!(json["signatureType"], "drawn");
        assert_eq!(json["personalInfo"]["firstName"], "Thandi");
        assert!(json.get("consent").is_none());
        assert!(json.get("signatureFileName").is_none());
    }

    #[test]
    fn uploaded_signature_keeps_file_name() {
        let form = valid_form(Category::Travel)
            .set_path(&paths::consent::SIGNATURE_TYPE, "uploaded".into())
            .set_path(&paths::consent::SIGNATURE_FILE_NAME, "signature.png".into());
        let record = SubmissionRecord::build(Category::Travel, &form, None, at()).unwrap();
        assert_eq!(record.signature_type, SignatureType::Uploaded);
        assert_eq!(record.signature_file_name.as_deref(), Some("signature.png"));
    }

    #[test]
    fn consent_and_signature_are_both_required() {
        let unsigned = valid_form(Category::Cyber).set_path(&paths::consent::DIGITAL_SIGNATURE, "".into());
        assert!(matches!(
            SubmissionRecord::build(Category::Cyber, &unsigned, None, at()),
            Err(WizardError::MissingConsent)
        ));

        let withheld = valid_form(Category::Cyber).set_path(&paths::consent::CONSENT_GIVEN, false.into());
        assert!(matches!(
            SubmissionRecord::build(Category::Cyber, &withheld, None, at()),
            Err(WizardError::MissingConsent)
        ));
    }

    #[test]
    fn artifact_constructors() {
        let drawn = SignatureArtifact::drawn("data:image/png;base64,AAAA");
        assert_eq!(drawn.signature_type, SignatureType::Drawn);
        assert!(drawn.file_name.is_none());
        let uploaded = SignatureArtifact::uploaded("data:image/png;base64,AAAA", "sig.png");
        assert_eq!(uploaded.signature_type.as_str(), "uploaded");
    }
}
