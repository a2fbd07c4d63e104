//! Review, declaration and consent

use intake_schema::paths::{consent as consent_fields, disclosure as disclosure_fields};
use intake_schema::Category;

use crate::rules::Rule;

pub(super) fn review(_category: Category) -> Vec<Rule> {
    Vec::new()
}

pub(super) fn disclosure(_category: Category) -> Vec<Rule> {
    vec![
        Rule::accepted(disclosure_fields::INFORMATION_ACCURATE)
            .with_message("Please confirm that the information provided is accurate"),
        Rule::accepted(disclosure_fields::MATERIAL_FACTS_DISCLOSED)
            .with_message("Please confirm that all material facts have been disclosed"),
        Rule::accepted(disclosure_fields::TERMS_ACCEPTED).with_message("Please accept the terms and conditions"),
    ]
}

/// Terminal gate: explicit consent plus a signature
pub(super) fn consent(_category: Category) -> Vec<Rule> {
    vec![
        Rule::accepted(consent_fields::CONSENT_GIVEN).with_message("You must give consent to submit"),
        Rule::required(consent_fields::DIGITAL_SIGNATURE).with_message("A signature is required"),
    ]
}
