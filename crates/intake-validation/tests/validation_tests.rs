use intake_form::{FieldValue, FormState};
use intake_schema::paths::{claims, consent, personal};
use intake_schema::{info, risk, step_ids, Category, FieldSchema, OwnershipTable, StepId};
use intake_test_utils::{any_category, blank_form, valid_form, with_co_insured, INVALID_ID_NUMBER};
use intake_validation::{
    deactivated, validate, Check, ErrorKind, ErrorStateManager, ValidatorRegistry,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[test]
fn test_valid_forms_pass_every_step() {
    for category in Category::ALL {
        let registry = ValidatorRegistry::for_category(category);
        let form = valid_form(category);
        for step in step_ids(category) {
            let errors = registry.validate(step, &form);
            assert!(errors.is_empty(), "{category}/{step}: {:?}", errors.messages());
        }
    }
}

#[test]
fn test_valid_personal_forms_pass_with_co_insured() {
    for category in Category::ALL.into_iter().filter(|c| !c.is_business()) {
        let form = with_co_insured(valid_form(category));
        assert!(validate(StepId::PersonalInfo, &form, category).is_empty(), "{category}");
    }
}

#[test]
fn test_rule_paths_are_declared_in_schema() {
    for category in Category::ALL {
        let schema = FieldSchema::for_category(category);
        let registry = ValidatorRegistry::for_category(category);
        for (step, rule) in registry.rules() {
            assert!(schema.contains(rule.path()), "{category}/{step}: {}", rule.path());
            for read in rule.reads() {
                assert!(schema.contains(read), "{category}/{step}: reads {read}");
            }
            if let Check::After(other) | Check::AtLeastField(other) = rule.check() {
                assert!(schema.contains(other), "{category}/{step}: compares {other}");
            }
        }
    }
}

#[test]
fn test_rule_paths_are_owned_by_their_step() {
    for category in Category::ALL {
        let ownership = OwnershipTable::for_category(category);
        let registry = ValidatorRegistry::for_category(category);
        for (step, rule) in registry.rules() {
            assert!(ownership.owns(step, rule.path()), "{category}/{step}: {}", rule.path());
        }
    }
}

#[test]
fn test_blank_applicant_reports_missing_required() {
    let errors = validate(StepId::PersonalInfo, &blank_form(Category::Vehicle), Category::Vehicle);
    assert_eq!(
        errors.messages().get(personal::FIRST_NAME.as_str()).map(String::as_str),
        Some("First name is required")
    );
    assert!(errors.iter().all(|(_, e)| e.kind == ErrorKind::MissingRequired));
}

#[test]
fn test_id_checksum_is_enforced() {
    let form = valid_form(Category::Travel).set_path(&personal::ID_NUMBER, INVALID_ID_NUMBER.into());
    let errors = validate(StepId::PersonalInfo, &form, Category::Travel);
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors.get(&personal::ID_NUMBER).map(|e| e.kind),
        Some(ErrorKind::FormatInvalid)
    );
}

#[test]
fn test_conditional_field_follows_its_trigger() {
    let category = Category::Property;
    let base = valid_form(category);
    assert!(validate(StepId::SecurityFeatures, &base, category).is_empty());

    let no_provider = base.set_path(&risk("armedResponseProvider"), "".into());
    let errors = validate(StepId::SecurityFeatures, &no_provider, category);
    assert_eq!(
        errors.get(&risk("armedResponseProvider")).map(|e| e.kind),
        Some(ErrorKind::ConditionalRequired)
    );

    let untriggered = no_provider.set_path(&risk("armedResponse"), false.into());
    assert!(validate(StepId::SecurityFeatures, &untriggered, category).is_empty());
}

#[test]
fn test_threshold_field_follows_computed_relationship() {
    let category = Category::Vehicle;
    let claimed = valid_form(category)
        .set_path(&claims::HAS_CLAIMS_LAST_THREE_YEARS, true.into())
        .set_path(&claims::DAMAGE_TYPE, "collision".into())
        .set_path(&claims::INCIDENT_DESCRIPTION, "Rear-ended at a robot".into())
        .set_path(&claims::TOTAL_CLAIM_AMOUNT, FieldValue::from(18_000_i64))
        .set_path(&claims::NUMBER_OF_CLAIMS, FieldValue::from(1_i64));
    assert!(validate(StepId::CurrentSituation, &claimed, category).is_empty());

    let repeat = claimed.set_path(&claims::NUMBER_OF_CLAIMS, FieldValue::from(2_i64));
    let errors = validate(StepId::CurrentSituation, &repeat, category);
    assert_eq!(
        errors.get(&claims::MULTIPLE_CLAIMS_EXPLANATION).map(|e| e.kind),
        Some(ErrorKind::CrossFieldThreshold)
    );
}

#[test]
fn test_exact_claim_count_requires_more_than_two() {
    let category = Category::Vehicle;
    let form = valid_form(category)
        .set_path(&risk("previousClaims"), "more-than-two".into())
        .set_path(&risk("exactClaimCount"), FieldValue::from(2_i64));
    let errors = validate(StepId::RiskFactors, &form, category);
    assert_eq!(
        errors.get(&risk("exactClaimCount")).map(|e| e.kind),
        Some(ErrorKind::RangeInvalid)
    );
}

#[test]
fn test_terminal_step_needs_consent_and_signature() {
    let category = Category::Cyber;
    let form = valid_form(category).set_path(&consent::CONSENT_GIVEN, false.into());
    let errors = validate(StepId::Consent, &form, category);
    assert_eq!(
        errors.messages().get(consent::CONSENT_GIVEN.as_str()).map(String::as_str),
        Some("You must give consent to submit")
    );
}

#[test]
fn test_clearing_after_success_keeps_other_steps_errors() {
    let category = Category::Events;
    let registry = ValidatorRegistry::for_category(category);
    let manager = ErrorStateManager::for_category(category);
    let blank = blank_form(category);

    let mut errors = ErrorStateManager::merge(&Default::default(), &registry.validate(StepId::CompanyInfo, &blank));
    errors = ErrorStateManager::merge(&errors, &registry.validate(StepId::VenueDetails, &blank));
    let venue_errors = manager.errors_for_step(&errors, StepId::VenueDetails).len();
    assert!(venue_errors > 0);

    let cleared = manager.clear_for_step(&errors, StepId::CompanyInfo);
    assert_eq!(cleared.len(), venue_errors);
    assert!(cleared.contains(&info("venueName")));
}

#[test]
fn test_unticking_trigger_deactivates_dependents() {
    let category = Category::Property;
    let registry = ValidatorRegistry::for_category(category);
    let before = valid_form(category);
    let after = before.set_path(&risk("armedResponse"), false.into());
    let rules: Vec<_> = registry.rules().map(|(_, rule)| rule).collect();
    assert_eq!(deactivated(rules.iter().copied(), &before, &after), vec![risk("armedResponseProvider")]);
}

proptest! {
    #[test]
    fn prop_validation_is_idempotent(category in any_category(), blank in any::<bool>()) {
        let form = if blank { blank_form(category) } else { valid_form(category) };
        let registry = ValidatorRegistry::for_category(category);
        for step in step_ids(category) {
            prop_assert_eq!(registry.validate(step, &form), registry.validate(step, &form));
        }
    }

    #[test]
    fn prop_errors_stay_within_step_ownership(category in any_category()) {
        let ownership = OwnershipTable::for_category(category);
        let registry = ValidatorRegistry::for_category(category);
        let form = blank_form(category);
        for step in step_ids(category) {
            for path in registry.validate(step, &form).paths() {
                prop_assert!(ownership.owns(step, path), "{}/{}: {}", category, step, path);
            }
        }
    }

    #[test]
    fn prop_clear_for_step_removes_exactly_owned_entries(category in any_category()) {
        let registry = ValidatorRegistry::for_category(category);
        let manager = ErrorStateManager::for_category(category);
        let form = blank_form(category);
        let all = step_ids(category)
            .into_iter()
            .fold(Default::default(), |acc, step| ErrorStateManager::merge(&acc, &registry.validate(step, &form)));

        for step in step_ids(category) {
            let cleared = manager.clear_for_step(&all, step);
            let owned = manager.errors_for_step(&all, step);
            prop_assert_eq!(cleared.len() + owned.len(), all.len());
            prop_assert!(owned.paths().all(|p| !cleared.contains(p)));
        }
    }

    #[test]
    fn prop_budget_threshold_boundary(day in 0_i64..40) {
        let category = Category::Travel;
        let form = valid_form(category)
            .set_path(&intake_schema::paths::budget::DEBIT_ORDER_DAY, FieldValue::from(day));
        let errors = validate(StepId::Preferences, &form, category);
        prop_assert_eq!(errors.is_empty(), (1..=31).contains(&day));
    }
}

#[test]
fn test_blank_form_is_not_accidentally_valid() {
    for category in Category::ALL {
        let form: FormState = blank_form(category);
        let applicant = intake_schema::applicant_step(category);
        assert!(!validate(applicant, &form, category).is_empty(), "{category}");
    }
}
