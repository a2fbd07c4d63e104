use chrono::{TimeZone, Utc};
use intake_form::{FieldValue, FormState, Section};
use intake_schema::paths::{claims, co_insured, consent, personal};
use intake_schema::{info, risk, step_ids, steps, Category, FieldPath, StepId};
use intake_test_utils::{any_category, valid_form, with_co_insured, SIGNATURE_DATA_URL};
use intake_validation::{Check, ErrorKind, ValidatorRegistry};
use intake_wizard::{
    Advance, FixedClock, Representative, Retreat, SignatureArtifact, WizardConfig, WizardController,
    WizardError, WizardSession,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn controller() -> WizardController {
    let at = Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap();
    WizardController::with_clock(WizardConfig::default(), FixedClock(at))
}

/// Write every leaf of `form` through the controller
fn fill(controller: &WizardController, session: &mut WizardSession, form: &FormState) {
    for (path, value) in form.leaves() {
        controller.set_field(session, &path, value).unwrap();
    }
}

fn filled_session(controller: &WizardController, category: Category) -> WizardSession {
    let mut session = controller.start(category.as_str(), None).unwrap();
    fill(controller, &mut session, &valid_form(category));
    session
}

#[test]
fn test_unknown_category_is_rejected() {
    let err = controller().start("boats", None).unwrap_err();
    assert!(matches!(err, WizardError::Catalog(_)));
}

#[test]
fn test_start_matches_catalog() {
    let session = controller().start("construction", None).unwrap();
    assert_eq!(session.category(), Category::Construction);
    assert_eq!(session.steps(), steps(Category::Construction).as_slice());
    assert_eq!(session.current_step(), StepId::CompanyInfo);
    assert!(session.errors().is_empty());
}

#[test]
fn test_complete_walk_submits_every_category() {
    let controller = controller();
    for category in Category::ALL {
        let mut session = filled_session(&controller, category);
        let total = session.steps().len();
        let mut record = None;

        for _ in 0..total {
            match controller.advance(&mut session).unwrap() {
                Advance::Moved { .. } => {}
                Advance::Submitted(r) => record = Some(r),
                Advance::Blocked { step, errors } => {
                    panic!("{category}/{step} blocked: {:?}", errors.messages())
                }
            }
        }

        let record = record.unwrap_or_else(|| panic!("{category} never submitted"));
        assert_eq!(record.category, category);
        assert!(record.consent_given);
        assert_eq!(record.digital_signature, SIGNATURE_DATA_URL);
        assert!(session.is_submitted());
        assert_eq!(session.progress().percent, 100);
    }
}

#[test]
fn test_submitted_session_rejects_mutation() {
    let controller = controller();
    let mut session = filled_session(&controller, Category::Travel);
    let total = session.steps().len();
    controller.go_to(&mut session, 0).unwrap();
    for _ in 0..total {
        controller.advance(&mut session).unwrap();
    }
    assert!(session.is_submitted());

    assert!(matches!(
        controller.advance(&mut session),
        Err(WizardError::AlreadySubmitted(_))
    ));
    assert!(matches!(
        controller.retreat(&mut session),
        Err(WizardError::AlreadySubmitted(_))
    ));
    assert!(matches!(
        controller.set_field(&mut session, &personal::FIRST_NAME, "Lindiwe".into()),
        Err(WizardError::AlreadySubmitted(_))
    ));
}

#[test]
fn test_blocked_advance_merges_step_errors() {
    let controller = controller();
    let mut session = controller.start("vehicle", None).unwrap();
    let outcome = controller.advance(&mut session).unwrap();

    let Advance::Blocked { step, errors } = outcome else {
        panic!("expected a blocked advance");
    };
    assert_eq!(step, StepId::PersonalInfo);
    assert_eq!(session.current_step_index(), 0);
    assert_eq!(session.errors(), &errors);
    assert_eq!(
        session.field_error(&personal::EMAIL).map(|e| e.message.as_str()),
        Some("Email is required")
    );
}

#[test]
fn test_successful_advance_clears_only_its_own_errors() {
    let controller = controller();
    let mut session = controller.start("property", None).unwrap();

    // Record errors for the property details page, then return to the start
    fill(&controller, &mut session, &valid_form(Category::Property));
    let property_index = step_ids(Category::Property)
        .iter()
        .position(|s| *s == StepId::PropertyDetails)
        .unwrap();
    for _ in 0..property_index {
        assert!(!controller.advance(&mut session).unwrap().is_blocked());
    }
    controller
        .set_field(&mut session, &info("propertyAddress"), "".into())
        .unwrap();
    assert!(controller.advance(&mut session).unwrap().is_blocked());
    assert!(session.field_error(&info("propertyAddress")).is_some());

    controller.go_to(&mut session, 0).unwrap();
    controller
        .set_field(&mut session, &personal::CITY, "".into())
        .unwrap();
    assert!(controller.advance(&mut session).unwrap().is_blocked());
    controller
        .set_field(&mut session, &personal::CITY, "Cape Town".into())
        .unwrap();
    assert!(!controller.advance(&mut session).unwrap().is_blocked());

    assert!(session.field_error(&personal::CITY).is_none());
    assert!(session.field_error(&info("propertyAddress")).is_some());
}

#[test]
fn test_retreat_never_validates() {
    let controller = controller();
    let mut session = filled_session(&controller, Category::Events);
    controller.advance(&mut session).unwrap();
    controller.advance(&mut session).unwrap();
    controller
        .set_field(&mut session, &risk("expectedAttendance"), "".into())
        .unwrap();

    assert_eq!(
        controller.retreat(&mut session).unwrap(),
        Retreat::Moved {
            from: StepId::CoverageNeeds,
            to: StepId::CurrentSituation
        }
    );
    assert_eq!(controller.retreat(&mut session).unwrap(), Retreat::Moved {
        from: StepId::CurrentSituation,
        to: StepId::CompanyInfo
    });
    assert_eq!(controller.retreat(&mut session).unwrap(), Retreat::Exit);
    assert_eq!(session.current_step_index(), 0);
}

#[test]
fn test_go_to_is_backward_only() {
    let controller = controller();
    let mut session = filled_session(&controller, Category::Travel);
    controller.advance(&mut session).unwrap();
    controller.advance(&mut session).unwrap();

    assert!(matches!(
        controller.go_to(&mut session, 3),
        Err(WizardError::ForwardJump { from: 2, to: 3 })
    ));
    assert!(matches!(
        controller.go_to(&mut session, 99),
        Err(WizardError::InvalidStepIndex { index: 99, .. })
    ));
    assert_eq!(controller.go_to(&mut session, 1).unwrap(), StepId::CurrentSituation);

    let locked = WizardController::new(WizardConfig::new().with_backward_jumps(false));
    assert!(matches!(
        locked.go_to(&mut session, 0),
        Err(WizardError::JumpsDisabled)
    ));
}

#[test]
fn test_schema_rejects_foreign_fields() {
    let controller = controller();
    let mut session = controller.start("travel", None).unwrap();
    let err = controller
        .set_field(&mut session, &info("vehicleMake"), "Toyota".into())
        .unwrap_err();
    assert!(err.is_recoverable());
    assert!(matches!(err, WizardError::Form(_)));

    let err = controller
        .set_field(&mut session, &info("travellers"), true.into())
        .unwrap_err();
    assert!(matches!(err, WizardError::Form(_)));

    let err = controller
        .set_section(&mut session, Section::PersonalInfo, "first.name", "x")
        .unwrap_err();
    assert!(matches!(err, WizardError::Path(_)));
}

#[test]
fn test_editing_clears_field_error() {
    let controller = controller();
    let mut session = controller.start("travel", None).unwrap();
    controller.advance(&mut session).unwrap();
    assert!(session.field_error(&personal::FIRST_NAME).is_some());

    controller
        .set_section(&mut session, Section::PersonalInfo, "firstName", "Thandi")
        .unwrap();
    assert!(session.field_error(&personal::FIRST_NAME).is_none());
    assert!(session.field_error(&personal::LAST_NAME).is_some());
}

#[test]
fn test_terminal_gate_needs_consent_and_signature() {
    let controller = controller();
    let mut session = filled_session(&controller, Category::PortablePossessions);
    controller.set_consent(&mut session, false).unwrap();
    controller
        .set_field(&mut session, &consent::DIGITAL_SIGNATURE, "".into())
        .unwrap();
    let last = session.steps().len() - 1;
    while session.current_step_index() < last {
        assert!(!controller.advance(&mut session).unwrap().is_blocked());
    }

    let Advance::Blocked { errors, .. } = controller.advance(&mut session).unwrap() else {
        panic!("consent step must block");
    };
    assert_eq!(
        errors.messages().keys().cloned().collect::<Vec<_>>(),
        vec![
            consent::CONSENT_GIVEN.as_str().to_string(),
            consent::DIGITAL_SIGNATURE.as_str().to_string()
        ]
    );

    controller.set_consent(&mut session, true).unwrap();
    assert!(controller.advance(&mut session).unwrap().is_blocked());

    controller
        .set_signature(&mut session, SignatureArtifact::uploaded(SIGNATURE_DATA_URL, "signature.png"))
        .unwrap();
    let Advance::Submitted(record) = controller.advance(&mut session).unwrap() else {
        panic!("expected submission");
    };
    assert_eq!(record.signature_file_name.as_deref(), Some("signature.png"));
    let json = record.to_json().unwrap();
    assert_eq!(json["consentTimestamp"], "2025-03-01T09:30:00Z");
    assert_eq!(json["insuranceInfo"]["itemDescription"], "Canon EOS R6");
}

#[test]
fn test_unticking_claims_clears_dependents_and_errors() {
    let controller = controller();
    let mut session = filled_session(&controller, Category::Vehicle);
    controller.advance(&mut session).unwrap();
    controller
        .set_field(&mut session, &claims::HAS_CLAIMS_LAST_THREE_YEARS, true.into())
        .unwrap();
    controller
        .set_field(&mut session, &claims::NUMBER_OF_CLAIMS, FieldValue::from(2_i64))
        .unwrap();

    let Advance::Blocked { errors, .. } = controller.advance(&mut session).unwrap() else {
        panic!("claims details are missing");
    };
    assert_eq!(
        errors.get(&claims::MULTIPLE_CLAIMS_EXPLANATION).map(|e| e.kind),
        Some(ErrorKind::CrossFieldThreshold)
    );
    assert_eq!(
        errors.get(&claims::DAMAGE_TYPE).map(|e| e.kind),
        Some(ErrorKind::MissingRequired)
    );

    controller
        .set_field(&mut session, &claims::HAS_CLAIMS_LAST_THREE_YEARS, false.into())
        .unwrap();
    assert!(session.errors().is_empty(), "{:?}", session.errors().messages());
    assert_eq!(session.form().get(&claims::NUMBER_OF_CLAIMS), Some(&FieldValue::from("")));
    assert!(!controller.advance(&mut session).unwrap().is_blocked());
}

#[test]
fn test_co_insured_opt_out_drops_record_fields() {
    let controller = controller();
    let mut session = controller.start("property", None).unwrap();
    fill(&controller, &mut session, &with_co_insured(valid_form(Category::Property)));
    assert!(session.form().is_filled(&co_insured::FIRST_NAME));

    controller
        .set_field(&mut session, &personal::HAS_CO_INSURED, false.into())
        .unwrap();
    assert_eq!(session.form().get(&co_insured::FIRST_NAME), None);
    assert!(controller.validate_step(&session, StepId::PersonalInfo).unwrap().is_empty());
}

#[test]
fn test_review_summary_reports_each_step() {
    let controller = controller();
    let mut session = controller.start("liability", None).unwrap();
    controller.advance(&mut session).unwrap();
    let summary = controller.review_summary(&session).unwrap();

    assert_eq!(summary.len(), session.steps().len());
    let company = &summary[0];
    assert_eq!(company.step.id, StepId::CompanyInfo);
    assert!(company.known_errors > 0);
    assert_eq!(company.known_errors, company.outstanding_errors);
    assert!(summary.iter().find(|s| s.step.id == StepId::Review).unwrap().is_complete());
}

#[test]
fn test_representative_passes_through() {
    let controller = controller();
    let rep = Representative {
        name: Some("Pieter van Wyk".into()),
        code: Some("BRK-042".into()),
        ..Representative::default()
    };
    let mut session = controller.start("travel", Some(rep.clone())).unwrap();
    fill(&controller, &mut session, &valid_form(Category::Travel));
    let total = session.steps().len();
    let mut submitted = None;
    for _ in 0..total {
        if let Advance::Submitted(record) = controller.advance(&mut session).unwrap() {
            submitted = Some(record);
        }
    }
    assert_eq!(submitted.unwrap().representative, Some(rep));
}

/// `(step index, path)` for every unguarded required field, across all steps
fn plainly_required(category: Category) -> Vec<(usize, FieldPath)> {
    let order = step_ids(category);
    ValidatorRegistry::for_category(category)
        .rules()
        .filter(|(_, rule)| rule.guard().is_none() && matches!(rule.check(), Check::Required))
        .filter_map(|(step, rule)| {
            let index = order.iter().position(|id| *id == step)?;
            Some((index, rule.path().clone()))
        })
        .collect()
}

#[test]
fn test_gating_candidates_cover_middle_and_last_steps() {
    for category in Category::ALL {
        let last = step_ids(category).len() - 1;
        let indices: Vec<usize> = plainly_required(category).into_iter().map(|(i, _)| i).collect();
        assert!(indices.iter().any(|&i| i > 0 && i < last), "{category}");
        assert!(indices.contains(&last), "{category}");
    }
}

proptest! {
    #[test]
    fn prop_advance_never_moves_past_failing_step(category in any_category(), pick in any::<prop::sample::Index>()) {
        let candidates = plainly_required(category);
        let (target, path) = pick.get(&candidates).clone();

        let controller = controller();
        let mut session = controller.start(category.as_str(), None).unwrap();
        fill(&controller, &mut session, &valid_form(category).remove_path(&path));
        for _ in 0..target {
            prop_assert!(!controller.advance(&mut session).unwrap().is_blocked());
        }
        prop_assert_eq!(session.current_step_index(), target);

        match controller.advance(&mut session).unwrap() {
            Advance::Blocked { step, errors } => {
                prop_assert_eq!(step, session.current_step());
                prop_assert!(errors.contains(&path), "{path} not reported");
            }
            other => prop_assert!(false, "advanced past blank {path}: {other:?}"),
        }
        prop_assert_eq!(session.current_step_index(), target);
        prop_assert!(session.field_error(&path).is_some());
    }

    #[test]
    fn prop_retreat_always_succeeds(category in any_category(), forward in 0usize..8) {
        let controller = controller();
        let mut session = filled_session(&controller, category);
        let last = session.steps().len() - 1;
        for _ in 0..forward.min(last) {
            controller.advance(&mut session).unwrap();
        }
        let mut exits = 0;
        for _ in 0..=forward.min(last) {
            match controller.retreat(&mut session).unwrap() {
                Retreat::Moved { .. } => {}
                Retreat::Exit => exits += 1,
            }
        }
        prop_assert_eq!(exits, 1);
        prop_assert_eq!(session.current_step_index(), 0);
    }

    #[test]
    fn prop_progress_tracks_successful_advances(category in any_category(), forward in 0usize..8) {
        let controller = controller();
        let mut session = filled_session(&controller, category);
        let total = session.steps().len();
        let mut last_percent = session.progress().percent;
        for _ in 0..forward.min(total - 1) {
            prop_assert!(!controller.advance(&mut session).unwrap().is_blocked());
            let progress = session.progress();
            prop_assert_eq!(progress.current, session.current_step_index() + 1);
            prop_assert_eq!(progress.total, total);
            prop_assert!(progress.percent > last_percent);
            last_percent = progress.percent;
        }
    }
}
