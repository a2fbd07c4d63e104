use intake_form::{FieldValue, FormState, Section};
use intake_schema::{Category, FieldSchema};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn any_category() -> impl Strategy<Value = Category> {
    prop::sample::select(Category::ALL.to_vec())
}

fn any_text() -> impl Strategy<Value = FieldValue> {
    "[A-Za-z0-9 ]{0,16}".prop_map(FieldValue::from)
}

#[test]
fn test_every_preallocated_leaf_is_readable() {
    for category in Category::ALL {
        let schema = FieldSchema::for_category(category);
        let state = FormState::for_category(category);
        for (path, kind) in schema.preallocated() {
            assert_eq!(
                state.get(path),
                Some(&FieldValue::default_for(kind)),
                "{category}: {path}"
            );
        }
    }
}

#[test]
fn test_snapshot_round_trip_preserves_values() {
    let state = FormState::for_category(Category::Vehicle)
        .set_section(Section::PersonalInfo, "email", "thandi@example.co.za")
        .unwrap()
        .set_section(Section::InsuranceInfo, "vehicleYear", 2019_i64)
        .unwrap();
    let json = serde_json::to_string(&state).unwrap();
    let back: FormState = serde_json::from_str(&json).unwrap();
    assert_eq!(back, state);
}

proptest! {
    #[test]
    fn prop_update_leaves_prior_state_unchanged(
        category in any_category(),
        index in any::<prop::sample::Index>(),
        value in any_text(),
    ) {
        let schema = FieldSchema::for_category(category);
        let leaves: Vec<_> = schema.preallocated().map(|(p, _)| p.clone()).collect();
        let path = index.get(&leaves);

        let before = FormState::for_category(category);
        let snapshot = before.clone();
        let after = before.set_path(path, value.clone());

        prop_assert_eq!(&before, &snapshot);
        prop_assert_eq!(after.get(path), Some(&value));
    }

    #[test]
    fn prop_set_path_touches_only_its_leaf(
        category in any_category(),
        index in any::<prop::sample::Index>(),
        value in any_text(),
    ) {
        let schema = FieldSchema::for_category(category);
        let leaves: Vec<_> = schema.preallocated().map(|(p, _)| p.clone()).collect();
        let target = index.get(&leaves);

        let before = FormState::for_category(category);
        let after = before.set_path(target, value);

        for other in leaves.iter().filter(|p| *p != target) {
            prop_assert_eq!(before.get(other), after.get(other), "{}", other);
        }
    }
}
