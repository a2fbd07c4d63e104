//! Specialty-line steps: aviation/marine, construction, agriculture, events,
//! travel and portable possessions

use intake_schema::paths::project;
use intake_schema::{info, risk, Category};

use crate::formats::Format;
use crate::rules::{Bounds, Condition, Rule};

/// Items worth this much or more need a valuation certificate
const VALUATION_CERTIFICATE_THRESHOLD: f64 = 25_000.0;

pub(super) fn craft_details(_category: Category) -> Vec<Rule> {
    vec![
        Rule::required(info("craftMake")).labelled("Make"),
        Rule::required(info("craftModel")).labelled("Model"),
        Rule::required(info("craftYear")).labelled("Year"),
        Rule::range(info("craftYear"), Bounds::between(1900.0, 2100.0)).labelled("Year"),
        Rule::required(info("craftValue")),
        Rule::range(info("craftValue"), Bounds::greater_than(0.0)),
        Rule::required(info("registrationMark")),
    ]
}

pub(super) fn operator_experience(_category: Category) -> Vec<Rule> {
    vec![
        Rule::required(info("operatorLicence")),
        Rule::required(info("operatorHours")),
        Rule::range(info("operatorHours"), Bounds::at_least(0.0)),
        Rule::required(info("incidentDetails"))
            .when(Condition::IsTrue(info("incidentsLastFiveYears"))),
    ]
}

pub(super) fn project_details(_category: Category) -> Vec<Rule> {
    vec![
        Rule::required(project::PROJECT_NAME),
        Rule::required(project::PROJECT_DESCRIPTION),
        Rule::required(project::CONTRACT_VALUE),
        Rule::range(project::CONTRACT_VALUE, Bounds::at_least(1.0)),
        Rule::required(project::PROJECT_START_DATE).labelled("Start date"),
        Rule::format(project::PROJECT_START_DATE, Format::IsoDate).labelled("Start date"),
        Rule::required(project::PROJECT_END_DATE).labelled("End date"),
        Rule::format(project::PROJECT_END_DATE, Format::IsoDate).labelled("End date"),
        Rule::after(project::PROJECT_END_DATE, project::PROJECT_START_DATE).labelled("End date"),
        Rule::required(project::SITE_ADDRESS),
        Rule::required(project::SITE_POSTAL_CODE),
        Rule::format(project::SITE_POSTAL_CODE, Format::PostalCode),
    ]
}

pub(super) fn contractor_details(_category: Category) -> Vec<Rule> {
    let subcontracting = || Condition::IsTrue(info("subcontractorsUsed"));
    vec![
        Rule::required(info("principalName")),
        Rule::required(info("contractType")),
        Rule::required(info("subcontractorCount")).when(subcontracting()),
        Rule::range(info("subcontractorCount"), Bounds::at_least(1.0)).when(subcontracting()),
    ]
}

pub(super) fn site_risk(_category: Category) -> Vec<Rule> {
    let at_height = || Condition::IsTrue(risk("workAtHeight"));
    vec![
        Rule::range(risk("excavationDepth"), Bounds::at_least(0.0)),
        Rule::required(risk("maxWorkingHeight")).when(at_height()),
        Rule::range(risk("maxWorkingHeight"), Bounds::greater_than(0.0)).when(at_height()),
    ]
}

pub(super) fn farm_details(_category: Category) -> Vec<Rule> {
    vec![
        Rule::required(info("farmSize")),
        Rule::range(info("farmSize"), Bounds::greater_than(0.0)),
        Rule::required(info("farmType")),
        Rule::required(info("district")),
    ]
}

pub(super) fn livestock_crops(_category: Category) -> Vec<Rule> {
    let has_livestock = || Condition::NumberAtLeast(info("livestockCount"), 1.0);
    vec![
        Rule::range(info("livestockCount"), Bounds::at_least(0.0)),
        Rule::required(info("livestockValue")).when_threshold(has_livestock()),
        Rule::range(info("livestockValue"), Bounds::greater_than(0.0)).when_threshold(has_livestock()),
        Rule::required(info("cropValue")).when(Condition::NonEmpty(info("cropTypes"))),
    ]
}

pub(super) fn event_details(_category: Category) -> Vec<Rule> {
    vec![
        Rule::required(info("eventName")),
        Rule::required(info("eventType")),
        Rule::required(info("eventDate")),
        Rule::format(info("eventDate"), Format::IsoDate),
        Rule::required(info("eventDurationDays")).labelled("Duration"),
        Rule::range(info("eventDurationDays"), Bounds::between(1.0, 30.0)).labelled("Duration"),
    ]
}

pub(super) fn venue_details(_category: Category) -> Vec<Rule> {
    vec![
        Rule::required(info("venueName")),
        Rule::required(info("venueAddress")),
        Rule::required(info("venueCapacity")),
        Rule::range(info("venueCapacity"), Bounds::at_least(1.0)),
        Rule::at_least_field(info("venueCapacity"), risk("expectedAttendance")),
    ]
}

pub(super) fn trip_details(_category: Category) -> Vec<Rule> {
    vec![
        Rule::required(info("destination")),
        Rule::required(info("departureDate")),
        Rule::format(info("departureDate"), Format::IsoDate),
        Rule::required(info("returnDate")),
        Rule::format(info("returnDate"), Format::IsoDate),
        Rule::after(info("returnDate"), info("departureDate")),
        Rule::required(info("travellers")).labelled("Number of travellers"),
        Rule::range(info("travellers"), Bounds::at_least(1.0)).labelled("Number of travellers"),
        Rule::required(info("tripPurpose")),
    ]
}

pub(super) fn item_schedule(_category: Category) -> Vec<Rule> {
    vec![
        Rule::required(info("itemDescription")),
        Rule::required(info("itemCategory")),
        Rule::required(info("itemValue")),
        Rule::range(info("itemValue"), Bounds::greater_than(0.0)),
        Rule::required(info("valuationCertificate")).when_threshold(Condition::NumberAtLeast(
            info("itemValue"),
            VALUATION_CERTIFICATE_THRESHOLD,
        )),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_map::ErrorKind;
    use crate::rules::evaluate_all;
    use intake_form::FormState;

    fn filled_project() -> FormState {
        FormState::for_category(Category::Construction)
            .set_path(&project::PROJECT_NAME, "N2 bridge widening".into())
            .set_path(&project::PROJECT_DESCRIPTION, "Widening of two spans".into())
            .set_path(&project::CONTRACT_VALUE, "12500000".into())
            .set_path(&project::PROJECT_START_DATE, "2025-02-01".into())
            .set_path(&project::PROJECT_END_DATE, "2026-01-31".into())
            .set_path(&project::SITE_ADDRESS, "N2, Somerset West".into())
            .set_path(&project::SITE_POSTAL_CODE, "7130".into())
    }

    #[test]
    fn project_dates_are_ordered() {
        let rules = project_details(Category::Construction);
        assert!(evaluate_all(&rules, &filled_project()).is_empty());

        let reversed = filled_project().set_path(&project::PROJECT_END_DATE, "2024-12-31".into());
        let errors = evaluate_all(&rules, &reversed);
        assert_eq!(
            errors.get(&project::PROJECT_END_DATE).map(|e| e.message.as_str()),
            Some("End date must be after project start date")
        );
    }

    #[test]
    fn contract_value_must_be_at_least_one() {
        let form = filled_project().set_path(&project::CONTRACT_VALUE, "0".into());
        assert_eq!(
            evaluate_all(&project_details(Category::Construction), &form)
                .get(&project::CONTRACT_VALUE)
                .map(|e| e.kind),
            Some(ErrorKind::RangeInvalid)
        );
    }

    #[test]
    fn venue_must_hold_expected_attendance() {
        let form = FormState::for_category(Category::Events)
            .set_path(&info("venueName"), "Kirstenbosch".into())
            .set_path(&info("venueAddress"), "Rhodes Dr".into())
            .set_path(&risk("expectedAttendance"), "800".into())
            .set_path(&info("venueCapacity"), "600".into());
        let errors = evaluate_all(&venue_details(Category::Events), &form);
        assert_eq!(errors.len(), 1);
        assert!(errors.contains(&info("venueCapacity")));
    }

    #[test]
    fn valuable_items_need_certificate() {
        let form = FormState::for_category(Category::PortablePossessions)
            .set_path(&info("itemDescription"), "Camera".into())
            .set_path(&info("itemCategory"), "electronics".into())
            .set_path(&info("itemValue"), "24999".into());
        assert!(evaluate_all(&item_schedule(Category::PortablePossessions), &form).is_empty());

        let form = form.set_path(&info("itemValue"), "25000".into());
        assert_eq!(
            evaluate_all(&item_schedule(Category::PortablePossessions), &form)
                .get(&info("valuationCertificate"))
                .map(|e| e.kind),
            Some(ErrorKind::CrossFieldThreshold)
        );
    }
}
