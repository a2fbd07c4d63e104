//! Property steps

use intake_schema::{info, risk, Category};

use crate::formats::Format;
use crate::rules::{Bounds, Condition, Rule};

pub(super) fn property_details(_category: Category) -> Vec<Rule> {
    vec![
        Rule::required(info("propertyType")),
        Rule::required(info("propertyAddress")),
        Rule::required(info("propertyPostalCode")).labelled("Postal code"),
        Rule::format(info("propertyPostalCode"), Format::PostalCode).labelled("Postal code"),
        Rule::required(info("buildingValue")),
        Rule::range(info("buildingValue"), Bounds::greater_than(0.0)),
        Rule::range(info("contentsValue"), Bounds::at_least(0.0)),
        Rule::required(info("ownership")),
        Rule::required(info("bondHolder")).when(Condition::Equals(info("ownership"), "bonded")),
    ]
}

pub(super) fn security_features(_category: Category) -> Vec<Rule> {
    vec![Rule::required(risk("armedResponseProvider"))
        .when(Condition::IsTrue(risk("armedResponse")))]
}
