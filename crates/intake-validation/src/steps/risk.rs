//! Risk-factor step: the `riskFactors` keys collected on the shared risk page

use intake_schema::{risk, Category};

use crate::rules::{Bounds, Condition, Rule};

fn claims_selector() -> Vec<Rule> {
    let many = || Condition::Equals(risk("previousClaims"), "more-than-two");
    vec![
        Rule::required(risk("previousClaims")),
        Rule::required(risk("exactClaimCount")).when_threshold(many()),
        Rule::range(risk("exactClaimCount"), Bounds::at_least(3.0)).when_threshold(many()),
    ]
}

fn detail_when(flag: &str, detail: &str) -> Rule {
    Rule::required(risk(detail)).when(Condition::IsTrue(risk(flag)))
}

pub(super) fn risk_factors(category: Category) -> Vec<Rule> {
    match category {
        Category::Vehicle => {
            let mut rules = claims_selector();
            rules.push(Rule::required(risk("overnightParking")));
            rules
        }
        Category::Property => vec![
            Rule::required(risk("constructionType")),
            Rule::required(risk("roofType")),
            Rule::required(risk("propertyOccupancy")),
        ],
        Category::Business => vec![
            Rule::required(risk("premisesType")),
            detail_when("hazardousMaterials", "hazardousMaterialsDetails")
                .labelled("Hazardous materials details"),
        ],
        Category::Transport => {
            let mut rules = claims_selector();
            rules.extend([
                Rule::required(risk("goodsType")),
                detail_when("hazardousGoods", "hazardousGoodsClass"),
            ]);
            rules
        }
        Category::Scheme => vec![
            Rule::required(risk("buildingAge")),
            Rule::range(risk("buildingAge"), Bounds::at_least(0.0)),
            Rule::required(risk("numberOfUnits")),
            Rule::range(risk("numberOfUnits"), Bounds::at_least(1.0)),
        ],
        Category::AviationMarine => vec![
            Rule::required(risk("craftType")),
            Rule::required(risk("storageLocation")),
            detail_when("commercialUse", "commercialUseDetails"),
        ],
        Category::Construction => vec![
            Rule::required(risk("siteSecurity")),
            detail_when("adjacentStructures", "adjacentStructuresDetails"),
        ],
        Category::Liability => vec![
            detail_when("publicAccess", "dailyVisitors"),
            Rule::range(risk("dailyVisitors"), Bounds::at_least(0.0))
                .when(Condition::IsTrue(risk("publicAccess"))),
        ],
        Category::Agriculture => vec![Rule::required(risk("droughtExposure"))],
        Category::Cyber => vec![
            Rule::required(risk("backupFrequency")),
            detail_when("previousBreach", "breachDetails"),
        ],
        Category::ProfessionalIndemnity => vec![
            Rule::required(risk("qualityControls")),
            detail_when("previousComplaints", "complaintsDetails"),
        ],
        Category::Events => vec![
            Rule::required(risk("expectedAttendance")),
            Rule::range(risk("expectedAttendance"), Bounds::at_least(1.0)),
            detail_when("alcoholServed", "securityProvider"),
        ],
        Category::Travel => vec![detail_when("preExistingConditions", "conditionsDetails")
            .labelled("Details of pre-existing conditions")],
        Category::PortablePossessions => vec![detail_when("travelsFrequently", "storageWhenAway")],
    }
}
