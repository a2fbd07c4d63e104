//! Rule vocabulary
//!
//! A [`Rule`] checks one field. Rules compose four ways:
//!
//! - **required / accepted**: the field must hold a value (or `true`)
//! - **format**: a non-empty value must match a [`Format`]
//! - **range / comparison**: a numeric or date value must sit within bounds,
//!   fixed or taken from another field
//! - **guards**: any rule can be made conditional on a [`Condition`] over
//!   sibling values ([`Rule::when`]) or on a computed threshold
//!   ([`Rule::when_threshold`])
//!
//! Rules are pure: they read the form and return at most one [`FieldError`].

use intake_form::{FieldValue, FormState};
use intake_schema::FieldPath;

use crate::error_map::{ErrorKind, ErrorMap, FieldError};
use crate::formats::{parse_iso_date, Format};

/// Predicate over form values
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Text value equals a literal
    Equals(FieldPath, &'static str),
    /// Text value is one of several literals
    OneOf(FieldPath, &'static [&'static str]),
    /// Boolean value is `true`
    IsTrue(FieldPath),
    /// Boolean value is explicitly `false` (absent does not count)
    IsFalse(FieldPath),
    /// Value is present and non-empty
    NonEmpty(FieldPath),
    /// Numeric value is at least a threshold
    NumberAtLeast(FieldPath, f64),
    /// Every inner condition holds
    All(Vec<Condition>),
}

impl Condition {
    /// Evaluate against a form
    #[must_use]
    pub fn holds(&self, form: &FormState) -> bool {
        match self {
            Condition::Equals(path, expected) => {
                form.get(path).and_then(FieldValue::as_text) == Some(*expected)
            }
            Condition::OneOf(path, options) => form
                .get(path)
                .and_then(FieldValue::as_text)
                .is_some_and(|text| options.contains(&text)),
            Condition::IsTrue(path) => form.get(path).and_then(FieldValue::as_bool) == Some(true),
            Condition::IsFalse(path) => form.get(path).and_then(FieldValue::as_bool) == Some(false),
            Condition::NonEmpty(path) => form.is_filled(path),
            Condition::NumberAtLeast(path, threshold) => form
                .get(path)
                .and_then(FieldValue::as_number)
                .is_some_and(|n| n >= *threshold),
            Condition::All(inner) => inner.iter().all(|c| c.holds(form)),
        }
    }

    /// Paths the condition reads
    #[must_use]
    pub fn reads(&self) -> Vec<&FieldPath> {
        match self {
            Condition::Equals(path, _)
            | Condition::OneOf(path, _)
            | Condition::IsTrue(path)
            | Condition::IsFalse(path)
            | Condition::NonEmpty(path)
            | Condition::NumberAtLeast(path, _) => vec![path],
            Condition::All(inner) => inner.iter().flat_map(Condition::reads).collect(),
        }
    }

    /// Conjunction with another condition
    #[must_use]
    pub fn and(self, other: Condition) -> Condition {
        match self {
            Condition::All(mut inner) => {
                inner.push(other);
                Condition::All(inner)
            }
            single => Condition::All(vec![single, other]),
        }
    }
}

/// How a guard relates the field to the rest of the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardKind {
    /// Guard reads a sibling's value
    Sibling,
    /// Guard is a computed relationship (count, amount, threshold)
    Threshold,
    /// Guard opens a sub-record; its fields are plainly required while open
    Section,
}

/// Condition under which a rule is active
#[derive(Debug, Clone, PartialEq)]
pub struct Guard {
    pub condition: Condition,
    pub kind: GuardKind,
}

/// Numeric bound
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bound {
    pub value: f64,
    pub inclusive: bool,
}

/// Optional lower and upper bounds
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub min: Option<Bound>,
    pub max: Option<Bound>,
}

impl Bounds {
    /// `value > min`
    #[must_use]
    pub const fn greater_than(min: f64) -> Self {
        Self {
            min: Some(Bound {
                value: min,
                inclusive: false,
            }),
            max: None,
        }
    }

    /// `value >= min`
    #[must_use]
    pub const fn at_least(min: f64) -> Self {
        Self {
            min: Some(Bound {
                value: min,
                inclusive: true,
            }),
            max: None,
        }
    }

    /// `min <= value <= max`
    #[must_use]
    pub const fn between(min: f64, max: f64) -> Self {
        Self {
            min: Some(Bound {
                value: min,
                inclusive: true,
            }),
            max: Some(Bound {
                value: max,
                inclusive: true,
            }),
        }
    }

    /// Check a number against the bounds
    #[must_use]
    pub fn contains(&self, n: f64) -> bool {
        let above = self.min.map_or(true, |b| if b.inclusive { n >= b.value } else { n > b.value });
        let below = self.max.map_or(true, |b| if b.inclusive { n <= b.value } else { n < b.value });
        above && below
    }

    fn describe(&self, label: &str) -> String {
        match (self.min, self.max) {
            (Some(lo), Some(hi)) => format!("{label} must be between {} and {}", lo.value, hi.value),
            (Some(lo), None) if lo.inclusive => format!("{label} must be at least {}", lo.value),
            (Some(lo), None) => format!("{label} must be greater than {}", lo.value),
            (None, Some(hi)) if hi.inclusive => format!("{label} must be at most {}", hi.value),
            (None, Some(hi)) => format!("{label} must be less than {}", hi.value),
            (None, None) => format!("{label} is out of range"),
        }
    }
}

/// What a rule checks
#[derive(Debug, Clone, PartialEq)]
pub enum Check {
    /// Non-empty value
    Required,
    /// Checkbox ticked
    Accepted,
    /// Non-empty value matches a format
    Format(Format),
    /// Non-empty value is a number within bounds
    Range(Bounds),
    /// Date strictly after another date field
    After(FieldPath),
    /// Number at least another number field
    AtLeastField(FieldPath),
}

/// Single-field validation rule
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    path: FieldPath,
    check: Check,
    guard: Option<Guard>,
    label: Option<&'static str>,
    message: Option<&'static str>,
}

impl Rule {
    fn new(path: FieldPath, check: Check) -> Self {
        Self {
            path,
            check,
            guard: None,
            label: None,
            message: None,
        }
    }

    /// Field must be non-empty
    #[must_use]
    pub fn required(path: FieldPath) -> Self {
        Self::new(path, Check::Required)
    }

    /// Checkbox must be ticked
    #[must_use]
    pub fn accepted(path: FieldPath) -> Self {
        Self::new(path, Check::Accepted)
    }

    /// Non-empty field must match a format
    #[must_use]
    pub fn format(path: FieldPath, format: Format) -> Self {
        Self::new(path, Check::Format(format))
    }

    /// Non-empty field must be a number within bounds
    #[must_use]
    pub fn range(path: FieldPath, bounds: Bounds) -> Self {
        Self::new(path, Check::Range(bounds))
    }

    /// Date field must be after another date field
    #[must_use]
    pub fn after(path: FieldPath, other: FieldPath) -> Self {
        Self::new(path, Check::After(other))
    }

    /// Number field must be at least another number field
    #[must_use]
    pub fn at_least_field(path: FieldPath, other: FieldPath) -> Self {
        Self::new(path, Check::AtLeastField(other))
    }

    /// Activate only while a sibling condition holds
    #[must_use]
    pub fn when(mut self, condition: Condition) -> Self {
        self.guard = Some(Guard {
            condition,
            kind: GuardKind::Sibling,
        });
        self
    }

    /// Activate only while the sub-record holding the field is opened
    #[must_use]
    pub fn within(mut self, condition: Condition) -> Self {
        self.guard = Some(Guard {
            condition,
            kind: GuardKind::Section,
        });
        self
    }

    /// Activate only while a computed threshold holds
    #[must_use]
    pub fn when_threshold(mut self, condition: Condition) -> Self {
        self.guard = Some(Guard {
            condition,
            kind: GuardKind::Threshold,
        });
        self
    }

    /// Human label used in messages
    #[must_use]
    pub fn labelled(mut self, label: &'static str) -> Self {
        self.label = Some(label);
        self
    }

    /// Fixed message replacing the generated one
    #[must_use]
    pub fn with_message(mut self, message: &'static str) -> Self {
        self.message = Some(message);
        self
    }

    /// Field the rule checks
    #[inline]
    #[must_use]
    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    /// What the rule checks
    #[inline]
    #[must_use]
    pub fn check(&self) -> &Check {
        &self.check
    }

    /// Guard, if conditional
    #[inline]
    #[must_use]
    pub fn guard(&self) -> Option<&Guard> {
        self.guard.as_ref()
    }

    /// Whether the rule applies to the form as it stands
    #[must_use]
    pub fn is_active(&self, form: &FormState) -> bool {
        self.guard.as_ref().map_or(true, |g| g.condition.holds(form))
    }

    /// Every path the rule reads (its field, guard inputs, comparison field)
    #[must_use]
    pub fn reads(&self) -> Vec<&FieldPath> {
        let mut out = vec![&self.path];
        if let Some(guard) = &self.guard {
            out.extend(guard.condition.reads());
        }
        if let Check::After(other) | Check::AtLeastField(other) = &self.check {
            out.push(other);
        }
        out
    }

    /// Label for messages
    #[must_use]
    pub fn label(&self) -> String {
        self.label.map_or_else(|| humanize(self.path.last()), str::to_string)
    }

    /// Evaluate the rule, returning the failure if any
    #[must_use]
    pub fn evaluate(&self, form: &FormState) -> Option<FieldError> {
        if !self.is_active(form) {
            return None;
        }
        let value = form.get(&self.path).filter(|v| !v.is_empty());

        match &self.check {
            Check::Required => value
                .is_none()
                .then(|| self.fail(self.required_kind(), || format!("{} is required", self.label()))),
            Check::Accepted => (value.and_then(FieldValue::as_bool) != Some(true))
                .then(|| self.fail(self.required_kind(), || format!("{} must be accepted", self.label()))),
            Check::Format(format) => {
                let text = value.and_then(text_of)?;
                (!format.matches(&text))
                    .then(|| self.fail(ErrorKind::FormatInvalid, || format.message(&self.label())))
            }
            Check::Range(bounds) => {
                let value = value?;
                match value.as_number() {
                    None => Some(self.fail(ErrorKind::FormatInvalid, || {
                        format!("{} must be a number", self.label())
                    })),
                    Some(n) if !bounds.contains(n) => {
                        Some(self.fail(ErrorKind::RangeInvalid, || bounds.describe(&self.label())))
                    }
                    Some(_) => None,
                }
            }
            Check::After(other) => {
                let mine = value.and_then(FieldValue::as_text).and_then(parse_iso_date)?;
                let theirs = form
                    .get(other)
                    .and_then(FieldValue::as_text)
                    .and_then(parse_iso_date)?;
                (mine <= theirs).then(|| {
                    self.fail(ErrorKind::RangeInvalid, || {
                        format!("{} must be after {}", self.label(), humanize(other.last()).to_lowercase())
                    })
                })
            }
            Check::AtLeastField(other) => {
                let mine = value.and_then(FieldValue::as_number)?;
                let theirs = form.get(other).and_then(FieldValue::as_number)?;
                (mine < theirs).then(|| {
                    self.fail(ErrorKind::RangeInvalid, || {
                        format!(
                            "{} must be at least {} ({theirs})",
                            self.label(),
                            humanize(other.last()).to_lowercase()
                        )
                    })
                })
            }
        }
    }

    fn required_kind(&self) -> ErrorKind {
        match self.guard.as_ref().map(|g| g.kind) {
            None | Some(GuardKind::Section) => ErrorKind::MissingRequired,
            Some(GuardKind::Sibling) => ErrorKind::ConditionalRequired,
            Some(GuardKind::Threshold) => ErrorKind::CrossFieldThreshold,
        }
    }

    fn fail(&self, kind: ErrorKind, generated: impl FnOnce() -> String) -> FieldError {
        let message = self.message.map_or_else(generated, str::to_string);
        FieldError::new(kind, message)
    }
}

/// Text form of a scalar, for format checks
fn text_of(value: &FieldValue) -> Option<String> {
    match value {
        FieldValue::Text(s) => Some(s.clone()),
        FieldValue::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// `firstName` -> `First name`
#[must_use]
pub fn humanize(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len() + 4);
    for (i, c) in segment.chars().enumerate() {
        if i == 0 {
            out.push(c.to_ascii_uppercase());
        } else if c.is_ascii_uppercase() {
            out.push(' ');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Evaluate rules in order, keeping the first failure per field
#[must_use]
pub fn evaluate_all(rules: &[Rule], form: &FormState) -> ErrorMap {
    let mut errors = ErrorMap::new();
    for rule in rules {
        if let Some(error) = rule.evaluate(form) {
            errors.insert_first(rule.path.clone(), error);
        }
    }
    errors
}
