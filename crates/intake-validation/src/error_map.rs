//! Field error map
//!
//! [`ErrorMap`] holds the fields currently failing validation. A key present in
//! the map is a known failure; absence means "no known error", not "valid".

use intake_schema::FieldPath;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

/// Failure category of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    /// Unconditionally required field is empty
    MissingRequired,
    /// Non-empty value does not match its pattern or algorithm
    FormatInvalid,
    /// Numeric value outside its bounds
    RangeInvalid,
    /// Field required because of a sibling's value
    ConditionalRequired,
    /// Field required because of a computed relationship between fields
    CrossFieldThreshold,
}

impl ErrorKind {
    /// Stable kebab-case name
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::MissingRequired => "missing-required",
            ErrorKind::FormatInvalid => "format-invalid",
            ErrorKind::RangeInvalid => "range-invalid",
            ErrorKind::ConditionalRequired => "conditional-required",
            ErrorKind::CrossFieldThreshold => "cross-field-threshold",
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One failing field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Failure category
    pub kind: ErrorKind,
    /// Message shown next to the field
    pub message: String,
}

impl FieldError {
    /// Create a field error
    #[inline]
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Whether the failure is "no value where one is needed"
    ///
    /// True for plain, conditional and threshold-triggered requirements.
    #[inline]
    #[must_use]
    pub fn is_missing_value(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::MissingRequired | ErrorKind::ConditionalRequired | ErrorKind::CrossFieldThreshold
        )
    }
}

impl Display for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Failing fields keyed by path, in path order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorMap(BTreeMap<FieldPath, FieldError>);

impl ErrorMap {
    /// Empty map
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error, replacing any previous entry for the path
    pub fn insert(&mut self, path: FieldPath, error: FieldError) {
        self.0.insert(path, error);
    }

    /// Record an error unless the path already failed
    ///
    /// Rules run in declaration order, so the first failure per field wins.
    pub fn insert_first(&mut self, path: FieldPath, error: FieldError) {
        self.0.entry(path).or_insert(error);
    }

    /// Remove an entry
    pub fn remove(&mut self, path: &FieldPath) -> Option<FieldError> {
        self.0.remove(path)
    }

    /// Error for a path
    #[inline]
    #[must_use]
    pub fn get(&self, path: &FieldPath) -> Option<&FieldError> {
        self.0.get(path)
    }

    /// Check whether a path has an error
    #[inline]
    #[must_use]
    pub fn contains(&self, path: &FieldPath) -> bool {
        self.0.contains_key(path)
    }

    /// Keep only entries matching a predicate
    pub fn retain(&mut self, mut keep: impl FnMut(&FieldPath, &FieldError) -> bool) {
        self.0.retain(|path, error| keep(path, error));
    }

    /// Iterate in path order
    pub fn iter(&self) -> impl Iterator<Item = (&FieldPath, &FieldError)> {
        self.0.iter()
    }

    /// Failing paths in order
    pub fn paths(&self) -> impl Iterator<Item = &FieldPath> {
        self.0.keys()
    }

    /// Flat `path -> message` view for rendering
    #[must_use]
    pub fn messages(&self) -> BTreeMap<String, String> {
        self.0
            .iter()
            .map(|(path, error)| (path.to_string(), error.message.clone()))
            .collect()
    }

    /// Number of failing fields
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if nothing is failing
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(FieldPath, FieldError)> for ErrorMap {
    fn from_iter<I: IntoIterator<Item = (FieldPath, FieldError)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<(FieldPath, FieldError)> for ErrorMap {
    fn extend<I: IntoIterator<Item = (FieldPath, FieldError)>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for ErrorMap {
    type Item = (FieldPath, FieldError);
    type IntoIter = std::collections::btree_map::IntoIter<FieldPath, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ErrorMap {
    type Item = (&'a FieldPath, &'a FieldError);
    type IntoIter = std::collections::btree_map::Iter<'a, FieldPath, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use intake_schema::paths;

    #[test]
    fn first_failure_wins() {
        let mut errors = ErrorMap::new();
        errors.insert_first(
            paths::personal::EMAIL,
            FieldError::new(ErrorKind::MissingRequired, "Email is required"),
        );
        errors.insert_first(
            paths::personal::EMAIL,
            FieldError::new(ErrorKind::FormatInvalid, "Please enter a valid email address"),
        );
        assert_eq!(
            errors.get(&paths::personal::EMAIL).map(|e| e.kind),
            Some(ErrorKind::MissingRequired)
        );
    }

    #[test]
    fn iteration_follows_path_order_not_insertion() {
        let required = |label: &str| FieldError::new(ErrorKind::MissingRequired, format!("{label} is required"));
        let forward: ErrorMap = [
            (paths::personal::LAST_NAME, required("Last name")),
            (paths::personal::EMAIL, required("Email")),
            (paths::personal::FIRST_NAME, required("First name")),
        ]
        .into_iter()
        .collect();
        let reversed: ErrorMap = forward.clone().into_iter().rev().collect();

        assert_eq!(
            forward.paths().map(FieldPath::as_str).collect::<Vec<_>>(),
            ["personalInfo.email", "personalInfo.firstName", "personalInfo.lastName"]
        );
        assert_eq!(
            serde_json::to_string(&forward).unwrap(),
            serde_json::to_string(&reversed).unwrap()
        );
    }

    #[test]
    fn missing_value_grouping() {
        assert!(FieldError::new(ErrorKind::MissingRequired, "Email is required").is_missing_value());
        assert!(FieldError::new(ErrorKind::ConditionalRequired, "Current provider is required")
            .is_missing_value());
        assert!(FieldError::new(ErrorKind::CrossFieldThreshold, "Explanation is required")
            .is_missing_value());
        assert!(!FieldError::new(ErrorKind::RangeInvalid, "Return date must be after departure date")
            .is_missing_value());
        assert!(!FieldError::new(ErrorKind::FormatInvalid, "Postal code must be 4 digits").is_missing_value());
    }

    #[test]
    fn messages_view_is_flat() {
        let errors: ErrorMap = [(
            paths::personal::EMAIL,
            FieldError::new(ErrorKind::FormatInvalid, "Please enter a valid email address"),
        )]
        .into_iter()
        .collect();
        let messages = errors.messages();
        assert_eq!(
            messages.get("personalInfo.email").map(String::as_str),
            Some("Please enter a valid email address")
        );
    }

    #[test]
    fn serialises_with_kind() {
        let errors: ErrorMap = [(
            paths::personal::FIRST_NAME,
            FieldError::new(ErrorKind::MissingRequired, "First name is required"),
        )]
        .into_iter()
        .collect();
        let json = serde_json::to_string(&errors).unwrap();
        assert_eq!(
            json,
            r#"{"personalInfo.firstName":{"kind":"missing-required","message":"First name is required"}}"#
        );
        let back: ErrorMap = serde_json::from_str(&json).unwrap();
        assert_eq!(back, errors);
    }
}
