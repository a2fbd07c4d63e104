//! Field paths for addressing leaves of the form record
//!
//! Provides [`FieldPath`], the typed key shared by the form store and the
//! error map.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Dotted path to a field of the form record
///
/// Segments are camelCase ASCII identifiers joined with `.`.
///
/// # Examples
/// - `personalInfo.email`
/// - `needsAnalysis.currentSituation.claimsHistory.numberOfClaims`
/// - `projectName` (top-level scalar)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldPath(Cow<'static, str>);

impl FieldPath {
    /// Path from a static literal
    ///
    /// Literals are checked by the schema tests rather than at construction.
    #[inline]
    #[must_use]
    pub const fn from_static(path: &'static str) -> Self {
        Self(Cow::Borrowed(path))
    }

    /// Parse and validate a dotted path
    ///
    /// # Errors
    /// Returns [`PathError`] if the path is empty or has a malformed segment.
    pub fn parse(path: &str) -> Result<Self, PathError> {
        path.parse()
    }

    /// Dotted representation
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterator over segments from root to leaf
    #[inline]
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    /// Number of segments
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments().count()
    }

    /// Always false: a path has at least one segment
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First segment (the top-level section or scalar)
    #[inline]
    #[must_use]
    pub fn first(&self) -> &str {
        self.0.split('.').next().unwrap_or_default()
    }

    /// Last segment (the leaf name)
    #[inline]
    #[must_use]
    pub fn last(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or_default()
    }

    /// Parent path, if not top-level
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.0
            .rfind('.')
            .map(|idx| Self(Cow::Owned(self.0[..idx].to_string())))
    }

    /// Append a segment, returning new path
    #[must_use]
    pub fn child(&self, segment: &str) -> Self {
        Self(Cow::Owned(format!("{}.{}", self.0, segment)))
    }

    /// Check if this path is a prefix of another
    ///
    /// # Examples
    /// - `personalInfo` is prefix of `personalInfo.email`
    /// - `personalInfo` is NOT prefix of `personalInfoExtra`
    #[must_use]
    pub fn is_prefix_of(&self, other: &Self) -> bool {
        match other.0.strip_prefix(self.0.as_ref()) {
            Some(rest) => rest.is_empty() || rest.starts_with('.'),
            None => false,
        }
    }

    /// Check if this path is an ancestor of another (strict prefix)
    #[inline]
    #[must_use]
    pub fn is_ancestor_of(&self, other: &Self) -> bool {
        self.0.len() < other.0.len() && self.is_prefix_of(other)
    }

    /// Check if paths overlap (one is prefix of other)
    #[inline]
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.is_prefix_of(other) || other.is_prefix_of(self)
    }
}

fn validate_segment(seg: &str) -> Result<(), PathError> {
    if seg.is_empty() {
        return Err(PathError::EmptySegment);
    }
    let starts_alpha = seg.chars().next().is_some_and(|c| c.is_ascii_alphabetic());
    if starts_alpha && seg.chars().all(|c| c.is_ascii_alphanumeric()) {
        Ok(())
    } else {
        Err(PathError::InvalidSegment(seg.to_string()))
    }
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for FieldPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(PathError::Empty);
        }
        s.split('.').try_for_each(validate_segment)?;
        Ok(Self(Cow::Owned(s.to_string())))
    }
}

impl AsRef<str> for FieldPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for FieldPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Errors related to field paths
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// Path has no segments
    #[error("path is empty")]
    Empty,

    /// Empty segment in path
    #[error("path contains empty segment")]
    EmptySegment,

    /// Invalid segment characters
    #[error("invalid segment: {0} (must start with a letter and be alphanumeric)")]
    InvalidSegment(String),
}
