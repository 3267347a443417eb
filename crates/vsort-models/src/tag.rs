//! Classifier tags and the target-tag matching rule.

use serde::{Deserialize, Serialize};

/// Tags with a confidence at or below this value are ignored when matching.
///
/// The comparison is strict: a tag at exactly 0.5 does not match.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.5;

/// A label assigned to an image by the analysis service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    /// Tag name as returned by the service (e.g. "person", "outdoor")
    pub name: String,
    /// Confidence score in [0, 1]
    pub confidence: f64,
}

impl Tag {
    pub fn new(name: impl Into<String>, confidence: f64) -> Self {
        Self {
            name: name.into(),
            confidence,
        }
    }
}

/// Decide whether a tag set contains one of the target tags.
///
/// Returns true iff some tag has `confidence > threshold` and a name that is
/// an exact, case-sensitive member of `targets`. Empty `tags` or empty
/// `targets` always return false. Pure function, no I/O.
pub fn contains_target(tags: &[Tag], targets: &[String], threshold: f64) -> bool {
    tags.iter()
        .filter(|tag| tag.confidence > threshold)
        .any(|tag| targets.iter().any(|target| target == &tag.name))
}
