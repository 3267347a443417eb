//! Routing disposition for a processed artifact.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Where an artifact ends up after one handler invocation.
///
/// Exactly one destination receives the original bytes: `Accepted` or
/// `Rejected` after a successful classification, `Error` when anything in the
/// classify path failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Disposition {
    /// Target tag found with sufficient confidence
    Accepted,
    /// Classification succeeded but no target tag matched
    Rejected,
    /// Read or classification failed
    Error,
}

impl Disposition {
    /// Destination prefix inside the bucket.
    pub fn prefix(&self) -> &'static str {
        match self {
            Disposition::Accepted => "accepted",
            Disposition::Rejected => "rejected",
            Disposition::Error => "error",
        }
    }

    /// Full destination key for an artifact name, e.g. `accepted/photo.jpg`.
    pub fn key(&self, name: &str) -> String {
        format!("{}/{}", self.prefix(), name)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Disposition::Error)
    }
}

impl fmt::Display for Disposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}
