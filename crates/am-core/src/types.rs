//! Core type definitions for assignment-maker

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for an assignment.
///
/// Opaque string used as the storage key. Always held trimmed, so ids that
/// only differ by surrounding whitespace address the same document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssignmentId(pub String);

impl AssignmentId {
    /// Generate a new random AssignmentId
    pub fn generate() -> Self {
        AssignmentId(Uuid::new_v4().to_string())
    }

    /// Create from a string, trimming surrounding whitespace
    pub fn from_string(s: impl AsRef<str>) -> Self {
        AssignmentId(s.as_ref().trim().to_string())
    }

    /// Get the string value
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the id is empty after trimming
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for AssignmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier for a problem, unique within its assignment
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProblemId(pub String);

impl ProblemId {
    /// Generate a new ProblemId
    pub fn generate() -> Self {
        ProblemId(Uuid::new_v4().to_string())
    }
}

impl fmt::Display for ProblemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier for a subsection, unique within its problem
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubsectionId(pub String);

impl SubsectionId {
    /// Generate a new SubsectionId
    pub fn generate() -> Self {
        SubsectionId(Uuid::new_v4().to_string())
    }
}

impl fmt::Display for SubsectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Milliseconds since the Unix epoch
pub type Timestamp = i64;

/// Current time as epoch milliseconds
pub fn now_millis() -> Timestamp {
    chrono::Utc::now().timestamp_millis()
}
