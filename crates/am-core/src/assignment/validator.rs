//! Assignment validation

use super::model::Assignment;
use crate::error::{AmError, Result};

/// Validator applied before an authored assignment is saved.
///
/// Imports bypass this check; only the authoring path enforces it.
pub struct AssignmentValidator;

impl AssignmentValidator {
    /// Create a new validator
    pub fn new() -> Self {
        Self
    }

    /// Validate the fields required before saving: course code, title, due date
    pub fn validate(&self, assignment: &Assignment) -> Result<()> {
        let mut missing = Vec::new();
        if assignment.course_code.trim().is_empty() {
            missing.push("Course Code");
        }
        if assignment.title.trim().is_empty() {
            missing.push("Title");
        }
        if assignment.due_date.is_none() {
            missing.push("Due Date");
        }

        if !missing.is_empty() {
            return Err(AmError::Validation(format!(
                "Please fill in {}",
                missing.join(", ")
            )));
        }
        Ok(())
    }
}

impl Default for AssignmentValidator {
    fn default() -> Self {
        Self::new()
    }
}
