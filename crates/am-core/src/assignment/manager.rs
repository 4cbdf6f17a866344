//! Assignment manager for store-level operations

use super::example::example_assignment;
use super::import::{into_copy, parse_import, parse_template, ConflictPolicy, COPY_SUFFIX};
use super::model::{Assignment, MoveDirection};
use super::persistence::AssignmentStore;
use super::validator::AssignmentValidator;
use crate::error::{AmError, Result};
use crate::types::{now_millis, AssignmentId};
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{debug, info};

/// Result of an import
#[derive(Debug, Clone)]
pub struct ImportOutcome {
    /// The assignment as stored
    pub assignment: Assignment,
    /// How an id collision was resolved, if there was one
    pub conflict: Option<ConflictPolicy>,
}

/// Manager for the assignment lifecycle
pub struct AssignmentManager {
    /// Storage backend
    store: Arc<dyn AssignmentStore>,
    /// Validation applied to authored assignments
    validator: AssignmentValidator,
}

impl AssignmentManager {
    /// Create a new manager with the given store
    pub fn new(store: impl AssignmentStore + 'static) -> Self {
        Self::with_store(Arc::new(store))
    }

    /// Create a new manager with a shared store
    pub fn with_store(store: Arc<dyn AssignmentStore>) -> Self {
        Self {
            store,
            validator: AssignmentValidator::new(),
        }
    }

    /// Look up an assignment; absence is `Ok(None)`
    pub fn get(&self, id: &str) -> Result<Option<Assignment>> {
        self.store.get(&AssignmentId::from_string(id))
    }

    /// Look up an assignment that must exist
    pub fn require(&self, id: &str) -> Result<Assignment> {
        self.get(id)?
            .ok_or_else(|| AmError::AssignmentNotFound(id.trim().to_string()))
    }

    /// Persist a whole assignment.
    ///
    /// The id is trimmed. An existing document is replaced and its
    /// `updated_at` refreshed; a new one gets both timestamps set to now.
    pub fn save(&self, assignment: &mut Assignment) -> Result<()> {
        assignment.id = AssignmentId::from_string(assignment.id.as_str());
        if assignment.id.is_blank() {
            return Err(AmError::Validation("Assignment id cannot be empty".to_string()));
        }

        let now = now_millis();
        if self.store.exists(&assignment.id) {
            assignment.updated_at = now;
        } else {
            assignment.created_at = now;
            assignment.updated_at = now;
        }

        self.store.save(assignment)?;
        debug!("Saved assignment {}", assignment.id);
        Ok(())
    }

    /// Validate and persist an authored assignment
    pub fn create(&self, assignment: &mut Assignment) -> Result<()> {
        self.validator.validate(assignment)?;
        self.save(assignment)
    }

    /// All assignments, most recently updated first
    pub fn list(&self) -> Result<Vec<Assignment>> {
        let mut assignments = self.store.list()?;
        assignments.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(assignments)
    }

    /// Delete an assignment
    pub fn delete(&self, id: &str) -> Result<()> {
        self.store.delete(&AssignmentId::from_string(id))?;
        info!("Deleted assignment {}", id.trim());
        Ok(())
    }

    /// Import an assignment document.
    ///
    /// `resolve` is only consulted when the id already exists. The store is
    /// untouched if the document is rejected.
    pub fn import<F>(&self, json: &str, resolve: F) -> Result<ImportOutcome>
    where
        F: FnOnce(&Assignment) -> ConflictPolicy,
    {
        let mut assignment = parse_import(json, now_millis())?;

        let conflict = if self.store.exists(&assignment.id) {
            let policy = resolve(&assignment);
            if policy == ConflictPolicy::Copy {
                assignment = into_copy(assignment);
            }
            Some(policy)
        } else {
            None
        };

        self.save(&mut assignment)?;
        info!("Imported assignment {} ({:?})", assignment.id, conflict);
        Ok(ImportOutcome {
            assignment,
            conflict,
        })
    }

    /// Build a new draft from a template document (not saved)
    pub fn draft_from_template(&self, json: &str) -> Result<Assignment> {
        parse_template(json, now_millis())
    }

    /// Save a copy of a stored assignment with fresh ids and a "(Copy)" title
    pub fn duplicate(&self, id: &str) -> Result<Assignment> {
        let mut copy = self.require(id)?;
        copy.regenerate_ids();
        copy.title.push_str(COPY_SUFFIX);
        self.save(&mut copy)?;
        Ok(copy)
    }

    /// Add the built-in example assignment
    pub fn seed_example(&self, today: NaiveDate) -> Result<Assignment> {
        let mut example = example_assignment(today);
        self.save(&mut example)?;
        Ok(example)
    }

    /// Reorder a stored assignment's problems by adjacent swap.
    ///
    /// Returns `false` (and writes nothing) at the boundaries.
    pub fn move_problem(&self, id: &str, index: usize, direction: MoveDirection) -> Result<bool> {
        let mut assignment = self.require(id)?;
        if !assignment.move_problem(index, direction) {
            return Ok(false);
        }
        self.save(&mut assignment)?;
        Ok(true)
    }
}
