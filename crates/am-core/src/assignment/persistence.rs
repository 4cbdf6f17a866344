//! Assignment storage trait and file format

use super::model::Assignment;
use crate::error::{AmError, Result};
use crate::types::AssignmentId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

/// Current schema version of stored assignment files
pub const CURRENT_SCHEMA_VERSION: &str = "1.0";

/// Trait for assignment storage implementations.
///
/// Stores are keyed by the (trimmed) assignment id and hold whole documents;
/// there is no partial update.
pub trait AssignmentStore: Send + Sync {
    /// Write an assignment, replacing any document with the same id
    fn save(&self, assignment: &Assignment) -> Result<()>;

    /// Look up an assignment by exact id; absence is `Ok(None)`
    fn get(&self, id: &AssignmentId) -> Result<Option<Assignment>>;

    /// All readable assignments, in no particular order
    fn list(&self) -> Result<Vec<Assignment>>;

    /// Delete an assignment
    fn delete(&self, id: &AssignmentId) -> Result<()>;

    /// Check if an assignment exists.
    ///
    /// A document that is present but unreadable still exists, so callers
    /// never treat it as free to overwrite with fresh timestamps.
    fn exists(&self, id: &AssignmentId) -> bool {
        match self.get(id) {
            Ok(found) => found.is_some(),
            Err(e) => {
                warn!("Could not read assignment {}: {}", id, e);
                true
            }
        }
    }
}

/// On-disk wrapper with schema version
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentFile {
    /// Schema version for compatibility checks
    pub schema_version: String,
    /// The assignment document
    pub assignment: Assignment,
    /// Extra fields for forward compatibility
    #[serde(flatten, default)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl AssignmentFile {
    /// Wrap an assignment with the current schema version
    pub fn new(assignment: Assignment) -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION.to_string(),
            assignment,
            extra: HashMap::new(),
        }
    }

    /// Unwrap, refusing files written by an incompatible major version
    pub fn into_assignment(self) -> Result<Assignment> {
        let major = self.schema_version.split('.').next().unwrap_or_default();
        let current_major = CURRENT_SCHEMA_VERSION.split('.').next().unwrap_or_default();
        if major != current_major {
            return Err(AmError::UnsupportedSchemaVersion(self.schema_version));
        }
        Ok(self.assignment)
    }
}

/// In-memory storage for testing
#[cfg(test)]
pub mod memory {
    use super::*;
    use std::sync::RwLock;

    /// In-memory assignment storage for testing
    pub struct MemoryStore {
        assignments: RwLock<HashMap<AssignmentId, Assignment>>,
    }

    impl MemoryStore {
        /// Create a new in-memory store
        pub fn new() -> Self {
            Self {
                assignments: RwLock::new(HashMap::new()),
            }
        }
    }

    impl Default for MemoryStore {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AssignmentStore for MemoryStore {
        fn save(&self, assignment: &Assignment) -> Result<()> {
            let mut assignments = self.assignments.write().unwrap();
            assignments.insert(assignment.id.clone(), assignment.clone());
            Ok(())
        }

        fn get(&self, id: &AssignmentId) -> Result<Option<Assignment>> {
            let assignments = self.assignments.read().unwrap();
            Ok(assignments.get(id).cloned())
        }

        fn list(&self) -> Result<Vec<Assignment>> {
            let assignments = self.assignments.read().unwrap();
            Ok(assignments.values().cloned().collect())
        }

        fn delete(&self, id: &AssignmentId) -> Result<()> {
            let mut assignments = self.assignments.write().unwrap();
            assignments
                .remove(id)
                .ok_or_else(|| AmError::AssignmentNotFound(id.to_string()))?;
            Ok(())
        }
    }

    /// Store whose documents are all present but unreadable
    pub struct UnreadableStore;

    impl AssignmentStore for UnreadableStore {
        fn save(&self, _: &Assignment) -> Result<()> {
            Ok(())
        }

        fn get(&self, id: &AssignmentId) -> Result<Option<Assignment>> {
            Err(AmError::InvalidImport(format!("{} is corrupt", id)))
        }

        fn list(&self) -> Result<Vec<Assignment>> {
            Ok(Vec::new())
        }

        fn delete(&self, _: &AssignmentId) -> Result<()> {
            Ok(())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_memory_store_save_get() {
            let store = MemoryStore::new();
            let a = Assignment::new("C", "T");

            store.save(&a).unwrap();
            assert_eq!(store.get(&a.id).unwrap(), Some(a.clone()));
            assert!(store.exists(&a.id));
        }

        #[test]
        fn test_memory_store_missing_is_none() {
            let store = MemoryStore::new();
            assert!(store.get(&AssignmentId::generate()).unwrap().is_none());
        }

        #[test]
        fn test_memory_store_delete() {
            let store = MemoryStore::new();
            let a = Assignment::new("C", "T");
            store.save(&a).unwrap();

            store.delete(&a.id).unwrap();
            assert!(!store.exists(&a.id));
            assert!(store.delete(&a.id).is_err());
        }

        #[test]
        fn test_unreadable_document_still_exists() {
            assert!(UnreadableStore.exists(&AssignmentId::from_string("a1")));
        }
    }
}
