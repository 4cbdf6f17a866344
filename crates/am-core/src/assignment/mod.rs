//! Assignment module
//!
//! The assignment document tree and everything that creates, edits or
//! stores it:
//! - the model (assignment, problems, subsections, submission types)
//! - save-time validation
//! - import and template loading
//! - the built-in example assignment
//! - the store trait and the manager that applies store semantics
//!
//! # Example
//!
//! ```ignore
//! use am_core::assignment::{AssignmentManager, ConflictPolicy};
//! use am_storage::FileSystemStore;
//!
//! let manager = AssignmentManager::new(FileSystemStore::new("/tmp/assignments")?);
//! let outcome = manager.import(&json, |_| ConflictPolicy::Copy)?;
//! let loaded = manager.get(outcome.assignment.id.as_str())?;
//! ```

pub mod example;
pub mod import;
mod manager;
mod model;
pub mod persistence;
mod validator;

pub use example::{example_assignment, EXAMPLE_LOADED_MESSAGE};
pub use import::{parse_import, parse_template, ConflictPolicy};
pub use manager::{AssignmentManager, ImportOutcome};
pub use model::{subsection_letter, Assignment, MoveDirection, Problem, Subsection, SubmissionType};
pub use persistence::{AssignmentFile, AssignmentStore, CURRENT_SCHEMA_VERSION};
pub use validator::AssignmentValidator;
