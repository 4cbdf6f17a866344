//! am-core - Core library for assignment-maker
//!
//! This crate provides the assignment model and the export pipeline:
//! conversion to the submission-system JSON schema, paginated PDF documents,
//! the static HTML rendering, and the zip bundle that packages them.

pub mod error;
pub mod types;
pub mod config;
pub mod assignment;
pub mod export;

pub use error::{AmError, Result};
pub use types::*;
