//! Export pipeline
//!
//! Turns one assignment snapshot into the artifacts the downstream
//! submission system and students consume:
//! - `assignment_spec.json`: the submission-system schema ([`converter`])
//! - `assignment_maker_backup.json`: the assignment as stored
//! - `assignment.pdf` / `template.pdf`: paginated documents ([`pdf`])
//! - `assignment.html`: static rendering with client-side math
//!
//! and packs them into one zip archive ([`BundlePackager`]).
//!
//! # Example
//!
//! ```ignore
//! use am_core::export::{BundlePackager, DirectorySink};
//!
//! let packager = BundlePackager::new(&config);
//! let path = packager.export(&assignment, &DirectorySink::new("exports"))?;
//! ```

mod atomic;
mod bundle;
pub mod converter;
mod exporter;
mod html;
mod json;
pub mod pdf;

pub use bundle::{
    archive_name, ArchiveSink, Bundle, BundlePackager, DirectorySink, BACKUP_ENTRY,
    BUNDLE_ENTRIES, HTML_ENTRY, SPEC_ENTRY, STUDENT_PDF_ENTRY, TEMPLATE_PDF_ENTRY,
};
pub use converter::{convert, SpecAssignment, SpecProblem, SpecSubsection};
pub use exporter::{ExportManager, Exporter};
pub use html::HtmlExporter;
pub use json::{BackupJsonExporter, SpecJsonExporter};
pub use pdf::{DocumentRenderer, PdfExporter, RenderMode};
