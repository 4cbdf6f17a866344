//! JSON exporters for assignments

use super::bundle::{BACKUP_ENTRY, SPEC_ENTRY};
use super::converter::convert;
use super::exporter::Exporter;
use crate::assignment::Assignment;
use crate::error::Result;

/// Submission-system spec (`assignment_spec.json`)
pub struct SpecJsonExporter {
    /// Whether to use pretty-print formatting
    pretty: bool,
}

impl SpecJsonExporter {
    /// Create a pretty-printing spec exporter
    pub fn new() -> Self {
        Self { pretty: true }
    }

    /// Create a compact spec exporter
    pub fn compact() -> Self {
        Self { pretty: false }
    }
}

impl Default for SpecJsonExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Exporter for SpecJsonExporter {
    fn export(&self, assignment: &Assignment) -> Result<Vec<u8>> {
        let spec = convert(assignment);

        let json = if self.pretty {
            serde_json::to_vec_pretty(&spec)?
        } else {
            serde_json::to_vec(&spec)?
        };

        Ok(json)
    }

    fn format_name(&self) -> &str {
        "spec"
    }

    fn file_name(&self) -> &str {
        SPEC_ENTRY
    }
}

/// Verbatim backup of the assignment (`assignment_maker_backup.json`)
#[derive(Default)]
pub struct BackupJsonExporter;

impl BackupJsonExporter {
    pub fn new() -> Self {
        Self
    }
}

impl Exporter for BackupJsonExporter {
    fn export(&self, assignment: &Assignment) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(assignment)?)
    }

    fn format_name(&self) -> &str {
        "backup"
    }

    fn file_name(&self) -> &str {
        BACKUP_ENTRY
    }
}
