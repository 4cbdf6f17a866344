//! Exporter trait and manager

use super::atomic::write_atomic;
use super::html::HtmlExporter;
use super::json::{BackupJsonExporter, SpecJsonExporter};
use super::pdf::{PdfExporter, RenderMode};
use crate::assignment::Assignment;
use crate::config::Config;
use crate::error::{AmError, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Trait for assignment exporters.
///
/// Exporters treat the assignment as a read-only snapshot and hold no
/// mutable state, so two exports never interfere.
pub trait Exporter: Send + Sync {
    /// Render an assignment to bytes
    fn export(&self, assignment: &Assignment) -> Result<Vec<u8>>;

    /// Get the format name
    fn format_name(&self) -> &str;

    /// File name used for this artifact inside the bundle
    fn file_name(&self) -> &str;
}

/// Manager for handling multiple export formats
pub struct ExportManager {
    /// Exporters in registration order
    exporters: Vec<Box<dyn Exporter>>,
}

impl ExportManager {
    /// Create a manager with the five bundle artifacts registered
    pub fn new(config: &Config) -> Self {
        let mut manager = Self::empty();

        manager.register(Box::new(SpecJsonExporter::new()));
        manager.register(Box::new(BackupJsonExporter::new()));
        manager.register(Box::new(PdfExporter::new(RenderMode::Student, config)));
        manager.register(Box::new(PdfExporter::new(RenderMode::Template, config)));
        manager.register(Box::new(HtmlExporter::new(&config.export.math_script_url)));

        manager
    }

    /// Create a manager with no exporters
    pub fn empty() -> Self {
        Self {
            exporters: Vec::new(),
        }
    }

    /// Register an exporter, replacing one with the same format name
    pub fn register(&mut self, exporter: Box<dyn Exporter>) {
        if let Some(slot) = self
            .exporters
            .iter_mut()
            .find(|e| e.format_name() == exporter.format_name())
        {
            *slot = exporter;
        } else {
            self.exporters.push(exporter);
        }
    }

    /// Get an exporter by format name
    pub fn get(&self, format: &str) -> Option<&dyn Exporter> {
        self.exporters
            .iter()
            .find(|e| e.format_name() == format)
            .map(|e| e.as_ref())
    }

    /// Export an assignment to the specified format
    pub fn export(&self, assignment: &Assignment, format: &str) -> Result<Vec<u8>> {
        let exporter = self.get(format).ok_or_else(|| {
            AmError::Validation(format!("Unknown export format: {}", format))
        })?;

        let bytes = exporter.export(assignment)?;
        debug!("Exported {} ({} bytes)", format, bytes.len());
        Ok(bytes)
    }

    /// Run every registered exporter, yielding `(file name, bytes)` pairs
    pub fn export_all(&self, assignment: &Assignment) -> Result<Vec<(String, Vec<u8>)>> {
        self.exporters
            .iter()
            .map(|exporter| {
                let bytes = exporter.export(assignment)?;
                debug!("Exported {} ({} bytes)", exporter.format_name(), bytes.len());
                Ok((exporter.file_name().to_string(), bytes))
            })
            .collect()
    }

    /// Export an assignment to a file
    pub fn export_to_file(&self, assignment: &Assignment, format: &str, path: &Path) -> Result<()> {
        let content = self.export(assignment, format)?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        write_atomic(path, &path.with_extension("tmp"), &content)
    }

    /// Format names in registration order
    pub fn available_formats(&self) -> Vec<String> {
        self.exporters
            .iter()
            .map(|e| e.format_name().to_string())
            .collect()
    }

    /// Check if a format is available
    pub fn has_format(&self, format: &str) -> bool {
        self.get(format).is_some()
    }
}
