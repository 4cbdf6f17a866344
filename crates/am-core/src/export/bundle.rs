//! Export bundle
//!
//! Packages the five artifacts into one zip archive, assembled completely
//! in memory. Only a finished archive is handed to an [`ArchiveSink`]; any
//! failure before that leaves nothing behind.

use super::atomic::write_atomic;
use super::exporter::ExportManager;
use crate::assignment::Assignment;
use crate::config::Config;
use crate::error::Result;
use std::fs;
use std::io::{Cursor, Write};
use std::path::PathBuf;
use tracing::{debug, info};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Submission-system spec entry
pub const SPEC_ENTRY: &str = "assignment_spec.json";
/// Verbatim assignment backup entry
pub const BACKUP_ENTRY: &str = "assignment_maker_backup.json";
/// Student document entry
pub const STUDENT_PDF_ENTRY: &str = "assignment.pdf";
/// Fillable template entry
pub const TEMPLATE_PDF_ENTRY: &str = "template.pdf";
/// HTML rendering entry
pub const HTML_ENTRY: &str = "assignment.html";

/// Every bundle entry, in archive order
pub const BUNDLE_ENTRIES: [&str; 5] = [
    SPEC_ENTRY,
    BACKUP_ENTRY,
    STUDENT_PDF_ENTRY,
    TEMPLATE_PDF_ENTRY,
    HTML_ENTRY,
];

/// `{course}_{title}_Export.zip`, every whitespace run in the title
/// replaced by a single underscore
pub fn archive_name(assignment: &Assignment) -> String {
    let mut title = String::with_capacity(assignment.title.len());
    let mut in_space = false;
    for c in assignment.title.chars() {
        if c.is_whitespace() {
            if !in_space {
                title.push('_');
            }
            in_space = true;
        } else {
            title.push(c);
            in_space = false;
        }
    }
    format!("{}_{}_Export.zip", assignment.course_code, title)
}

/// A finished archive
#[derive(Debug, Clone)]
pub struct Bundle {
    /// Archive file name
    pub file_name: String,
    /// Zip bytes
    pub bytes: Vec<u8>,
}

/// Destination for finished archives
pub trait ArchiveSink {
    /// Store a bundle, returning where it went
    fn save(&self, bundle: &Bundle) -> Result<PathBuf>;
}

/// Writes archives into a directory
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Where a bundle lands; path separators in the name become `_`
    pub fn path_for(&self, bundle: &Bundle) -> PathBuf {
        self.dir.join(bundle.file_name.replace(['/', '\\'], "_"))
    }
}

impl ArchiveSink for DirectorySink {
    fn save(&self, bundle: &Bundle) -> Result<PathBuf> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)?;
        }

        let path = self.path_for(bundle);
        write_atomic(&path, &path.with_extension("zip.tmp"), &bundle.bytes)?;
        Ok(path)
    }
}

/// Builds export bundles
pub struct BundlePackager {
    exports: ExportManager,
}

impl BundlePackager {
    pub fn new(config: &Config) -> Self {
        Self::with_exports(ExportManager::new(config))
    }

    pub fn with_exports(exports: ExportManager) -> Self {
        Self { exports }
    }

    /// Render every artifact and zip them
    pub fn package(&self, assignment: &Assignment) -> Result<Bundle> {
        let entries = self.exports.export_all(assignment)?;

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        for (name, bytes) in &entries {
            zip.start_file(name.as_str(), options)?;
            zip.write_all(bytes)?;
            debug!("Added {} ({} bytes)", name, bytes.len());
        }
        let bytes = zip.finish()?.into_inner();

        Ok(Bundle {
            file_name: archive_name(assignment),
            bytes,
        })
    }

    /// Package and hand the archive to `sink`
    pub fn export(&self, assignment: &Assignment, sink: &dyn ArchiveSink) -> Result<PathBuf> {
        let bundle = self.package(assignment)?;
        let location = sink.save(&bundle)?;
        info!(
            "Exported {} ({} bytes) to {}",
            bundle.file_name,
            bundle.bytes.len(),
            location.display()
        );
        Ok(location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assignment::{example_assignment, SubmissionType};
    use crate::error::AmError;
    use crate::export::converter::SpecAssignment;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use std::io::Read;
    use zip::ZipArchive;

    fn sample() -> Assignment {
        example_assignment(NaiveDate::from_ymd_opt(2025, 1, 10).unwrap())
    }

    fn read_entries(bytes: &[u8]) -> Vec<(String, Vec<u8>)> {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        (0..archive.len())
            .map(|i| {
                let mut file = archive.by_index(i).unwrap();
                let mut data = Vec::new();
                file.read_to_end(&mut data).unwrap();
                (file.name().to_string(), data)
            })
            .collect()
    }

    #[test]
    fn test_archive_name() {
        let mut a = Assignment::new("ENG6", "Mini Project  2:\tMotion");
        assert_eq!(archive_name(&a), "ENG6_Mini_Project_2:_Motion_Export.zip");

        a.title = " Lab ".to_string();
        assert_eq!(archive_name(&a), "ENG6__Lab__Export.zip");
    }

    #[test]
    fn test_bundle_has_five_entries() {
        let bundle = BundlePackager::new(&Config::default()).package(&sample()).unwrap();
        let names: Vec<_> = read_entries(&bundle.bytes).into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, BUNDLE_ENTRIES.to_vec());
    }

    #[test]
    fn test_backup_entry_is_deep_equal() {
        let a = sample();
        let bundle = BundlePackager::new(&Config::default()).package(&a).unwrap();
        let entries = read_entries(&bundle.bytes);

        let backup = &entries.iter().find(|(n, _)| n == BACKUP_ENTRY).unwrap().1;
        let back: Assignment = serde_json::from_slice(backup).unwrap();
        assert_eq!(back, a);
    }

    #[test]
    fn test_spec_entry_points() {
        let a = sample();
        let bundle = BundlePackager::new(&Config::default()).package(&a).unwrap();
        let entries = read_entries(&bundle.bytes);

        let spec = &entries.iter().find(|(n, _)| n == SPEC_ENTRY).unwrap().1;
        let spec: SpecAssignment = serde_json::from_slice(spec).unwrap();
        assert_eq!(spec.total_points, a.total_points());
        assert_eq!(spec.problems.len(), a.problems.len());
    }

    #[test]
    fn test_pdf_entries_differ_by_mode() {
        let bundle = BundlePackager::new(&Config::default()).package(&sample()).unwrap();
        let entries = read_entries(&bundle.bytes);

        let student = &entries.iter().find(|(n, _)| n == STUDENT_PDF_ENTRY).unwrap().1;
        let template = &entries.iter().find(|(n, _)| n == TEMPLATE_PDF_ENTRY).unwrap().1;
        assert!(student.starts_with(b"%PDF-"));
        assert!(template.starts_with(b"%PDF-"));
        assert_ne!(student, template);
    }

    #[test]
    fn test_packaging_is_deterministic() {
        let a = sample();
        let packager = BundlePackager::new(&Config::default());
        assert_eq!(packager.package(&a).unwrap().bytes, packager.package(&a).unwrap().bytes);
    }

    #[test]
    fn test_directory_sink() {
        let dir = tempfile::tempdir().unwrap();
        let mut a = sample();
        a.course_code = "ENG/6".to_string();
        a.title = "Lab 1".to_string();

        let sink = DirectorySink::new(dir.path().join("exports"));
        let path = BundlePackager::new(&Config::default()).export(&a, &sink).unwrap();

        assert_eq!(path.file_name().unwrap(), "ENG_6_Lab_1_Export.zip");
        assert!(path.exists());
        let leftovers: Vec<_> = fs::read_dir(dir.path().join("exports"))
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().map(|x| x == "tmp").unwrap_or(false))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_directory_sink_failure_leaves_no_partial_archive() {
        let dir = tempfile::tempdir().unwrap();
        let a = sample();
        let sink = DirectorySink::new(dir.path());
        let packager = BundlePackager::new(&Config::default());

        // Occupy the archive path with a non-empty directory
        let taken = dir.path().join(archive_name(&a));
        fs::create_dir(&taken).unwrap();
        fs::write(taken.join("keep"), "x").unwrap();

        assert!(packager.export(&a, &sink).is_err());
        assert!(!taken.with_extension("zip.tmp").exists());
        assert!(taken.join("keep").exists());
    }

    struct FailingSink;

    impl ArchiveSink for FailingSink {
        fn save(&self, _bundle: &Bundle) -> Result<PathBuf> {
            Err(AmError::Archive("disk full".to_string()))
        }
    }

    #[test]
    fn test_sink_failure_propagates() {
        let mut a = sample();
        a.problems[0].subsections[0].submission_type = SubmissionType::Code;
        let result = BundlePackager::new(&Config::default()).export(&a, &FailingSink);
        assert!(matches!(result, Err(AmError::Archive(_))));
    }
}
