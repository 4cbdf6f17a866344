//! File system storage for assignments

use am_core::assignment::{Assignment, AssignmentFile, AssignmentStore};
use am_core::error::{AmError, Result};
use am_core::types::AssignmentId;
use std::fs;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// File system based assignment storage.
///
/// One pretty-printed JSON file per assignment under `assignments/`. File
/// names are derived from a hash of the id so any id string is safe to use.
pub struct FileSystemStore {
    /// Base directory for storage
    base_dir: PathBuf,
    /// Assignments subdirectory
    assignments_dir: PathBuf,
}

impl FileSystemStore {
    /// Create a new file system store
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        let assignments_dir = base_dir.join("assignments");

        let store = Self {
            base_dir,
            assignments_dir,
        };

        store.ensure_dirs()?;
        Ok(store)
    }

    /// Create a store in the platform data directory (~/.assignment-maker as fallback)
    pub fn default_location() -> Result<Self> {
        Self::new(Self::default_dir())
    }

    /// Platform data directory for assignment-maker
    pub fn default_dir() -> PathBuf {
        directories::ProjectDirs::from("com", "assignment-maker", "assignment-maker")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join(".assignment-maker")
            })
    }

    /// Ensure required directories exist
    fn ensure_dirs(&self) -> Result<()> {
        if !self.assignments_dir.exists() {
            fs::create_dir_all(&self.assignments_dir).map_err(|e| {
                AmError::Io(std::io::Error::new(
                    e.kind(),
                    format!("Failed to create assignments directory: {}", e),
                ))
            })?;
            debug!("Created assignments directory: {:?}", self.assignments_dir);
        }
        Ok(())
    }

    /// File stem for an id
    fn file_stem(id: &AssignmentId) -> String {
        let hash = blake3::hash(id.as_str().as_bytes());
        format!("a_{}", &hash.to_hex()[..16])
    }

    /// Get the path for an assignment file
    fn assignment_path(&self, id: &AssignmentId) -> PathBuf {
        self.assignments_dir
            .join(format!("{}.json", Self::file_stem(id)))
    }

    /// Get a temporary path for atomic writes
    fn temp_path(&self, id: &AssignmentId) -> PathBuf {
        self.assignments_dir
            .join(format!(".{}.json.tmp", Self::file_stem(id)))
    }

    /// Write an assignment atomically (write to temp, then rename)
    fn atomic_write(&self, assignment: &Assignment) -> Result<()> {
        let temp_path = self.temp_path(&assignment.id);
        let final_path = self.assignment_path(&assignment.id);

        let file = AssignmentFile::new(assignment.clone());

        let written = fs::File::create(&temp_path)
            .map_err(|e| {
                AmError::Io(std::io::Error::new(
                    e.kind(),
                    format!("Failed to create temp file: {}", e),
                ))
            })
            .and_then(|temp_file| {
                let mut writer = BufWriter::new(temp_file);
                serde_json::to_writer_pretty(&mut writer, &file)?;
                writer.flush()?;
                Ok(())
            })
            .and_then(|()| {
                fs::rename(&temp_path, &final_path).map_err(|e| {
                    AmError::Io(std::io::Error::new(
                        e.kind(),
                        format!("Failed to rename temp file: {}", e),
                    ))
                })
            });

        if let Err(e) = written {
            let _ = fs::remove_file(&temp_path);
            return Err(e);
        }

        debug!("Saved assignment {} to {:?}", assignment.id, final_path);
        Ok(())
    }

    /// Read and parse an assignment file
    fn read_assignment(&self, path: &Path) -> Result<Assignment> {
        let file = fs::File::open(path)?;
        let reader = BufReader::new(file);
        let assignment_file: AssignmentFile = serde_json::from_reader(reader)?;
        assignment_file.into_assignment()
    }

    /// Get base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get assignments directory
    pub fn assignments_dir(&self) -> &PathBuf {
        &self.assignments_dir
    }
}

impl AssignmentStore for FileSystemStore {
    fn save(&self, assignment: &Assignment) -> Result<()> {
        self.atomic_write(assignment)
    }

    fn get(&self, id: &AssignmentId) -> Result<Option<Assignment>> {
        let path = self.assignment_path(id);
        if !path.exists() {
            return Ok(None);
        }

        let assignment = self.read_assignment(&path)?;
        if assignment.id != *id {
            warn!("Assignment file {:?} holds id {}, expected {}", path, assignment.id, id);
            return Ok(None);
        }
        Ok(Some(assignment))
    }

    fn list(&self) -> Result<Vec<Assignment>> {
        let mut assignments = Vec::new();

        let entries = fs::read_dir(&self.assignments_dir).map_err(|e| {
            AmError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read assignments directory: {}", e),
            ))
        })?;

        for entry in entries {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    warn!("Failed to read directory entry: {}", e);
                    continue;
                }
            };

            let path = entry.path();

            // Skip non-json files and temp files
            if !path.extension().map(|e| e == "json").unwrap_or(false) {
                continue;
            }
            if path
                .file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.starts_with('.'))
                .unwrap_or(false)
            {
                continue;
            }

            match self.read_assignment(&path) {
                Ok(assignment) => assignments.push(assignment),
                Err(e) => {
                    warn!("Failed to read assignment file {:?}: {}", path, e);
                }
            }
        }

        Ok(assignments)
    }

    fn delete(&self, id: &AssignmentId) -> Result<()> {
        let path = self.assignment_path(id);

        if !path.exists() {
            return Err(AmError::AssignmentNotFound(id.to_string()));
        }

        fs::remove_file(&path).map_err(|e| {
            AmError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to delete assignment file: {}", e),
            ))
        })?;

        debug!("Deleted assignment {} from {:?}", id, path);
        Ok(())
    }

    fn exists(&self, id: &AssignmentId) -> bool {
        self.assignment_path(id).exists()
    }
}
