//! Configuration management for assignment-maker

use crate::error::{AmError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// MathJax loader referenced by the HTML rendering
pub const DEFAULT_MATH_SCRIPT_URL: &str = "https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage settings
    pub storage: StorageConfig,
    /// Export settings
    pub export: ExportConfig,
    /// PDF document settings
    pub document: DocumentConfig,
}

impl Config {
    /// Parse a TOML configuration
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| AmError::Toml(e.to_string()))
    }

    /// Load from `path`, or defaults if the file does not exist
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
            .map_err(|e| e.with_context(format!("Failed to parse {}", path.display())))
    }

    /// Render as pretty TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| AmError::Toml(e.to_string()))
    }
}

/// Storage-related configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Data directory; the platform data dir when unset
    pub dir: Option<PathBuf>,
}

/// Export-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory bundles are saved into
    pub output_dir: PathBuf,
    /// Math rendering script referenced by the HTML output
    pub math_script_url: String,
    /// Deflate PDF content streams
    pub compress_pdf_streams: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            math_script_url: DEFAULT_MATH_SCRIPT_URL.to_string(),
            compress_pdf_streams: true,
        }
    }
}

/// Paper size for generated documents
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSize {
    /// 210 x 297 mm
    #[default]
    A4,
    /// 8.5 x 11 in
    Letter,
}

impl PageSize {
    /// Page dimensions in millimeters (width, height)
    pub fn dimensions_mm(&self) -> (f32, f32) {
        match self {
            PageSize::A4 => (210.0, 297.0),
            PageSize::Letter => (215.9, 279.4),
        }
    }
}

/// Document layout configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    /// Paper size
    pub page_size: PageSize,
    /// Left/right margin in millimeters
    pub margin_mm: f32,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            page_size: PageSize::A4,
            margin_mm: 20.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.storage.dir.is_none());
        assert!(config.export.compress_pdf_streams);
        assert_eq!(config.document.page_size, PageSize::A4);
        assert_eq!(config.document.margin_mm, 20.0);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml = config.to_toml_string().unwrap();
        assert!(toml.contains("[export]"));
        assert!(toml.contains("[document]"));

        let config2 = Config::from_toml_str(&toml).unwrap();
        assert_eq!(config.export.math_script_url, config2.export.math_script_url);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = Config::from_toml_str("[document]\npage_size = \"letter\"\n").unwrap();
        assert_eq!(config.document.page_size, PageSize::Letter);
        assert_eq!(config.document.margin_mm, 20.0);
        assert_eq!(config.export.output_dir, PathBuf::from("."));
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            Config::from_toml_str("[document]\npage_size = 3\n"),
            Err(AmError::Toml(_))
        ));
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.document.page_size, PageSize::A4);
    }
}
