//! Export command
//!
//! Build the submission bundle for an assignment, or a single artifact.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use am_core::export::{BundlePackager, DirectorySink, ExportManager};

use super::AppContext;

/// Single-artifact formats
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// Submission-system spec JSON
    Spec,
    /// Verbatim assignment JSON
    Backup,
    /// Student document (PDF)
    Pdf,
    /// Fillable answer template (PDF)
    Template,
    /// Static HTML page
    Html,
}

impl ExportFormat {
    fn name(&self) -> &'static str {
        match self {
            ExportFormat::Spec => "spec",
            ExportFormat::Backup => "backup",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Template => "template",
            ExportFormat::Html => "html",
        }
    }
}

/// Arguments for the export command
#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Assignment ID to export
    pub id: String,

    /// Export one artifact instead of the whole bundle
    #[arg(long, short, value_enum)]
    pub format: Option<ExportFormat>,

    /// Output file for a single artifact (stdout if not specified)
    #[arg(long, short, requires = "format")]
    pub output: Option<PathBuf>,

    /// Directory for the bundle (overrides the configuration)
    #[arg(long, conflicts_with = "format")]
    pub output_dir: Option<PathBuf>,
}

/// Execute the export command
pub fn execute(ctx: &AppContext, args: ExportArgs) -> Result<()> {
    let manager = ctx.manager()?;
    let assignment = manager.require(&args.id)?;

    if let Some(format) = args.format {
        let exports = ExportManager::new(&ctx.config);

        if let Some(output_path) = args.output {
            exports
                .export_to_file(&assignment, format.name(), &output_path)
                .with_context(|| format!("Failed to write to {}", output_path.display()))?;
            eprintln!("{} Exported to {}", "✓".green(), output_path.display());
        } else {
            let output = exports.export(&assignment, format.name())?;
            std::io::stdout()
                .write_all(&output)
                .context("Failed to write to stdout")?;
        }
        return Ok(());
    }

    let output_dir = args
        .output_dir
        .unwrap_or_else(|| ctx.config.export.output_dir.clone());
    tracing::info!("Bundle output directory: {:?}", output_dir);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message(format!(
        "Exporting {} {}...",
        assignment.course_code, assignment.title
    ));

    let result = BundlePackager::new(&ctx.config).export(&assignment, &DirectorySink::new(&output_dir));
    spinner.finish_and_clear();

    let path = result.context("Export failed")?;
    println!("{} Exported to {}", "✓".green(), path.display());
    Ok(())
}
