//! `diagdoc document` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use diagdoc_builder::DocumentBuilder;
use diagdoc_config::{CliSettings, Config, ConfigError, DocumentProfile};

use crate::error::CliError;
use crate::output::Output;

/// Shown after documents are written: Word fills the TOC field on refresh.
pub(crate) const TOC_REMINDER: &str = "Open the document and update fields \
    (right-click the table of contents > Update Field, or press F9) to fill in the table of contents.";

/// Arguments for the document command.
#[derive(Args)]
pub(crate) struct DocumentArgs {
    /// Document profile name (default: first configured document).
    name: Option<String>,

    /// Markdown source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Output directory for the generated document (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
}

impl DocumentArgs {
    pub(crate) fn execute(self, config_path: Option<&Path>) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            output_dir: self.output_dir,
            ..CliSettings::default()
        };
        let config = Config::load(config_path, Some(&cli_settings))?;

        let profile = match self.name.as_deref() {
            Some(name) => config.document(name)?,
            None => config.documents.first().ok_or_else(|| {
                ConfigError::Validation("no documents configured".to_owned())
            })?,
        };

        build_document(&output, profile)?;
        output.info(TOC_REMINDER);
        Ok(())
    }
}

/// Build one document and report appendices on the terminal.
pub(crate) fn build_document(output: &Output, profile: &DocumentProfile) -> Result<(), CliError> {
    output.highlight(&format!("Building {}", profile.name));
    output.info(&format!("Source: {}", profile.primary.display()));

    let report = DocumentBuilder::new(profile).build()?;

    for title in &report.appendices_included {
        output.info(&format!("  Appendix: {title}"));
    }
    for title in &report.appendices_skipped {
        output.warning(&format!("  Appendix skipped: {title}"));
    }
    output.success(&format!("Document written to {}", report.output.display()));
    Ok(())
}
