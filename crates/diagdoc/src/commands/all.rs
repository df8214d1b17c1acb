//! `diagdoc all` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use diagdoc_config::{CliSettings, Config};

use super::ToolSelection;
use super::diagrams::render_diagrams;
use super::document::{TOC_REMINDER, build_document};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the all command.
#[derive(Args)]
pub(crate) struct AllArgs {
    /// Markdown source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Output directory for generated documents (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
}

impl AllArgs {
    pub(crate) fn execute(self, config_path: Option<&Path>) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            output_dir: self.output_dir,
            ..CliSettings::default()
        };
        let config = Config::load(config_path, Some(&cli_settings))?;

        render_diagrams(&output, &config.diagrams_resolved, ToolSelection::All)?;

        // A broken profile must not keep the others from being built
        let mut failed = 0;
        for profile in &config.documents {
            if let Err(err) = build_document(&output, profile) {
                output.error(&format!("Failed to build {}: {err}", profile.name));
                failed += 1;
            }
        }
        output.info(TOC_REMINDER);

        if failed > 0 {
            return Err(CliError::DocumentsFailed {
                failed,
                total: config.documents.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"
[paths]
source_dir = "docs"
output_dir = "out"

[diagrams]
output_dir = "diagrams"
graphviz = "/nonexistent/bin/dot"
plantuml_jar = "missing/plantuml.jar"

[[documents]]
name = "a"
primary = "MISSING.md"
output = "a.docx"

[[documents]]
name = "b"
primary = "B.md"
output = "b.docx"
"#;

    #[test]
    fn test_all_builds_remaining_documents_after_failure() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("diagdoc.toml");
        std::fs::write(&config_path, CONFIG).unwrap();
        std::fs::create_dir(dir.path().join("docs")).unwrap();
        std::fs::write(dir.path().join("docs/B.md"), "# B\n\nBody text.\n").unwrap();

        let args = AllArgs {
            source_dir: None,
            output_dir: None,
        };
        let err = args.execute(Some(&config_path)).unwrap_err();

        assert!(matches!(
            err,
            CliError::DocumentsFailed {
                failed: 1,
                total: 2
            }
        ));
        assert!(dir.path().join("out/b.docx").exists());
        assert!(!dir.path().join("out/a.docx").exists());
        // Missing renderers are warnings; the sources are still written
        assert!(dir.path().join("diagrams/message_flow.dot").exists());
    }

    #[test]
    fn test_all_succeeds_when_every_document_builds() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("diagdoc.toml");
        std::fs::write(&config_path, CONFIG.replace("MISSING.md", "B.md")).unwrap();
        std::fs::create_dir(dir.path().join("docs")).unwrap();
        std::fs::write(dir.path().join("docs/B.md"), "# B\n").unwrap();

        let args = AllArgs {
            source_dir: None,
            output_dir: None,
        };
        args.execute(Some(&config_path)).unwrap();

        assert!(dir.path().join("out/a.docx").exists());
        assert!(dir.path().join("out/b.docx").exists());
    }
}
