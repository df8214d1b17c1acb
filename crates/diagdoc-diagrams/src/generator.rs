//! Writing diagram sources and converting them to PNG.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::catalog::{self, DiagramSource};
use crate::plantuml::inject_dpi;
use crate::{DiagramError, DiagramLanguage, RenderTool};

/// One conversion that the renderer rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderFailure {
    pub input: PathBuf,
    /// Captured standard error, trimmed.
    pub stderr: String,
}

/// Outcome of rendering a batch of diagram sources.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RenderReport {
    /// PNG files produced, in input order.
    pub rendered: Vec<PathBuf>,
    pub failures: Vec<RenderFailure>,
    /// Set when the tool could not run; later inputs were not attempted.
    pub missing_tool: Option<String>,
}

impl RenderReport {
    /// Whether every input was rendered.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty() && self.missing_tool.is_none()
    }
}

/// Writes the built-in diagram sources and drives a [`RenderTool`] over them.
#[derive(Debug, Clone)]
pub struct DiagramGenerator {
    output_dir: PathBuf,
    plantuml_dpi: Option<u32>,
}

impl DiagramGenerator {
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            plantuml_dpi: None,
        }
    }

    /// Inject `skinparam dpi` into `PlantUML` sources when writing them.
    #[must_use]
    pub fn with_plantuml_dpi(mut self, dpi: Option<u32>) -> Self {
        self.plantuml_dpi = dpi;
        self
    }

    /// Directory the sources and images of `language` are written to.
    #[must_use]
    pub fn source_dir(&self, language: DiagramLanguage) -> PathBuf {
        match language.subdir() {
            Some(subdir) => self.output_dir.join(subdir),
            None => self.output_dir.clone(),
        }
    }

    /// Write every built-in source of `language` to its source directory.
    ///
    /// Returns the written paths in catalog order.
    pub fn write_sources(&self, language: DiagramLanguage) -> Result<Vec<PathBuf>, DiagramError> {
        self.write_all(&self.source_dir(language), catalog::sources(language))
    }

    fn write_all(&self, dir: &Path, sources: &[DiagramSource]) -> Result<Vec<PathBuf>, DiagramError> {
        std::fs::create_dir_all(dir).map_err(|source| DiagramError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut written = Vec::with_capacity(sources.len());
        for diagram in sources {
            let path = dir.join(diagram.file_name());
            let content = match (diagram.language, self.plantuml_dpi) {
                (DiagramLanguage::PlantUml, Some(dpi)) => inject_dpi(diagram.source, dpi),
                _ => diagram.source.to_owned(),
            };
            std::fs::write(&path, content).map_err(|source| DiagramError::Write {
                path: path.clone(),
                source,
            })?;
            tracing::debug!(path = %path.display(), "Wrote diagram source");
            written.push(path);
        }

        tracing::info!(
            count = written.len(),
            dir = %dir.display(),
            "Wrote diagram sources"
        );
        Ok(written)
    }

    /// Convert each input with `tool`.
    ///
    /// A failed conversion is recorded and the next input is tried. When the
    /// tool's executable cannot be found, the remaining inputs are skipped.
    pub fn render(&self, tool: &dyn RenderTool, inputs: &[PathBuf]) -> RenderReport {
        let tool_name = tool.language().tool_name();
        let mut report = RenderReport::default();

        if let Err(reason) = tool.preflight() {
            tracing::warn!(tool = tool_name, "{reason}");
            report.missing_tool = Some(reason);
            return report;
        }

        for input in inputs {
            let mut cmd = tool.command(input);
            let output = match cmd.output() {
                Ok(output) => output,
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    let reason = format!(
                        "{tool_name} executable not found: {}",
                        cmd.get_program().to_string_lossy()
                    );
                    tracing::warn!(tool = tool_name, "{reason}");
                    report.missing_tool = Some(reason);
                    break;
                }
                Err(e) => {
                    tracing::warn!(input = %input.display(), error = %e, "Failed to run renderer");
                    report.failures.push(RenderFailure {
                        input: input.clone(),
                        stderr: e.to_string(),
                    });
                    continue;
                }
            };

            if output.status.success() {
                let png = tool.output_path(input);
                tracing::info!(path = %png.display(), "Rendered diagram");
                report.rendered.push(png);
            } else {
                let stderr = String::from_utf8_lossy(&output.stderr).trim().to_owned();
                tracing::warn!(
                    input = %input.display(),
                    status = %output.status,
                    stderr = %stderr,
                    "Renderer failed"
                );
                report.failures.push(RenderFailure {
                    input: input.clone(),
                    stderr,
                });
            }
        }

        report
    }

    /// Write the sources of the tool's language, then render them.
    pub fn generate(&self, tool: &dyn RenderTool) -> Result<RenderReport, DiagramError> {
        let inputs = self.write_sources(tool.language())?;
        Ok(self.render(tool, &inputs))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{Graphviz, PlantUml};

    #[test]
    fn test_write_sources_graphviz() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("graphviz_diagrams");
        let generator = DiagramGenerator::new(&out);

        let written = generator.write_sources(DiagramLanguage::Graphviz).unwrap();

        assert_eq!(written.len(), 6);
        assert_eq!(written[0], out.join("system_architecture.dot"));
        let content = std::fs::read_to_string(out.join("arp_loss.dot")).unwrap();
        assert!(content.starts_with("digraph arp_loss"));
    }

    #[test]
    fn test_write_sources_plantuml_with_dpi() {
        let dir = tempfile::tempdir().unwrap();
        let generator = DiagramGenerator::new(dir.path()).with_plantuml_dpi(Some(200));

        let written = generator.write_sources(DiagramLanguage::PlantUml).unwrap();

        assert_eq!(written.len(), 4);
        let content = std::fs::read_to_string(&written[0]).unwrap();
        let mut lines = content.lines();
        assert!(lines.next().unwrap().starts_with("@startuml"));
        assert_eq!(lines.next(), Some("skinparam dpi 200"));
    }

    #[test]
    fn test_write_sources_plantuml_without_dpi_is_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let generator = DiagramGenerator::new(dir.path());

        let written = generator.write_sources(DiagramLanguage::PlantUml).unwrap();

        let content = std::fs::read_to_string(&written[1]).unwrap();
        assert_eq!(content, catalog::sources(DiagramLanguage::PlantUml)[1].source);
    }

    #[test]
    fn test_same_named_diagrams_kept_apart() {
        let dir = tempfile::tempdir().unwrap();
        let generator = DiagramGenerator::new(dir.path());

        let dot = generator.write_sources(DiagramLanguage::Graphviz).unwrap();
        let puml = generator.write_sources(DiagramLanguage::PlantUml).unwrap();

        assert_eq!(dot[3], dir.path().join("roaming_sequence.dot"));
        assert_eq!(puml[1], dir.path().join("plantuml/roaming_sequence.puml"));
        let tool = Graphviz::default();
        assert_ne!(tool.output_path(&dot[3]), tool.output_path(&puml[1]));
    }

    #[test]
    fn test_write_sources_error_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "").unwrap();
        let generator = DiagramGenerator::new(blocker.join("sub"));

        let err = generator
            .write_sources(DiagramLanguage::Graphviz)
            .unwrap_err();

        assert!(matches!(err, DiagramError::CreateDir { .. }));
    }

    #[test]
    fn test_render_missing_executable_stops() {
        let dir = tempfile::tempdir().unwrap();
        let generator = DiagramGenerator::new(dir.path());
        let tool = Graphviz {
            executable: "/nonexistent/bin/dot".to_owned(),
            dpi: 300,
        };

        let report = generator.generate(&tool).unwrap();

        assert!(report.rendered.is_empty());
        assert!(report.failures.is_empty());
        assert!(
            report
                .missing_tool
                .as_deref()
                .unwrap()
                .contains("/nonexistent/bin/dot")
        );
        assert!(!report.is_success());
    }

    #[test]
    fn test_render_missing_jar_attempts_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let generator = DiagramGenerator::new(dir.path());
        let tool = PlantUml {
            java: "java".to_owned(),
            jar: dir.path().join("plantuml.jar"),
        };

        let report = generator.generate(&tool).unwrap();

        assert!(report.rendered.is_empty());
        assert!(report.missing_tool.unwrap().contains("plantuml.jar"));
        // Sources are still written for manual conversion
        assert!(dir.path().join("plantuml/generic_sequence.puml").exists());
    }

    #[cfg(unix)]
    mod fake_tools {
        use std::os::unix::fs::PermissionsExt;

        use pretty_assertions::assert_eq;

        use super::*;

        fn script(dir: &Path, name: &str, body: &str) -> PathBuf {
            let path = dir.join(name);
            std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
            path
        }

        #[test]
        fn test_graphviz_all_rendered() {
            let tools = tempfile::tempdir().unwrap();
            let out = tempfile::tempdir().unwrap();
            let dot = script(tools.path(), "dot", r#"printf png > "$5""#);
            let generator = DiagramGenerator::new(out.path());
            let tool = Graphviz {
                executable: dot.to_string_lossy().into_owned(),
                dpi: 300,
            };

            let report = generator.generate(&tool).unwrap();

            assert!(report.is_success());
            assert_eq!(report.rendered.len(), 6);
            assert_eq!(report.rendered[2], out.path().join("message_flow.png"));
            assert!(out.path().join("arp_loss.png").exists());
        }

        #[test]
        fn test_graphviz_failure_continues() {
            let tools = tempfile::tempdir().unwrap();
            let out = tempfile::tempdir().unwrap();
            let dot = script(
                tools.path(),
                "dot",
                r#"case "$3" in *topic_structure*) echo "syntax error in line 3" >&2; exit 1;; esac
printf png > "$5""#,
            );
            let generator = DiagramGenerator::new(out.path());
            let tool = Graphviz {
                executable: dot.to_string_lossy().into_owned(),
                dpi: 300,
            };

            let report = generator.generate(&tool).unwrap();

            assert_eq!(report.rendered.len(), 5);
            assert_eq!(
                report.failures,
                vec![RenderFailure {
                    input: out.path().join("topic_structure.dot"),
                    stderr: "syntax error in line 3".to_owned(),
                }]
            );
            assert_eq!(report.missing_tool, None);
            assert!(out.path().join("arp_loss.png").exists());
        }

        #[test]
        fn test_plantuml_runs_in_output_dir() {
            let tools = tempfile::tempdir().unwrap();
            let out = tempfile::tempdir().unwrap();
            let jar = tools.path().join("plantuml.jar");
            std::fs::write(&jar, "").unwrap();
            // Arguments: -jar <jar> -tpng <file>; output lands in the working directory
            let java = script(
                tools.path(),
                "java",
                r#"test -f "$2" || exit 2
printf png > "$(basename "$4" .puml).png""#,
            );
            let generator = DiagramGenerator::new(out.path());
            let tool = PlantUml {
                java: java.to_string_lossy().into_owned(),
                jar,
            };

            let report = generator.generate(&tool).unwrap();

            assert!(report.is_success(), "{report:?}");
            assert_eq!(report.rendered.len(), 4);
            assert!(out.path().join("plantuml/roaming_sequence.png").exists());
            assert!(out.path().join("plantuml/arp_loss_sequence.png").exists());
        }
    }
}
