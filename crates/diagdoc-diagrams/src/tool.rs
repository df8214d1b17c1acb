//! External renderer invocations.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::DiagramLanguage;

/// An external program that converts one diagram source file to PNG.
pub trait RenderTool {
    /// Language this tool renders.
    fn language(&self) -> DiagramLanguage;

    /// Check prerequisites that can be verified without running the tool.
    ///
    /// Returns a human-readable reason when the tool cannot run at all.
    fn preflight(&self) -> Result<(), String> {
        Ok(())
    }

    /// Build the command converting `input`.
    fn command(&self, input: &Path) -> Command;

    /// Path of the PNG produced for `input`.
    fn output_path(&self, input: &Path) -> PathBuf {
        input.with_extension("png")
    }
}

/// Graphviz `dot`: `dot -Tpng -Gdpi=<dpi> <input> -o <output>`.
#[derive(Debug, Clone)]
pub struct Graphviz {
    pub executable: String,
    pub dpi: u32,
}

impl Default for Graphviz {
    fn default() -> Self {
        Self {
            executable: "dot".to_owned(),
            dpi: 300,
        }
    }
}

impl RenderTool for Graphviz {
    fn language(&self) -> DiagramLanguage {
        DiagramLanguage::Graphviz
    }

    fn command(&self, input: &Path) -> Command {
        let mut cmd = Command::new(&self.executable);
        cmd.arg("-Tpng")
            .arg(format!("-Gdpi={}", self.dpi))
            .arg(input)
            .arg("-o")
            .arg(self.output_path(input));
        cmd
    }
}

/// `PlantUML` via Java: `java -jar <jar> -tpng <input>`.
///
/// Runs in the input's directory; `PlantUML` writes `<stem>.png` next to the
/// source.
#[derive(Debug, Clone)]
pub struct PlantUml {
    pub java: String,
    pub jar: PathBuf,
}

impl RenderTool for PlantUml {
    fn language(&self) -> DiagramLanguage {
        DiagramLanguage::PlantUml
    }

    fn preflight(&self) -> Result<(), String> {
        if self.jar.is_file() {
            Ok(())
        } else {
            Err(format!("PlantUML jar not found at {}", self.jar.display()))
        }
    }

    fn command(&self, input: &Path) -> Command {
        // The working directory changes, so the jar path must not be relative
        let jar = std::path::absolute(&self.jar).unwrap_or_else(|_| self.jar.clone());

        let mut cmd = Command::new(&self.java);
        cmd.arg("-jar").arg(jar).arg("-tpng");
        match (input.parent(), input.file_name()) {
            (Some(dir), Some(name)) if !dir.as_os_str().is_empty() => {
                cmd.arg(name).current_dir(dir);
            }
            _ => {
                cmd.arg(input);
            }
        }
        cmd
    }
}
