//! `diagdoc diagrams` command implementation.

use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use diagdoc_config::{CliSettings, Config, DiagramsConfig};
use diagdoc_diagrams::{
    DiagramGenerator, DiagramLanguage, Graphviz, PlantUml, RenderTool, catalog,
};

use crate::error::CliError;
use crate::output::Output;

/// Which renderers to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub(crate) enum ToolSelection {
    Graphviz,
    #[value(name = "plantuml")]
    PlantUml,
    #[default]
    All,
}

impl ToolSelection {
    fn includes(self, language: DiagramLanguage) -> bool {
        match self {
            Self::All => true,
            Self::Graphviz => language == DiagramLanguage::Graphviz,
            Self::PlantUml => language == DiagramLanguage::PlantUml,
        }
    }
}

/// Arguments for the diagrams command.
#[derive(Args)]
pub(crate) struct DiagramsArgs {
    /// Renderer to run.
    #[arg(long, value_enum, default_value_t)]
    pub(crate) tool: ToolSelection,

    /// Output directory for sources and images (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
}

impl DiagramsArgs {
    pub(crate) fn execute(self, config_path: Option<&Path>) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            diagrams_output_dir: self.output_dir,
            ..CliSettings::default()
        };
        let config = Config::load(config_path, Some(&cli_settings))?;

        render_diagrams(&output, &config.diagrams_resolved, self.tool)
    }
}

/// Write and render the selected diagram sets.
///
/// Renderer failures are reported as warnings; only source write errors fail.
pub(crate) fn render_diagrams(
    output: &Output,
    diagrams: &DiagramsConfig,
    selection: ToolSelection,
) -> Result<(), CliError> {
    let generator =
        DiagramGenerator::new(&diagrams.output_dir).with_plantuml_dpi(diagrams.plantuml_dpi);

    if selection.includes(DiagramLanguage::Graphviz) {
        let tool = Graphviz {
            executable: diagrams.graphviz.clone(),
            dpi: diagrams.dpi,
        };
        run_tool(output, &generator, &tool)?;
    }
    if selection.includes(DiagramLanguage::PlantUml) {
        let tool = PlantUml {
            java: diagrams.java.clone(),
            jar: diagrams.plantuml_jar.clone(),
        };
        run_tool(output, &generator, &tool)?;
    }
    Ok(())
}

fn run_tool(
    output: &Output,
    generator: &DiagramGenerator,
    tool: &dyn RenderTool,
) -> Result<(), CliError> {
    let language = tool.language();
    output.highlight(&format!("Rendering {} diagrams", language.tool_name()));

    let report = generator.generate(tool)?;

    for png in &report.rendered {
        output.info(&format!("  Generated {}", png.display()));
    }
    for failure in &report.failures {
        output.warning(&format!("  Failed: {}", failure.input.display()));
        if !failure.stderr.is_empty() {
            output.warning(&format!("    {}", failure.stderr));
        }
    }
    if let Some(reason) = &report.missing_tool {
        output.warning(&format!("  {reason}"));
        output.warning(&format!("  {}", install_hint(language)));
    }

    let total = catalog::sources(language).len();
    let message = format!(
        "{}/{total} {} diagrams rendered in {}",
        report.rendered.len(),
        language.tool_name(),
        generator.source_dir(language).display()
    );
    if report.is_success() {
        output.success(&message);
    } else {
        output.warning(&message);
    }
    Ok(())
}

fn install_hint(language: DiagramLanguage) -> &'static str {
    match language {
        DiagramLanguage::Graphviz => {
            "Install Graphviz (https://graphviz.org/download/) or set diagrams.graphviz"
        }
        DiagramLanguage::PlantUml => {
            "Download plantuml.jar from https://plantuml.com/download and set diagrams.plantuml_jar"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_selection() {
        assert!(ToolSelection::All.includes(DiagramLanguage::Graphviz));
        assert!(ToolSelection::All.includes(DiagramLanguage::PlantUml));
        assert!(ToolSelection::Graphviz.includes(DiagramLanguage::Graphviz));
        assert!(!ToolSelection::Graphviz.includes(DiagramLanguage::PlantUml));
        assert!(!ToolSelection::PlantUml.includes(DiagramLanguage::Graphviz));
    }
}
