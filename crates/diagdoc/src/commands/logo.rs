//! `diagdoc logo` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use diagdoc_config::{CliSettings, Config};
use diagdoc_diagrams::rasterize_logo;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the logo command.
#[derive(Args)]
pub(crate) struct LogoArgs {
    /// SVG logo to convert (overrides config).
    #[arg(long)]
    svg: Option<PathBuf>,

    /// PNG file to write (overrides config).
    #[arg(long)]
    png: Option<PathBuf>,
}

impl LogoArgs {
    pub(crate) fn execute(self, config_path: Option<&Path>) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            logo_svg: self.svg,
            logo_png: self.png,
            ..CliSettings::default()
        };
        let config = Config::load(config_path, Some(&cli_settings))?;
        let logo = &config.logo_resolved;

        let (width, height) = rasterize_logo(&logo.svg, &logo.png, logo.width, logo.height)?;

        output.success(&format!(
            "Logo written to {} ({width}x{height})",
            logo.png.display()
        ));
        Ok(())
    }
}
