//! Configuration management for diagdoc.
//!
//! Parses `diagdoc.toml` with serde and discovers the file in the current
//! directory or its parents. Without a config file, a built-in profile for the
//! MQTT diagnostic specification is used, with paths relative to the current
//! directory.
//!
//! CLI settings are applied during load via [`CliSettings`].
//!
//! ## Path Resolution
//!
//! - `paths.*` and `diagrams.*` paths are relative to the config file directory
//! - `documents.primary` and `documents.appendices.file` are relative to
//!   `paths.source_dir`
//! - `documents.output` is relative to `paths.output_dir`
//! - `documents.cover_logo`, `documents.page_logo` and `logo.*` are relative
//!   to `paths.assets_dir`
//!
//! ## Environment Variable Expansion
//!
//! `${VAR}` and `${VAR:-default}` are expanded in:
//! - `paths.source_dir`, `paths.assets_dir`, `paths.output_dir`
//! - `diagrams.output_dir`, `diagrams.graphviz`, `diagrams.java`, `diagrams.plantuml_jar`
//! - `logo.svg`, `logo.png`

mod expand;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override markdown source directory.
    pub source_dir: Option<PathBuf>,
    /// Override document output directory.
    pub output_dir: Option<PathBuf>,
    /// Override diagram output directory.
    pub diagrams_output_dir: Option<PathBuf>,
    /// Override logo SVG input.
    pub logo_svg: Option<PathBuf>,
    /// Override logo PNG output.
    pub logo_png: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "diagdoc.toml";

const MAX_DPI: u32 = 1000;

/// Widest image a page can hold, in inches.
const MAX_IMAGE_WIDTH: f64 = 22.0;

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    paths: PathsConfigRaw,
    diagrams: DiagramsConfigRaw,
    logo: LogoConfigRaw,
    /// Document profiles. Paths are resolved after loading.
    pub documents: Vec<DocumentProfile>,

    /// Resolved directories (set after loading).
    #[serde(skip)]
    pub paths_resolved: PathsConfig,
    /// Resolved diagram settings (set after loading).
    #[serde(skip)]
    pub diagrams_resolved: DiagramsConfig,
    /// Resolved logo settings (set after loading).
    #[serde(skip)]
    pub logo_resolved: LogoConfig,
    /// Path to the config file, if one was loaded.
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            paths: PathsConfigRaw::default(),
            diagrams: DiagramsConfigRaw::default(),
            logo: LogoConfigRaw::default(),
            documents: vec![DocumentProfile::mqtt_spec()],
            paths_resolved: PathsConfig::default(),
            diagrams_resolved: DiagramsConfig::default(),
            logo_resolved: LogoConfig::default(),
            config_path: None,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct PathsConfigRaw {
    source_dir: Option<String>,
    assets_dir: Option<String>,
    output_dir: Option<String>,
}

/// Resolved directories.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PathsConfig {
    /// Markdown sources (primary files and appendices).
    pub source_dir: PathBuf,
    /// Logos and other document assets.
    pub assets_dir: PathBuf,
    /// Generated documents.
    pub output_dir: PathBuf,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DiagramsConfigRaw {
    output_dir: Option<String>,
    graphviz: Option<String>,
    dpi: Option<u32>,
    java: Option<String>,
    plantuml_jar: Option<String>,
    plantuml_dpi: Option<u32>,
}

/// Resolved diagram generation settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramsConfig {
    /// Directory receiving `.dot`/`.puml` sources and rendered PNGs.
    pub output_dir: PathBuf,
    /// Graphviz executable.
    pub graphviz: String,
    /// Graphviz output resolution.
    pub dpi: u32,
    /// Java executable used to run `PlantUML`.
    pub java: String,
    /// `PlantUML` jar location.
    pub plantuml_jar: PathBuf,
    /// Inject `skinparam dpi` into `PlantUML` sources when set.
    pub plantuml_dpi: Option<u32>,
}

impl Default for DiagramsConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            graphviz: "dot".to_owned(),
            dpi: 300,
            java: "java".to_owned(),
            plantuml_jar: PathBuf::from("plantuml.jar"),
            plantuml_dpi: None,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct LogoConfigRaw {
    svg: Option<String>,
    png: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
}

/// Resolved header logo rasterization settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoConfig {
    pub svg: PathBuf,
    pub png: PathBuf,
    /// Bounding box width in pixels.
    pub width: u32,
    /// Bounding box height in pixels.
    pub height: u32,
}

impl Default for LogoConfig {
    fn default() -> Self {
        Self {
            svg: PathBuf::from("realtek-logo.svg"),
            png: PathBuf::from("page-logo.png"),
            width: 150,
            height: 75,
        }
    }
}

/// Fonts and sizes (points) of a generated document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TypographyConfig {
    pub body_font: String,
    pub code_font: String,
    pub body_size: u32,
    pub code_size: u32,
    pub title_size: u32,
    pub table_size: u32,
    /// Heading 1 through Heading 5.
    pub heading_sizes: [u32; 5],
}

impl Default for TypographyConfig {
    fn default() -> Self {
        Self {
            body_font: "Times New Roman".to_owned(),
            code_font: "Courier New".to_owned(),
            body_size: 10,
            code_size: 8,
            title_size: 20,
            table_size: 9,
            heading_sizes: [16, 14, 12, 11, 10],
        }
    }
}

/// A secondary file appended after the primary document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppendixConfig {
    /// Markdown or `.txt` file, relative to `paths.source_dir`.
    pub file: PathBuf,
    /// Caption used as the appendix heading.
    pub title: String,
    /// Italic description under the caption.
    #[serde(default)]
    pub description: Option<String>,
}

/// Everything needed to assemble one output document (`[[documents]]`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DocumentProfile {
    /// Profile name, selectable from the CLI.
    pub name: String,
    /// Primary markdown file.
    pub primary: PathBuf,
    /// Output `.docx` file.
    pub output: PathBuf,
    pub title: String,
    pub subtitle: String,
    pub subtitle_size: u32,
    /// Cover page information lines.
    pub metadata: Vec<String>,
    pub metadata_size: u32,
    /// Title shown in the running header; defaults to `title`.
    pub header_title: Option<String>,
    pub toc_title: String,
    pub appendix_heading: String,
    pub cover_logo: PathBuf,
    pub page_logo: PathBuf,
    pub cover_logo_placeholder: String,
    pub logo_placeholder: String,
    /// Width of images embedded from markdown, in inches.
    pub image_width: f64,
    pub image_captions: bool,
    /// Label of missing-image placeholders (`[label: alt]`).
    pub image_label: String,
    /// Label of image captions (`label: alt`).
    pub caption_label: String,
    pub typography: TypographyConfig,
    pub appendices: Vec<AppendixConfig>,
}

impl Default for DocumentProfile {
    fn default() -> Self {
        Self {
            name: String::new(),
            primary: PathBuf::new(),
            output: PathBuf::new(),
            title: String::new(),
            subtitle: String::new(),
            subtitle_size: 12,
            metadata: Vec::new(),
            metadata_size: 10,
            header_title: None,
            toc_title: "Table of Contents".to_owned(),
            appendix_heading: "Appendices".to_owned(),
            cover_logo: PathBuf::from("cover-logo.png"),
            page_logo: PathBuf::from("page-logo.png"),
            cover_logo_placeholder: "[Logo]".to_owned(),
            logo_placeholder: "[Logo]".to_owned(),
            image_width: 3.0,
            image_captions: false,
            image_label: "image".to_owned(),
            caption_label: "Figure".to_owned(),
            typography: TypographyConfig::default(),
            appendices: Vec::new(),
        }
    }
}

impl DocumentProfile {
    /// Built-in profile for the MQTT diagnostic specification.
    #[must_use]
    pub fn mqtt_spec() -> Self {
        let appendix = |file: &str, title: &str, description: &str| AppendixConfig {
            file: PathBuf::from(file),
            title: title.to_owned(),
            description: Some(description.to_owned()),
        };
        Self {
            name: "mqtt-spec".to_owned(),
            primary: PathBuf::from("SPEC.md"),
            output: PathBuf::from("MQTT_Diagnosis_Spec.docx"),
            title: "MQTT Diagnostic Specification".to_owned(),
            subtitle: "Device Diagnostics and Monitoring Protocol".to_owned(),
            metadata: vec![
                "Scope: WiFi diagnostic events, device health monitoring".to_owned(),
                "Protocol: MQTT v3.1.1 / v5.0".to_owned(),
                "Version: v1.0".to_owned(),
            ],
            cover_logo_placeholder: "[Realtek Logo]".to_owned(),
            appendices: vec![
                appendix(
                    "architecture_diagram.txt",
                    "A. System Architecture",
                    "Overall architecture: devices, controller and MQTT broker, with data flow",
                ),
                appendix(
                    "mqtt_flow_diagrams.md",
                    "B. MQTT Message Flows",
                    "MQTT message exchange sequences for each diagnostic scenario",
                ),
                appendix(
                    "connect_failure_example.md",
                    "C. WiFi Connection Failure Example",
                    "The most common connection problems: authentication failures and timeouts",
                ),
                appendix(
                    "arp_loss_example.md",
                    "D. ARP Loss Example",
                    "Link quality diagnosis: packet loss detection and network analysis",
                ),
                appendix(
                    "roaming_diagnosis_example.md",
                    "E. WiFi Roaming Example",
                    "Roaming diagnosis: AP selection and handover analysis",
                ),
            ],
            ..Self::default()
        }
    }

    /// Title shown in the running header.
    #[must_use]
    pub fn header_title(&self) -> &str {
        self.header_title.as_deref().unwrap_or(&self.title)
    }

    fn resolve(&mut self, paths: &PathsConfig) {
        self.primary = paths.source_dir.join(&self.primary);
        self.output = paths.output_dir.join(&self.output);
        self.cover_logo = paths.assets_dir.join(&self.cover_logo);
        self.page_logo = paths.assets_dir.join(&self.page_logo);
        for appendix in &mut self.appendices {
            appendix.file = paths.source_dir.join(&appendix.file);
        }
    }

    fn validate(&self, index: usize) -> Result<(), ConfigError> {
        let field = |name: &str| format!("documents[{index}].{name}");
        require_non_empty(&self.name, &field("name"))?;
        require_non_empty_path(&self.primary, &field("primary"))?;
        require_non_empty_path(&self.output, &field("output"))?;
        let width = self.image_width;
        if !width.is_finite() || width <= 0.0 || width > MAX_IMAGE_WIDTH {
            return Err(ConfigError::Validation(format!(
                "{} must be greater than 0 and at most {MAX_IMAGE_WIDTH} inches",
                field("image_width")
            )));
        }
        for (i, appendix) in self.appendices.iter().enumerate() {
            require_non_empty_path(&appendix.file, &field(&format!("appendices[{i}].file")))?;
        }
        Ok(())
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`diagrams.plantuml_jar`").
        field: String,
        /// Error message (e.g., "${`PLANTUML_JAR`} not set").
        message: String,
    },
    /// No profile with the requested name.
    #[error("No document named '{name}' (available: {available})")]
    UnknownDocument {
        /// Requested name.
        name: String,
        /// Comma-separated configured names.
        available: String,
    },
}

fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

fn require_non_empty_path(value: &Path, field: &str) -> Result<(), ConfigError> {
    if value.as_os_str().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

fn require_dpi(dpi: u32, field: &str) -> Result<(), ConfigError> {
    if dpi == 0 {
        return Err(ConfigError::Validation(format!(
            "{field} must be greater than 0"
        )));
    }
    if dpi > MAX_DPI {
        return Err(ConfigError::Validation(format!(
            "{field} cannot exceed {MAX_DPI}"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise, searches
    /// for `diagdoc.toml` in the current directory and parents, falling back
    /// to the built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// an environment variable is missing or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path, cli_settings)
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered, cli_settings)
        } else {
            let cwd = std::env::current_dir()?;
            Self::default().finish(&cwd, cli_settings)
        }
    }

    /// Look up a document profile by name.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownDocument` if no profile has that name.
    pub fn document(&self, name: &str) -> Result<&DocumentProfile, ConfigError> {
        self.documents
            .iter()
            .find(|doc| doc.name == name)
            .ok_or_else(|| ConfigError::UnknownDocument {
                name: name.to_owned(),
                available: self
                    .documents
                    .iter()
                    .map(|doc| doc.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(
        path: &Path,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.finish(config_dir, cli_settings)
    }

    /// Resolve paths, apply CLI settings and validate.
    fn finish(
        mut self,
        base: &Path,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        self.resolve_paths(base);
        if let Some(settings) = cli_settings {
            self.apply_cli_settings(settings);
        }
        // Emptiness checks need the unresolved document paths.
        self.validate()?;
        self.resolve_documents();
        Ok(self)
    }

    /// Apply CLI settings to the resolved configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.paths_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(output_dir) = &settings.output_dir {
            self.paths_resolved.output_dir.clone_from(output_dir);
        }
        if let Some(output_dir) = &settings.diagrams_output_dir {
            self.diagrams_resolved.output_dir.clone_from(output_dir);
        }
        if let Some(svg) = &settings.logo_svg {
            self.logo_resolved.svg.clone_from(svg);
        }
        if let Some(png) = &settings.logo_png {
            self.logo_resolved.png.clone_from(png);
        }
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_documents()?;
        self.validate_diagrams()?;

        if self.logo_resolved.width == 0 || self.logo_resolved.height == 0 {
            return Err(ConfigError::Validation(
                "logo.width and logo.height must be greater than 0".to_owned(),
            ));
        }
        Ok(())
    }

    fn validate_documents(&self) -> Result<(), ConfigError> {
        if self.documents.is_empty() {
            return Err(ConfigError::Validation(
                "at least one [[documents]] entry is required".to_owned(),
            ));
        }

        let mut names = HashSet::new();
        for (index, doc) in self.documents.iter().enumerate() {
            doc.validate(index)?;
            if !names.insert(doc.name.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate document name '{}'",
                    doc.name
                )));
            }
        }
        Ok(())
    }

    fn validate_diagrams(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.diagrams_resolved.graphviz, "diagrams.graphviz")?;
        require_non_empty(&self.diagrams_resolved.java, "diagrams.java")?;
        require_dpi(self.diagrams_resolved.dpi, "diagrams.dpi")?;
        if let Some(dpi) = self.diagrams_resolved.plantuml_dpi {
            require_dpi(dpi, "diagrams.plantuml_dpi")?;
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        expand::expand_opt(&mut self.paths.source_dir, "paths.source_dir")?;
        expand::expand_opt(&mut self.paths.assets_dir, "paths.assets_dir")?;
        expand::expand_opt(&mut self.paths.output_dir, "paths.output_dir")?;

        expand::expand_opt(&mut self.diagrams.output_dir, "diagrams.output_dir")?;
        expand::expand_opt(&mut self.diagrams.graphviz, "diagrams.graphviz")?;
        expand::expand_opt(&mut self.diagrams.java, "diagrams.java")?;
        expand::expand_opt(&mut self.diagrams.plantuml_jar, "diagrams.plantuml_jar")?;

        expand::expand_opt(&mut self.logo.svg, "logo.svg")?;
        expand::expand_opt(&mut self.logo.png, "logo.png")?;
        Ok(())
    }

    /// Resolve directories and tool settings against the config directory.
    fn resolve_paths(&mut self, base: &Path) {
        let resolve = |path: Option<&str>| base.join(path.unwrap_or("."));

        self.paths_resolved = PathsConfig {
            source_dir: resolve(self.paths.source_dir.as_deref()),
            assets_dir: resolve(self.paths.assets_dir.as_deref()),
            output_dir: resolve(self.paths.output_dir.as_deref()),
        };

        let defaults = DiagramsConfig::default();
        self.diagrams_resolved = DiagramsConfig {
            output_dir: self.diagrams.output_dir.as_deref().map_or_else(
                || self.paths_resolved.output_dir.clone(),
                |dir| base.join(dir),
            ),
            graphviz: self.diagrams.graphviz.clone().unwrap_or(defaults.graphviz),
            dpi: self.diagrams.dpi.unwrap_or(defaults.dpi),
            java: self.diagrams.java.clone().unwrap_or(defaults.java),
            plantuml_jar: base.join(
                self.diagrams
                    .plantuml_jar
                    .as_deref()
                    .map_or(defaults.plantuml_jar, PathBuf::from),
            ),
            plantuml_dpi: self.diagrams.plantuml_dpi,
        };

        let defaults = LogoConfig::default();
        let assets = &self.paths_resolved.assets_dir;
        self.logo_resolved = LogoConfig {
            svg: assets.join(self.logo.svg.as_deref().map_or(defaults.svg, PathBuf::from)),
            png: assets.join(self.logo.png.as_deref().map_or(defaults.png, PathBuf::from)),
            width: self.logo.width.unwrap_or(defaults.width),
            height: self.logo.height.unwrap_or(defaults.height),
        };
    }

    /// Resolve document paths against the resolved directories.
    fn resolve_documents(&mut self) {
        for doc in &mut self.documents {
            doc.resolve(&self.paths_resolved);
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn load_str(toml: &str, base: &Path, cli: Option<&CliSettings>) -> Result<Config, ConfigError> {
        let config: Config = toml::from_str(toml)?;
        config.finish(base, cli)
    }

    #[test]
    fn test_default_config() {
        let config = Config::default().finish(Path::new("/work"), None).unwrap();

        assert_eq!(config.documents.len(), 1);
        let doc = &config.documents[0];
        assert_eq!(doc.name, "mqtt-spec");
        assert_eq!(doc.primary, PathBuf::from("/work/SPEC.md"));
        assert_eq!(doc.output, PathBuf::from("/work/MQTT_Diagnosis_Spec.docx"));
        assert_eq!(doc.cover_logo, PathBuf::from("/work/cover-logo.png"));
        assert_eq!(doc.appendices.len(), 5);
        assert_eq!(
            doc.appendices[0].file,
            PathBuf::from("/work/architecture_diagram.txt")
        );
        assert_eq!(doc.header_title(), "MQTT Diagnostic Specification");

        assert_eq!(config.diagrams_resolved.dpi, 300);
        assert_eq!(config.diagrams_resolved.graphviz, "dot");
        assert_eq!(config.diagrams_resolved.output_dir, PathBuf::from("/work/."));
        assert_eq!(
            config.diagrams_resolved.plantuml_jar,
            PathBuf::from("/work/plantuml.jar")
        );
        assert_eq!(config.logo_resolved.width, 150);
        assert_eq!(config.logo_resolved.height, 75);
    }

    #[test]
    fn test_parse_documents() {
        let toml = r#"
[paths]
source_dir = "docs"
assets_dir = "docs/gen_word"
output_dir = "out"

[[documents]]
name = "ha-iot"
primary = "HA_IOT_MCP.md"
output = "HA_IoT.docx"
title = "Home Assistant / MQTT / IoT Device"
subtitle = "MCP integration"
subtitle_size = 14
metadata = ["v1.0"]
header_title = "HA IoT MCP"
image_width = 5.0
image_captions = true

[documents.typography]
body_size = 11
title_size = 18

[[documents.appendices]]
file = "notes.txt"
title = "A. Notes"
"#;
        let config = load_str(toml, Path::new("/project"), None).unwrap();
        let doc = config.document("ha-iot").unwrap();

        assert_eq!(doc.primary, PathBuf::from("/project/docs/HA_IOT_MCP.md"));
        assert_eq!(doc.output, PathBuf::from("/project/out/HA_IoT.docx"));
        assert_eq!(
            doc.page_logo,
            PathBuf::from("/project/docs/gen_word/page-logo.png")
        );
        assert_eq!(doc.subtitle_size, 14);
        assert_eq!(doc.header_title(), "HA IoT MCP");
        assert!(doc.image_captions);
        assert_eq!(doc.typography.body_size, 11);
        assert_eq!(doc.typography.title_size, 18);
        assert_eq!(doc.typography.code_font, "Courier New");
        assert_eq!(
            doc.appendices,
            vec![AppendixConfig {
                file: PathBuf::from("/project/docs/notes.txt"),
                title: "A. Notes".to_owned(),
                description: None,
            }]
        );
        assert_eq!(
            config.logo_resolved.svg,
            PathBuf::from("/project/docs/gen_word/realtek-logo.svg")
        );
    }

    #[test]
    fn test_parse_diagrams() {
        let toml = r#"
[[documents]]
name = "a"
primary = "a.md"
output = "a.docx"

[diagrams]
output_dir = "diagrams"
graphviz = "/usr/local/bin/dot"
dpi = 150
plantuml_jar = "tools/plantuml.jar"
plantuml_dpi = 200
"#;
        let config = load_str(toml, Path::new("/project"), None).unwrap();

        assert_eq!(
            config.diagrams_resolved,
            DiagramsConfig {
                output_dir: PathBuf::from("/project/diagrams"),
                graphviz: "/usr/local/bin/dot".to_owned(),
                dpi: 150,
                java: "java".to_owned(),
                plantuml_jar: PathBuf::from("/project/tools/plantuml.jar"),
                plantuml_dpi: Some(200),
            }
        );
    }

    #[test]
    fn test_cli_settings_override() {
        let cli = CliSettings {
            source_dir: Some(PathBuf::from("/elsewhere/src")),
            output_dir: Some(PathBuf::from("/tmp/out")),
            diagrams_output_dir: Some(PathBuf::from("/tmp/diagrams")),
            logo_svg: None,
            logo_png: Some(PathBuf::from("/tmp/logo.png")),
        };
        let config = Config::default()
            .finish(Path::new("/work"), Some(&cli))
            .unwrap();

        let doc = &config.documents[0];
        assert_eq!(doc.primary, PathBuf::from("/elsewhere/src/SPEC.md"));
        assert_eq!(doc.output, PathBuf::from("/tmp/out/MQTT_Diagnosis_Spec.docx"));
        assert_eq!(config.diagrams_resolved.output_dir, PathBuf::from("/tmp/diagrams"));
        assert_eq!(config.logo_resolved.png, PathBuf::from("/tmp/logo.png"));
        assert_eq!(config.logo_resolved.svg, PathBuf::from("/work/./realtek-logo.svg"));
    }

    #[test]
    fn test_unknown_document() {
        let config = Config::default().finish(Path::new("/work"), None).unwrap();
        let err = config.document("missing").unwrap_err();

        assert!(matches!(err, ConfigError::UnknownDocument { .. }));
        assert!(err.to_string().contains("mqtt-spec"));
    }

    #[test]
    fn test_validation_rejects_bad_dpi() {
        let toml = "[diagrams]\ndpi = 0\n";
        let err = load_str(toml, Path::new("/p"), None).unwrap_err();
        assert!(err.to_string().contains("diagrams.dpi"));

        let toml = "[diagrams]\nplantuml_dpi = 5000\n";
        let err = load_str(toml, Path::new("/p"), None).unwrap_err();
        assert!(err.to_string().contains("cannot exceed 1000"));
    }

    #[test]
    fn test_validation_rejects_duplicate_names() {
        let toml = r#"
[[documents]]
name = "a"
primary = "a.md"
output = "a.docx"

[[documents]]
name = "a"
primary = "b.md"
output = "b.docx"
"#;
        let err = load_str(toml, Path::new("/p"), None).unwrap_err();
        assert!(err.to_string().contains("duplicate document name 'a'"));
    }

    #[test]
    fn test_validation_rejects_empty_fields() {
        let toml = "[[documents]]\nname = \"a\"\nprimary = \"a.md\"\n";
        let err = load_str(toml, Path::new("/p"), None).unwrap_err();
        assert!(err.to_string().contains("documents[0].output cannot be empty"));

        let toml = "[[documents]]\nname = \"a\"\nprimary = \"a.md\"\noutput = \"a.docx\"\nimage_width = 0.0\n";
        let err = load_str(toml, Path::new("/p"), None).unwrap_err();
        assert!(err.to_string().contains("image_width"));
    }

    #[test]
    fn test_validation_rejects_unbounded_image_width() {
        for width in ["inf", "nan", "1e13", "22.5"] {
            let toml = format!(
                "[[documents]]\nname = \"a\"\nprimary = \"a.md\"\noutput = \"a.docx\"\nimage_width = {width}\n"
            );
            let err = load_str(&toml, Path::new("/p"), None).unwrap_err();
            assert!(
                err.to_string().contains("documents[0].image_width"),
                "{width}: {err}"
            );
        }

        let toml = "[[documents]]\nname = \"a\"\nprimary = \"a.md\"\noutput = \"a.docx\"\nimage_width = 22.0\n";
        assert!(load_str(toml, Path::new("/p"), None).is_ok());
    }

    #[test]
    fn test_validation_requires_documents() {
        let toml = "documents = []\n";
        let err = load_str(toml, Path::new("/p"), None).unwrap_err();
        assert!(err.to_string().contains("at least one"));
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let result = Config::load(Some(Path::new("/nonexistent/diagdoc.toml")), None);
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_from_file_resolves_relative_to_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(
            &path,
            r#"
[paths]
source_dir = "${DIAGDOC_TEST_CFG_SRC:-docs}"

[[documents]]
name = "spec"
primary = "SPEC.md"
output = "spec.docx"
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.config_path.as_deref(), Some(path.as_path()));
        assert_eq!(
            config.documents[0].primary,
            dir.path().join("docs").join("SPEC.md")
        );
    }

    #[test]
    fn test_load_env_var_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[diagrams]\ngraphviz = \"${DIAGDOC_TEST_NO_SUCH_VAR}\"\n").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
    }

    #[test]
    fn test_shipped_config_is_valid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, include_str!("../../../diagdoc.toml")).unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        let names: Vec<_> = config.documents.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["mqtt-spec", "ha-iot"]);

        let mqtt = config.document("mqtt-spec").unwrap();
        assert_eq!(mqtt.primary, dir.path().join("docs").join("SPEC.md"));
        assert_eq!(mqtt.appendices.len(), 5);
        assert_eq!(mqtt.toc_title, "目錄");

        let ha = config.document("ha-iot").unwrap();
        assert!(ha.image_captions);
        assert!(ha.appendices.is_empty());
        assert_eq!(ha.header_title(), "HA IoT MCP 整合架構");
        assert_eq!(ha.typography.code_size, 9);
    }
}
