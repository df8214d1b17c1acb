//! Diagram languages rendered by external tools.

/// Supported diagram languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagramLanguage {
    /// Graphviz DOT, rendered by `dot`.
    Graphviz,
    /// `PlantUML`, rendered by `java -jar plantuml.jar`.
    PlantUml,
}

impl DiagramLanguage {
    /// Source file extension, without the dot.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Graphviz => "dot",
            Self::PlantUml => "puml",
        }
    }

    /// Human-readable tool name used in logs and reports.
    #[must_use]
    pub fn tool_name(self) -> &'static str {
        match self {
            Self::Graphviz => "Graphviz",
            Self::PlantUml => "PlantUML",
        }
    }

    /// Subdirectory of the diagram output directory, if any.
    ///
    /// `PlantUML` sources get their own directory because both languages have
    /// a `roaming_sequence` diagram and the PNG names would collide.
    #[must_use]
    pub fn subdir(self) -> Option<&'static str> {
        match self {
            Self::Graphviz => None,
            Self::PlantUml => Some("plantuml"),
        }
    }
}
