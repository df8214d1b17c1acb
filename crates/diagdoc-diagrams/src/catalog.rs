//! Built-in diagram sources for the MQTT diagnostic specification.

use crate::DiagramLanguage;

/// One diagram source, embedded at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagramSource {
    /// File stem; the source is written to `<name>.<ext>`.
    pub name: &'static str,
    pub language: DiagramLanguage,
    pub source: &'static str,
}

impl DiagramSource {
    /// File name of the source, e.g. `message_flow.dot`.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.name, self.language.extension())
    }
}

macro_rules! diagram {
    ($name:literal, $lang:expr, $ext:literal) => {
        DiagramSource {
            name: $name,
            language: $lang,
            source: include_str!(concat!("../diagrams/", $name, ".", $ext)),
        }
    };
}

const GRAPHVIZ: &[DiagramSource] = &[
    diagram!("system_architecture", DiagramLanguage::Graphviz, "dot"),
    diagram!("topic_structure", DiagramLanguage::Graphviz, "dot"),
    diagram!("message_flow", DiagramLanguage::Graphviz, "dot"),
    diagram!("roaming_sequence", DiagramLanguage::Graphviz, "dot"),
    diagram!("connection_failure", DiagramLanguage::Graphviz, "dot"),
    diagram!("arp_loss", DiagramLanguage::Graphviz, "dot"),
];

const PLANTUML: &[DiagramSource] = &[
    diagram!("generic_sequence", DiagramLanguage::PlantUml, "puml"),
    diagram!("roaming_sequence", DiagramLanguage::PlantUml, "puml"),
    diagram!("connection_failure_sequence", DiagramLanguage::PlantUml, "puml"),
    diagram!("arp_loss_sequence", DiagramLanguage::PlantUml, "puml"),
];

/// All built-in sources of one language, in generation order.
#[must_use]
pub fn sources(language: DiagramLanguage) -> &'static [DiagramSource] {
    match language {
        DiagramLanguage::Graphviz => GRAPHVIZ,
        DiagramLanguage::PlantUml => PLANTUML,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_graphviz_catalog() {
        let names: Vec<_> = sources(DiagramLanguage::Graphviz)
            .iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(
            names,
            vec![
                "system_architecture",
                "topic_structure",
                "message_flow",
                "roaming_sequence",
                "connection_failure",
                "arp_loss",
            ]
        );
        for diagram in sources(DiagramLanguage::Graphviz) {
            assert!(
                diagram.source.trim_start().starts_with("digraph"),
                "{} is not a digraph",
                diagram.name
            );
            assert!(diagram.source.trim_end().ends_with('}'));
        }
    }

    #[test]
    fn test_plantuml_catalog() {
        let names: Vec<_> = sources(DiagramLanguage::PlantUml)
            .iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(
            names,
            vec![
                "generic_sequence",
                "roaming_sequence",
                "connection_failure_sequence",
                "arp_loss_sequence",
            ]
        );
        for diagram in sources(DiagramLanguage::PlantUml) {
            assert!(diagram.source.starts_with("@startuml"), "{}", diagram.name);
            assert!(diagram.source.trim_end().ends_with("@enduml"));
        }
    }

    #[test]
    fn test_file_names_unique() {
        let all: Vec<_> = sources(DiagramLanguage::Graphviz)
            .iter()
            .chain(sources(DiagramLanguage::PlantUml))
            .map(DiagramSource::file_name)
            .collect();
        let unique: HashSet<_> = all.iter().collect();
        assert_eq!(all.len(), 10);
        assert_eq!(unique.len(), all.len());
        assert!(all.contains(&"roaming_sequence.dot".to_owned()));
        assert!(all.contains(&"roaming_sequence.puml".to_owned()));
    }
}
