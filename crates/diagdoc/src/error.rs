//! CLI error types.

use diagdoc_builder::BuildError;
use diagdoc_config::ConfigError;
use diagdoc_diagrams::DiagramError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Build(#[from] BuildError),

    #[error("{0}")]
    Diagram(#[from] DiagramError),

    #[error("{failed} of {total} documents failed to build")]
    DocumentsFailed { failed: usize, total: usize },
}
