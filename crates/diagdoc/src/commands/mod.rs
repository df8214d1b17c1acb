//! CLI command implementations.

pub(crate) mod all;
pub(crate) mod diagrams;
pub(crate) mod document;
pub(crate) mod logo;

pub(crate) use all::AllArgs;
pub(crate) use diagrams::{DiagramsArgs, ToolSelection};
pub(crate) use document::DocumentArgs;
pub(crate) use logo::LogoArgs;
