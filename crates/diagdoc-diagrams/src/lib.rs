//! Diagram generation for the MQTT diagnostic specification.
//!
//! The diagram sources are fixed and embedded in the crate. They are written
//! to an output directory and converted to PNG by external renderers:
//!
//! - [`Graphviz`]: `dot -Tpng -Gdpi=<dpi> <input> -o <output>`
//! - [`PlantUml`]: `java -jar <jar> -tpng <input>`
//!
//! Conversions are independent. [`DiagramGenerator::render`] records failures
//! in a [`RenderReport`] and moves on; only a missing renderer stops early.
//!
//! [`rasterize_logo`] converts the SVG logo into the PNG used in page headers.

pub mod catalog;
mod error;
mod generator;
mod language;
mod logo;
mod plantuml;
mod tool;

pub use catalog::DiagramSource;
pub use error::DiagramError;
pub use generator::{DiagramGenerator, RenderFailure, RenderReport};
pub use language::DiagramLanguage;
pub use logo::rasterize_logo;
pub use plantuml::inject_dpi;
pub use tool::{Graphviz, PlantUml, RenderTool};
