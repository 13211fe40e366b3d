//! Rendering module for converting hierarchies to output formats.

mod json;
mod markdown;
mod options;
mod stats;
mod text;

pub use json::{from_json, to_json, write_json, JsonFormat};
pub use markdown::to_markdown;
pub use options::RenderOptions;
pub use stats::HierarchyStats;
pub use text::to_text;
