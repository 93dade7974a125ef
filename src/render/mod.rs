//! Rendering module for converting documents to Markdown and JSON.

mod inline;
mod json;
mod markdown;
mod markup;
mod options;

pub use json::{to_json, JsonFormat};
pub use markdown::{to_markdown, MarkdownRenderer};
pub use options::{LinkFormat, RenderOptions};
