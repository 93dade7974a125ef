//! # draftmark
//!
//! Bidirectional conversion between Markdown and a block-based rich-text
//! document model (the Draft.js "raw content" shape).
//!
//! A [`Document`] is a list of blocks. Each block holds plain text plus
//! `(offset, length)` ranges for inline styles and entities, and entities
//! (links, images, embeds, videos) live in a shared entity map.
//!
//! ## Quick Start
//!
//! ```
//! use draftmark::{parse_markdown, to_markdown, BlockType};
//!
//! fn main() -> draftmark::Result<()> {
//!     let doc = parse_markdown("# Title\n\nHello **world**")?;
//!     assert_eq!(doc.blocks[0].block_type, BlockType::HeaderOne);
//!     assert_eq!(doc.blocks[1].text, "Hello world");
//!
//!     let markdown = to_markdown(&doc)?;
//!     assert_eq!(markdown, "# Title\nHello __world__");
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Configurable styles**: node kind → style and style → marker
//!   dictionaries, loadable from JSON
//! - **Embedded media**: images, iframes, anchors and video shortcodes become
//!   entities and are written back verbatim when possible
//! - **Non-crossing output**: overlapping style ranges are split so markers
//!   always nest
//! - **Parallel processing**: uses Rayon for batches of inputs

pub mod config;
pub mod convert;
pub mod error;
pub mod html;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use config::{InlineStyle, StyleOverrides};
pub use convert::ConvertOptions;
pub use error::{Error, Result};
pub use model::{
    Block, BlockData, BlockType, Document, Entity, EntityData, EntityKey, EntityMap,
    EntityMetadata, EntityRange, EntityType, Mutability, StyleRange,
};
pub use parser::ParseOptions;
pub use render::{JsonFormat, LinkFormat, RenderOptions};

/// Convert Markdown into a document.
///
/// # Example
///
/// ```
/// use draftmark::{markdown_to_document, ParseOptions, InlineStyle};
///
/// let options = ParseOptions::new()
///     .with_inline_style("Delete", InlineStyle::new("STRIKETHROUGH", "~~"));
/// let doc = markdown_to_document("gone ~~soon~~", &options).unwrap();
/// assert_eq!(doc.blocks[0].inline_style_ranges[0].style, "STRIKETHROUGH");
/// ```
pub fn markdown_to_document(markdown: &str, options: &ParseOptions) -> Result<Document> {
    parser::markdown_to_document(markdown, options)
}

/// Convert a document to Markdown.
///
/// # Example
///
/// ```
/// use draftmark::{document_to_markdown, Block, Document, RenderOptions};
///
/// let mut doc = Document::new();
/// doc.add_block(Block::unstyled("Hello world").with_style(6, 5, "BOLD"));
///
/// let options = RenderOptions::new().with_symbol("BOLD", "**");
/// assert_eq!(document_to_markdown(&doc, &options).unwrap(), "Hello **world**");
/// ```
pub fn document_to_markdown(doc: &Document, options: &RenderOptions) -> Result<String> {
    render::to_markdown(doc, options)
}

/// Convert Markdown into a document with default options.
pub fn parse_markdown(markdown: &str) -> Result<Document> {
    markdown_to_document(markdown, &ParseOptions::default())
}

/// Convert a document to Markdown with default options.
pub fn to_markdown(doc: &Document) -> Result<String> {
    document_to_markdown(doc, &RenderOptions::default())
}

/// Convert a document to pretty-printed raw-content JSON.
///
/// # Example
///
/// ```
/// use draftmark::{parse_markdown, to_json};
///
/// let doc = parse_markdown("plain text").unwrap();
/// let json = to_json(&doc).unwrap();
/// assert!(json.contains("\"entityMap\""));
/// ```
pub fn to_json(doc: &Document) -> Result<String> {
    render::to_json(doc, JsonFormat::Pretty)
}
