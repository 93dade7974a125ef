//! Markdown parsing module.

mod ast;
mod markdown;
mod options;
mod split;

pub use ast::{parse, MdNode, NodeKind};
pub use markdown::markdown_to_document;
pub use options::ParseOptions;
pub use split::split_blocks;
