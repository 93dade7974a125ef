//! Document model types for the rich-text representation.
//!
//! The model mirrors the "raw content" layout used by Draft.js editors: a
//! flat list of blocks, each holding plain text plus offset/length
//! annotations, and one entity table shared by the whole document.

mod block;
mod document;
mod entity;

pub use block::{
    coalesce_style_ranges, Block, BlockData, BlockType, EntityKey, EntityRange, StyleRange,
    ATOMIC_PLACEHOLDER,
};
pub use document::Document;
pub use entity::{Entity, EntityData, EntityMap, EntityMetadata, EntityType, Mutability};
