//! Document-level types.

use super::{Block, BlockType, EntityMap};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// A rich-text document: ordered blocks plus the entity table they reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Blocks in document order
    pub blocks: Vec<Block>,

    /// Entities referenced by the blocks' entity ranges
    #[serde(default)]
    pub entity_map: EntityMap,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a document from its raw-content JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Add a block to the document.
    pub fn add_block(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Get the number of blocks.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Check if the document has any blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Insert empty `unstyled` blocks so that no atomic block sits at either
    /// end of the document or directly next to another atomic block.
    pub fn separate_atomic_blocks(&mut self) {
        let mut separated = Vec::with_capacity(self.blocks.len() + 2);
        let mut previous_atomic = true;

        for block in self.blocks.drain(..) {
            let atomic = block.is_atomic();
            if atomic && previous_atomic {
                separated.push(Block::spacer());
            }
            previous_atomic = atomic;
            separated.push(block);
        }
        if previous_atomic && !separated.is_empty() {
            separated.push(Block::spacer());
        }

        self.blocks = separated;
    }

    /// Plain text of all blocks, one per line.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(|b| match b.block_type {
                BlockType::Atomic => "",
                _ => b.text.as_str(),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Entity;

    fn types(doc: &Document) -> Vec<BlockType> {
        doc.blocks.iter().map(|b| b.block_type).collect()
    }

    #[test]
    fn test_document_new() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert_eq!(doc.block_count(), 0);
    }

    #[test]
    fn test_separate_atomic_blocks() {
        let mut doc = Document::new();
        let a = doc.entity_map.insert(Entity::video("a"));
        let b = doc.entity_map.insert(Entity::video("b"));
        doc.add_block(Block::atomic(a));
        doc.add_block(Block::atomic(b));
        doc.add_block(Block::unstyled("text"));

        doc.separate_atomic_blocks();
        assert_eq!(
            types(&doc),
            vec![
                BlockType::Unstyled,
                BlockType::Atomic,
                BlockType::Unstyled,
                BlockType::Atomic,
                BlockType::Unstyled,
            ]
        );
        assert!(doc.blocks[0].is_spacer());
        assert!(doc.blocks[2].is_spacer());
        assert_eq!(doc.blocks[4].text, "text");
    }

    #[test]
    fn test_separate_trailing_atomic_block() {
        let mut doc = Document::new();
        let key = doc.entity_map.insert(Entity::video("a"));
        doc.add_block(Block::unstyled("intro"));
        doc.add_block(Block::atomic(key));

        doc.separate_atomic_blocks();
        assert_eq!(
            types(&doc),
            vec![BlockType::Unstyled, BlockType::Atomic, BlockType::Unstyled]
        );
        assert!(doc.blocks[2].is_spacer());
    }

    #[test]
    fn test_separate_without_atomic_blocks_is_noop() {
        let mut doc = Document::new();
        doc.add_block(Block::unstyled("a"));
        doc.add_block(Block::unstyled("b"));
        let before = doc.clone();
        doc.separate_atomic_blocks();
        assert_eq!(doc, before);
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "blocks": [{"text": "Hi", "type": "header-one", "depth": 0,
                        "inlineStyleRanges": [], "entityRanges": []}],
            "entityMap": {"data": "", "mutability": "", "type": ""}
        }"#;
        let doc = Document::from_json(json).unwrap();
        assert_eq!(doc.blocks[0].block_type, BlockType::HeaderOne);
        assert!(doc.entity_map.is_empty());
    }
}
