//! Block-level types.

use serde::{Deserialize, Serialize};

/// One structural unit of a document: a paragraph, header, list item, etc.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    /// Plain, annotation-free content
    pub text: String,

    /// Structural type
    #[serde(rename = "type")]
    pub block_type: BlockType,

    /// Nesting depth (always 0, list nesting is not modeled)
    #[serde(default)]
    pub depth: u32,

    /// Inline style annotations
    #[serde(default)]
    pub inline_style_ranges: Vec<StyleRange>,

    /// Entity annotations
    #[serde(default)]
    pub entity_ranges: Vec<EntityRange>,

    /// Optional block metadata
    #[serde(default, skip_serializing_if = "BlockData::is_empty")]
    pub data: BlockData,
}

impl Block {
    /// Create a block with plain text and no annotations.
    pub fn new(text: impl Into<String>, block_type: BlockType) -> Self {
        Self {
            text: text.into(),
            block_type,
            depth: 0,
            inline_style_ranges: Vec::new(),
            entity_ranges: Vec::new(),
            data: BlockData::default(),
        }
    }

    /// Create an `unstyled` block.
    pub fn unstyled(text: impl Into<String>) -> Self {
        Self::new(text, BlockType::Unstyled)
    }

    /// Create the empty `unstyled` block used to separate atomic blocks.
    pub fn spacer() -> Self {
        Self::unstyled("")
    }

    /// Create an atomic block referencing a single entity.
    pub fn atomic(key: EntityKey) -> Self {
        let mut block = Self::new(ATOMIC_PLACEHOLDER.to_string(), BlockType::Atomic);
        block.entity_ranges.push(EntityRange::new(key, 0, 1));
        block
    }

    /// Add a style range.
    pub fn with_style(mut self, offset: usize, length: usize, style: impl Into<String>) -> Self {
        self.inline_style_ranges
            .push(StyleRange::new(offset, length, style));
        self
    }

    /// Add an entity range.
    pub fn with_entity(mut self, key: EntityKey, offset: usize, length: usize) -> Self {
        self.entity_ranges.push(EntityRange::new(key, offset, length));
        self
    }

    /// Length of the text in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Check if this is an atomic block.
    pub fn is_atomic(&self) -> bool {
        self.block_type == BlockType::Atomic
    }

    /// Check if this block is an empty `unstyled` block.
    pub fn is_spacer(&self) -> bool {
        self.block_type == BlockType::Unstyled && self.text.is_empty()
    }
}

/// Text held by atomic blocks in place of their media.
pub const ATOMIC_PLACEHOLDER: char = ' ';

/// Structural block types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockType {
    #[default]
    Unstyled,
    UnorderedListItem,
    OrderedListItem,
    HeaderOne,
    HeaderTwo,
    HeaderThree,
    HeaderFour,
    HeaderFive,
    HeaderSix,
    Blockquote,
    CodeBlock,
    Atomic,
}

impl BlockType {
    /// Header block type for a level (1-6).
    pub fn header(level: u8) -> Option<Self> {
        match level {
            1 => Some(BlockType::HeaderOne),
            2 => Some(BlockType::HeaderTwo),
            3 => Some(BlockType::HeaderThree),
            4 => Some(BlockType::HeaderFour),
            5 => Some(BlockType::HeaderFive),
            6 => Some(BlockType::HeaderSix),
            _ => None,
        }
    }

    /// Header level (1-6), if this is a header type.
    pub fn header_level(&self) -> Option<u8> {
        match self {
            BlockType::HeaderOne => Some(1),
            BlockType::HeaderTwo => Some(2),
            BlockType::HeaderThree => Some(3),
            BlockType::HeaderFour => Some(4),
            BlockType::HeaderFive => Some(5),
            BlockType::HeaderSix => Some(6),
            _ => None,
        }
    }
}

/// Extra per-block metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockData {
    /// Info string of a fenced code block
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl BlockData {
    /// Check if no metadata is set.
    pub fn is_empty(&self) -> bool {
        self.language.is_none()
    }
}

/// Inline style annotation over `[offset, offset + length)` of a block's text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleRange {
    pub offset: usize,
    pub length: usize,
    pub style: String,
}

impl StyleRange {
    pub fn new(offset: usize, length: usize, style: impl Into<String>) -> Self {
        Self {
            offset,
            length,
            style: style.into(),
        }
    }

    /// Index of the last character covered by the range.
    pub fn last_index(&self) -> usize {
        self.offset + self.length - 1
    }

    /// Exclusive end of the range.
    pub fn end(&self) -> usize {
        self.offset + self.length
    }
}

/// Key of an entity in the document's entity map.
pub type EntityKey = u32;

/// Reference from a span of block text to an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRange {
    pub key: EntityKey,
    pub offset: usize,
    pub length: usize,
}

impl EntityRange {
    pub fn new(key: EntityKey, offset: usize, length: usize) -> Self {
        Self {
            key,
            offset,
            length,
        }
    }

    /// Exclusive end of the range.
    pub fn end(&self) -> usize {
        self.offset + self.length
    }
}

/// Merge same-style ranges that touch or overlap.
///
/// The tree walk records one range per styled leaf, so `**a *b* c**` produces
/// three adjacent BOLD ranges. Merged ranges keep the position of the first
/// range of each run.
pub fn coalesce_style_ranges(ranges: Vec<StyleRange>) -> Vec<StyleRange> {
    let mut merged: Vec<StyleRange> = Vec::with_capacity(ranges.len());

    for range in ranges {
        if range.length == 0 {
            continue;
        }
        let existing = merged
            .iter_mut()
            .find(|r| r.style == range.style && r.offset <= range.end() && range.offset <= r.end());
        match existing {
            Some(r) => {
                let end = r.end().max(range.end());
                r.offset = r.offset.min(range.offset);
                r.length = end - r.offset;
            }
            None => merged.push(range),
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_type_serde_names() {
        let json = serde_json::to_string(&BlockType::UnorderedListItem).unwrap();
        assert_eq!(json, "\"unordered-list-item\"");
        let json = serde_json::to_string(&BlockType::HeaderThree).unwrap();
        assert_eq!(json, "\"header-three\"");
        let parsed: BlockType = serde_json::from_str("\"code-block\"").unwrap();
        assert_eq!(parsed, BlockType::CodeBlock);
    }

    #[test]
    fn test_header_levels() {
        for level in 1..=6 {
            let block_type = BlockType::header(level).unwrap();
            assert_eq!(block_type.header_level(), Some(level));
        }
        assert_eq!(BlockType::header(7), None);
        assert_eq!(BlockType::Blockquote.header_level(), None);
    }

    #[test]
    fn test_atomic_block() {
        let block = Block::atomic(3);
        assert_eq!(block.text, " ");
        assert_eq!(block.entity_ranges, vec![EntityRange::new(3, 0, 1)]);
        assert!(block.inline_style_ranges.is_empty());
    }

    #[test]
    fn test_block_json_shape() {
        let block = Block::unstyled("Hello world").with_style(6, 5, "BOLD");
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["type"], "unstyled");
        assert_eq!(json["depth"], 0);
        assert_eq!(json["inlineStyleRanges"][0]["offset"], 6);
        assert_eq!(json["inlineStyleRanges"][0]["style"], "BOLD");
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_coalesce_adjacent_ranges() {
        let ranges = vec![
            StyleRange::new(0, 2, "BOLD"),
            StyleRange::new(2, 1, "BOLD"),
            StyleRange::new(2, 1, "ITALIC"),
            StyleRange::new(3, 2, "BOLD"),
        ];
        let merged = coalesce_style_ranges(ranges);
        assert_eq!(
            merged,
            vec![StyleRange::new(0, 5, "BOLD"), StyleRange::new(2, 1, "ITALIC")]
        );
    }

    #[test]
    fn test_coalesce_keeps_separated_ranges() {
        let ranges = vec![StyleRange::new(0, 2, "BOLD"), StyleRange::new(4, 2, "BOLD")];
        assert_eq!(coalesce_style_ranges(ranges.clone()), ranges);
    }
}
