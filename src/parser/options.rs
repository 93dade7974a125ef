//! Parsing options and configuration.

use crate::config::{default_block_styles, default_inline_styles, InlineStyle, StyleOverrides};
use crate::model::BlockType;
use std::collections::HashMap;

/// Options for converting Markdown into a document.
///
/// Built once per call from the defaults plus any caller overrides; the
/// converter only reads it.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Node kind → inline style
    pub inline_styles: HashMap<String, InlineStyle>,

    /// Node kind → block type
    pub block_styles: HashMap<String, BlockType>,

    /// Insert empty blocks around atomic blocks
    pub atomic_spacers: bool,

    /// Emit an empty block for each blank source line
    pub blank_lines: bool,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create parse options from the defaults merged with overrides.
    pub fn from_overrides(overrides: &StyleOverrides) -> Self {
        Self::new().with_overrides(overrides)
    }

    /// Merge caller overrides over the current dictionaries.
    pub fn with_overrides(mut self, overrides: &StyleOverrides) -> Self {
        self.inline_styles.extend(
            overrides
                .inline_styles
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        self.block_styles.extend(
            overrides
                .block_styles
                .iter()
                .map(|(k, v)| (k.clone(), *v)),
        );
        self
    }

    /// Map a node kind to an inline style.
    pub fn with_inline_style(mut self, node_kind: impl Into<String>, style: InlineStyle) -> Self {
        self.inline_styles.insert(node_kind.into(), style);
        self
    }

    /// Map a node kind to a block type.
    pub fn with_block_style(mut self, node_kind: impl Into<String>, block_type: BlockType) -> Self {
        self.block_styles.insert(node_kind.into(), block_type);
        self
    }

    /// Enable or disable spacer blocks around atomic blocks.
    pub fn with_atomic_spacers(mut self, enabled: bool) -> Self {
        self.atomic_spacers = enabled;
        self
    }

    /// Keep or skip blank source lines.
    pub fn with_blank_lines(mut self, keep: bool) -> Self {
        self.blank_lines = keep;
        self
    }

    /// Inline style for a node kind.
    pub fn inline_style(&self, node_kind: &str) -> Option<&InlineStyle> {
        self.inline_styles.get(node_kind)
    }

    /// Block type for a node kind.
    pub fn block_style(&self, node_kind: &str) -> Option<BlockType> {
        self.block_styles.get(node_kind).copied()
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            inline_styles: default_inline_styles(),
            block_styles: default_block_styles(),
            atomic_spacers: true,
            blank_lines: false,
        }
    }
}
