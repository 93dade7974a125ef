//! Style dictionaries and caller overrides.
//!
//! Both conversion directions start from built-in dictionaries. A caller may
//! supply a [`StyleOverrides`] value (typically loaded from JSON) which is
//! merged over the defaults once, when the options for a call are built.
//!
//! ```
//! use draftmark::StyleOverrides;
//!
//! let overrides = StyleOverrides::from_json(r#"{
//!     "inlineStyles": { "Delete": { "style": "STRIKETHROUGH", "symbol": "~~" } },
//!     "markdownSymbols": { "BOLD": "**" }
//! }"#).unwrap();
//! assert_eq!(overrides.markdown_symbols["BOLD"], "**");
//! ```

use crate::error::Result;
use crate::model::BlockType;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Style identifier for bold text.
pub const BOLD: &str = "BOLD";

/// Style identifier for italic text.
pub const ITALIC: &str = "ITALIC";

/// An inline style applied to the text under a Markdown node kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineStyle {
    /// Style identifier stored in style ranges (e.g. `BOLD`)
    pub style: String,

    /// Markdown marker emitted around styled text (e.g. `__`)
    pub symbol: String,
}

impl InlineStyle {
    pub fn new(style: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            style: style.into(),
            symbol: symbol.into(),
        }
    }
}

/// Caller-supplied additions to the built-in dictionaries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StyleOverrides {
    /// Node kind (e.g. `Strong`, `Delete`, `Code`) → inline style
    pub inline_styles: HashMap<String, InlineStyle>,

    /// Node kind (e.g. `List`, `Header2`, `BlockQuote`) → block type
    pub block_styles: HashMap<String, BlockType>,

    /// Style identifier → Markdown marker, used when rendering
    pub markdown_symbols: HashMap<String, String>,
}

impl StyleOverrides {
    /// Create empty overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load overrides from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
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

    /// Set the Markdown marker for a style.
    pub fn with_symbol(mut self, style: impl Into<String>, symbol: impl Into<String>) -> Self {
        self.markdown_symbols.insert(style.into(), symbol.into());
        self
    }
}

/// Built-in node kind → inline style table.
pub fn default_inline_styles() -> HashMap<String, InlineStyle> {
    HashMap::from([
        ("Strong".to_string(), InlineStyle::new(BOLD, "__")),
        ("Emphasis".to_string(), InlineStyle::new(ITALIC, "*")),
    ])
}

/// Built-in node kind → block type table.
///
/// Ordered lists, atomic media and paragraphs are classified before this
/// table is consulted.
pub fn default_block_styles() -> HashMap<String, BlockType> {
    HashMap::from([
        ("List".to_string(), BlockType::UnorderedListItem),
        ("Header1".to_string(), BlockType::HeaderOne),
        ("Header2".to_string(), BlockType::HeaderTwo),
        ("Header3".to_string(), BlockType::HeaderThree),
        ("Header4".to_string(), BlockType::HeaderFour),
        ("Header5".to_string(), BlockType::HeaderFive),
        ("Header6".to_string(), BlockType::HeaderSix),
        ("CodeBlock".to_string(), BlockType::CodeBlock),
        ("BlockQuote".to_string(), BlockType::Blockquote),
    ])
}

/// Built-in style → Markdown marker table.
pub fn default_markdown_symbols() -> HashMap<String, String> {
    HashMap::from([
        (BOLD.to_string(), "__".to_string()),
        (ITALIC.to_string(), "*".to_string()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let inline = default_inline_styles();
        assert_eq!(inline["Strong"], InlineStyle::new("BOLD", "__"));
        assert_eq!(inline["Emphasis"], InlineStyle::new("ITALIC", "*"));

        let blocks = default_block_styles();
        assert_eq!(blocks["Header4"], BlockType::HeaderFour);
        assert!(!blocks.contains_key("Paragraph"));

        assert_eq!(default_markdown_symbols()["ITALIC"], "*");
    }

    #[test]
    fn test_overrides_from_json() {
        let overrides = StyleOverrides::from_json(
            r#"{
                "inlineStyles": { "Code": { "style": "CODE", "symbol": "`" } },
                "blockStyles": { "List": "ordered-list-item" }
            }"#,
        )
        .unwrap();

        assert_eq!(overrides.inline_styles["Code"], InlineStyle::new("CODE", "`"));
        assert_eq!(overrides.block_styles["List"], BlockType::OrderedListItem);
        assert!(overrides.markdown_symbols.is_empty());
    }

    #[test]
    fn test_overrides_from_invalid_json() {
        assert!(StyleOverrides::from_json(r#"{"blockStyles": {"List": "table"}}"#).is_err());
    }

    #[test]
    fn test_overrides_builder() {
        let overrides = StyleOverrides::new()
            .with_inline_style("Delete", InlineStyle::new("STRIKETHROUGH", "~~"))
            .with_block_style("Paragraph", BlockType::Blockquote)
            .with_symbol("BOLD", "**");

        assert_eq!(overrides.inline_styles.len(), 1);
        assert_eq!(overrides.block_styles["Paragraph"], BlockType::Blockquote);
        assert_eq!(overrides.markdown_symbols["BOLD"], "**");
    }
}
