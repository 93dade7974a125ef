//! Rendering options and configuration.

use crate::config::{default_markdown_symbols, StyleOverrides};
use std::collections::HashMap;

/// Options for rendering a document as Markdown.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Style identifier → Markdown marker
    pub markdown_symbols: HashMap<String, String>,

    /// How link entities are written
    pub link_format: LinkFormat,

    /// Character to use for unordered list markers
    pub list_marker: char,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create render options from the defaults merged with overrides.
    pub fn from_overrides(overrides: &StyleOverrides) -> Self {
        Self::new().with_overrides(overrides)
    }

    /// Merge caller overrides over the current symbols.
    ///
    /// Symbols declared alongside inline styles apply first, so a style added
    /// for parsing renders with the same marker. Explicit `markdown_symbols`
    /// entries win.
    pub fn with_overrides(mut self, overrides: &StyleOverrides) -> Self {
        for style in overrides.inline_styles.values() {
            self.markdown_symbols
                .insert(style.style.clone(), style.symbol.clone());
        }
        self.markdown_symbols.extend(
            overrides
                .markdown_symbols
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        self
    }

    /// Set the Markdown marker for a style.
    pub fn with_symbol(mut self, style: impl Into<String>, symbol: impl Into<String>) -> Self {
        self.markdown_symbols.insert(style.into(), symbol.into());
        self
    }

    /// Set the link format.
    pub fn with_link_format(mut self, format: LinkFormat) -> Self {
        self.link_format = format;
        self
    }

    /// Set the list marker character.
    pub fn with_list_marker(mut self, marker: char) -> Self {
        self.list_marker = marker;
        self
    }

    /// Marker for a style, if it has one.
    pub fn symbol(&self, style: &str) -> Option<&str> {
        self.markdown_symbols
            .get(style)
            .map(String::as_str)
            .filter(|s| !s.is_empty())
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            markdown_symbols: default_markdown_symbols(),
            link_format: LinkFormat::default(),
            list_marker: '-',
        }
    }
}

/// How link entities are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkFormat {
    /// `[text](url)`
    #[default]
    Markdown,
    /// `<a href="url">text</a>`
    Html,
}
