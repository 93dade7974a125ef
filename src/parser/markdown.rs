//! Markdown to document conversion.
//!
//! Each line-oriented block of the source is parsed on its own and flattened
//! into a [`Block`]: the text of every leaf is appended to the block text while
//! style and entity ranges are recorded against the current text length.

use super::ast::{self, MdNode, NodeKind};
use super::options::ParseOptions;
use super::split::split_blocks;
use crate::config::InlineStyle;
use crate::error::{Error, Result};
use crate::html::{self, HtmlMedia};
use crate::model::{
    coalesce_style_ranges, Block, BlockData, BlockType, Document, Entity, EntityMap, EntityRange,
    StyleRange, ATOMIC_PLACEHOLDER,
};

/// Convert Markdown into a document.
///
/// Entity keys are assigned in the order entities are discovered. Blank
/// lines produce no block unless [`ParseOptions::blank_lines`] is set.
pub fn markdown_to_document(markdown: &str, options: &ParseOptions) -> Result<Document> {
    let mut document = Document::new();

    for source in split_blocks(markdown) {
        let root = ast::parse(&source);
        if root.is_leaf() {
            if options.blank_lines {
                document.add_block(Block::spacer());
            }
            continue;
        }

        let block = convert_block(&root, options, &mut document.entity_map)?;
        log::trace!(
            "Block {}: {:?} ({} chars)",
            document.block_count(),
            block.block_type,
            block.char_len()
        );
        document.add_block(block);
    }

    if options.atomic_spacers {
        document.separate_atomic_blocks();
    }

    log::debug!(
        "Converted Markdown into {} blocks with {} entities",
        document.block_count(),
        document.entity_map.len()
    );
    Ok(document)
}

/// Convert one parsed source block.
fn convert_block(root: &MdNode, options: &ParseOptions, entity_map: &mut EntityMap) -> Result<Block> {
    let Some(first) = root.first_child() else {
        return Ok(Block::spacer());
    };

    if let Some(entity) = atomic_entity(first)? {
        let key = entity_map.insert(entity);
        return Ok(Block::atomic(key));
    }

    let block_type = match first.kind {
        NodeKind::List { ordered: true } => BlockType::OrderedListItem,
        ref kind => options.block_style(kind.key()).unwrap_or_default(),
    };

    let mut builder = BlockBuilder::new(options, entity_map);
    for node in &root.children {
        builder.walk(node, options.inline_style(node.kind.key()))?;
    }

    let mut block = builder.finish(block_type);
    if let (BlockType::CodeBlock, NodeKind::CodeBlock { language }) = (block_type, &first.kind) {
        block.data = BlockData {
            language: language.clone(),
        };
    }
    Ok(block)
}

/// Entity for a top-level node that stands alone as an atomic block.
///
/// A paragraph led by an image, a paragraph holding the video shortcode and
/// an HTML block with a recognized iframe, img or anchor tag qualify.
fn atomic_entity(node: &MdNode) -> Result<Option<Entity>> {
    match &node.kind {
        NodeKind::Paragraph => {
            if let Some(NodeKind::Image { url, alt }) = node.first_child().map(|n| &n.kind) {
                if node.children.len() > 1 {
                    log::warn!("Dropping content after image in atomic block: {}", node.raw);
                }
                return Ok(Some(Entity::image(url.as_str(), alt.as_str())));
            }
            let Some((url, rest)) = html::split_video_shortcode(&node.raw) else {
                return Ok(None);
            };
            if !rest.trim().is_empty() {
                log::warn!("Dropping content after video shortcode in atomic block: {}", node.raw);
            }
            Ok(Some(Entity::video(url)))
        }
        NodeKind::Html { inline: false } => html::entity_from_html(&node.raw),
        _ => Ok(None),
    }
}

/// How a node contributes to block text.
enum Inline<'n> {
    /// One placeholder character standing for an entity
    Media,
    /// Literal text
    Text(&'n str),
    /// The text of its children
    Container,
}

fn inline_kind(node: &MdNode) -> Inline<'_> {
    match &node.kind {
        NodeKind::Image { .. } => Inline::Media,
        NodeKind::Html { .. } => match html::classify(&node.raw) {
            Some(HtmlMedia::Iframe | HtmlMedia::Img) => Inline::Media,
            _ => Inline::Text(&node.raw),
        },
        NodeKind::Paragraph if html::video_shortcode_url(&node.raw).is_some() => Inline::Media,
        NodeKind::Link { .. } => Inline::Container,
        _ if node.is_leaf() => Inline::Text(node.value.as_deref().unwrap_or_default()),
        _ => Inline::Container,
    }
}

/// Number of characters `node` adds to the block text.
fn text_len(node: &MdNode) -> usize {
    match inline_kind(node) {
        Inline::Media => 1,
        Inline::Text(text) => text.chars().count(),
        Inline::Container => node.children.iter().map(text_len).sum(),
    }
}

fn media_entity(node: &MdNode) -> Result<Entity> {
    match &node.kind {
        NodeKind::Image { url, alt } => Ok(Entity::image(url.as_str(), alt.as_str())),
        NodeKind::Html { .. } => html::entity_from_html(&node.raw)?
            .ok_or_else(|| Error::malformed(format!("unrecognized media markup: {}", node.raw))),
        _ => html::video_shortcode_url(&node.raw)
            .map(Entity::video)
            .ok_or_else(|| Error::malformed(format!("expected video shortcode: {}", node.raw))),
    }
}

/// Accumulates the text and ranges of a single non-atomic block.
struct BlockBuilder<'a> {
    options: &'a ParseOptions,
    entity_map: &'a mut EntityMap,
    text: String,
    /// Length of `text` in characters
    len: usize,
    style_ranges: Vec<StyleRange>,
    entity_ranges: Vec<EntityRange>,
}

impl<'a> BlockBuilder<'a> {
    fn new(options: &'a ParseOptions, entity_map: &'a mut EntityMap) -> Self {
        Self {
            options,
            entity_map,
            text: String::new(),
            len: 0,
            style_ranges: Vec::new(),
            entity_ranges: Vec::new(),
        }
    }

    /// Walk `node`, applying `inherited` (the style of its parent's kind) to
    /// the text it produces.
    fn walk(&mut self, node: &MdNode, inherited: Option<&'a InlineStyle>) -> Result<()> {
        let options = self.options;

        match inline_kind(node) {
            Inline::Media => {
                let key = self.entity_map.insert(media_entity(node)?);
                self.entity_ranges.push(EntityRange::new(key, self.len, 1));
                self.add_style(inherited.or_else(|| options.inline_style(node.kind.key())), 1);
                self.append(&ATOMIC_PLACEHOLDER.to_string());
            }
            Inline::Text(text) => {
                let length = text.chars().count();
                self.add_style(inherited.or_else(|| options.inline_style(node.kind.key())), length);
                self.append(text);
            }
            Inline::Container => {
                let length = text_len(node);
                if let NodeKind::Link { url, title } = &node.kind {
                    self.add_link(url, title, length);
                }
                self.add_style(inherited, length);

                let own = options.inline_style(node.kind.key());
                for child in &node.children {
                    self.walk(child, own)?;
                }
            }
        }
        Ok(())
    }

    fn add_link(&mut self, url: &str, title: &str, length: usize) {
        if length == 0 {
            log::warn!("Dropping link without text: {url}");
            return;
        }
        let mut entity = Entity::link(url);
        if !title.is_empty() {
            entity.data.title = Some(title.to_string());
        }
        let key = self.entity_map.insert(entity);
        self.entity_ranges.push(EntityRange::new(key, self.len, length));
    }

    fn add_style(&mut self, style: Option<&InlineStyle>, length: usize) {
        if let Some(style) = style {
            if length > 0 {
                self.style_ranges
                    .push(StyleRange::new(self.len, length, style.style.as_str()));
            }
        }
    }

    fn append(&mut self, text: &str) {
        self.text.push_str(text);
        self.len += text.chars().count();
    }

    fn finish(self, block_type: BlockType) -> Block {
        let mut block = Block::new(self.text, block_type);
        block.inline_style_ranges = coalesce_style_ranges(self.style_ranges);
        block.entity_ranges = self.entity_ranges;
        block
    }
}
