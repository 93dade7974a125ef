//! Markdown rendering for documents.

use super::inline::render_inline;
use super::markup::entity_markup;
use super::RenderOptions;
use crate::error::{Error, Result};
use crate::model::{Block, BlockType, Document, EntityMap};

/// Convert a document to Markdown.
pub fn to_markdown(doc: &Document, options: &RenderOptions) -> Result<String> {
    let renderer = MarkdownRenderer::new(options.clone());
    renderer.render(doc)
}

/// Markdown renderer.
///
/// Blocks are rendered one per line and joined with `\n`. Empty spacer
/// blocks that only separate atomic blocks from each other or from the
/// document edges are not written, since parsing inserts them again.
pub struct MarkdownRenderer {
    options: RenderOptions,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render a document to Markdown.
    pub fn render(&self, doc: &Document) -> Result<String> {
        let mut lines = Vec::with_capacity(doc.blocks.len());
        let mut ordered_items = 0;

        for (index, block) in doc.blocks.iter().enumerate() {
            if is_atomic_spacer(&doc.blocks, index) {
                continue;
            }
            lines.push(self.render_block(block, &doc.entity_map, &mut ordered_items)?);
        }

        log::debug!(
            "Rendered {} blocks ({} entities) as Markdown",
            doc.block_count(),
            doc.entity_map.len()
        );
        Ok(lines.join("\n"))
    }

    fn render_block(
        &self,
        block: &Block,
        entity_map: &EntityMap,
        ordered_items: &mut usize,
    ) -> Result<String> {
        if block.is_atomic() {
            return render_atomic(block, entity_map);
        }

        let body = render_inline(block, entity_map, &self.options)?;
        let line = match block.block_type {
            BlockType::UnorderedListItem => format!("{} {body}", self.options.list_marker),
            // Numbering counts every earlier ordered item in the document.
            BlockType::OrderedListItem => {
                *ordered_items += 1;
                format!("{ordered_items}. {body}")
            }
            BlockType::Blockquote => format!("> {body}"),
            BlockType::CodeBlock => format!(
                "```{}\n{body}\n```",
                block.data.language.as_deref().unwrap_or_default()
            ),
            block_type => match block_type.header_level() {
                Some(level) => format!("{} {body}", "#".repeat(level as usize)),
                None => body,
            },
        };
        Ok(line)
    }
}

/// Whether the block at `index` is a spacer standing between two atomic
/// blocks, or between an atomic block and the start or end of the document.
fn is_atomic_spacer(blocks: &[Block], index: usize) -> bool {
    if !blocks[index].is_spacer() {
        return false;
    }
    let before = index.checked_sub(1).map(|i| &blocks[i]);
    let after = blocks.get(index + 1);
    match (before, after) {
        (Some(prev), Some(next)) => prev.is_atomic() && next.is_atomic(),
        (None, Some(next)) => next.is_atomic(),
        (Some(prev), None) => prev.is_atomic(),
        (None, None) => false,
    }
}

fn render_atomic(block: &Block, entity_map: &EntityMap) -> Result<String> {
    let range = block
        .entity_ranges
        .first()
        .ok_or_else(|| Error::malformed("atomic block has no entity range"))?;
    let entity = entity_map.get(range.key).ok_or_else(|| {
        Error::malformed(format!("entity {} is not in the entity map", range.key))
    })?;
    Ok(entity_markup(entity))
}
