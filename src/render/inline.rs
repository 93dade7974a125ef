//! Marker re-insertion for the text of a single block.
//!
//! Block text is scanned one character at a time. Style and link markers are
//! written into an output buffer as their ranges open and close, with open
//! spans kept on a LIFO stack of frames. Each frame remembers where its
//! opening marker sits in the buffer, so whitespace can be moved outside the
//! markers when the span closes without searching the output.

use super::markup::entity_markup;
use super::options::{LinkFormat, RenderOptions};
use crate::error::{Error, Result};
use crate::html;
use crate::model::{Block, EntityData, EntityMap, EntityType};
use std::cmp::Reverse;

/// Render the text of a non-atomic block with its style and entity markers.
pub(crate) fn render_inline(
    block: &Block,
    entity_map: &EntityMap,
    options: &RenderOptions,
) -> Result<String> {
    validate(block, entity_map)?;

    let mut builder = InlineBuilder::new(options);
    for (index, ch) in block.text.chars().enumerate() {
        let mut openers = Vec::new();

        for range in &block.inline_style_ranges {
            if range.offset != index || range.length == 0 {
                continue;
            }
            match options.symbol(&range.style) {
                Some(symbol) => openers.push((Marker::Style(symbol), range.last_index())),
                None => log::warn!("Dropping style without a Markdown symbol: {}", range.style),
            }
        }

        let mut replacement = None;
        for range in &block.entity_ranges {
            if range.offset != index || range.length == 0 {
                continue;
            }
            let Some(entity) = entity_map.get(range.key) else {
                continue;
            };
            if entity.entity_type == EntityType::Link {
                openers.push((Marker::Link(&entity.data), range.end() - 1));
            } else if entity.is_media() && range.length == 1 {
                replacement = Some(entity_markup(entity));
            }
        }

        builder.open_all(openers);
        match replacement {
            Some(markup) => builder.buf.push_str(&markup),
            None => builder.buf.push(ch),
        }
        builder.close_at(index);
    }

    builder.finish()
}

/// Check every range against the block text and the entity map.
fn validate(block: &Block, entity_map: &EntityMap) -> Result<()> {
    let len = block.char_len();
    let fits = |offset: usize, length: usize| {
        offset
            .checked_add(length)
            .is_some_and(|end| end <= len)
    };

    for range in &block.inline_style_ranges {
        if !fits(range.offset, range.length) {
            return Err(Error::malformed(format!(
                "{} range at {} with length {} extends past block text of {} chars",
                range.style, range.offset, range.length, len
            )));
        }
    }

    for range in &block.entity_ranges {
        if entity_map.get(range.key).is_none() {
            return Err(Error::malformed(format!(
                "entity {} is not in the entity map",
                range.key
            )));
        }
        if !fits(range.offset, range.length) {
            return Err(Error::malformed(format!(
                "entity {} range at {} with length {} extends past block text of {} chars",
                range.key, range.offset, range.length, len
            )));
        }
    }

    Ok(())
}

#[derive(Debug, Clone, Copy)]
enum Marker<'a> {
    Style(&'a str),
    Link(&'a EntityData),
}

impl Marker<'_> {
    fn is_link(&self) -> bool {
        matches!(self, Marker::Link(_))
    }
}

/// An open span.
#[derive(Debug, Clone, Copy)]
struct Frame<'a> {
    marker: Marker<'a>,
    /// Index of the last character covered
    end: usize,
    /// Byte position of the opening marker in the buffer
    open_at: usize,
}

struct InlineBuilder<'a> {
    options: &'a RenderOptions,
    buf: String,
    stack: Vec<Frame<'a>>,
}

impl<'a> InlineBuilder<'a> {
    fn new(options: &'a RenderOptions) -> Self {
        Self {
            options,
            buf: String::new(),
            stack: Vec::new(),
        }
    }

    /// Open the spans starting at the current character, longest outermost.
    /// Styles open outside links of the same extent.
    fn open_all(&mut self, mut openers: Vec<(Marker<'a>, usize)>) {
        openers.sort_by_key(|(marker, end)| (Reverse(*end), marker.is_link()));
        for (marker, end) in openers {
            if marker.is_link() {
                self.open_link(marker, end);
            } else {
                self.push_frame(marker, end);
            }
        }
    }

    /// Open a link, first closing any open spans that end inside it.
    ///
    /// Every frame from the lowest one ending inside the link upwards is
    /// closed. Frames outliving the link are reopened around it and the rest
    /// inside the link text, so the link is never split by a later close.
    fn open_link(&mut self, marker: Marker<'a>, end: usize) {
        let Some(lowest) = self.stack.iter().position(|f| f.end < end) else {
            self.push_frame(marker, end);
            return;
        };
        let lifted = self.stack.split_off(lowest);

        for frame in lifted.iter().rev() {
            self.close_frame(frame);
        }
        let (inside, outside): (Vec<_>, Vec<_>) = lifted.into_iter().partition(|f| f.end < end);
        for frame in outside {
            self.push_frame(frame.marker, frame.end);
        }
        self.push_frame(marker, end);
        for frame in inside {
            self.push_frame(frame.marker, frame.end);
        }
    }

    /// Close every span ending at `index`, innermost first.
    ///
    /// Spans opened inside one of them but ending later are closed with it and
    /// reopened afterwards, so markers never cross.
    fn close_at(&mut self, index: usize) {
        let Some(lowest) = self.stack.iter().position(|f| f.end == index) else {
            return;
        };
        let closing = self.stack.split_off(lowest);

        for frame in closing.iter().rev() {
            self.close_frame(frame);
        }
        for frame in closing {
            if frame.end != index {
                self.push_frame(frame.marker, frame.end);
            }
        }
    }

    fn push_frame(&mut self, marker: Marker<'a>, end: usize) {
        let open_at = self.buf.len();
        match marker {
            Marker::Style(symbol) => self.buf.push_str(symbol),
            Marker::Link(data) => {
                let open = self.link_open(data);
                self.buf.push_str(&open);
            }
        }
        self.stack.push(Frame {
            marker,
            end,
            open_at,
        });
    }

    fn close_frame(&mut self, frame: &Frame<'a>) {
        match frame.marker {
            Marker::Style(symbol) => self.close_style(symbol, frame.open_at),
            Marker::Link(data) => {
                let close = self.link_close(data);
                self.buf.push_str(&close);
            }
        }
    }

    /// Close a style span, moving leading and trailing whitespace of its body
    /// outside the markers. A whitespace-only body loses its markers.
    fn close_style(&mut self, symbol: &str, open_at: usize) {
        let body_start = open_at + symbol.len();
        let body = &self.buf[body_start..];

        if body.trim().is_empty() {
            self.buf.replace_range(open_at..body_start, "");
            return;
        }

        let leading = body.len() - body.trim_start().len();
        let trailing = body.len() - body.trim_end().len();

        let trailing_ws = self.buf.split_off(self.buf.len() - trailing);
        self.buf.push_str(symbol);
        self.buf.push_str(&trailing_ws);

        if leading > 0 {
            let leading_ws = self.buf[body_start..body_start + leading].to_string();
            self.buf
                .replace_range(open_at..body_start + leading, &format!("{leading_ws}{symbol}"));
        }
    }

    fn link_open(&self, data: &EntityData) -> String {
        match self.options.link_format {
            LinkFormat::Markdown => "[".to_string(),
            LinkFormat::Html => html::anchor_open(data),
        }
    }

    fn link_close(&self, data: &EntityData) -> String {
        match self.options.link_format {
            LinkFormat::Markdown => markdown_link_target(data),
            LinkFormat::Html => html::ANCHOR_CLOSE.to_string(),
        }
    }

    fn finish(self) -> Result<String> {
        if let Some(frame) = self.stack.last() {
            return Err(Error::malformed(format!(
                "span ending at {} still open at end of block",
                frame.end
            )));
        }
        Ok(self.buf)
    }
}

/// `](url)` or `](url "title")`.
fn markdown_link_target(data: &EntityData) -> String {
    let url = data.url_or_src();
    let url = if url.contains(|c: char| c.is_whitespace() || c == '(' || c == ')') {
        format!("<{url}>")
    } else {
        url.to_string()
    };
    match data.title {
        Some(ref title) => format!("]({url} \"{}\")", title.replace('"', "\\\"")),
        None => format!("]({url})"),
    }
}
