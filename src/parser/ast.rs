//! Owned Markdown syntax tree built from the comrak AST.
//!
//! The converter only needs a small, typed view of the parse: node kinds,
//! literal values, and the raw source text of block nodes. Inline HTML runs
//! that comrak leaves as separate tags (`<iframe ...>`, `</iframe>`,
//! `<a href=...>`, `</a>`) are folded into single nodes here.

use crate::html::HtmlTag;
use comrak::nodes::{AstNode, ListType, NodeValue, Sourcepos};
use comrak::{parse_document, Arena, ComrakOptions};
use std::collections::VecDeque;

/// Kind of a Markdown node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Root,
    Paragraph,
    Header(u8),
    List { ordered: bool },
    ListItem,
    BlockQuote,
    CodeBlock { language: Option<String> },
    Html { inline: bool },
    Link { url: String, title: String },
    Image { url: String, alt: String },
    Strong,
    Emphasis,
    Delete,
    Code,
    Str,
    Break,
    HorizontalRule,
    Other,
}

impl NodeKind {
    /// Name used to look the kind up in style dictionaries.
    pub fn key(&self) -> &'static str {
        match self {
            NodeKind::Root => "Root",
            NodeKind::Paragraph => "Paragraph",
            NodeKind::Header(1) => "Header1",
            NodeKind::Header(2) => "Header2",
            NodeKind::Header(3) => "Header3",
            NodeKind::Header(4) => "Header4",
            NodeKind::Header(5) => "Header5",
            NodeKind::Header(_) => "Header6",
            NodeKind::List { .. } => "List",
            NodeKind::ListItem => "ListItem",
            NodeKind::BlockQuote => "BlockQuote",
            NodeKind::CodeBlock { .. } => "CodeBlock",
            NodeKind::Html { .. } => "Html",
            NodeKind::Link { .. } => "Link",
            NodeKind::Image { .. } => "Image",
            NodeKind::Strong => "Strong",
            NodeKind::Emphasis => "Emphasis",
            NodeKind::Delete => "Delete",
            NodeKind::Code => "Code",
            NodeKind::Str => "Str",
            NodeKind::Break => "Break",
            NodeKind::HorizontalRule => "HorizontalRule",
            NodeKind::Other => "Other",
        }
    }
}

/// A Markdown syntax node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MdNode {
    pub kind: NodeKind,

    /// Literal text of leaf nodes
    pub value: Option<String>,

    /// Source text the node was parsed from
    pub raw: String,

    pub children: Vec<MdNode>,
}

impl MdNode {
    fn leaf(kind: NodeKind, value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            kind,
            raw: value.clone(),
            value: Some(value),
            children: Vec::new(),
        }
    }

    /// First child, if any.
    pub fn first_child(&self) -> Option<&MdNode> {
        self.children.first()
    }

    /// Check if the node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

fn default_comrak_options() -> ComrakOptions<'static> {
    let mut options = ComrakOptions::default();
    options.extension.strikethrough = true;
    options
}

/// Parse Markdown into an owned tree rooted at a `Root` node.
pub fn parse(source: &str) -> MdNode {
    let arena = Arena::new();
    let options = default_comrak_options();
    let root = parse_document(&arena, source, &options);

    let lines: Vec<&str> = source.split('\n').collect();
    convert_node(root, &lines)
}

fn convert_node<'a>(node: &'a AstNode<'a>, lines: &[&str]) -> MdNode {
    let ast = node.data.borrow();
    let children: Vec<MdNode> = node.children().map(|c| convert_node(c, lines)).collect();

    let block = |kind: NodeKind, children: Vec<MdNode>| MdNode {
        kind,
        value: None,
        raw: slice_source(lines, &ast.sourcepos),
        children: fold_inline_html(children),
    };

    match &ast.value {
        NodeValue::Document => block(NodeKind::Root, children),
        NodeValue::Paragraph => block(NodeKind::Paragraph, children),
        NodeValue::Heading(heading) => block(NodeKind::Header(heading.level), children),
        NodeValue::List(list) => block(
            NodeKind::List {
                ordered: matches!(list.list_type, ListType::Ordered),
            },
            children,
        ),
        NodeValue::Item(_) => block(NodeKind::ListItem, children),
        NodeValue::BlockQuote => block(NodeKind::BlockQuote, children),
        NodeValue::CodeBlock(code) => {
            let info = code.info.trim();
            let literal = code.literal.strip_suffix('\n').unwrap_or(&code.literal);
            MdNode {
                kind: NodeKind::CodeBlock {
                    language: (!info.is_empty()).then(|| info.to_string()),
                },
                value: Some(literal.to_string()),
                raw: slice_source(lines, &ast.sourcepos),
                children: Vec::new(),
            }
        }
        NodeValue::HtmlBlock(html) => MdNode::leaf(
            NodeKind::Html { inline: false },
            html.literal.trim_end_matches('\n'),
        ),
        NodeValue::ThematicBreak => {
            let raw = slice_source(lines, &ast.sourcepos);
            MdNode::leaf(NodeKind::HorizontalRule, raw.trim())
        }
        NodeValue::Text(text) => MdNode::leaf(NodeKind::Str, text.as_str()),
        NodeValue::SoftBreak => MdNode::leaf(NodeKind::Str, "\n"),
        NodeValue::LineBreak => MdNode::leaf(NodeKind::Break, "\n"),
        NodeValue::Code(code) => MdNode::leaf(NodeKind::Code, code.literal.as_str()),
        NodeValue::HtmlInline(html) => MdNode::leaf(NodeKind::Html { inline: true }, html.as_str()),
        NodeValue::Image(link) => {
            let mut alt = String::new();
            collect_text(&children, &mut alt);
            MdNode {
                kind: NodeKind::Image {
                    url: link.url.clone(),
                    alt,
                },
                value: None,
                raw: String::new(),
                children: Vec::new(),
            }
        }
        NodeValue::Link(link) => inline(
            NodeKind::Link {
                url: link.url.clone(),
                title: link.title.clone(),
            },
            children,
        ),
        NodeValue::Strong => inline(NodeKind::Strong, children),
        NodeValue::Emph => inline(NodeKind::Emphasis, children),
        NodeValue::Strikethrough => inline(NodeKind::Delete, children),
        _ => inline(NodeKind::Other, children),
    }
}

fn inline(kind: NodeKind, children: Vec<MdNode>) -> MdNode {
    let children = fold_inline_html(children);
    MdNode {
        kind,
        value: None,
        raw: children.iter().map(|c| c.raw.as_str()).collect(),
        children,
    }
}

/// Concatenate the literal text under `nodes`.
pub fn collect_text(nodes: &[MdNode], out: &mut String) {
    for node in nodes {
        if let Some(ref value) = node.value {
            out.push_str(value);
        }
        collect_text(&node.children, out);
    }
}

/// Source text covered by a sourcepos (1-based lines and columns, inclusive end).
fn slice_source(lines: &[&str], pos: &Sourcepos) -> String {
    let (start, end) = (&pos.start, &pos.end);
    if start.line == 0 || end.line < start.line {
        return String::new();
    }

    let mut parts = Vec::with_capacity(end.line - start.line + 1);
    for line_no in start.line..=end.line {
        let Some(line) = lines.get(line_no - 1) else {
            break;
        };
        let from = if line_no == start.line {
            start.column.saturating_sub(1)
        } else {
            0
        };
        let to = if line_no == end.line {
            end.column.min(line.len())
        } else {
            line.len()
        };
        parts.push(line.get(from..to.max(from)).unwrap_or(line));
    }
    parts.join("\n")
}

/// Tag that closes an inline HTML node opening an iframe or anchor.
fn closing_tag(node: &MdNode) -> Option<&'static str> {
    if node.kind != (NodeKind::Html { inline: true }) {
        return None;
    }
    let raw = node.raw.trim_start();
    if raw.starts_with("<iframe") && !raw.contains("</iframe>") {
        Some("</iframe>")
    } else if raw.starts_with("<a ") || raw.starts_with("<a>") {
        Some("</a>")
    } else {
        None
    }
}

fn closes(node: &MdNode, tag: &str) -> bool {
    node.kind == (NodeKind::Html { inline: true }) && node.raw.trim().eq_ignore_ascii_case(tag)
}

/// Fold `<iframe ...>...</iframe>` runs into one HTML node and
/// `<a href=...>...</a>` runs into a link node.
fn fold_inline_html(children: Vec<MdNode>) -> Vec<MdNode> {
    let mut queue: VecDeque<MdNode> = children.into();
    let mut folded = Vec::with_capacity(queue.len());

    while let Some(node) = queue.pop_front() {
        let Some(tag) = closing_tag(&node) else {
            folded.push(node);
            continue;
        };
        let Some(end) = queue.iter().position(|n| closes(n, tag)) else {
            folded.push(node);
            continue;
        };

        let inner: Vec<MdNode> = queue.drain(..end).collect();
        let close_raw = queue.pop_front().map(|n| n.raw).unwrap_or_default();
        let raw: String = std::iter::once(node.raw.as_str())
            .chain(inner.iter().map(|n| n.raw.as_str()))
            .chain(std::iter::once(close_raw.as_str()))
            .collect();

        if tag == "</iframe>" {
            folded.push(MdNode::leaf(NodeKind::Html { inline: true }, raw));
            continue;
        }

        match HtmlTag::find(&node.raw, "a") {
            Ok(anchor) => folded.push(MdNode {
                kind: NodeKind::Link {
                    url: anchor.attr("href").unwrap_or_default().to_string(),
                    title: anchor.attr("title").unwrap_or_default().to_string(),
                },
                value: None,
                raw,
                children: inner,
            }),
            Err(_) => {
                folded.push(node);
                folded.extend(inner);
                folded.push(MdNode::leaf(NodeKind::Html { inline: true }, close_raw));
            }
        }
    }

    folded
}

#[cfg(test)]
mod tests {
    use super::*;
    use comrak::nodes::LineColumn;

    fn kinds(nodes: &[MdNode]) -> Vec<&'static str> {
        nodes.iter().map(|n| n.kind.key()).collect()
    }

    #[test]
    fn test_parse_heading() {
        let root = parse("## Title");
        let heading = root.first_child().unwrap();
        assert_eq!(heading.kind, NodeKind::Header(2));
        assert_eq!(heading.kind.key(), "Header2");
        assert_eq!(heading.children[0].value.as_deref(), Some("Title"));
    }

    #[test]
    fn test_parse_strong() {
        let root = parse("Hello **world**");
        let para = root.first_child().unwrap();
        assert_eq!(para.kind, NodeKind::Paragraph);
        assert_eq!(kinds(&para.children), vec!["Str", "Strong"]);
        assert_eq!(para.children[1].children[0].value.as_deref(), Some("world"));
    }

    #[test]
    fn test_parse_lists() {
        let ordered = parse("3. c");
        assert_eq!(
            ordered.first_child().unwrap().kind,
            NodeKind::List { ordered: true }
        );
        let bullet = parse("- c");
        assert_eq!(
            bullet.first_child().unwrap().kind,
            NodeKind::List { ordered: false }
        );
    }

    #[test]
    fn test_parse_code_block() {
        let root = parse("```rust\nlet a = 1;\n```");
        let code = root.first_child().unwrap();
        assert_eq!(
            code.kind,
            NodeKind::CodeBlock {
                language: Some("rust".to_string())
            }
        );
        assert_eq!(code.value.as_deref(), Some("let a = 1;"));
    }

    #[test]
    fn test_parse_image() {
        let root = parse("![a *cat*](cat.png)");
        let image = root.first_child().unwrap().first_child().unwrap();
        assert_eq!(
            image.kind,
            NodeKind::Image {
                url: "cat.png".to_string(),
                alt: "a cat".to_string()
            }
        );
        assert!(image.is_leaf());
    }

    #[test]
    fn test_paragraph_raw() {
        let root = parse("> [[ embed url=x ]]");
        let quote = root.first_child().unwrap();
        assert_eq!(quote.kind, NodeKind::BlockQuote);
        assert_eq!(quote.first_child().unwrap().raw, "[[ embed url=x ]]");
    }

    #[test]
    fn test_html_block() {
        let root = parse(r#"<img src="a.png">"#);
        let html = root.first_child().unwrap();
        assert_eq!(html.kind, NodeKind::Html { inline: false });
        assert_eq!(html.raw, r#"<img src="a.png">"#);
    }

    #[test]
    fn test_fold_inline_iframe() {
        let root = parse(r#"see <iframe src="x"></iframe> here"#);
        let para = root.first_child().unwrap();
        assert_eq!(kinds(&para.children), vec!["Str", "Html", "Str"]);
        assert_eq!(para.children[1].raw, r#"<iframe src="x"></iframe>"#);
    }

    #[test]
    fn test_fold_inline_anchor() {
        let root = parse(r#"go <a href="/x">there</a> now"#);
        let para = root.first_child().unwrap();
        assert_eq!(kinds(&para.children), vec!["Str", "Link", "Str"]);
        assert_eq!(
            para.children[1].kind,
            NodeKind::Link {
                url: "/x".to_string(),
                title: String::new()
            }
        );
        assert_eq!(para.children[1].children[0].value.as_deref(), Some("there"));
    }

    #[test]
    fn test_unclosed_anchor_left_alone() {
        let root = parse(r#"go <a href="/x">there"#);
        let para = root.first_child().unwrap();
        assert_eq!(kinds(&para.children), vec!["Str", "Html", "Str"]);
    }

    #[test]
    fn test_slice_source_multiline() {
        let lines = vec!["> a", "> bc"];
        let pos = Sourcepos {
            start: LineColumn { line: 1, column: 3 },
            end: LineColumn { line: 2, column: 4 },
        };
        assert_eq!(slice_source(&lines, &pos), "a\n> bc");
    }
}
