//! Integration tests for document → Markdown conversion.

use draftmark::{
    document_to_markdown, parse_markdown, to_markdown, Block, BlockType, Document, Entity,
    EntityData, EntityMetadata, EntityType, Error, LinkFormat, Mutability, ParseOptions,
    RenderOptions,
};
use pretty_assertions::assert_eq;

fn doc_with(blocks: Vec<Block>, entities: Vec<Entity>) -> Document {
    let mut doc = Document::new();
    for entity in entities {
        doc.entity_map.insert(entity);
    }
    for block in blocks {
        doc.add_block(block);
    }
    doc
}

#[test]
fn test_ordered_numbering_with_blank_lines() {
    let options = ParseOptions::new().with_blank_lines(true);
    let doc = draftmark::markdown_to_document("1. a\n2. b\n\n- c\n\n3. d", &options).unwrap();
    let md = to_markdown(&doc).unwrap();
    assert_eq!(md, "1. a\n2. b\n\n- c\n\n3. d");
}

#[test]
fn test_ordered_numbering_counts_whole_document() {
    let doc = parse_markdown("1. a\n2. b\n\n- c\n\n3. d").unwrap();
    let md = to_markdown(&doc).unwrap();
    assert_eq!(md, "1. a\n2. b\n- c\n3. d");
}

#[test]
fn test_overlapping_styles_do_not_cross() {
    let doc = doc_with(
        vec![Block::unstyled("bold both italic")
            .with_style(0, 9, "BOLD")
            .with_style(5, 11, "ITALIC")],
        vec![],
    );
    let md = to_markdown(&doc).unwrap();
    assert_eq!(md, "__bold *both*__ *italic*");
}

#[test]
fn test_longest_span_outermost() {
    let doc = doc_with(
        vec![Block::unstyled("ab cd")
            .with_style(0, 2, "ITALIC")
            .with_style(0, 5, "BOLD")],
        vec![],
    );
    assert_eq!(to_markdown(&doc).unwrap(), "__*ab* cd__");
}

#[test]
fn test_whitespace_relocated_on_both_sides() {
    let doc = doc_with(
        vec![Block::unstyled("say  hi  now").with_style(3, 6, "ITALIC")],
        vec![],
    );
    assert_eq!(to_markdown(&doc).unwrap(), "say  *hi*  now");
}

#[test]
fn test_iframe_synthesized_without_raw() {
    let iframe = Entity {
        entity_type: EntityType::EmbeddedLink,
        mutability: Mutability::Mutable,
        data: EntityData {
            src: Some("https://e.com/v".to_string()),
            width: Some("560".to_string()),
            height: Some("315".to_string()),
            ..Default::default()
        },
    };
    let doc = doc_with(vec![Block::atomic(0)], vec![iframe]);

    assert_eq!(
        to_markdown(&doc).unwrap(),
        "<iframe allowfullscreen width=\"560\" height=\"315\" frameborder=\"0\" src=\"https://e.com/v\" allow=\"accelerometer; autoplay; encrypted-media; gyroscope; picture-in-picture\"></iframe>"
    );
}

#[test]
fn test_atomic_raw_markup_verbatim() {
    let raw = "<a href=\"/about\" class=\"btn\">About</a>";
    let mut link = Entity::link("/about");
    link.data.metadata = Some(EntityMetadata {
        raw: raw.to_string(),
    });
    let doc = doc_with(vec![Block::atomic(0)], vec![link]);
    assert_eq!(to_markdown(&doc).unwrap(), raw);
}

#[test]
fn test_html_link_format() {
    let doc = parse_markdown("go [there](/x) now").unwrap();
    let options = RenderOptions::new().with_link_format(LinkFormat::Html);
    assert_eq!(
        document_to_markdown(&doc, &options).unwrap(),
        "go <a href=\"/x\">there</a> now"
    );
}

#[test]
fn test_code_block_without_language() {
    let doc = doc_with(vec![Block::new("x = 1", BlockType::CodeBlock)], vec![]);
    assert_eq!(to_markdown(&doc).unwrap(), "```\nx = 1\n```");
}

#[test]
fn test_style_past_text_is_error() {
    let doc = doc_with(vec![Block::unstyled("abc").with_style(2, 2, "BOLD")], vec![]);
    assert!(matches!(to_markdown(&doc).unwrap_err(), Error::MalformedInput(_)));
}

#[test]
fn test_entity_past_text_is_error() {
    let doc = doc_with(
        vec![Block::unstyled("abc").with_entity(0, 1, 5)],
        vec![Entity::link("/x")],
    );
    assert!(matches!(to_markdown(&doc).unwrap_err(), Error::MalformedInput(_)));
}

#[test]
fn test_huge_offset_from_json_is_error() {
    let json = r#"{
        "blocks": [
            {"text": "abc", "type": "unstyled", "depth": 0,
             "inlineStyleRanges": [{"offset": 18446744073709551615, "length": 2, "style": "BOLD"}],
             "entityRanges": []}
        ],
        "entityMap": {"data": "", "mutability": "", "type": ""}
    }"#;
    let doc = Document::from_json(json).unwrap();
    assert!(matches!(to_markdown(&doc).unwrap_err(), Error::MalformedInput(_)));
}

#[test]
fn test_document_from_json() {
    let json = r#"{
        "blocks": [
            {"text": "Hi there", "type": "header-two", "depth": 0,
             "inlineStyleRanges": [{"offset": 3, "length": 5, "style": "ITALIC"}],
             "entityRanges": []},
            {"text": " ", "type": "atomic", "depth": 0,
             "inlineStyleRanges": [],
             "entityRanges": [{"key": 0, "offset": 0, "length": 1}]}
        ],
        "entityMap": {
            "0": {"type": "draft-js-video-plugin-video", "mutability": "IMMUTABLE",
                  "data": {"src": "https://youtu.be/x"}}
        }
    }"#;
    let doc = Document::from_json(json).unwrap();
    assert_eq!(
        to_markdown(&doc).unwrap(),
        "## Hi *there*\n[[ embed url=https://youtu.be/x ]]"
    );
}
