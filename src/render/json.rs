//! JSON rendering for documents.

use crate::error::Result;
use crate::model::Document;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a document to raw-content JSON.
pub fn to_json(doc: &Document, format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(doc)?,
        JsonFormat::Compact => serde_json::to_string(doc)?,
    };
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Block, Entity};

    #[test]
    fn test_to_json_pretty() {
        let mut doc = Document::new();
        doc.add_block(Block::unstyled("Hello").with_style(0, 5, "BOLD"));

        let json = to_json(&doc, JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"inlineStyleRanges\""));
        assert!(json.contains("\"BOLD\""));
        assert!(json.contains('\n')); // Pretty has newlines
    }

    #[test]
    fn test_to_json_compact() {
        let mut doc = Document::new();
        doc.add_block(Block::unstyled("Hello"));

        let json = to_json(&doc, JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n')); // Compact has no newlines
        assert!(json.contains(r#""entityMap":{"data":"","mutability":"","type":""}"#));
    }

    #[test]
    fn test_json_roundtrip() {
        let mut doc = Document::new();
        let key = doc.entity_map.insert(Entity::link("/x"));
        doc.add_block(Block::unstyled("link").with_entity(key, 0, 4));

        let json = to_json(&doc, JsonFormat::Compact).unwrap();
        assert!(json.contains(r#""entityMap":{"0":{"type":"LINK""#));
        assert_eq!(Document::from_json(&json).unwrap(), doc);
    }
}
