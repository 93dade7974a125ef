//! Entity types: links and embedded media referenced from block text.

use super::EntityKey;
use serde::de::{Deserializer, Error as _};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A non-textual or link-like annotation referenced by key from blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Entity type
    #[serde(rename = "type")]
    pub entity_type: EntityType,

    /// Whether the annotated text may be edited without removing the entity
    pub mutability: Mutability,

    /// Type-specific payload
    #[serde(default)]
    pub data: EntityData,
}

impl Entity {
    /// Create an inline link entity.
    pub fn link(url: impl Into<String>) -> Self {
        Self {
            entity_type: EntityType::Link,
            mutability: Mutability::Mutable,
            data: EntityData {
                url: Some(url.into()),
                ..Default::default()
            },
        }
    }

    /// Create an image entity from a Markdown image.
    pub fn image(url: impl Into<String>, alt: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            entity_type: EntityType::Image,
            mutability: Mutability::Immutable,
            data: EntityData {
                src: Some(url.clone()),
                url: Some(url),
                file_name: Some(alt.into()),
                ..Default::default()
            },
        }
    }

    /// Create a video entity from an embed shortcode.
    pub fn video(src: impl Into<String>) -> Self {
        Self {
            entity_type: EntityType::Video,
            mutability: Mutability::Immutable,
            data: EntityData {
                src: Some(src.into()),
                ..Default::default()
            },
        }
    }

    /// Verbatim markup this entity was created from, if preserved.
    pub fn raw(&self) -> Option<&str> {
        self.data.metadata.as_ref().map(|m| m.raw.as_str())
    }

    /// Check if this entity renders as a single placeholder character.
    pub fn is_media(&self) -> bool {
        matches!(
            self.entity_type,
            EntityType::Image | EntityType::EmbeddedLink | EntityType::Video
        )
    }
}

/// Entity type identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityType {
    #[serde(rename = "LINK")]
    Link,
    #[serde(rename = "IMAGE")]
    Image,
    #[serde(rename = "EMBEDDED_LINK")]
    EmbeddedLink,
    #[serde(rename = "draft-js-video-plugin-video", alias = "VIDEO")]
    Video,
}

/// Entity mutability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Mutability {
    Mutable,
    Immutable,
}

/// Entity payload. Which fields are present depends on the entity type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,

    /// Link title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Image alt text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,

    /// Original markup for verbatim round-trip
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<EntityMetadata>,
}

impl EntityData {
    /// `url`, falling back to `src`.
    pub fn url_or_src(&self) -> &str {
        self.url
            .as_deref()
            .or(self.src.as_deref())
            .unwrap_or_default()
    }

    /// `src`, falling back to `url`.
    pub fn src_or_url(&self) -> &str {
        self.src
            .as_deref()
            .or(self.url.as_deref())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityMetadata {
    pub raw: String,
}

/// Document-wide entity table.
///
/// Keys are assigned sequentially as entities are discovered and never
/// reused. An empty map serializes as a placeholder object because the
/// raw-content format rejects an empty `entityMap`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityMap {
    entries: BTreeMap<EntityKey, Entity>,
}

impl EntityMap {
    /// Create an empty entity map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entity under the next key (the current size of the map).
    pub fn insert(&mut self, entity: Entity) -> EntityKey {
        let key = self.entries.len() as EntityKey;
        self.entries.insert(key, entity);
        key
    }

    /// Get an entity by key.
    pub fn get(&self, key: EntityKey) -> Option<&Entity> {
        self.entries.get(&key)
    }

    /// Number of entities.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the map holds no entities.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entities in key order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityKey, &Entity)> {
        self.entries.iter().map(|(k, v)| (*k, v))
    }
}

impl FromIterator<(EntityKey, Entity)> for EntityMap {
    fn from_iter<I: IntoIterator<Item = (EntityKey, Entity)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Placeholder emitted in place of an empty entity map.
#[derive(Serialize, Deserialize)]
struct PlaceholderEntity {
    data: String,
    mutability: String,
    #[serde(rename = "type")]
    entity_type: String,
}

impl Serialize for EntityMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.entries.is_empty() {
            let placeholder = PlaceholderEntity {
                data: String::new(),
                mutability: String::new(),
                entity_type: String::new(),
            };
            return placeholder.serialize(serializer);
        }

        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, entity) in &self.entries {
            map.serialize_entry(&key.to_string(), entity)?;
        }
        map.end()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntityMap {
    Entries(BTreeMap<String, Entity>),
    Placeholder(PlaceholderEntity),
}

impl<'de> Deserialize<'de> for EntityMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawEntityMap::deserialize(deserializer)? {
            RawEntityMap::Placeholder(_) => Ok(EntityMap::new()),
            RawEntityMap::Entries(entries) => entries
                .into_iter()
                .map(|(key, entity)| {
                    key.parse::<EntityKey>()
                        .map(|k| (k, entity))
                        .map_err(|_| D::Error::custom(format!("invalid entity key: {key}")))
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_keys() {
        let mut map = EntityMap::new();
        assert_eq!(map.insert(Entity::link("a")), 0);
        assert_eq!(map.insert(Entity::video("b")), 1);
        assert_eq!(map.insert(Entity::image("c", "")), 2);
        assert_eq!(map.iter().map(|(k, _)| k).collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    #[test]
    fn test_empty_map_serializes_placeholder() {
        let json = serde_json::to_value(EntityMap::new()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "data": "", "mutability": "", "type": "" })
        );
    }

    #[test]
    fn test_placeholder_deserializes_empty() {
        let map: EntityMap =
            serde_json::from_str(r#"{"data":"","mutability":"","type":""}"#).unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn test_entity_map_json() {
        let mut map = EntityMap::new();
        map.insert(Entity::link("https://example.com"));
        map.insert(Entity::video("https://youtu.be/x"));

        let json = serde_json::to_value(&map).unwrap();
        assert_eq!(json["0"]["type"], "LINK");
        assert_eq!(json["0"]["mutability"], "MUTABLE");
        assert_eq!(json["0"]["data"]["url"], "https://example.com");
        assert_eq!(json["1"]["type"], "draft-js-video-plugin-video");

        let parsed: EntityMap = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, map);
    }

    #[test]
    fn test_video_alias() {
        let entity: Entity =
            serde_json::from_str(r#"{"type":"VIDEO","mutability":"IMMUTABLE","data":{"src":"v"}}"#)
                .unwrap();
        assert_eq!(entity.entity_type, EntityType::Video);
        assert_eq!(entity.data.src_or_url(), "v");
    }

    #[test]
    fn test_invalid_key_rejected() {
        let result: Result<EntityMap, _> = serde_json::from_str(
            r#"{"first":{"type":"LINK","mutability":"MUTABLE","data":{"url":"u"}}}"#,
        );
        assert!(result.is_err());
    }
}
