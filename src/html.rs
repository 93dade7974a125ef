//! Detection and serialization of embedded media markup.
//!
//! Markdown sources may carry a few raw HTML tags (`<iframe>`, `<img>`,
//! `<a>`) and the `[[ embed url=... ]]` video shortcode. These are turned
//! into entities on import and written back on export, verbatim when the
//! original markup was kept.

use crate::error::{Error, Result};
use crate::model::{Entity, EntityData, EntityMetadata, EntityType, Mutability};
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<([A-Za-z][A-Za-z0-9-]*)([^>]*)>").unwrap());

static ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([A-Za-z_:][-A-Za-z0-9_:.]*)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#)
        .unwrap()
});

// [[ embed url=<anything> ]]
static VIDEO_SHORTCODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[\[\s(?:embed)\s(?:url=(\S+))\s\]\]").unwrap());

const IFRAME_ALLOW: &str = "accelerometer; autoplay; encrypted-media; gyroscope; picture-in-picture";

/// Kind of recognized media markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HtmlMedia {
    Iframe,
    Img,
    Anchor,
}

/// Check for a complete iframe element.
pub fn is_iframe(raw: &str) -> bool {
    (raw.contains("<iframe ") || raw.contains("<iframe>")) && raw.contains("</iframe>")
}

/// Check for an img tag.
pub fn is_img(raw: &str) -> bool {
    raw.contains("<img ") || raw.contains("<img>") || raw.contains("<img/")
}

/// Check for an anchor tag.
pub fn is_anchor(raw: &str) -> bool {
    raw.trim_start().starts_with("<a ")
}

/// Classify raw HTML as one of the recognized media kinds.
pub fn classify(raw: &str) -> Option<HtmlMedia> {
    if is_iframe(raw) {
        Some(HtmlMedia::Iframe)
    } else if is_img(raw) {
        Some(HtmlMedia::Img)
    } else if is_anchor(raw) {
        Some(HtmlMedia::Anchor)
    } else {
        None
    }
}

/// URL of a `[[ embed url=... ]]` shortcode at the start of `raw`.
pub fn video_shortcode_url(raw: &str) -> Option<&str> {
    split_video_shortcode(raw).map(|(url, _)| url)
}

/// URL of a leading video shortcode and the text that follows it.
pub fn split_video_shortcode(raw: &str) -> Option<(&str, &str)> {
    let raw = raw.trim_start();
    let caps = VIDEO_SHORTCODE_RE.captures(raw)?;
    let url = caps.get(1)?.as_str();
    let end = caps.get(0)?.end();
    Some((url, &raw[end..]))
}

/// A single scanned HTML start tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlTag {
    /// Lowercased tag name
    pub name: String,
    attributes: Vec<(String, String)>,
}

impl HtmlTag {
    /// Scan the first `<name ...>` start tag in `raw`.
    ///
    /// Returns `MalformedInput` if the tag is mentioned but never terminated.
    pub fn find(raw: &str, name: &str) -> Result<Self> {
        let caps = TAG_RE
            .captures_iter(raw)
            .find(|caps| caps[1].eq_ignore_ascii_case(name))
            .ok_or_else(|| Error::malformed(format!("unterminated <{name}> tag: {raw}")))?;

        let attr_text = caps
            .get(2)
            .map(|m| m.as_str().trim_end_matches('/'))
            .unwrap_or_default();

        let attributes = ATTR_RE
            .captures_iter(attr_text)
            .map(|attr| {
                let value = attr
                    .get(2)
                    .or_else(|| attr.get(3))
                    .or_else(|| attr.get(4))
                    .map(|m| html_escape::decode_html_entities(m.as_str()).into_owned())
                    .unwrap_or_default();
                (attr[1].to_ascii_lowercase(), value)
            })
            .collect();

        Ok(Self {
            name: caps[1].to_ascii_lowercase(),
            attributes,
        })
    }

    /// Get an attribute value.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Get an attribute value or its default.
    pub fn attr_or_default(&self, name: &str) -> String {
        self.attr(name)
            .unwrap_or_else(|| default_attr(name))
            .to_string()
    }
}

/// Value used for an absent media attribute.
fn default_attr(name: &str) -> &'static str {
    match name {
        "width" | "height" => "auto",
        _ => "",
    }
}

/// Build the entity for recognized media markup.
///
/// Returns `Ok(None)` when `raw` is not one of the recognized tags. An iframe
/// without a `src` has nothing to embed and is reported as malformed.
pub fn entity_from_html(raw: &str) -> Result<Option<Entity>> {
    let Some(kind) = classify(raw) else {
        return Ok(None);
    };

    let metadata = Some(EntityMetadata {
        raw: raw.to_string(),
    });

    let entity = match kind {
        HtmlMedia::Iframe => {
            let tag = HtmlTag::find(raw, "iframe")?;
            let src = tag
                .attr("src")
                .ok_or_else(|| Error::malformed(format!("iframe has no src attribute: {raw}")))?;
            Entity {
                entity_type: EntityType::EmbeddedLink,
                mutability: Mutability::Mutable,
                data: EntityData {
                    src: Some(src.to_string()),
                    width: Some(tag.attr_or_default("width")),
                    height: Some(tag.attr_or_default("height")),
                    metadata,
                    ..Default::default()
                },
            }
        }
        HtmlMedia::Img => {
            let tag = HtmlTag::find(raw, "img")?;
            let src = tag.attr_or_default("src");
            Entity {
                entity_type: EntityType::Image,
                mutability: Mutability::Mutable,
                data: EntityData {
                    url: Some(src.clone()),
                    src: Some(src),
                    file_name: Some(tag.attr_or_default("alt")),
                    width: Some(tag.attr_or_default("width")),
                    height: Some(tag.attr_or_default("height")),
                    metadata,
                    ..Default::default()
                },
            }
        }
        HtmlMedia::Anchor => {
            let tag = HtmlTag::find(raw, "a")?;
            Entity {
                entity_type: EntityType::Link,
                mutability: Mutability::Mutable,
                data: EntityData {
                    url: Some(tag.attr_or_default("href")),
                    title: tag.attr("title").map(str::to_string),
                    metadata,
                    ..Default::default()
                },
            }
        }
    };

    Ok(Some(entity))
}

fn attr_value(value: &str) -> Cow<'_, str> {
    html_escape::encode_double_quoted_attribute(value)
}

/// Synthesize an iframe element from entity data.
pub fn render_iframe(data: &EntityData) -> String {
    format!(
        "<iframe allowfullscreen width=\"{}\" height=\"{}\" frameborder=\"0\" src=\"{}\" allow=\"{}\"></iframe>",
        attr_value(data.width.as_deref().unwrap_or("auto")),
        attr_value(data.height.as_deref().unwrap_or("auto")),
        attr_value(data.src_or_url()),
        IFRAME_ALLOW
    )
}

/// Synthesize an img tag from entity data.
pub fn render_img(data: &EntityData) -> String {
    let mut tag = format!(
        "<img alt=\"{}\" src=\"{}\"",
        attr_value(data.file_name.as_deref().unwrap_or_default()),
        attr_value(data.url_or_src())
    );
    if let Some(ref width) = data.width {
        tag.push_str(&format!(" width=\"{}\"", attr_value(width)));
    }
    if let Some(ref height) = data.height {
        tag.push_str(&format!(" height=\"{}\"", attr_value(height)));
    }
    tag.push_str(" />");
    tag
}

/// Opening anchor tag for a link.
pub fn anchor_open(data: &EntityData) -> String {
    match data.title {
        Some(ref title) => format!(
            "<a href=\"{}\" title=\"{}\">",
            attr_value(data.url_or_src()),
            attr_value(title)
        ),
        None => format!("<a href=\"{}\">", attr_value(data.url_or_src())),
    }
}

/// Closing anchor tag.
pub const ANCHOR_CLOSE: &str = "</a>";

/// Synthesize a video embed shortcode.
pub fn render_video(url: &str) -> String {
    format!("[[ embed url={url} ]]")
}
