//! Markup written in place of media and atomic entities.

use crate::html;
use crate::model::{Entity, EntityType};

/// Markdown or HTML standing for an entity.
///
/// Entities imported from HTML are written back verbatim. Others are
/// synthesized from their data.
pub(crate) fn entity_markup(entity: &Entity) -> String {
    if let Some(raw) = entity.raw() {
        return raw.to_string();
    }

    let data = &entity.data;
    match entity.entity_type {
        EntityType::EmbeddedLink => html::render_iframe(data),
        EntityType::Image if data.width.is_some() || data.height.is_some() => html::render_img(data),
        EntityType::Image => format!(
            "![{}]({})",
            data.file_name.as_deref().unwrap_or_default(),
            data.url_or_src()
        ),
        EntityType::Link => format!("{}{}", html::anchor_open(data), html::ANCHOR_CLOSE),
        EntityType::Video => html::render_video(data.src_or_url()),
    }
}
