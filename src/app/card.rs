use crate::api::Entity;

/// Shown in place of entities without a thumbnail.
pub(super) const PLACEHOLDER_THUMBNAIL: &str = "https://via.placeholder.com/50";

/// Visual parameters for one entity card, derived from the two sizing scalars
/// the backend returns. Higher relevance raises the font size; `card_size`
/// bounds the image and how much of the abstract fits on the card.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct CardStyle {
    pub(super) card_size: f32,
    pub(super) font_size: f32,
    pub(super) image_size: f32,
    pub(super) max_comment_len: usize,
}

impl CardStyle {
    pub(super) fn for_entity(entity: &Entity) -> Self {
        Self {
            card_size: entity.card_size,
            font_size: (10.0 + entity.relevance * 6.0).clamp(10.0, 16.0),
            image_size: entity.card_size.clamp(30.0, 100.0),
            max_comment_len: (entity.card_size * 1.5).floor() as usize,
        }
    }

    pub(super) fn caption_font_size(self) -> f32 {
        self.font_size * 0.8
    }
}

/// Character-based so multi-byte abstracts never split mid-codepoint.
pub(super) fn truncate_comment(comment: &str, max_len: usize) -> String {
    if comment.chars().count() > max_len {
        let mut truncated = comment.chars().take(max_len).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        comment.to_owned()
    }
}

pub(super) fn thumbnail_source(entity: &Entity) -> &str {
    entity
        .thumbnail
        .as_deref()
        .filter(|url| !url.is_empty())
        .unwrap_or(PLACEHOLDER_THUMBNAIL)
}
