//! Template variable insertion into text fields.
//!
//! Variables are `{{ path.to.field }}` placeholders that the sending backend
//! fills in. The model never parses them; inserting one is plain string
//! concatenation at a cursor offset.

use serde::{Deserialize, Serialize};

use crate::content_block::ContentBlock;

/// Text fields of a block that accept variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextField {
    Title,
    Subtitle,
    Description,
    ImageAlt,
    ButtonText,
    ButtonUrl,
    TableShowMoreText,
    HeroTitle,
    HeroSubtitle,
    HeroButtonText,
    HeroButtonUrl,
}

impl TextField {
    fn slot(self, block: &mut ContentBlock) -> &mut Option<String> {
        match self {
            Self::Title => &mut block.title,
            Self::Subtitle => &mut block.subtitle,
            Self::Description => &mut block.description,
            Self::ImageAlt => &mut block.image_alt,
            Self::ButtonText => &mut block.button_text,
            Self::ButtonUrl => &mut block.button_url,
            Self::TableShowMoreText => &mut block.table_show_more_text,
            Self::HeroTitle => &mut block.hero_title,
            Self::HeroSubtitle => &mut block.hero_subtitle,
            Self::HeroButtonText => &mut block.hero_button_text,
            Self::HeroButtonUrl => &mut block.hero_button_url,
        }
    }
}

/// Format a variable path as a placeholder, e.g. `booking.date` becomes
/// `{{ booking.date }}`.
pub fn format_variable(path: &str) -> String {
    format!("{{{{ {} }}}}", path.trim())
}

/// Insert `insertion` into `text` at a cursor offset counted in characters.
///
/// Offsets past the end append. Returns the new text and the cursor offset
/// just after the inserted text.
pub fn insert_at(text: &str, cursor: usize, insertion: &str) -> (String, usize) {
    let byte_index = text
        .char_indices()
        .nth(cursor)
        .map_or(text.len(), |(i, _)| i);
    let cursor = text[..byte_index].chars().count();

    let mut next = String::with_capacity(text.len() + insertion.len());
    next.push_str(&text[..byte_index]);
    next.push_str(insertion);
    next.push_str(&text[byte_index..]);
    (next, cursor + insertion.chars().count())
}

/// Insert a variable placeholder for `path` at `cursor`.
pub fn insert_variable(text: &str, cursor: usize, path: &str) -> (String, usize) {
    insert_at(text, cursor, &format_variable(path))
}

/// Copy of `block` with a variable placeholder inserted into `field`.
/// An unset field is treated as empty.
pub fn insert_variable_into(
    block: &ContentBlock,
    field: TextField,
    cursor: usize,
    path: &str,
) -> ContentBlock {
    let mut next = block.clone();
    let slot = field.slot(&mut next);
    let (text, _) = insert_variable(slot.as_deref().unwrap_or(""), cursor, path);
    *slot = Some(text);
    next
}
