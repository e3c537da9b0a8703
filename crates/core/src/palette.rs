//! Brand color palette offered as quick-pick swatches in color fields.
//!
//! Swatches are kept in insertion order. Colors are not deduplicated and
//! not validated beyond being non-empty.

use serde::{Deserialize, Serialize};

use crate::types::{new_id, SwatchId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorSwatch {
    pub id: SwatchId,
    #[serde(default)]
    pub label: String,
    /// Hex color, e.g. `#6b21a8`.
    pub color: String,
}

impl ColorSwatch {
    pub fn new(label: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            label: label.into(),
            color: color.into(),
        }
    }
}

/// Append a swatch. Swatches with an empty color are ignored.
pub fn add_swatch(palette: &[ColorSwatch], swatch: ColorSwatch) -> Vec<ColorSwatch> {
    let mut next = palette.to_vec();
    if swatch.color.trim().is_empty() {
        tracing::warn!(swatch_id = %swatch.id, "Ignoring swatch without a color");
        return next;
    }
    next.push(swatch);
    next
}

/// Replace the swatch with the same id. Unknown ids leave the palette as is.
pub fn update_swatch(palette: &[ColorSwatch], swatch: ColorSwatch) -> Vec<ColorSwatch> {
    palette
        .iter()
        .map(|s| if s.id == swatch.id { swatch.clone() } else { s.clone() })
        .collect()
}

pub fn remove_swatch(palette: &[ColorSwatch], swatch_id: &str) -> Vec<ColorSwatch> {
    palette.iter().filter(|s| s.id != swatch_id).cloned().collect()
}
