//! The instantiated email layout and its placement operations.
//!
//! An [`EmailLayout`] records which content block sits in which slot of a
//! catalog layout, optional per-slot width overrides, where the automatic
//! spacer sits in each row, and the user-placed dividers. Every operation
//! returns a new value; nothing mutates a layout in place.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::{LayoutDefinition, LayoutType};
use crate::divider::Divider;
use crate::rows::compose_rows;
use crate::types::{BlockId, Percent, SlotId};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Smallest width override a slot may carry (percent).
pub const MIN_SLOT_WIDTH: Percent = 10.0;

/// Largest width override a slot may carry (percent).
pub const MAX_SLOT_WIDTH: Percent = 90.0;

/// Rounding tolerance below 100% before a spacer is synthesized.
pub const SPACER_TOLERANCE: Percent = 1.0;

/// Default padding on every side of the email body, in pixels.
pub const DEFAULT_PADDING_PX: u32 = 20;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Padding around the email body, in pixels. Sides missing from a stored
/// document take the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Padding {
    pub top: u32,
    pub bottom: u32,
    pub left: u32,
    pub right: u32,
}

impl Default for Padding {
    fn default() -> Self {
        Self {
            top: DEFAULT_PADDING_PX,
            bottom: DEFAULT_PADDING_PX,
            left: DEFAULT_PADDING_PX,
            right: DEFAULT_PADDING_PX,
        }
    }
}

/// A chosen layout with its slot assignments and styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailLayout {
    #[serde(rename = "type")]
    pub layout_type: LayoutType,
    /// Slot id to content block id. Unassigned slots have no entry.
    #[serde(default, deserialize_with = "crate::lenient::map")]
    pub slots: BTreeMap<SlotId, BlockId>,
    /// Width overrides in percent. Slots without one share the remaining
    /// space of their row equally.
    #[serde(
        default,
        deserialize_with = "crate::lenient::map",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub slot_widths: BTreeMap<SlotId, Percent>,
    /// Row index to the insertion index of that row's spacer.
    #[serde(
        default,
        deserialize_with = "crate::lenient::map",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub spacer_positions: BTreeMap<usize, usize>,
    #[serde(default, deserialize_with = "crate::lenient::list")]
    pub dividers: Vec<Divider>,
    #[serde(
        default,
        deserialize_with = "crate::lenient::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub background_color: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::lenient::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub background_image: Option<String>,
    #[serde(default, deserialize_with = "crate::lenient::or_default")]
    pub padding: Padding,
}

/// Blank space synthesized in a row whose explicit widths fall short of 100%.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Spacer {
    /// Insertion index among the row's slots (`0..=slot_count`).
    pub position: usize,
    pub width: Percent,
}

/// How a slot's width was decided.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "percent", rename_all = "lowercase")]
pub enum CellWidth {
    /// An explicit width override.
    Fixed(Percent),
    /// An equal share of what the overrides leave over.
    Flex(Percent),
}

impl CellWidth {
    pub fn percent(self) -> Percent {
        match self {
            Self::Fixed(p) | Self::Flex(p) => p,
        }
    }
}

/// One horizontal cell of a composed row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "cell", rename_all = "camelCase")]
pub enum RowCell<'a> {
    #[serde(rename_all = "camelCase")]
    Slot {
        slot_id: &'static str,
        /// `None` renders as an empty-slot placeholder.
        block_id: Option<&'a str>,
        width: CellWidth,
    },
    Spacer { width: Percent },
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// Instantiate a catalog layout with no assignments, no dividers, default
/// padding and no background.
///
/// Selecting a layout always starts from scratch, even when the previous
/// layout shared slot ids with the new one.
pub fn select_layout(layout_type: LayoutType) -> EmailLayout {
    tracing::debug!(layout = %layout_type, "Layout selected");
    EmailLayout {
        layout_type,
        slots: BTreeMap::new(),
        slot_widths: BTreeMap::new(),
        spacer_positions: BTreeMap::new(),
        dividers: Vec::new(),
        background_color: None,
        background_image: None,
        padding: Padding::default(),
    }
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

impl EmailLayout {
    /// Catalog entry for this layout's type.
    pub fn definition(&self) -> &'static LayoutDefinition {
        self.layout_type.definition()
    }

    /// Place a block in a slot, replacing any previous occupant.
    ///
    /// The block id is not checked against the block collection; unresolved
    /// ids render as empty slots.
    pub fn assign_block(&self, slot_id: &str, block_id: &str) -> Self {
        tracing::debug!(slot = slot_id, block_id, "Block assigned to slot");
        let mut next = self.clone();
        next.slots.insert(slot_id.to_string(), block_id.to_string());
        next
    }

    /// Leave a slot unassigned.
    pub fn clear_slot(&self, slot_id: &str) -> Self {
        let mut next = self.clone();
        next.slots.remove(slot_id);
        next
    }

    /// Drop every slot entry that points at `block_id`.
    pub fn without_block(&self, block_id: &str) -> Self {
        let mut next = self.clone();
        next.slots.retain(|_, assigned| assigned != block_id);
        next
    }

    /// Override a slot's width, clamped to
    /// [`MIN_SLOT_WIDTH`]..=[`MAX_SLOT_WIDTH`]. Non-finite input is ignored.
    pub fn set_slot_width(&self, slot_id: &str, percent: Percent) -> Self {
        if !percent.is_finite() {
            tracing::warn!(slot = slot_id, percent, "Ignoring non-finite slot width");
            return self.clone();
        }
        let mut next = self.clone();
        next.slot_widths
            .insert(slot_id.to_string(), clamp_width(percent));
        next
    }

    /// Remove a slot's width override so it sizes flexibly again.
    pub fn clear_slot_width(&self, slot_id: &str) -> Self {
        let mut next = self.clone();
        next.slot_widths.remove(slot_id);
        next
    }

    pub fn with_padding(&self, padding: Padding) -> Self {
        Self {
            padding,
            ..self.clone()
        }
    }

    pub fn with_background(&self, color: Option<String>, image: Option<String>) -> Self {
        Self {
            background_color: color,
            background_image: image,
            ..self.clone()
        }
    }

    /// Block assigned to a slot, if any.
    pub fn block_in(&self, slot_id: &str) -> Option<&str> {
        self.slots.get(slot_id).map(String::as_str)
    }

    // -- Spacers --

    /// Number of slots in a row, or `None` if the row does not exist.
    pub fn row_len(&self, row_index: usize) -> Option<usize> {
        compose_rows(self.layout_type).get(row_index).map(|row| row.len())
    }

    /// Where the spacer of a row sits: the stored position clamped to the
    /// row, or the end of the row by default.
    pub fn spacer_position(&self, row_index: usize, row_len: usize) -> usize {
        self.spacer_positions
            .get(&row_index)
            .copied()
            .unwrap_or(row_len)
            .min(row_len)
    }

    /// Spacer for a row of slots, if one is needed.
    ///
    /// A spacer exists only when every slot in the row has an explicit width
    /// and the widths add up to less than `100 - SPACER_TOLERANCE`. Any slot
    /// without a width absorbs the remainder instead.
    pub fn row_spacer(&self, row_index: usize, row_slot_ids: &[&str]) -> Option<Spacer> {
        if row_slot_ids.is_empty() {
            return None;
        }
        let widths: Vec<Percent> = row_slot_ids
            .iter()
            .filter_map(|id| self.slot_widths.get(*id).copied())
            .collect();
        if widths.len() != row_slot_ids.len() {
            return None;
        }
        let total: Percent = widths.iter().sum();
        if total < 100.0 - SPACER_TOLERANCE {
            Some(Spacer {
                position: self.spacer_position(row_index, row_slot_ids.len()),
                width: 100.0 - total,
            })
        } else {
            None
        }
    }

    /// Move a row's spacer one slot to the left. No-op at the left edge or
    /// for a row that does not exist.
    pub fn move_spacer_left(&self, row_index: usize) -> Self {
        let Some(row_len) = self.row_len(row_index) else {
            tracing::warn!(row_index, "Ignoring spacer move in unknown row");
            return self.clone();
        };
        let current = self.spacer_position(row_index, row_len);
        if current == 0 {
            return self.clone();
        }
        let mut next = self.clone();
        next.spacer_positions.insert(row_index, current - 1);
        next
    }

    /// Move a row's spacer one slot to the right, never past `max_position`
    /// or the end of the row.
    pub fn move_spacer_right(&self, row_index: usize, max_position: usize) -> Self {
        let Some(row_len) = self.row_len(row_index) else {
            tracing::warn!(row_index, "Ignoring spacer move in unknown row");
            return self.clone();
        };
        let limit = max_position.min(row_len);
        let current = self.spacer_position(row_index, row_len);
        if current >= limit {
            return self.clone();
        }
        let mut next = self.clone();
        next.spacer_positions.insert(row_index, current + 1);
        next
    }

    // -- Composition --

    /// Compose every row into cells: slots with resolved widths, plus the
    /// synthesized spacer where one is needed.
    pub fn row_cells(&self) -> Vec<Vec<RowCell<'_>>> {
        compose_rows(self.layout_type)
            .into_iter()
            .enumerate()
            .map(|(row_index, row)| {
                let ids: Vec<&str> = row.iter().map(|s| s.id).collect();
                let fixed_total: Percent = ids
                    .iter()
                    .filter_map(|id| self.slot_widths.get(*id))
                    .sum();
                let flex_count = ids
                    .iter()
                    .filter(|id| !self.slot_widths.contains_key(**id))
                    .count();
                let flex_share = if flex_count == 0 {
                    0.0
                } else {
                    (100.0 - fixed_total).max(0.0) / flex_count as Percent
                };

                let mut cells: Vec<RowCell<'_>> = row
                    .iter()
                    .map(|slot| RowCell::Slot {
                        slot_id: slot.id,
                        block_id: self.block_in(slot.id),
                        width: match self.slot_widths.get(slot.id) {
                            Some(&w) => CellWidth::Fixed(w),
                            None => CellWidth::Flex(flex_share),
                        },
                    })
                    .collect();

                if let Some(spacer) = self.row_spacer(row_index, &ids) {
                    cells.insert(spacer.position, RowCell::Spacer { width: spacer.width });
                }
                cells
            })
            .collect()
    }

    // -- Cleanup --

    /// Defensive cleanup for stored layouts: drop slot and width keys that
    /// are not part of this layout, clamp widths, spacer positions and
    /// divider spans.
    pub fn normalized(&self) -> Self {
        let def = self.definition();
        let rows = compose_rows(self.layout_type);
        let mut next = self.clone();

        next.slots.retain(|slot, _| def.has_slot(slot));
        next.slot_widths.retain(|slot, w| def.has_slot(slot) && w.is_finite());
        for w in next.slot_widths.values_mut() {
            *w = clamp_width(*w);
        }
        next.spacer_positions.retain(|row, _| *row < rows.len());
        for (row, pos) in next.spacer_positions.iter_mut() {
            *pos = (*pos).min(rows[*row].len());
        }
        next.dividers = next
            .dividers
            .iter()
            .map(|d| d.clamped_to(max_span_for(&rows, d)))
            .collect();
        next
    }
}

fn clamp_width(percent: Percent) -> Percent {
    percent.clamp(MIN_SLOT_WIDTH, MAX_SLOT_WIDTH)
}

/// Upper bound on a divider's span: the widest row for horizontal dividers,
/// the row count for vertical ones.
fn max_span_for(rows: &[&[crate::catalog::SlotDefinition]], divider: &Divider) -> usize {
    match divider.orientation {
        crate::divider::Orientation::Horizontal => {
            rows.iter().map(|r| r.len()).max().unwrap_or(1)
        }
        crate::divider::Orientation::Vertical => rows.len(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
