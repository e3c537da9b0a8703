//! Row composition: grouping a layout's flat slot list into visual rows.
//!
//! The catalog does not carry row information, so the grouping is a fixed
//! lookup table keyed by layout type. Layouts without an entry render all
//! slots in one row.

use crate::catalog::{LayoutType, SlotDefinition};

/// Row lengths for layouts that are not a single row of slots.
///
/// The lengths must add up to the layout's slot count (see tests).
pub fn row_shape(layout_type: LayoutType) -> Option<&'static [usize]> {
    match layout_type {
        LayoutType::TwoStacked => Some(&[1, 1]),
        LayoutType::HeroSingle => Some(&[1, 1]),
        LayoutType::ThreeStacked => Some(&[1, 1, 1]),
        LayoutType::HeroTwoColumn => Some(&[1, 2]),
        LayoutType::TwoTopStacked => Some(&[2, 1]),
        LayoutType::FourGrid => Some(&[2, 2]),
        LayoutType::SixGrid => Some(&[3, 3]),
        LayoutType::Single
        | LayoutType::TwoColumn
        | LayoutType::SidebarLeft
        | LayoutType::ThreeColumn => None,
    }
}

/// Group the slots of `layout_type` into rows, in declaration order.
pub fn compose_rows(layout_type: LayoutType) -> Vec<&'static [SlotDefinition]> {
    let slots = layout_type.definition().slots;
    let Some(shape) = row_shape(layout_type) else {
        return vec![slots];
    };

    let mut rows = Vec::with_capacity(shape.len());
    let mut start = 0;
    for &len in shape {
        let end = (start + len).min(slots.len());
        rows.push(&slots[start..end]);
        start = end;
    }
    // Slots beyond the declared shape still render, in a trailing row.
    if start < slots.len() {
        rows.push(&slots[start..]);
    }
    rows
}

/// Row index of a slot, if the slot belongs to the layout.
pub fn row_of_slot(layout_type: LayoutType, slot_id: &str) -> Option<usize> {
    compose_rows(layout_type)
        .iter()
        .position(|row| row.iter().any(|s| s.id == slot_id))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
