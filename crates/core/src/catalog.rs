//! Layout catalog: the fixed set of email layout templates.
//!
//! Each [`LayoutDefinition`] names its slots and the block-count window it
//! is offered for. The catalog is static data; declaration order is the
//! order layouts are suggested in.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Layout types
// ---------------------------------------------------------------------------

/// Identifier of a catalog layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutType {
    Single,
    TwoColumn,
    SidebarLeft,
    TwoStacked,
    HeroSingle,
    ThreeColumn,
    ThreeStacked,
    HeroTwoColumn,
    TwoTopStacked,
    FourGrid,
    SixGrid,
}

impl LayoutType {
    /// Wire name of the layout type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::TwoColumn => "two-column",
            Self::SidebarLeft => "sidebar-left",
            Self::TwoStacked => "two-stacked",
            Self::HeroSingle => "hero-single",
            Self::ThreeColumn => "three-column",
            Self::ThreeStacked => "three-stacked",
            Self::HeroTwoColumn => "hero-two-column",
            Self::TwoTopStacked => "two-top-stacked",
            Self::FourGrid => "four-grid",
            Self::SixGrid => "six-grid",
        }
    }

    /// Parse a wire name.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        LAYOUTS
            .iter()
            .map(|def| def.layout_type)
            .find(|t| t.as_str() == s)
            .ok_or_else(|| CoreError::NotFound {
                entity: "layout",
                id: s.to_string(),
            })
    }

    /// Catalog entry for this layout type.
    pub fn definition(self) -> &'static LayoutDefinition {
        // Every variant has exactly one catalog entry (see tests).
        LAYOUTS
            .iter()
            .find(|def| def.layout_type == self)
            .unwrap_or(&LAYOUTS[0])
    }
}

impl std::fmt::Display for LayoutType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Definitions
// ---------------------------------------------------------------------------

/// Size hint for a slot, used by the picker preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotSize {
    Small,
    Medium,
    Large,
    Full,
}

/// A named placement target within a layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotDefinition {
    pub id: &'static str,
    pub label: &'static str,
    pub size: SlotSize,
}

/// A layout template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDefinition {
    #[serde(rename = "type")]
    pub layout_type: LayoutType,
    pub name: &'static str,
    pub description: &'static str,
    /// Inclusive lower bound of the block-count window.
    pub min_blocks: usize,
    /// Inclusive upper bound of the block-count window.
    pub max_blocks: usize,
    pub slots: &'static [SlotDefinition],
}

impl LayoutDefinition {
    /// Whether a slot id belongs to this layout.
    pub fn has_slot(&self, slot_id: &str) -> bool {
        self.slots.iter().any(|s| s.id == slot_id)
    }

    /// Whether this layout is offered for the given block count.
    pub fn accepts(&self, block_count: usize) -> bool {
        (self.min_blocks..=self.max_blocks).contains(&block_count)
    }
}

const fn slot(id: &'static str, label: &'static str, size: SlotSize) -> SlotDefinition {
    SlotDefinition { id, label, size }
}

/// The layout catalog, in suggestion order.
pub static LAYOUTS: &[LayoutDefinition] = &[
    LayoutDefinition {
        layout_type: LayoutType::Single,
        name: "Single Column",
        description: "One full-width block",
        min_blocks: 1,
        max_blocks: 1,
        slots: &[slot("main", "Main", SlotSize::Full)],
    },
    LayoutDefinition {
        layout_type: LayoutType::TwoColumn,
        name: "Two Columns",
        description: "Two blocks side by side",
        min_blocks: 2,
        max_blocks: 2,
        slots: &[
            slot("left", "Left", SlotSize::Medium),
            slot("right", "Right", SlotSize::Medium),
        ],
    },
    LayoutDefinition {
        layout_type: LayoutType::SidebarLeft,
        name: "Sidebar Left",
        description: "A narrow sidebar next to a wide main column",
        min_blocks: 2,
        max_blocks: 2,
        slots: &[
            slot("sidebar", "Sidebar", SlotSize::Small),
            slot("main", "Main", SlotSize::Large),
        ],
    },
    LayoutDefinition {
        layout_type: LayoutType::TwoStacked,
        name: "Two Stacked",
        description: "Two full-width blocks, one above the other",
        min_blocks: 2,
        max_blocks: 2,
        slots: &[
            slot("top", "Top", SlotSize::Full),
            slot("bottom", "Bottom", SlotSize::Full),
        ],
    },
    LayoutDefinition {
        layout_type: LayoutType::HeroSingle,
        name: "Hero + Content",
        description: "A hero banner above one content block",
        min_blocks: 2,
        max_blocks: 2,
        slots: &[
            slot("hero", "Hero", SlotSize::Full),
            slot("main", "Content", SlotSize::Full),
        ],
    },
    LayoutDefinition {
        layout_type: LayoutType::ThreeColumn,
        name: "Three Columns",
        description: "Three blocks side by side",
        min_blocks: 3,
        max_blocks: 3,
        slots: &[
            slot("left", "Left", SlotSize::Small),
            slot("center", "Center", SlotSize::Small),
            slot("right", "Right", SlotSize::Small),
        ],
    },
    LayoutDefinition {
        layout_type: LayoutType::ThreeStacked,
        name: "Three Stacked",
        description: "Three full-width blocks stacked vertically",
        min_blocks: 3,
        max_blocks: 3,
        slots: &[
            slot("top", "Top", SlotSize::Full),
            slot("middle", "Middle", SlotSize::Full),
            slot("bottom", "Bottom", SlotSize::Full),
        ],
    },
    LayoutDefinition {
        layout_type: LayoutType::HeroTwoColumn,
        name: "Hero + Two Columns",
        description: "A hero banner above two side-by-side blocks",
        min_blocks: 3,
        max_blocks: 3,
        slots: &[
            slot("hero", "Hero", SlotSize::Full),
            slot("left", "Left", SlotSize::Medium),
            slot("right", "Right", SlotSize::Medium),
        ],
    },
    LayoutDefinition {
        layout_type: LayoutType::TwoTopStacked,
        name: "Two Top + Bottom",
        description: "Two side-by-side blocks above one full-width block",
        min_blocks: 3,
        max_blocks: 3,
        slots: &[
            slot("top-left", "Top Left", SlotSize::Medium),
            slot("top-right", "Top Right", SlotSize::Medium),
            slot("bottom", "Bottom", SlotSize::Full),
        ],
    },
    LayoutDefinition {
        layout_type: LayoutType::FourGrid,
        name: "Four Grid",
        description: "A two-by-two grid",
        min_blocks: 4,
        max_blocks: 4,
        slots: &[
            slot("top-left", "Top Left", SlotSize::Medium),
            slot("top-right", "Top Right", SlotSize::Medium),
            slot("bottom-left", "Bottom Left", SlotSize::Medium),
            slot("bottom-right", "Bottom Right", SlotSize::Medium),
        ],
    },
    LayoutDefinition {
        layout_type: LayoutType::SixGrid,
        name: "Six Grid",
        description: "A three-by-two grid; five blocks leave one cell open",
        min_blocks: 5,
        max_blocks: 6,
        slots: &[
            slot("top-left", "Top Left", SlotSize::Small),
            slot("top-center", "Top Center", SlotSize::Small),
            slot("top-right", "Top Right", SlotSize::Small),
            slot("bottom-left", "Bottom Left", SlotSize::Small),
            slot("bottom-center", "Bottom Center", SlotSize::Small),
            slot("bottom-right", "Bottom Right", SlotSize::Small),
        ],
    },
];

/// Largest `max_blocks` across the catalog.
pub const MAX_LAYOUT_BLOCKS: usize = 6;

// ---------------------------------------------------------------------------
// Suggestions
// ---------------------------------------------------------------------------

/// Layouts whose block-count window contains `block_count`, in catalog order.
///
/// Returns an empty list for 0 blocks or more blocks than any layout holds.
pub fn suggested_layouts(block_count: usize) -> Vec<&'static LayoutDefinition> {
    LAYOUTS.iter().filter(|def| def.accepts(block_count)).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
