/// Content block identifiers are opaque strings (UUIDv4 for new blocks).
pub type BlockId = String;

/// Slot identifiers come from the layout catalog (`"hero"`, `"left"`, ...).
pub type SlotId = String;

/// Divider identifiers are opaque strings.
pub type DividerId = String;

/// Palette swatch identifiers are opaque strings.
pub type SwatchId = String;

/// Width share of a row, in percent (0-100).
pub type Percent = f64;

/// Generate a fresh opaque identifier.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
