//! The email structure aggregate: content blocks, layout and palette.
//!
//! [`EmailStructure`] is the document exchanged with the persistence layer.
//! Every editing operation returns a new structure built through the single
//! merge point [`EmailStructure::update_structure`].

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::catalog::LayoutType;
use crate::content_block::{BlockType, ContentBlock};
use crate::error::CoreError;
use crate::layout::{select_layout, EmailLayout, MAX_SLOT_WIDTH, MIN_SLOT_WIDTH};
use crate::palette::ColorSwatch;
use crate::types::new_id;

// ---------------------------------------------------------------------------
// Aggregate
// ---------------------------------------------------------------------------

/// The persisted email document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailStructure {
    /// Blocks in arrangement order.
    #[serde(default, deserialize_with = "crate::lenient::list")]
    pub content_blocks: Vec<ContentBlock>,
    #[serde(
        default,
        deserialize_with = "crate::lenient::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub layout: Option<EmailLayout>,
    #[serde(
        default,
        deserialize_with = "crate::lenient::option_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub color_palette: Option<Vec<ColorSwatch>>,
}

/// A partial update. `None` fields leave the current value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructurePatch {
    pub content_blocks: Option<Vec<ContentBlock>>,
    pub layout: Option<Option<EmailLayout>>,
    pub color_palette: Option<Option<Vec<ColorSwatch>>>,
}

impl StructurePatch {
    pub fn blocks(content_blocks: Vec<ContentBlock>) -> Self {
        Self {
            content_blocks: Some(content_blocks),
            ..Self::default()
        }
    }

    pub fn layout(layout: Option<EmailLayout>) -> Self {
        Self {
            layout: Some(layout),
            ..Self::default()
        }
    }

    pub fn palette(color_palette: Option<Vec<ColorSwatch>>) -> Self {
        Self {
            color_palette: Some(color_palette),
            ..Self::default()
        }
    }

    pub fn with_layout(self, layout: Option<EmailLayout>) -> Self {
        Self {
            layout: Some(layout),
            ..self
        }
    }
}

/// Create a block with a fresh id; defaults to a text block.
pub fn create_block(block_type: Option<BlockType>) -> ContentBlock {
    ContentBlock::new(block_type.unwrap_or_default())
}

impl EmailStructure {
    /// Merge a partial update into this structure.
    pub fn update_structure(&self, patch: StructurePatch) -> Self {
        Self {
            content_blocks: patch
                .content_blocks
                .unwrap_or_else(|| self.content_blocks.clone()),
            layout: patch.layout.unwrap_or_else(|| self.layout.clone()),
            color_palette: patch
                .color_palette
                .unwrap_or_else(|| self.color_palette.clone()),
        }
    }

    // -- Lookups --

    pub fn block(&self, block_id: &str) -> Option<&ContentBlock> {
        self.content_blocks.iter().find(|b| b.id == block_id)
    }

    /// Block placed in a slot. Unassigned slots and ids that no longer
    /// resolve both yield `None`.
    pub fn resolve_slot(&self, slot_id: &str) -> Option<&ContentBlock> {
        let block_id = self.layout.as_ref()?.block_in(slot_id)?;
        self.block(block_id)
    }

    /// Blocks not placed in any slot of the current layout.
    pub fn unassigned_blocks(&self) -> Vec<&ContentBlock> {
        let placed: HashSet<&str> = self
            .layout
            .iter()
            .flat_map(|l| l.slots.values().map(String::as_str))
            .collect();
        self.content_blocks
            .iter()
            .filter(|b| !placed.contains(b.id.as_str()))
            .collect()
    }

    // -- Block store --

    /// Append a block.
    pub fn add_block(&self, block: ContentBlock) -> Self {
        tracing::debug!(block_id = %block.id, block_type = %block.block_type, "Block added");
        let mut blocks = self.content_blocks.clone();
        blocks.push(block);
        self.update_structure(StructurePatch::blocks(blocks))
    }

    /// Replace the block with the same id. Unknown ids are ignored.
    pub fn update_block(&self, block: ContentBlock) -> Self {
        let Some(index) = self.content_blocks.iter().position(|b| b.id == block.id) else {
            tracing::warn!(block_id = %block.id, "Ignoring update for unknown block");
            return self.clone();
        };
        let mut blocks = self.content_blocks.clone();
        blocks[index] = block;
        self.update_structure(StructurePatch::blocks(blocks))
    }

    /// Insert a copy of a block, under a fresh id, right after the source.
    pub fn duplicate_block(&self, block_id: &str) -> Self {
        let Some(index) = self.content_blocks.iter().position(|b| b.id == block_id) else {
            tracing::warn!(block_id, "Ignoring duplicate of unknown block");
            return self.clone();
        };
        let copy = self.content_blocks[index].duplicate();
        tracing::debug!(source = block_id, block_id = %copy.id, "Block duplicated");
        let mut blocks = self.content_blocks.clone();
        blocks.insert(index + 1, copy);
        self.update_structure(StructurePatch::blocks(blocks))
    }

    /// Remove a block and every slot assignment that referenced it.
    pub fn delete_block(&self, block_id: &str) -> Self {
        let blocks: Vec<ContentBlock> = self
            .content_blocks
            .iter()
            .filter(|b| b.id != block_id)
            .cloned()
            .collect();
        let layout = self.layout.as_ref().map(|l| l.without_block(block_id));
        tracing::debug!(block_id, "Block deleted");
        self.update_structure(StructurePatch::blocks(blocks).with_layout(layout))
    }

    /// Reorder blocks to follow `order`.
    ///
    /// Unknown and repeated ids in `order` are skipped; blocks missing from
    /// `order` keep their relative order after the listed ones.
    pub fn reorder_blocks<S: AsRef<str>>(&self, order: &[S]) -> Self {
        let mut remaining: Vec<Option<ContentBlock>> =
            self.content_blocks.iter().cloned().map(Some).collect();
        let mut blocks = Vec::with_capacity(remaining.len());

        for id in order {
            let id = id.as_ref();
            if let Some(slot) = remaining
                .iter_mut()
                .find(|b| b.as_ref().is_some_and(|b| b.id == id))
            {
                blocks.extend(slot.take());
            }
        }
        blocks.extend(remaining.into_iter().flatten());
        self.update_structure(StructurePatch::blocks(blocks))
    }

    // -- Layout --

    /// Replace the layout with a fresh instance of `layout_type`.
    pub fn select_layout(&self, layout_type: LayoutType) -> Self {
        self.update_structure(StructurePatch::layout(Some(select_layout(layout_type))))
    }

    /// Apply a layout operation. No-op while no layout is selected.
    pub fn update_layout(&self, op: impl FnOnce(&EmailLayout) -> EmailLayout) -> Self {
        match &self.layout {
            Some(layout) => self.update_structure(StructurePatch::layout(Some(op(layout)))),
            None => {
                tracing::warn!("Ignoring layout edit before a layout is selected");
                self.clone()
            }
        }
    }

    // -- Palette --

    /// Apply a palette operation; an absent palette reads as empty.
    pub fn update_palette(&self, op: impl FnOnce(&[ColorSwatch]) -> Vec<ColorSwatch>) -> Self {
        let current = self.color_palette.as_deref().unwrap_or_default();
        self.update_structure(StructurePatch::palette(Some(op(current))))
    }

    // -- Persistence --

    /// Decode a stored document.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        Self::from_value(serde_json::from_str(json)?)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self, CoreError> {
        if !value.is_object() {
            return Err(CoreError::Validation(
                "Email structure must be a JSON object".to_string(),
            ));
        }
        Ok(serde_json::from_value(value)?)
    }

    pub fn to_json(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_value(&self) -> Result<serde_json::Value, CoreError> {
        Ok(serde_json::to_value(self)?)
    }

    // -- Cleanup and audit --

    /// Defensive cleanup for documents loaded from storage: repeated block
    /// ids get fresh ids, the layout is normalized and slot entries that do
    /// not resolve to a block are dropped.
    pub fn normalized(&self) -> Self {
        let mut seen = HashSet::new();
        let blocks: Vec<ContentBlock> = self
            .content_blocks
            .iter()
            .map(|b| {
                if seen.insert(b.id.clone()) {
                    b.clone()
                } else {
                    let fresh = ContentBlock {
                        id: new_id(),
                        ..b.clone()
                    };
                    tracing::warn!(old = %b.id, new = %fresh.id, "Reassigned repeated block id");
                    fresh
                }
            })
            .collect();

        let layout = self.layout.as_ref().map(|l| {
            let mut clean = l.normalized();
            clean.slots.retain(|_, id| seen.contains(id.as_str()));
            clean
        });

        self.update_structure(StructurePatch::blocks(blocks).with_layout(layout))
    }

    /// Report structural problems without changing anything.
    pub fn audit(&self) -> AuditReport {
        let mut issues = Vec::new();

        let mut seen = HashSet::new();
        for block in &self.content_blocks {
            if !seen.insert(block.id.as_str()) {
                issues.push(Issue::error(
                    "duplicate_block_id",
                    format!("Block id '{}' is used more than once", block.id),
                ));
            }
        }

        if let Some(layout) = &self.layout {
            let def = layout.definition();
            for (slot, block_id) in &layout.slots {
                if !def.has_slot(slot) {
                    issues.push(Issue::error(
                        "stale_slot",
                        format!("Slot '{slot}' is not part of layout '{}'", def.layout_type),
                    ));
                }
                if !seen.contains(block_id.as_str()) {
                    issues.push(Issue::error(
                        "dangling_reference",
                        format!("Slot '{slot}' references missing block '{block_id}'"),
                    ));
                }
            }
            for (slot, width) in &layout.slot_widths {
                if !(MIN_SLOT_WIDTH..=MAX_SLOT_WIDTH).contains(width) {
                    issues.push(Issue::error(
                        "width_range",
                        format!(
                            "Slot '{slot}' width {width} is outside {MIN_SLOT_WIDTH}-{MAX_SLOT_WIDTH}"
                        ),
                    ));
                }
            }
            for slot in def.slots {
                if !layout.slots.contains_key(slot.id) {
                    issues.push(Issue::warning(
                        "empty_slot",
                        format!("Slot '{}' has no block", slot.id),
                    ));
                }
            }
            if !def.accepts(self.content_blocks.len()) {
                issues.push(Issue::warning(
                    "block_count",
                    format!(
                        "Layout '{}' is meant for {}-{} blocks, structure has {}",
                        def.layout_type,
                        def.min_blocks,
                        def.max_blocks,
                        self.content_blocks.len()
                    ),
                ));
            }
            for block in self.unassigned_blocks() {
                issues.push(Issue::warning(
                    "unplaced_block",
                    format!("Block '{}' is not placed in any slot", block.display_name()),
                ));
            }
        }

        AuditReport::from_issues(issues)
    }
}

// ---------------------------------------------------------------------------
// Audit report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// A single structural finding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Issue {
    pub severity: Severity,
    pub category: &'static str,
    pub message: String,
}

impl Issue {
    fn error(category: &'static str, message: String) -> Self {
        Self {
            severity: Severity::Error,
            category,
            message,
        }
    }

    fn warning(category: &'static str, message: String) -> Self {
        Self {
            severity: Severity::Warning,
            category,
            message,
        }
    }
}

/// Audit findings split by severity. `passed` is true when there are no
/// errors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditReport {
    pub passed: bool,
    pub errors: Vec<Issue>,
    pub warnings: Vec<Issue>,
}

impl AuditReport {
    pub fn from_issues(issues: Vec<Issue>) -> Self {
        let (errors, warnings): (Vec<_>, Vec<_>) = issues
            .into_iter()
            .partition(|i| i.severity == Severity::Error);
        Self {
            passed: errors.is_empty(),
            errors,
            warnings,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
