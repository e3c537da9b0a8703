//! User-placed divider lines between rows or columns.
//!
//! Adding or editing a divider goes through a [`DividerDraft`]: the draft
//! is configured and then either confirmed into the layout or dropped.
//! Dropping a draft has no effect on the layout.

use serde::{Deserialize, Serialize};

use crate::layout::EmailLayout;
use crate::types::{new_id, DividerId};

/// Default divider color.
pub const DEFAULT_DIVIDER_COLOR: &str = "#000000";

/// Default divider thickness in pixels.
pub const DEFAULT_DIVIDER_THICKNESS_PX: u32 = 1;

/// Default space above and below a divider in pixels.
pub const DEFAULT_DIVIDER_MARGIN_PX: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DividerStyle {
    pub color: String,
    /// Line thickness in pixels.
    pub height: u32,
    pub margin_top: u32,
    pub margin_bottom: u32,
}

impl Default for DividerStyle {
    fn default() -> Self {
        Self {
            color: DEFAULT_DIVIDER_COLOR.to_string(),
            height: DEFAULT_DIVIDER_THICKNESS_PX,
            margin_top: DEFAULT_DIVIDER_MARGIN_PX,
            margin_bottom: DEFAULT_DIVIDER_MARGIN_PX,
        }
    }
}

/// A confirmed divider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Divider {
    pub id: DividerId,
    pub orientation: Orientation,
    /// Index of the row (horizontal) or column (vertical) it follows.
    pub position: usize,
    /// Number of cells the line covers.
    pub span: usize,
    #[serde(default, deserialize_with = "crate::lenient::or_default")]
    pub style: DividerStyle,
}

impl Divider {
    /// Copy with the span bounded to `1..=max_span`.
    pub fn clamped_to(&self, max_span: usize) -> Self {
        Self {
            span: clamp_span(self.span, max_span),
            ..self.clone()
        }
    }
}

fn clamp_span(span: usize, max_span: usize) -> usize {
    span.clamp(1, max_span.max(1))
}

/// A divider being configured, not yet part of the layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DividerDraft {
    /// Set when the draft edits an existing divider.
    editing: Option<DividerId>,
    pub orientation: Orientation,
    pub position: usize,
    pub span: usize,
    pub max_span: usize,
    pub style: DividerStyle,
}

impl DividerDraft {
    /// Start a new divider spanning the full row or column.
    pub fn add(orientation: Orientation, position: usize, max_span: usize) -> Self {
        Self {
            editing: None,
            orientation,
            position,
            span: max_span,
            max_span,
            style: DividerStyle::default(),
        }
    }

    /// Reopen an existing divider, pre-filled from its stored values.
    pub fn edit(divider: &Divider, max_span: usize) -> Self {
        Self {
            editing: Some(divider.id.clone()),
            orientation: divider.orientation,
            position: divider.position,
            span: divider.span,
            max_span,
            style: divider.style.clone(),
        }
    }

    pub fn with_span(self, span: usize) -> Self {
        Self { span, ..self }
    }

    pub fn with_style(self, style: DividerStyle) -> Self {
        Self { style, ..self }
    }

    /// Id of the divider being edited, if any.
    pub fn editing(&self) -> Option<&str> {
        self.editing.as_deref()
    }
}

impl EmailLayout {
    /// Commit a draft. An edit replaces the divider with the same id in
    /// place; a new draft (or an edit whose divider has since been removed)
    /// is appended. The span is clamped to the draft's `max_span`.
    pub fn confirm_divider(&self, draft: DividerDraft) -> Self {
        let span = clamp_span(draft.span, draft.max_span);
        if span != draft.span {
            tracing::debug!(requested = draft.span, span, "Divider span clamped");
        }

        let mut next = self.clone();
        let existing = draft
            .editing
            .as_deref()
            .and_then(|id| next.dividers.iter().position(|d| d.id == id));

        let divider = Divider {
            id: draft.editing.unwrap_or_else(new_id),
            orientation: draft.orientation,
            position: draft.position,
            span,
            style: draft.style,
        };

        match existing {
            Some(index) => next.dividers[index] = divider,
            None => next.dividers.push(divider),
        }
        next
    }

    /// Remove a divider by id.
    pub fn remove_divider(&self, divider_id: &str) -> Self {
        let mut next = self.clone();
        next.dividers.retain(|d| d.id != divider_id);
        next
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
