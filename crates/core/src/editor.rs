//! Single-owner editing session over an [`EmailStructure`].
//!
//! The session owns the current structure and a change callback. Each
//! [`EditAction`] is applied through the structure's pure operations and
//! produces exactly one synchronous notification carrying the new value.
//! Divider configuration is held as a pending draft outside the structure
//! until it is confirmed.

use crate::catalog::LayoutType;
use crate::content_block::{BlockType, ContentBlock};
use crate::divider::{DividerDraft, Orientation};
use crate::error::CoreError;
use crate::layout::Padding;
use crate::palette::{self, ColorSwatch};
use crate::structure::{create_block, EmailStructure};
use crate::types::{BlockId, DividerId, Percent, SlotId, SwatchId};
use crate::variables::{insert_variable_into, TextField};
use crate::wizard::{validate_step_entry, BuilderStep};

/// A user gesture that changes the structure.
#[derive(Debug, Clone, PartialEq)]
pub enum EditAction {
    AddBlock(Option<BlockType>),
    UpdateBlock(ContentBlock),
    DuplicateBlock(BlockId),
    DeleteBlock(BlockId),
    ReorderBlocks(Vec<BlockId>),
    InsertVariable {
        block_id: BlockId,
        field: TextField,
        cursor: usize,
        path: String,
    },
    SelectLayout(LayoutType),
    AssignBlock {
        slot_id: SlotId,
        block_id: BlockId,
    },
    ClearSlot(SlotId),
    SetSlotWidth {
        slot_id: SlotId,
        percent: Percent,
    },
    ClearSlotWidth(SlotId),
    MoveSpacerLeft {
        row: usize,
    },
    MoveSpacerRight {
        row: usize,
        max_position: usize,
    },
    SetPadding(Padding),
    SetBackground {
        color: Option<String>,
        image: Option<String>,
    },
    ConfirmDivider(DividerDraft),
    RemoveDivider(DividerId),
    AddSwatch(ColorSwatch),
    UpdateSwatch(ColorSwatch),
    RemoveSwatch(SwatchId),
}

impl EditAction {
    /// Apply the action to a structure.
    pub fn apply(self, structure: &EmailStructure) -> EmailStructure {
        match self {
            Self::AddBlock(block_type) => structure.add_block(create_block(block_type)),
            Self::UpdateBlock(block) => structure.update_block(block),
            Self::DuplicateBlock(id) => structure.duplicate_block(&id),
            Self::DeleteBlock(id) => structure.delete_block(&id),
            Self::ReorderBlocks(order) => structure.reorder_blocks(&order),
            Self::InsertVariable {
                block_id,
                field,
                cursor,
                path,
            } => match structure.block(&block_id) {
                Some(block) => {
                    structure.update_block(insert_variable_into(block, field, cursor, &path))
                }
                None => {
                    tracing::warn!(block_id = %block_id, "Ignoring variable insert for unknown block");
                    structure.clone()
                }
            },
            Self::SelectLayout(layout_type) => structure.select_layout(layout_type),
            Self::AssignBlock { slot_id, block_id } => {
                structure.update_layout(|l| l.assign_block(&slot_id, &block_id))
            }
            Self::ClearSlot(slot_id) => structure.update_layout(|l| l.clear_slot(&slot_id)),
            Self::SetSlotWidth { slot_id, percent } => {
                structure.update_layout(|l| l.set_slot_width(&slot_id, percent))
            }
            Self::ClearSlotWidth(slot_id) => {
                structure.update_layout(|l| l.clear_slot_width(&slot_id))
            }
            Self::MoveSpacerLeft { row } => structure.update_layout(|l| l.move_spacer_left(row)),
            Self::MoveSpacerRight { row, max_position } => {
                structure.update_layout(|l| l.move_spacer_right(row, max_position))
            }
            Self::SetPadding(padding) => structure.update_layout(|l| l.with_padding(padding)),
            Self::SetBackground { color, image } => {
                structure.update_layout(|l| l.with_background(color, image))
            }
            Self::ConfirmDivider(draft) => structure.update_layout(|l| l.confirm_divider(draft)),
            Self::RemoveDivider(id) => structure.update_layout(|l| l.remove_divider(&id)),
            Self::AddSwatch(swatch) => structure.update_palette(|p| palette::add_swatch(p, swatch)),
            Self::UpdateSwatch(swatch) => {
                structure.update_palette(|p| palette::update_swatch(p, swatch))
            }
            Self::RemoveSwatch(id) => structure.update_palette(|p| palette::remove_swatch(p, &id)),
        }
    }
}

/// Callback invoked with the new structure after every action.
pub type ChangeListener = Box<dyn FnMut(&EmailStructure)>;

/// An editing session for one email structure.
pub struct EmailEditor {
    structure: EmailStructure,
    step: BuilderStep,
    pending_divider: Option<DividerDraft>,
    on_change: ChangeListener,
}

impl EmailEditor {
    pub fn new(structure: EmailStructure, on_change: impl FnMut(&EmailStructure) + 'static) -> Self {
        Self {
            structure,
            step: BuilderStep::CreateBlocks,
            pending_divider: None,
            on_change: Box::new(on_change),
        }
    }

    pub fn structure(&self) -> &EmailStructure {
        &self.structure
    }

    pub fn into_structure(self) -> EmailStructure {
        self.structure
    }

    /// Apply one action and notify the listener once.
    pub fn dispatch(&mut self, action: EditAction) -> &EmailStructure {
        self.structure = action.apply(&self.structure);
        (self.on_change)(&self.structure);
        &self.structure
    }

    // -- Steps --

    pub fn step(&self) -> BuilderStep {
        self.step
    }

    /// Open a step if the structure allows it.
    pub fn go_to_step(&mut self, step: BuilderStep) -> Result<(), CoreError> {
        validate_step_entry(step, &self.structure)?;
        self.step = step;
        Ok(())
    }

    // -- Divider drafts --

    pub fn pending_divider(&self) -> Option<&DividerDraft> {
        self.pending_divider.as_ref()
    }

    /// Start configuring a new divider. Replaces any unconfirmed draft.
    pub fn begin_divider(&mut self, orientation: Orientation, position: usize, max_span: usize) {
        self.pending_divider = Some(DividerDraft::add(orientation, position, max_span));
    }

    /// Start editing an existing divider. Unknown ids leave the session
    /// without a draft.
    pub fn begin_divider_edit(&mut self, divider_id: &str, max_span: usize) {
        self.pending_divider = self
            .structure
            .layout
            .as_ref()
            .and_then(|l| l.dividers.iter().find(|d| d.id == divider_id))
            .map(|d| DividerDraft::edit(d, max_span));
        if self.pending_divider.is_none() {
            tracing::warn!(divider_id, "Ignoring edit of unknown divider");
        }
    }

    /// Adjust the pending draft. No-op without a draft.
    pub fn update_pending_divider(&mut self, op: impl FnOnce(DividerDraft) -> DividerDraft) {
        self.pending_divider = self.pending_divider.take().map(op);
    }

    /// Commit the pending draft. Returns `false` if there was none.
    pub fn confirm_divider(&mut self) -> bool {
        match self.pending_divider.take() {
            Some(draft) => {
                self.dispatch(EditAction::ConfirmDivider(draft));
                true
            }
            None => false,
        }
    }

    /// Discard the pending draft without touching the structure.
    pub fn cancel_divider(&mut self) {
        self.pending_divider = None;
    }
}

impl std::fmt::Debug for EmailEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailEditor")
            .field("structure", &self.structure)
            .field("step", &self.step)
            .field("pending_divider", &self.pending_divider)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn counting_editor() -> (EmailEditor, Rc<RefCell<Vec<EmailStructure>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let editor = EmailEditor::new(EmailStructure::default(), move |s| {
            sink.borrow_mut().push(s.clone())
        });
        (editor, seen)
    }

    #[test]
    fn one_notification_per_action() {
        let (mut editor, seen) = counting_editor();
        editor.dispatch(EditAction::AddBlock(Some(BlockType::Text)));
        editor.dispatch(EditAction::AddBlock(None));
        editor.dispatch(EditAction::SelectLayout(LayoutType::TwoColumn));
        assert_eq!(seen.borrow().len(), 3);
        assert_eq!(seen.borrow()[2], *editor.structure());
    }

    #[test]
    fn no_op_actions_still_notify_once() {
        let (mut editor, seen) = counting_editor();
        editor.dispatch(EditAction::ClearSlot("left".into()));
        assert_eq!(seen.borrow().len(), 1);
        assert_eq!(*editor.structure(), EmailStructure::default());
    }

    #[test]
    fn step_gating() {
        let (mut editor, _) = counting_editor();
        assert!(editor.go_to_step(BuilderStep::ChooseLayout).is_err());
        editor.dispatch(EditAction::AddBlock(None));
        editor.go_to_step(BuilderStep::ChooseLayout).unwrap();
        assert!(editor.go_to_step(BuilderStep::ArrangeBlocks).is_err());
        editor.dispatch(EditAction::SelectLayout(LayoutType::Single));
        editor.go_to_step(BuilderStep::ArrangeBlocks).unwrap();
        editor.go_to_step(BuilderStep::CreateBlocks).unwrap();
        assert!(editor.structure().layout.is_some());
    }

    #[test]
    fn divider_draft_lifecycle() {
        let (mut editor, seen) = counting_editor();
        editor.dispatch(EditAction::SelectLayout(LayoutType::FourGrid));

        editor.begin_divider(Orientation::Horizontal, 1, 2);
        editor.cancel_divider();
        assert!(editor.pending_divider().is_none());
        assert!(!editor.confirm_divider());
        assert_eq!(seen.borrow().len(), 1);

        editor.begin_divider(Orientation::Horizontal, 1, 2);
        editor.update_pending_divider(|d| d.with_span(5));
        assert!(editor.confirm_divider());
        assert_eq!(seen.borrow().len(), 2);
        let layout = editor.structure().layout.clone().unwrap();
        assert_eq!(layout.dividers.len(), 1);
        assert!(layout.dividers[0].span <= 2);

        let id = layout.dividers[0].id.clone();
        editor.begin_divider_edit(&id, 2);
        editor.update_pending_divider(|d| d.with_span(1));
        editor.confirm_divider();
        let layout = editor.structure().layout.clone().unwrap();
        assert_eq!(layout.dividers.len(), 1);
        assert_eq!(layout.dividers[0].span, 1);
    }

    #[test]
    fn edit_unknown_divider_leaves_no_draft() {
        let (mut editor, _) = counting_editor();
        editor.dispatch(EditAction::SelectLayout(LayoutType::FourGrid));
        editor.begin_divider_edit("nope", 2);
        assert!(editor.pending_divider().is_none());
    }

    #[test]
    fn insert_variable_action() {
        let (mut editor, _) = counting_editor();
        editor.dispatch(EditAction::AddBlock(Some(BlockType::Button)));
        let id = editor.structure().content_blocks[0].id.clone();
        editor.dispatch(EditAction::InsertVariable {
            block_id: id,
            field: TextField::ButtonUrl,
            cursor: 0,
            path: "booking.url".into(),
        });
        assert_eq!(
            editor.structure().content_blocks[0].button_url.as_deref(),
            Some("{{ booking.url }}")
        );
    }

    #[test]
    fn palette_actions() {
        let (mut editor, _) = counting_editor();
        let swatch = ColorSwatch::new("Brand", "#6b21a8");
        let id = swatch.id.clone();
        editor.dispatch(EditAction::AddSwatch(swatch));
        editor.dispatch(EditAction::UpdateSwatch(ColorSwatch {
            id: id.clone(),
            label: "Accent".into(),
            color: "#f59e0b".into(),
        }));
        assert_eq!(editor.structure().color_palette.as_ref().unwrap()[0].label, "Accent");
        editor.dispatch(EditAction::RemoveSwatch(id));
        assert!(editor.structure().color_palette.as_ref().unwrap().is_empty());
    }
}
