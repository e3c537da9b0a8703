//! Authoring flow steps and gating.
//!
//! The builder walks through three steps. A step is reachable once the
//! structure holds what the step works on; steps can be revisited freely
//! and going back never clears later steps' state.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::structure::EmailStructure;

/// Minimum step number (1-based).
pub const MIN_STEP: u8 = 1;

/// Maximum step number (1-based).
pub const MAX_STEP: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuilderStep {
    CreateBlocks,
    ChooseLayout,
    ArrangeBlocks,
}

impl BuilderStep {
    /// Convert a 1-based step number to a `BuilderStep`.
    pub fn from_number(n: u8) -> Result<Self, CoreError> {
        match n {
            1 => Ok(Self::CreateBlocks),
            2 => Ok(Self::ChooseLayout),
            3 => Ok(Self::ArrangeBlocks),
            _ => Err(CoreError::Validation(format!(
                "Invalid step number {n}. Must be between {MIN_STEP} and {MAX_STEP}"
            ))),
        }
    }

    /// Convert to a 1-based step number.
    pub fn to_number(self) -> u8 {
        match self {
            Self::CreateBlocks => 1,
            Self::ChooseLayout => 2,
            Self::ArrangeBlocks => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::CreateBlocks => "Create Blocks",
            Self::ChooseLayout => "Choose Layout",
            Self::ArrangeBlocks => "Arrange Blocks",
        }
    }
}

/// Whether `step` can be opened for the given structure.
pub fn can_enter_step(step: BuilderStep, structure: &EmailStructure) -> bool {
    validate_step_entry(step, structure).is_ok()
}

/// Check the precondition of a step.
///
/// - Create Blocks is always reachable.
/// - Choose Layout needs at least one content block.
/// - Arrange Blocks needs a selected layout.
pub fn validate_step_entry(step: BuilderStep, structure: &EmailStructure) -> Result<(), CoreError> {
    match step {
        BuilderStep::CreateBlocks => Ok(()),
        BuilderStep::ChooseLayout if structure.content_blocks.is_empty() => {
            Err(CoreError::Validation(
                "Step 2 (Choose Layout) requires at least one content block".to_string(),
            ))
        }
        BuilderStep::ArrangeBlocks if structure.layout.is_none() => Err(CoreError::Validation(
            "Step 3 (Arrange Blocks) requires a selected layout".to_string(),
        )),
        BuilderStep::ChooseLayout | BuilderStep::ArrangeBlocks => Ok(()),
    }
}

/// Furthest step the structure currently allows.
pub fn furthest_step(structure: &EmailStructure) -> BuilderStep {
    [BuilderStep::ArrangeBlocks, BuilderStep::ChooseLayout]
        .into_iter()
        .find(|step| can_enter_step(*step, structure))
        .unwrap_or(BuilderStep::CreateBlocks)
}
