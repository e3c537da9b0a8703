//! `emailkit-core` -- document model and placement engine for the email
//! template builder.
//!
//! Every editing operation is a pure function from one [`EmailStructure`]
//! value to the next. The [`editor`] module wraps those functions in a
//! single-owner session that fires one change notification per action.
//!
//! [`EmailStructure`]: structure::EmailStructure

pub mod catalog;
pub mod content_block;
pub mod divider;
pub mod editor;
pub mod error;
pub mod layout;
pub mod palette;
pub mod rows;
pub mod structure;
pub mod types;
pub mod variables;
pub mod wizard;

mod lenient;
