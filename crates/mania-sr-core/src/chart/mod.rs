//! Chart input model.
//!
//! This module contains the types a rating request is built from:
//! - `NoteEvent` - a tap or hold in one column
//! - `DifficultyContext`, `RateModifier` - key count, OD and playback rate
//! - `ChartDocument` - serde form of a whole request
//! - `project` - validation and the sorted per-column / per-hold views

mod context;
mod document;
mod note;
mod projection;

pub use context::*;
pub use document::*;
pub use note::*;
pub use projection::*;
