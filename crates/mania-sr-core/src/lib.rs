pub mod chart;
pub mod config;
pub mod engine;
pub mod error;
pub mod signal;
pub mod stage;

#[cfg(test)]
mod test_utils;

pub use chart::{
    ChartDocument, DifficultyContext, NoteEvent, ProjectedChart, Projection, RateModifier,
    UnsupportedReason, project,
};
pub use config::{CrossRow, EngineConfig, cross_row};
pub use engine::{
    RatingOutcome, RatingResult, StageTimings, rate, rate_batch, rate_document, rate_with_config,
};
pub use error::{Error, Result};
pub use signal::Signal;
pub use stage::Stage;
