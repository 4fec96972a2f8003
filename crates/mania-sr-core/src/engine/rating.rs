use std::collections::BTreeMap;
use std::time::Duration;

use serde::Serialize;

use crate::chart::{NoteEvent, ProjectedChart, UnsupportedReason};
use crate::config::limits;

/// Elapsed time per stage, keyed by stage name.
pub type StageTimings = BTreeMap<&'static str, Duration>;

/// Why a rating has the value it has.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RatingOutcome {
    Rated,
    /// The chart has no notes.
    Empty,
    Unsupported(UnsupportedReason),
    /// An internal fault was caught and turned into the unsupported sentinel.
    Fault { message: String },
}

/// Result of one rating call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingResult {
    /// Star rating, `-1` for unsupported input or a fault, `0` for an empty chart.
    pub rating: f64,
    pub outcome: RatingOutcome,
    pub note_count: usize,
    pub long_note_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage_timings: Option<StageTimings>,
}

impl RatingResult {
    pub(crate) fn rated(rating: f64, chart: &ProjectedChart) -> Self {
        Self {
            rating,
            outcome: RatingOutcome::Rated,
            note_count: chart.note_count(),
            long_note_count: chart.long_note_count(),
            stage_timings: None,
        }
    }

    pub(crate) fn empty() -> Self {
        Self {
            rating: limits::EMPTY_RATING,
            outcome: RatingOutcome::Empty,
            note_count: 0,
            long_note_count: 0,
            stage_timings: None,
        }
    }

    pub(crate) fn unsupported(reason: UnsupportedReason, notes: &[NoteEvent]) -> Self {
        Self::sentinel(RatingOutcome::Unsupported(reason), notes)
    }

    pub(crate) fn fault(message: String, notes: &[NoteEvent]) -> Self {
        Self::sentinel(RatingOutcome::Fault { message }, notes)
    }

    pub(crate) fn with_timings(mut self, timings: Option<StageTimings>) -> Self {
        self.stage_timings = timings;
        self
    }

    fn sentinel(outcome: RatingOutcome, notes: &[NoteEvent]) -> Self {
        Self {
            rating: limits::UNSUPPORTED_RATING,
            outcome,
            note_count: notes.len(),
            long_note_count: notes.iter().filter(|note| note.is_long()).count(),
            stage_timings: None,
        }
    }

    pub fn is_rated(&self) -> bool {
        matches!(self.outcome, RatingOutcome::Rated)
    }

    /// The rating, or `None` when it is a sentinel.
    pub fn value(&self) -> Option<f64> {
        self.is_rated().then_some(self.rating)
    }
}
