use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::chart::{DifficultyContext, NoteEvent};
use crate::config::{cross_row, limits};

/// Why a chart cannot be rated.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum UnsupportedReason {
    #[error("key count {key_count} has no adjacency data")]
    KeyCount { key_count: u32 },

    #[error("overall difficulty is not finite")]
    NonFiniteOverallDifficulty,

    #[error("only {count} notes, at least {} required", limits::MIN_NOTE_COUNT)]
    TooFewNotes { count: usize },

    #[error("note in column {column} outside a {key_count}-key chart")]
    ColumnOutOfRange { column: usize, key_count: u32 },

    #[error("timeline of {length_ms} ms exceeds the supported length")]
    TimelineTooLong { length_ms: usize },
}

/// Outcome of projecting raw notes onto the rating model.
#[derive(Debug, Clone)]
pub enum Projection {
    /// No notes at all.
    Empty,
    Unsupported(UnsupportedReason),
    Ready(ProjectedChart),
}

/// Sorted read-only views over a chart's notes, shared by every stage.
#[derive(Debug, Clone)]
pub struct ProjectedChart {
    key_count: usize,
    hit_window: f64,
    timeline_len: usize,
    cross_weights: &'static [f64],
    /// All notes by (head, column).
    notes: Vec<NoteEvent>,
    /// Notes of each column by head.
    columns: Vec<Vec<NoteEvent>>,
    /// Holds by head.
    long_notes: Vec<NoteEvent>,
    /// Holds by tail.
    long_notes_by_tail: Vec<NoteEvent>,
}

/// Validate the input and build the derived sequences.
pub fn project(notes: &[NoteEvent], context: &DifficultyContext) -> Projection {
    let cross_weights = match cross_row(context.key_count).weights() {
        Some(weights) if context.has_supported_key_count() => weights,
        _ => {
            return Projection::Unsupported(UnsupportedReason::KeyCount {
                key_count: context.key_count,
            });
        }
    };

    if !context.overall_difficulty.is_finite() {
        return Projection::Unsupported(UnsupportedReason::NonFiniteOverallDifficulty);
    }

    if notes.is_empty() {
        return Projection::Empty;
    }

    let key_count = context.key_count as usize;
    if let Some(note) = notes.iter().find(|note| note.column() >= key_count) {
        return Projection::Unsupported(UnsupportedReason::ColumnOutOfRange {
            column: note.column(),
            key_count: context.key_count,
        });
    }

    if notes.len() < limits::MIN_NOTE_COUNT {
        return Projection::Unsupported(UnsupportedReason::TooFewNotes { count: notes.len() });
    }

    let rate = context.rate;
    let mut sorted: Vec<NoteEvent> = notes
        .iter()
        .map(|note| note.rescaled(|time| rate.scale_time(time)))
        .collect();
    sorted.sort_by_key(|note| (note.head(), note.column()));

    let timeline_len = sorted
        .iter()
        .map(|note| note.end() as usize)
        .max()
        .unwrap_or(0)
        + 1;
    if timeline_len > limits::MAX_TIMELINE_MS {
        return Projection::Unsupported(UnsupportedReason::TimelineTooLong {
            length_ms: timeline_len,
        });
    }

    let mut columns = vec![Vec::new(); key_count];
    for note in &sorted {
        columns[note.column()].push(*note);
    }

    let long_notes: Vec<NoteEvent> = sorted.iter().filter(|note| note.is_long()).copied().collect();
    let mut long_notes_by_tail = long_notes.clone();
    long_notes_by_tail.sort_by_key(|note| note.end());

    let hit_window = context.hit_window_scale();
    debug!(
        "Projected {}K chart: {} notes ({} holds), {} ms, x = {:.4}",
        key_count,
        sorted.len(),
        long_notes.len(),
        timeline_len,
        hit_window
    );

    Projection::Ready(ProjectedChart {
        key_count,
        hit_window,
        timeline_len,
        cross_weights,
        notes: sorted,
        columns,
        long_notes,
        long_notes_by_tail,
    })
}

impl ProjectedChart {
    pub fn key_count(&self) -> usize {
        self.key_count
    }

    /// Hit-window scale `x` in seconds.
    pub fn hit_window(&self) -> f64 {
        self.hit_window
    }

    /// Exclusive bound of every per-millisecond buffer.
    pub fn timeline_len(&self) -> usize {
        self.timeline_len
    }

    /// Adjacency weights, one per column boundary.
    pub fn cross_weights(&self) -> &'static [f64] {
        self.cross_weights
    }

    pub fn notes(&self) -> &[NoteEvent] {
        &self.notes
    }

    pub fn column(&self, column: usize) -> &[NoteEvent] {
        &self.columns[column]
    }

    pub fn long_notes(&self) -> &[NoteEvent] {
        &self.long_notes
    }

    pub fn long_notes_by_tail(&self) -> &[NoteEvent] {
        &self.long_notes_by_tail
    }

    pub fn note_count(&self) -> usize {
        self.notes.len()
    }

    pub fn long_note_count(&self) -> usize {
        self.long_notes.len()
    }

    /// Head times of all notes, ascending.
    pub fn head_times(&self) -> Vec<u32> {
        self.notes.iter().map(NoteEvent::head).collect()
    }
}
