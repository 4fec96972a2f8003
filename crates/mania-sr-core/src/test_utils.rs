//! Chart builders shared by unit tests.

use crate::chart::{DifficultyContext, NoteEvent, Projection, ProjectedChart, project};

pub(crate) const TEST_OD: f64 = 8.0;

/// Project `notes` on a `key_count`-key chart at OD 8, panicking if the
/// chart is rejected.
pub(crate) fn projected(notes: &[NoteEvent], key_count: u32) -> ProjectedChart {
    match project(notes, &DifficultyContext::new(key_count, TEST_OD)) {
        Projection::Ready(chart) => chart,
        other => panic!("chart was not projected: {:?}", other),
    }
}

/// `count` taps in one column, `spacing` ms apart, starting at `start`.
pub(crate) fn jack(column: usize, count: u32, spacing: u32, start: u32) -> Vec<NoteEvent> {
    (0..count)
        .map(|i| NoteEvent::tap(column, start + i * spacing))
        .collect()
}

/// `count` taps cycling through `columns`, `spacing` ms apart.
pub(crate) fn round_robin(columns: usize, count: u32, spacing: u32) -> Vec<NoteEvent> {
    (0..count)
        .map(|i| NoteEvent::tap(i as usize % columns, i * spacing))
        .collect()
}
