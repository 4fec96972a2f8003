use crate::chart::{NoteEvent, ProjectedChart};
use crate::config::{tuning, window};
use crate::signal::Signal;

/// Ideal hold length, and ideal gap between a release and the next head.
const RELEASE_LEAD_MS: i64 = 80;

/// Smoothed release stress, walking holds in tail order.
pub fn compute(chart: &ProjectedChart) -> Signal {
    let len = chart.timeline_len();
    let x = chart.hit_window();
    let holds = chart.long_notes_by_tail();

    let inconsistency: Vec<f64> = holds
        .iter()
        .map(|hold| release_inconsistency(hold, chart.column(hold.column()), x))
        .collect();

    let mut step = Signal::zeros(len);
    for (i, pair) in holds.windows(2).enumerate() {
        let (start, end) = (pair[0].end(), pair[1].end());
        if end == start {
            continue;
        }
        let gap = 0.001 * f64::from(end - start);
        let value = 0.08 / gap.sqrt() / x
            * (1.0 + tuning::LAMBDA_4 * (inconsistency[i] + inconsistency[i + 1]));
        step.fill(start, end, value);
    }

    step.smoothed(window::SMOOTH_HALF_WIDTH_MS)
}

/// Logistic soft-minimum of the hold-length and release-to-next-head offsets,
/// both measured against the 80 ms lead and scaled by the hit window.
///
/// A hold with no later note in its column only contributes its own term.
pub(crate) fn release_inconsistency(hold: &NoteEvent, column: &[NoteEvent], x: f64) -> f64 {
    let head = i64::from(hold.head());
    let tail = i64::from(hold.end());

    let hold_offset = 0.001 * (tail - head - RELEASE_LEAD_MS).abs() as f64 / x;
    let hold_term = (-5.0 * (hold_offset - 0.75)).exp();

    let next_term = next_head_in_column(hold, column)
        .map(|next| {
            let next_offset = 0.001 * (i64::from(next) - tail - RELEASE_LEAD_MS).abs() as f64 / x;
            (-5.0 * (next_offset - 0.75)).exp()
        })
        .unwrap_or(0.0);

    2.0 / (2.0 + hold_term + next_term)
}

fn next_head_in_column(hold: &NoteEvent, column: &[NoteEvent]) -> Option<u32> {
    let index = column.partition_point(|note| note.head() < hold.head());
    column.get(index + 1).map(NoteEvent::head)
}
