use rayon::prelude::*;

use crate::chart::{NoteEvent, ProjectedChart};
use crate::config::{EngineConfig, window};
use crate::signal::Signal;
use crate::stage::map_lanes;

/// Smoothed coordination factor plus the active column count per millisecond.
#[derive(Debug, Clone)]
pub struct AnchorOutput {
    /// Values in (0, 1]; lower means neighbouring columns move in lockstep.
    pub smoothed: Signal,
    /// Columns active around each millisecond, at least 1.
    pub active_columns: Vec<usize>,
}

/// `deltas` is the per-column gap table produced by the jack stage.
pub fn compute(chart: &ProjectedChart, deltas: &[Signal], config: &EngineConfig) -> AnchorOutput {
    let len = chart.timeline_len();
    let key_count = chart.key_count();

    let masks = map_lanes(key_count, config, |column| {
        activity_mask(chart.column(column), len)
    });

    let active_columns: Vec<usize> = (0..len)
        .map(|s| masks.iter().filter(|mask| mask[s]).count().max(1))
        .collect();

    let mut step = vec![1.0; len];
    let factor = |(s, slot): (usize, &mut f64)| *slot = coordination_factor(&masks, deltas, s);
    if config.fans_out(key_count) {
        step.par_iter_mut().enumerate().for_each(factor);
    } else {
        step.iter_mut().enumerate().for_each(factor);
    }

    AnchorOutput {
        smoothed: Signal::from_vec(step).running_average(window::RUNNING_AVERAGE_HALF_WIDTH_MS),
        active_columns,
    }
}

/// Marks the milliseconds within the activity half-width of each note's head
/// (or, for holds, from before the head until after the tail).
fn activity_mask(notes: &[NoteEvent], len: usize) -> Vec<bool> {
    let mut mask = vec![false; len];
    let last = len.saturating_sub(1);
    for note in notes {
        let start = note.head().saturating_sub(window::ACTIVITY_HALF_WIDTH_MS) as usize;
        let end = ((note.end() + window::ACTIVITY_HALF_WIDTH_MS) as usize).min(last);
        if start < end {
            mask[start..end].fill(true);
        }
    }
    mask
}

/// Product of pairwise factors over consecutive active columns at `s`.
fn coordination_factor(masks: &[Vec<bool>], deltas: &[Signal], s: usize) -> f64 {
    let mut factor = 1.0;
    let mut previous: Option<usize> = None;

    for column in (0..masks.len()).filter(|&column| masks[column][s]) {
        if let Some(left) = previous {
            factor *= pair_factor(deltas[left][s], deltas[column][s]);
        }
        previous = Some(column);
    }

    factor
}

pub(crate) fn pair_factor(left: f64, right: f64) -> f64 {
    let slower = left.max(right);
    let mismatch = (left - right).abs() + (slower - 0.3).max(0.0);
    if mismatch < 0.02 {
        (0.75 + 0.5 * slower).min(1.0)
    } else if mismatch < 0.07 {
        (0.65 + 5.0 * mismatch + 0.5 * slower).min(1.0)
    } else {
        1.0
    }
}
