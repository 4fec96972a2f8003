use rayon::prelude::*;

use crate::chart::{NoteEvent, ProjectedChart};
use crate::config::{EngineConfig, tuning, window};
use crate::signal::Signal;

/// Heads closer than this (seconds) count as simultaneous.
const CHORD_EPSILON: f64 = 1e-9;

/// Smoothed pattern stress over the column-agnostic note sequence.
pub fn compute(chart: &ProjectedChart, config: &EngineConfig) -> Signal {
    let len = chart.timeline_len();
    let x = chart.hit_window();

    let parallel = config.fans_out(chart.key_count());
    let load = ln_body_occupancy(chart.long_notes(), len, parallel).prefix_sums();
    let chord_impulse = 1000.0 * (0.02 * (4.0 / x - tuning::LAMBDA_3)).powf(0.25);

    let mut step = Signal::zeros(len);
    for pair in chart.notes().windows(2) {
        let (left, right) = (pair[0].head(), pair[1].head());
        let gap = 0.001 * f64::from(right - left);
        if gap < CHORD_EPSILON {
            step.add_at(left, chord_impulse);
            continue;
        }

        let held = 0.001 * load.range_sum(left as usize, right as usize);
        let load_multiplier = 1.0 + tuning::LAMBDA_2 * held;
        step.add(
            left,
            right,
            base_stress(gap, x) * awkward_gap_multiplier(gap) * load_multiplier,
        );
    }

    step.smoothed(window::SMOOTH_HALF_WIDTH_MS)
}

fn base_stress(gap: f64, x: f64) -> f64 {
    let spread = if gap < 2.0 * x / 3.0 {
        (gap - x / 2.0).powi(2)
    } else {
        (x / 6.0).powi(2)
    };
    (0.08 / x * (1.0 - tuning::LAMBDA_3 / x * spread)).powf(0.25) / gap
}

/// Cubic bump over gaps whose `7.5 / gap` rate lies in (160, 360).
pub(crate) fn awkward_gap_multiplier(gap: f64) -> f64 {
    let rate = 7.5 / gap;
    if rate > 160.0 && rate < 360.0 {
        1.0 + 1.4e-7 * (rate - 160.0) * (rate - 360.0).powi(2)
    } else {
        1.0
    }
}

/// Per-millisecond count of held long-note bodies. A hold weighs 0.5 while
/// it settles and 1.0 afterwards.
///
/// Holds are spread over per-worker difference buffers that are summed once
/// every worker is done.
pub(crate) fn ln_body_occupancy(holds: &[NoteEvent], len: usize, parallel: bool) -> Signal {
    let partials: Vec<Vec<f64>> = if parallel && !holds.is_empty() {
        let chunk = holds.len().div_ceil(rayon::current_num_threads()).max(1);
        holds
            .par_chunks(chunk)
            .map(|chunk| body_differences(chunk, len))
            .collect()
    } else {
        vec![body_differences(holds, len)]
    };

    let mut differences = vec![0.0; len + 1];
    for partial in &partials {
        for (total, value) in differences.iter_mut().zip(partial) {
            *total += value;
        }
    }

    let mut occupancy = Vec::with_capacity(len);
    let mut running = 0.0;
    for difference in &differences[..len] {
        running += difference;
        occupancy.push(running);
    }
    Signal::from_vec(occupancy)
}

fn body_differences(holds: &[NoteEvent], len: usize) -> Vec<f64> {
    let mut differences = vec![0.0; len + 1];
    for hold in holds {
        let head = (hold.head() as usize).min(len);
        let tail = (hold.end() as usize).min(len);
        let settled = (head + window::LN_SETTLE_MS as usize).min(tail);
        differences[head] += 0.5;
        differences[settled] += 0.5;
        differences[tail] -= 1.0;
    }
    differences
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{jack, projected};

    #[test]
    fn test_awkward_gap_multiplier() {
        assert_eq!(awkward_gap_multiplier(0.5), 1.0);
        assert_eq!(awkward_gap_multiplier(0.01), 1.0);
        // rate 250
        assert!(awkward_gap_multiplier(0.03) > 1.0);
    }

    #[test]
    fn test_occupancy_settles_after_80ms() {
        let holds = [NoteEvent::hold(0, 100, 400).unwrap()];
        let occupancy = ln_body_occupancy(&holds, 500, false);
        assert_eq!(occupancy[99], 0.0);
        assert_eq!(occupancy[100], 0.5);
        assert_eq!(occupancy[179], 0.5);
        assert_eq!(occupancy[180], 1.0);
        assert_eq!(occupancy[399], 1.0);
        assert_eq!(occupancy[400], 0.0);
    }

    #[test]
    fn test_short_hold_never_settles() {
        let holds = [NoteEvent::hold(0, 100, 150).unwrap()];
        let occupancy = ln_body_occupancy(&holds, 200, false);
        assert_eq!(occupancy[120], 0.5);
        assert_eq!(occupancy[150], 0.0);
    }

    #[test]
    fn test_parallel_occupancy_matches_sequential() {
        let holds: Vec<NoteEvent> = (0..200)
            .map(|i| NoteEvent::hold(i % 7, i as u32 * 37, i as u32 * 37 + 500).unwrap())
            .collect();
        let len = 200 * 37 + 501;
        assert_eq!(
            ln_body_occupancy(&holds, len, false),
            ln_body_occupancy(&holds, len, true)
        );
    }

    #[test]
    fn test_chords_add_impulse() {
        let mut chords = jack(0, 12, 250, 0);
        chords.extend(jack(1, 12, 250, 0));
        let single = jack(0, 12, 250, 0);

        let config = EngineConfig::default();
        let chord_stress = compute(&projected(&chords, 4), &config);
        let single_stress = compute(&projected(&single, 4), &config);
        assert!(chord_stress[1000] > single_stress[1000]);
    }

    #[test]
    fn test_held_bodies_raise_stress() {
        let taps = jack(0, 12, 250, 0);
        let mut with_hold = taps.clone();
        with_hold.push(NoteEvent::hold(3, 0, 2900).unwrap());

        let config = EngineConfig::default();
        let tap_stress = compute(&projected(&taps, 4), &config);
        let hold_stress = compute(&projected(&with_hold, 4), &config);
        assert!(hold_stress[1500] > tap_stress[1500]);
    }
}
