use crate::chart::{NoteEvent, ProjectedChart};
use crate::config::{EngineConfig, limits, tuning, window};
use crate::signal::Signal;
use crate::stage::fold_lanes;

/// Smoothed jack stress plus the per-column gap table the anchor stage reads.
#[derive(Debug, Clone)]
pub struct JackOutput {
    pub smoothed: Signal,
    /// Seconds until the next head in each column, per millisecond.
    /// Idle stretches hold [`limits::IDLE_DELTA_SECONDS`].
    pub deltas: Vec<Signal>,
}

pub fn compute(chart: &ProjectedChart, config: &EngineConfig) -> JackOutput {
    let len = chart.timeline_len();
    let x = chart.hit_window();

    let mut mean = ColumnMean::new(len);
    let mut deltas = Vec::with_capacity(chart.key_count());
    fold_lanes(
        chart.key_count(),
        config,
        |column| column_stress(chart.column(column), len, x),
        |_, (stress, delta): (Signal, Signal)| {
            mean.add(&stress, &delta);
            deltas.push(delta);
        },
    );

    JackOutput {
        smoothed: mean.finish(),
        deltas,
    }
}

/// Correction peaking near an 80 ms gap.
pub(crate) fn jack_bonus(gap: f64) -> f64 {
    1.0 - 7e-5 * (0.15 + (gap - 0.08).abs()).powi(-4)
}

fn column_stress(notes: &[NoteEvent], len: usize, x: f64) -> (Signal, Signal) {
    let mut raw = Signal::zeros(len);
    let mut deltas = Signal::filled(len, limits::IDLE_DELTA_SECONDS);
    let offset = tuning::LAMBDA_1 * x.powf(0.25);

    for pair in notes.windows(2) {
        let (start, end) = (pair[0].head(), pair[1].head());
        if end == start {
            continue;
        }
        let gap = 0.001 * f64::from(end - start);
        raw.fill(start, end, jack_bonus(gap) / (gap * (gap + offset)));
        deltas.fill(start, end, gap);
    }

    (raw.smoothed(window::SMOOTH_HALF_WIDTH_MS), deltas)
}

/// Power mean across columns, each weighted by the inverse of its current gap.
///
/// Columns are added one at a time so their smoothed stress can be dropped
/// as soon as it is counted.
struct ColumnMean {
    weighted_sum: Vec<f64>,
    weight_total: Vec<f64>,
}

impl ColumnMean {
    fn new(len: usize) -> Self {
        Self {
            weighted_sum: vec![0.0; len],
            weight_total: vec![0.0; len],
        }
    }

    fn add(&mut self, stress: &Signal, delta: &Signal) {
        let samples = stress.as_slice().iter().zip(delta.as_slice());
        let slots = self.weighted_sum.iter_mut().zip(self.weight_total.iter_mut());
        for ((sum, total), (&value, &gap)) in slots.zip(samples) {
            let weight = 1.0 / gap;
            *sum += value.max(0.0).powf(tuning::LAMBDA_N) * weight;
            *total += weight;
        }
    }

    fn finish(self) -> Signal {
        let values = self
            .weighted_sum
            .into_iter()
            .zip(self.weight_total)
            .map(|(sum, total)| (sum / total.max(1e-9)).powf(1.0 / tuning::LAMBDA_N))
            .collect();
        Signal::from_vec(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{jack, projected, round_robin};

    #[test]
    fn test_jack_bonus_dips_near_80ms() {
        assert!(jack_bonus(0.08) < jack_bonus(0.2));
        assert!(jack_bonus(0.08) > 0.8);
        assert!((jack_bonus(1.0) - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_column_mean_favours_the_faster_column() {
        let mut mean = ColumnMean::new(2);
        mean.add(&Signal::filled(2, 10.0), &Signal::filled(2, 0.1));
        mean.add(&Signal::filled(2, 0.0), &Signal::filled(2, limits::IDLE_DELTA_SECONDS));
        let combined = mean.finish();
        // The idle column carries almost no weight.
        assert!((combined[0] - 10.0).abs() < 1e-6);

        let empty = ColumnMean::new(3).finish();
        assert!(empty.as_slice().iter().all(|&value| value == 0.0));
    }

    #[test]
    fn test_delta_table_tracks_column_gaps() {
        let chart = projected(&jack(1, 12, 200, 0), 4);
        let output = compute(&chart, &EngineConfig::default());

        assert_eq!(output.deltas.len(), 4);
        assert!((output.deltas[1][100] - 0.2).abs() < 1e-12);
        assert_eq!(output.deltas[0][100], limits::IDLE_DELTA_SECONDS);
        // No gap starts at the final note.
        assert_eq!(output.deltas[1][2200], limits::IDLE_DELTA_SECONDS);
    }

    #[test]
    fn test_faster_jacks_are_harder() {
        let slow = compute(&projected(&jack(0, 12, 300, 0), 4), &EngineConfig::default());
        let fast = compute(&projected(&jack(0, 12, 150, 0), 4), &EngineConfig::default());
        assert!(fast.smoothed[800] > slow.smoothed[800]);
    }

    #[test]
    fn test_jack_outweighs_spread_notes() {
        let single = compute(&projected(&jack(0, 20, 200, 0), 4), &EngineConfig::default());
        let spread = compute(&projected(&round_robin(4, 20, 200), 4), &EngineConfig::default());
        assert!(single.smoothed[2000] > spread.smoothed[2000]);
    }

    #[test]
    fn test_parallel_lanes_match_sequential() {
        let notes = round_robin(8, 64, 90);
        let chart = projected(&notes, 8);
        let sequential = compute(&chart, &EngineConfig::default().with_parallel_column_threshold(64));
        let parallel = compute(&chart, &EngineConfig::default().with_parallel_column_threshold(0));
        assert_eq!(sequential.smoothed, parallel.smoothed);
        assert_eq!(sequential.deltas, parallel.deltas);
    }
}
