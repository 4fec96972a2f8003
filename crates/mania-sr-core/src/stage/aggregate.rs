use crate::chart::ProjectedChart;
use crate::config::{tuning, window};
use crate::error::{Error, Result};
use crate::signal::{Signal, note_density};

/// The five smoothed stage signals plus the active column counts.
#[derive(Debug, Clone, Copy)]
pub struct StageSignals<'a> {
    pub jack: &'a Signal,
    pub cross: &'a Signal,
    pub pattern: &'a Signal,
    pub anchor: &'a Signal,
    pub release: &'a Signal,
    pub active_columns: &'a [usize],
}

/// Combine the stage signals into the final rating.
pub fn aggregate(chart: &ProjectedChart, signals: StageSignals<'_>) -> Result<f64> {
    let len = chart.timeline_len();

    let mut difficulty: Vec<f64> = (0..len).map(|s| difficulty_at(&signals, s)).collect();
    let mut density = note_density(&chart.head_times(), len, window::DENSITY_HALF_WIDTH_MS);
    forward_fill(&mut difficulty, &mut density);

    let mut weighted = 0.0;
    let mut total = 0.0;
    for (value, weight) in difficulty.iter().zip(&density) {
        weighted += value.powf(tuning::LAMBDA_N) * weight;
        total += weight;
    }
    if total <= 0.0 {
        return Err(Error::Internal("chart has no note density".to_string()));
    }

    let mut rating = (weighted / total).powf(1.0 / tuning::LAMBDA_N);
    rating = rating.powf(tuning::P_0) / tuning::NORMALIZATION_PIVOT.powf(tuning::P_0)
        * tuning::NORMALIZATION_PIVOT;

    let notes = chart.note_count() as f64 + 0.5 * chart.long_note_count() as f64;
    rating *= notes / (notes + tuning::DAMPING_NOTES);

    if rating <= tuning::LOW_END_THRESHOLD {
        rating = (2.0 * rating).sqrt();
    }
    rating *= 0.96 + 0.01 * chart.key_count() as f64;

    if !rating.is_finite() {
        return Err(Error::NonFiniteValue {
            stage: "aggregate",
            time_ms: len,
        });
    }
    Ok(rating)
}

/// Per-millisecond difficulty from the clamped stage signals.
fn difficulty_at(signals: &StageSignals<'_>, s: usize) -> f64 {
    let jack = signals.jack[s].max(0.0);
    let cross = signals.cross[s].max(0.0);
    let pattern = signals.pattern[s].max(0.0);
    let anchor = signals.anchor[s].max(0.0);
    let release = signals.release[s].max(0.0);
    let active = signals.active_columns[s].max(1) as f64;

    let anchored = anchor.powf(3.0 / active);
    let jack_term = tuning::W_0 * (anchored * jack).powf(1.5);
    let pattern_term =
        (1.0 - tuning::W_0) * (anchor.powf(2.0 / 3.0) * (0.8 * pattern + release)).powf(1.5);
    let strain = (jack_term + pattern_term).powf(2.0 / 3.0);

    let tension = anchored * cross / (cross + strain + 1.0);
    tuning::W_1 * strain.sqrt() * tension.powf(tuning::P_1) + tuning::W_2 * strain
}

/// Carry the last active sample across milliseconds with no nearby notes.
fn forward_fill(difficulty: &mut [f64], density: &mut [f64]) {
    for s in 1..difficulty.len() {
        if density[s] == 0.0 {
            difficulty[s] = difficulty[s - 1];
            density[s] = density[s - 1];
        }
    }
}
