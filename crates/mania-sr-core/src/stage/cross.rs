use crate::chart::{NoteEvent, ProjectedChart};
use crate::config::{EngineConfig, window};
use crate::signal::Signal;
use crate::stage::fold_lanes;

/// Smoothed cross-column stress.
///
/// A chart with `k` columns has `k + 1` boundaries: the two outer edges see a
/// single column, every inner boundary sees the merged heads of the columns
/// on either side. Boundary signals are mixed with the adjacency weights of
/// the key count.
pub fn compute(chart: &ProjectedChart, config: &EngineConfig) -> Signal {
    let len = chart.timeline_len();
    let x = chart.hit_window();
    let weights = chart.cross_weights();

    let mut base = Signal::zeros(len);
    fold_lanes(
        weights.len(),
        config,
        |boundary| boundary_stress(&boundary_heads(chart, boundary), len, x),
        |boundary, signal: Signal| {
            let weight = weights[boundary];
            for (slot, value) in base.as_mut_slice().iter_mut().zip(signal.as_slice()) {
                *slot += value * weight;
            }
        },
    );

    base.smoothed(window::SMOOTH_HALF_WIDTH_MS)
}

/// Ascending head times seen by one boundary.
fn boundary_heads(chart: &ProjectedChart, boundary: usize) -> Vec<u32> {
    let key_count = chart.key_count();
    let heads = |column: usize| chart.column(column).iter().map(NoteEvent::head);

    if boundary == 0 {
        heads(0).collect()
    } else if boundary == key_count {
        heads(key_count - 1).collect()
    } else {
        let mut merged: Vec<u32> = heads(boundary - 1).chain(heads(boundary)).collect();
        merged.sort_unstable();
        merged
    }
}

fn boundary_stress(heads: &[u32], len: usize, x: f64) -> Signal {
    let mut signal = Signal::zeros(len);
    for pair in heads.windows(2) {
        let gap = 0.001 * f64::from(pair[1] - pair[0]);
        signal.fill(pair[0], pair[1], 0.16 / x.max(gap).powi(2));
    }
    signal
}
