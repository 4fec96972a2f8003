use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::time::{Duration, Instant};

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::chart::{ChartDocument, DifficultyContext, NoteEvent, Projection, project};
use crate::config::EngineConfig;
use crate::engine::{RatingResult, StageTimings};
use crate::error::Result;
use crate::stage::aggregate::{StageSignals, aggregate};
use crate::stage::{Stage, anchor, cross, ensure_finite, jack, pattern, release};

/// Rate a chart with the default engine options.
///
/// Returns `-1` for unsupported input or an internal fault, `0` for an empty
/// chart, and a positive star rating otherwise.
pub fn rate(notes: &[NoteEvent], context: &DifficultyContext) -> f64 {
    rate_with_config(notes, context, &EngineConfig::default()).rating
}

/// Rate a chart and report how the rating was reached.
pub fn rate_with_config(
    notes: &[NoteEvent],
    context: &DifficultyContext,
    config: &EngineConfig,
) -> RatingResult {
    guarded(notes, context, || run(notes, context, config))
}

pub fn rate_document(document: &ChartDocument, config: &EngineConfig) -> RatingResult {
    rate_with_config(&document.notes, &document.context(), config)
}

/// Rate many documents concurrently. Results come back in input order.
pub fn rate_batch(documents: &[ChartDocument], config: &EngineConfig) -> Vec<RatingResult> {
    documents
        .par_iter()
        .map(|document| rate_document(document, config))
        .collect()
}

/// Run `compute`, turning errors and panics into the fault sentinel.
fn guarded<F>(notes: &[NoteEvent], context: &DifficultyContext, compute: F) -> RatingResult
where
    F: FnOnce() -> Result<RatingResult>,
{
    let message = match panic::catch_unwind(AssertUnwindSafe(compute)) {
        Ok(Ok(result)) => return result,
        Ok(Err(e)) => e.to_string(),
        Err(payload) => format!("panic: {}", panic_message(payload.as_ref())),
    };

    warn!(
        "Rating failed for {}K chart with {} notes (OD {}): {}",
        context.key_count,
        notes.len(),
        context.overall_difficulty,
        message
    );
    RatingResult::fault(message, notes)
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "unknown panic payload"
    }
}

fn run(
    notes: &[NoteEvent],
    context: &DifficultyContext,
    config: &EngineConfig,
) -> Result<RatingResult> {
    let mut clock = StageClock::new(config.collect_timings);

    let (projection, elapsed) = timed(|| project(notes, context));
    clock.record(Stage::Projection, elapsed);
    let chart = match projection {
        Projection::Ready(chart) => chart,
        Projection::Empty => return Ok(RatingResult::empty().with_timings(clock.finish())),
        Projection::Unsupported(reason) => {
            debug!("Chart not rated: {}", reason);
            return Ok(RatingResult::unsupported(reason, notes).with_timings(clock.finish()));
        }
    };

    // J, X and P only read the projected chart.
    let ((jack_output, jack_time), ((cross_signal, cross_time), (pattern_signal, pattern_time))) =
        rayon::join(
            || timed(|| jack::compute(&chart, config)),
            || {
                rayon::join(
                    || timed(|| cross::compute(&chart, config)),
                    || timed(|| pattern::compute(&chart, config)),
                )
            },
        );
    clock.record(Stage::Jack, jack_time);
    clock.record(Stage::Cross, cross_time);
    clock.record(Stage::Pattern, pattern_time);
    ensure_finite(Stage::Jack, &jack_output.smoothed)?;
    ensure_finite(Stage::Cross, &cross_signal)?;
    ensure_finite(Stage::Pattern, &pattern_signal)?;

    // A needs the per-column deltas from J.
    let ((anchor_output, anchor_time), (release_signal, release_time)) = rayon::join(
        || timed(|| anchor::compute(&chart, &jack_output.deltas, config)),
        || timed(|| release::compute(&chart)),
    );
    clock.record(Stage::Anchor, anchor_time);
    clock.record(Stage::Release, release_time);
    ensure_finite(Stage::Anchor, &anchor_output.smoothed)?;
    ensure_finite(Stage::Release, &release_signal)?;

    let (rating, elapsed) = timed(|| {
        aggregate(
            &chart,
            StageSignals {
                jack: &jack_output.smoothed,
                cross: &cross_signal,
                pattern: &pattern_signal,
                anchor: &anchor_output.smoothed,
                release: &release_signal,
                active_columns: &anchor_output.active_columns,
            },
        )
    });
    clock.record(Stage::Aggregate, elapsed);
    let rating = rating?;

    debug!(
        "Rated {}K chart: {:.4} ({} notes, {} holds)",
        chart.key_count(),
        rating,
        chart.note_count(),
        chart.long_note_count()
    );
    Ok(RatingResult::rated(rating, &chart).with_timings(clock.finish()))
}

fn timed<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let started = Instant::now();
    let value = f();
    (value, started.elapsed())
}

/// Collects stage durations when timings are enabled.
struct StageClock {
    timings: Option<StageTimings>,
}

impl StageClock {
    fn new(enabled: bool) -> Self {
        Self {
            timings: enabled.then(StageTimings::new),
        }
    }

    fn record(&mut self, stage: Stage, elapsed: Duration) {
        if let Some(timings) = self.timings.as_mut() {
            debug!("{} stage took {:?}", stage, elapsed);
            timings.insert(stage.name(), elapsed);
        }
    }

    fn finish(self) -> Option<StageTimings> {
        self.timings
    }
}
