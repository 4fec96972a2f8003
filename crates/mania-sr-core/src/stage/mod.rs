//! Stress estimation stages.
//!
//! Each stage turns a [`ProjectedChart`](crate::chart::ProjectedChart) into a
//! smoothed per-millisecond signal:
//! - `jack` - repeated hits in one column (also yields the per-column delta table)
//! - `cross` - trills and jumps across neighbouring columns
//! - `pattern` - global timing gaps with long-note load
//! - `anchor` - coordination of simultaneously active columns
//! - `release` - long-note release timing
//! - `aggregate` - combines the five signals into the rating

pub mod aggregate;
pub mod anchor;
pub mod cross;
pub mod jack;
pub mod pattern;
pub mod release;

use rayon::prelude::*;
use serde::Serialize;
use strum::{Display, IntoStaticStr};

use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::signal::Signal;

/// Named step of a rating computation, used for timings and fault reports.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, IntoStaticStr, Display,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Projection,
    Jack,
    Cross,
    Pattern,
    Anchor,
    Release,
    Aggregate,
}

impl Stage {
    pub fn name(&self) -> &'static str {
        self.into()
    }
}

/// Run `f` for every lane in `0..count`, in lane order.
///
/// Lanes spread across the thread pool only when the config says the
/// chart is wide enough to be worth it.
pub(crate) fn map_lanes<T, F>(count: usize, config: &EngineConfig, f: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize) -> T + Sync + Send,
{
    if config.fans_out(count) {
        (0..count).into_par_iter().map(f).collect()
    } else {
        (0..count).map(f).collect()
    }
}

/// Run `f` for every lane in `0..count` and hand each result to `fold` in
/// lane order.
///
/// Lanes are computed in batches of one lane per worker (one lane at a time
/// when the chart does not fan out), so at most one batch of lane results is
/// alive at once.
pub(crate) fn fold_lanes<T, F, G>(count: usize, config: &EngineConfig, f: F, mut fold: G)
where
    T: Send,
    F: Fn(usize) -> T + Sync + Send,
    G: FnMut(usize, T),
{
    let batch = if config.fans_out(count) {
        rayon::current_num_threads().max(1)
    } else {
        1
    };

    for start in (0..count).step_by(batch) {
        let end = (start + batch).min(count);
        let results: Vec<T> = if batch > 1 {
            (start..end).into_par_iter().map(&f).collect()
        } else {
            (start..end).map(&f).collect()
        };
        for (offset, result) in results.into_iter().enumerate() {
            fold(start + offset, result);
        }
    }
}

/// Fail with the first millisecond holding a NaN or infinity.
pub(crate) fn ensure_finite(stage: Stage, signal: &Signal) -> Result<()> {
    match signal.as_slice().iter().position(|value| !value.is_finite()) {
        Some(time_ms) => Err(Error::NonFiniteValue {
            stage: stage.name(),
            time_ms,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_names() {
        assert_eq!(Stage::Projection.name(), "projection");
        assert_eq!(Stage::Aggregate.to_string(), "aggregate");
    }

    #[test]
    fn test_map_lanes_preserves_order() {
        let sequential = EngineConfig::default();
        let parallel = EngineConfig::default().with_parallel_column_threshold(0);

        let a = map_lanes(12, &sequential, |lane| lane * lane);
        let b = map_lanes(12, &parallel, |lane| lane * lane);
        assert_eq!(a, b);
        assert_eq!(b[11], 121);
    }

    #[test]
    fn test_fold_lanes_visits_lanes_in_order() {
        for config in [
            EngineConfig::default(),
            EngineConfig::default().with_parallel_column_threshold(0),
        ] {
            let mut seen = Vec::new();
            fold_lanes(19, &config, |lane| lane * 2, |lane, value| seen.push((lane, value)));
            assert_eq!(seen, (0..19).map(|lane| (lane, lane * 2)).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_fold_lanes_with_no_lanes() {
        let mut calls = 0;
        fold_lanes(0, &EngineConfig::default(), |lane| lane, |_, _| calls += 1);
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_ensure_finite() {
        let mut signal = Signal::zeros(10);
        assert!(ensure_finite(Stage::Jack, &signal).is_ok());

        signal.fill(7, 8, f64::NAN);
        assert!(matches!(
            ensure_finite(Stage::Jack, &signal),
            Err(Error::NonFiniteValue {
                stage: "jack",
                time_ms: 7
            })
        ));
    }
}
