//! Configuration and tuning data.
//!
//! This module contains the static data every rating computation reads:
//! - `EngineConfig` - per-call runtime options (timings, column fan-out)
//! - `CrossRow` / `cross_row` - key-count-indexed adjacency weights
//! - Tuning, window and limit constants

mod cross_matrix;
mod engine;

pub use cross_matrix::*;
pub use engine::*;

/// Empirical weights of the difficulty model.
pub mod tuning {
    /// Jack stress speed offset, scaled by `x^0.25`.
    pub const LAMBDA_1: f64 = 0.11;

    /// Long-note body load multiplier used by the pattern stage.
    pub const LAMBDA_2: f64 = 7.0;

    /// Timing-window penalty shared by the pattern stage formulas.
    pub const LAMBDA_3: f64 = 24.0;

    /// Release inconsistency weight.
    pub const LAMBDA_4: f64 = 0.1;

    /// Exponent of every power mean in the model.
    pub const LAMBDA_N: f64 = 5.0;

    /// Share of the jack term in the combined strain.
    pub const W_0: f64 = 0.4;

    /// Weight of the tension term in the per-ms difficulty.
    pub const W_1: f64 = 2.7;

    /// Weight of the plain strain term in the per-ms difficulty.
    pub const W_2: f64 = 0.27;

    /// Exponent applied to the tension ratio.
    pub const P_1: f64 = 1.5;

    /// Power normalisation against [`NORMALIZATION_PIVOT`].
    pub const P_0: f64 = 1.0;

    pub const NORMALIZATION_PIVOT: f64 = 8.0;

    /// Notes added to the denominator of the note-count damping factor.
    pub const DAMPING_NOTES: f64 = 60.0;

    /// Ratings at or below this value are compressed with `sqrt(2 * r)`.
    pub const LOW_END_THRESHOLD: f64 = 2.0;
}

/// Sliding window geometry, in milliseconds.
pub mod window {
    /// Half-width of the rectangular smoothing window (J, X, P, R).
    pub const SMOOTH_HALF_WIDTH_MS: usize = 500;

    /// Half-width of the running-average window used by the anchor stage.
    pub const RUNNING_AVERAGE_HALF_WIDTH_MS: usize = 500;

    /// Half-width of the activity mask around each note.
    pub const ACTIVITY_HALF_WIDTH_MS: u32 = 500;

    /// Half-width of the local note density count.
    pub const DENSITY_HALF_WIDTH_MS: usize = 500;

    /// Duration a hold weighs half before it is fully settled.
    pub const LN_SETTLE_MS: u32 = 80;
}

/// Input limits and sentinel values.
pub mod limits {
    pub const MIN_KEY_COUNT: u32 = 1;
    pub const MAX_KEY_COUNT: u32 = 18;

    /// Key counts above this value must be even.
    pub const MAX_ODD_KEY_COUNT: u32 = 10;

    /// Calibration threshold below which charts are not rated.
    pub const MIN_NOTE_COUNT: usize = 10;

    /// Bound on the per-millisecond buffers (1 hour).
    ///
    /// The anchor stage reads one gap table per column, so an 18K chart at
    /// this length keeps about 0.5 GB of gap tables alive.
    pub const MAX_TIMELINE_MS: usize = 60 * 60 * 1000;

    /// Delta assigned to columns with no pending jack.
    pub const IDLE_DELTA_SECONDS: f64 = 1e9;

    /// Bounds of the OD-derived radicand in the hit-window formula.
    pub const MIN_HIT_WINDOW_RADICAND: f64 = 0.001;
    pub const MAX_HIT_WINDOW_RADICAND: f64 = 0.3;

    pub const UNSUPPORTED_RATING: f64 = -1.0;
    pub const EMPTY_RATING: f64 = 0.0;
}
