use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

use crate::config::limits;

/// Playback rate applied to the chart before rating.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    EnumString,
    IntoStaticStr,
    Display,
)]
#[strum(ascii_case_insensitive)]
pub enum RateModifier {
    #[default]
    #[strum(to_string = "NM", serialize = "none", serialize = "nomod")]
    #[serde(alias = "NM", alias = "none")]
    None,
    #[strum(to_string = "DT", serialize = "doubletime", serialize = "nightcore", serialize = "NC")]
    #[serde(alias = "DT")]
    DoubleTime,
    #[strum(to_string = "HT", serialize = "halftime")]
    #[serde(alias = "HT")]
    HalfTime,
}

impl RateModifier {
    /// Playback speed multiplier.
    pub fn speed(&self) -> f64 {
        match self {
            Self::None => 1.0,
            Self::DoubleTime => 1.5,
            Self::HalfTime => 0.75,
        }
    }

    /// Map a chart timestamp onto the rescaled timeline.
    pub fn scale_time(&self, time_ms: u32) -> u32 {
        match self {
            Self::None => time_ms,
            _ => (f64::from(time_ms) / self.speed()).floor() as u32,
        }
    }
}

/// Chart-wide parameters the rating depends on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyContext {
    pub key_count: u32,
    pub overall_difficulty: f64,
    #[serde(default)]
    pub rate: RateModifier,
}

impl DifficultyContext {
    pub fn new(key_count: u32, overall_difficulty: f64) -> Self {
        Self {
            key_count,
            overall_difficulty,
            rate: RateModifier::None,
        }
    }

    pub fn with_rate(mut self, rate: RateModifier) -> Self {
        self.rate = rate;
        self
    }

    /// Whether the key count has adjacency data (1..=18, even above 10).
    pub fn has_supported_key_count(&self) -> bool {
        (limits::MIN_KEY_COUNT..=limits::MAX_KEY_COUNT).contains(&self.key_count)
            && (self.key_count <= limits::MAX_ODD_KEY_COUNT || self.key_count % 2 == 0)
    }

    /// Hit-window scale `x` in seconds. Smaller values mean tighter timing.
    pub fn hit_window_scale(&self) -> f64 {
        let radicand = (64.5 - (self.overall_difficulty * 3.0).ceil()) / 500.0;
        0.3 * radicand
            .clamp(limits::MIN_HIT_WINDOW_RADICAND, limits::MAX_HIT_WINDOW_RADICAND)
            .sqrt()
    }
}
