use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Columns (or boundaries) above which per-column work fans out to the thread pool.
pub const DEFAULT_PARALLEL_COLUMN_THRESHOLD: usize = 7;

/// Per-call runtime options. None of these change the computed rating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Record elapsed time per stage in the result.
    pub collect_timings: bool,
    pub parallel_column_threshold: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            collect_timings: false,
            parallel_column_threshold: DEFAULT_PARALLEL_COLUMN_THRESHOLD,
        }
    }
}

impl EngineConfig {
    /// Load options from a JSON file. Missing fields take their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn with_timings(mut self, collect_timings: bool) -> Self {
        self.collect_timings = collect_timings;
        self
    }

    pub fn with_parallel_column_threshold(mut self, threshold: usize) -> Self {
        self.parallel_column_threshold = threshold;
        self
    }

    /// Whether `columns` lanes of work should be spread across threads.
    pub fn fans_out(&self, columns: usize) -> bool {
        columns > self.parallel_column_threshold
    }
}
