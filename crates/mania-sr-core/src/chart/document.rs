use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::chart::{DifficultyContext, NoteEvent, RateModifier};
use crate::error::Result;

/// Serialisable form of one rating request: chart parameters plus notes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDocument {
    pub key_count: u32,
    pub overall_difficulty: f64,
    #[serde(default)]
    pub rate: RateModifier,
    pub notes: Vec<NoteEvent>,
}

impl ChartDocument {
    pub fn new(context: DifficultyContext, notes: Vec<NoteEvent>) -> Self {
        Self {
            key_count: context.key_count,
            overall_difficulty: context.overall_difficulty,
            rate: context.rate,
            notes,
        }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn context(&self) -> DifficultyContext {
        DifficultyContext {
            key_count: self.key_count,
            overall_difficulty: self.overall_difficulty,
            rate: self.rate,
        }
    }
}
