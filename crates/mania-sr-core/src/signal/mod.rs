//! Per-millisecond signal buffers.
//!
//! Every stage writes into a [`Signal`]: a fixed-length buffer indexed by
//! millisecond, sized to the chart's timeline once and never resized.

mod density;
mod smoothing;

pub use density::*;
pub use smoothing::*;

use std::ops::Index;

#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    values: Vec<f64>,
}

impl Signal {
    pub fn zeros(len: usize) -> Self {
        Self::filled(len, 0.0)
    }

    pub fn filled(len: usize, value: f64) -> Self {
        Self {
            values: vec![value; len],
        }
    }

    pub fn from_vec(values: Vec<f64>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.values
    }

    /// Overwrite `[start, end)` with `value`, clipped to the buffer.
    pub fn fill(&mut self, start: u32, end: u32, value: f64) {
        if let Some(range) = self.span(start, end) {
            self.values[range].fill(value);
        }
    }

    /// Add `value` over `[start, end)`, clipped to the buffer.
    pub fn add(&mut self, start: u32, end: u32, value: f64) {
        if let Some(range) = self.span(start, end) {
            self.values[range].iter_mut().for_each(|slot| *slot += value);
        }
    }

    pub fn add_at(&mut self, at: u32, value: f64) {
        if let Some(slot) = self.values.get_mut(at as usize) {
            *slot += value;
        }
    }

    pub fn prefix_sums(&self) -> PrefixSums {
        PrefixSums::new(&self.values)
    }

    /// Centred rectangular window average (see [`rectangular_smooth`]).
    pub fn smoothed(&self, half_width: usize) -> Signal {
        Signal::from_vec(rectangular_smooth(&self.values, half_width))
    }

    /// Incremental running average (see [`running_average`]).
    pub fn running_average(&self, half_width: usize) -> Signal {
        Signal::from_vec(running_average(&self.values, half_width))
    }

    fn span(&self, start: u32, end: u32) -> Option<std::ops::Range<usize>> {
        let start = start as usize;
        let end = (end as usize).min(self.values.len());
        (start < end).then_some(start..end)
    }
}

impl Index<usize> for Signal {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.values[index]
    }
}

/// Cumulative sums for O(1) range totals.
#[derive(Debug, Clone)]
pub struct PrefixSums {
    sums: Vec<f64>,
}

impl PrefixSums {
    pub fn new(values: &[f64]) -> Self {
        let mut sums = Vec::with_capacity(values.len() + 1);
        let mut total = 0.0;
        sums.push(total);
        for value in values {
            total += value;
            sums.push(total);
        }
        Self { sums }
    }

    /// Sum of `values[start..end]`, with both bounds clipped to the input.
    pub fn range_sum(&self, start: usize, end: usize) -> f64 {
        let last = self.sums.len() - 1;
        let end = end.min(last);
        let start = start.min(end);
        self.sums[end] - self.sums[start]
    }
}
