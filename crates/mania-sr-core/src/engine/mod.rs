//! Rating entry points.
//!
//! `rate` is the plain sentinel-returning call. `rate_with_config` returns a
//! full [`RatingResult`], and `rate_batch` rates many chart documents at once.
//! None of them return an error or let a panic escape.

mod pipeline;
mod rating;

pub use pipeline::{rate, rate_batch, rate_document, rate_with_config};
pub use rating::*;
