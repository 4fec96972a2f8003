//! CLI command implementations.

pub mod rate;
