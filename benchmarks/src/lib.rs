//! Benchmark utilities for featpipe benchmarks.
//!
//! This library provides deterministic synthetic inputs shared by the
//! criterion benches:
//!
//! - Gappy sensor series with a configurable missing pattern
//! - Mixed nominal/numeric tables with missing cells

pub mod data;

pub use data::{gappy_series, sensor_table, GapPattern};
