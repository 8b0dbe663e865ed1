//! Feature engineering transformers.
//!
//! This module provides the [`Statifier`], which condenses a time series
//! with missing samples into one row of summary statistics, together with the
//! numeric building blocks it is made of.

mod correlation;
mod runs;
mod statifier;
pub mod stats;

pub use correlation::{
    autocor_window, autocorrelation, energy, pacf_window, partial_autocorrelation,
};
pub use runs::{missing_block_lengths, run_lengths};
pub use statifier::{
    FeatureSummary, FittedStatifier, ShapeStats, Statifier, StatifierConfig, BLOCK_COLUMNS,
    QUANTILE_COLUMNS, SHAPE_COLUMNS,
};
pub use stats::QuantileStats;
