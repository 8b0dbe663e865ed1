//! Imputation transformers for handling missing values.
//!
//! # Available Transformers
//!
//! | Transformer | Description |
//! |-------------|-------------|
//! | [`Imputer`] | Impute with mean, median, most_frequent, min, max, or constant |
//!
//! A cell is invalid when it is `Missing` or a NaN real. Only real-valued
//! columns are imputed.

mod imputer;

pub use imputer::{FittedImputer, ImputeStrategy, Imputer, ImputerConfig};
