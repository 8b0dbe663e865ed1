//! # featpipe
//!
//! Statistical feature extraction for time series with missing values, and
//! composable fit/transform pipelines around it.
//!
//! ## Core Design Principles
//!
//! - **One contract**: every component implements
//!   [`Transformer`](preprocessing::Transformer); `fit` records state,
//!   `transform` only reads it.
//! - **Explicit missing values**: a [`Series`](dataset::Series) tags each
//!   sample as present or missing instead of reserving a sentinel value.
//! - **Fresh instances per fit**: pipelines re-create their stages from
//!   prototypes, so fitted state is never shared.
//!
//! ## Quick Start
//!
//! ```rust
//! use featpipe::dataset::{Data, Series};
//! use featpipe::preprocessing::{Statifier, Transformer};
//!
//! let series = Series::new(vec![
//!     None, Some(3.0), Some(7.0), Some(2.0), None, None, None, Some(4.0), Some(1.0), Some(5.0),
//! ]);
//! let data = Data::from(series);
//!
//! let mut statifier = Statifier::new();
//! let row = statifier.fit_transform(&data, None).unwrap();
//! assert_eq!(row.shape(), (1, 14));
//! assert_eq!(row.real_at(0, row.n_cols() - 3), Some(2.0)); // bmean
//! ```
//!
//! ## Module Structure
//!
//! - `dataset`: in-memory tables and series exchanged by transformers
//! - `preprocessing`: transformers, pipelines and their configuration

/// In-memory data model: cells, columns, tables and series.
pub mod dataset;

/// Data preprocessing transformers for feature pipelines.
pub mod preprocessing;

pub use dataset::{Cell, Column, Data, Series, Table};
pub use preprocessing::{Result, TransformError, Transformer};
