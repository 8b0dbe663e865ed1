//! Data preprocessing transformers and their composition.
//!
//! # Design Philosophy
//!
//! - **Runtime fitted state**: every transformer owns an optional fitted
//!   state, created by `fit` and read by `transform`.
//! - **Trait objects**: heterogeneous stages live in one
//!   `Vec<Box<dyn Transformer>>`, so external components can join a
//!   [`Pipeline`] without this crate knowing their internals.
//! - **Prototypes**: composites never fit the instances they were given;
//!   they build fresh ones through [`create_transformer`].
//!
//! # Core Traits
//!
//! - [`Transformer`]: fit/transform contract shared by every component
//!
//! # Available Transformers
//!
//! ## Feature engineering
//! - [`Statifier`]: summary statistics of a series with missing samples
//!
//! ## Encoding
//! - [`OneHotEncoder`]: indicator columns for nominal columns
//!
//! ## Imputation
//! - [`Imputer`]: fill missing values with mean, median, most_frequent, min, max or constant
//!
//! ## Pipeline
//! - [`Pipeline`]: chain multiple transformers together
//! - [`Wrapper`]: delegate to one configured transformer
//!
//! # Example
//!
//! ```rust
//! use featpipe::dataset::{Data, Series};
//! use featpipe::preprocessing::{create_transformer, Options, Statifier, Transformer};
//!
//! let prototype = Statifier::new();
//! let mut overrides = Options::new();
//! overrides.insert("max_lag".to_string(), 4.into());
//!
//! let mut statifier = create_transformer(&prototype, &overrides).unwrap();
//! let data = Data::from(Series::from(vec![3.0, f64::NAN, 1.0, 4.0, 1.0, 5.0]));
//! let row = statifier.fit_transform(&data, None).unwrap();
//! assert_eq!(row.n_rows(), 1);
//! ```

pub mod config;
pub mod encoding;
pub mod error;
pub mod feature_engineering;
pub mod imputation;
pub mod pipeline;
pub mod traits;

// Re-export main types
pub use config::Options;
pub use encoding::{FittedOneHotEncoder, OneHotEncoder, OneHotEncoderConfig, UnknownCategory};
pub use error::{Result, TransformError};
pub use feature_engineering::{FeatureSummary, FittedStatifier, Statifier, StatifierConfig};
pub use imputation::{FittedImputer, ImputeStrategy, Imputer, ImputerConfig};
pub use pipeline::{Pipeline, Wrapper};
pub use traits::{create_transformer, Transformer, TransformerKind};
