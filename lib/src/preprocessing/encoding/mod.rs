//! Categorical feature encoding transformers.
//!
//! # Available Encoders
//!
//! ## OneHotEncoder
//! Expands nominal columns into indicator columns over their categories.
//!
//! ```text
//! // Input:  letter = [a, b, c], x = [10, 20, 30]
//! // Output: x, letter_a, letter_b, letter_c
//! //         10, 1, 0, 0
//! //         20, 0, 1, 0
//! //         30, 0, 0, 1
//! ```
//!
//! # Design Notes
//!
//! Nominal columns are either configured by index or detected: a column is
//! nominal when one of its non-missing cells is not representable as a real
//! number. Categories are compared by their text form, so `Text("1")` and
//! `Real(1.0)` fall into the same category.
//!
//! A category that appears at transform time but was not fitted is encoded
//! as the column's first fitted category and reported with a warning.

mod one_hot;

pub use one_hot::{FittedOneHotEncoder, OneHotEncoder, OneHotEncoderConfig, UnknownCategory};
