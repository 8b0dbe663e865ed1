//! Core trait for fit/transform components.
//!
//! Every component in this crate (and any external collaborator that wants
//! to live inside a [`Pipeline`](crate::preprocessing::Pipeline)) implements
//! [`Transformer`]:
//!
//! - `fit` inspects data and records fitted state on the instance.
//! - `transform` reads only that fitted state and returns a new [`Table`].
//! - `create` builds a fresh, unfitted instance of the same concrete kind
//!   with overridden configuration (see [`create_transformer`]).
//!
//! The trait is object safe so heterogeneous stages can be stored as
//! `Box<dyn Transformer>`.

use crate::dataset::{Column, Data, Table};
use crate::preprocessing::config::Options;
use crate::preprocessing::error::Result;
use std::fmt;

/// Concrete kind of a transformer, used for diagnostics and error context.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TransformerKind {
    Statifier,
    OneHotEncoder,
    Imputer,
    Pipeline,
    Wrapper,
    /// A transformer defined outside this crate.
    Custom(String),
}

impl fmt::Display for TransformerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformerKind::Statifier => write!(f, "Statifier"),
            TransformerKind::OneHotEncoder => write!(f, "OneHotEncoder"),
            TransformerKind::Imputer => write!(f, "Imputer"),
            TransformerKind::Pipeline => write!(f, "Pipeline"),
            TransformerKind::Wrapper => write!(f, "Wrapper"),
            TransformerKind::Custom(name) => write!(f, "{}", name),
        }
    }
}

/// A component that learns state from data and transforms data with it.
///
/// # Contract
/// - `fit` must not mutate `data`. A later `fit` replaces earlier fitted state.
/// - `transform` fails with [`TransformError::NotFitted`] before `fit` and
///   never mutates `data`.
/// - Calling `fit` then `transform` on the same data is deterministic.
///
/// # Example
/// ```rust
/// use featpipe::dataset::{Data, Series};
/// use featpipe::preprocessing::{Statifier, Transformer};
///
/// let data = Data::from(Series::from(vec![1.0, 2.0, f64::NAN, 4.0]));
/// let mut statifier = Statifier::new();
/// statifier.fit(&data, None).unwrap();
/// let row = statifier.transform(&data).unwrap();
/// assert_eq!(row.shape(), (1, 14));
/// ```
///
/// [`TransformError::NotFitted`]: crate::preprocessing::TransformError::NotFitted
pub trait Transformer: fmt::Debug {
    /// Concrete kind of this transformer.
    fn kind(&self) -> TransformerKind;

    /// Learn fitted state from `data` and optional `labels`.
    ///
    /// # Errors
    /// Returns [`TransformError::Shape`](crate::preprocessing::TransformError::Shape)
    /// if `data` has a shape this transformer does not accept.
    fn fit(&mut self, data: &Data, labels: Option<&Column>) -> Result<()>;

    /// Produce a new table from `data` using the fitted state.
    fn transform(&self, data: &Data) -> Result<Table>;

    /// Build a fresh, unfitted instance of the same kind with this
    /// instance's configuration merged with `overrides`.
    fn create(&self, overrides: &Options) -> Result<Box<dyn Transformer>>;

    /// Whether fitted state is present.
    fn is_fitted(&self) -> bool;

    /// Fit on `data`, then transform the same data.
    fn fit_transform(&mut self, data: &Data, labels: Option<&Column>) -> Result<Table> {
        self.fit(data, labels)?;
        self.transform(data)
    }
}

/// Build a new transformer of the same concrete kind as `prototype`.
///
/// The new instance is configured with the prototype's configuration merged
/// with `overrides` (overrides win) and carries no fitted state, so the
/// prototype is never shared or mutated.
pub fn create_transformer(
    prototype: &dyn Transformer,
    overrides: &Options,
) -> Result<Box<dyn Transformer>> {
    prototype.create(overrides)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Series;
    use crate::preprocessing::config::Options;
    use crate::preprocessing::{Imputer, Statifier};
    use serde_json::json;

    fn opts(value: serde_json::Value) -> Options {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(TransformerKind::OneHotEncoder.to_string(), "OneHotEncoder");
        assert_eq!(
            TransformerKind::Custom("Smoother".to_string()).to_string(),
            "Smoother"
        );
    }

    #[test]
    fn test_create_transformer_keeps_kind_and_drops_state() {
        let data = Data::from(Series::from(vec![1.0, 2.0, 3.0]));
        let mut proto = Statifier::new();
        proto.fit(&data, None).unwrap();

        let fresh = create_transformer(&proto, &Options::new()).unwrap();
        assert_eq!(fresh.kind(), TransformerKind::Statifier);
        assert!(!fresh.is_fitted());
        assert!(proto.is_fitted());
    }

    #[test]
    fn test_create_transformer_applies_overrides() {
        let data = Data::from(Series::from(vec![1.0, f64::NAN, 3.0, 4.0]));
        let proto = Statifier::new();
        let mut reduced =
            create_transformer(&proto, &opts(json!({ "processmissing": false }))).unwrap();
        let row = reduced.fit_transform(&data, None).unwrap();
        assert_eq!(row.n_cols(), 10);
        assert!(proto.config().processmissing);
    }

    #[test]
    fn test_create_transformer_rejects_unknown_option() {
        let proto = Imputer::default();
        let result = create_transformer(&proto, &opts(json!({ "strategie": "median" })));
        assert!(result.is_err());
    }
}
