//! Delegating transformer.

use crate::dataset::{Column, Data, Table};
use crate::preprocessing::config::{overlay, reject_unknown, Options};
use crate::preprocessing::error::{Result, TransformError};
use crate::preprocessing::pipeline::pipeline::TRANSFORMER_ARGS;
use crate::preprocessing::traits::{Transformer, TransformerKind};
use serde_json::Value;
use tracing::debug;

/// Delegates fit and transform to one inner transformer built from a
/// prototype plus override options.
///
/// # Example
/// ```rust
/// use featpipe::dataset::{Data, Series};
/// use featpipe::preprocessing::{Options, Statifier, Transformer, Wrapper};
///
/// let mut args = Options::new();
/// args.insert("processmissing".to_string(), false.into());
///
/// let mut wrapper = Wrapper::with_args(Box::new(Statifier::new()), args).unwrap();
/// let data = Data::from(Series::from(vec![1.0, 4.0, 2.0, 8.0]));
/// let row = wrapper.fit_transform(&data, None).unwrap();
/// assert_eq!(row.n_cols(), 10);
/// ```
#[derive(Debug)]
pub struct Wrapper {
    transformer: Box<dyn Transformer>,
    transformer_args: Options,
    fitted: Option<Box<dyn Transformer>>,
}

impl Wrapper {
    pub fn new(transformer: Box<dyn Transformer>) -> Self {
        Self {
            transformer,
            transformer_args: Options::new(),
            fitted: None,
        }
    }

    /// Create a wrapper whose inner transformer is built with `args`.
    ///
    /// # Errors
    /// Returns the prototype's error if it rejects `args`.
    pub fn with_args(transformer: Box<dyn Transformer>, args: Options) -> Result<Self> {
        transformer.create(&args)?;
        Ok(Self {
            transformer,
            transformer_args: args,
            fitted: None,
        })
    }

    pub fn transformer_args(&self) -> &Options {
        &self.transformer_args
    }

    /// The fitted inner transformer.
    pub fn inner(&self) -> Option<&dyn Transformer> {
        self.fitted.as_deref()
    }
}

impl Transformer for Wrapper {
    fn kind(&self) -> TransformerKind {
        TransformerKind::Wrapper
    }

    fn fit(&mut self, data: &Data, labels: Option<&Column>) -> Result<()> {
        self.fitted = None;
        let mut inner = self
            .transformer
            .create(&self.transformer_args)
            .map_err(|e| e.wrapped(self.transformer.kind()))?;
        let kind = inner.kind();
        debug!(inner = %kind, "fitting wrapped transformer");
        inner.fit(data, labels).map_err(|e| e.wrapped(kind))?;
        self.fitted = Some(inner);
        Ok(())
    }

    fn transform(&self, data: &Data) -> Result<Table> {
        let inner = self.fitted.as_ref().ok_or(TransformError::NotFitted {
            kind: self.kind(),
        })?;
        inner.transform(data).map_err(|e| e.wrapped(inner.kind()))
    }

    fn create(&self, overrides: &Options) -> Result<Box<dyn Transformer>> {
        reject_unknown(&self.kind(), overrides, &[TRANSFORMER_ARGS])?;
        let transformer_args = match overrides.get(TRANSFORMER_ARGS) {
            None | Some(Value::Null) => self.transformer_args.clone(),
            Some(Value::Object(args)) => overlay(&self.transformer_args, args),
            Some(other) => {
                return Err(TransformError::InvalidConfig {
                    kind: self.kind(),
                    message: format!("'{}' must be an object, got {}", TRANSFORMER_ARGS, other),
                })
            }
        };

        let transformer = self.transformer.create(&Options::new())?;
        Ok(Box::new(Wrapper::with_args(transformer, transformer_args)?))
    }

    fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }
}
