//! Pipeline for chaining transformers.
//!
//! A Pipeline holds an ordered list of prototype transformers. Fitting
//! creates a fresh instance of every prototype, so the prototypes are never
//! mutated and successive fits never share state.
//!
//! # Example
//! ```rust
//! use featpipe::dataset::{Cell, Column, Data, Table};
//! use featpipe::preprocessing::{
//!     ImputeStrategy, Imputer, OneHotEncoder, Pipeline, Transformer,
//! };
//!
//! let table = Table::new(vec![
//!     Column::from_texts("kind", vec!["a", "b", "a"]),
//!     Column::new("x", vec![Cell::Real(1.0), Cell::Missing, Cell::Real(3.0)]),
//! ])
//! .unwrap();
//!
//! let mut pipeline = Pipeline::new(vec![
//!     Box::new(Imputer::new(ImputeStrategy::Mean)),
//!     Box::new(OneHotEncoder::new()),
//! ]);
//! let out = pipeline.fit_transform(&Data::from(table), None).unwrap();
//! assert_eq!(out.column_names(), vec!["x", "kind_a", "kind_b"]);
//! assert_eq!(out.real_at(1, 0), Some(2.0));
//! ```

use crate::dataset::{Column, Data, Table};
use crate::preprocessing::config::{reject_unknown, Options};
use crate::preprocessing::error::{Result, TransformError};
use crate::preprocessing::traits::{Transformer, TransformerKind};
use serde_json::Value;
use std::borrow::Cow;
use tracing::debug;

/// Override key holding per-stage options.
pub(crate) const TRANSFORMER_ARGS: &str = "transformer_args";

/// Ordered composition of transformers.
#[derive(Debug)]
pub struct Pipeline {
    transformers: Vec<Box<dyn Transformer>>,
    transformer_args: Option<Vec<Options>>,
    fitted: Option<Vec<Box<dyn Transformer>>>,
}

impl Pipeline {
    /// Create a pipeline from prototypes, with no per-stage overrides.
    pub fn new(transformers: Vec<Box<dyn Transformer>>) -> Self {
        Self {
            transformers,
            transformer_args: None,
            fitted: None,
        }
    }

    /// Create a pipeline with one override map per stage.
    ///
    /// # Errors
    /// Returns [`TransformError::InvalidConfig`] if `args` does not have one
    /// entry per prototype or an entry is rejected by its prototype.
    pub fn with_args(transformers: Vec<Box<dyn Transformer>>, args: Vec<Options>) -> Result<Self> {
        validate_args(&transformers, &args)?;
        Ok(Self {
            transformers,
            transformer_args: Some(args),
            fitted: None,
        })
    }

    /// Number of stages.
    pub fn len(&self) -> usize {
        self.transformers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transformers.is_empty()
    }

    /// Kinds of the configured stages, in order.
    pub fn stage_kinds(&self) -> Vec<TransformerKind> {
        self.transformers.iter().map(|t| t.kind()).collect()
    }

    /// Per-stage overrides, if any.
    pub fn transformer_args(&self) -> Option<&[Options]> {
        self.transformer_args.as_deref()
    }

    /// Instances produced by the last successful fit.
    pub fn fitted_stages(&self) -> Option<&[Box<dyn Transformer>]> {
        self.fitted.as_deref()
    }

    fn stage_args(&self, index: usize) -> Option<&Options> {
        self.transformer_args.as_ref().and_then(|args| args.get(index))
    }

    fn parse_args(&self, value: &Value) -> Result<Option<Vec<Options>>> {
        let invalid = |message: String| TransformError::InvalidConfig {
            kind: TransformerKind::Pipeline,
            message,
        };
        let items = match value {
            Value::Null => return Ok(None),
            Value::Array(items) => items,
            other => {
                return Err(invalid(format!(
                    "'{}' must be an array or null, got {}",
                    TRANSFORMER_ARGS, other
                )))
            }
        };
        let args = items
            .iter()
            .enumerate()
            .map(|(i, item)| match item {
                Value::Object(map) => Ok(map.clone()),
                other => Err(invalid(format!(
                    "'{}' entry {} must be an object, got {}",
                    TRANSFORMER_ARGS, i, other
                ))),
            })
            .collect::<Result<Vec<_>>>()?;
        validate_args(&self.transformers, &args)?;
        Ok(Some(args))
    }
}

fn validate_args(transformers: &[Box<dyn Transformer>], args: &[Options]) -> Result<()> {
    if args.len() != transformers.len() {
        return Err(TransformError::InvalidConfig {
            kind: TransformerKind::Pipeline,
            message: format!(
                "expected {} stage overrides, got {}",
                transformers.len(),
                args.len()
            ),
        });
    }
    for (index, (prototype, overrides)) in transformers.iter().zip(args).enumerate() {
        prototype
            .create(overrides)
            .map_err(|e| e.in_stage(index, prototype.kind()))?;
    }
    Ok(())
}

impl Transformer for Pipeline {
    fn kind(&self) -> TransformerKind {
        TransformerKind::Pipeline
    }

    /// Fit every stage on the output of the previous one.
    ///
    /// The last stage is fit but not transformed.
    fn fit(&mut self, data: &Data, labels: Option<&Column>) -> Result<()> {
        self.fitted = None;

        let empty = Options::new();
        let n_stages = self.transformers.len();
        let mut stages = Vec::with_capacity(n_stages);
        let mut current = Cow::Borrowed(data);

        for (index, prototype) in self.transformers.iter().enumerate() {
            let kind = prototype.kind();
            let overrides = self.stage_args(index).unwrap_or(&empty);
            let mut stage = prototype
                .create(overrides)
                .map_err(|e| e.in_stage(index, kind.clone()))?;

            debug!(index, kind = %kind, input = %current.describe(), "fitting pipeline stage");
            stage
                .fit(&current, labels)
                .map_err(|e| e.in_stage(index, kind.clone()))?;

            if index + 1 < n_stages {
                let table = stage
                    .transform(&current)
                    .map_err(|e| e.in_stage(index, kind))?;
                current = Cow::Owned(Data::Table(table));
            }
            stages.push(stage);
        }

        self.fitted = Some(stages);
        Ok(())
    }

    fn transform(&self, data: &Data) -> Result<Table> {
        let stages = self.fitted.as_ref().ok_or(TransformError::NotFitted {
            kind: self.kind(),
        })?;

        let mut current = Cow::Borrowed(data);
        for (index, stage) in stages.iter().enumerate() {
            let table = stage
                .transform(&current)
                .map_err(|e| e.in_stage(index, stage.kind()))?;
            current = Cow::Owned(Data::Table(table));
        }
        Ok(current.into_owned().into_table())
    }

    fn create(&self, overrides: &Options) -> Result<Box<dyn Transformer>> {
        reject_unknown(&self.kind(), overrides, &[TRANSFORMER_ARGS])?;
        let transformer_args = match overrides.get(TRANSFORMER_ARGS) {
            Some(value) => self.parse_args(value)?,
            None => self.transformer_args.clone(),
        };

        let empty = Options::new();
        let transformers = self
            .transformers
            .iter()
            .map(|t| t.create(&empty))
            .collect::<Result<Vec<_>>>()?;

        Ok(Box::new(Pipeline {
            transformers,
            transformer_args,
            fitted: None,
        }))
    }

    fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }
}
