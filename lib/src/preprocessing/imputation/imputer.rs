//! Imputer.
//!
//! Fills missing and NaN entries of numeric columns with an aggregate of the
//! column's valid entries. Non-numeric columns pass through unchanged.
//!
//! # Example
//! ```rust
//! use featpipe::dataset::{Cell, Column, Data, Table};
//! use featpipe::preprocessing::{ImputeStrategy, Imputer, Transformer};
//!
//! let table = Table::from_column(Column::new(
//!     "x",
//!     vec![Cell::Real(1.0), Cell::Missing, Cell::Real(5.0)],
//! ));
//! let mut imputer = Imputer::new(ImputeStrategy::Median);
//! let out = imputer.fit_transform(&Data::from(table), None).unwrap();
//! assert_eq!(out.real_at(1, 0), Some(3.0));
//! ```

use crate::dataset::{Cell, Column, Data, Table};
use crate::preprocessing::config::{merge_config, Options};
use crate::preprocessing::error::{Result, TransformError};
use crate::preprocessing::feature_engineering::stats;
use crate::preprocessing::traits::{Transformer, TransformerKind};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Strategy for imputing missing values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImputeStrategy {
    /// Replace missing values with the mean of each column.
    #[default]
    Mean,
    /// Replace missing values with the median of each column.
    Median,
    /// Replace missing values with the most frequent value of each column.
    /// Ties resolve to the smallest value.
    MostFrequent,
    Min,
    Max,
    /// Replace missing values with a constant value.
    Constant(f64),
}

impl ImputeStrategy {
    /// Fill value for a column with the given valid values.
    ///
    /// `None` when the strategy needs at least one valid value and there is
    /// none.
    pub fn aggregate(&self, valid: &[f64]) -> Option<f64> {
        if let ImputeStrategy::Constant(value) = self {
            return Some(*value);
        }
        if valid.is_empty() {
            return None;
        }
        match self {
            ImputeStrategy::Mean => Some(stats::mean(valid)),
            ImputeStrategy::Median => Some(stats::median(valid)),
            ImputeStrategy::MostFrequent => stats::mode(valid),
            ImputeStrategy::Min => valid.iter().copied().reduce(f64::min),
            ImputeStrategy::Max => valid.iter().copied().reduce(f64::max),
            ImputeStrategy::Constant(value) => Some(*value),
        }
    }
}

/// Configuration for [`Imputer`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImputerConfig {
    pub strategy: ImputeStrategy,
}

/// Fitted state of an [`Imputer`]: the strategy in effect.
#[derive(Clone, Debug, PartialEq)]
pub struct FittedImputer {
    strategy: ImputeStrategy,
}

impl FittedImputer {
    pub fn strategy(&self) -> ImputeStrategy {
        self.strategy
    }

    /// Impute every real-valued column of `table`.
    ///
    /// # Errors
    /// Returns [`TransformError::EmptyColumn`] if a column has invalid
    /// entries but no valid value to aggregate.
    pub fn impute(&self, table: &Table) -> Result<Table> {
        let columns = table
            .columns()
            .iter()
            .map(|column| self.impute_column(column))
            .collect::<Result<Vec<_>>>()?;
        Table::new(columns)
    }

    fn impute_column(&self, column: &Column) -> Result<Column> {
        if !column.is_real_valued() || !column.cells().iter().any(Cell::is_invalid) {
            return Ok(column.clone());
        }

        let valid: Vec<f64> = column
            .cells()
            .iter()
            .filter(|c| !c.is_invalid())
            .filter_map(Cell::as_real)
            .collect();
        let fill = self
            .strategy
            .aggregate(&valid)
            .ok_or_else(|| TransformError::EmptyColumn {
                column: column.name().to_string(),
            })?;

        let cells = column
            .cells()
            .iter()
            .map(|c| if c.is_invalid() { Cell::Real(fill) } else { c.clone() })
            .collect();
        Ok(Column::new(column.name(), cells))
    }
}

/// Imputer transformer.
#[derive(Clone, Debug, Default)]
pub struct Imputer {
    config: ImputerConfig,
    fitted: Option<FittedImputer>,
}

impl Imputer {
    /// Create a new Imputer with the specified strategy.
    pub fn new(strategy: ImputeStrategy) -> Self {
        Self::with_config(ImputerConfig { strategy })
    }

    pub fn with_config(config: ImputerConfig) -> Self {
        Self {
            config,
            fitted: None,
        }
    }

    pub fn config(&self) -> &ImputerConfig {
        &self.config
    }

    pub fn fitted(&self) -> Option<&FittedImputer> {
        self.fitted.as_ref()
    }
}

impl Transformer for Imputer {
    fn kind(&self) -> TransformerKind {
        TransformerKind::Imputer
    }

    fn fit(&mut self, _data: &Data, _labels: Option<&Column>) -> Result<()> {
        self.fitted = Some(FittedImputer {
            strategy: self.config.strategy,
        });
        Ok(())
    }

    fn transform(&self, data: &Data) -> Result<Table> {
        let fitted = self.fitted.as_ref().ok_or(TransformError::NotFitted {
            kind: self.kind(),
        })?;
        debug!(strategy = ?fitted.strategy, shape = %data.describe(), "imputing");
        match data {
            Data::Table(table) => fitted.impute(table),
            Data::Series(_) => fitted.impute(&data.to_table()),
        }
    }

    fn create(&self, overrides: &Options) -> Result<Box<dyn Transformer>> {
        let config = merge_config(&self.kind(), &self.config, overrides)?;
        Ok(Box::new(Imputer::with_config(config)))
    }

    fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }
}
