//! Numeric sequences with explicit missing tags.

use crate::dataset::{Cell, Column, Table};
use serde::{Deserialize, Serialize};

/// One time-ordered numeric signal. `None` marks a missing sample.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Series {
    values: Vec<Option<f64>>,
}

impl Series {
    /// Column name used when a series is viewed as a table.
    pub const DEFAULT_COLUMN: &'static str = "value";

    /// Create a series from tagged values. `Some(NaN)` is stored as missing.
    pub fn new(values: Vec<Option<f64>>) -> Self {
        let values = values
            .into_iter()
            .map(|v| v.filter(|x| !x.is_nan()))
            .collect();
        Self { values }
    }

    /// Number of samples, missing ones included.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the series has no samples at all.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// All samples in order.
    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    /// The present samples in order, missing entries filtered out.
    pub fn valid_values(&self) -> Vec<f64> {
        self.values.iter().flatten().copied().collect()
    }

    /// Per-sample missing tags.
    pub fn missing_mask(&self) -> Vec<bool> {
        self.values.iter().map(Option::is_none).collect()
    }

    /// Number of missing samples.
    pub fn n_missing(&self) -> usize {
        self.values.iter().filter(|v| v.is_none()).count()
    }

    /// One-column table holding the samples.
    pub fn to_table(&self, name: &str) -> Table {
        let cells = self.values.iter().map(|&v| Cell::from(v)).collect();
        Table::from_column(Column::new(name, cells))
    }
}

/// NaN samples become missing.
impl From<Vec<f64>> for Series {
    fn from(values: Vec<f64>) -> Self {
        values.into_iter().map(Some).collect()
    }
}

impl From<Vec<Option<f64>>> for Series {
    fn from(values: Vec<Option<f64>>) -> Self {
        Self::new(values)
    }
}

impl FromIterator<Option<f64>> for Series {
    fn from_iter<I: IntoIterator<Item = Option<f64>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
