//! One-hot encoding for nominal columns.
//!
//! Expands every nominal (non-numeric) column of a table into one indicator
//! column per category, keeping numeric columns as they are.

use crate::dataset::{Cell, Column, Data, Table};
use crate::preprocessing::config::{merge_config, Options};
use crate::preprocessing::error::{Result, TransformError};
use crate::preprocessing::traits::{Transformer, TransformerKind};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, warn};

/// Configuration for [`OneHotEncoder`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OneHotEncoderConfig {
    /// Indices of the nominal columns. Auto-detected when `None`.
    pub nominal_columns: Option<Vec<usize>>,
    /// Category list per nominal column. Observed at fit time when absent.
    /// Every key must be a nominal column.
    pub nominal_column_values_map: Option<BTreeMap<usize, Vec<String>>>,
}

/// A category seen at transform time that was not fitted.
#[derive(Clone, Debug, PartialEq)]
pub struct UnknownCategory {
    /// Name of the nominal column.
    pub column: String,
    /// Row index of the occurrence.
    pub row: usize,
    /// The unknown value.
    pub value: String,
    /// The fitted category it was encoded as.
    pub replacement: String,
}

/// One-hot encoder for nominal table columns.
///
/// # Example
/// ```rust
/// use featpipe::dataset::{Column, Data, Table};
/// use featpipe::preprocessing::{OneHotEncoder, Transformer};
///
/// let table = Table::new(vec![
///     Column::from_texts("color", vec!["a", "b", "c"]),
///     Column::from_reals("size", vec![1.0, 2.0, 3.0]),
/// ])
/// .unwrap();
/// let data = Data::from(table);
///
/// let mut encoder = OneHotEncoder::new();
/// let encoded = encoder.fit_transform(&data, None).unwrap();
/// assert_eq!(encoded.column_names(), vec!["size", "color_a", "color_b", "color_c"]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct OneHotEncoder {
    config: OneHotEncoderConfig,
    fitted: Option<FittedOneHotEncoder>,
}

impl OneHotEncoder {
    /// Create a OneHotEncoder that detects nominal columns and categories.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a OneHotEncoder from an explicit configuration.
    pub fn with_config(config: OneHotEncoderConfig) -> Self {
        Self {
            config,
            fitted: None,
        }
    }

    /// Fix the nominal column indices.
    pub fn with_nominal_columns(mut self, columns: Vec<usize>) -> Self {
        self.config.nominal_columns = Some(columns);
        self
    }

    /// Fix the category list of one nominal column.
    pub fn with_categories<S: Into<String>>(mut self, column: usize, categories: Vec<S>) -> Self {
        self.config
            .nominal_column_values_map
            .get_or_insert_with(BTreeMap::new)
            .insert(column, categories.into_iter().map(Into::into).collect());
        self
    }

    pub fn config(&self) -> &OneHotEncoderConfig {
        &self.config
    }

    /// Fitted state, if any.
    pub fn fitted(&self) -> Option<&FittedOneHotEncoder> {
        self.fitted.as_ref()
    }

    fn expect_table<'a>(&self, data: &'a Data) -> Result<&'a Table> {
        match data {
            Data::Table(t) => Ok(t),
            other => Err(TransformError::shape(&self.kind(), "a table", other.describe())),
        }
    }

    fn invalid(&self, message: String) -> TransformError {
        TransformError::InvalidConfig {
            kind: self.kind(),
            message,
        }
    }

    fn fit_table(&self, table: &Table) -> Result<FittedOneHotEncoder> {
        let (rows, cols) = table.shape();
        if rows == 0 {
            return Err(TransformError::EmptyData(
                "Cannot fit OneHotEncoder on a table with no rows".to_string(),
            ));
        }

        let mut nominal_columns = match &self.config.nominal_columns {
            Some(columns) => {
                if let Some(&bad) = columns.iter().find(|&&c| c >= cols) {
                    return Err(self.invalid(format!(
                        "nominal column {} out of range for {} columns",
                        bad, cols
                    )));
                }
                columns.clone()
            }
            None => table
                .columns()
                .iter()
                .enumerate()
                .filter(|(_, c)| !c.is_real_valued())
                .map(|(i, _)| i)
                .collect(),
        };
        nominal_columns.sort_unstable();
        nominal_columns.dedup();

        if let Some(map) = &self.config.nominal_column_values_map {
            let stray = map
                .keys()
                .find(|&&k| nominal_columns.binary_search(&k).is_err());
            if let Some(stray) = stray {
                return Err(self.invalid(format!(
                    "category list given for column {}, which is not nominal",
                    stray
                )));
            }
        }

        let mut categories = BTreeMap::new();
        for &index in &nominal_columns {
            let column = &table.columns()[index];
            let configured = self
                .config
                .nominal_column_values_map
                .as_ref()
                .and_then(|m| m.get(&index));
            let values = match configured {
                Some(values) if values.is_empty() => {
                    return Err(self.invalid(format!(
                        "empty category list for column {}",
                        index
                    )));
                }
                Some(values) => values.clone(),
                None => observed_categories(column),
            };
            if values.is_empty() {
                return Err(TransformError::EmptyColumn {
                    column: column.name().to_string(),
                });
            }
            categories.insert(index, values);
        }

        let fitted = FittedOneHotEncoder {
            nominal_columns,
            categories,
            n_features_in: cols,
        };
        fitted.check_output_names(table)?;
        Ok(fitted)
    }
}

/// Distinct non-missing values in first-seen order.
fn observed_categories(column: &Column) -> Vec<String> {
    let mut seen = HashSet::new();
    column
        .cells()
        .iter()
        .filter_map(Cell::category_key)
        .filter(|key| seen.insert(key.clone()))
        .collect()
}

fn indicator_name(column: &str, category: &str) -> String {
    format!("{}_{}", column, category)
}

/// Fitted state of a [`OneHotEncoder`].
#[derive(Clone, Debug, PartialEq)]
pub struct FittedOneHotEncoder {
    /// Ascending indices of the nominal columns.
    nominal_columns: Vec<usize>,
    /// Ordered categories per nominal column.
    categories: BTreeMap<usize, Vec<String>>,
    /// Number of columns seen during fit.
    n_features_in: usize,
}

impl FittedOneHotEncoder {
    pub fn nominal_columns(&self) -> &[usize] {
        &self.nominal_columns
    }

    /// Categories learned for each nominal column.
    pub fn categories(&self) -> &BTreeMap<usize, Vec<String>> {
        &self.categories
    }

    pub fn n_features_in(&self) -> usize {
        self.n_features_in
    }

    /// Number of output columns: numeric columns plus all indicators.
    pub fn n_features_out(&self) -> usize {
        let n_indicators: usize = self.categories.values().map(Vec::len).sum();
        self.n_features_in - self.nominal_columns.len() + n_indicators
    }

    /// Fail if two output columns of `table` would share a name.
    fn check_output_names(&self, table: &Table) -> Result<()> {
        let columns = table.columns();
        let numeric = columns
            .iter()
            .enumerate()
            .filter(|(i, _)| !self.categories.contains_key(i))
            .map(|(_, c)| c.name().to_string());
        let indicators = self.categories.iter().flat_map(|(&index, cats)| {
            let name = columns[index].name();
            cats.iter().map(move |cat| indicator_name(name, cat))
        });

        let mut seen = HashSet::new();
        for name in numeric.chain(indicators) {
            if !seen.insert(name.clone()) {
                return Err(TransformError::InvalidConfig {
                    kind: TransformerKind::OneHotEncoder,
                    message: format!("output column '{}' would appear twice", name),
                });
            }
        }
        Ok(())
    }

    /// Encode `table`, returning the encoded table and every unknown
    /// category occurrence that was patched to its column's first category.
    ///
    /// # Errors
    /// Returns [`TransformError::FeatureMismatch`] if the column count
    /// differs from the one seen during fit, and
    /// [`TransformError::InvalidConfig`] if an indicator name collides with
    /// another output column.
    pub fn encode(&self, table: &Table) -> Result<(Table, Vec<UnknownCategory>)> {
        let (rows, cols) = table.shape();
        if cols != self.n_features_in {
            return Err(TransformError::FeatureMismatch {
                expected: self.n_features_in,
                got: cols,
            });
        }
        self.check_output_names(table)?;

        let mut output: Vec<Column> = table
            .columns()
            .iter()
            .enumerate()
            .filter(|(i, _)| !self.categories.contains_key(i))
            .map(|(_, c)| c.clone())
            .collect();
        let mut unknown = Vec::new();

        for (&index, cats) in &self.categories {
            let column = &table.columns()[index];
            let mut indicators = vec![vec![0.0; rows]; cats.len()];

            for (row, cell) in column.cells().iter().enumerate() {
                let Some(key) = cell.category_key() else {
                    continue;
                };
                let position = match cats.iter().position(|c| *c == key) {
                    Some(position) => position,
                    None => {
                        unknown.push(UnknownCategory {
                            column: column.name().to_string(),
                            row,
                            value: key,
                            replacement: cats[0].clone(),
                        });
                        0
                    }
                };
                indicators[position][row] = 1.0;
            }

            output.extend(
                cats.iter()
                    .zip(indicators)
                    .map(|(cat, values)| {
                        Column::from_reals(indicator_name(column.name(), cat), values)
                    }),
            );
        }

        Ok((Table::new(output)?, unknown))
    }
}

impl Transformer for OneHotEncoder {
    fn kind(&self) -> TransformerKind {
        TransformerKind::OneHotEncoder
    }

    fn fit(&mut self, data: &Data, _labels: Option<&Column>) -> Result<()> {
        self.fitted = None;
        let table = self.expect_table(data)?;
        let fitted = self.fit_table(table)?;
        debug!(
            nominal = ?fitted.nominal_columns,
            n_features_out = fitted.n_features_out(),
            "fitted one-hot encoder"
        );
        self.fitted = Some(fitted);
        Ok(())
    }

    fn transform(&self, data: &Data) -> Result<Table> {
        let fitted = self.fitted.as_ref().ok_or(TransformError::NotFitted {
            kind: self.kind(),
        })?;
        let table = self.expect_table(data)?;
        let (encoded, unknown) = fitted.encode(table)?;
        for u in &unknown {
            warn!(
                column = %u.column,
                row = u.row,
                value = %u.value,
                replacement = %u.replacement,
                "unknown category patched to first fitted category"
            );
        }
        Ok(encoded)
    }

    fn create(&self, overrides: &Options) -> Result<Box<dyn Transformer>> {
        let config = merge_config(&self.kind(), &self.config, overrides)?;
        Ok(Box::new(OneHotEncoder::with_config(config)))
    }

    fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }
}
