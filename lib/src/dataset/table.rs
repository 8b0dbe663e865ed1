//! Column-oriented tabular dataset.

use crate::dataset::Cell;
use crate::preprocessing::error::{Result, TransformError};
use serde::{Deserialize, Serialize};

/// A named column of cells.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Column {
    name: String,
    cells: Vec<Cell>,
}

impl Column {
    /// Create a column from cells.
    pub fn new(name: impl Into<String>, cells: Vec<Cell>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }

    /// Create a numeric column. NaN values are kept as `Cell::Real(NaN)`.
    pub fn from_reals(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self::new(name, values.into_iter().map(Cell::Real).collect())
    }

    /// Create a categorical column.
    pub fn from_texts<S: Into<String>>(name: impl Into<String>, values: Vec<S>) -> Self {
        Self::new(name, values.into_iter().map(|s| Cell::Text(s.into())).collect())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether every cell is missing or representable as a real number.
    pub fn is_real_valued(&self) -> bool {
        self.cells
            .iter()
            .all(|c| c.is_missing() || c.as_real().is_some())
    }

    /// Numeric values of the column, `None` where the cell is not a real.
    pub fn reals(&self) -> Vec<Option<f64>> {
        self.cells.iter().map(Cell::as_real).collect()
    }

    /// Consume the column, returning its cells.
    pub fn into_cells(self) -> Vec<Cell> {
        self.cells
    }
}

/// An ordered sequence of equally long named columns.
///
/// Deserialization goes through [`Table::new`], so ragged input is rejected.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TableColumns")]
pub struct Table {
    columns: Vec<Column>,
    n_rows: usize,
}

/// Serialized form of a [`Table`]; the row count is recomputed.
#[derive(Deserialize)]
struct TableColumns {
    columns: Vec<Column>,
}

impl TryFrom<TableColumns> for Table {
    type Error = TransformError;

    fn try_from(raw: TableColumns) -> Result<Self> {
        Table::new(raw.columns)
    }
}

impl Table {
    /// Create a table, checking that all columns have the same length.
    ///
    /// # Errors
    /// Returns [`TransformError::Shape`] if the columns are ragged.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let n_rows = columns.first().map_or(0, Column::len);
        if let Some(bad) = columns.iter().find(|c| c.len() != n_rows) {
            return Err(TransformError::Shape {
                context: "Table".to_string(),
                expected: format!("columns of length {}", n_rows),
                got: format!("column '{}' of length {}", bad.name(), bad.len()),
            });
        }
        Ok(Self { columns, n_rows })
    }

    /// A table with no columns and no rows.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A table with a single column.
    pub fn from_column(column: Column) -> Self {
        let n_rows = column.len();
        Self {
            columns: vec![column],
            n_rows,
        }
    }

    /// A one-row numeric table with the given column names.
    pub fn single_row(names: &[&str], values: &[f64]) -> Result<Self> {
        if names.len() != values.len() {
            return Err(TransformError::Shape {
                context: "Table".to_string(),
                expected: format!("{} values", names.len()),
                got: format!("{} values", values.len()),
            });
        }
        let columns = names
            .iter()
            .zip(values)
            .map(|(name, &v)| Column::from_reals(*name, vec![v]))
            .collect();
        Ok(Self { columns, n_rows: 1 })
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    /// `(rows, columns)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows, self.columns.len())
    }

    /// Whether the table has no columns or no rows.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() || self.n_rows == 0
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    pub fn column_by_name(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    /// Cells of one row, in column order.
    pub fn row(&self, index: usize) -> Option<Vec<&Cell>> {
        if index >= self.n_rows {
            return None;
        }
        Some(self.columns.iter().map(|c| &c.cells()[index]).collect())
    }

    /// Numeric value at `(row, column)`, if representable.
    pub fn real_at(&self, row: usize, column: usize) -> Option<f64> {
        self.columns
            .get(column)
            .and_then(|c| c.cells().get(row))
            .and_then(Cell::as_real)
    }

    /// Consume the table, returning its columns.
    pub fn into_columns(self) -> Vec<Column> {
        self.columns
    }
}
