//! In-memory data model shared by every transformer.
//!
//! Transformers exchange two shapes of data:
//!
//! - [`Table`]: an ordered sequence of named [`Column`]s, each holding
//!   [`Cell`]s that are numeric, categorical or explicitly missing.
//! - [`Series`]: one time-ordered numeric signal where every entry carries
//!   an explicit missing tag.
//!
//! [`Data`] is the sum of the two and is what `fit`/`transform` accept; each
//! transformer documents which variant it expects.
//!
//! # Example
//!
//! ```rust
//! use featpipe::dataset::{Cell, Column, Data, Series, Table};
//!
//! let table = Table::new(vec![
//!     Column::new("city", vec![Cell::from("oslo"), Cell::from("rome")]),
//!     Column::from_reals("temp", vec![4.5, 19.0]),
//! ])
//! .unwrap();
//! assert_eq!(table.shape(), (2, 2));
//!
//! let series = Series::from(vec![1.0, f64::NAN, 3.0]);
//! assert_eq!(series.n_missing(), 1);
//!
//! let data: Data = series.into();
//! assert_eq!(data.shape_name(), "series");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

pub mod series;
pub mod table;

pub use self::series::Series;
pub use self::table::{Column, Table};

/// A single value in a [`Table`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    /// A real number. NaN is allowed and counts as invalid for imputation.
    Real(f64),
    /// A categorical or free-form value.
    Text(String),
    /// No value.
    Missing,
}

impl Cell {
    /// Returns the numeric value when the cell is representable as a real number.
    ///
    /// `Text` cells that parse as `f64` are representable; `Missing` is not.
    pub fn as_real(&self) -> Option<f64> {
        match self {
            Cell::Real(v) => Some(*v),
            Cell::Text(s) => s.trim().parse::<f64>().ok(),
            Cell::Missing => None,
        }
    }

    /// Whether this cell is the explicit missing marker.
    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    /// Whether the cell is missing or holds a not-a-number value.
    pub fn is_invalid(&self) -> bool {
        match self {
            Cell::Missing => true,
            other => other.as_real().is_some_and(f64::is_nan),
        }
    }

    /// Key used to compare cells as categories. `None` for missing cells.
    pub fn category_key(&self) -> Option<String> {
        match self {
            Cell::Missing => None,
            Cell::Text(s) => Some(s.clone()),
            Cell::Real(v) => Some(v.to_string()),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Real(v) => write!(f, "{}", v),
            Cell::Text(s) => write!(f, "{}", s),
            Cell::Missing => write!(f, "missing"),
        }
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        Cell::Real(v)
    }
}

impl From<Option<f64>> for Cell {
    fn from(v: Option<f64>) -> Self {
        v.map_or(Cell::Missing, Cell::Real)
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

/// Input handed to a transformer's `fit` and `transform`.
#[derive(Clone, Debug, PartialEq)]
pub enum Data {
    /// A single numeric sequence.
    Series(Series),
    /// A tabular dataset.
    Table(Table),
}

impl Data {
    /// Short name of the variant, used in shape error messages.
    pub fn shape_name(&self) -> &'static str {
        match self {
            Data::Series(_) => "series",
            Data::Table(_) => "table",
        }
    }

    /// Describes the dimensions of the data for diagnostics.
    pub fn describe(&self) -> String {
        match self {
            Data::Series(s) => format!("series of length {}", s.len()),
            Data::Table(t) => format!("table of shape {:?}", t.shape()),
        }
    }

    /// Whether the data holds no values.
    pub fn is_empty(&self) -> bool {
        match self {
            Data::Series(s) => s.is_empty(),
            Data::Table(t) => t.is_empty(),
        }
    }

    /// Number of observations: series length or table rows.
    pub fn n_rows(&self) -> usize {
        match self {
            Data::Series(s) => s.len(),
            Data::Table(t) => t.n_rows(),
        }
    }

    /// Views the data as a table. A series becomes one column named `value`.
    pub fn to_table(&self) -> Table {
        match self {
            Data::Series(s) => s.to_table(Series::DEFAULT_COLUMN),
            Data::Table(t) => t.clone(),
        }
    }

    /// Consuming variant of [`Data::to_table`].
    pub fn into_table(self) -> Table {
        match self {
            Data::Series(s) => s.to_table(Series::DEFAULT_COLUMN),
            Data::Table(t) => t,
        }
    }
}

impl From<Series> for Data {
    fn from(series: Series) -> Self {
        Data::Series(series)
    }
}

impl From<Table> for Data {
    fn from(table: Table) -> Self {
        Data::Table(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_as_real() {
        assert_eq!(Cell::Real(2.5).as_real(), Some(2.5));
        assert_eq!(Cell::from(" 3.0 ").as_real(), Some(3.0));
        assert_eq!(Cell::from("abc").as_real(), None);
        assert_eq!(Cell::Missing.as_real(), None);
    }

    #[test]
    fn test_cell_is_invalid() {
        assert!(Cell::Missing.is_invalid());
        assert!(Cell::Real(f64::NAN).is_invalid());
        assert!(!Cell::Real(0.0).is_invalid());
        assert!(!Cell::from("x").is_invalid());
    }

    #[test]
    fn test_cell_category_key() {
        assert_eq!(Cell::from("a").category_key(), Some("a".to_string()));
        assert_eq!(Cell::Real(1.0).category_key(), Some("1".to_string()));
        assert_eq!(Cell::Missing.category_key(), None);
    }

    #[test]
    fn test_cell_from_option() {
        assert_eq!(Cell::from(Some(1.0)), Cell::Real(1.0));
        assert_eq!(Cell::from(None::<f64>), Cell::Missing);
    }

    #[test]
    fn test_data_series_to_table() {
        let data = Data::from(Series::new(vec![Some(1.0), None]));
        let table = data.to_table();
        assert_eq!(table.shape(), (2, 1));
        assert_eq!(table.column_names(), vec!["value"]);
        assert_eq!(table.column(0).unwrap().cells()[1], Cell::Missing);
    }

    #[test]
    fn test_data_shape_name() {
        assert_eq!(Data::from(Table::empty()).shape_name(), "table");
        assert_eq!(Data::from(Series::default()).shape_name(), "series");
        assert!(Data::from(Series::default()).is_empty());
    }
}
