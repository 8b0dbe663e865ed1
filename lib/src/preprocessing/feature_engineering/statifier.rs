//! Statistical feature extraction for a single gappy time series.
//!
//! The [`Statifier`] summarizes one [`Series`] as a single-row table made of
//! three blocks:
//!
//! | Block | Columns |
//! |-------|---------|
//! | quantile | `median, mean, q25, q75` |
//! | shape/dependency | `kurtosis, skewness, variation, entropy, autocor, pacf` |
//! | missing-block | `bmedian, bmean, bq25, bq75` |
//!
//! The first two blocks are computed over the present samples. The last one
//! describes the sizes of the gaps: the series' missing tags are run-length
//! encoded and the quantile statistics are taken over the lengths of the
//! missing runs. A series without gaps has no runs and the block is NaN.
//!
//! # Example
//! ```rust
//! use featpipe::dataset::{Data, Series};
//! use featpipe::preprocessing::{Statifier, Transformer};
//!
//! let series = Series::new(vec![Some(1.0), None, None, Some(4.0), Some(2.0)]);
//! let data = Data::from(series);
//!
//! let mut statifier = Statifier::new();
//! let row = statifier.fit_transform(&data, None).unwrap();
//! assert_eq!(row.real_at(0, row.n_cols() - 3), Some(2.0)); // bmean
//! ```

use crate::dataset::{Column, Data, Series, Table};
use crate::preprocessing::config::{merge_config, Options};
use crate::preprocessing::error::{Result, TransformError};
use crate::preprocessing::feature_engineering::correlation::{
    autocorrelation, energy, partial_autocorrelation,
};
use crate::preprocessing::feature_engineering::runs::missing_block_lengths;
use crate::preprocessing::feature_engineering::stats::{self, QuantileStats};
use crate::preprocessing::traits::{Transformer, TransformerKind};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Column names of the quantile block.
pub const QUANTILE_COLUMNS: [&str; 4] = ["median", "mean", "q25", "q75"];
/// Column names of the shape/dependency block.
pub const SHAPE_COLUMNS: [&str; 6] = [
    "kurtosis",
    "skewness",
    "variation",
    "entropy",
    "autocor",
    "pacf",
];
/// Column names of the missing-block block.
pub const BLOCK_COLUMNS: [&str; 4] = ["bmedian", "bmean", "bq25", "bq75"];

/// Configuration for [`Statifier`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatifierConfig {
    /// Include the missing-block statistics in the output row.
    pub processmissing: bool,
    /// Upper bound of the lag window used by the dependency energies.
    pub max_lag: usize,
}

impl Default for StatifierConfig {
    fn default() -> Self {
        Self {
            processmissing: true,
            max_lag: 24,
        }
    }
}

/// Shape and dependency statistics of the present samples.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShapeStats {
    /// Excess kurtosis.
    pub kurtosis: f64,
    pub skewness: f64,
    /// Coefficient of variation.
    pub variation: f64,
    /// Standard error of the mean. Not part of the output row.
    pub sem: f64,
    /// Shannon entropy of the value distribution.
    pub entropy: f64,
    /// Autocorrelation energy.
    pub autocor: f64,
    /// Partial-autocorrelation energy.
    pub pacf: f64,
}

impl ShapeStats {
    /// Compute the block over `values` with lags bounded by `max_lag`.
    pub fn compute(values: &[f64], max_lag: usize) -> Self {
        Self {
            kurtosis: stats::kurtosis(values),
            skewness: stats::skewness(values),
            variation: stats::variation(values),
            sem: stats::sem(values),
            entropy: stats::entropy(values),
            autocor: energy(&autocorrelation(values, max_lag)),
            pacf: energy(&partial_autocorrelation(values, max_lag)),
        }
    }

    /// Values in row order, matching [`SHAPE_COLUMNS`].
    pub fn to_array(&self) -> [f64; 6] {
        [
            self.kurtosis,
            self.skewness,
            self.variation,
            self.entropy,
            self.autocor,
            self.pacf,
        ]
    }
}

/// Typed result of summarizing one series.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeatureSummary {
    pub quantiles: QuantileStats,
    pub shape: ShapeStats,
    /// Quantile statistics of the missing-run lengths; `None` when
    /// `processmissing` is off.
    pub blocks: Option<QuantileStats>,
}

impl FeatureSummary {
    /// Output column names in row order.
    pub fn column_names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = QUANTILE_COLUMNS.to_vec();
        names.extend(SHAPE_COLUMNS);
        if self.blocks.is_some() {
            names.extend(BLOCK_COLUMNS);
        }
        names
    }

    /// Output values in row order.
    pub fn values(&self) -> Vec<f64> {
        let mut values = self.quantiles.to_array().to_vec();
        values.extend(self.shape.to_array());
        if let Some(blocks) = &self.blocks {
            values.extend(blocks.to_array());
        }
        values
    }

    /// Flatten into a single-row table.
    pub fn to_table(&self) -> Result<Table> {
        Table::single_row(&self.column_names(), &self.values())
    }
}

/// Summarize `series` under `config`.
fn summarize_with(config: &StatifierConfig, series: &Series) -> FeatureSummary {
    let values = series.valid_values();
    let blocks = config.processmissing.then(|| {
        let lengths: Vec<f64> = missing_block_lengths(series)
            .into_iter()
            .map(|len| len as f64)
            .collect();
        QuantileStats::compute(&lengths)
    });

    FeatureSummary {
        quantiles: QuantileStats::compute(&values),
        shape: ShapeStats::compute(&values, config.max_lag),
        blocks,
    }
}

/// Fitted state of a [`Statifier`]: the configuration in effect.
#[derive(Clone, Debug, PartialEq)]
pub struct FittedStatifier {
    config: StatifierConfig,
}

impl FittedStatifier {
    pub fn config(&self) -> &StatifierConfig {
        &self.config
    }
}

/// Feature-row extractor for a single [`Series`].
#[derive(Clone, Debug, Default)]
pub struct Statifier {
    config: StatifierConfig,
    fitted: Option<FittedStatifier>,
}

impl Statifier {
    /// Create a Statifier with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a Statifier from an explicit configuration.
    pub fn with_config(config: StatifierConfig) -> Self {
        Self {
            config,
            fitted: None,
        }
    }

    /// Set whether missing-block statistics are emitted.
    pub fn with_processmissing(mut self, processmissing: bool) -> Self {
        self.config.processmissing = processmissing;
        self
    }

    /// Set the upper bound of the lag window.
    pub fn with_max_lag(mut self, max_lag: usize) -> Self {
        self.config.max_lag = max_lag;
        self
    }

    pub fn config(&self) -> &StatifierConfig {
        &self.config
    }

    /// Summarize `series` with this instance's configuration. Pure; does not
    /// need `fit`.
    pub fn summarize(&self, series: &Series) -> FeatureSummary {
        summarize_with(&self.config, series)
    }

    fn expect_series<'a>(&self, data: &'a Data) -> Result<&'a Series> {
        match data {
            Data::Series(s) => Ok(s),
            other => Err(TransformError::shape(
                &self.kind(),
                "a single numeric series",
                other.describe(),
            )),
        }
    }
}

impl Transformer for Statifier {
    fn kind(&self) -> TransformerKind {
        TransformerKind::Statifier
    }

    fn fit(&mut self, data: &Data, _labels: Option<&Column>) -> Result<()> {
        self.fitted = None;
        self.expect_series(data)?;
        self.fitted = Some(FittedStatifier {
            config: self.config.clone(),
        });
        Ok(())
    }

    fn transform(&self, data: &Data) -> Result<Table> {
        let fitted = self.fitted.as_ref().ok_or(TransformError::NotFitted {
            kind: self.kind(),
        })?;
        let series = self.expect_series(data)?;
        if series.is_empty() {
            return Ok(Table::empty());
        }

        debug!(
            len = series.len(),
            missing = series.n_missing(),
            processmissing = fitted.config.processmissing,
            "statifying series"
        );
        summarize_with(&fitted.config, series).to_table()
    }

    fn create(&self, overrides: &Options) -> Result<Box<dyn Transformer>> {
        let config = merge_config(&self.kind(), &self.config, overrides)?;
        Ok(Box::new(Statifier::with_config(config)))
    }

    fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Cell;
    use proptest::prelude::*;

    const EPS: f64 = 1e-9;

    fn gappy() -> Series {
        Series::new(vec![
            None,
            Some(3.0),
            Some(7.0),
            Some(2.0),
            None,
            None,
            None,
            Some(4.0),
            Some(1.0),
            Some(5.0),
        ])
    }

    fn value(table: &Table, name: &str) -> f64 {
        table
            .column_by_name(name)
            .and_then(|c| c.cells()[0].as_real())
            .unwrap()
    }

    #[test]
    fn test_full_row_has_fourteen_named_columns() {
        let data = Data::from(gappy());
        let mut statifier = Statifier::new();
        let row = statifier.fit_transform(&data, None).unwrap();

        assert_eq!(row.shape(), (1, 14));
        let expected: Vec<&str> = QUANTILE_COLUMNS
            .iter()
            .chain(SHAPE_COLUMNS.iter())
            .chain(BLOCK_COLUMNS.iter())
            .copied()
            .collect();
        assert_eq!(row.column_names(), expected);
    }

    #[test]
    fn test_gappy_quantiles_and_blocks() {
        let data = Data::from(gappy());
        let mut statifier = Statifier::new();
        let row = statifier.fit_transform(&data, None).unwrap();

        // present values: 3, 7, 2, 4, 1, 5 -> sorted 1, 2, 3, 4, 5, 7
        assert!((value(&row, "median") - 3.5).abs() < EPS);
        assert!((value(&row, "mean") - 22.0 / 6.0).abs() < EPS);
        assert!((value(&row, "q25") - 2.25).abs() < EPS);
        assert!((value(&row, "q75") - 4.75).abs() < EPS);

        // gaps of length 1 and 3
        assert!((value(&row, "bmedian") - 2.0).abs() < EPS);
        assert!((value(&row, "bmean") - 2.0).abs() < EPS);
        assert!((value(&row, "bq25") - 1.5).abs() < EPS);
        assert!((value(&row, "bq75") - 2.5).abs() < EPS);
    }

    #[test]
    fn test_single_gap_block_stats_equal_gap_length() {
        let series = Series::new(vec![
            Some(3.0),
            Some(7.0),
            Some(2.0),
            None,
            None,
            None,
            Some(4.0),
            Some(1.0),
            Some(5.0),
        ]);
        let summary = Statifier::new().summarize(&series);
        assert_eq!(summary.blocks.unwrap().to_array(), [3.0; 4]);
    }

    #[test]
    fn test_tagged_nan_counts_as_gap() {
        let statifier = Statifier::new();
        let tagged = statifier.summarize(&Series::new(vec![
            Some(1.0),
            Some(f64::NAN),
            Some(3.0),
            Some(5.0),
        ]));
        let plain = statifier.summarize(&Series::from(vec![1.0, f64::NAN, 3.0, 5.0]));

        assert_eq!(format!("{:?}", tagged), format!("{:?}", plain));
        assert!((tagged.quantiles.median - 3.0).abs() < EPS);
        assert!((tagged.quantiles.mean - 3.0).abs() < EPS);
        assert!((tagged.blocks.unwrap().mean - 1.0).abs() < EPS);
    }

    #[test]
    fn test_reduced_row_has_ten_columns() {
        let data = Data::from(gappy());
        let mut statifier = Statifier::new().with_processmissing(false);
        let row = statifier.fit_transform(&data, None).unwrap();
        assert_eq!(row.shape(), (1, 10));
        assert!(row.column_by_name("bmean").is_none());
    }

    #[test]
    fn test_no_missing_gives_undefined_blocks() {
        let data = Data::from(Series::from(vec![1.0, 2.0, 3.0, 4.0]));
        let mut statifier = Statifier::new();
        let row = statifier.fit_transform(&data, None).unwrap();
        assert_eq!(row.n_cols(), 14);
        for name in BLOCK_COLUMNS {
            assert!(value(&row, name).is_nan(), "{} should be NaN", name);
        }
    }

    #[test]
    fn test_fit_rejects_table() {
        let table = Table::from_column(Column::from_reals("x", vec![1.0, 2.0]));
        let mut statifier = Statifier::new();
        let result = statifier.fit(&Data::from(table), None);
        assert!(matches!(result, Err(TransformError::Shape { .. })));
        assert!(!statifier.is_fitted());
    }

    #[test]
    fn test_transform_before_fit() {
        let statifier = Statifier::new();
        let result = statifier.transform(&Data::from(gappy()));
        assert!(matches!(result, Err(TransformError::NotFitted { .. })));
    }

    #[test]
    fn test_transform_empty_series_is_empty_table() {
        let mut statifier = Statifier::new();
        let empty = Data::from(Series::default());
        let row = statifier.fit_transform(&empty, None).unwrap();
        assert!(row.is_empty());
        assert_eq!(row.shape(), (0, 0));
    }

    #[test]
    fn test_all_missing_series() {
        let data = Data::from(Series::new(vec![None; 4]));
        let mut statifier = Statifier::new();
        let row = statifier.fit_transform(&data, None).unwrap();
        assert!(value(&row, "median").is_nan());
        assert!((value(&row, "bmean") - 4.0).abs() < EPS);
    }

    #[test]
    fn test_max_lag_limits_autocor_window() {
        let values: Vec<f64> = (0..60).map(|i| ((i % 7) as f64).sin()).collect();
        let series = Series::from(values.clone());
        let short = Statifier::new().with_max_lag(1).summarize(&series);
        let acf = autocorrelation(&values, 1);
        assert!((short.shape.autocor - acf[0].abs()).abs() < EPS);
    }

    #[test]
    fn test_transform_does_not_mutate_input() {
        let data = Data::from(gappy());
        let before = data.clone();
        let mut statifier = Statifier::new();
        statifier.fit_transform(&data, None).unwrap();
        assert_eq!(data, before);
    }

    #[test]
    fn test_create_with_overrides() {
        let proto = Statifier::new();
        let overrides = serde_json::json!({ "max_lag": 3 })
            .as_object()
            .cloned()
            .unwrap();
        let fresh = proto.create(&overrides).unwrap();
        assert_eq!(fresh.kind(), TransformerKind::Statifier);
        assert!(!fresh.is_fitted());
    }

    #[test]
    fn test_row_cells_are_real() {
        let data = Data::from(gappy());
        let mut statifier = Statifier::new();
        let row = statifier.fit_transform(&data, None).unwrap();
        assert!(row
            .columns()
            .iter()
            .all(|c| matches!(c.cells(), [Cell::Real(_)])));
    }

    fn tagged_series() -> impl Strategy<Value = Vec<Option<f64>>> {
        prop::collection::vec(prop::option::of(-100.0f64..100.0), 0..80)
    }

    proptest! {
        #[test]
        fn prop_row_width_depends_only_on_processmissing(values in tagged_series(), flag in any::<bool>()) {
            let data = Data::from(Series::new(values.clone()));
            let mut statifier = Statifier::new().with_processmissing(flag);
            let row = statifier.fit_transform(&data, None).unwrap();
            if values.is_empty() {
                prop_assert_eq!(row.n_cols(), 0);
            } else {
                prop_assert_eq!(row.n_rows(), 1);
                prop_assert_eq!(row.n_cols(), if flag { 14 } else { 10 });
            }
        }

        #[test]
        fn prop_block_stats_ignore_present_values(values in tagged_series(), shift in -50.0f64..50.0) {
            let original = Series::new(values.clone());
            let shifted = Series::new(values.iter().map(|v| v.map(|x| x + shift)).collect());
            let a = Statifier::new().summarize(&original).blocks.unwrap();
            let b = Statifier::new().summarize(&shifted).blocks.unwrap();
            for (x, y) in a.to_array().iter().zip(b.to_array().iter()) {
                prop_assert!((x.is_nan() && y.is_nan()) || (x - y).abs() < 1e-12);
            }
        }

        #[test]
        fn prop_no_gaps_means_undefined_blocks(values in prop::collection::vec(-100.0f64..100.0, 1..60)) {
            let summary = Statifier::new().summarize(&Series::from(values));
            prop_assert!(summary.blocks.unwrap().is_undefined());
        }
    }
}
