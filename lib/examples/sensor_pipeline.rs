//! Summarize gappy sensor series and prepare them for a downstream model.
//!
//! This example demonstrates:
//! - Turning each station's series into one feature row with a Statifier
//! - Building fresh configured transformers from a prototype
//! - Imputing undefined statistics and one-hot encoding the station region
//!
//! Run with `RUST_LOG=featpipe=debug` to see per-stage progress.

use featpipe::dataset::{Cell, Column, Data, Series, Table};
use featpipe::preprocessing::{
    create_transformer, ImputeStrategy, Imputer, OneHotEncoder, Options, Pipeline, Statifier,
    Transformer,
};
use std::error::Error;

const REGIONS: [&str; 3] = ["coast", "valley", "ridge"];

/// Hourly temperature for one station.
///
/// Station `k` drops a run of `k + 1` samples every `12 + 3k` hours; station
/// 0 has no gaps at all.
fn station_series(station: usize, hours: usize) -> Series {
    let period = 12 + 3 * station;
    (0..hours)
        .map(|h| {
            let in_gap = station > 0 && h % period < station + 1;
            if in_gap {
                None
            } else {
                let t = h as f64;
                let base = 10.0 + 2.0 * station as f64;
                Some(base + 4.0 * (t * std::f64::consts::TAU / 24.0).sin())
            }
        })
        .collect()
}

/// Stack single-row feature tables under a region column.
fn stack_rows(regions: Vec<&str>, rows: &[Table]) -> Result<Table, Box<dyn Error>> {
    let mut columns = vec![Column::from_texts("region", regions)];
    if let Some(first) = rows.first() {
        for (index, name) in first.column_names().into_iter().enumerate() {
            let cells: Vec<Cell> = rows
                .iter()
                .map(|row| row.column(index).map_or(Cell::Missing, |c| c.cells()[0].clone()))
                .collect();
            columns.push(Column::new(name, cells));
        }
    }
    Ok(Table::new(columns)?)
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "featpipe=info".into()),
        )
        .init();

    println!("=== Gappy Sensor Feature Pipeline ===\n");

    // 1. Configure the feature extractor once, then create per-station instances
    let prototype = Statifier::new();
    let mut overrides = Options::new();
    overrides.insert("max_lag".to_string(), 12.into());

    let n_stations = 5;
    let mut rows = Vec::with_capacity(n_stations);
    let mut regions = Vec::with_capacity(n_stations);
    for station in 0..n_stations {
        let series = station_series(station, 96);
        println!(
            "Station {}: {} samples, {} missing",
            station,
            series.len(),
            series.n_missing()
        );

        let mut statifier = create_transformer(&prototype, &overrides)?;
        rows.push(statifier.fit_transform(&Data::from(series), None)?);
        regions.push(REGIONS[station % REGIONS.len()]);
    }

    // 2. One row per station; the gap-free station has NaN missing-block stats
    let features = stack_rows(regions, &rows)?;
    println!("\nFeature table: {:?}", features.shape());
    println!("Columns: {:?}", features.column_names());

    // 3. Fill undefined statistics, then encode the region
    let mut pipeline = Pipeline::new(vec![
        Box::new(Imputer::new(ImputeStrategy::Constant(0.0))),
        Box::new(OneHotEncoder::new()),
    ]);
    let prepared = pipeline.fit_transform(&Data::from(features), None)?;

    println!("\nPrepared table: {:?}", prepared.shape());
    for row in 0..prepared.n_rows() {
        let bmean = prepared
            .column_by_name("bmean")
            .and_then(|c| c.cells()[row].as_real())
            .unwrap_or(f64::NAN);
        let autocor = prepared
            .column_by_name("autocor")
            .and_then(|c| c.cells()[row].as_real())
            .unwrap_or(f64::NAN);
        println!(
            "  station {}: mean gap {:.1}, autocorrelation energy {:.3}",
            row, bmean, autocor
        );
    }

    Ok(())
}
