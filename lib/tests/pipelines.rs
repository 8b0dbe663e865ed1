//! End-to-end pipelines built only from the public API.

use featpipe::dataset::{Cell, Column, Data, Series, Table};
use featpipe::preprocessing::feature_engineering::{BLOCK_COLUMNS, QUANTILE_COLUMNS};
use featpipe::preprocessing::{
    create_transformer, ImputeStrategy, Imputer, OneHotEncoder, Options, Pipeline, Statifier,
    TransformError, Transformer, TransformerKind, Wrapper,
};
use serde_json::json;

fn opts(value: serde_json::Value) -> Options {
    value.as_object().cloned().unwrap()
}

fn visits() -> Table {
    Table::new(vec![
        Column::from_texts("city", vec!["oslo", "rome", "oslo", "lima"]),
        Column::new(
            "temp",
            vec![Cell::Real(4.0), Cell::Missing, Cell::Real(8.0), Cell::Real(f64::NAN)],
        ),
        Column::new(
            "stay",
            vec![Cell::from("3"), Cell::from("5"), Cell::Missing, Cell::from("5")],
        ),
    ])
    .unwrap()
}

fn column(table: &Table, name: &str) -> Vec<f64> {
    table
        .column_by_name(name)
        .unwrap()
        .cells()
        .iter()
        .map(|c| c.as_real().unwrap())
        .collect()
}

#[test]
fn impute_then_encode() {
    let data = Data::from(visits());
    let mut pipeline = Pipeline::new(vec![
        Box::new(Imputer::new(ImputeStrategy::MostFrequent)),
        Box::new(OneHotEncoder::new()),
    ]);

    let out = pipeline.fit_transform(&data, None).unwrap();
    assert_eq!(
        out.column_names(),
        vec!["temp", "stay", "city_oslo", "city_rome", "city_lima"]
    );
    assert_eq!(column(&out, "temp"), vec![4.0, 4.0, 8.0, 4.0]);
    assert_eq!(column(&out, "stay"), vec![3.0, 5.0, 5.0, 5.0]);
    assert_eq!(column(&out, "city_oslo"), vec![1.0, 0.0, 1.0, 0.0]);
    assert_eq!(column(&out, "city_lima"), vec![0.0, 0.0, 0.0, 1.0]);

    // unseen category falls back to the first fitted one
    let unseen = Table::new(vec![
        Column::from_texts("city", vec!["kyiv"]),
        Column::from_reals("temp", vec![1.0]),
        Column::from_reals("stay", vec![2.0]),
    ])
    .unwrap();
    let out = pipeline.transform(&Data::from(unseen)).unwrap();
    assert_eq!(column(&out, "city_oslo"), vec![1.0]);
}

#[test]
fn statifier_behind_wrapper_and_pipeline() {
    let series = Series::new(vec![
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
    ]);
    let data = Data::from(series);

    let mut direct = Statifier::new();
    let expected = direct.fit_transform(&data, None).unwrap();

    let mut pipeline = Pipeline::new(vec![Box::new(Wrapper::new(Box::new(Statifier::new())))]);
    let got = pipeline.fit_transform(&data, None).unwrap();
    assert_eq!(format!("{:?}", got), format!("{:?}", expected));

    assert_eq!(got.shape(), (1, 14));
    let names = got.column_names();
    assert_eq!(&names[..4], &QUANTILE_COLUMNS[..]);
    assert_eq!(&names[10..], &BLOCK_COLUMNS[..]);

    let bq25 = got.column_by_name("bq25").unwrap().cells()[0].as_real().unwrap();
    let bq75 = got.column_by_name("bq75").unwrap().cells()[0].as_real().unwrap();
    assert!((bq25 - 1.5).abs() < 1e-12);
    assert!((bq75 - 2.5).abs() < 1e-12);
}

#[test]
fn statifier_rejects_tabular_stage_output() {
    let data = Data::from(Series::new(vec![Some(1.0), None, Some(3.0)]));
    let mut pipeline = Pipeline::new(vec![
        Box::new(Imputer::default()),
        Box::new(Statifier::new()),
    ]);

    let err = pipeline.fit(&data, None).unwrap_err();
    match err {
        TransformError::Stage { index, kind, .. } => {
            assert_eq!(index, 1);
            assert_eq!(kind, TransformerKind::Statifier);
        }
        other => panic!("expected a stage error, got {:?}", other),
    }
    assert!(!pipeline.is_fitted());
}

#[test]
fn nested_pipelines_with_overrides() {
    let inner = Pipeline::new(vec![Box::new(Statifier::new())]);
    let outer = Pipeline::with_args(
        vec![Box::new(inner)],
        vec![opts(json!({
            "transformer_args": [{ "processmissing": false, "max_lag": 4 }]
        }))],
    )
    .unwrap();

    let mut fresh = create_transformer(&outer, &Options::new()).unwrap();
    let data = Data::from(Series::from(vec![1.0, 5.0, f64::NAN, 2.0, 8.0, 3.0]));
    let row = fresh.fit_transform(&data, None).unwrap();
    assert_eq!(row.shape(), (1, 10));
    assert!(!outer.is_fitted());
}

#[test]
fn prototypes_survive_repeated_fits() {
    let prototype = OneHotEncoder::new();
    let mut pipeline = Pipeline::new(vec![Box::new(prototype.clone())]);

    pipeline.fit(&Data::from(visits()), None).unwrap();
    let first = pipeline.transform(&Data::from(visits())).unwrap();

    let other = Table::new(vec![
        Column::from_texts("city", vec!["rome"]),
        Column::from_reals("temp", vec![1.0]),
        Column::from_reals("stay", vec![2.0]),
    ])
    .unwrap();
    pipeline.fit(&Data::from(other), None).unwrap();
    let second = pipeline.transform(&Data::from(visits())).unwrap();

    assert_eq!(first.n_cols(), 5);
    assert_eq!(second.n_cols(), 3);
    assert!(!prototype.is_fitted());
}
