//! Chart configuration: defaults, partial overrides, validation and loading.

use std::fs;

use tumour_kinetics::chart::{Band, HoverMode};
use tumour_kinetics::data::model::{SubjectColumn, WideTable};
use tumour_kinetics::{ChartConfig, CurveMode, TumourDataset};

fn parse(json: &str) -> ChartConfig {
    serde_json::from_str(json).unwrap()
}

#[test]
fn empty_object_gives_defaults() {
    let config = parse("{}");
    assert_eq!(config, ChartConfig::default());
    assert_eq!(config.dashed_subjects, ["TP1-PT", "TP2-PT", "TP3-V", "TP5-V"]);
    assert_eq!(
        config.treatment_windows,
        [Band::new(37.0, 57.0), Band::new(65.0, 85.0)]
    );
    assert_eq!(config.smoothing.fraction, 0.35);
    assert_eq!(config.smoothing.iterations, 3);
    assert_eq!(config.layout.height, 800.0);
    assert_eq!(config.layout.hover, HoverMode::XUnified);
    assert!(config.validate().is_ok());
}

#[test]
fn partial_overrides_keep_other_defaults() {
    let config = parse(
        r#"{
            "dashed_subjects": ["C1"],
            "smoothing": { "fraction": 0.5 },
            "layout": { "title": "Cohort B", "hover": "closest" }
        }"#,
    );
    assert_eq!(config.dashed_subjects, ["C1"]);
    assert_eq!(config.smoothing.fraction, 0.5);
    assert_eq!(config.smoothing.iterations, 3);
    assert_eq!(config.layout.title, "Cohort B");
    assert_eq!(config.layout.hover, HoverMode::Closest);
    assert_eq!(config.layout.x_title, "Days");
    assert_eq!(config.treatment_windows.len(), 2);
}

#[test]
fn invalid_values_are_rejected() {
    let cases = [
        (r#"{"smoothing": {"fraction": 0.0}}"#, "smoothing.fraction"),
        (r#"{"smoothing": {"fraction": 1.5}}"#, "smoothing.fraction"),
        (
            r#"{"treatment_windows": [{"start": 50.0, "end": 40.0}]}"#,
            "starts after it ends",
        ),
        (r#"{"layout": {"height": 0.0}}"#, "layout.height"),
        (r#"{"layout": {"band_style": {"opacity": 2.0}}}"#, "opacity"),
    ];
    for (json, needle) in cases {
        let err = parse(json).validate().unwrap_err();
        assert!(err.to_string().contains(needle), "{json}: {err}");
    }
}

#[test]
fn loads_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chart.json");
    fs::write(
        &path,
        r#"{"treatment_windows": [{"start": 10.0, "end": 20.0}], "dashed_subjects": []}"#,
    )
    .unwrap();

    let config = ChartConfig::load(&path).unwrap();
    assert_eq!(config.treatment_windows, [Band::new(10.0, 20.0)]);
    assert!(config.dashed_subjects.is_empty());
}

#[test]
fn load_reports_invalid_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chart.json");
    fs::write(&path, r#"{"smoothing": {"fraction": -1}}"#).unwrap();

    let err = ChartConfig::load(&path).unwrap_err();
    assert!(format!("{err:#}").contains("smoothing.fraction"), "{err:#}");

    let missing = ChartConfig::load(&dir.path().join("absent.json")).unwrap_err();
    assert!(missing.to_string().contains("reading config"));
}

#[test]
fn pipeline_uses_configured_rules() {
    let config = parse(
        r#"{
            "dashed_subjects": ["B"],
            "treatment_windows": [{"start": 3.0, "end": 5.0}]
        }"#,
    );
    let table = WideTable {
        time_column: "Day".to_string(),
        times: vec![Some(0.0), Some(7.0)],
        subjects: vec![
            SubjectColumn {
                name: "A".to_string(),
                values: vec![Some(1.0), Some(2.0)],
            },
            SubjectColumn {
                name: "B".to_string(),
                values: vec![Some(3.0), Some(4.0)],
            },
        ],
    };
    let ds = TumourDataset::from_table(std::path::Path::new("t.csv"), table);
    let chart = config
        .into_pipeline()
        .render(&ds, &["A", "B"], CurveMode::Smoothed)
        .unwrap()
        .chart;

    assert!(!chart.series[0].dashed);
    assert!(chart.series[1].dashed);
    assert_eq!(chart.bands, [Band::new(3.0, 5.0)]);
}
