//! Tests for the LOWESS builder and stat.
//!
//! ## Test Organization
//!
//! 1. **Builder** - Defaults, duplicates and validation
//! 2. **Bands** - When a band is (not) computed
//! 3. **Serialization** - Builders loaded from JSON
//! 4. **Entry Points** - Slices, arrays, frames and precision

use approx::assert_abs_diff_eq;
use ndarray::{Array1, s};

use statrecipes::internals::evaluation::bootstrap::BootstrapConfig;
use statrecipes::prelude::*;

fn sine(n: usize) -> (Vec<f64>, Vec<f64>) {
    (0..n)
        .map(|i| {
            let x = i as f64 / 4.0;
            (x, x.sin())
        })
        .unzip()
}

// ============================================================================
// Builder Tests
// ============================================================================

/// Test the defaults of an unconfigured builder.
#[test]
fn test_builder_defaults() {
    let model = Lowess::<f64>::new().build().unwrap();
    let config = model.config();

    assert_eq!(config.fraction, 0.2);
    assert_eq!(config.gridsize, 100);
    assert_eq!(config.delta, 0.0);
    assert_eq!(config.iterations, 3);
    assert_eq!(config.weight_function, WeightFunction::Tricube);
    assert_eq!(config.robustness_method, RobustnessMethod::Bisquare);
    assert_eq!(config.evaluation, EvaluationMode::Direct);
    assert!(config.bootstrap.is_none());
    assert!(!model.has_band());
}

/// Test that setting a parameter twice is rejected.
#[test]
fn test_duplicate_parameter() {
    let err = Lowess::<f64>::new()
        .fraction(0.3)
        .gridsize(10)
        .fraction(0.4)
        .build()
        .unwrap_err();
    assert_eq!(
        err,
        StatError::DuplicateParameter {
            parameter: "fraction"
        }
    );
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

/// Test that invalid parameters fail at build time.
#[test]
fn test_invalid_parameters() {
    let cases = [
        (
            Lowess::<f64>::new().fraction(0.0).build(),
            StatError::InvalidFraction(0.0),
        ),
        (
            Lowess::new().fraction(1.2).build(),
            StatError::InvalidFraction(1.2),
        ),
        (
            Lowess::new().gridsize(0).build(),
            StatError::InvalidGridsize(0),
        ),
        (
            Lowess::new().delta(-0.5).build(),
            StatError::InvalidDelta(-0.5),
        ),
        (
            Lowess::new().iterations(1001).build(),
            StatError::InvalidIterations(1001),
        ),
        (
            Lowess::new().bootstrap(0).build(),
            StatError::InvalidBootstrap(0),
        ),
        (
            Lowess::new().confidence_level(1.0).build(),
            StatError::InvalidConfidence(1.0),
        ),
    ];

    for (result, expected) in cases {
        assert_eq!(result.unwrap_err(), expected);
        assert_eq!(expected.kind(), ErrorKind::Configuration);
    }
}

/// Test that bootstrap settings reach the configuration.
#[test]
fn test_bootstrap_configuration() {
    let model = Lowess::<f64>::new()
        .bootstrap(10)
        .confidence_level(0.9)
        .seed(1)
        .parallel(true)
        .build()
        .unwrap();

    assert!(model.has_band());
    assert_eq!(
        model.config().bootstrap,
        Some(BootstrapConfig {
            replicates: 10,
            confidence_level: 0.9,
            seed: Some(1),
            parallel: true,
        })
    );

    let default_level = Lowess::<f64>::new().bootstrap(10).build().unwrap();
    assert_eq!(
        default_level.config().bootstrap.map(|b| b.confidence_level),
        Some(DEFAULT_CONFIDENCE_LEVEL)
    );
}

// ============================================================================
// Band Tests
// ============================================================================

/// Test that a confidence level alone never enables the band.
#[test]
fn test_confidence_level_without_bootstrap() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let (x, y) = sine(40);
    let model = Lowess::new()
        .fraction(0.3)
        .confidence_level(0.8)
        .build()
        .unwrap();
    assert!(!model.has_band());

    let result = model.fit_xy(&x, &y).unwrap();
    assert!(!result.has_band());
    assert!(result.lower.is_none());
    assert!(result.replicates.is_none());
}

/// Test the band produced by an explicit bootstrap.
#[test]
fn test_band_with_bootstrap() {
    let (x, mut y) = sine(40);
    for (i, v) in y.iter_mut().enumerate() {
        *v += if i % 2 == 0 { 0.1 } else { -0.1 };
    }

    let model = Lowess::new()
        .fraction(0.3)
        .gridsize(30)
        .bootstrap(30)
        .seed(5)
        .build()
        .unwrap();
    let result = model.fit_xy(&x, &y).unwrap();

    assert!(result.has_band());
    assert_eq!(result.replicates, Some(30));
    let (lower, upper) = (result.lower.as_ref().unwrap(), result.upper.as_ref().unwrap());
    assert_eq!(lower.len(), 30);
    for ((lo, fit), hi) in lower.iter().zip(&result.y).zip(upper) {
        assert!(lo <= fit && fit <= hi);
    }

    let text = result.to_string();
    assert!(text.contains("Bootstrap:   30 resamples"));
    assert!(text.contains("Band_Lower"));
}

// ============================================================================
// Serialization Tests
// ============================================================================

/// Test loading a builder from JSON.
#[test]
fn test_builder_from_json() {
    let json = r#"{"fraction": 0.4, "gridsize": 12, "num_bootstrap": 8, "robustness_method": "huber", "weight_function": "epanechnikov"}"#;
    let builder: LowessBuilder<f64> = serde_json::from_str(json).unwrap();

    assert_eq!(builder.fraction, Some(0.4));
    assert_eq!(builder.seed, None);

    let model = builder.build().unwrap();
    assert_eq!(model.config().gridsize, 12);
    assert_eq!(model.config().robustness_method, RobustnessMethod::Huber);
    assert_eq!(model.config().weight_function, WeightFunction::Epanechnikov);
    assert!(model.has_band());
}

/// Test that a configured builder survives a JSON round trip.
#[test]
fn test_builder_json_round_trip() {
    let builder = Lowess::<f64>::new()
        .fraction(0.25)
        .evaluation(EvaluationMode::Interpolate)
        .seed(9);

    let json = serde_json::to_string(&builder).unwrap();
    assert!(json.contains("\"evaluation\":\"interpolate\""));
    let back: LowessBuilder<f64> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, builder);
}

// ============================================================================
// Entry Point Tests
// ============================================================================

/// Test that vectors, slices, fixed arrays and ndarray inputs agree.
#[test]
fn test_input_types_agree() {
    let (x, y) = sine(30);
    let model = Lowess::new().fraction(0.5).gridsize(10).build().unwrap();

    let from_vec = model.fit_xy(&x, &y).unwrap();
    let from_slice = model.fit_xy(&x[..], &y[..]).unwrap();
    let from_array = model
        .fit_xy(&Array1::from(x.clone()), &Array1::from(y.clone()))
        .unwrap();

    assert_eq!(from_vec, from_slice);
    assert_eq!(from_vec, from_array);

    let fixed = model
        .fit_xy(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0], &[0.0, 2.0, 4.0, 6.0, 8.0, 10.0])
        .unwrap();
    assert_eq!(fixed.len(), 10);
}

/// Test that strided array views are rejected.
#[test]
fn test_non_contiguous_input() {
    let x = Array1::linspace(0.0, 10.0, 40);
    let y = x.mapv(f64::sin);
    let model = Lowess::new().fraction(0.5).build().unwrap();

    let err = model
        .fit_xy(&x.slice(s![..;2]), &y.slice(s![..;2]))
        .unwrap_err();
    assert_eq!(err, StatError::NonContiguousInput);
    assert_eq!(err.kind(), ErrorKind::Input);
}

/// Test fitting named frame columns.
#[test]
fn test_fit_columns() {
    let (x, y) = sine(30);
    let frame = Frame::new()
        .with_column("time", x.clone())
        .unwrap()
        .with_column("value", y.clone())
        .unwrap();
    let model: Lowess<f64> = Lowess::new().fraction(0.4).gridsize(8).build().unwrap();

    let out = model.fit_columns(&frame, "time", "value").unwrap();
    assert_eq!(out.names(), ["x", "y"]);
    assert_eq!(out.n_rows(), 8);
    assert_eq!(out.numeric("x").unwrap()[7], x[29]);

    let renamed = frame.rename(&[("time", "x"), ("value", "y")]);
    assert_eq!(model.fit_frame(&renamed).unwrap(), out);

    assert_eq!(
        model.fit_frame(&frame).unwrap_err(),
        StatError::MissingColumn("x".to_string())
    );
}

/// Test the single-precision path end to end.
#[test]
fn test_f32_fit() {
    let x: Vec<f32> = (0..30).map(|i| i as f32).collect();
    let y: Vec<f32> = x.iter().map(|v| 3.0 - 0.25 * v).collect();

    let model = Lowess::<f32>::new()
        .fraction(0.5)
        .gridsize(7)
        .iterations(0)
        .build()
        .unwrap();
    let result = model.fit_xy(&x, &y).unwrap();

    assert_eq!(result.len(), 7);
    assert_eq!(result.n_used, 30);
    for (g, f) in result.x.iter().zip(&result.y) {
        assert_abs_diff_eq!(*f, 3.0 - 0.25 * g, epsilon = 1e-3);
    }
}

/// Test that the result reports the data it used.
#[test]
fn test_result_metadata() {
    let x = [0.0, 1.0, 1.0, 2.0, 3.0, f64::NAN, 4.0, 5.0];
    let y = [0.0, 1.0, 1.5, 2.0, 3.0, 9.0, 4.0, 5.0];
    let model = Lowess::new().fraction(0.8).gridsize(5).build().unwrap();

    let result = model.fit_xy(&x, &y).unwrap();
    assert_eq!(result.n_used, 7);
    assert_eq!(result.distinct, 6);
    assert_eq!(result.fraction_used, 0.8);
    assert_eq!(result.x, vec![0.0, 1.25, 2.5, 3.75, 5.0]);
}
