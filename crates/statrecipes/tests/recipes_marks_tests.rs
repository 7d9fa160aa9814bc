//! Tests for the rolling move and the line marks.
//!
//! ## Test Organization
//!
//! 1. **Rolling** - Per-group rolling in frame order
//! 2. **LineLabel** - End-of-line labels
//! 3. **StraightLine** - Reference lines

use statrecipes::prelude::*;

fn assert_same(actual: &[f64], expected: &[f64]) {
    assert_eq!(actual.len(), expected.len());
    for (&a, &e) in actual.iter().zip(expected) {
        assert!(
            (a.is_nan() && e.is_nan()) || (a - e).abs() < 1e-12,
            "{actual:?} != {expected:?}"
        );
    }
}

fn interleaved() -> Frame {
    Frame::new()
        .with_column("g", vec!["a", "b", "a", "b", "a", "b"])
        .unwrap()
        .with_column("x", vec![1.0, 1.0, 2.0, 2.0, 3.0, 3.0])
        .unwrap()
        .with_column("y", vec![1.0, 10.0, 2.0, 20.0, 3.0, 30.0])
        .unwrap()
}

// ============================================================================
// Rolling Tests
// ============================================================================

/// Test the defaults and builder validation.
#[test]
fn test_rolling_builder() {
    let spec = *Rolling::new().build().unwrap().spec();
    assert_eq!(spec.window, 2);
    assert_eq!(spec.window_type, WindowType::Boxcar);
    assert_eq!(spec.agg, Aggregation::Mean);
    assert_eq!(spec.closed, Closed::Neither);
    assert_eq!(spec.min_periods, 1);

    assert_eq!(
        Rolling::new().window(0).build().unwrap_err(),
        StatError::InvalidWindow(0)
    );
    assert!(matches!(
        Rolling::new()
            .window_type(WindowType::Triangular)
            .agg(Aggregation::Median)
            .build(),
        Err(StatError::UnsupportedAggregation { .. })
    ));
    assert_eq!(
        Rolling::new().window(3).window(4).build().unwrap_err(),
        StatError::DuplicateParameter { parameter: "window" }
    );
}

/// Test that each group is rolled separately and rows stay in place.
#[test]
fn test_rolling_per_group() {
    let roll = Rolling::new().closed(Closed::Right).build().unwrap();
    let data = interleaved();

    let out = roll
        .transform(&data, &GroupBy::new(["g"]), Orient::X, &Scales::new())
        .unwrap();

    assert_eq!(out.names(), data.names());
    assert_eq!(out.column("g"), data.column("g"));
    assert_eq!(out.numeric("x"), data.numeric("x"));
    assert_same(
        out.numeric("y").unwrap(),
        &[1.0, 10.0, 1.5, 15.0, 2.5, 25.0],
    );
}

/// Test the default lag-like window on an ungrouped frame.
#[test]
fn test_rolling_default_ungrouped() {
    let roll = Rolling::new().build().unwrap();
    let out = roll
        .transform(&interleaved(), &GroupBy::none(), Orient::X, &Scales::new())
        .unwrap();

    assert_same(
        out.numeric("y").unwrap(),
        &[f64::NAN, 1.0, 10.0, 2.0, 20.0, 3.0],
    );
    assert_same(&roll.apply(&[4.0, 8.0]), &[f64::NAN, 4.0]);
}

/// Test that orient `y` rolls the `x` column.
#[test]
fn test_rolling_orient_y() {
    let roll = Rolling::new()
        .window(3)
        .agg(Aggregation::Sum)
        .closed(Closed::Right)
        .build()
        .unwrap();
    let data = interleaved();

    let out = roll
        .transform(&data, &GroupBy::new(["g"]), Orient::Y, &Scales::new())
        .unwrap();
    assert_eq!(out.numeric("y"), data.numeric("y"));
    assert_same(
        out.numeric("x").unwrap(),
        &[1.0, 1.0, 3.0, 3.0, 6.0, 6.0],
    );
}

/// Test that a categorical target column is rejected.
#[test]
fn test_rolling_requires_numeric() {
    let data = Frame::new()
        .with_column("x", vec![1.0, 2.0])
        .unwrap()
        .with_column("y", vec!["p", "q"])
        .unwrap();

    let err = Rolling::new()
        .build()
        .unwrap()
        .transform(&data, &GroupBy::none(), Orient::X, &Scales::new())
        .unwrap_err();
    assert_eq!(err, StatError::NotNumeric("y".to_string()));
}

// ============================================================================
// LineLabel Tests
// ============================================================================

fn labelled() -> Frame {
    Frame::new()
        .with_column("x", vec![0.0, 2.0, 1.0, 0.0, 1.0, f64::NAN])
        .unwrap()
        .with_column("y", vec![1.0, 3.0, 2.0, 4.0, 6.0, 9.0])
        .unwrap()
        .with_column("text", vec!["up", "up", "up", "down", "down", "down"])
        .unwrap()
}

/// Test that the largest x of each group is labelled.
#[test]
fn test_line_label_last_point() {
    let mut canvas = RecordingCanvas::new();
    LineLabel::default()
        .render(
            &labelled(),
            &GroupBy::new(["text"]),
            Orient::X,
            &Scales::new(),
            &mut canvas,
        )
        .unwrap();

    let props = TextProps {
        color: "C0".to_string(),
        fontsize: 10.0,
        halign: HAlign::Left,
        valign: VAlign::Center,
        offset: (5.0, 0.0),
    };
    assert_eq!(
        canvas.commands(),
        [
            DrawCommand::Text {
                at: (2.0, 3.0),
                text: "up".to_string(),
                props: props.clone(),
            },
            DrawCommand::Text {
                at: (1.0, 6.0),
                text: "down".to_string(),
                props,
            },
        ]
    );
}

/// Test labelling along `y` with a custom offset.
#[test]
fn test_line_label_orient_y() {
    let mut canvas = RecordingCanvas::new();
    LineLabel::new(8.0)
        .render(
            &labelled(),
            &GroupBy::new(["text"]),
            Orient::Y,
            &Scales::new(),
            &mut canvas,
        )
        .unwrap();

    match &canvas.commands()[1] {
        DrawCommand::Text { at, text, props } => {
            assert!(at.0.is_nan());
            assert_eq!(at.1, 9.0);
            assert_eq!(text, "down");
            assert_eq!(props.offset, (0.0, 8.0));
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

/// Test that ties keep the first row and numeric text is formatted.
#[test]
fn test_line_label_ties_and_numeric_text() {
    let data = Frame::new()
        .with_column("x", vec![1.0, 1.0])
        .unwrap()
        .with_column("y", vec![5.0, 7.0])
        .unwrap()
        .with_column("label", vec![2.5, 3.5])
        .unwrap();
    let mark = LineLabel {
        text: "label".to_string(),
        ..LineLabel::default()
    };

    let mut canvas = RecordingCanvas::new();
    mark.render(&data, &GroupBy::none(), Orient::X, &Scales::new(), &mut canvas)
        .unwrap();

    assert_eq!(canvas.commands().len(), 1);
    assert!(matches!(
        &canvas.commands()[0],
        DrawCommand::Text { at, text, .. } if *at == (1.0, 5.0) && text == "2.5"
    ));

    let err = LineLabel::default()
        .render(&data, &GroupBy::none(), Orient::X, &Scales::new(), &mut canvas)
        .unwrap_err();
    assert_eq!(err, StatError::MissingColumn("text".to_string()));
}

/// Test loading a label mark from JSON.
#[test]
fn test_line_label_from_json() {
    let mark: LineLabel = serde_json::from_str(r#"{"offset": 12.0, "color": "red"}"#).unwrap();
    assert_eq!(mark.offset, 12.0);
    assert_eq!(mark.color, "red");
    assert_eq!(mark.text, "text");
    assert_eq!(mark.fontsize, 10.0);
}

// ============================================================================
// StraightLine Tests
// ============================================================================

/// Test horizontal lines through each row's `y` for orient `x`.
#[test]
fn test_straight_line_orient_x() {
    let data = Frame::new()
        .with_column("x", vec![1.0, 2.0, 3.0])
        .unwrap()
        .with_column("y", vec![3.0, f64::NAN, 4.0])
        .unwrap();

    let mut canvas = RecordingCanvas::new();
    StraightLine::default()
        .render(&data, &GroupBy::none(), Orient::X, &Scales::new(), &mut canvas)
        .unwrap();

    let props = LineProps {
        color: "C0".to_string(),
        alpha: 1.0,
        linewidth: 1.5,
        linestyle: LineStyle::Solid,
    };
    assert_eq!(
        canvas.commands(),
        [
            DrawCommand::AxLine {
                p1: (0.0, 3.0),
                p2: (1.0, 3.0),
                props: props.clone(),
            },
            DrawCommand::AxLine {
                p1: (0.0, 4.0),
                p2: (1.0, 4.0),
                props,
            },
        ]
    );
}

/// Test vertical lines through each row's `x` for orient `y`, in group order.
#[test]
fn test_straight_line_orient_y_grouped() {
    let mark: StraightLine =
        serde_json::from_str(r#"{"color": "k", "linestyle": "dashed"}"#).unwrap();
    assert_eq!(mark.linewidth, 1.5);

    let mut canvas = RecordingCanvas::new();
    mark.render(
        &interleaved(),
        &GroupBy::new(["g"]),
        Orient::Y,
        &Scales::new(),
        &mut canvas,
    )
    .unwrap();

    let points: Vec<((f64, f64), (f64, f64))> = canvas
        .commands()
        .iter()
        .map(|c| match c {
            DrawCommand::AxLine { p1, p2, props } => {
                assert_eq!(props.linestyle, LineStyle::Dashed);
                assert_eq!(props.color, "k");
                (*p1, *p2)
            }
            other => panic!("unexpected command: {other:?}"),
        })
        .collect();

    assert_eq!(
        points,
        vec![
            ((1.0, 0.0), (1.0, 1.0)),
            ((2.0, 0.0), (2.0, 1.0)),
            ((3.0, 0.0), (3.0, 1.0)),
            ((1.0, 0.0), (1.0, 1.0)),
            ((2.0, 0.0), (2.0, 1.0)),
            ((3.0, 0.0), (3.0, 1.0)),
        ]
    );
}
