use approx::assert_abs_diff_eq;
use consensus_core::SlopeSymmetry;
use consensus_text::{LineRecord, TextExtract, TextReducer, TextReducerParams};
use serde_json::{json, Value};

/// One volunteer's extract for `frame0`, lines given as
/// `(vertices, words, slope)`.
fn extract(lines: &[(&[(f64, f64)], &[&str], f64)]) -> TextExtract {
    let x: Vec<Vec<f64>> = lines.iter().map(|(p, _, _)| p.iter().map(|v| v.0).collect()).collect();
    let y: Vec<Vec<f64>> = lines.iter().map(|(p, _, _)| p.iter().map(|v| v.1).collect()).collect();
    let text: Vec<&[&str]> = lines.iter().map(|(_, t, _)| *t).collect();
    let slope: Vec<f64> = lines.iter().map(|(_, _, s)| *s).collect();
    from_json(json!({
        "frame0": { "points": { "x": x, "y": y }, "text": text, "slope": slope }
    }))
}

fn from_json(value: Value) -> TextExtract {
    serde_json::from_value(value).expect("valid extract")
}

fn reduce(params: TextReducerParams, extracts: &[TextExtract]) -> Vec<LineRecord> {
    let reduction = TextReducer::new(params).expect("valid params").reduce(extracts);
    reduction.frame("frame0").expect("frame0 reduced").to_vec()
}

fn texts(record: &LineRecord) -> Vec<Vec<&str>> {
    record
        .clusters_text
        .iter()
        .map(|words| words.iter().map(String::as_str).collect())
        .collect()
}

#[test]
fn opposite_tracing_directions_merge_into_one_line() {
    let extracts = vec![
        extract(&[(&[(0.0, 100.0), (100.0, 100.0)], &["hello"], 0.0)]),
        extract(&[(&[(104.0, 102.0), (3.0, 101.0)], &["", "hello"], 180.0)]),
    ];
    let records = reduce(TextReducerParams::default(), &extracts);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].slope_label, 0);
    assert_abs_diff_eq!(records[0].line_slope, 0.0, epsilon = 1e-9);
    assert_eq!(texts(&records[0]), vec![vec!["hello", "hello"], vec![]]);
}

#[test]
fn directed_symmetry_keeps_opposite_directions_apart() {
    let extracts = vec![
        extract(&[(&[(0.0, 100.0), (100.0, 100.0)], &["hello"], 0.0)]),
        extract(&[(&[(104.0, 102.0), (3.0, 101.0)], &["", "hello"], 180.0)]),
    ];
    let params = TextReducerParams {
        slope_symmetry: SlopeSymmetry::Directed,
        ..Default::default()
    };
    let records = reduce(params, &extracts);
    assert_eq!(records.len(), 2);
    assert_ne!(records[0].slope_label, records[1].slope_label);
}

#[test]
fn empty_transcriptions_are_dropped_from_word_text() {
    let extracts = vec![
        extract(&[(&[(0.0, 50.0), (100.0, 50.0)], &["cat"], 0.0)]),
        extract(&[(&[(2.0, 50.0), (101.0, 50.0)], &[""], 0.0)]),
    ];
    let records = reduce(TextReducerParams::default(), &extracts);
    assert_eq!(records.len(), 1);
    assert_eq!(texts(&records[0]), vec![vec!["cat"], vec![]]);
    assert_abs_diff_eq!(records[0].clusters_x[0], 1.0, epsilon = 1e-9);
    assert_abs_diff_eq!(records[0].clusters_x[1], 100.5, epsilon = 1e-9);
}

#[test]
fn lines_are_ordered_top_to_bottom() {
    let extracts = vec![extract(&[
        (&[(0.0, 300.0), (100.0, 300.0)], &["third"], 0.0),
        (&[(0.0, 100.0), (100.0, 100.0)], &["first"], 0.0),
        (&[(0.0, 200.0), (100.0, 200.0)], &["second"], 0.0),
    ])];
    let records = reduce(TextReducerParams::default(), &extracts);
    let first_words: Vec<&str> = records.iter().map(|r| r.clusters_text[0][0].as_str()).collect();
    assert_eq!(first_words, vec!["first", "second", "third"]);
    let ys: Vec<f64> = records.iter().map(|r| r.clusters_y[0]).collect();
    assert_eq!(ys, vec![100.0, 200.0, 300.0]);
}

#[test]
fn columns_come_left_to_right() {
    let extracts = vec![extract(&[
        (&[(600.0, 100.0), (900.0, 100.0)], &["right"], 0.0),
        (&[(10.0, 100.0), (200.0, 100.0)], &["left"], 0.0),
        (&[(620.0, 300.0), (880.0, 300.0)], &["right2"], 0.0),
    ])];
    let records = reduce(TextReducerParams::default(), &extracts);
    assert_eq!(records.len(), 3);
    let gutters: Vec<i32> = records.iter().map(|r| r.gutter_label).collect();
    assert_eq!(gutters, vec![0, 1, 1]);
    assert_eq!(records[0].clusters_text[0], vec!["left".to_string()]);
    assert_eq!(records[1].clusters_text[0], vec!["right".to_string()]);
    assert_eq!(records[2].clusters_text[0], vec!["right2".to_string()]);
}

#[test]
fn slanted_lines_are_separated_across_the_slant() {
    let (c, s) = (30f64.to_radians().cos(), 30f64.to_radians().sin());
    let along = |t: f64, offset: f64| (t * c - offset * s, t * s + offset * c);
    let upper: Vec<(f64, f64)> = [0.0, 100.0, 200.0].iter().map(|&t| along(t, 0.0)).collect();
    let upper2: Vec<(f64, f64)> = [3.0, 98.0, 204.0].iter().map(|&t| along(t, 4.0)).collect();
    let lower: Vec<(f64, f64)> = [0.0, 100.0, 200.0].iter().map(|&t| along(t, 100.0)).collect();

    let extracts = vec![
        extract(&[
            (upper.as_slice(), &["a", "b"], 30.0),
            (lower.as_slice(), &["c", "d"], 31.0),
        ]),
        extract(&[(upper2.as_slice(), &["a", "b"], 29.0)]),
    ];
    let records = reduce(TextReducerParams::default(), &extracts);
    assert_eq!(records.len(), 2);
    assert_abs_diff_eq!(records[0].line_slope, 30.0, epsilon = 1e-6);
    assert_eq!(texts(&records[0]), vec![vec!["a", "a"], vec!["b", "b"], vec![]]);
    assert_eq!(texts(&records[1]), vec![vec!["c"], vec!["d"], vec![]]);
    assert_eq!(records[0].consensus_text(), "a b");
}

#[test]
fn lone_orientation_is_noise_with_higher_min_samples() {
    let extracts = vec![
        extract(&[
            (&[(0.0, 100.0), (100.0, 100.0)], &["word"], 0.0),
            (&[(0.0, 400.0), (100.0, 500.0)], &["stray"], 45.0),
        ]),
        extract(&[(&[(2.0, 101.0), (99.0, 99.0)], &["word"], 1.0)]),
    ];
    let params = TextReducerParams {
        min_samples: 2,
        ..Default::default()
    };
    let records = reduce(params, &extracts);
    assert_eq!(records.len(), 1);
    assert_eq!(texts(&records[0]), vec![vec!["word", "word"], vec![]]);
}

#[test]
fn line_with_only_noise_words_is_not_emitted() {
    let extracts = vec![extract(&[
        (&[(0.0, 100.0), (300.0, 100.0)], &["a"], 0.0),
        (&[(150.0, 100.0), (450.0, 100.0)], &["b"], 0.0),
    ])];
    let params = TextReducerParams {
        min_samples: 2,
        ..Default::default()
    };
    assert!(reduce(params, &extracts).is_empty());
}

#[test]
fn noise_only_line_is_skipped_next_to_a_real_one() {
    let extracts = vec![
        extract(&[
            (&[(0.0, 100.0), (300.0, 100.0)], &["a"], 0.0),
            (&[(0.0, 300.0), (100.0, 300.0)], &["c"], 0.0),
        ]),
        extract(&[
            (&[(150.0, 100.0), (450.0, 100.0)], &["b"], 0.0),
            (&[(3.0, 301.0), (98.0, 299.0)], &["c"], 0.0),
        ]),
    ];
    let params = TextReducerParams {
        min_samples: 2,
        ..Default::default()
    };
    let records = reduce(params, &extracts);
    assert_eq!(records.len(), 1);
    assert_eq!(texts(&records[0]), vec![vec!["c", "c"], vec![]]);
    assert_abs_diff_eq!(records[0].clusters_y[0], 300.5, epsilon = 1e-9);
}

#[test]
fn frames_are_reduced_independently_and_empty_frames_are_kept() {
    let extracts = vec![
        from_json(json!({
            "frame1": {
                "points": { "x": [[0.0, 100.0]], "y": [[10.0, 10.0]] },
                "text": [["b"]],
                "slope": [0.0]
            },
            "frame0": {
                "points": { "x": [], "y": [] },
                "text": [],
                "slope": []
            }
        })),
    ];
    let reduction = TextReducer::new(TextReducerParams::default())
        .unwrap()
        .reduce(&extracts);
    let frames: Vec<&String> = reduction.frames.keys().collect();
    assert_eq!(frames, vec!["frame0", "frame1"]);
    assert!(reduction.frames["frame0"].is_empty());
    assert_eq!(reduction.frames["frame1"].len(), 1);
}

#[test]
fn inputs_are_left_untouched_and_results_repeat() {
    let extracts = vec![
        extract(&[(&[(0.0, 50.0), (100.0, 50.0)], &["cat"], 0.0)]),
        extract(&[(&[(2.0, 50.0), (101.0, 50.0)], &[""], 0.0)]),
    ];
    let snapshot = extracts.clone();
    let reducer = TextReducer::new(TextReducerParams::default()).unwrap();
    let first = reducer.reduce(&extracts);
    let second = reducer.reduce(&extracts);
    assert_eq!(extracts, snapshot);
    assert_eq!(first, second);
}

#[test]
fn no_extracts_no_frames() {
    let reduction = TextReducer::new(TextReducerParams::default())
        .unwrap()
        .reduce(&[]);
    assert!(reduction.is_empty());
}
