use approx::assert_abs_diff_eq;
use consensus_points::{PointExtract, PointReducer, PointReducerParams};
use serde_json::json;

fn extract(pairs: &[(&str, &[f64])]) -> PointExtract {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_vec()))
        .collect()
}

fn reducer(eps: f64, min_samples: usize) -> PointReducer {
    PointReducer::new(PointReducerParams {
        eps,
        min_samples,
        ..Default::default()
    })
    .expect("valid params")
}

#[test]
fn two_clusters_from_three_clicks() {
    let extracts = vec![extract(&[
        ("point_x", &[0.0, 1.0, 100.0]),
        ("point_y", &[0.0, 1.0, 100.0]),
    ])];
    let reduction = reducer(5.0, 1).reduce(&extracts);
    let point = &reduction.tools["point"];
    assert_eq!(point.cluster_labels, vec![0, 0, 1]);
    assert_eq!(point.clusters.len(), 2);

    let pair = &point.clusters[0];
    assert_eq!(pair.count, 2);
    assert_abs_diff_eq!(pair.mean_x, 0.5, epsilon = 1e-12);
    assert_abs_diff_eq!(pair.mean_y, 0.5, epsilon = 1e-12);
    assert_abs_diff_eq!(pair.var_x, 0.5, epsilon = 1e-12);
    assert_abs_diff_eq!(pair.covar_xy, 0.5, epsilon = 1e-12);

    let single = &point.clusters[1];
    assert_eq!(single.count, 1);
    assert_abs_diff_eq!(single.mean_x, 100.0);
    assert_abs_diff_eq!(single.mean_y, 100.0);
    assert_eq!(single.var_x, 0.0);
}

#[test]
fn clicks_from_many_volunteers_pool_per_tool() {
    let extracts = vec![
        extract(&[("eye_x", &[10.0, 200.0]), ("eye_y", &[10.0, 20.0])]),
        extract(&[("eye_x", &[11.0, 202.0]), ("eye_y", &[9.0, 21.0])]),
        extract(&[("eye_x", &[9.0, 201.0]), ("eye_y", &[11.0, 19.0])]),
        extract(&[("eye_x", &[10.5]), ("eye_y", &[10.5]), ("tail_x", &[400.0]), ("tail_y", &[400.0])]),
    ];
    let reduction = reducer(5.0, 3).reduce(&extracts);

    let eye = &reduction.tools["eye"];
    assert_eq!(eye.cluster_labels.len(), 7);
    let counts: Vec<usize> = eye.clusters.iter().map(|c| c.count).collect();
    assert_eq!(counts, vec![4, 3]);
    assert_abs_diff_eq!(eye.clusters[0].mean_x, 10.125, epsilon = 1e-12);
    assert_abs_diff_eq!(eye.clusters[1].mean_x, 201.0, epsilon = 1e-12);

    // One tail click cannot exceed min_samples.
    assert!(!reduction.tools.contains_key("tail"));
}

#[test]
fn all_noise_tool_keeps_only_labels() {
    let extracts = vec![extract(&[
        ("dot_x", &[0.0, 50.0, 100.0, 150.0]),
        ("dot_y", &[0.0, 0.0, 0.0, 0.0]),
    ])];
    let reduction = reducer(5.0, 2).reduce(&extracts);
    let flat = reduction.to_flat_map();
    assert_eq!(flat["dot_cluster_labels"], json!([-1, -1, -1, -1]));
    assert!(!flat.contains_key("dot_clusters_x"));
}

#[test]
fn empty_tool_is_silently_omitted() {
    let extracts = vec![extract(&[("ghost_x", &[]), ("ghost_y", &[])])];
    let reduction = reducer(5.0, 1).reduce(&extracts);
    assert!(reduction.is_empty());
    assert!(reducer(5.0, 1).reduce(&[]).is_empty());
}

#[test]
fn reduction_is_reproducible() {
    let extracts = vec![
        extract(&[("p_x", &[1.0, 2.0, 3.0, 40.0, 41.0]), ("p_y", &[1.0, 2.0, 1.0, 40.0, 42.0])]),
        extract(&[("p_x", &[2.5, 40.5]), ("p_y", &[1.5, 41.0])]),
    ];
    let reducer = reducer(3.0, 2);
    let first = reducer.reduce(&extracts).to_flat_map();
    let second = reducer.reduce(&extracts).to_flat_map();
    assert_eq!(first, second);
    assert_eq!(first["p_clusters_count"], json!([4, 3]));
}
