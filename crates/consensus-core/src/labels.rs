//! Ordering of cluster labels.
//!
//! Labels coming out of [`crate::Dbscan`] only say which points belong
//! together. Every place that exposes clusters in order (lines top to
//! bottom, words left to right, gutters left to right) goes through
//! [`sort_labels`].
use std::collections::BTreeSet;

/// Arithmetic mean. `NaN` for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Indices of the points carrying `label`, ascending.
pub fn cluster_indices(labels: &[i32], label: i32) -> Vec<usize> {
    labels
        .iter()
        .enumerate()
        .filter_map(|(i, &l)| (l == label).then_some(i))
        .collect()
}

/// Distinct labels of `labels`, ordered by `reducer` applied to the `data`
/// values sharing each label.
///
/// Noise (`-1`) is ordered like any other label; callers skip it where it
/// must not surface. Equal statistics are ordered by label value,
/// ascending, in both directions. `data` is paired with `labels` by index.
pub fn sort_labels<F>(labels: &[i32], data: &[f64], reducer: F, descending: bool) -> Vec<i32>
where
    F: Fn(&[f64]) -> f64,
{
    debug_assert_eq!(labels.len(), data.len(), "one data value per label");

    let distinct: BTreeSet<i32> = labels.iter().copied().collect();
    let mut keyed: Vec<(i32, f64)> = distinct
        .into_iter()
        .map(|label| {
            let members: Vec<f64> = labels
                .iter()
                .zip(data)
                .filter(|(l, _)| **l == label)
                .map(|(_, v)| *v)
                .collect();
            (label, reducer(&members))
        })
        .collect();

    keyed.sort_by(|a, b| {
        let by_stat = if descending {
            b.1.total_cmp(&a.1)
        } else {
            a.1.total_cmp(&b.1)
        };
        by_stat.then(a.0.cmp(&b.0))
    });
    keyed.into_iter().map(|(label, _)| label).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::angles::avg_angle;

    #[test]
    fn orders_by_mean() {
        let labels = [0, 1, 0, 2, 1, 2];
        let data = [10.0, 1.0, 12.0, 5.0, 3.0, 5.0];
        assert_eq!(sort_labels(&labels, &data, mean, false), vec![1, 2, 0]);
        assert_eq!(sort_labels(&labels, &data, mean, true), vec![0, 2, 1]);
    }

    #[test]
    fn noise_is_sorted_like_a_label() {
        let labels = [-1, 0, 1];
        let data = [5.0, 9.0, 1.0];
        assert_eq!(sort_labels(&labels, &data, mean, false), vec![1, -1, 0]);
    }

    #[test]
    fn ties_break_by_label() {
        let labels = [3, 1, 2];
        let data = [1.0, 1.0, 1.0];
        assert_eq!(sort_labels(&labels, &data, mean, false), vec![1, 2, 3]);
        assert_eq!(sort_labels(&labels, &data, mean, true), vec![1, 2, 3]);
    }

    #[test]
    fn is_idempotent() {
        let labels = [4, 0, 4, 7, 0, -1, 7];
        let data = [2.0, 9.0, 3.0, 2.5, 8.0, 0.0, 2.5];
        let first = sort_labels(&labels, &data, mean, true);
        let second = sort_labels(&labels, &data, mean, true);
        assert_eq!(first, second);
    }

    #[test]
    fn circular_reducer_orders_across_wrap() {
        // Label 0 averages to 0°, label 1 to 20°; an arithmetic mean would
        // put label 0 at 180° and last.
        let labels = [0, 0, 1, 1];
        let data = [350.0, 10.0, 15.0, 25.0];
        assert_eq!(sort_labels(&labels, &data, avg_angle, false), vec![0, 1]);
        assert_eq!(sort_labels(&labels, &data, mean, false), vec![1, 0]);
    }

    #[test]
    fn empty_input() {
        assert!(sort_labels(&[], &[], mean, false).is_empty());
    }

    #[test]
    fn indices_per_label() {
        let labels = [1, -1, 1, 0];
        assert_eq!(cluster_indices(&labels, 1), vec![0, 2]);
        assert_eq!(cluster_indices(&labels, -1), vec![1]);
        assert!(cluster_indices(&labels, 5).is_empty());
    }
}
