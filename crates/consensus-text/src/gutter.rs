//! Left/right column split of the lines drawn on one frame.

/// Assign every group of x positions to a column: `0` left, `1` right.
///
/// Groups are ordered by their mean x. The cut goes into the widest gap
/// between consecutive means that exceeds `eps_gutter` and that no group
/// straddles, i.e. every group left of the cut ends before any group right
/// of it begins. Equal gaps resolve to the leftmost one. Without such a gap
/// the frame is one column and every label is `0`.
///
/// Empty groups carry no position; they are labelled `0` and ignored when
/// choosing the cut.
pub fn gutter(groups: &[Vec<f64>], eps_gutter: f64) -> Vec<i32> {
    let mut labels = vec![0; groups.len()];

    let mut spans: Vec<Span> = groups
        .iter()
        .enumerate()
        .filter_map(|(index, xs)| Span::of(index, xs))
        .collect();
    if spans.len() < 2 {
        return labels;
    }
    // stable: equal means keep input order
    spans.sort_by(|a, b| a.mean.total_cmp(&b.mean));

    let mut prefix_max = Vec::with_capacity(spans.len());
    let mut running = f64::NEG_INFINITY;
    for span in &spans {
        running = running.max(span.max);
        prefix_max.push(running);
    }
    let mut suffix_min = vec![f64::INFINITY; spans.len()];
    let mut running = f64::INFINITY;
    for (k, span) in spans.iter().enumerate().rev() {
        running = running.min(span.min);
        suffix_min[k] = running;
    }

    let mut cut: Option<(usize, f64)> = None;
    for k in 1..spans.len() {
        let gap = spans[k].mean - spans[k - 1].mean;
        if gap <= eps_gutter || prefix_max[k - 1] >= suffix_min[k] {
            continue;
        }
        if cut.is_none_or(|(_, widest)| gap > widest) {
            cut = Some((k, gap));
        }
    }

    if let Some((k, gap)) = cut {
        log::debug!(
            "gutter split {} | {} groups at gap {gap:.1}",
            k,
            spans.len() - k
        );
        for span in &spans[k..] {
            labels[span.index] = 1;
        }
    }
    labels
}

#[derive(Clone, Copy, Debug)]
struct Span {
    index: usize,
    mean: f64,
    min: f64,
    max: f64,
}

impl Span {
    fn of(index: usize, xs: &[f64]) -> Option<Self> {
        if xs.is_empty() {
            return None;
        }
        let (min, max) = xs
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| {
                (lo.min(x), hi.max(x))
            });
        Some(Self {
            index,
            mean: consensus_core::mean(xs),
            min,
            max,
        })
    }
}
