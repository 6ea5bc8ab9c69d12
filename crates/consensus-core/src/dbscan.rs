//! Density-based clustering (DBSCAN).
//!
//! A point is *core* when at least `min_samples` points, itself included,
//! lie within `eps` of it. Clusters grow from core points through other core
//! points; a non-core point reachable from a core point joins that cluster,
//! everything else is [`NOISE`].
//!
//! Clusters are seeded from core points in input order and grown to
//! completion before the next seed is considered, so both the partition and
//! the integer labels are a pure function of the input order. A border point
//! reachable from two clusters belongs to the one seeded first.
use kiddo::{KdTree, SquaredEuclidean};
use log::debug;

use crate::metric::{DistanceMetric, Metric};
use crate::params::{Algorithm, DbscanParams, ParamsError};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Label of points that belong to no cluster.
pub const NOISE: i32 = -1;

/// Below this many points a brute-force scan beats building a tree.
const AUTO_TREE_MIN_POINTS: usize = 64;

/// Bucket size of `kiddo::KdTree`. The tree cannot split a bucket whose
/// items all share one coordinate value, so inputs with that many repeats
/// on an axis are scanned instead.
const TREE_BUCKET_SIZE: usize = 32;

/// Relative slack on the tree query radius; results are re-checked exactly.
const TREE_RADIUS_SLACK: f64 = 1e-9;

/// Validated DBSCAN configuration.
#[derive(Clone, Debug)]
pub struct Dbscan {
    params: DbscanParams,
}

impl Dbscan {
    pub fn new(params: DbscanParams) -> Result<Self, ParamsError> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &DbscanParams {
        &self.params
    }

    /// Assign a cluster label to every point, in input order.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "debug", skip(self, points), fields(points = points.len(), eps = self.params.eps))
    )]
    pub fn fit<const D: usize>(&self, points: &[[f64; D]]) -> Vec<i32> {
        if points.is_empty() {
            return Vec::new();
        }

        let neighborhoods = if self.use_tree(points) {
            tree_neighborhoods(points, self.params.eps)
        } else {
            brute_neighborhoods(points, self.params.eps, &self.params.metric)
        };
        expand_clusters(&neighborhoods, self.params.min_samples)
    }

    fn use_tree<const D: usize>(&self, points: &[[f64; D]]) -> bool {
        let wanted = match self.params.algorithm {
            Algorithm::Brute => false,
            Algorithm::KdTree | Algorithm::BallTree => true,
            Algorithm::Auto => points.len() >= AUTO_TREE_MIN_POINTS,
        };
        if !wanted || D == 0 {
            return false;
        }
        if !self.params.metric.is_euclidean() {
            debug!(
                "metric {} has no tree index, scanning {} points",
                self.params.metric,
                points.len()
            );
            return false;
        }
        if !tree_can_index(points) {
            debug!(
                "{} points are not indexable (non-finite or repeated coordinates), scanning",
                points.len()
            );
            return false;
        }
        true
    }
}

/// Cluster `points` with an arbitrary metric using a brute-force scan.
///
/// Parameters are used as given; see [`DbscanParams::validate`] for the
/// checks [`Dbscan::new`] applies.
pub fn dbscan_with_metric<const D: usize, M>(
    points: &[[f64; D]],
    eps: f64,
    min_samples: usize,
    metric: &M,
) -> Vec<i32>
where
    M: DistanceMetric + ?Sized,
{
    if points.is_empty() {
        return Vec::new();
    }
    let neighborhoods = brute_neighborhoods(points, eps, metric);
    expand_clusters(&neighborhoods, min_samples)
}

/// All-pairs scan. Every neighbourhood contains its own point and is sorted.
fn brute_neighborhoods<const D: usize, M>(points: &[[f64; D]], eps: f64, metric: &M) -> Vec<Vec<usize>>
where
    M: DistanceMetric + ?Sized,
{
    let n = points.len();
    let mut neighborhoods: Vec<Vec<usize>> = vec![Vec::new(); n];
    for i in 0..n {
        neighborhoods[i].push(i);
        for j in (i + 1)..n {
            if metric.distance(&points[i], &points[j]) <= eps {
                neighborhoods[i].push(j);
                neighborhoods[j].push(i);
            }
        }
    }
    neighborhoods
}

/// Euclidean neighbourhoods through a k-d tree, filtered with the same
/// distance expression the brute-force scan uses.
fn tree_neighborhoods<const D: usize>(points: &[[f64; D]], eps: f64) -> Vec<Vec<usize>> {
    let coords = points.to_vec();
    let tree: KdTree<f64, D> = (&coords).into();
    let radius = eps * eps * (1.0 + TREE_RADIUS_SLACK);
    let metric = Metric::Euclidean;

    points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let mut neighbors: Vec<usize> = tree
                .within_unsorted::<SquaredEuclidean>(p, radius)
                .into_iter()
                .map(|nn| nn.item as usize)
                .filter(|&j| j == i || metric.distance(p, &points[j]) <= eps)
                .collect();
            neighbors.sort_unstable();
            neighbors.dedup();
            neighbors
        })
        .collect()
}

fn tree_can_index<const D: usize>(points: &[[f64; D]]) -> bool {
    if points.iter().flatten().any(|v| !v.is_finite()) {
        return false;
    }

    (0..D).all(|axis| {
        let mut values: Vec<f64> = points.iter().map(|p| p[axis]).collect();
        values.sort_by(f64::total_cmp);
        let mut longest = 0usize;
        let mut run = 0usize;
        for (k, v) in values.iter().enumerate() {
            run = if k > 0 && values[k - 1] == *v { run + 1 } else { 1 };
            longest = longest.max(run);
        }
        longest < TREE_BUCKET_SIZE
    })
}

fn expand_clusters(neighborhoods: &[Vec<usize>], min_samples: usize) -> Vec<i32> {
    let n = neighborhoods.len();
    let is_core: Vec<bool> = neighborhoods
        .iter()
        .map(|nb| nb.len() >= min_samples)
        .collect();

    let mut labels = vec![NOISE; n];
    let mut next_label = 0i32;
    let mut stack = Vec::new();

    for seed in 0..n {
        if labels[seed] != NOISE || !is_core[seed] {
            continue;
        }

        let mut i = seed;
        loop {
            if labels[i] == NOISE {
                labels[i] = next_label;
                if is_core[i] {
                    stack.extend(neighborhoods[i].iter().copied().filter(|&v| labels[v] == NOISE));
                }
            }
            match stack.pop() {
                Some(next) => i = next,
                None => break,
            }
        }
        next_label += 1;
    }

    let noise = labels.iter().filter(|&&l| l == NOISE).count();
    debug!("dbscan: {n} points, {next_label} clusters, {noise} noise");
    labels
}
