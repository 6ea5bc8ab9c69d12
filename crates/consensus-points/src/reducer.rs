use consensus_core::{cluster_indices, Dbscan, ParamsError, NOISE};
use log::debug;
use nalgebra::{Matrix2, Point2, Vector2};
use std::collections::{BTreeMap, BTreeSet};

use crate::extract::{points_by_tool, PointExtract};
use crate::params::PointReducerParams;
use crate::result::{PointCluster, PointReduction, ToolClusters};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Clusters point annotations tool by tool.
#[derive(Clone, Debug)]
pub struct PointReducer {
    params: PointReducerParams,
    dbscan: Dbscan,
}

impl PointReducer {
    pub fn new(params: PointReducerParams) -> Result<Self, ParamsError> {
        let dbscan = Dbscan::new(params.dbscan())?;
        Ok(Self { params, dbscan })
    }

    pub fn params(&self) -> &PointReducerParams {
        &self.params
    }

    /// Group extracts by tool and cluster each tool.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, extracts), fields(extracts = extracts.len()))
    )]
    pub fn reduce(&self, extracts: &[PointExtract]) -> PointReduction {
        self.reduce_points(&points_by_tool(extracts))
    }

    /// Cluster already grouped clicks. Tools with `min_samples` or fewer
    /// clicks are left out of the result.
    pub fn reduce_points(&self, by_tool: &BTreeMap<String, Vec<Point2<f64>>>) -> PointReduction {
        let tools = by_tool
            .iter()
            .filter_map(|(tool, points)| {
                let clusters = self.cluster_tool(points);
                if clusters.is_none() {
                    debug!(
                        "tool {tool}: {} clicks, need more than {}; skipped",
                        points.len(),
                        self.params.min_samples
                    );
                }
                clusters.map(|c| (tool.clone(), c))
            })
            .collect();
        PointReduction { tools }
    }

    /// Cluster the clicks of one tool, `None` when there are too few.
    pub fn cluster_tool(&self, points: &[Point2<f64>]) -> Option<ToolClusters> {
        if points.len() <= self.params.min_samples {
            return None;
        }

        let coords: Vec<[f64; 2]> = points.iter().map(|p| [p.x, p.y]).collect();
        let cluster_labels = self.dbscan.fit(&coords);

        let distinct: BTreeSet<i32> = cluster_labels.iter().copied().collect();
        let clusters: Vec<PointCluster> = distinct
            .into_iter()
            .filter(|&label| label != NOISE)
            .map(|label| {
                let members: Vec<Point2<f64>> = cluster_indices(&cluster_labels, label)
                    .into_iter()
                    .map(|i| points[i])
                    .collect();
                summarize(&members)
            })
            .collect();

        debug!(
            "{} clicks -> {} clusters",
            points.len(),
            clusters.len()
        );
        Some(ToolClusters {
            cluster_labels,
            clusters,
        })
    }
}

/// Count, centroid and unbiased sample covariance of a non-empty cluster.
///
/// A singleton has no spread to estimate; its variances are reported as 0.
fn summarize(members: &[Point2<f64>]) -> PointCluster {
    let n = members.len();
    let centroid = members
        .iter()
        .fold(Vector2::<f64>::zeros(), |acc, p| acc + p.coords)
        / n as f64;

    let cov = if n > 1 {
        members.iter().fold(Matrix2::<f64>::zeros(), |acc, p| {
            let d = p.coords - centroid;
            acc + d * d.transpose()
        }) / (n - 1) as f64
    } else {
        Matrix2::zeros()
    };

    PointCluster {
        count: n,
        mean_x: centroid.x,
        mean_y: centroid.y,
        var_x: cov[(0, 0)],
        var_y: cov[(1, 1)],
        covar_xy: cov[(0, 1)],
    }
}
