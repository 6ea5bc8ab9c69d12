use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;

/// Summary of one point cluster.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointCluster {
    pub count: usize,
    pub mean_x: f64,
    pub mean_y: f64,
    /// Unbiased (N-1) sample variances and covariance; zero for a singleton.
    pub var_x: f64,
    pub var_y: f64,
    pub covar_xy: f64,
}

/// Clustering result for one tool.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolClusters {
    /// Raw label of every click of the tool, in input order (`-1` = noise).
    pub cluster_labels: Vec<i32>,
    /// One entry per non-noise cluster, ascending label order.
    pub clusters: Vec<PointCluster>,
}

/// Output of [`crate::PointReducer::reduce`], keyed by tool name.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PointReduction {
    pub tools: BTreeMap<String, ToolClusters>,
}

impl PointReduction {
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Flatten into the keyed layout downstream consumers read:
    /// `"{tool}_cluster_labels"`, `"{tool}_clusters_count"`,
    /// `"{tool}_clusters_x"`, `"{tool}_clusters_y"`, `"{tool}_clusters_var_x"`,
    /// `"{tool}_clusters_var_y"` and `"{tool}_clusters_var_x_y"`.
    ///
    /// A tool whose clicks were all noise only carries its labels.
    pub fn to_flat_map(&self) -> Map<String, Value> {
        let mut out = Map::new();
        for (tool, result) in &self.tools {
            out.insert(
                format!("{tool}_cluster_labels"),
                json!(result.cluster_labels),
            );
            if result.clusters.is_empty() {
                continue;
            }

            let clusters = &result.clusters;
            out.insert(format!("{tool}_clusters_count"), column(clusters, |c| c.count));
            out.insert(format!("{tool}_clusters_x"), column(clusters, |c| c.mean_x));
            out.insert(format!("{tool}_clusters_y"), column(clusters, |c| c.mean_y));
            out.insert(format!("{tool}_clusters_var_x"), column(clusters, |c| c.var_x));
            out.insert(format!("{tool}_clusters_var_y"), column(clusters, |c| c.var_y));
            out.insert(
                format!("{tool}_clusters_var_x_y"),
                column(clusters, |c| c.covar_xy),
            );
        }
        out
    }
}

fn column<T: Serialize>(clusters: &[PointCluster], field: impl Fn(&PointCluster) -> T) -> Value {
    json!(clusters.iter().map(field).collect::<Vec<T>>())
}
