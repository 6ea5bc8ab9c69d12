use consensus_core::{Algorithm, DbscanParams, Metric, ParamsError};
use serde::{Deserialize, Serialize};

/// Configuration for [`crate::PointReducer`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointReducerParams {
    /// Neighbourhood radius in pixels.
    pub eps: f64,
    /// Minimum cluster size. Tools with `min_samples` or fewer clicks are
    /// not clustered at all.
    pub min_samples: usize,
    pub metric: Metric,
    pub algorithm: Algorithm,
    /// Minkowski exponent, used when `metric` is `minkowski`.
    pub p: Option<f64>,
}

impl Default for PointReducerParams {
    fn default() -> Self {
        Self {
            eps: 5.0,
            min_samples: 3,
            metric: Metric::Euclidean,
            algorithm: Algorithm::Auto,
            p: None,
        }
    }
}

impl PointReducerParams {
    /// Clustering parameters for the per-tool pass.
    pub fn dbscan(&self) -> DbscanParams {
        DbscanParams {
            eps: self.eps,
            min_samples: self.min_samples,
            metric: self.metric.with_p(self.p),
            algorithm: self.algorithm,
        }
    }

    pub fn validate(&self) -> Result<(), ParamsError> {
        self.dbscan().validate()
    }
}
