use consensus_core::{
    validate_threshold, Algorithm, DbscanParams, Metric, ParamsError, SlopeSymmetry,
};
use serde::{Deserialize, Serialize};

/// Configuration for [`crate::TextReducer`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextReducerParams {
    /// Orientation radius in degrees.
    pub eps_slope: f64,
    /// Radius across lines, in pixels of the rotated frame.
    pub eps_line: f64,
    /// Radius along a line, in pixels of the rotated frame.
    pub eps_word: f64,
    /// Shared by all three clustering levels.
    pub min_samples: usize,
    /// Metric of the line and word levels. Slopes always use the circular
    /// metric picked by `slope_symmetry`.
    pub metric: Metric,
    pub algorithm: Algorithm,
    pub p: Option<f64>,
    /// Smallest gap between column means that counts as a gutter.
    pub eps_gutter: f64,
    pub slope_symmetry: SlopeSymmetry,
}

impl Default for TextReducerParams {
    fn default() -> Self {
        Self {
            eps_slope: 25.0,
            eps_line: 40.0,
            eps_word: 40.0,
            min_samples: 1,
            metric: Metric::Euclidean,
            algorithm: Algorithm::Auto,
            p: None,
            eps_gutter: 0.0,
            slope_symmetry: SlopeSymmetry::Axial,
        }
    }
}

impl TextReducerParams {
    fn level(&self, eps: f64, metric: Metric) -> DbscanParams {
        DbscanParams {
            eps,
            min_samples: self.min_samples,
            metric,
            algorithm: self.algorithm,
        }
    }

    pub fn slope_dbscan(&self) -> DbscanParams {
        self.level(self.eps_slope, self.slope_symmetry.metric())
    }

    pub fn line_dbscan(&self) -> DbscanParams {
        self.level(self.eps_line, self.metric.with_p(self.p))
    }

    pub fn word_dbscan(&self) -> DbscanParams {
        self.level(self.eps_word, self.metric.with_p(self.p))
    }

    pub fn validate(&self) -> Result<(), ParamsError> {
        self.slope_dbscan().validate()?;
        self.line_dbscan().validate()?;
        self.word_dbscan().validate()?;
        validate_threshold("eps_gutter", self.eps_gutter)
    }
}
