use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::metric::Metric;

/// Errors raised while validating clustering parameters.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ParamsError {
    #[error("eps must be a positive finite number (got {0})")]
    InvalidEps(f64),
    #[error("min_samples must be at least 1 (got {0})")]
    InvalidMinSamples(usize),
    #[error("minkowski p must be >= 1 (got {0})")]
    InvalidP(f64),
    #[error("{name} must be a finite, non-negative number (got {value})")]
    InvalidThreshold { name: &'static str, value: f64 },
    #[error("unknown metric `{0}`")]
    UnknownMetric(String),
    #[error("unknown neighbour search algorithm `{0}`")]
    UnknownAlgorithm(String),
}

/// Neighbour search strategy.
///
/// Every strategy yields the same neighbourhoods; they differ only in cost.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// k-d tree for larger Euclidean inputs, brute force otherwise.
    #[default]
    Auto,
    KdTree,
    /// Accepted for compatibility; served by the k-d tree.
    BallTree,
    Brute,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Algorithm::Auto => "auto",
            Algorithm::KdTree => "kd_tree",
            Algorithm::BallTree => "ball_tree",
            Algorithm::Brute => "brute",
        })
    }
}

impl FromStr for Algorithm {
    type Err = ParamsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Algorithm::Auto),
            "kd_tree" => Ok(Algorithm::KdTree),
            "ball_tree" => Ok(Algorithm::BallTree),
            "brute" => Ok(Algorithm::Brute),
            other => Err(ParamsError::UnknownAlgorithm(other.to_string())),
        }
    }
}

/// Parameters for one density clustering pass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DbscanParams {
    /// Neighbourhood radius (inclusive).
    pub eps: f64,
    /// Minimum neighbourhood size, the point itself included, for a core point.
    pub min_samples: usize,
    pub metric: Metric,
    pub algorithm: Algorithm,
}

impl Default for DbscanParams {
    fn default() -> Self {
        Self {
            eps: 0.5,
            min_samples: 5,
            metric: Metric::Euclidean,
            algorithm: Algorithm::Auto,
        }
    }
}

impl DbscanParams {
    pub fn new(eps: f64, min_samples: usize) -> Self {
        Self {
            eps,
            min_samples,
            ..Self::default()
        }
    }

    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Check every field; reducers call this once at construction.
    pub fn validate(&self) -> Result<(), ParamsError> {
        validate_eps(self.eps)?;
        if self.min_samples == 0 {
            return Err(ParamsError::InvalidMinSamples(self.min_samples));
        }
        if let Metric::Minkowski { p: Some(p) } = self.metric {
            if p.is_nan() || p < 1.0 {
                return Err(ParamsError::InvalidP(p));
            }
        }
        Ok(())
    }
}

/// Validate a distance that may be zero, such as a minimum gap width.
pub fn validate_threshold(name: &'static str, value: f64) -> Result<(), ParamsError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ParamsError::InvalidThreshold { name, value })
    }
}

/// `eps` must be strictly positive and finite.
fn validate_eps(eps: f64) -> Result<(), ParamsError> {
    if eps.is_finite() && eps > 0.0 {
        Ok(())
    } else {
        Err(ParamsError::InvalidEps(eps))
    }
}
