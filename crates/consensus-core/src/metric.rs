use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::angles::{angle_metric, axial_angle_metric};
use crate::params::ParamsError;

/// Distance between two feature vectors of equal length.
///
/// Implement this to cluster with a metric [`Metric`] does not cover; see
/// [`crate::dbscan_with_metric`].
pub trait DistanceMetric {
    fn distance(&self, a: &[f64], b: &[f64]) -> f64;
}

impl<F> DistanceMetric for F
where
    F: Fn(&[f64], &[f64]) -> f64,
{
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        self(a, b)
    }
}

/// Named distance functions accepted by the reducers.
///
/// The angle metrics read only the first coordinate of each vector. In JSON
/// a metric is its name (aliases included) or `{"minkowski": {"p": 3.0}}`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "MetricRepr")]
pub enum Metric {
    #[default]
    Euclidean,
    Manhattan,
    Chebyshev,
    /// Minkowski distance of order `p` (2 when unset).
    Minkowski { p: Option<f64> },
    /// Directed orientation in degrees, period 360.
    Angle,
    /// Undirected orientation in degrees, period 180.
    AxialAngle,
}

impl Metric {
    /// Minkowski exponent if this metric is a member of that family.
    pub fn minkowski_p(&self) -> Option<f64> {
        match self {
            Metric::Euclidean => Some(2.0),
            Metric::Manhattan => Some(1.0),
            Metric::Chebyshev => Some(f64::INFINITY),
            Metric::Minkowski { p } => Some(p.unwrap_or(2.0)),
            Metric::Angle | Metric::AxialAngle => None,
        }
    }

    /// Whether neighbour queries can run on a squared-Euclidean k-d tree.
    pub fn is_euclidean(&self) -> bool {
        self.minkowski_p() == Some(2.0)
    }
}

impl DistanceMetric for Metric {
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        let pairs = a.iter().zip(b.iter());
        match self {
            Metric::Euclidean => pairs.map(|(x, y)| (x - y).powi(2)).sum::<f64>().sqrt(),
            Metric::Manhattan => pairs.map(|(x, y)| (x - y).abs()).sum(),
            Metric::Chebyshev => pairs.map(|(x, y)| (x - y).abs()).fold(0.0, f64::max),
            Metric::Minkowski { p } => {
                let p = p.unwrap_or(2.0);
                if p.is_infinite() {
                    return pairs.map(|(x, y)| (x - y).abs()).fold(0.0, f64::max);
                }
                pairs
                    .map(|(x, y)| (x - y).abs().powf(p))
                    .sum::<f64>()
                    .powf(1.0 / p)
            }
            Metric::Angle => angle_metric(a[0], b[0]),
            Metric::AxialAngle => axial_angle_metric(a[0], b[0]),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Metric::Euclidean => "euclidean",
            Metric::Manhattan => "manhattan",
            Metric::Chebyshev => "chebyshev",
            Metric::Minkowski { .. } => "minkowski",
            Metric::Angle => "angle",
            Metric::AxialAngle => "axial_angle",
        };
        f.write_str(name)
    }
}

impl FromStr for Metric {
    type Err = ParamsError;

    /// Parse a metric name. `minkowski` parses with an unset exponent; set
    /// it with [`Metric::with_p`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "euclidean" | "l2" => Ok(Metric::Euclidean),
            "manhattan" | "cityblock" | "l1" => Ok(Metric::Manhattan),
            "chebyshev" | "infinity" => Ok(Metric::Chebyshev),
            "minkowski" => Ok(Metric::Minkowski { p: None }),
            "angle" => Ok(Metric::Angle),
            "axial_angle" => Ok(Metric::AxialAngle),
            other => Err(ParamsError::UnknownMetric(other.to_string())),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MetricRepr {
    Name(String),
    Exponent(WithExponent),
}

#[derive(Deserialize)]
#[serde(rename_all = "snake_case")]
enum WithExponent {
    Minkowski {
        #[serde(default)]
        p: Option<f64>,
    },
}

impl TryFrom<MetricRepr> for Metric {
    type Error = ParamsError;

    fn try_from(repr: MetricRepr) -> Result<Self, Self::Error> {
        match repr {
            MetricRepr::Name(name) => name.parse(),
            MetricRepr::Exponent(WithExponent::Minkowski { p }) => Ok(Metric::Minkowski { p }),
        }
    }
}

impl Metric {
    /// Attach a Minkowski exponent, keeping the current one when `p` is
    /// `None`. Other metrics are returned unchanged.
    pub fn with_p(self, p: Option<f64>) -> Self {
        match self {
            Metric::Minkowski { p: current } => Metric::Minkowski { p: p.or(current) },
            other => other,
        }
    }
}
