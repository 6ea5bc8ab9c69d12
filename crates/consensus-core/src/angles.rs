//! Circular statistics for orientations measured in degrees.
//!
//! Slopes live on a circle: the arithmetic mean of 350° and 10° is 180°,
//! while the orientation both annotators meant is 0°. Means here are taken
//! over unit vectors and distances wrap around the period.
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::metric::Metric;

/// Squared resultant length below which a set of angles has no dominant
/// direction (e.g. `[0, 180]` under the directed mean).
const MIN_RESULTANT_SQ: f64 = 1e-12;

/// How two text orientations are compared.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlopeSymmetry {
    /// θ and θ + 180° describe the same line; period 180°.
    #[default]
    Axial,
    /// θ and θ + 180° are opposite directions; period 360°.
    Directed,
}

impl SlopeSymmetry {
    /// Distance between two slopes under this symmetry.
    pub fn distance(self, a: f64, b: f64) -> f64 {
        match self {
            SlopeSymmetry::Axial => axial_angle_metric(a, b),
            SlopeSymmetry::Directed => angle_metric(a, b),
        }
    }

    /// Named clustering metric for one-dimensional slope features.
    pub fn metric(self) -> Metric {
        match self {
            SlopeSymmetry::Axial => Metric::AxialAngle,
            SlopeSymmetry::Directed => Metric::Angle,
        }
    }

    /// Circular mean of `values` under this symmetry.
    pub fn mean(self, values: &[f64]) -> f64 {
        match self {
            SlopeSymmetry::Axial => avg_axial_angle(values),
            SlopeSymmetry::Directed => avg_angle(values),
        }
    }
}

fn circular_distance(a: f64, b: f64, period: f64) -> f64 {
    let d = (a - b).abs() % period;
    d.min(period - d)
}

/// Acute angular distance in degrees on the full circle, in `[0, 180]`.
///
/// `angle_metric(350.0, 10.0) == 20.0`.
pub fn angle_metric(a: f64, b: f64) -> f64 {
    circular_distance(a, b, 360.0)
}

/// Angular distance between two undirected lines, in `[0, 90]`.
///
/// A line at 0° and one at 180° are the same line, so their distance is 0.
pub fn axial_angle_metric(a: f64, b: f64) -> f64 {
    circular_distance(a, b, 180.0)
}

/// Mean over unit vectors of `factor * θ`, scaled back by `factor`.
fn circular_mean(values: &[f64], factor: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let sum = values.iter().fold(Vector2::<f64>::zeros(), |acc, &theta| {
        let t = (factor * theta).to_radians();
        acc + Vector2::new(t.cos(), t.sin())
    });
    let mean = sum / values.len() as f64;
    if mean.norm_squared() < MIN_RESULTANT_SQ {
        return 0.0;
    }

    mean.y.atan2(mean.x).to_degrees() / factor
}

/// Circular mean of directed angles in degrees, in `(-180, 180]`.
///
/// Returns `0.0` for an empty slice or when the angles cancel out.
pub fn avg_angle(values: &[f64]) -> f64 {
    circular_mean(values, 1.0)
}

/// Double-angle mean of undirected line orientations, in `(-90, 90]`.
///
/// Returns `0.0` for an empty slice or when the orientations cancel out.
pub fn avg_axial_angle(values: &[f64]) -> f64 {
    circular_mean(values, 2.0)
}
