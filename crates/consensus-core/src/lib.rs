//! Core clustering primitives for crowd-annotation consensus.
//!
//! This crate is intentionally small and purely numeric. It knows nothing
//! about annotation tools, frames or transcriptions; the reducers in
//! `consensus-points` and `consensus-text` build on it.
//!
//! - [`Dbscan`]: density clustering with a pluggable [`DistanceMetric`].
//! - [`angle_metric`], [`avg_angle`] and their line-symmetric siblings.
//! - [`sort_labels`]: turns arbitrary cluster ids into a meaningful order.
//! - [`rotate_points`]: rigid rotation about the origin.

mod angles;
mod dbscan;
mod labels;
mod logger;
mod metric;
mod params;
mod rotation;

pub use angles::{
    angle_metric, avg_angle, avg_axial_angle, axial_angle_metric, SlopeSymmetry,
};
pub use dbscan::{dbscan_with_metric, Dbscan, NOISE};
pub use labels::{cluster_indices, mean, sort_labels};
pub use metric::{DistanceMetric, Metric};
pub use params::{validate_threshold, Algorithm, DbscanParams, ParamsError};
pub use rotation::{rotate_points, rotation_for_slope};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
