//! Facade crate for the `consensus-*` workspace.
//!
//! Turns many volunteers' annotations of one subject into a consensus
//! answer:
//! - point clicks become per-tool clusters with centroid and covariance
//!   ([`points`]),
//! - polyline transcriptions become ordered lines of text with candidate
//!   words per position ([`text`]).
//!
//! ## Quickstart
//!
//! ```
//! use consensus::{reduce_points, ReducerOptions};
//! use consensus::points::PointExtract;
//!
//! let extract: PointExtract = [
//!     ("point_x".to_string(), vec![0.0, 1.0, 100.0]),
//!     ("point_y".to_string(), vec![0.0, 1.0, 100.0]),
//! ]
//! .into_iter()
//! .collect();
//!
//! let options = ReducerOptions::new().with("min_samples", "1");
//! let reduction = reduce_points(&[extract], &options).unwrap();
//! let flat = reduction.to_flat_map();
//! assert_eq!(flat["point_clusters_count"], serde_json::json!([2, 1]));
//! ```
//!
//! ## API map
//! - `consensus::core`: DBSCAN, metrics, circular statistics, label ordering.
//! - `consensus::points`: point reducer.
//! - `consensus::text`: gutter split and text-line reducer.
//! - [`ReducerOptions`]: string `key=value` options into typed parameters.
//! - [`io`]: JSON extract files.

pub use consensus_core as core;
pub use consensus_points as points;
pub use consensus_text as text;

pub mod io;
mod options;

pub use options::{OptionsError, ReducerOptions};

use consensus_points::{PointExtract, PointReducer, PointReduction};
use consensus_text::{TextExtract, TextReducer, TextReduction};

/// Cluster point extracts with parameters taken from `options`.
pub fn reduce_points(
    extracts: &[PointExtract],
    options: &ReducerOptions,
) -> Result<PointReduction, OptionsError> {
    let reducer = PointReducer::new(options.point_params()?)?;
    Ok(reducer.reduce(extracts))
}

/// Rebuild text lines from polyline extracts with parameters taken from
/// `options`.
pub fn reduce_text(
    extracts: &[TextExtract],
    options: &ReducerOptions,
) -> Result<TextReduction, OptionsError> {
    let reducer = TextReducer::new(options.text_params()?)?;
    Ok(reducer.reduce(extracts))
}
