//! Point-annotation consensus.
//!
//! Every annotation tool (say `"T0_toolIndex0"` for "mark the eyes",
//! `"T0_toolIndex1"` for "mark the tail") gets one density clustering pass
//! over all clicks made with it. Each cluster is summarised by its size,
//! centroid and sample covariance.
//!
//! ```
//! use consensus_points::{PointExtract, PointReducer, PointReducerParams};
//!
//! let extract: PointExtract = [
//!     ("point_x".to_string(), vec![0.0, 1.0, 100.0]),
//!     ("point_y".to_string(), vec![0.0, 1.0, 100.0]),
//! ]
//! .into_iter()
//! .collect();
//!
//! let params = PointReducerParams { min_samples: 1, ..Default::default() };
//! let reducer = PointReducer::new(params).unwrap();
//! let reduction = reducer.reduce(&[extract]);
//! assert_eq!(reduction.tools["point"].clusters.len(), 2);
//! ```

mod extract;
mod params;
mod reducer;
mod result;

pub use extract::{points_by_tool, tool_name, PointExtract};
pub use params::PointReducerParams;
pub use reducer::PointReducer;
pub use result::{PointCluster, PointReduction, ToolClusters};
