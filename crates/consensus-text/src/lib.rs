//! Text-line consensus from polyline transcriptions.
//!
//! Volunteers trace each line of text as a polyline and type the word that
//! follows every vertex. Collecting those tracings per frame, the reducer
//! splits the page into at most two columns, groups lines by orientation,
//! rotates each orientation group flat and then clusters across lines and
//! along them. The result is one [`LineRecord`] per reconstructed line with
//! the candidate transcriptions of every word position.
//!
//! The image coordinate system is left handed, y increasing downward.

mod extract;
mod gutter;
mod params;
mod reducer;
mod result;

pub use extract::{lines_by_frame, FrameExtract, PolylinePoints, TextExtract, TextLine};
pub use gutter::gutter;
pub use params::TextReducerParams;
pub use reducer::TextReducer;
pub use result::{LineRecord, TextReduction};
