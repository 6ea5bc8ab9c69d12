use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One reconstructed line of text.
///
/// `clusters_x`, `clusters_y` and `clusters_text` run in parallel, one entry
/// per word position from the start of the line to its end. Coordinates are
/// in the original (un-rotated) image frame, y increasing downward.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LineRecord {
    pub clusters_x: Vec<f64>,
    pub clusters_y: Vec<f64>,
    /// Non-empty transcriptions of each word position, in input order.
    pub clusters_text: Vec<Vec<String>>,
    /// Mean orientation of the line in degrees.
    pub line_slope: f64,
    /// Orientation cluster the line came from.
    pub slope_label: i32,
    /// Column the line came from, `0` left and `1` right.
    pub gutter_label: i32,
}

impl LineRecord {
    pub fn new(line_slope: f64, slope_label: i32, gutter_label: i32) -> Self {
        Self {
            line_slope,
            slope_label,
            gutter_label,
            ..Default::default()
        }
    }

    /// Number of word positions.
    pub fn len(&self) -> usize {
        self.clusters_x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters_x.is_empty()
    }

    /// Most frequent transcription of each word position joined with
    /// spaces. Ties go to the transcription seen first; positions nobody
    /// transcribed are left out.
    pub fn consensus_text(&self) -> String {
        self.clusters_text
            .iter()
            .filter_map(|words| most_common(words))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub(crate) fn push_word(&mut self, x: f64, y: f64, text: Vec<String>) {
        self.clusters_x.push(x);
        self.clusters_y.push(y);
        self.clusters_text.push(text);
    }
}

fn most_common(words: &[String]) -> Option<&str> {
    let mut best: Option<(&str, usize)> = None;
    for word in words {
        let count = words.iter().filter(|w| *w == word).count();
        if best.is_none_or(|(_, c)| count > c) {
            best = Some((word.as_str(), count));
        }
    }
    best.map(|(w, _)| w)
}

/// Output of [`crate::TextReducer::reduce`]: ordered lines per frame.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TextReduction {
    pub frames: BTreeMap<String, Vec<LineRecord>>,
}

impl TextReduction {
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frame(&self, name: &str) -> Option<&[LineRecord]> {
        self.frames.get(name).map(Vec::as_slice)
    }

    pub fn line_count(&self) -> usize {
        self.frames.values().map(Vec::len).sum()
    }
}
