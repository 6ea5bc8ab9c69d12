use log::warn;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Vertex coordinates of every line drawn in one frame by one volunteer.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PolylinePoints {
    pub x: Vec<Vec<f64>>,
    pub y: Vec<Vec<f64>>,
}

/// One volunteer's lines in one frame.
///
/// `points.x[i]`, `points.y[i]`, `text[i]` and `slope[i]` describe line `i`.
/// `text[i][j]` is the word transcribed after vertex `j`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameExtract {
    pub points: PolylinePoints,
    #[serde(default)]
    pub text: Vec<Vec<String>>,
    pub slope: Vec<f64>,
}

/// One polyline-text extract, keyed by frame.
pub type TextExtract = BTreeMap<String, FrameExtract>;

/// One drawn line of text: vertices, the words between them, and the slope
/// (degrees) of the whole line.
#[derive(Clone, Debug, PartialEq)]
pub struct TextLine {
    pub points: Vec<Point2<f64>>,
    pub text: Vec<String>,
    pub slope: f64,
}

impl TextLine {
    pub fn new(points: Vec<Point2<f64>>, text: Vec<String>, slope: f64) -> Self {
        Self {
            points,
            text,
            slope,
        }
    }

    /// Text slot of vertex `j`. Transcriptions usually have one word fewer
    /// than vertices, so missing slots read as the empty string.
    pub fn word(&self, j: usize) -> &str {
        self.text.get(j).map(String::as_str).unwrap_or("")
    }

    /// Every vertex paired with its text slot.
    pub fn vertices(&self) -> impl Iterator<Item = (Point2<f64>, &str)> + '_ {
        self.points
            .iter()
            .enumerate()
            .map(move |(j, p)| (*p, self.word(j)))
    }

    pub fn x_values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.x).collect()
    }
}

impl FrameExtract {
    /// Split into lines. A line needs coordinates and a slope; its text is
    /// optional. Vertices with non-finite coordinates are dropped together
    /// with their text slot, and lines with a non-finite slope or no vertex
    /// left are dropped entirely.
    pub fn lines(&self) -> Vec<TextLine> {
        let n = self
            .points
            .x
            .len()
            .min(self.points.y.len())
            .min(self.slope.len());

        (0..n)
            .filter_map(|i| {
                let slope = self.slope[i];
                if !slope.is_finite() {
                    warn!("dropping line {i} with non-finite slope {slope}");
                    return None;
                }
                let words = self.text.get(i).map(Vec::as_slice).unwrap_or(&[]);
                let (points, text): (Vec<Point2<f64>>, Vec<String>) = self.points.x[i]
                    .iter()
                    .zip(&self.points.y[i])
                    .enumerate()
                    .filter(|(_, (x, y))| x.is_finite() && y.is_finite())
                    .map(|(j, (&x, &y))| {
                        let word = words.get(j).cloned().unwrap_or_default();
                        (Point2::new(x, y), word)
                    })
                    .unzip();
                if points.is_empty() {
                    return None;
                }
                Some(TextLine::new(points, text, slope))
            })
            .collect()
    }
}

/// Collect the lines of all extracts per frame, in extract order.
///
/// Every frame named by any extract is present, even if none of its lines
/// survive.
pub fn lines_by_frame(extracts: &[TextExtract]) -> BTreeMap<String, Vec<TextLine>> {
    let mut by_frame: BTreeMap<String, Vec<TextLine>> = BTreeMap::new();
    for extract in extracts {
        for (frame, value) in extract {
            by_frame
                .entry(frame.clone())
                .or_default()
                .extend(value.lines());
        }
    }
    by_frame
}
