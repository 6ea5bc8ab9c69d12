use consensus_core::{
    cluster_indices, mean, rotation_for_slope, sort_labels, Dbscan, ParamsError, NOISE,
};
use log::debug;
use nalgebra::{Point2, Vector2};

use crate::extract::{lines_by_frame, TextExtract, TextLine};
use crate::gutter::gutter;
use crate::params::TextReducerParams;
use crate::result::{LineRecord, TextReduction};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Rebuilds lines of text from many volunteers' polyline transcriptions.
///
/// Each frame is reduced on its own, top down: columns, then orientations
/// within a column, then lines within an orientation, then word positions
/// within a line.
#[derive(Clone, Debug)]
pub struct TextReducer {
    params: TextReducerParams,
    slope_dbscan: Dbscan,
    line_dbscan: Dbscan,
    word_dbscan: Dbscan,
}

/// A vertex of an orientation cluster, with its position in the frame
/// rotated so the cluster's lines run horizontally.
struct Vertex<'a> {
    point: Point2<f64>,
    rotated: Point2<f64>,
    word: &'a str,
}

impl TextReducer {
    pub fn new(params: TextReducerParams) -> Result<Self, ParamsError> {
        params.validate()?;
        Ok(Self {
            slope_dbscan: Dbscan::new(params.slope_dbscan())?,
            line_dbscan: Dbscan::new(params.line_dbscan())?,
            word_dbscan: Dbscan::new(params.word_dbscan())?,
            params,
        })
    }

    pub fn params(&self) -> &TextReducerParams {
        &self.params
    }

    /// Reduce every frame named by any extract.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, extracts), fields(extracts = extracts.len()))
    )]
    pub fn reduce(&self, extracts: &[TextExtract]) -> TextReduction {
        let frames = lines_by_frame(extracts)
            .into_iter()
            .map(|(frame, lines)| {
                let records = self.reduce_frame(&lines);
                debug!(
                    "frame {frame}: {} drawn lines -> {} reduced lines",
                    lines.len(),
                    records.len()
                );
                (frame, records)
            })
            .collect();
        TextReduction { frames }
    }

    /// Reduce the lines of a single frame, ordered by column, orientation
    /// and position across the page.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "debug", skip(self, lines), fields(lines = lines.len()))
    )]
    pub fn reduce_frame(&self, lines: &[TextLine]) -> Vec<LineRecord> {
        if lines.is_empty() {
            return Vec::new();
        }

        let groups: Vec<Vec<f64>> = lines.iter().map(TextLine::x_values).collect();
        let gutter_labels = gutter(&groups, self.params.eps_gutter);
        let mean_x: Vec<f64> = groups.iter().map(|xs| mean(xs)).collect();

        let mut records = Vec::new();
        for gutter_label in sort_labels(&gutter_labels, &mean_x, mean, false) {
            let column: Vec<&TextLine> = cluster_indices(&gutter_labels, gutter_label)
                .into_iter()
                .map(|i| &lines[i])
                .collect();
            self.reduce_column(&column, gutter_label, &mut records);
        }
        records
    }

    fn reduce_column(&self, column: &[&TextLine], gutter_label: i32, records: &mut Vec<LineRecord>) {
        let symmetry = self.params.slope_symmetry;
        let slopes: Vec<f64> = column.iter().map(|line| line.slope).collect();
        let features: Vec<[f64; 1]> = slopes.iter().map(|&s| [s]).collect();
        let slope_labels = self.slope_dbscan.fit(&features);

        for slope_label in sort_labels(&slope_labels, &slopes, |v| symmetry.mean(v), true) {
            if slope_label == NOISE {
                continue;
            }
            let members = cluster_indices(&slope_labels, slope_label);
            let member_slopes: Vec<f64> = members.iter().map(|&i| slopes[i]).collect();
            let line_slope = symmetry.mean(&member_slopes);

            let rotation = rotation_for_slope(line_slope);
            let vertices: Vec<Vertex<'_>> = members
                .iter()
                .flat_map(|&i| column[i].vertices())
                .map(|(point, word)| Vertex {
                    point,
                    rotated: rotation * point,
                    word,
                })
                .collect();

            let offsets: Vec<f64> = vertices.iter().map(|v| v.rotated.y).collect();
            let features: Vec<[f64; 1]> = offsets.iter().map(|&y| [y]).collect();
            let line_labels = self.line_dbscan.fit(&features);

            for line_label in sort_labels(&line_labels, &offsets, mean, false) {
                if line_label == NOISE {
                    continue;
                }
                let line: Vec<&Vertex<'_>> = cluster_indices(&line_labels, line_label)
                    .into_iter()
                    .map(|i| &vertices[i])
                    .collect();
                let mut record = LineRecord::new(line_slope, slope_label, gutter_label);
                self.reduce_words(&line, &mut record);
                if record.is_empty() {
                    debug!("line {line_label} of slope {slope_label} has only noise words");
                    continue;
                }
                records.push(record);
            }
        }
    }

    fn reduce_words(&self, line: &[&Vertex<'_>], record: &mut LineRecord) {
        let along: Vec<f64> = line.iter().map(|v| v.rotated.x).collect();
        let features: Vec<[f64; 1]> = along.iter().map(|&x| [x]).collect();
        let word_labels = self.word_dbscan.fit(&features);

        for word_label in sort_labels(&word_labels, &along, mean, false) {
            if word_label == NOISE {
                continue;
            }
            let word: Vec<&Vertex<'_>> = cluster_indices(&word_labels, word_label)
                .into_iter()
                .map(|i| line[i])
                .collect();
            let centroid = word
                .iter()
                .fold(Vector2::<f64>::zeros(), |acc, v| acc + v.point.coords)
                / word.len() as f64;
            let text = word
                .iter()
                .filter(|v| !v.word.is_empty())
                .map(|v| v.word.to_string())
                .collect();
            record.push_word(centroid.x, centroid.y, text);
        }
    }
}
