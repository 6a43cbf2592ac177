//! Isochore views of a GC-content series
//!
//! One ordered `(Start, GC_Content)` table feeds four views: the original
//! series, a block-averaged series, a trailing moving average and a GC
//! content histogram. Every window is also assigned one of five isochore
//! classes.

use std::fmt;
use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};
use crate::gc::{block_average, moving_average};
use crate::types::{BlockPoint, IsochoreRow, SeriesPoint};

pub const DEFAULT_AVG_POINTS: usize = 100;
pub const DEFAULT_MOVING_WINDOW: usize = 50;
pub const DEFAULT_HISTOGRAM_BINS: usize = 50;
pub const DEFAULT_BOUNDARIES: [f64; 4] = [37.0, 41.0, 46.0, 53.0];

/// Upper end of the GC percentage scale, drawn as the H3 rule
pub const GC_PERCENT_MAX: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IsochoreClass {
    L1,
    L2,
    H1,
    H2,
    H3,
}

impl IsochoreClass {
    pub const ALL: [IsochoreClass; 5] = [
        IsochoreClass::L1,
        IsochoreClass::L2,
        IsochoreClass::H1,
        IsochoreClass::H2,
        IsochoreClass::H3,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            IsochoreClass::L1 => "L1",
            IsochoreClass::L2 => "L2",
            IsochoreClass::H1 => "H1",
            IsochoreClass::H2 => "H2",
            IsochoreClass::H3 => "H3",
        }
    }
}

impl fmt::Display for IsochoreClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Ascending GC thresholds separating the five isochore classes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IsochoreBoundaries {
    thresholds: [f64; 4],
}

impl Default for IsochoreBoundaries {
    fn default() -> Self {
        Self { thresholds: DEFAULT_BOUNDARIES }
    }
}

impl IsochoreBoundaries {
    pub fn new(thresholds: [f64; 4]) -> Result<Self> {
        let boundaries = Self { thresholds };
        boundaries.validate()?;
        Ok(boundaries)
    }

    pub fn validate(&self) -> Result<()> {
        if self.thresholds.iter().any(|t| !t.is_finite()) {
            return Err(AnalysisError::invalid_parameter(format!(
                "isochore boundaries must be finite: {:?}",
                self.thresholds
            )));
        }
        if !self.thresholds.windows(2).all(|w| w[0] < w[1]) {
            return Err(AnalysisError::invalid_parameter(format!(
                "isochore boundaries must be strictly ascending: {:?}",
                self.thresholds
            )));
        }
        Ok(())
    }

    pub fn thresholds(&self) -> [f64; 4] {
        self.thresholds
    }

    /// Class of a GC percentage; each threshold belongs to the class above it
    pub fn classify(&self, gc_content: f64) -> IsochoreClass {
        let [l1, l2, h1, h2] = self.thresholds;
        if gc_content < l1 {
            IsochoreClass::L1
        } else if gc_content < l2 {
            IsochoreClass::L2
        } else if gc_content < h1 {
            IsochoreClass::H1
        } else if gc_content < h2 {
            IsochoreClass::H2
        } else {
            IsochoreClass::H3
        }
    }

    /// Upper bound of every class, paired with the class it closes
    pub fn rules(&self) -> [(f64, IsochoreClass); 5] {
        let [l1, l2, h1, h2] = self.thresholds;
        [
            (l1, IsochoreClass::L1),
            (l2, IsochoreClass::L2),
            (h1, IsochoreClass::H1),
            (h2, IsochoreClass::H2),
            (GC_PERCENT_MAX, IsochoreClass::H3),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IsochoreParams {
    pub avg_points: usize,
    pub moving_window: usize,
    pub histogram_bins: usize,
    pub boundaries: IsochoreBoundaries,
}

impl Default for IsochoreParams {
    fn default() -> Self {
        Self {
            avg_points: DEFAULT_AVG_POINTS,
            moving_window: DEFAULT_MOVING_WINDOW,
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
            boundaries: IsochoreBoundaries::default(),
        }
    }
}

impl IsochoreParams {
    pub fn validate(&self) -> Result<()> {
        if self.avg_points == 0 {
            return Err(AnalysisError::invalid_parameter("avg_points must be at least 1"));
        }
        if self.moving_window == 0 {
            return Err(AnalysisError::invalid_parameter("moving_window must be at least 1"));
        }
        if self.histogram_bins == 0 {
            return Err(AnalysisError::invalid_parameter("histogram_bins must be at least 1"));
        }
        self.boundaries.validate()
    }

    /// Block size actually used for a series of `len` points
    pub fn effective_avg_points(&self, len: usize) -> usize {
        self.avg_points.min(len).max(1)
    }
}

/// Equal-width frequency distribution; `edges.len() == counts.len() + 1`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    pub fn bins(&self) -> usize {
        self.counts.len()
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// `(left edge, right edge, count)` for every bin
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64, usize)> + '_ {
        self.edges
            .windows(2)
            .zip(self.counts.iter())
            .map(|(e, &c)| (e[0], e[1], c))
    }
}

/// Histogram of `values` over `bins` equal-width bins spanning the observed
/// range.
///
/// The last bin is closed on the right. A constant series is widened by 0.5
/// on each side and an empty one uses `[0, 1]`.
pub fn histogram(values: &[f64], bins: usize) -> Histogram {
    let bins = bins.max(1);
    let (mut lo, mut hi) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));

    if values.is_empty() {
        lo = 0.0;
        hi = 1.0;
    } else if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }

    let width = (hi - lo) / bins as f64;
    let edges: Vec<f64> = (0..=bins).map(|i| lo + width * i as f64).collect();
    let mut counts = vec![0usize; bins];

    for &v in values {
        let idx = (((v - lo) / (hi - lo)) * bins as f64).floor() as usize;
        counts[idx.min(bins - 1)] += 1;
    }

    Histogram { edges, counts }
}

/// Base pairs to megabases for display axes
pub fn to_megabases(position: u64) -> f64 {
    position as f64 / 1e6
}

#[derive(Debug, Clone, PartialEq)]
pub struct IsochoreViews {
    pub original: Vec<SeriesPoint>,
    pub block_averaged: Vec<BlockPoint>,
    pub moving: Vec<SeriesPoint>,
    pub histogram: Histogram,
    /// One class per input row
    pub classes: Vec<IsochoreClass>,
    /// Block size used for `block_averaged`
    pub block_size: usize,
}

#[derive(Debug, Clone)]
pub struct IsochoreSeriesBuilder {
    params: IsochoreParams,
}

impl IsochoreSeriesBuilder {
    pub fn new(params: IsochoreParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &IsochoreParams {
        &self.params
    }

    pub fn classify(&self, gc_content: f64) -> IsochoreClass {
        self.params.boundaries.classify(gc_content)
    }

    pub fn build(&self, rows: &[IsochoreRow]) -> IsochoreViews {
        let original: Vec<SeriesPoint> = rows.iter().map(SeriesPoint::from).collect();
        let values: Vec<f64> = rows.iter().map(|r| r.gc_content).collect();

        IsochoreViews {
            block_averaged: block_average(&original, self.params.avg_points),
            moving: moving_average(&original, self.params.moving_window),
            histogram: histogram(&values, self.params.histogram_bins),
            classes: values.iter().map(|&v| self.classify(v)).collect(),
            block_size: self.params.effective_avg_points(rows.len()),
            original,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_boundaries() {
        let b = IsochoreBoundaries::default();
        assert_eq!(b.classify(36.9), IsochoreClass::L1);
        assert_eq!(b.classify(37.0), IsochoreClass::L2);
        assert_eq!(b.classify(41.0), IsochoreClass::H1);
        assert_eq!(b.classify(46.0), IsochoreClass::H2);
        assert_eq!(b.classify(52.9), IsochoreClass::H2);
        assert_eq!(b.classify(53.0), IsochoreClass::H3);
    }

    #[test]
    fn test_classify_is_total() {
        let b = IsochoreBoundaries::default();
        assert_eq!(b.classify(f64::NEG_INFINITY), IsochoreClass::L1);
        assert_eq!(b.classify(-5.0), IsochoreClass::L1);
        assert_eq!(b.classify(250.0), IsochoreClass::H3);
    }

    #[test]
    fn test_boundaries_must_ascend() {
        assert!(IsochoreBoundaries::new([37.0, 42.0, 47.0, 53.0]).is_ok());
        assert!(IsochoreBoundaries::new([37.0, 37.0, 46.0, 53.0]).is_err());
        assert!(IsochoreBoundaries::new([37.0, 41.0, f64::NAN, 53.0]).is_err());
    }

    #[test]
    fn test_rules_end_at_hundred() {
        let rules = IsochoreBoundaries::default().rules();
        assert_eq!(rules[0], (37.0, IsochoreClass::L1));
        assert_eq!(rules[4], (100.0, IsochoreClass::H3));
    }

    #[test]
    fn test_histogram_edges_and_counts() {
        let h = histogram(&[0.0, 1.0, 2.0, 3.0, 4.0], 4);
        assert_eq!(h.edges, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
        // the maximum falls in the last, right-closed bin
        assert_eq!(h.counts, vec![1, 1, 1, 2]);
        assert_eq!(h.total(), 5);
    }

    #[test]
    fn test_histogram_constant_series() {
        let h = histogram(&[42.0, 42.0, 42.0], 50);
        assert_eq!(h.bins(), 50);
        assert_eq!(h.edges[0], 41.5);
        assert_eq!(h.edges[50], 42.5);
        assert_eq!(h.total(), 3);
    }

    #[test]
    fn test_histogram_empty_series() {
        let h = histogram(&[], 10);
        assert_eq!(h.bins(), 10);
        assert_eq!(h.edges[0], 0.0);
        assert_eq!(h.total(), 0);
    }

    #[test]
    fn test_params_reject_zero() {
        let params = IsochoreParams { avg_points: 0, ..IsochoreParams::default() };
        assert!(IsochoreSeriesBuilder::new(params).is_err());

        let params = IsochoreParams { histogram_bins: 0, ..IsochoreParams::default() };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_build_all_views() {
        let rows: Vec<IsochoreRow> = (0..10)
            .map(|i| IsochoreRow::new(i * 100_000, 35.0 + i as f64 * 2.0))
            .collect();
        let params = IsochoreParams {
            avg_points: 4,
            moving_window: 3,
            ..IsochoreParams::default()
        };
        let views = IsochoreSeriesBuilder::new(params).unwrap().build(&rows);

        assert_eq!(views.original.len(), 10);
        assert_eq!(views.original[3], SeriesPoint::new(300_000, 41.0));
        assert_eq!(views.block_averaged.len(), 3);
        assert_eq!(views.block_averaged[2].start, 800_000);
        assert_eq!(views.block_averaged[2].end, 900_000);
        assert_eq!(views.moving.len(), 10);
        assert_eq!(views.histogram.total(), 10);
        assert_eq!(views.classes[0], IsochoreClass::L1);
        assert_eq!(views.classes[9], IsochoreClass::H3);
        assert_eq!(views.block_size, 4);
    }

    #[test]
    fn test_effective_avg_points_small_table() {
        let params = IsochoreParams::default();
        assert_eq!(params.effective_avg_points(7), 7);
        assert_eq!(params.effective_avg_points(0), 1);
        assert_eq!(params.effective_avg_points(1000), 100);
    }

    #[test]
    fn test_to_megabases() {
        assert_eq!(to_megabases(2_500_000), 2.5);
    }
}
