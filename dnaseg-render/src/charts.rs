//! Chart builders, one per plot the analyzer writes

use serde::{Deserialize, Serialize};

use dnaseg_core::pipeline::GcSkewReport;
use dnaseg_core::{
    to_megabases, IsochoreBoundaries, IsochoreClass, IsochoreParams, IsochoreViews, ScatterGroup,
    WordCount,
};

use crate::chart::{Bar, Chart, Mark, Point, Shape, XAxis};
use crate::vector_export::parse_hex_rgb;

/// Height of the translucent band drawn above each class boundary
const CLASS_BAND_HEIGHT: f64 = 5.0;

/// Colors used by the chart builders, all `#rrggbb`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartColors {
    pub words: String,
    pub gc_skew: String,
    pub original: String,
    pub simple_average: String,
    pub moving_average: String,
    pub histogram: String,
    /// L1, L2, H1, H2, H3
    pub classes: [String; 5],
    /// Cycled through for scatter groups
    pub scatter: Vec<String>,
}

impl Default for ChartColors {
    fn default() -> Self {
        Self {
            words: "#008000".to_string(),
            gc_skew: "#0000ff".to_string(),
            original: "#d3d3d3".to_string(),
            simple_average: "#000000".to_string(),
            moving_average: "#800080".to_string(),
            histogram: "#87ceeb".to_string(),
            classes: [
                "#0000ff".to_string(),
                "#00ffff".to_string(),
                "#ffff00".to_string(),
                "#ffa500".to_string(),
                "#ff0000".to_string(),
            ],
            scatter: [
                "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd",
                "#8c564b", "#e377c2", "#7f7f7f", "#bcbd22", "#17becf",
            ]
            .iter()
            .map(|c| c.to_string())
            .collect(),
        }
    }
}

impl ChartColors {
    pub fn class_color(&self, class: IsochoreClass) -> &str {
        let idx = IsochoreClass::ALL.iter().position(|c| *c == class).unwrap_or(0);
        &self.classes[idx]
    }

    /// First color that is not `#rrggbb`, if any
    pub fn invalid_color(&self) -> Option<&str> {
        [
            &self.words,
            &self.gc_skew,
            &self.original,
            &self.simple_average,
            &self.moving_average,
            &self.histogram,
        ]
        .into_iter()
        .chain(self.classes.iter())
        .chain(self.scatter.iter())
        .map(String::as_str)
        .find(|c| parse_hex_rgb(c).is_none())
    }

    fn scatter_color(&self, idx: usize) -> &str {
        if self.scatter.is_empty() {
            &self.words
        } else {
            &self.scatter[idx % self.scatter.len()]
        }
    }
}

pub fn word_frequency_chart(name: &str, words: &[WordCount], colors: &ChartColors) -> Chart {
    let bars = words
        .iter()
        .enumerate()
        .map(|(i, w)| Bar {
            x: i as f64,
            width: 0.8,
            height: w.count as f64,
            color: None,
            tooltip: Some(format!("{}: {}", w.word, w.count)),
        })
        .collect();

    Chart::new(format!("Word Frequency - {}", name))
        .labels("Word", "Count")
        .x_axis(XAxis::Categories(words.iter().map(|w| w.word.clone()).collect()))
        .with_mark(Mark::new(Shape::Bars(bars), colors.words.as_str()))
}

pub fn gc_skew_chart(name: &str, report: &GcSkewReport, colors: &ChartColors) -> Chart {
    let points = report
        .points
        .iter()
        .map(|p| (p.position as f64, p.value))
        .collect();

    Chart::new(format!("GC Skew - {}", name))
        .labels("Start Position", "GC Skew")
        .x_axis(XAxis::BasePairs)
        .with_mark(Mark::new(Shape::Line(points), colors.gc_skew.as_str()).label("GC Skew"))
}

/// Bars of the raw series, coloured by isochore class
pub fn isochore_original_chart(name: &str, views: &IsochoreViews, params: &IsochoreParams, colors: &ChartColors) -> Chart {
    let xs: Vec<f64> = views.original.iter().map(|p| to_megabases(p.position)).collect();
    // Bars fill 90% of the spacing between the first two windows
    let width = match xs.as_slice() {
        [a, b, ..] if b > a => 0.9 * (b - a),
        _ => 0.1,
    };

    let bars = views
        .original
        .iter()
        .zip(&xs)
        .zip(&views.classes)
        .map(|((p, &x), class)| Bar {
            x,
            width,
            height: p.value,
            color: Some(colors.class_color(*class).to_string()),
            tooltip: Some(format!("{} bp: {:.2}% ({})", p.position, p.value, class)),
        })
        .collect();

    let mut chart = isochore_frame(format!("GC Content - {} (Original)", name), &params.boundaries, colors);
    chart.push(Mark::new(Shape::Bars(bars), colors.original.as_str()));
    chart
}

pub fn isochore_simple_average_chart(name: &str, views: &IsochoreViews, params: &IsochoreParams, colors: &ChartColors) -> Chart {
    let steps = views
        .block_averaged
        .iter()
        .map(|b| (to_megabases(b.start), b.value))
        .collect();

    let mut chart = isochore_frame(format!("GC Content - {} (Simple Average)", name), &params.boundaries, colors);
    chart.push(original_line(views, colors));
    chart.push(
        Mark::new(Shape::Step(steps), colors.simple_average.as_str())
            .stroke_width(2.0)
            .label(format!("Simple Average ({} points)", views.block_size)),
    );
    chart
}

pub fn isochore_moving_average_chart(name: &str, views: &IsochoreViews, params: &IsochoreParams, colors: &ChartColors) -> Chart {
    let line = views
        .moving
        .iter()
        .map(|p| (to_megabases(p.position), p.value))
        .collect();

    let mut chart = isochore_frame(format!("GC Content - {} (Moving Average)", name), &params.boundaries, colors);
    chart.push(original_line(views, colors));
    chart.push(
        Mark::new(Shape::Line(line), colors.moving_average.as_str())
            .stroke_width(2.0)
            .label(format!("Moving Average ({} points)", params.moving_window)),
    );
    chart
}

pub fn isochore_histogram_chart(name: &str, views: &IsochoreViews, params: &IsochoreParams, colors: &ChartColors) -> Chart {
    let bars = views
        .histogram
        .iter()
        .map(|(lo, hi, count)| Bar {
            x: (lo + hi) / 2.0,
            width: hi - lo,
            height: count as f64,
            color: None,
            tooltip: Some(format!("{:.2}-{:.2}%: {}", lo, hi, count)),
        })
        .collect();

    let mut chart = Chart::new(format!("GC Content Distribution - {}", name))
        .labels("GC Content (%)", "Frequency")
        .with_mark(Mark::new(Shape::Bars(bars), colors.histogram.as_str()));

    for (value, class) in params.boundaries.rules() {
        chart.push(Mark::new(Shape::VRule(value), colors.class_color(class)).label(class.label()));
    }
    chart
}

pub fn scatter_chart(name: &str, groups: &[ScatterGroup], colors: &ChartColors) -> Chart {
    let mut chart = Chart::new(format!("Segment Length vs Start - {}", name))
        .labels("Start", "Length")
        .x_axis(XAxis::BasePairs);

    for (i, group) in groups.iter().enumerate() {
        let points = group
            .points
            .iter()
            .map(|&(start, length)| Point {
                x: start as f64,
                y: length as f64,
                tooltip: Some(format!("Start={}, Length={}, Best Word={}", start, length, group.word)),
            })
            .collect();
        chart.push(
            Mark::new(Shape::Points(points), colors.scatter_color(i))
                .opacity(0.8)
                .label(group.word.as_str()),
        );
    }
    chart
}

/// Axis labels plus the class bands and rules shared by the GC-content plots
fn isochore_frame(title: String, boundaries: &IsochoreBoundaries, colors: &ChartColors) -> Chart {
    let mut chart = Chart::new(title).labels("Start (Mb)", "GC Content (%)");
    for (value, class) in boundaries.rules() {
        chart.push(
            Mark::new(Shape::HBand { y0: value, y1: value + CLASS_BAND_HEIGHT }, colors.class_color(class))
                .opacity(0.1),
        );
    }
    for (value, class) in boundaries.rules() {
        chart.push(Mark::new(Shape::HRule(value), colors.class_color(class)).label(class.label()));
    }
    chart
}

fn original_line(views: &IsochoreViews, colors: &ChartColors) -> Mark {
    let line = views
        .original
        .iter()
        .map(|p| (to_megabases(p.position), p.value))
        .collect();
    Mark::new(Shape::Line(line), colors.original.as_str())
        .opacity(0.5)
        .label("GC Content (Original)")
}
