//! Backend-neutral chart description
//!
//! A [`Chart`] is a list of marks in world coordinates. The exporters map
//! world coordinates onto the plot area and draw the marks in order, so
//! marks pushed first end up underneath.

/// How the x axis is labelled
#[derive(Debug, Clone, PartialEq)]
pub enum XAxis {
    /// Plain numbers
    Numeric,
    /// Genomic positions, labelled in bp / kb / Mb
    BasePairs,
    /// One slot per label; slot `i` is centred on `x = i`
    Categories(Vec<String>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    /// Centre of the bar
    pub x: f64,
    pub width: f64,
    pub height: f64,
    /// Overrides the mark colour
    pub color: Option<String>,
    pub tooltip: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub tooltip: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Bars(Vec<Bar>),
    Line(Vec<(f64, f64)>),
    /// Steps change value halfway between consecutive x values
    Step(Vec<(f64, f64)>),
    Points(Vec<Point>),
    /// Dashed horizontal line across the plot
    HRule(f64),
    /// Dashed vertical line across the plot
    VRule(f64),
    /// Translucent horizontal band across the plot
    HBand { y0: f64, y1: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Mark {
    pub shape: Shape,
    /// `#rrggbb`
    pub color: String,
    pub opacity: f32,
    pub stroke_width: f32,
    /// Legend entry; unlabelled marks are left out of the legend
    pub label: Option<String>,
}

impl Mark {
    pub fn new<S: Into<String>>(shape: Shape, color: S) -> Self {
        Self {
            shape,
            color: color.into(),
            opacity: 1.0,
            stroke_width: 1.5,
            label: None,
        }
    }

    pub fn label<S: Into<String>>(mut self, label: S) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn stroke_width(mut self, width: f32) -> Self {
        self.stroke_width = width;
        self
    }
}

/// World-coordinate extent of a chart
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Bounds {
    pub fn x_span(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn y_span(&self) -> f64 {
        self.y_max - self.y_min
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub x_axis: XAxis,
    pub marks: Vec<Mark>,
}

/// Fraction of the data span added above and below the y range
const Y_MARGIN: f64 = 0.05;

impl Chart {
    pub fn new<S: Into<String>>(title: S) -> Self {
        Self {
            title: title.into(),
            x_label: String::new(),
            y_label: String::new(),
            x_axis: XAxis::Numeric,
            marks: Vec::new(),
        }
    }

    pub fn labels<X: Into<String>, Y: Into<String>>(mut self, x: X, y: Y) -> Self {
        self.x_label = x.into();
        self.y_label = y.into();
        self
    }

    pub fn x_axis(mut self, axis: XAxis) -> Self {
        self.x_axis = axis;
        self
    }

    pub fn push(&mut self, mark: Mark) {
        self.marks.push(mark);
    }

    pub fn with_mark(mut self, mark: Mark) -> Self {
        self.push(mark);
        self
    }

    /// Labelled marks, in drawing order
    pub fn legend_entries(&self) -> impl Iterator<Item = &Mark> {
        self.marks.iter().filter(|m| m.label.is_some())
    }

    /// Extent of all marks, widened so that no axis is degenerate.
    ///
    /// Bars are anchored at zero and keep zero as the lower y limit when all
    /// data are non-negative. Categorical axes span `[-0.5, n - 0.5]`.
    pub fn bounds(&self) -> Bounds {
        let mut xs = Extent::default();
        let mut ys = Extent::default();
        let mut has_bars = false;

        for mark in &self.marks {
            match &mark.shape {
                Shape::Bars(bars) => {
                    has_bars = true;
                    for bar in bars {
                        xs.add(bar.x - bar.width / 2.0);
                        xs.add(bar.x + bar.width / 2.0);
                        ys.add(0.0);
                        ys.add(bar.height);
                    }
                }
                Shape::Line(points) | Shape::Step(points) => {
                    for &(x, y) in points {
                        xs.add(x);
                        ys.add(y);
                    }
                }
                Shape::Points(points) => {
                    for p in points {
                        xs.add(p.x);
                        ys.add(p.y);
                    }
                }
                Shape::HRule(y) => ys.add(*y),
                Shape::VRule(x) => xs.add(*x),
                Shape::HBand { y0, y1 } => {
                    ys.add(*y0);
                    ys.add(*y1);
                }
            }
        }

        let (x_min, x_max) = match &self.x_axis {
            XAxis::Categories(labels) => (-0.5, labels.len().max(1) as f64 - 0.5),
            _ => xs.widened(),
        };

        let (mut y_min, mut y_max) = ys.widened();
        let margin = (y_max - y_min) * Y_MARGIN;
        if !(has_bars && y_min == 0.0) {
            y_min -= margin;
        }
        y_max += margin;

        Bounds { x_min, x_max, y_min, y_max }
    }
}

#[derive(Debug, Clone, Copy)]
struct Extent {
    min: f64,
    max: f64,
}

impl Default for Extent {
    fn default() -> Self {
        Self { min: f64::INFINITY, max: f64::NEG_INFINITY }
    }
}

impl Extent {
    fn add(&mut self, v: f64) {
        if v.is_finite() {
            self.min = self.min.min(v);
            self.max = self.max.max(v);
        }
    }

    fn widened(&self) -> (f64, f64) {
        if self.min > self.max {
            (0.0, 1.0)
        } else if self.min == self.max {
            (self.min - 0.5, self.max + 0.5)
        } else {
            (self.min, self.max)
        }
    }
}

/// Polyline vertices of a mid-placed step series
pub fn step_vertices(points: &[(f64, f64)]) -> Vec<(f64, f64)> {
    let mut out = Vec::with_capacity(points.len() * 2);
    for (i, &(x, y)) in points.iter().enumerate() {
        let left = if i == 0 { x } else { (points[i - 1].0 + x) / 2.0 };
        let right = match points.get(i + 1) {
            Some(&(next, _)) => (x + next) / 2.0,
            None => x,
        };
        out.push((left, y));
        out.push((right, y));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_bar_chart_keeps_zero() {
        let chart = Chart::new("bars").with_mark(Mark::new(
            Shape::Bars(vec![Bar { x: 0.0, width: 0.8, height: 10.0, color: None, tooltip: None }]),
            "#008000",
        ));
        let b = chart.bounds();
        assert_eq!(b.y_min, 0.0);
        assert!((b.y_max - 10.5).abs() < 1e-9);
    }

    #[test]
    fn test_bounds_categories() {
        let chart = Chart::new("words").x_axis(XAxis::Categories(vec!["A".into(), "B".into()]));
        let b = chart.bounds();
        assert_eq!((b.x_min, b.x_max), (-0.5, 1.5));
    }

    #[test]
    fn test_bounds_degenerate_and_empty() {
        let chart = Chart::new("one").with_mark(Mark::new(Shape::Line(vec![(5.0, 2.0)]), "#0000ff"));
        let b = chart.bounds();
        assert_eq!((b.x_min, b.x_max), (4.5, 5.5));
        assert!(b.y_min < 2.0 && b.y_max > 2.0);

        let empty = Chart::new("empty").bounds();
        assert_eq!((empty.x_min, empty.x_max), (0.0, 1.0));
    }

    #[test]
    fn test_rules_extend_bounds() {
        let chart = Chart::new("rules")
            .with_mark(Mark::new(Shape::Line(vec![(0.0, 40.0), (1.0, 45.0)]), "#000000"))
            .with_mark(Mark::new(Shape::HRule(100.0), "#ff0000"));
        assert!(chart.bounds().y_max > 100.0);
    }

    #[test]
    fn test_step_vertices_mid() {
        let v = step_vertices(&[(0.0, 1.0), (2.0, 3.0), (6.0, 5.0)]);
        assert_eq!(
            v,
            vec![(0.0, 1.0), (1.0, 1.0), (1.0, 3.0), (4.0, 3.0), (4.0, 5.0), (6.0, 5.0)]
        );
        assert!(step_vertices(&[]).is_empty());
    }

    #[test]
    fn test_legend_skips_unlabelled() {
        let chart = Chart::new("legend")
            .with_mark(Mark::new(Shape::HRule(1.0), "#000000"))
            .with_mark(Mark::new(Shape::HRule(2.0), "#000000").label("L1"));
        let labels: Vec<_> = chart.legend_entries().filter_map(|m| m.label.as_deref()).collect();
        assert_eq!(labels, vec!["L1"]);
    }
}
