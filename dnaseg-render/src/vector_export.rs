/*!
# Chart Export

Writes a [`Chart`] as SVG (marks, axes, tick labels, legend, tooltips and an
optional configuration footer) or as PNG. PNG output is the same SVG document
rasterised with `resvg`; text is set in the fonts bundled with
`epaint_default_fonts`, so the output never depends on installed fonts.
*/

use anyhow::{anyhow, Context, Result};
use image::{Rgba, RgbaImage};
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{self, fontdb};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;
use std::sync::{Arc, OnceLock};

use crate::chart::{step_vertices, Bounds, Chart, Mark, Shape, XAxis};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Png,
    Svg,
}

impl ImageFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Svg => "svg",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ImageFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(ImageFormat::Png),
            "svg" => Ok(ImageFormat::Svg),
            other => Err(anyhow!("Unknown image format '{}' (expected png or svg)", other)),
        }
    }
}

/// Export configuration
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Canvas size in CSS pixels; PNG output is scaled by `dpi / 96`
    pub width: u32,
    pub height: u32,
    pub dpi: u32,
    pub show_legend: bool,
    pub show_axes: bool,
    pub show_footer: bool,
    pub show_grid: bool,
    pub background_color: String,
    pub font_family: String,
    pub font_size: u32,
    pub provenance_comment: Option<String>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            width: 1600,
            height: 800,
            dpi: 96,
            show_legend: true,
            show_axes: true,
            show_footer: true,
            show_grid: true,
            background_color: "#ffffff".to_string(),
            font_family: "Arial, sans-serif".to_string(),
            font_size: 12,
            provenance_comment: None,
        }
    }
}

impl ExportConfig {
    fn png_scale(&self) -> f32 {
        (self.dpi as f32 / 96.0).max(0.25)
    }

    /// Pixel size of PNG output
    pub fn png_size(&self) -> (u32, u32) {
        let scale = self.png_scale();
        (
            ((self.width as f32 * scale).round() as u32).max(1),
            ((self.height as f32 * scale).round() as u32).max(1),
        )
    }
}

/// Chart export system
pub struct ChartExporter {
    config: ExportConfig,
}

impl ChartExporter {
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    pub fn export<P: AsRef<Path>>(&self, path: P, chart: &Chart, format: ImageFormat) -> Result<()> {
        let path = path.as_ref();
        match format {
            ImageFormat::Svg => self.export_svg(path, chart)?,
            ImageFormat::Png => self.export_png(path, chart)?,
        }
        log::debug!("Exported '{}' to {}", chart.title, path.display());
        Ok(())
    }

    /// Export to SVG format
    pub fn export_svg<P: AsRef<Path>>(&self, path: P, chart: &Chart) -> Result<()> {
        self.build_svg(chart).write_to_file(path)
    }

    /// Rasterise the SVG rendering of `chart`, scaled by `dpi / 96`
    pub fn export_png<P: AsRef<Path>>(&self, path: P, chart: &Chart) -> Result<()> {
        let path = path.as_ref();
        let document = self.build_svg(chart).to_document();

        let mut options = usvg::Options::default();
        options.fontdb = chart_fonts();
        let tree = usvg::Tree::from_str(&document, &options)
            .with_context(|| format!("Failed to parse chart SVG for {}", path.display()))?;

        let (w, h) = self.config.png_size();
        let mut pixmap = Pixmap::new(w, h)
            .ok_or_else(|| anyhow!("Invalid PNG size {}x{}", w, h))?;
        let size = tree.size();
        let transform = Transform::from_scale(w as f32 / size.width(), h as f32 / size.height());
        resvg::render(&tree, transform, &mut pixmap.as_mut());

        let mut img = RgbaImage::new(w, h);
        for (dst, src) in img.pixels_mut().zip(pixmap.pixels()) {
            let c = src.demultiply();
            *dst = Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
        }

        img.save(path)
            .with_context(|| format!("Failed to write PNG {}", path.display()))?;
        Ok(())
    }

    fn build_svg(&self, chart: &Chart) -> SvgBuilder {
        let bounds = chart.bounds();
        let mut svg = SvgBuilder::new(&self.config);
        let area = PlotArea::new(svg.width, svg.height, bounds, &chart.x_axis);

        svg.add_background();

        if let Some(comment) = &self.config.provenance_comment {
            svg.add_comment(comment);
        }

        if !chart.title.is_empty() {
            svg.add_title(&chart.title);
        }

        if self.config.show_axes {
            svg.add_axes(chart, &area, self.config.show_grid);
        }

        svg.begin_clip(&area);
        for mark in &chart.marks {
            svg.add_mark(mark, &area);
        }
        svg.end_clip();

        if self.config.show_legend {
            svg.add_legend(chart, &area);
        }

        if self.config.show_footer {
            svg.add_footer(chart, &bounds);
        }

        svg
    }
}

/// Bundled font database; the generic families resolve to the bundled face
fn chart_fonts() -> Arc<fontdb::Database> {
    static FONTS: OnceLock<Arc<fontdb::Database>> = OnceLock::new();
    FONTS
        .get_or_init(|| {
            let mut db = fontdb::Database::new();
            db.load_font_data(epaint_default_fonts::UBUNTU_LIGHT.to_vec());

            let family = db
                .faces()
                .next()
                .and_then(|face| face.families.first())
                .map(|(name, _)| name.clone());
            match family {
                Some(name) => {
                    db.set_sans_serif_family(name.clone());
                    db.set_serif_family(name);
                }
                None => log::warn!("No bundled font could be loaded; PNG text will be missing"),
            }
            Arc::new(db)
        })
        .clone()
}

const X_TICKS: usize = 8;
const Y_TICKS: usize = 6;
const RULE_DASH: (u32, u32) = (6, 4);

/// Inner plot rectangle in canvas coordinates plus the world extent it shows
#[derive(Debug, Clone, Copy)]
struct PlotArea {
    left: f32,
    right: f32,
    top: f32,
    bottom: f32,
    bounds: Bounds,
}

impl PlotArea {
    fn new(width: f32, height: f32, bounds: Bounds, x_axis: &XAxis) -> Self {
        // Rotated category labels need a deeper bottom margin
        let bottom_margin = match x_axis {
            XAxis::Categories(_) => 110.0,
            _ => 60.0,
        };
        Self {
            left: 80.0,
            right: width - 20.0,
            top: 40.0,
            bottom: height - bottom_margin,
            bounds,
        }
    }

    fn x(&self, world_x: f64) -> f32 {
        let norm = ((world_x - self.bounds.x_min) / self.bounds.x_span()) as f32;
        self.left + norm * (self.right - self.left)
    }

    fn y(&self, world_y: f64) -> f32 {
        let norm = ((world_y - self.bounds.y_min) / self.bounds.y_span()) as f32;
        // Invert Y so that larger values are higher on the canvas
        self.bottom - norm * (self.bottom - self.top)
    }

    fn x_ticks(&self, x_axis: &XAxis) -> Vec<f64> {
        match x_axis {
            XAxis::Categories(labels) => (0..labels.len()).map(|i| i as f64).collect(),
            _ => nice_ticks_world(self.bounds.x_min, self.bounds.x_max, X_TICKS),
        }
    }
}

/// SVG builder for chart output
struct SvgBuilder {
    config: ExportConfig,
    elements: Vec<String>,
    width: f32,
    height: f32,
    top_comments: Vec<String>,
}

impl SvgBuilder {
    fn new(config: &ExportConfig) -> Self {
        Self {
            config: config.clone(),
            elements: Vec::new(),
            width: config.width as f32,
            height: config.height as f32,
            top_comments: Vec::new(),
        }
    }

    fn add_background(&mut self) {
        self.elements.push(format!(
            r#"<rect width="{}" height="{}" fill="{}"/>"#,
            self.width, self.height, self.config.background_color
        ));
    }

    fn add_comment(&mut self, text: &str) {
        // "--" is not allowed inside an XML comment
        self.top_comments.push(text.replace("--", "- -"));
    }

    fn add_title(&mut self, title: &str) {
        let title_y = self.config.font_size as f32 + 12.0;
        self.elements.push(format!(
            r#"<text x="{}" y="{}" font-family="{}" font-size="{}px" text-anchor="middle" font-weight="bold">{}</text>"#,
            self.width / 2.0, title_y, self.config.font_family, self.config.font_size + 4, escape_xml(title)
        ));
    }

    fn add_axes(&mut self, chart: &Chart, area: &PlotArea, show_grid: bool) {
        let (left, right, top, bottom) = (area.left, area.right, area.top, area.bottom);
        let font = self.config.font_family.clone();
        let small = self.config.font_size.saturating_sub(2).max(6);

        // X axis
        self.elements.push(format!(r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="black" stroke-width="1"/>"#, left, bottom, right, bottom));
        let x_label_y = match chart.x_axis {
            XAxis::Categories(_) => self.height - 12.0,
            _ => bottom + 40.0,
        };
        self.elements.push(format!(r#"<text x="{}" y="{}" font-family="{}" font-size="{}px" text-anchor="middle">{}</text>"#, (left + right) / 2.0, x_label_y, font, self.config.font_size, escape_xml(&chart.x_label)));

        // Y axis
        self.elements.push(format!(r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="black" stroke-width="1"/>"#, left, top, left, bottom));
        self.elements.push(format!(r#"<text x="{}" y="{}" transform="rotate(-90 {} {})" font-family="{}" font-size="{}px" text-anchor="middle">{}</text>"#, 18.0, (top + bottom) / 2.0, 18.0, (top + bottom) / 2.0, font, self.config.font_size, escape_xml(&chart.y_label)));

        let bounds = area.bounds;
        let x_step = nice_step(bounds.x_min, bounds.x_max, X_TICKS);
        for (i, w) in area.x_ticks(&chart.x_axis).into_iter().enumerate() {
            let x = area.x(w);
            self.elements.push(format!(r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="black" stroke-width="1"/>"#, x, bottom, x, bottom + 5.0));
            if show_grid {
                self.elements.push(format!(r##"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="#cccccc" stroke-width="1" opacity="0.5"/>"##, x, top, x, bottom));
            }
            match &chart.x_axis {
                XAxis::Categories(labels) => {
                    let label = labels.get(i).map(String::as_str).unwrap_or("");
                    let y = bottom + 14.0;
                    self.elements.push(format!(r#"<text x="{}" y="{}" transform="rotate(-45 {} {})" font-family="{}" font-size="{}px" text-anchor="end">{}</text>"#, x, y, x, y, font, small, escape_xml(label)));
                }
                XAxis::BasePairs => {
                    self.elements.push(format!(r#"<text x="{}" y="{}" font-family="{}" font-size="{}px" text-anchor="middle">{}</text>"#, x, bottom + 18.0, font, small, format_bp(w)));
                }
                XAxis::Numeric => {
                    self.elements.push(format!(r#"<text x="{}" y="{}" font-family="{}" font-size="{}px" text-anchor="middle">{}</text>"#, x, bottom + 18.0, font, small, format_tick(w, x_step)));
                }
            }
        }

        let y_step = nice_step(bounds.y_min, bounds.y_max, Y_TICKS);
        for w in nice_ticks_world(bounds.y_min, bounds.y_max, Y_TICKS) {
            let y = area.y(w);
            self.elements.push(format!(r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="black" stroke-width="1"/>"#, left - 5.0, y, left, y));
            if show_grid {
                self.elements.push(format!(r##"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="#cccccc" stroke-width="1" opacity="0.5"/>"##, left, y, right, y));
            }
            self.elements.push(format!(r#"<text x="{}" y="{}" font-family="{}" font-size="{}px" text-anchor="end" dominant-baseline="middle">{}</text>"#, left - 8.0, y, font, small, format_tick(w, y_step)));
        }
    }

    fn begin_clip(&mut self, area: &PlotArea) {
        self.elements.push(format!(
            r#"<defs><clipPath id="plot-area"><rect x="{}" y="{}" width="{}" height="{}"/></clipPath></defs>"#,
            area.left, area.top, area.right - area.left, area.bottom - area.top
        ));
        self.elements.push(r#"<g clip-path="url(#plot-area)">"#.to_string());
    }

    fn end_clip(&mut self) {
        self.elements.push("</g>".to_string());
    }

    fn add_mark(&mut self, mark: &Mark, area: &PlotArea) {
        let color = &mark.color;
        match &mark.shape {
            Shape::Bars(bars) => {
                for bar in bars {
                    let x0 = area.x(bar.x - bar.width / 2.0);
                    let x1 = area.x(bar.x + bar.width / 2.0);
                    let y0 = area.y(bar.height.max(0.0));
                    let y1 = area.y(bar.height.min(0.0));
                    let fill = bar.color.as_ref().unwrap_or(color);
                    let rect = format!(
                        r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}" fill-opacity="{}"/>"#,
                        x0, y0, (x1 - x0).max(0.5), (y1 - y0).max(0.0), fill, mark.opacity
                    );
                    self.push_with_tooltip(rect, bar.tooltip.as_deref());
                }
            }
            Shape::Line(points) => self.add_polyline(points, mark, area),
            Shape::Step(points) => self.add_polyline(&step_vertices(points), mark, area),
            Shape::Points(points) => {
                for p in points {
                    let circle = format!(
                        r#"<circle cx="{:.2}" cy="{:.2}" r="3" fill="{}" fill-opacity="{}"/>"#,
                        area.x(p.x), area.y(p.y), color, mark.opacity
                    );
                    self.push_with_tooltip(circle, p.tooltip.as_deref());
                }
            }
            Shape::HRule(y) => {
                let py = area.y(*y);
                self.elements.push(format!(
                    r#"<line x1="{}" y1="{:.2}" x2="{}" y2="{:.2}" stroke="{}" stroke-width="{}" stroke-opacity="{}" stroke-dasharray="{} {}"/>"#,
                    area.left, py, area.right, py, color, mark.stroke_width, mark.opacity, RULE_DASH.0, RULE_DASH.1
                ));
            }
            Shape::VRule(x) => {
                let px = area.x(*x);
                self.elements.push(format!(
                    r#"<line x1="{:.2}" y1="{}" x2="{:.2}" y2="{}" stroke="{}" stroke-width="{}" stroke-opacity="{}" stroke-dasharray="{} {}"/>"#,
                    px, area.top, px, area.bottom, color, mark.stroke_width, mark.opacity, RULE_DASH.0, RULE_DASH.1
                ));
            }
            Shape::HBand { y0, y1 } => {
                let top = area.y(y0.max(*y1));
                let bottom = area.y(y0.min(*y1));
                self.elements.push(format!(
                    r#"<rect x="{}" y="{:.2}" width="{}" height="{:.2}" fill="{}" fill-opacity="{}"/>"#,
                    area.left, top, area.right - area.left, bottom - top, color, mark.opacity
                ));
            }
        }
    }

    fn add_polyline(&mut self, points: &[(f64, f64)], mark: &Mark, area: &PlotArea) {
        if points.is_empty() {
            return;
        }
        let mut path = String::new();
        for (k, &(x, y)) in points.iter().enumerate() {
            let cmd = if k == 0 { 'M' } else { 'L' };
            path.push_str(&format!("{} {:.2} {:.2} ", cmd, area.x(x), area.y(y)));
        }
        self.elements.push(format!(
            r#"<path d="{}" fill="none" stroke="{}" stroke-width="{}" stroke-opacity="{}"/>"#,
            path.trim_end(), mark.color, mark.stroke_width, mark.opacity
        ));
    }

    fn push_with_tooltip(&mut self, element: String, tooltip: Option<&str>) {
        match tooltip {
            Some(text) => self.elements.push(format!("<g>{}<title>{}</title></g>", element, escape_xml(text))),
            None => self.elements.push(element),
        }
    }

    fn add_legend(&mut self, chart: &Chart, area: &PlotArea) {
        let entries: Vec<&Mark> = chart.legend_entries().collect();
        if entries.is_empty() {
            return;
        }

        let font_size = self.config.font_size as f32;
        let row_height = font_size + 8.0;
        let longest = entries
            .iter()
            .filter_map(|m| m.label.as_ref())
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0);
        let legend_width = (longest as f32 * font_size * 0.6 + 45.0).max(80.0);
        let legend_height = entries.len() as f32 * row_height + 10.0;
        let legend_x = area.right - legend_width - 10.0;
        let legend_y = area.top + 10.0;

        self.elements.push(format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="white" stroke="black" stroke-width="1" fill-opacity="0.9"/>"#,
            legend_x, legend_y, legend_width, legend_height
        ));

        for (i, mark) in entries.iter().enumerate() {
            let cy = legend_y + 5.0 + row_height * (i as f32 + 0.5);
            let sx = legend_x + 10.0;
            let symbol = match mark.shape {
                Shape::Bars(_) | Shape::HBand { .. } => format!(
                    r#"<rect x="{}" y="{}" width="14" height="10" fill="{}"/>"#,
                    sx, cy - 5.0, mark.color
                ),
                Shape::Points(_) => format!(
                    r#"<circle cx="{}" cy="{}" r="5" fill="{}"/>"#,
                    sx + 7.0, cy, mark.color
                ),
                Shape::Line(_) | Shape::Step(_) => format!(
                    r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="2"/>"#,
                    sx, cy, sx + 14.0, cy, mark.color
                ),
                Shape::HRule(_) | Shape::VRule(_) => format!(
                    r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="2" stroke-dasharray="4 2"/>"#,
                    sx, cy, sx + 14.0, cy, mark.color
                ),
            };
            self.elements.push(symbol);
            self.elements.push(format!(
                r#"<text x="{}" y="{}" font-family="{}" font-size="{}px" dominant-baseline="middle">{}</text>"#,
                sx + 22.0, cy, self.config.font_family, self.config.font_size,
                escape_xml(mark.label.as_deref().unwrap_or(""))
            ));
        }
    }

    fn add_footer(&mut self, chart: &Chart, bounds: &Bounds) {
        let footer_y = self.height - 4.0;
        let footer_text = format!(
            "dnaseg v{} | {}: {} to {} | Generated: {}",
            crate::VERSION,
            if chart.x_label.is_empty() { "x" } else { &chart.x_label },
            format_tick(bounds.x_min, nice_step(bounds.x_min, bounds.x_max, X_TICKS)),
            format_tick(bounds.x_max, nice_step(bounds.x_min, bounds.x_max, X_TICKS)),
            chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
        );

        self.elements.push(format!(
            r#"<text x="10" y="{}" font-family="{}" font-size="{}px" fill="gray">{}</text>"#,
            footer_y, self.config.font_family, self.config.font_size.saturating_sub(2).max(6), escape_xml(&footer_text)
        ));
    }

    fn to_document(&self) -> String {
        let mut doc = String::new();
        doc.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        doc.push_str(&format!(
            "<svg width=\"{}\" height=\"{}\" viewBox=\"0 0 {} {}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
            self.width, self.height, self.width, self.height
        ));
        for c in &self.top_comments {
            for line in c.lines() {
                doc.push_str(&format!("  <!-- {} -->\n", line));
            }
        }

        for element in &self.elements {
            doc.push_str("  ");
            doc.push_str(element);
            doc.push('\n');
        }

        doc.push_str("</svg>\n");
        doc
    }

    fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
        let mut file = BufWriter::new(file);
        file.write_all(self.to_document().as_bytes())?;
        file.flush()?;

        Ok(())
    }
}

/// Parse a hex color like "#RRGGBB"
pub fn parse_hex_rgb(s: &str) -> Option<[u8; 3]> {
    let hex = s.trim();
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.len() != 6 || !hex.is_ascii() { return None; }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some([r, g, b])
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

// Format a basepair position in human-friendly units
fn format_bp(bp: f64) -> String {
    let abs = bp.abs();
    if abs >= 1e9 { format!("{:.2} Gb", bp / 1e9) }
    else if abs >= 1e6 { format!("{:.2} Mb", bp / 1e6) }
    else if abs >= 1e3 { format!("{:.2} kb", bp / 1e3) }
    else { format!("{:.0} bp", bp) }
}

// Enough decimals to tell neighbouring ticks apart
fn format_tick(value: f64, step: f64) -> String {
    let decimals = if step >= 1.0 || step <= 0.0 {
        0
    } else {
        (-step.log10()).ceil() as usize
    };
    // Avoid "-0"
    let value = if value.abs() < step.abs() * 1e-9 { 0.0 } else { value };
    format!("{:.*}", decimals, value)
}

// Round a length to a "nice" number: 1, 2, or 5 × 10^k
fn nice_round_length(x: f64) -> f64 {
    if x <= 0.0 || !x.is_finite() { return 1.0; }
    let exp = x.log10().floor();
    let base = 10f64.powf(exp);
    let mant = x / base;
    let nice = if mant <= 1.0 { 1.0 } else if mant <= 2.0 { 2.0 } else if mant <= 5.0 { 5.0 } else { 10.0 };
    nice * base
}

fn nice_step(min_world: f64, max_world: f64, desired: usize) -> f64 {
    let span = max_world - min_world;
    nice_round_length(span / desired.max(1) as f64)
}

// Tick positions at multiples of a nice step inside [min_world, max_world]
fn nice_ticks_world(min_world: f64, max_world: f64, desired: usize) -> Vec<f64> {
    if !(max_world > min_world) {
        return Vec::new();
    }
    let step = nice_step(min_world, max_world, desired);
    let first = (min_world / step).ceil();
    let mut ticks = Vec::new();
    let mut i = 0.0;
    loop {
        let v = (first + i) * step;
        // Tolerate rounding at the upper end
        if v > max_world + step * 1e-9 {
            break;
        }
        ticks.push(v);
        i += 1.0;
    }
    ticks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nice_ticks() {
        assert_eq!(nice_ticks_world(0.0, 100.0, 5), vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
        let skew = nice_ticks_world(-1.1, 1.1, 6);
        assert_eq!(skew.first().copied(), Some(-1.0));
        assert_eq!(skew.last().copied(), Some(1.0));
        assert!(nice_ticks_world(3.0, 3.0, 6).is_empty());
    }

    #[test]
    fn test_format_helpers() {
        assert_eq!(format_bp(2_500_000.0), "2.50 Mb");
        assert_eq!(format_bp(750.0), "750 bp");
        assert_eq!(format_tick(0.5, 0.5), "0.5");
        assert_eq!(format_tick(-1e-17, 0.2), "0.0");
        assert_eq!(format_tick(40.0, 10.0), "40");
    }

    #[test]
    fn test_parse_hex_rgb() {
        assert_eq!(parse_hex_rgb("#87ceeb"), Some([0x87, 0xce, 0xeb]));
        assert_eq!(parse_hex_rgb("ff0000"), Some([255, 0, 0]));
        assert_eq!(parse_hex_rgb("skyblue"), None);
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a<b & \"c\">"), "a&lt;b &amp; &quot;c&quot;&gt;");
    }

    #[test]
    fn test_image_format_parse() {
        assert_eq!("SVG".parse::<ImageFormat>().unwrap(), ImageFormat::Svg);
        assert_eq!(ImageFormat::Png.extension(), "png");
        assert!("pdf".parse::<ImageFormat>().is_err());
    }

    #[test]
    fn test_png_size_follows_dpi() {
        let cfg = ExportConfig { width: 100, height: 50, dpi: 192, ..ExportConfig::default() };
        assert_eq!(cfg.png_size(), (200, 100));
    }

    #[test]
    fn test_document_is_parseable() {
        let chart = Chart::new("GC Skew - a & b").labels("Start", "GC Skew");
        let exporter = ChartExporter::new(ExportConfig {
            provenance_comment: Some("source -- a.csv".into()),
            ..ExportConfig::default()
        });
        let doc = exporter.build_svg(&chart).to_document();

        assert!(doc.contains("<!-- source - - a.csv -->"));
        assert!(doc.contains("GC Skew - a &amp; b"));
        assert!(usvg::Tree::from_str(&doc, &usvg::Options::default()).is_ok());
    }

    #[test]
    fn test_bundled_fonts_resolve_generic_families() {
        let db = chart_fonts();
        assert!(db.faces().next().is_some());
        let query = fontdb::Query {
            families: &[fontdb::Family::Name("Arial"), fontdb::Family::SansSerif],
            ..fontdb::Query::default()
        };
        assert!(db.query(&query).is_some());
    }
}
