//! Subcommand implementations

pub mod gc_skew;
pub mod isochore;
pub mod menu;
pub mod open;
pub mod scatter;
pub mod words;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use dnaseg_core::InputFile;
use dnaseg_render::{Chart, ChartColors, ChartExporter, ExportConfig, ImageFormat};

use crate::batch::BatchSummary;
use crate::config::Config;

/// Input and output locations shared by the chart subcommands
#[derive(Debug, Clone)]
pub struct RunPaths {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Overrides `render.format`
    pub format: Option<ImageFormat>,
}

/// Where and how charts of one run are written
pub struct OutputTarget {
    pub dir: PathBuf,
    pub format: ImageFormat,
    pub colors: ChartColors,
    export: ExportConfig,
}

impl OutputTarget {
    /// Create the output directory if missing
    pub fn prepare(config: &Config, dir: &Path, format: Option<ImageFormat>) -> Result<Self> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;

        Ok(Self {
            dir: dir.to_path_buf(),
            format: format.unwrap_or(config.render.format),
            colors: config.render.colors.clone(),
            export: config.render.export_config(),
        })
    }

    /// `<dir>/<stem>_<suffix>.<ext>` for an input table
    pub fn chart_path(&self, file: &InputFile, suffix: &str) -> PathBuf {
        file.output_path(&self.dir, suffix, self.format.extension())
    }

    /// Export `chart`; the SVG names the table it was drawn from
    pub fn write_chart(&self, file: &InputFile, suffix: &str, chart: &Chart) -> Result<PathBuf> {
        let path = self.chart_path(file, suffix);
        let exporter = ChartExporter::new(ExportConfig {
            provenance_comment: Some(provenance(file)),
            ..self.export.clone()
        });
        exporter.export(&path, chart, self.format)?;
        Ok(path)
    }
}

fn provenance(file: &InputFile) -> String {
    format!("dnaseg v{} | source: {}", dnaseg_render::VERSION, file.path.display())
}

/// Every chart mode over one input directory
pub fn run_all(config: &Config, paths: &RunPaths, sequences: Option<&Path>) -> Result<Vec<BatchSummary>> {
    Ok(vec![
        words::execute(config, paths, None)?,
        gc_skew::execute(config, paths, sequences)?,
        scatter::execute(config, paths)?,
        isochore::execute(config, paths, &isochore::Overrides::default())?,
    ])
}
