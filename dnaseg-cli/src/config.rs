//! Configuration handling for the dnaseg CLI
//!
//! Supports loading configuration from dnaseg.toml files with CLI argument overrides.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use dnaseg_core::isochore::{
    DEFAULT_AVG_POINTS, DEFAULT_BOUNDARIES, DEFAULT_HISTOGRAM_BINS, DEFAULT_MOVING_WINDOW,
};
use dnaseg_core::{IsochoreBoundaries, IsochoreParams};
use dnaseg_render::{ChartColors, ExportConfig, ImageFormat};

pub const DEFAULT_CONFIG_FILE: &str = "dnaseg.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub words: WordsConfig,
    pub isochore: IsochoreConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Default number of threads to use
    #[serde(default = "default_threads")]
    pub threads: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordsConfig {
    /// Minimum occurrences for a word to be charted
    #[serde(default = "default_threshold")]
    pub threshold: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IsochoreConfig {
    /// Windows per block of the simple-average view
    #[serde(default = "default_avg_points")]
    pub avg_points: usize,

    /// Trailing window of the moving-average view
    #[serde(default = "default_moving_window")]
    pub moving_window: usize,

    /// Bins of the GC content histogram
    #[serde(default = "default_histogram_bins")]
    pub histogram_bins: usize,

    /// Class boundaries L1|L2|H1|H2|H3, strictly ascending
    #[serde(default = "default_boundaries")]
    pub boundaries: [f64; 4],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Output image format
    #[serde(default)]
    pub format: ImageFormat,

    /// Default width
    #[serde(default = "default_width")]
    pub width: u32,

    /// Default height
    #[serde(default = "default_height")]
    pub height: u32,

    /// DPI for raster outputs
    #[serde(default = "default_dpi")]
    pub dpi: u32,

    #[serde(default = "default_font_family")]
    pub font_family: String,

    #[serde(default = "default_font_size")]
    pub font_size: u32,

    #[serde(default = "default_true")]
    pub legend: bool,

    #[serde(default = "default_true")]
    pub grid: bool,

    /// Version and timestamp line at the bottom of SVG charts
    #[serde(default = "default_true")]
    pub footer: bool,

    #[serde(default = "default_background")]
    pub background: String,

    #[serde(default)]
    pub colors: ChartColors,
}

// Default value functions
fn default_threads() -> usize { num_cpus::get() }
fn default_threshold() -> usize { 20 }
fn default_avg_points() -> usize { DEFAULT_AVG_POINTS }
fn default_moving_window() -> usize { DEFAULT_MOVING_WINDOW }
fn default_histogram_bins() -> usize { DEFAULT_HISTOGRAM_BINS }
fn default_boundaries() -> [f64; 4] { DEFAULT_BOUNDARIES }
fn default_width() -> u32 { 1600 }
fn default_height() -> u32 { 800 }
fn default_dpi() -> u32 { 96 }
fn default_font_family() -> String { "Arial, sans-serif".to_string() }
fn default_font_size() -> u32 { 12 }
fn default_true() -> bool { true }
fn default_background() -> String { "#ffffff".to_string() }

impl Default for GeneralConfig {
    fn default() -> Self {
        Self { threads: default_threads() }
    }
}

impl Default for WordsConfig {
    fn default() -> Self {
        Self { threshold: default_threshold() }
    }
}

impl Default for IsochoreConfig {
    fn default() -> Self {
        Self {
            avg_points: default_avg_points(),
            moving_window: default_moving_window(),
            histogram_bins: default_histogram_bins(),
            boundaries: default_boundaries(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            format: ImageFormat::default(),
            width: default_width(),
            height: default_height(),
            dpi: default_dpi(),
            font_family: default_font_family(),
            font_size: default_font_size(),
            legend: true,
            grid: true,
            footer: true,
            background: default_background(),
            colors: ChartColors::default(),
        }
    }
}

impl IsochoreConfig {
    pub fn params(&self) -> Result<IsochoreParams> {
        let params = IsochoreParams {
            avg_points: self.avg_points,
            moving_window: self.moving_window,
            histogram_bins: self.histogram_bins,
            boundaries: IsochoreBoundaries::new(self.boundaries)?,
        };
        params.validate()?;
        Ok(params)
    }
}

impl RenderConfig {
    pub fn export_config(&self) -> ExportConfig {
        ExportConfig {
            width: self.width,
            height: self.height,
            dpi: self.dpi,
            show_legend: self.legend,
            show_footer: self.footer,
            show_grid: self.grid,
            background_color: self.background.clone(),
            font_family: self.font_family.clone(),
            font_size: self.font_size,
            ..ExportConfig::default()
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => {
                log::info!("Loading configuration from: {}", path.display());
                Self::load_from_file(path)?
            }
            None => {
                // Try to find dnaseg.toml in current directory
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    log::info!("Loading configuration from: {}", DEFAULT_CONFIG_FILE);
                    Self::load_from_file(&default_path)?
                } else {
                    log::debug!("Using default configuration");
                    Self::default()
                }
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse configuration file: {}", path.display()))?;

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .context("Failed to serialize configuration")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write configuration file: {}", path.display()))?;

        Ok(())
    }

    /// Reject values the pipelines cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.general.threads == 0 {
            return Err(anyhow!("general.threads must be at least 1"));
        }
        self.isochore.params().context("Invalid [isochore] configuration")?;
        if let Some(color) = self.render.colors.invalid_color() {
            return Err(anyhow!("Invalid color '{}' in [render.colors] (expected #rrggbb)", color));
        }
        if self.render.width == 0 || self.render.height == 0 {
            return Err(anyhow!("render.width and render.height must be positive"));
        }
        Ok(())
    }

    /// Generate example configuration file content
    pub fn example_toml() -> Result<String> {
        toml::to_string_pretty(&Self::default()).context("Failed to serialize default configuration")
    }
}
