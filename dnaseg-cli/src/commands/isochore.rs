use anyhow::{Context, Result};

use dnaseg_core::{discover, pipeline};
use dnaseg_render::charts::{
    isochore_histogram_chart, isochore_moving_average_chart, isochore_original_chart,
    isochore_simple_average_chart,
};

use super::{OutputTarget, RunPaths};
use crate::batch::{self, BatchSummary};
use crate::config::Config;

/// Command-line overrides of the `[isochore]` section
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub avg_points: Option<usize>,
    pub moving_window: Option<usize>,
    pub histogram_bins: Option<usize>,
}

/// Four GC content plots plus the block-average table for every isochore table
pub fn execute(config: &Config, paths: &RunPaths, overrides: &Overrides) -> Result<BatchSummary> {
    let mut section = config.isochore.clone();
    if let Some(n) = overrides.avg_points {
        section.avg_points = n;
    }
    if let Some(n) = overrides.moving_window {
        section.moving_window = n;
    }
    if let Some(n) = overrides.histogram_bins {
        section.histogram_bins = n;
    }
    let params = section.params()?;

    let files = discover::isochore_files(&paths.input)
        .with_context(|| format!("Cannot scan input directory {}", paths.input.display()))?;
    let target = OutputTarget::prepare(config, &paths.output, paths.format)?;

    log::info!(
        "Isochore plots, {} points per average block, moving window {}",
        params.avg_points, params.moving_window
    );
    Ok(batch::run("isochore", &files, |file| {
        let views = pipeline::isochore(&file.path, &params)?;
        let name = file.file_name();

        let mut written = vec![
            target.write_chart(file, "original", &isochore_original_chart(&name, &views, &params, &target.colors))?,
            target.write_chart(file, "simple_average", &isochore_simple_average_chart(&name, &views, &params, &target.colors))?,
            target.write_chart(file, "moving_average", &isochore_moving_average_chart(&name, &views, &params, &target.colors))?,
            target.write_chart(file, "histogram", &isochore_histogram_chart(&name, &views, &params, &target.colors))?,
        ];

        let table = file.output_path(&target.dir, "simple_average", "tsv");
        pipeline::write_block_table(&table, &views.block_averaged)?;
        written.push(table);

        Ok(written)
    }))
}
