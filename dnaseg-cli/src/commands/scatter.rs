use anyhow::{Context, Result};

use dnaseg_core::{discover, pipeline};
use dnaseg_render::charts::scatter_chart;

use super::{OutputTarget, RunPaths};
use crate::batch::{self, BatchSummary};
use crate::config::Config;

/// Length vs. start scatter plot, one color per best word
pub fn execute(config: &Config, paths: &RunPaths) -> Result<BatchSummary> {
    let files = discover::segment_files(&paths.input)
        .with_context(|| format!("Cannot scan input directory {}", paths.input.display()))?;
    let target = OutputTarget::prepare(config, &paths.output, paths.format)?;

    Ok(batch::run("scatter", &files, |file| {
        let groups = pipeline::scatter(&file.path)?;
        let chart = scatter_chart(&file.file_name(), &groups, &target.colors);
        Ok(vec![target.write_chart(file, "scatter", &chart)?])
    }))
}
