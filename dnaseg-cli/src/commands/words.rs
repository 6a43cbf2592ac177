use anyhow::{Context, Result};

use dnaseg_core::{discover, pipeline};
use dnaseg_render::charts::word_frequency_chart;

use super::{OutputTarget, RunPaths};
use crate::batch::{self, BatchSummary};
use crate::config::Config;

/// Word frequency bar chart for every segments / merged-segments table
pub fn execute(config: &Config, paths: &RunPaths, threshold: Option<usize>) -> Result<BatchSummary> {
    let threshold = threshold.unwrap_or(config.words.threshold);
    let files = discover::segment_files(&paths.input)
        .with_context(|| format!("Cannot scan input directory {}", paths.input.display()))?;
    let target = OutputTarget::prepare(config, &paths.output, paths.format)?;

    log::info!("Word frequency charts, threshold {}", threshold);
    Ok(batch::run("words", &files, |file| {
        let words = pipeline::word_frequency(&file.path, threshold)?;
        log::debug!("{}: {} words at or above threshold", file.file_name(), words.len());

        let chart = word_frequency_chart(&file.file_name(), &words, &target.colors);
        Ok(vec![target.write_chart(file, "words", &chart)?])
    }))
}
