use anyhow::{Context, Result};
use std::path::Path;

use dnaseg_core::{discover, pipeline, SequenceSet};
use dnaseg_render::charts::gc_skew_chart;

use super::{OutputTarget, RunPaths};
use crate::batch::{self, BatchSummary};
use crate::config::Config;

/// GC skew line plot for every segments / merged-segments table.
///
/// The sequence file is loaded once for the whole batch. When it is missing
/// or unreadable every table ends up without sequence data and is reported
/// as such.
pub fn execute(config: &Config, paths: &RunPaths, sequence_file: Option<&Path>) -> Result<BatchSummary> {
    let files = discover::segment_files(&paths.input)
        .with_context(|| format!("Cannot scan input directory {}", paths.input.display()))?;
    let target = OutputTarget::prepare(config, &paths.output, paths.format)?;

    let sequences = match sequence_file {
        Some(path) => match SequenceSet::load(path) {
            Ok(set) => Some(set),
            Err(e) => {
                log::warn!("{}", e);
                None
            }
        },
        None => {
            log::warn!("No sequence file selected; GC skew needs one");
            None
        }
    };

    Ok(batch::run("gc-skew", &files, |file| {
        let report = pipeline::gc_skew(&file.path, sequences.as_ref())?;
        log::debug!("{}: aligned with {:?}", file.file_name(), report.strategy);

        let chart = gc_skew_chart(&file.file_name(), &report, &target.colors);
        Ok(vec![target.write_chart(file, "gc_skew", &chart)?])
    }))
}
