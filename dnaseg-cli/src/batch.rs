//! Per-file batch driver
//!
//! Every file of a batch is processed independently; a failure is logged and
//! counted, never propagated, so one bad table cannot stop the rest.

use anyhow::Result;
use rayon::prelude::*;
use serde::Serialize;
use std::path::PathBuf;

use dnaseg_core::{AnalysisError, InputFile};

/// What happened to one input file
#[derive(Debug)]
pub enum Outcome {
    Written(Vec<PathBuf>),
    /// Nothing to chart (`AnalysisError::Empty`)
    Skipped(String),
    Failed(String),
}

impl Outcome {
    fn from_result(result: Result<Vec<PathBuf>>) -> Self {
        match result {
            Ok(paths) => Outcome::Written(paths),
            Err(err) => {
                let informational = err
                    .downcast_ref::<AnalysisError>()
                    .map(AnalysisError::is_informational)
                    .unwrap_or(false);
                // Keep the whole context chain in the message
                let message = format!("{:#}", err);
                if informational {
                    Outcome::Skipped(message)
                } else {
                    Outcome::Failed(message)
                }
            }
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchSummary {
    pub mode: String,
    pub files: usize,
    pub charted: usize,
    pub skipped: usize,
    pub failed: usize,
    pub outputs: Vec<PathBuf>,
}

impl BatchSummary {
    pub fn new<S: Into<String>>(mode: S) -> Self {
        Self { mode: mode.into(), ..Self::default() }
    }

    pub fn record(&mut self, file: &InputFile, outcome: Outcome) {
        self.files += 1;
        match outcome {
            Outcome::Written(paths) => {
                self.charted += 1;
                for path in &paths {
                    log::info!("Saved {}", path.display());
                }
                self.outputs.extend(paths);
            }
            Outcome::Skipped(message) => {
                self.skipped += 1;
                log::info!("Skipping {}: {}", file.file_name(), message);
            }
            Outcome::Failed(message) => {
                self.failed += 1;
                log::warn!("Failed {}: {}", file.file_name(), message);
            }
        }
    }

    pub fn log(&self) {
        log::info!(
            "{}: {} files, {} charted, {} skipped, {} failed",
            self.mode, self.files, self.charted, self.skipped, self.failed
        );
    }
}

/// Run `job` on every file in parallel; outcomes are recorded in input order.
pub fn run<F>(mode: &str, files: &[InputFile], job: F) -> BatchSummary
where
    F: Fn(&InputFile) -> Result<Vec<PathBuf>> + Sync,
{
    let mut summary = BatchSummary::new(mode);
    if files.is_empty() {
        log::warn!("{}: no matching files found", mode);
        return summary;
    }

    log::info!("{}: processing {} files", mode, files.len());
    let outcomes: Vec<Outcome> = files
        .par_iter()
        .map(|file| {
            log::debug!("Processing {}", file.path.display());
            Outcome::from_result(job(file))
        })
        .collect();

    for (file, outcome) in files.iter().zip(outcomes) {
        summary.record(file, outcome);
    }
    summary.log();
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use dnaseg_core::TableKind;

    fn input(name: &str) -> InputFile {
        InputFile { path: PathBuf::from(name), kind: TableKind::Segments }
    }

    #[test]
    fn test_failures_do_not_stop_batch() {
        let files = vec![input("segments_output_1.csv"), input("segments_output_2.csv"), input("segments_output_3.csv")];

        let summary = run("words", &files, |file| match file.file_name().as_str() {
            "segments_output_1.csv" => Err(AnalysisError::empty(&file.path, "no words").into()),
            "segments_output_2.csv" => Err(AnalysisError::malformed(&file.path, "bad row").into()),
            _ => Ok(vec![PathBuf::from("out/segments_output_3_words.png")]),
        });

        assert_eq!(summary.files, 3);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.charted, 1);
        assert_eq!(summary.outputs, vec![PathBuf::from("out/segments_output_3_words.png")]);
    }

    #[test]
    fn test_context_keeps_classification() {
        let err = anyhow::Error::from(AnalysisError::empty("a.csv", "no rows")).context("isochore");
        assert!(matches!(Outcome::from_result(Err(err)), Outcome::Skipped(_)));

        let other = anyhow::anyhow!("render failed");
        assert!(matches!(Outcome::from_result(Err(other)), Outcome::Failed(_)));
    }

    #[test]
    fn test_empty_batch() {
        let summary = run("scatter", &[], |_| Ok(Vec::new()));
        assert_eq!(summary.files, 0);
    }
}
