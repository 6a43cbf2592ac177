//! Interactive mode selection

use anyhow::Result;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use super::{open, run_all, RunPaths};
use crate::config::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Generate,
    Open,
    Quit,
}

impl Choice {
    fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "generate" => Some(Choice::Generate),
            "2" | "open" => Some(Choice::Open),
            "3" | "q" | "quit" | "exit" => Some(Choice::Quit),
            _ => None,
        }
    }
}

/// Print `label` and read one trimmed line; `None` at end of input
pub fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, label: &str) -> Result<Option<String>> {
    write!(out, "{}", label)?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Show the menu until a valid choice is made; `None` at end of input
pub fn read_choice<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<Option<Choice>> {
    loop {
        writeln!(out)?;
        writeln!(out, "1. Generate charts")?;
        writeln!(out, "2. Open saved charts")?;
        writeln!(out, "3. Quit")?;

        let Some(answer) = prompt(input, out, "Select an option: ")? else {
            return Ok(None);
        };
        match Choice::parse(&answer) {
            Some(choice) => return Ok(Some(choice)),
            None => writeln!(out, "Invalid choice '{}'", answer)?,
        }
    }
}

/// Run the menu over arbitrary input and output streams
pub fn run_with<R: BufRead, W: Write>(config: &Config, input: &mut R, out: &mut W) -> Result<()> {
    while let Some(choice) = read_choice(input, out)? {
        match choice {
            Choice::Generate => {
                let Some(input_dir) = prompt(input, out, "Input directory: ")? else { break };
                let Some(output_dir) = prompt(input, out, "Output directory [charts]: ")? else { break };
                let Some(sequences) = prompt(input, out, "Sequence file (blank to skip GC skew): ")? else { break };

                let paths = RunPaths {
                    input: PathBuf::from(input_dir),
                    output: PathBuf::from(if output_dir.is_empty() { "charts".to_string() } else { output_dir }),
                    format: None,
                };
                let sequences = (!sequences.is_empty()).then(|| PathBuf::from(sequences));

                match run_all(config, &paths, sequences.as_deref()) {
                    Ok(summaries) => {
                        for s in &summaries {
                            writeln!(
                                out,
                                "{}: {} charted, {} skipped, {} failed",
                                s.mode, s.charted, s.skipped, s.failed
                            )?;
                        }
                    }
                    Err(e) => writeln!(out, "Error: {:#}", e)?,
                }
            }
            Choice::Open => {
                let Some(dir) = prompt(input, out, "Chart directory: ")? else { break };
                if let Err(e) = open::execute(&PathBuf::from(dir)) {
                    writeln!(out, "Error: {:#}", e)?;
                }
            }
            Choice::Quit => break,
        }
    }
    Ok(())
}

pub fn execute(config: &Config) -> Result<()> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    run_with(config, &mut stdin.lock(), &mut stdout.lock())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    #[test]
    fn test_choice_parsing() {
        assert_eq!(Choice::parse(" 1 "), Some(Choice::Generate));
        assert_eq!(Choice::parse("Open"), Some(Choice::Open));
        assert_eq!(Choice::parse("q"), Some(Choice::Quit));
        assert_eq!(Choice::parse("4"), None);
    }

    #[test]
    fn test_invalid_choice_reprompts() {
        let mut input = Cursor::new("9\n2\n");
        let mut out = Vec::new();
        let choice = read_choice(&mut input, &mut out).unwrap();
        assert_eq!(choice, Some(Choice::Open));
        assert!(String::from_utf8(out).unwrap().contains("Invalid choice '9'"));
    }

    #[test]
    fn test_end_of_input_stops() {
        let mut input = Cursor::new("");
        let mut out = Vec::new();
        assert_eq!(read_choice(&mut input, &mut out).unwrap(), None);
    }

    #[test]
    fn test_generate_reports_missing_input() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing");
        let charts = dir.path().join("charts");
        let script = format!("1\n{}\n{}\n\n3\n", missing.display(), charts.display());

        let mut out = Vec::new();
        run_with(&Config::default(), &mut Cursor::new(script), &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("Error:"));
    }

    #[test]
    fn test_open_reports_empty_directory() {
        let dir = TempDir::new().unwrap();
        let script = format!("2\n{}\nquit\n", dir.path().display());

        let mut out = Vec::new();
        run_with(&Config::default(), &mut Cursor::new(script), &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("No charts found"));
    }
}
