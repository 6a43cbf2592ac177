use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Platform file browser command
fn opener() -> &'static str {
    if cfg!(target_os = "windows") {
        "explorer"
    } else if cfg!(target_os = "macos") {
        "open"
    } else {
        "xdg-open"
    }
}

/// Chart files (`.png`, `.svg`) directly inside `dir`, sorted by name
pub fn saved_charts(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(anyhow!("No charts found: {} is not a directory", dir.display()));
    }

    let mut charts = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?
    {
        let path = entry?.path();
        let is_chart = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("png") || e.eq_ignore_ascii_case("svg"))
            .unwrap_or(false);
        if path.is_file() && is_chart {
            charts.push(path);
        }
    }
    charts.sort();
    Ok(charts)
}

/// Open a directory of saved charts in the system file browser
pub fn execute(dir: &Path) -> Result<()> {
    let charts = saved_charts(dir)?;
    if charts.is_empty() {
        return Err(anyhow!("No charts found in {}", dir.display()));
    }
    log::info!("{} charts in {}", charts.len(), dir.display());

    let program = which::which(opener())
        .with_context(|| format!("'{}' not found in PATH", opener()))?;
    log::debug!("Using {}", program.display());

    Command::new(&program)
        .arg(dir)
        .spawn()
        .with_context(|| format!("Failed to launch {}", program.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_saved_charts_filters_images() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("b_words.svg"), "<svg/>").unwrap();
        std::fs::write(dir.path().join("a_scatter.PNG"), [0u8; 4]).unwrap();
        std::fs::write(dir.path().join("a_simple_average.tsv"), "Start\tEnd\tGC_Content\n").unwrap();
        std::fs::create_dir(dir.path().join("nested.png")).unwrap();

        let charts = saved_charts(dir.path()).unwrap();
        let names: Vec<_> = charts
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a_scatter.PNG", "b_words.svg"]);
    }

    #[test]
    fn test_missing_directory() {
        let dir = TempDir::new().unwrap();
        let err = saved_charts(&dir.path().join("nope")).unwrap_err();
        assert!(err.to_string().contains("No charts found"));
    }

    #[test]
    fn test_empty_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = execute(dir.path()).unwrap_err();
        assert!(err.to_string().contains("No charts found"));
    }
}
