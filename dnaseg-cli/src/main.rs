use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;
use anyhow::{Result, Context};

mod batch;
mod config;
mod commands;

use batch::BatchSummary;
use commands::RunPaths;
use config::Config;
use dnaseg_render::ImageFormat;

#[derive(Parser)]
#[command(name = "dnaseg")]
#[command(about = "DNA Segment Analyzer - charts for segment, isochore and GC skew tables")]
#[command(version)]
#[command(long_about = "
Reads the CSV tables written by a DNA segmentation run and renders one chart
per table: word frequency, GC skew, isochore GC content and segment scatter.

Examples:
  dnaseg words --input results/ --output charts/ --threshold 10
  dnaseg gc-skew --input results/ --output charts/ --sequences genome.fa
  dnaseg isochore --input results/ --output charts/ --avg-points 200
  dnaseg all --input results/ --output charts/ --sequences genome.fa --format svg
  dnaseg open charts/
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Number of threads to use
    #[arg(short, long, global = true)]
    pub threads: Option<usize>,

    /// Verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print a JSON run summary on stdout
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct IoArgs {
    /// Directory holding the input CSV tables
    #[arg(short, long, required = true)]
    pub input: PathBuf,

    /// Directory charts are written to (created if missing)
    #[arg(short, long, required = true)]
    pub output: PathBuf,

    /// Image format, png or svg (overrides render.format)
    #[arg(short, long, value_parser = ImageFormat::from_str)]
    pub format: Option<ImageFormat>,
}

impl IoArgs {
    fn paths(&self) -> RunPaths {
        RunPaths {
            input: self.input.clone(),
            output: self.output.clone(),
            format: self.format,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Bar chart of best-word frequencies per segment table
    Words {
        #[command(flatten)]
        io: IoArgs,

        /// Minimum occurrences for a word to be charted
        #[arg(long)]
        threshold: Option<usize>,
    },

    /// GC skew per segment, using sequences from a FASTA-like file
    GcSkew {
        #[command(flatten)]
        io: IoArgs,

        /// Sequence file (FASTA-like)
        #[arg(short, long)]
        sequences: Option<PathBuf>,
    },

    /// Original, block-averaged, moving-averaged and histogram GC content plots
    Isochore {
        #[command(flatten)]
        io: IoArgs,

        /// Windows per simple-average block
        #[arg(long)]
        avg_points: Option<usize>,

        /// Trailing moving-average window
        #[arg(long)]
        moving_window: Option<usize>,

        /// Histogram bins
        #[arg(long)]
        bins: Option<usize>,
    },

    /// Segment length vs. start, colored by best word
    Scatter {
        #[command(flatten)]
        io: IoArgs,
    },

    /// Every chart mode in one run
    All {
        #[command(flatten)]
        io: IoArgs,

        /// Sequence file for the GC skew charts
        #[arg(short, long)]
        sequences: Option<PathBuf>,

        /// Word frequency threshold
        #[arg(long)]
        threshold: Option<usize>,
    },

    /// Open a directory of saved charts in the system file browser
    Open {
        /// Chart directory
        dir: PathBuf,
    },

    /// Interactive menu
    Menu,

    /// Print the default configuration, or write it to a file
    Config {
        /// Output TOML file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn setup_logging(verbose: u8, quiet: bool) -> Result<()> {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .try_init()
        .context("Failed to initialise logging")?;

    Ok(())
}

fn report(summaries: &[BatchSummary], json: bool) -> Result<()> {
    if json {
        let out = serde_json::to_string_pretty(summaries).context("Failed to serialize run summary")?;
        println!("{}", out);
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    setup_logging(cli.verbose, cli.quiet)?;

    // The default configuration is printed without loading one
    if let Commands::Config { output } = &cli.command {
        return match output {
            Some(path) => {
                Config::default().save_to_file(path)?;
                log::info!("Wrote default configuration to {}", path.display());
                Ok(())
            }
            None => {
                print!("{}", Config::example_toml()?);
                Ok(())
            }
        };
    }

    // Load configuration
    let config = Config::load(cli.config.as_deref())?;

    let threads = cli.threads.unwrap_or(config.general.threads);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .context("Failed to set thread count")?;
    log::debug!("Using {} threads", threads);

    // Execute the requested command
    let summaries = match cli.command {
        Commands::Words { io, threshold } => {
            vec![commands::words::execute(&config, &io.paths(), threshold)?]
        }
        Commands::GcSkew { io, sequences } => {
            vec![commands::gc_skew::execute(&config, &io.paths(), sequences.as_deref())?]
        }
        Commands::Isochore { io, avg_points, moving_window, bins } => {
            let overrides = commands::isochore::Overrides {
                avg_points,
                moving_window,
                histogram_bins: bins,
            };
            vec![commands::isochore::execute(&config, &io.paths(), &overrides)?]
        }
        Commands::Scatter { io } => {
            vec![commands::scatter::execute(&config, &io.paths())?]
        }
        Commands::All { io, sequences, threshold } => {
            let mut config = config;
            if let Some(t) = threshold {
                config.words.threshold = t;
            }
            commands::run_all(&config, &io.paths(), sequences.as_deref())?
        }
        Commands::Open { dir } => {
            commands::open::execute(&dir)?;
            Vec::new()
        }
        Commands::Menu => {
            commands::menu::execute(&config)?;
            Vec::new()
        }
        Commands::Config { .. } => Vec::new(),
    };

    report(&summaries, cli.json)
}
