//! booktidy - make converted e-book HTML readable in a browser

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use booktidy::{Config, Mode, Tier};

#[derive(Parser)]
#[command(name = "booktidy")]
#[command(version, about = "Reformat e-book HTML exports into browser-readable pages", long_about = None)]
#[command(after_help = "EXAMPLES:
    booktidy                              Tidy html/input/dummy.html into html/input/book.html
    booktidy --tier slow                  Ask the reader before reflowing
    booktidy --prerender --no-tidy        Write an already reflowed, script-free page")]
struct Cli {
    /// TOML config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory holding the converter output
    #[arg(long, value_name = "DIR")]
    input_dir: Option<PathBuf>,

    /// Directory to write the page to
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// File name of the converter output
    #[arg(long, value_name = "NAME")]
    input_name: Option<String>,

    /// File name of the written page
    #[arg(long, value_name = "NAME")]
    output_name: Option<String>,

    /// jQuery build to ship with the page
    #[arg(long, value_name = "FILE")]
    library: Option<PathBuf>,

    /// Rendering tier of the reading browser (standard, slow)
    #[arg(long)]
    tier: Option<Tier>,

    /// Skip tidy and copy the input through
    #[arg(long)]
    no_tidy: bool,

    /// Apply the reflow now instead of in the browser
    #[arg(long)]
    prerender: bool,

    /// Log every rewrite pass
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }

    fn into_config(self) -> booktidy::Result<(Config, Mode)> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };

        if let Some(dir) = self.input_dir {
            config.input_dir = dir;
        }
        if let Some(dir) = self.output_dir {
            config.output_dir = dir;
        }
        if let Some(name) = self.input_name {
            config.input_name = name;
        }
        if let Some(name) = self.output_name {
            config.output_name = name;
        }
        if let Some(library) = self.library {
            config.library = library;
        }
        if let Some(tier) = self.tier {
            config.tier = tier;
        }
        if self.no_tidy {
            config.tidy.enabled = false;
        }

        let mode = if self.prerender {
            Mode::Prerendered
        } else {
            Mode::Scripted
        };
        Ok((config, mode))
    }
}

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_level());

    match prepare(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn prepare(cli: Cli) -> booktidy::Result<()> {
    let (config, mode) = cli.into_config()?;
    booktidy::run(&config, mode)?;
    Ok(())
}
