use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Feed synthetic samples into a sliding-window aggregator and report its statistics."
)]
pub struct Cli {
    /// Enable verbose logging (sets log level to debug unless overridden by WINDOW_STATS_LOG/RUST_LOG)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Disable ANSI colors in log output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Path to a JSON run config. Defaults are used when omitted.
    pub config: Option<PathBuf>,
}
