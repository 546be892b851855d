use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cfp")]
#[command(about = "Pick unseen Codeforces problems, one per requested rating")]
pub struct Cli {
    /// Path to the TOML run configuration
    #[arg(long, default_value = "cfp.toml")]
    pub config: PathBuf,

    /// Override the configured selection seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output format (text or json)
    #[arg(long, default_value = "text", value_enum)]
    pub format: OutputFormat,

    /// Log network progress at debug level when RUST_LOG is unset
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
