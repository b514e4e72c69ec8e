use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "copyright-scanr",
    about = "Extract and deduplicate copyright notices from source trees",
    version
)]
pub struct Cli {
    /// Config file [default: ./.copyright-scanr/config.toml, fallback ~/.config/copyright-scanr/config.toml]
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log progress details (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write one notice report per immediate subdirectory of SCAN_DIR
    Scan(ScanArgs),
    /// Extract a zip archive, scan it and send the notices for analysis
    Analyze(AnalyzeArgs),
}

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Directory whose subdirectories are scanned
    pub scan_dir: PathBuf,

    /// Output file pattern; `{name}` is replaced by the subdirectory name
    pub output_pattern: String,

    /// Template prefix prepended to each report [default: template/prefix.txt]
    #[arg(long, value_name = "FILE", conflicts_with = "no_template")]
    pub template: Option<PathBuf>,

    /// Do not prepend a template prefix
    #[arg(long)]
    pub no_template: bool,

    /// Only print the final status line
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Zip archive to analyze
    #[arg(long, value_name = "FILE")]
    pub zip: PathBuf,

    /// Where to write the analysis
    #[arg(long, value_name = "FILE", default_value = "copyright_analysis.txt")]
    pub output: PathBuf,

    /// Analysis server base URL
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Analysis server API key [env: COPYRIGHT_SCANR_API_KEY]
    #[arg(long)]
    pub api_key: Option<String>,

    /// Model requested from the analysis server [default: gpt-4]
    #[arg(long)]
    pub model: Option<String>,
}
