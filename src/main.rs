//! `copyright-scanr` — extract, deduplicate and aggregate copyright notices.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]) and initialise logging.
//! 2. Load config ([`config::load_config`]).
//! 3. `scan`: run the batch driver ([`scanner::batch`]) over each immediate
//!    subdirectory, writing one report per subdirectory, then print a
//!    summary ([`report`]).
//! 4. `analyze`: unpack a zip archive, scan it and send the notices to the
//!    analysis service ([`analysis`]).
//! 5. Any error exits with status `1`.

mod analysis;
mod cli;
mod config;
mod models;
mod notice;
mod report;
mod scanner;

use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use indicatif_log_bridge::LogWrapper;

use analysis::mcp::{McpClient, McpSettings};
use cli::{AnalyzeArgs, Cli, Command, ScanArgs};
use config::{load_config, Config, API_KEY_ENV};
use scanner::batch::scan_subdirectories;
use scanner::template::load_template;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let multi = init_logging(cli.verbose)?;

    let cwd = std::env::current_dir()?;
    let config = load_config(&cwd, cli.config.as_deref())?;

    match cli.command {
        Command::Scan(args) => run_scan(args, &config, &multi),
        Command::Analyze(args) => run_analyze(args, &config).await,
    }
}

/// Install `env_logger` behind the progress display, so log lines suspend
/// and redraw the bar instead of tearing it.
fn init_logging(verbose: bool) -> Result<MultiProgress> {
    let default_level = if verbose { "info" } else { "warn" };
    let logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
            .build();
    let level = logger.filter();

    let multi = MultiProgress::new();
    bridged_logger(multi.clone(), logger).try_init()?;
    log::set_max_level(level);
    Ok(multi)
}

fn bridged_logger(
    multi: MultiProgress,
    logger: env_logger::Logger,
) -> LogWrapper<env_logger::Logger> {
    LogWrapper::new(multi, logger)
}

fn run_scan(args: ScanArgs, config: &Config, multi: &MultiProgress) -> Result<()> {
    let template = if args.no_template {
        None
    } else {
        let path = args.template.as_deref().unwrap_or(config.scan.template.as_path());
        load_template(path)?
    };

    let pb = if args.quiet {
        ProgressBar::hidden()
    } else {
        let pb = multi.add(ProgressBar::new(0));
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
                .progress_chars("#>-"),
        );
        pb
    };

    let outcomes = scan_subdirectories(
        &args.scan_dir,
        &args.output_pattern,
        template.as_ref(),
        &pb,
    )
    .with_context(|| format!("scan of {} failed", args.scan_dir.display()))?;
    pb.finish_and_clear();

    report::terminal::render(&outcomes, &args.scan_dir, args.quiet);
    eprintln!("{}", "All directories scanned successfully!".green());

    Ok(())
}

async fn run_analyze(args: AnalyzeArgs, config: &Config) -> Result<()> {
    let Some(endpoint) = args.endpoint.or_else(|| config.analysis.endpoint.clone()) else {
        bail!("analysis endpoint is required (--endpoint or [analysis].endpoint)");
    };
    let Some(api_key) = args
        .api_key
        .or_else(|| config.analysis.api_key.clone())
        .or_else(|| std::env::var(API_KEY_ENV).ok())
    else {
        bail!("analysis API key is required (--api-key, [analysis].api_key or {API_KEY_ENV})");
    };

    let client = McpClient::new(McpSettings {
        endpoint,
        api_key,
        model: args.model.unwrap_or_else(|| config.analysis.model.clone()),
        timeout: Duration::from_secs(config.analysis.timeout_secs),
    })?;

    eprintln!("  {} analyzing {}", "→".cyan(), args.zip.display());
    let result = analysis::analyze_archive(&args.zip, &client).await?;

    std::fs::write(&args.output, result)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    eprintln!(
        "Analysis complete. Results saved to: {}",
        args.output.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use indicatif::ProgressDrawTarget;
    use log::{Level, LevelFilter, Log, Metadata};

    #[test]
    fn test_bridged_logger_keeps_filter() {
        let multi = MultiProgress::with_draw_target(ProgressDrawTarget::hidden());
        let _bar = multi.add(ProgressBar::new(3));
        let logger = env_logger::Builder::new()
            .filter_level(LevelFilter::Warn)
            .build();
        let wrapper = bridged_logger(multi, logger);

        let warn = Metadata::builder().level(Level::Warn).target("scan").build();
        let debug = Metadata::builder().level(Level::Debug).target("scan").build();
        assert!(wrapper.enabled(&warn));
        assert!(!wrapper.enabled(&debug));
    }
}
