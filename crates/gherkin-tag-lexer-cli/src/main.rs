//! `gherkin-tags`: list, count and filter the tags in Gherkin feature files.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use gherkin_tag_lexer::MidWordTags;
use tracing::info;

use gherkin_tag_lexer_cli::config::{CliConfig, LogLevel};
use gherkin_tag_lexer_cli::error::CliError;
use gherkin_tag_lexer_cli::logging::init_logging;
use gherkin_tag_lexer_cli::run::{Format, Request, read_sources, run};

/// List the tags in Gherkin feature files.
#[derive(Parser, Debug)]
#[command(name = "gherkin-tags", version, about)]
struct Args {
    /// Feature files to scan; standard input when omitted.
    files: Vec<PathBuf>,

    /// Emit one JSON object per tag (or one object of counts with --count).
    #[arg(long)]
    json: bool,

    /// Report each tag once with the locations it occurs at.
    #[arg(long)]
    count: bool,

    /// Only report tag lines matching this filter, e.g. `@wip,~@slow`.
    /// Repeat to require every filter.
    #[arg(long = "tags", value_name = "TERM")]
    tags: Vec<String>,

    /// Whether an `@` inside a word may start a tag (allow, reject).
    #[arg(long)]
    mid_word: Option<MidWordTags>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<LogLevel>,
}

fn main() {
    let args = Args::parse();

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(e) => {
            init_logging(&CliConfig::default());
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(e.exit_code());
        }
    };
    init_logging(&config);

    info!(version = env!("CARGO_PKG_VERSION"), "starting gherkin-tags");

    if let Err(e) = execute(&args, &config) {
        tracing::error!(error = %e, "run failed");
        std::process::exit(e.exit_code());
    }
}

fn build_config(args: &Args) -> Result<CliConfig, CliError> {
    let config = CliConfig::from_env()?;
    Ok(config.apply_overrides(args.log_level, args.mid_word))
}

fn execute(args: &Args, config: &CliConfig) -> Result<(), CliError> {
    let request = Request::new(
        config.scan_options(),
        args.tags.as_slice(),
        Format::from_flags(args.json, args.count),
    )?;
    let sources = read_sources(&args.files)?;
    let mut out = io::stdout().lock();
    let reported = run(&request, &sources, &mut out)?;
    out.flush()?;
    info!(sources = sources.len(), reported, "done");
    Ok(())
}
