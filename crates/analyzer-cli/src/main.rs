//! `analyzer` - run the Python analyzer over a file and print what an editor would see.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p analyzer-cli -- path/to/file.py
//! cargo run -p analyzer-cli -- path/to/file.py --style-check --json
//! cargo run -p analyzer-cli -- path/to/file.py --replace '3=    return None'
//! ```
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` (default `warn`), e.g.
//! `RUST_LOG=analyzer_core=debug`.

mod report;

use analyzer_core::AnalyzerConfig;
use analyzer_core_python::python_service;
use anyhow::Context;
use clap::Parser;
use report::Report;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Parser)]
#[command(name = "analyzer", version, about = "Classify, introspect and check a Python file", long_about = None)]
struct CliArgs {
    /// Python source file to analyze
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// JSON configuration file (`style_check`, `max_line_length`)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable PEP 8 style checks (overrides the configuration file)
    #[arg(long)]
    style_check: bool,

    /// Maximum line length for the style checker (overrides the configuration file)
    #[arg(long, value_name = "N")]
    max_line_length: Option<usize>,

    /// Replace a line after the initial analysis; LINE is 1-based, may be repeated
    #[arg(long = "replace", value_name = "LINE=TEXT", value_parser = parse_replacement)]
    replacements: Vec<(usize, String)>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

fn parse_replacement(raw: &str) -> Result<(usize, String), String> {
    let (line, text) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected LINE=TEXT, got {raw:?}"))?;
    let line: usize = line
        .trim()
        .parse()
        .map_err(|e| format!("invalid line number {line:?}: {e}"))?;
    if line == 0 {
        return Err("line numbers start at 1".to_string());
    }
    Ok((line - 1, text.to_string()))
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .try_init();
}

fn load_config(args: &CliArgs) -> anyhow::Result<AnalyzerConfig> {
    let mut config = match &args.config {
        Some(path) => AnalyzerConfig::from_json_file(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => AnalyzerConfig::default(),
    };
    if args.style_check {
        config = config.with_style_check(true);
    }
    if let Some(max) = args.max_line_length {
        config = config.with_max_line_length(max);
    }
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let args = CliArgs::parse();
    let config = load_config(&args)?;

    let source = std::fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;

    let mut service = python_service(config);
    let id = service.create_session().context("failed to create analyzer session")?;
    if let Some(dir) = args.file.parent() {
        service.set_source_directory(id, dir)?;
    }
    service.set_source_text(id, &source)?;
    for (line, text) in &args.replacements {
        service.replace_line(id, *line, text)?;
    }

    let report = Report::collect(&service, id, args.file.display().to_string())?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.json {
        serde_json::to_writer_pretty(&mut out, &report)?;
        writeln!(out)?;
    } else {
        report.render_text(&mut out)?;
    }
    Ok(())
}
