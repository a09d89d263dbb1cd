//! taglint CLI - markup linter
//!
//! Lints HTML-like files with configurable, pluggable rules.

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use glob::glob;
use std::path::PathBuf;
use taglint::config::Config;
use taglint::issue::Severity;
use taglint::linter::{Linter, LinterOptions};
use taglint::output::{summarize, FileReport, JsonFormatter, OutputFormatter, TextFormatter};

#[derive(Parser)]
#[command(
    name = "taglint",
    version,
    about = "Markup linter",
    long_about = "A fast, configurable linter for HTML-like markup."
)]
struct Cli {
    /// Files or glob patterns to lint
    files: Vec<String>,

    /// Configuration file path (.json, .yaml, .yml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: Format,

    /// Parser name
    #[arg(long, default_value = "default")]
    parser: String,

    /// Number of parallel jobs (0 = auto)
    #[arg(short, long, default_value = "0")]
    jobs: usize,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Ignore taglint-disable comments
    #[arg(long)]
    no_inline_config: bool,

    /// List available rules and exit
    #[arg(long)]
    list_rules: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => {
            let mut config = Config::with_builtin_rules();
            config.enable_all(Severity::Error)?;
            Ok(config)
        }
    }
}

fn expand_files(patterns: &[String]) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let paths = glob(pattern).with_context(|| format!("Invalid pattern '{}'", pattern))?;
        for entry in paths.flatten() {
            if entry.is_file() {
                files.push(entry);
            }
        }
    }
    Ok(files)
}

fn run(cli: Cli) -> anyhow::Result<i32> {
    let config = load_config(&cli)?;

    if cli.list_rules {
        println!("{}", "Available rules:".bold());
        for name in config.rule_names() {
            let state = match config.setting(name) {
                Some(setting) => setting.severity.to_string(),
                None => "off".to_string(),
            };
            println!("  {:<20} {}", name.cyan(), state);
        }
        return Ok(0);
    }

    if cli.files.is_empty() {
        bail!("No files specified");
    }
    let files = expand_files(&cli.files)?;
    if files.is_empty() {
        bail!("No files found to lint");
    }

    let mut options = LinterOptions::new()
        .with_parser(cli.parser.as_str())
        .with_jobs(cli.jobs);
    if cli.no_inline_config {
        options = options.without_inline_config();
    }
    let linter = Linter::new(options)?.with_config(config);

    let sources = files
        .iter()
        .map(|path| {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let mut reports = Vec::with_capacity(files.len());
    for (path, result) in files.into_iter().zip(linter.lint_many(&sources)) {
        let issues = result.with_context(|| format!("Failed to lint {}", path.display()))?;
        reports.push(FileReport::new(path, issues));
    }

    let formatter: Box<dyn OutputFormatter> = match cli.format {
        Format::Text => {
            let formatter = TextFormatter::new();
            if cli.no_color {
                Box::new(formatter.without_color())
            } else {
                Box::new(formatter)
            }
        }
        Format::Json => Box::new(JsonFormatter::new().pretty()),
    };
    println!("{}", formatter.format(&reports));

    Ok(summarize(&reports).exit_code())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{}: {:#}", "error".red().bold(), e);
            std::process::exit(3);
        }
    }
}
