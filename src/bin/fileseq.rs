//! # fileseq CLI - Find missing files in numbered sequences
//!
//! ## Usage
//! ```bash
//! # Check the current directory
//! fileseq
//!
//! # Check a whole render tree, frames 1001 up to (not including) 1100
//! fileseq -r -f 1001 -t 1100 ./renders
//!
//! # Only look at EXR files and use a custom split pattern
//! fileseq -i '\.exr$' -p '(?P<bare>[a-z]+)_v(?P<index>\d+)' -m '{bare}_v{index}' ./comp
//!
//! # Machine readable output
//! fileseq --json ./renders
//! ```

use anyhow::Context;
use clap::Parser;
use colored::*;
use humantime::format_duration;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use fileseq::utils::plural;
use fileseq::{CheckerConfig, SeqError, SequenceChecker, SequenceCheckerBuilder};
use tracing_subscriber::EnvFilter;

/// fileseq - report the files missing from numbered file sequences
#[derive(Parser)]
#[command(name = "fileseq")]
#[command(version)]
#[command(about = "Find missing files in numbered file sequences")]
#[command(long_about = None)]
#[command(allow_negative_numbers = true)]
struct Cli {
    /// Directories to check
    #[arg(value_name = "PATH", default_value = ".")]
    paths: Vec<PathBuf>,

    /// Descend into subdirectories
    #[arg(short, long)]
    recursive: bool,

    /// Ignore sequences starting below this index
    #[arg(short = 'f', long = "from", value_name = "NUM")]
    start: Option<i64>,

    /// Don't report indices at or above this one
    #[arg(short = 't', long = "to", value_name = "NUM")]
    end: Option<i64>,

    /// Only consider paths matching this regex
    #[arg(short, long, value_name = "RE")]
    include: Option<String>,

    /// Skip paths matching this regex (wins over --include)
    #[arg(short, long, value_name = "RE")]
    exclude: Option<String>,

    /// Custom split pattern with named groups bare, index and optionally secondary
    #[arg(short, long, value_name = "RE", requires = "template")]
    pattern: Option<String>,

    /// Layout of missing names for --pattern, e.g. '{bare}{index}{ext}'
    #[arg(short = 'm', long, value_name = "STR", requires = "pattern")]
    template: Option<String>,

    /// Increase log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Print absolute directory paths
    #[arg(long)]
    full_paths: bool,

    /// Read settings from a JSON file; flags override it
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging
    let level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(format!("fileseq={}", level)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Disable colors if needed
    if std::env::var_os("NO_COLOR").is_some() {
        colored::control::set_override(false);
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let message = match e.downcast_ref::<SeqError>() {
                Some(seq) if e.chain().count() == 1 => seq.user_message(),
                _ => format!("{:#}", e),
            };
            eprintln!("{}: {}", "fileseq".red().bold(), message);
            eprintln!("Try 'fileseq --help' for more information.");
            ExitCode::from(2)
        }
    }
}

/// Main runner
fn run(cli: Cli) -> anyhow::Result<()> {
    let mut checker = builder_from(&cli)?.build()?;

    let mut combined = BTreeMap::new();
    let mut processed = 0;
    let mut elapsed = Duration::ZERO;

    for path in &cli.paths {
        let report = checker.process_dir(path)?;
        processed += checker.total_processed();
        elapsed += checker.last_execution_duration().unwrap_or_default();
        for (dir, names) in report.iter() {
            combined.insert(dir.display().to_string(), names.to_vec());
        }
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&combined)?);
        return Ok(());
    }

    for (dir, names) in &combined {
        println!("{} {}:", "In".bold(), dir.as_str().cyan());
        for name in names {
            println!("  {} {}", "Missing".yellow(), name);
        }
    }

    let missing_files: usize = combined.values().map(Vec::len).sum();
    if missing_files == 0 {
        println!("{}", "Nothing missing".green());
    } else {
        println!(
            "{} {} in {}",
            "Total missing:".bold(),
            plural(missing_files, "file"),
            plural(combined.len(), "dir")
        );
    }
    println!("Processed {} in {}", plural(processed, "file"), format_duration(to_micros(elapsed)));
    Ok(())
}

/// Settings from the config file (if any) overridden by flags
fn builder_from(cli: &Cli) -> anyhow::Result<SequenceCheckerBuilder> {
    let mut builder = match &cli.config {
        Some(path) => CheckerConfig::load(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?
            .into_builder(),
        None => SequenceChecker::builder(),
    };

    if cli.recursive {
        builder = builder.recursive(true);
    }
    if cli.full_paths {
        builder = builder.full_paths(true);
    }
    if let Some(start) = cli.start {
        builder = builder.start(start);
    }
    if let Some(end) = cli.end {
        builder = builder.end(end);
    }
    if let Some(include) = &cli.include {
        builder = builder.include_pattern(include.as_str());
    }
    if let Some(exclude) = &cli.exclude {
        builder = builder.exclude_pattern(exclude.as_str());
    }
    if let (Some(pattern), Some(template)) = (&cli.pattern, &cli.template) {
        builder = builder.split_pattern(pattern.as_str(), template.as_str());
    }
    Ok(builder)
}

/// Drop sub-microsecond noise from a duration before printing it
fn to_micros(elapsed: Duration) -> Duration {
    Duration::from_micros(u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX))
}
