//! # textloc
//!
//! A CLI that classifies the lines and characters of source files.
//!
//! ## Overview
//!
//! textloc is built on top of textloclib. It walks the given paths, hands
//! every file to the parser registered for its extension, and prints line
//! and character totals.
//!
//! ## Usage
//!
//! ```bash
//! # Count everything under the current directory
//! textloc .
//!
//! # Only the C-family parser, plain text for everything else
//! textloc src --parser cfamily --default-parser plain
//!
//! # Treat .inc files as C and claim .jsonc for the C-family parser
//! textloc . --alias inc=c --extension cfamily=jsonc
//!
//! # Per-file breakdown as JSON
//! textloc . --by-file --output json
//! ```

mod render;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::{Arg, ArgAction, ArgMatches, Command};
use textloclib::{
    discover_files, parser_from_id, Aggregator, CounterOptions, FilterConfig, TextlocError,
    BUILTIN_PARSER_IDS,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("textloc")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Counts source, comment, mixed and blank lines plus character classes")
        .arg(
            Arg::new("paths")
                .help("Files or directories to analyze")
                .num_args(1..)
                .default_value("."),
        )
        .arg(
            Arg::new("parser")
                .short('p')
                .long("parser")
                .action(ArgAction::Append)
                .value_delimiter(',')
                .value_parser(BUILTIN_PARSER_IDS.to_vec())
                .help("Parsers to register (default: all built-in parsers)"),
        )
        .arg(
            Arg::new("default-parser")
                .short('d')
                .long("default-parser")
                .value_parser(BUILTIN_PARSER_IDS.to_vec())
                .help("Parser for files no registered parser claims"),
        )
        .arg(
            Arg::new("require-extension")
                .long("require-extension")
                .action(ArgAction::SetTrue)
                .help("Never fall back to the default parser"),
        )
        .arg(
            Arg::new("extension")
                .short('x')
                .long("extension")
                .action(ArgAction::Append)
                .value_name("PARSER=EXT")
                .help("Claim an extension for a registered parser"),
        )
        .arg(
            Arg::new("alias")
                .short('a')
                .long("alias")
                .action(ArgAction::Append)
                .value_name("FROM=TO")
                .help("Treat files with extension FROM as if they had extension TO"),
        )
        .arg(
            Arg::new("include")
                .short('i')
                .long("include")
                .action(ArgAction::Append)
                .help("Include files matching glob pattern"),
        )
        .arg(
            Arg::new("exclude")
                .short('e')
                .long("exclude")
                .action(ArgAction::Append)
                .help("Exclude files matching glob pattern"),
        )
        .arg(
            Arg::new("by-file")
                .short('f')
                .long("by-file")
                .action(ArgAction::SetTrue)
                .help("Show breakdown by file"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_parser(["table", "json"])
                .default_value("table")
                .help("Output format"),
        )
        .arg(
            Arg::new("fail-fast")
                .long("fail-fast")
                .action(ArgAction::SetTrue)
                .help("Abort on the first file that cannot be counted"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("Increase log verbosity (-v info, -vv debug)"),
        )
}

/// Initialize stderr logging; `RUST_LOG` takes precedence over `-v`.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Split a `KEY=VALUE` flag value.
fn parse_pair(value: &str, flag: &str) -> anyhow::Result<(String, String)> {
    match value.split_once('=') {
        Some((key, val)) if !key.trim().is_empty() && !val.trim().is_empty() => {
            Ok((key.trim().to_string(), val.trim().to_string()))
        }
        _ => bail!("invalid --{flag} value '{value}', expected KEY=VALUE"),
    }
}

fn pairs(matches: &ArgMatches, flag: &str) -> anyhow::Result<Vec<(String, String)>> {
    matches
        .get_many::<String>(flag)
        .map(|values| values.map(|v| parse_pair(v, flag)).collect())
        .unwrap_or_else(|| Ok(Vec::new()))
}

/// Register parsers, extensions and aliases from the command line.
fn build_aggregator(matches: &ArgMatches) -> anyhow::Result<Aggregator> {
    let mut options =
        CounterOptions::new().require_extension(matches.get_flag("require-extension"));
    if let Some(id) = matches.get_one::<String>("default-parser") {
        options = options.default_parser_boxed(parser_from_id(id)?);
    }

    let mut aggregator = Aggregator::with_options(options);

    let ids: Vec<&str> = matches
        .get_many::<String>("parser")
        .map(|v| v.map(|s| s.as_str()).collect())
        .unwrap_or_else(|| BUILTIN_PARSER_IDS.to_vec());
    for id in ids {
        if !aggregator.add_parser(parser_from_id(id)?) {
            debug!(parser = id, "parser requested twice");
        }
    }

    for (id, ext) in pairs(matches, "extension")? {
        let parser = aggregator.parser_mut(&id).ok_or_else(|| {
            TextlocError::InvalidArgument(format!("parser '{id}' is not registered"))
        })?;
        if !parser.add_extension(&ext) {
            debug!(parser = %id, extension = %ext, "extension already claimed or invalid");
        }
    }

    aggregator.add_extension_aliases(pairs(matches, "alias")?)?;

    Ok(aggregator)
}

fn build_filter(matches: &ArgMatches) -> anyhow::Result<FilterConfig> {
    let mut filter = FilterConfig::new();

    if let Some(includes) = matches.get_many::<String>("include") {
        for pattern in includes {
            filter = filter.include(pattern)?;
        }
    }

    if let Some(excludes) = matches.get_many::<String>("exclude") {
        for pattern in excludes {
            filter = filter.exclude(pattern)?;
        }
    }

    Ok(filter)
}

/// Collect the files to count.
///
/// Files named on the command line are always counted; files found by
/// walking a directory are kept only if some parser can handle them.
fn collect_files(
    roots: &[&Path],
    filter: &FilterConfig,
    aggregator: &Aggregator,
) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for root in roots {
        let found = discover_files(root, filter)?;
        if root.is_file() {
            files.extend(found);
            continue;
        }
        let total = found.len();
        files.extend(
            found
                .into_iter()
                .filter(|path| aggregator.can_process(&path.to_string_lossy())),
        );
        debug!(root = %root.display(), discovered = total, "walked directory");
    }

    files.sort();
    files.dedup();
    Ok(files)
}

fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    let roots: Vec<&Path> = matches
        .get_many::<String>("paths")
        .map(|v| v.map(Path::new).collect())
        .unwrap_or_default();
    let filter = build_filter(matches)?;
    let mut aggregator = build_aggregator(matches)?;

    let files = collect_files(&roots, &filter, &aggregator)?;
    info!(files = files.len(), parsers = ?aggregator.parser_ids(), "counting");

    let skipped = aggregator
        .process_files(&files, matches.get_flag("fail-fast"))
        .context("counting aborted")?;
    if !skipped.is_empty() {
        info!(skipped = skipped.len(), "some files were not counted");
    }

    let snapshot = aggregator.statistics();
    let by_file = matches.get_flag("by-file");
    let output = matches
        .get_one::<String>("output")
        .map(|s| s.as_str())
        .unwrap_or("table");

    let base_path = match roots.as_slice() {
        [single] if single.is_dir() => Some(*single),
        _ => None,
    };

    let rendered = match output {
        "json" => render::render_json(&snapshot, &skipped, by_file)?,
        _ => render::render_table(&snapshot, by_file, base_path),
    };
    print!("{rendered}");

    Ok(())
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();
    init_logging(matches.get_count("verbose"));

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
