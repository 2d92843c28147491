//! Command-line entry point.
//!
//! # Responsibility
//! - Parse flags and initialize logging.
//! - Hand the input file to `timeline_core::convert_file` and report results.
//!
//! # Invariants
//! - Exit code is `0` on success and `1` on any failure.
//! - No CSV is written when conversion fails or `--check` is given.
//! - The output path never equals the input path.

use clap::Parser;
use log::info;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use timeline_core::{
    convert_file, default_log_level, init_logging, PipelineOptions, DEFAULT_MAX_DEPTH,
};

#[derive(Parser, Debug)]
#[command(name = "outline-timeline")]
#[command(version)]
#[command(about = "Convert a tab-indented event outline into a timeline CSV")]
struct Args {
    /// Outline file to convert
    #[arg(short, long)]
    input: PathBuf,

    /// CSV output path (default: input path with a .csv extension, or
    /// .timeline.csv when the input already ends in .csv)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Parse and validate only; do not write CSV
    #[arg(long)]
    check: bool,

    /// Skip eager validation of derived dates before export
    #[arg(long)]
    skip_validation: bool,

    /// Maximum outline nesting depth
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Log level: trace|debug|info|warn|error
    #[arg(long)]
    log_level: Option<String>,

    /// Absolute directory for rotating log files (default: stderr)
    #[arg(long)]
    log_dir: Option<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = args.log_level.as_deref().unwrap_or(default_log_level());
    if let Err(err) = init_logging(level, args.log_dir.as_deref()) {
        eprintln!("error: {err}");
        return ExitCode::FAILURE;
    }

    let output = match resolve_output(&args) {
        Ok(output) => output,
        Err(message) => {
            eprintln!("error: {message}");
            return ExitCode::FAILURE;
        }
    };
    let options = PipelineOptions {
        max_depth: args.max_depth,
        validate: !args.skip_validation,
    };

    match convert_file(&args.input, output.as_deref(), options) {
        Ok(timeline) => {
            info!(
                "event=cli_done module=cli status=ok rows={}",
                timeline.table.rows.len()
            );
            match output {
                Some(path) => println!(
                    "wrote {} events to {}",
                    timeline.table.rows.len(),
                    path.display()
                ),
                None => println!("{} events OK", timeline.table.rows.len()),
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn resolve_output(args: &Args) -> Result<Option<PathBuf>, String> {
    if args.check {
        return Ok(None);
    }
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input));
    if output == args.input {
        return Err(format!(
            "output path `{}` would overwrite the input",
            output.display()
        ));
    }
    Ok(Some(output))
}

fn default_output_path(input: &Path) -> PathBuf {
    let output = input.with_extension("csv");
    if output == input {
        input.with_extension("timeline.csv")
    } else {
        output
    }
}
