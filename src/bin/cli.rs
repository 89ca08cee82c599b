//! splicer CLI — decode drum-machine pattern files and print them as text.
//!
//! Usage:
//!   sp-cli path/to/pattern_1.splice
//!   sp-cli --with-name patterns/*.splice
//!   RUST_LOG=sp_formats=trace sp-cli pattern_1.splice

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Decode Splice drum patterns and print their canonical text form
#[derive(Parser)]
#[command(name = "sp-cli")]
#[command(version)]
struct Cli {
    /// Pattern files to decode
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Display name to use instead of the file name (single file only)
    #[arg(long)]
    name: Option<String>,

    /// Print a `== <name>` line before each pattern
    #[arg(long)]
    with_name: bool,

    /// More log output on stderr (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(0) => ExitCode::SUCCESS,
        Ok(failed) => {
            tracing::warn!("{} of {} files failed to decode", failed, cli.files.len());
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .init();
}

/// Decode every file, reporting failures as they happen. Returns the
/// number of files that failed.
fn run(cli: &Cli) -> Result<usize> {
    if cli.name.is_some() && cli.files.len() > 1 {
        bail!("--name can only be used with a single file");
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut failed = 0;

    for path in &cli.files {
        match decode(path, cli.name.as_deref()) {
            Ok(pattern) => {
                if cli.with_name {
                    writeln!(out, "== {}", pattern.name)?;
                }
                write!(out, "{}", pattern)?;
            }
            Err(e) => {
                eprintln!("{:#}", e);
                failed += 1;
            }
        }
    }

    out.flush()?;
    Ok(failed)
}

fn decode(path: &Path, name: Option<&str>) -> Result<sp_ir::Pattern> {
    let mut pattern = sp_formats::decode_file(path)
        .with_context(|| format!("Failed to decode {}", path.display()))?;
    if let Some(name) = name {
        pattern.name = name.to_string();
    }
    tracing::debug!(file = %path.display(), tracks = pattern.tracks.len(), "decoded");
    Ok(pattern)
}
