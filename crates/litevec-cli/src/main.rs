//! LiteVector command-line tool — dump, render, produce, and validate
//! LiteVector byte streams.
//!
//! # Command overview
//!
//! ```text
//! litevec <COMMAND> [OPTIONS]
//!
//! Commands:
//!   dump      Print a human-readable element dump of a stream
//!   json      Render a stream as JSON
//!   encode    Produce a stream from a JSON document
//!   validate  Check a stream for structural correctness
//!   help      Print help information
//! ```
//!
//! Every command that reads a stream accepts `-` for stdin, so decoder
//! output can be piped straight back in:
//!
//! ```text
//! litevec encode config.json | litevec json -
//! ```
//!
//! # Exit codes
//!
//! | Code | Meaning                                  |
//! |------|------------------------------------------|
//! | 0    | Success                                  |
//! | 1    | Error (I/O failure, malformed stream, …) |
//!
//! Errors are written to stderr so stdout can be piped cleanly.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

mod cmd_dump;
mod cmd_encode;
mod cmd_json;
mod cmd_validate;

// ── CLI root ──────────────────────────────────────────────────────────────────

/// The LiteVector command-line tool.
#[derive(Parser)]
#[command(name = "litevec", version, about = "LiteVector stream CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Skip UTF-8 validation of string payloads while decoding.
    #[arg(long, global = true)]
    no_utf8_check: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a human-readable element dump of a stream.
    Dump(DumpArgs),
    /// Render a stream as JSON.
    Json(JsonArgs),
    /// Produce a stream from a JSON document.
    Encode(EncodeArgs),
    /// Check a stream for structural correctness.
    Validate(ValidateArgs),
}

// ── Argument structs ──────────────────────────────────────────────────────────

#[derive(clap::Args)]
struct DumpArgs {
    /// Stream to read, or `-` for stdin.
    file: PathBuf,
}

#[derive(clap::Args)]
struct JsonArgs {
    /// Stream to read, or `-` for stdin.
    file: PathBuf,
}

#[derive(clap::Args)]
struct EncodeArgs {
    /// JSON document to encode, or `-` for stdin.
    manifest: PathBuf,

    /// Where to write the stream (defaults to stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Do not pad vectors to their natural alignment.
    #[arg(long)]
    no_align: bool,
}

#[derive(clap::Args)]
struct ValidateArgs {
    /// Stream to read, or `-` for stdin.
    file: PathBuf,
}

fn main() {
    let cli = Cli::parse();
    let validate_utf8 = !cli.no_utf8_check;

    let result = match &cli.command {
        Commands::Dump(args) => cmd_dump::run(args, validate_utf8),
        Commands::Json(args) => cmd_json::run(args, validate_utf8),
        Commands::Encode(args) => cmd_encode::run(args),
        Commands::Validate(args) => cmd_validate::run(args, validate_utf8),
    };

    if let Err(err) = result {
        eprintln!("error: {err:#}");
        process::exit(1);
    }
}

/// Read a whole input, treating `-` as stdin.
fn read_input(path: &Path) -> Result<Vec<u8>> {
    if path.as_os_str() == "-" {
        let mut bytes = Vec::new();
        std::io::stdin()
            .read_to_end(&mut bytes)
            .context("cannot read stdin")?;
        Ok(bytes)
    } else {
        std::fs::read(path).with_context(|| format!("cannot read {}", path.display()))
    }
}
