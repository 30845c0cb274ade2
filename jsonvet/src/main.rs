use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use ariadne::Source;
use clap::Parser as ClapParser;
use jsonvet_core::{tokenize, Error, Limits, Token, Validator};
use serde::Serialize;
use tracing::*;

use crate::config::Config;

mod config;
mod logging;
mod report;

#[derive(Debug, ClapParser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Paths of the JSON documents to validate.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Explicit config file. Without it, `jsonvet.toml` in the working directory is used if
    /// present.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Maximum nesting of objects and lists, overriding the config file.
    #[arg(
        long,
        value_name = "N",
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..),
    )]
    max_depth: Option<usize>,

    /// Print each input's tokens as JSON lines on stdout before validating it.
    #[arg(long)]
    tokens: bool,

    /// Don't print a verdict line per input.
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Serialize)]
struct TokenRecord<'a> {
    file: &'a str,
    #[serde(flatten)]
    token: &'a Token,
}

fn main() -> anyhow::Result<()> {
    logging::setup_logging();

    let cli = Args::parse();

    debug!(?cli);

    let config = Config::load(cli.config.as_deref())?;
    debug!(?config);

    let limits = Limits {
        max_depth: cli.max_depth.unwrap_or(config.max_depth),
    };
    let dump_tokens = cli.tokens || config.dump_tokens;

    let mut invalid = 0;
    for input in &cli.inputs {
        let valid = match check_file(input, limits, dump_tokens) {
            Ok(valid) => valid,
            Err(e) => {
                eprintln!("error: {e:#}");
                false
            }
        };

        if !valid {
            invalid += 1;
        }

        if !cli.quiet {
            let verdict = if valid { "valid" } else { "invalid" };
            println!("{}: {verdict}", input.display());
        }
    }

    if invalid > 0 {
        bail!("{invalid} of {} input(s) failed validation", cli.inputs.len());
    }

    Ok(())
}

/// Validate one file, printing a diagnostic to stderr if it is invalid. Only I/O problems are
/// returned as `Err`.
fn check_file(input: &Path, limits: Limits, dump_tokens: bool) -> anyhow::Result<bool> {
    debug!(?input, "validating");

    let json_string = match std::fs::read_to_string(input) {
        Ok(file) => file,
        Err(e) => {
            error!(path = ?input, "failed to read input");
            return Err(e).with_context(|| format!("failed to read file `{}`", input.display()));
        }
    };

    let path = input.display().to_string();

    let result = tokenize(&json_string)
        .map_err(Error::from)
        .and_then(|tokens| {
            if dump_tokens {
                if let Err(e) = write_tokens(&path, &tokens) {
                    warn!(%e, "failed to dump tokens");
                }
            }
            Validator::with_limits(&tokens, limits)
                .document()
                .map_err(Error::from)
        });

    match result {
        Ok(()) => Ok(true),
        Err(err) => {
            debug!(%err, %path, "invalid document");
            report::error_report(&path, &err)
                .eprint((&path, Source::from(&json_string)))
                .context("failed to print diagnostic")?;
            Ok(false)
        }
    }
}

fn write_tokens(path: &str, tokens: &[Token]) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout().lock();
    for token in tokens {
        serde_json::to_writer(&mut stdout, &TokenRecord { file: path, token })?;
        writeln!(stdout)?;
    }
    stdout.flush()?;
    Ok(())
}
