//! Tmlt CLI - TOML conformance tool.
//!
//! Reads TOML from standard input, parses it with tmlc, and writes the typed
//! JSON form used by conformance harnesses to standard output. A parse
//! failure prints `line:column: message` on stderr and exits non-zero.

mod emit;
mod error;

use std::io::Read;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use error::{Result, TmltError};

/// Tmlt - read TOML on stdin, print conformance JSON on stdout
#[derive(Parser, Debug)]
#[command(name = "tmlt")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "TOML to conformance-JSON filter", long_about = None)]
struct Cli {
    /// Emit only the subdocument at this dotted path
    ///
    /// Table segments select by key; on arrays, decimal segments index
    /// elements (e.g. `servers.0.name`).
    #[arg(short, long)]
    path: Option<String>,

    /// Pretty-print the JSON output
    #[arg(long, env = "TMLT_PRETTY")]
    pretty: bool,
}

fn run(cli: &Cli, input: &[u8]) -> Result<String> {
    let doc = tmlc_par::parse(input)?;
    tracing::debug!(bytes = input.len(), "parsed document");

    let node = match &cli.path {
        Some(path) => doc
            .get_path(path)
            .ok_or_else(|| TmltError::PathNotFound(path.clone()))?,
        None => &doc,
    };

    let json = emit::to_json(node);
    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&json)?
    } else {
        serde_json::to_string(&json)?
    };
    Ok(rendered)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut input = Vec::new();
    std::io::stdin()
        .read_to_end(&mut input)
        .map_err(TmltError::Io)?;

    match run(&cli, &input) {
        Ok(rendered) => {
            println!("{rendered}");
            Ok(())
        }
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}
