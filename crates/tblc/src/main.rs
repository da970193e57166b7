//! tblc CLI
//!
//! Command-line tool that compiles table schema files to JSON.

use std::path::PathBuf;

use clap::Parser;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use tblc::{compile_file, compile_file_lenient, to_json};

/// Compiles table schema DSL files into a validated JSON model.
#[derive(Parser)]
#[command(name = "tblc")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Schema files to compile.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Write the JSON model to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Skip invalid table definitions instead of stopping at the first one.
    #[arg(short, long)]
    keep_going: bool,

    /// Pretty-print the JSON model.
    #[arg(short, long)]
    pretty: bool,

    /// Enable verbose output.
    #[arg(short, long, env = "TBLC_VERBOSE")]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging; stdout carries the model
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut tables = Vec::new();
    let mut rejected = 0;
    for path in &cli.inputs {
        if cli.keep_going {
            let report = compile_file_lenient(path)?;
            rejected += report.errors.len();
            tables.extend(report.tables);
        } else {
            tables.extend(compile_file(path)?);
        }
    }

    let json = to_json(&tables, cli.pretty)?;
    match &cli.output {
        Some(output) => {
            std::fs::write(output, json)?;
            info!("Wrote {} table(s) to {}", tables.len(), output.display());
        }
        None => println!("{json}"),
    }

    if rejected > 0 {
        anyhow::bail!("{rejected} table definition(s) rejected");
    }
    Ok(())
}
