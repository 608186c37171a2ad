/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/2/26
******************************************************************************/

use anyhow::Context;
use clap::{Parser, ValueEnum};
use fulfillment_rs::logger::init_tracing;
use fulfillment_rs::{SimulationConfig, run_file};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// `<EventKind> <HHMM> <payload>` lines
    Text,
    /// One JSON object per event
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "fulfillment", version, about = "Warehouse order-fulfillment simulator")]
struct Cli {
    /// File with one command per line
    input: PathBuf,

    /// JSON file overriding the default roster, window, capacity or travel time
    #[arg(long)]
    config: Option<PathBuf>,

    /// How events are printed on stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Emit logs on stderr as JSON
    #[arg(long)]
    log_json: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let config = match &cli.config {
        Some(path) => SimulationConfig::from_file(path)?,
        None => SimulationConfig::default(),
    };

    let report = run_file(&cli.input, config)?;

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for event in &report.events {
        match cli.format {
            OutputFormat::Text => writeln!(out, "{event}")?,
            OutputFormat::Json => {
                let line = serde_json::to_string(event).context("serializing event")?;
                writeln!(out, "{line}")?;
            }
        }
    }
    out.flush()?;

    Ok(())
}
