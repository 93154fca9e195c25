// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Command-line entry point: solve one preference file and print the run.

use anyhow::{Context, Result};
use clap::Parser;
use stable_roommates::phases::RotationMode;
use stable_roommates::report::{self, Format};
use stable_roommates::strategy::SelectionOrder;
use stable_roommates::{input, solve, EngineConfig};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "roommates")]
#[command(about = "Find a stable roommates matching with Irving's algorithm", long_about = None)]
struct Cli {
    /// Preference file: one `<id>\t<pref> <pref> ...` line per participant, ids from 1
    input: PathBuf,

    /// Order in which free participants and multi-entry lists are picked
    #[arg(long, value_enum, default_value_t = SelectionOrder::Ascending)]
    order: SelectionOrder,

    /// Which part of a traversed chain is eliminated as a rotation
    #[arg(long, value_enum, default_value_t = RotationMode::Cycle)]
    rotation: RotationMode,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Print only the result, not the proposals and rotations
    #[arg(long, short, default_value_t = false)]
    quiet: bool,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let table = input::load_table(&cli.input)
        .with_context(|| format!("failed to load {}", cli.input.display()))?;
    let config = EngineConfig::default()
        .with_selection(cli.order)
        .with_rotation_mode(cli.rotation);

    let run = solve(table, config).context("matching engine failed")?;

    let output = match cli.format {
        Format::Text => report::render_text(&run.context.trace, &run.outcome, cli.quiet),
        Format::Json => report::render_json(
            &run.outcome,
            &run.states,
            &run.context.statistics,
            &config,
        )? + "\n",
    };
    print!("{output}");
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .init();
}
