//! SliceVote CLI — team pizza ordering and voting client.
//!
//! Talks to the SliceVote backend through the generic API layer: browse
//! teams and ingredients, inspect a team's vote state, and adjust admin
//! order settings.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
