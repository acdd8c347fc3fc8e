//! Docshelf CLI — local developer-library catalog builder.
//!
//! Bootstraps a working directory, pulls the library manifest, and writes a
//! typed catalog of guide/reference documents with their PDF links.

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
