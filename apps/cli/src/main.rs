//! mdpress CLI — converts a restricted-Markdown file into a standalone
//! HTML page with an embedded stylesheet.

mod commands;
mod template;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
