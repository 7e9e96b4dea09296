//! things2md CLI - Things3 JSON export to Markdown vault converter

use anyhow::Result;
use clap::Parser;
use std::io::Write;
use things2md::cli::Cli;
use things2md::cli::display::{display_summary, error, success};
use things2md::export::export;
use things2md::vault::{Registry, Vault};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .init();

    let cli = Cli::parse();

    let result = run(cli);

    if let Err(e) = &result {
        error(&e.to_string());
        std::process::exit(1);
    }

    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let registry = Registry::load(&cli.input, cli.all)?;
    log::info!(
        "Loaded {} items across {} lists",
        registry.len(),
        registry.lists().len()
    );

    let vault = Vault::resolve(registry)?;
    let stats = export(&vault, &cli.output)?;

    display_summary(&stats);
    success("All done.");

    Ok(())
}
