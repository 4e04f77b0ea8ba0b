// src/bin/finterm.rs

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use std::path::Path;

use finterm::{
    cli::{self, Cli, Session, dispatcher::Dispatcher, queue::CommandQueue},
    config::Settings,
    constants::ROUTINE_EXTENSION,
    menus,
    models::RootContext,
};

/// The main entry point of the `finterm` application.
/// It sets up logging, parses arguments, and performs centralized error
/// handling around the menu loop.
fn main() {
    env_logger::init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("\n{}: {:#}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    log::debug!("CLI args parsed: {cli:?}");
    let settings = Settings::load();

    let queue = startup_queue(&cli.jobs)?;
    let mut session = Session::new(settings)?;

    let mut dispatcher = Dispatcher::new(&menus::root::MENU, RootContext, queue)?;
    let residue = dispatcher.run(&mut session)?;
    if !residue.is_empty() {
        log::warn!("{} queued command(s) left unexecuted at exit", residue.len());
    }

    println!("Thanks for using finterm!");
    Ok(())
}

/// Builds the root menu's seed queue from argv. A single argument naming a
/// routine file (`*.ft`) is read as one command per line; anything else is
/// treated as a slash-chained job string.
fn startup_queue(jobs: &[String]) -> Result<CommandQueue> {
    if let [path] = jobs
        && path.ends_with(ROUTINE_EXTENSION)
    {
        let source = std::fs::read_to_string(Path::new(path))
            .with_context(|| format!("cannot read routine file '{path}'"))?;
        return Ok(CommandQueue::from_lines(
            source
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#'))
                .map(str::to_string),
        ));
    }
    Ok(cli::seed_queue(jobs))
}
