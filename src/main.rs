mod app;
mod cli;
mod config;
mod event;
mod format;
mod logging;
mod store;
mod tui;
mod types;
mod ui;

use anyhow::Result;
use chrono::Local;
use clap::Parser;

use crate::store::{JsonFileStore, SnapshotStore};

fn main() -> Result<()> {
    let cli_opts = cli::Cli::parse();
    let config = config::Config::from_cli(&cli_opts);
    if let Err(err) = logging::init(&config.log_file) {
        eprintln!("warning: logging disabled: {err:#}");
    }

    let store = JsonFileStore::new(&config.data_file);
    log::info!("Using data file {}", store.path().display());
    if let Some(command) = cli_opts.command {
        return cli::run(command, &store);
    }

    let mut app = app::App::new(store.load(), config.tick_rate, Local::now());
    let mut terminal = tui::init()?;
    if let Ok(size) = terminal.size() {
        app.terminal_size = (size.width, size.height);
    }
    let result = event::run(&mut app, &mut terminal, &store);

    tui::restore()?;

    result
}
