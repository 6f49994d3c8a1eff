mod app;
mod calendar;
mod clock;
mod config;
mod db;
mod error;
mod event;
mod export;
mod grid;
mod models;
mod ui;
mod validation;

use std::fs::OpenOptions;
use std::io::stdout;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use log::{LevelFilter, info};
use simplelog::WriteLogger;

use app::App;
use clock::SystemClock;
use db::Database;

/// Log to a file in the data directory; the terminal belongs to the UI
fn init_logging() -> color_eyre::Result<()> {
    let path = config::get_log_path()?;
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    WriteLogger::init(LevelFilter::Info, simplelog::Config::default(), file)?;
    Ok(())
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    init_logging()?;
    info!("Starting courtplan {}", env!("CARGO_PKG_VERSION"));

    let store = Database::open()?;
    let app = App::new(Box::new(store), Box::new(SystemClock));

    let terminal = ratatui::init();
    let result = execute!(stdout(), EnableMouseCapture)
        .map_err(Into::into)
        .and_then(|()| app.run(terminal));
    if let Err(e) = execute!(stdout(), DisableMouseCapture) {
        log::warn!("Could not release mouse capture: {}", e);
    }
    ratatui::restore();
    result
}
