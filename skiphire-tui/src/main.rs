//! Terminal UI for skiphire that lists skip offerings and lets users pick and book one.

mod app;
mod input;
#[cfg(test)]
mod testing;
mod ui;

use std::{env, fs::File, io, sync::Mutex, time::Duration as StdDuration};

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as CEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use skiphire_core::{model::LocationQuery, service::SkipSelectionService};
use skiphire_provider_wewantwaste as wewantwaste;
use tracing_subscriber::EnvFilter;

use crate::app::App;
use crate::input::Action;

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;

    // HTTP + service setup
    let client = wewantwaste::http_client(
        concat!("skiphire/", env!("CARGO_PKG_VERSION")),
        wewantwaste::REQUEST_TIMEOUT,
    )?;

    let api_url = env_value("SKIPHIRE_API_URL");
    let catalog = wewantwaste::catalog(client, api_url.as_deref());
    let service = SkipSelectionService::new(catalog, location_from_env());

    // App state
    let app = App::new(service);

    // Terminal init
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run event loop
    let res = run(&mut terminal, app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

async fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, mut app: App) -> Result<()> {
    // Single load on start; show the loading state while it is in flight.
    // The client timeout bounds the wait, after which the load reads as failed.
    terminal.draw(|frame| ui::draw(frame, &app))?;
    app.service.load().await;

    loop {
        terminal.draw(|frame| ui::draw(frame, &app))?;

        // Poll for input (non-blocking, small timeout to keep CPU low)
        if event::poll(StdDuration::from_millis(100))?
            && let CEvent::Key(key) = event::read()?
        {
            if input::handle_key_event(key, &mut app) == Action::Quit {
                break;
            }
            app.sync_events();
        }
    }

    Ok(())
}

/// Log to `SKIPHIRE_LOG_FILE` when set; the terminal belongs to the UI.
fn init_logging() -> Result<()> {
    let Some(path) = env_value("SKIPHIRE_LOG_FILE") else {
        return Ok(());
    };

    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    tracing::info!("skiphire v{}", env!("CARGO_PKG_VERSION"));
    Ok(())
}

fn location_from_env() -> LocationQuery {
    let defaults = LocationQuery::default();
    LocationQuery::new(
        env_value("SKIPHIRE_POSTCODE").unwrap_or(defaults.postcode),
        env_value("SKIPHIRE_AREA").unwrap_or(defaults.area),
    )
}

fn env_value(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}
