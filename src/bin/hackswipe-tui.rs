//! HackSwipe TUI Application
//!
//! A terminal user interface for swiping through hackathon projects.

use std::sync::Arc;
use std::time::Duration;

use crossterm::event;
use tracing_subscriber::EnvFilter;

use hackswipe::tui::{
    handle_event, process_state, render, restore_terminal, setup_terminal, AppState,
};
use hackswipe::AppConfig;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env();
    init_logging(&config)?;

    let mut terminal = setup_terminal()?;
    let mut state = AppState::new(config);

    loop {
        terminal.draw(|f| render(f, &state))?;

        process_state(&mut state);

        if state.should_quit {
            break;
        }

        if event::poll(Duration::from_millis(100))? {
            let event = event::read()?;
            handle_event(event, &mut state);
        }
    }

    restore_terminal(&mut terminal)?;

    if let Some(fatal) = state.fatal_error {
        return Err(fatal.into());
    }
    Ok(())
}

/// Log to the configured file, if any. Raw-mode terminals and stderr logs do
/// not mix, so logging stays off without an explicit target.
fn init_logging(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let Some(path) = &config.log_path else {
        return Ok(());
    };
    let file = std::fs::File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
