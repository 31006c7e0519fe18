use super::state::{AppScreen, AppState};

/// Process the current state: loading-screen work, cool-down ticks and
/// completed background syncs.
pub fn process_state(state: &mut AppState) {
    drain_sync(state);

    match state.screen {
        AppScreen::LoadingDataset => match state.load_dataset() {
            Ok(()) => {
                state.connect_sync();
                state.screen = AppScreen::Swiping;
            }
            Err(e) => {
                state.fatal_error = Some(e);
                state.should_quit = true;
            }
        },
        AppScreen::Swiping => {
            if state.tick_session() {
                state.queue_sync();
                if state.session.is_exhausted() {
                    state.screen = AppScreen::Exhausted;
                }
            }
        }
        _ => {}
    }
}

/// Surface completed sync outcomes on the status line. Overlapping saves
/// race; whatever completes last is what the user sees.
fn drain_sync(state: &mut AppState) {
    while let Some(outcome) = state.sync.poll() {
        match outcome {
            Ok(()) => state.set_status("Progress saved to account".to_string()),
            Err(e) => state.set_error(format!("Sync failed (continuing locally): {e}")),
        }
    }
}
