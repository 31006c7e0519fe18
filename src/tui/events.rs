use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use super::state::{AppScreen, AppState};
use crate::models::SwipeAction;

/// Net drag displacement (terminal rows) beyond which a vertical swipe
/// registers.
const DRAG_ROWS: i32 = 3;

/// Net drag displacement (columns) for the horizontal fallback. Cells are
/// roughly twice as tall as wide, hence the larger threshold.
const DRAG_COLS: i32 = 8;

/// Main event handler that dispatches to the appropriate screen handler.
pub fn handle_event(event: Event, state: &mut AppState) {
    match event {
        Event::Key(key_event) => handle_key(key_event, state),
        Event::Mouse(mouse_event) => handle_mouse(mouse_event, state),
        _ => {}
    }
}

fn handle_key(event: KeyEvent, state: &mut AppState) {
    if event.code == KeyCode::Char('q') && event.modifiers == KeyModifiers::NONE {
        state.should_quit = true;
        return;
    }

    match state.screen {
        AppScreen::Swiping => handle_swiping(event, state),
        AppScreen::LikedGallery => handle_gallery(event, state),
        AppScreen::Exhausted => handle_exhausted(event, state),
        AppScreen::LoadingDataset => {}
    }
}

fn handle_swiping(event: KeyEvent, state: &mut AppState) {
    match event.code {
        KeyCode::Up | KeyCode::Right => {
            state.swipe(SwipeAction::Like);
        }
        KeyCode::Down | KeyCode::Left => {
            state.swipe(SwipeAction::Pass);
        }
        KeyCode::Char('g') => {
            state.gallery_selected = 0;
            state.screen = AppScreen::LikedGallery;
        }
        KeyCode::Char('s') => {
            if state.identity.is_some() {
                state.queue_sync();
                state.set_status("Saving to account...".to_string());
            } else if let Some(client) = state.client.as_ref() {
                let url = client.auth().authorize_url("google", "http://localhost:5173");
                state.set_status(format!(
                    "Sign in via {url}, then restart with HACKSWIPE_ACCESS_TOKEN set"
                ));
            } else {
                state.set_status("Sync is not configured".to_string());
            }
        }
        KeyCode::Char('o') => {
            state.sign_out();
        }
        KeyCode::Esc => {
            state.should_quit = true;
        }
        _ => {}
    }
}

fn handle_gallery(event: KeyEvent, state: &mut AppState) {
    match event.code {
        KeyCode::Up => {
            if state.gallery_selected > 0 {
                state.gallery_selected -= 1;
            }
        }
        KeyCode::Down => {
            if state.gallery_selected < state.session.liked().len().saturating_sub(1) {
                state.gallery_selected += 1;
            }
        }
        KeyCode::Esc | KeyCode::Char('g') => {
            state.screen = state.gallery_return_screen();
        }
        _ => {}
    }
}

fn handle_exhausted(event: KeyEvent, state: &mut AppState) {
    match event.code {
        KeyCode::Char('g') => {
            state.gallery_selected = 0;
            state.screen = AppScreen::LikedGallery;
        }
        KeyCode::Char('r') => {
            state.restart();
        }
        _ => {}
    }
}

/// Track card drags. Only the swiping screen accepts them; a release maps to
/// a gesture when the net displacement crosses a threshold.
fn handle_mouse(event: MouseEvent, state: &mut AppState) {
    if state.screen != AppScreen::Swiping {
        return;
    }

    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            state.drag_origin = Some((event.column, event.row));
            state.drag_last = state.drag_origin;
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            if state.drag_origin.is_some() {
                state.drag_last = Some((event.column, event.row));
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            if let (Some(origin), Some(last)) = (state.drag_origin.take(), state.drag_last.take())
            {
                if let Some(direction) = resolve_drag(origin, last) {
                    state.swipe(direction);
                }
            }
        }
        _ => {}
    }
}

/// Map a completed drag to a gesture. The vertical axis is primary (up =
/// like, down = pass); the horizontal axis is consulted only when neither
/// vertical threshold was crossed (right = like, left = pass).
fn resolve_drag(origin: (u16, u16), last: (u16, u16)) -> Option<SwipeAction> {
    let dx = last.0 as i32 - origin.0 as i32;
    let dy = last.1 as i32 - origin.1 as i32;

    if dy <= -DRAG_ROWS {
        return Some(SwipeAction::Like);
    }
    if dy >= DRAG_ROWS {
        return Some(SwipeAction::Pass);
    }
    if dx >= DRAG_COLS {
        return Some(SwipeAction::Like);
    }
    if dx <= -DRAG_COLS {
        return Some(SwipeAction::Pass);
    }
    None
}
