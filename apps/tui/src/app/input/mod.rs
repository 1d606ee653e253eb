mod keys;
pub mod screens;

use crate::app::state::App;
use crossterm::event::{KeyCode, MouseButton, MouseEvent, MouseEventKind};

pub use keys::nav_key;

pub fn handle_input(app: &mut App, key: KeyCode) {
    screens::dispatch_input(app, key);
}

pub fn handle_mouse(app: &mut App, event: MouseEvent) {
    if app.search.is_some() {
        return;
    }
    if let MouseEventKind::Down(MouseButton::Left) = event.kind {
        app.click(event.column, event.row);
    }
}
