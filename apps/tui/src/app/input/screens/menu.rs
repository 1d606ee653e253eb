use crate::app::input::nav_key;
use crate::app::state::App;
use crossterm::event::KeyCode;

pub fn handle_menu_input(app: &mut App, key: KeyCode) {
    let event = app.menu.handle_key(nav_key(key));
    app.apply_menu_event(event);
}
