use crate::app::state::App;
use crossterm::event::KeyCode;

mod menu;
mod panel;
mod search;

pub fn dispatch_input(app: &mut App, key: KeyCode) {
    if app.search.is_some() {
        search::handle_search_input(app, key);
        return;
    }

    match key {
        KeyCode::Char('q') => {
            app.quit();
            return;
        }
        KeyCode::Char('t') => {
            app.toggle_theme();
            return;
        }
        _ => {}
    }

    if !app.menu.is_expanded() && app.menu.panel().is_some() && panel::handle_panel_input(app, key)
    {
        return;
    }

    menu::handle_menu_input(app, key);
}
