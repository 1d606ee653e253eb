use crate::app::state::App;
use crossterm::event::KeyCode;

/// Keys for an open feature panel. Returns whether the key was consumed.
pub fn handle_panel_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Esc | KeyCode::Char('x') => {
            app.menu.close_feature();
            app.panel_fx = None;
            true
        }
        KeyCode::Char('r') => {
            app.refresh_panel();
            true
        }
        KeyCode::Char('o') => {
            let link = app.menu.active_option().and_then(|option| option.link);
            if let Some(link) = link {
                app.open_url(link);
            }
            true
        }
        KeyCode::Char(digit @ '1'..='9') => {
            let index = (digit as usize) - ('1' as usize);
            let link = app
                .menu
                .panel()
                .and_then(|view| view.links().get(index).map(|link| (*link).to_string()));
            if let Some(link) = link {
                app.open_url(&link);
            }
            true
        }
        _ => false,
    }
}
