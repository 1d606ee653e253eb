use crate::app::input::nav_key;
use crate::app::state::App;
use crossterm::event::KeyCode;
use orbit_core::SearchEvent;

pub fn handle_search_input(app: &mut App, key: KeyCode) {
    let Some(panel) = app.search.as_mut() else {
        return;
    };

    let event = match key {
        KeyCode::Char(ch) => {
            panel.push_char(ch);
            SearchEvent::Ignored
        }
        KeyCode::Backspace => {
            panel.pop_char();
            SearchEvent::Ignored
        }
        other => panel.handle_key(nav_key(other)),
    };

    if let SearchEvent::Done(outcome) = event {
        app.finish_search(outcome);
    }
}
