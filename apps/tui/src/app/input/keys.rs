use crossterm::event::KeyCode;
use orbit_core::NavKey;

pub const fn nav_key(code: KeyCode) -> NavKey {
    match code {
        KeyCode::Left => NavKey::Left,
        KeyCode::Right => NavKey::Right,
        KeyCode::Up => NavKey::Up,
        KeyCode::Down => NavKey::Down,
        KeyCode::Enter => NavKey::Enter,
        KeyCode::Char(' ') => NavKey::Space,
        KeyCode::Esc => NavKey::Escape,
        _ => NavKey::Other,
    }
}
