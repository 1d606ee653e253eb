use orbit_core::animation::ExpandAnimation;
use orbit_core::layout::{Hit, Point, RadialLayout};
use orbit_core::{
    Config, FetchTicket, MenuEvent, NavKey, RadialMenu, SearchEvent, SearchOutcome, SearchPanel,
    Selection, Theme, ThemeContext,
};
use ratzilla::event::KeyCode;
use ratzilla::ratatui::layout::Rect;

// DOM cells are about twice as tall as they are wide
pub const CELL_WIDTH_PX: f64 = 10.0;
pub const CELL_HEIGHT_PX: f64 = 20.0;

/// Work a key press asks the page to do once the shell is no longer borrowed.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Fetch(FetchTicket),
    Open(String),
}

/// Everything the page draws, shared between key handlers, the render loop
/// and in-flight fetches.
pub struct Shell {
    pub menu: RadialMenu,
    pub search: Option<SearchPanel>,
    pub theme: ThemeContext,
    pub animation: ExpandAnimation,
    pub config: Config,
    pub status: String,
    /// Grid cells the radial menu was last drawn into.
    pub menu_area: Rect,
}

impl Shell {
    pub fn new(config: Config, theme: Theme) -> Self {
        Self {
            menu: RadialMenu::new(),
            search: None,
            theme: ThemeContext::new(theme),
            animation: ExpandAnimation::new(),
            config,
            status: String::new(),
            menu_area: Rect::default(),
        }
    }

    /// The menu laid out in pixels relative to the top-left of `menu_area`.
    pub fn radial_layout(&self) -> RadialLayout {
        let center = Point::new(
            f64::from(self.menu_area.width) * CELL_WIDTH_PX / 2.0,
            f64::from(self.menu_area.height) * CELL_HEIGHT_PX / 2.0,
        );
        RadialLayout::new(center, self.menu.radius(), self.menu.options().len())
    }

    /// Resolves a left click on a grid cell.
    pub fn click(&mut self, col: u16, row: u16) -> Option<Command> {
        // The search overlay sits above the menu
        if self.search.is_some() {
            return None;
        }

        let area = self.menu_area;
        let inside_area =
            col >= area.x && row >= area.y && col < area.right() && row < area.bottom();
        let hit = if inside_area {
            let point = Point::new(
                (f64::from(col - area.x) + 0.5) * CELL_WIDTH_PX,
                (f64::from(row - area.y) + 0.5) * CELL_HEIGHT_PX,
            );
            self.radial_layout().hit(point, self.menu.is_expanded())
        } else {
            Hit::Outside
        };

        match hit {
            Hit::Trigger => {
                if self.menu.toggle_expand() {
                    self.animation.restart();
                }
                None
            }
            Hit::Node(index) => {
                let selection = self.menu.select(index)?;
                self.apply_menu_event(MenuEvent::Selected(selection))
            }
            Hit::Outside => {
                let event = self.menu.outside_click();
                self.apply_menu_event(event)
            }
            Hit::Inside => None,
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) -> Option<Command> {
        if self.search.is_some() {
            return self.handle_search_key(code);
        }

        match code {
            KeyCode::Char('t') => {
                self.theme.toggle();
                self.status = format!("Switched to {}", self.theme.theme().label());
                return None;
            }
            KeyCode::Char(' ') | KeyCode::Enter if !self.menu.is_expanded() => {
                // Falls through to the menu so the trigger expands
            }
            _ if self.menu.panel().is_some() && !self.menu.is_expanded() => {
                if let Some(command) = self.handle_panel_key(&code) {
                    return command;
                }
            }
            _ => {}
        }

        let event = self.menu.handle_key(nav_key(&code));
        self.apply_menu_event(event)
    }

    /// Applies a menu transition. A fetch selection comes back as a command.
    pub fn apply_menu_event(&mut self, event: MenuEvent) -> Option<Command> {
        match event {
            MenuEvent::Expanded => {
                self.animation.restart();
                None
            }
            MenuEvent::Selected(Selection::OpenSearch) => {
                self.search = Some(SearchPanel::new());
                None
            }
            MenuEvent::Selected(Selection::Fetch(ticket)) => Some(Command::Fetch(ticket)),
            MenuEvent::Selected(Selection::Show)
            | MenuEvent::Collapsed { .. }
            | MenuEvent::Focused(_)
            | MenuEvent::Ignored => None,
        }
    }

    /// Returns `Some` when the panel consumed the key.
    fn handle_panel_key(&mut self, code: &KeyCode) -> Option<Option<Command>> {
        match code {
            KeyCode::Esc | KeyCode::Char('x') => {
                self.menu.close_feature();
                Some(None)
            }
            KeyCode::Char('r') => Some(self.menu.refresh_active().map(Command::Fetch)),
            KeyCode::Char('o') => Some(
                self.menu
                    .active_option()
                    .and_then(|option| option.link)
                    .map(|link| Command::Open(link.to_string())),
            ),
            KeyCode::Char(digit @ '1'..='9') => {
                let index = (*digit as usize) - ('1' as usize);
                Some(self.menu.panel().and_then(|view| {
                    view.links()
                        .get(index)
                        .map(|link| Command::Open((*link).to_string()))
                }))
            }
            _ => None,
        }
    }

    fn handle_search_key(&mut self, code: KeyCode) -> Option<Command> {
        let search = self.search.as_mut()?;
        let event = match code {
            KeyCode::Char(ch) => {
                search.push_char(ch);
                SearchEvent::Ignored
            }
            KeyCode::Backspace => {
                search.pop_char();
                SearchEvent::Ignored
            }
            other => search.handle_key(nav_key(&other)),
        };

        match event {
            SearchEvent::Done(SearchOutcome::Navigate(url)) => {
                self.search = None;
                Some(Command::Open(url))
            }
            SearchEvent::Done(SearchOutcome::Dismiss) => {
                self.search = None;
                None
            }
            SearchEvent::Moved(_) | SearchEvent::Ignored => None,
        }
    }
}

const fn nav_key(code: &KeyCode) -> NavKey {
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

#[cfg(test)]
mod tests {
    use super::*;
    use orbit_core::menu::PanelView;

    fn shell() -> Shell {
        Shell::new(Config::default(), Theme::Dark)
    }

    fn focus(shell: &mut Shell, label: &str) -> usize {
        let index = shell
            .menu
            .options()
            .iter()
            .position(|option| option.label == label)
            .unwrap_or_else(|| panic!("missing option {label}"));
        while shell.menu.focused_index() != index {
            shell.handle_key(KeyCode::Right);
        }
        index
    }

    #[test]
    fn enter_expands_and_escape_collapses() {
        let mut shell = shell();
        assert_eq!(shell.handle_key(KeyCode::Enter), None);
        assert!(shell.menu.is_expanded());

        shell.handle_key(KeyCode::Esc);
        assert!(!shell.menu.is_expanded());
    }

    #[test]
    fn selecting_news_twice_fetches_once() {
        let mut shell = shell();
        shell.handle_key(KeyCode::Enter);
        focus(&mut shell, "News");

        let first = shell.handle_key(KeyCode::Enter);
        assert!(matches!(first, Some(Command::Fetch(_))));
        assert!(matches!(shell.menu.panel(), Some(PanelView::Loading)));

        shell.handle_key(KeyCode::Enter);
        focus(&mut shell, "News");
        assert_eq!(shell.handle_key(KeyCode::Enter), None);
    }

    #[test]
    fn notes_panel_opens_its_link() {
        let mut shell = shell();
        shell.handle_key(KeyCode::Enter);
        focus(&mut shell, "Notes");
        shell.handle_key(KeyCode::Enter);

        assert_eq!(
            shell.handle_key(KeyCode::Char('o')),
            Some(Command::Open("https://keep.google.com/".to_string()))
        );
        shell.handle_key(KeyCode::Char('x'));
        assert!(shell.menu.panel().is_none());
    }

    #[test]
    fn search_typing_and_enter_navigates() {
        let mut shell = shell();
        shell.handle_key(KeyCode::Enter);
        focus(&mut shell, "Search");
        shell.handle_key(KeyCode::Enter);
        assert!(shell.search.is_some());

        for ch in "git".chars() {
            shell.handle_key(KeyCode::Char(ch));
        }
        // "t" is typed into the query rather than toggling the theme
        assert_eq!(shell.theme.theme(), Theme::Dark);

        let command = shell.handle_key(KeyCode::Enter);
        assert_eq!(
            command,
            Some(Command::Open("https://github.com/search?q=git".to_string()))
        );
        assert!(shell.search.is_none());
    }

    fn menu_shell() -> Shell {
        let mut shell = shell();
        // 600 x 600 px, so the menu centre sits on cell (30, 15)
        shell.menu_area = Rect::new(0, 0, 60, 30);
        shell
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn cell_of(shell: &Shell, index: usize) -> (u16, u16) {
        let point = shell.radial_layout().node_center(index);
        (
            (point.x / CELL_WIDTH_PX) as u16 + shell.menu_area.x,
            (point.y / CELL_HEIGHT_PX) as u16 + shell.menu_area.y,
        )
    }

    #[test]
    fn clicking_the_trigger_toggles_the_menu() {
        let mut shell = menu_shell();
        assert_eq!(shell.click(30, 15), None);
        assert!(shell.menu.is_expanded());
        assert_eq!(shell.click(30, 15), None);
        assert!(!shell.menu.is_expanded());
    }

    #[test]
    fn clicking_a_node_selects_it() {
        let mut shell = menu_shell();
        shell.click(30, 15);
        let news = shell
            .menu
            .options()
            .iter()
            .position(|option| option.label == "News")
            .unwrap_or_else(|| panic!("missing News"));
        let (col, row) = cell_of(&shell, news);

        let command = shell.click(col, row);
        assert!(matches!(command, Some(Command::Fetch(_))));
        assert!(!shell.menu.is_expanded());
        assert_eq!(shell.menu.active_option().map(|o| o.label), Some("News"));
    }

    #[test]
    fn clicking_outside_collapses_the_menu() {
        let mut shell = menu_shell();
        shell.click(30, 15);
        assert_eq!(shell.click(0, 0), None);
        assert!(!shell.menu.is_expanded());

        // A click past the drawn area is outside too
        shell.click(30, 15);
        shell.click(200, 100);
        assert!(!shell.menu.is_expanded());
    }

    #[test]
    fn clicks_are_ignored_while_searching() {
        let mut shell = menu_shell();
        shell.search = Some(SearchPanel::new());
        assert_eq!(shell.click(30, 15), None);
        assert!(!shell.menu.is_expanded());
    }

    #[test]
    fn theme_key_toggles_outside_search() {
        let mut shell = shell();
        shell.handle_key(KeyCode::Char('t'));
        assert!(shell.theme.is_light());
        assert_eq!(shell.status, "Switched to light mode");
    }
}
