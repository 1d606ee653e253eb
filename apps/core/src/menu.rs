//! The radial "button of all": a trigger that fans out into feature options.

use crate::cache::{Begin, FeatureCache, FetchState, FetchTicket};
use crate::error::FetchError;
use crate::feature::{ContentLine, FeatureContent, LineStyle, LOADING_MESSAGE};
use crate::layout::{radius_for_width, WIDE_RADIUS};
use crate::nav::{wrap_decrement, wrap_increment, NavKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub struct OptionId(u8);

impl OptionId {
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    pub const fn get(self) -> u8 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RemoteFeature {
    Weather,
    News,
}

impl RemoteFeature {
    pub const fn provider(self) -> &'static str {
        match self {
            Self::Weather => "weather",
            Self::News => "news",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureSource {
    Static(&'static str),
    Remote(RemoteFeature),
    Search,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuOption {
    pub id: OptionId,
    pub label: &'static str,
    pub source: FeatureSource,
    /// External page the panel can open, if any.
    pub link: Option<&'static str>,
}

pub const OPTIONS: [MenuOption; 5] = [
    MenuOption {
        id: OptionId(1),
        label: "News",
        source: FeatureSource::Remote(RemoteFeature::News),
        link: None,
    },
    MenuOption {
        id: OptionId(2),
        label: "Weather",
        source: FeatureSource::Remote(RemoteFeature::Weather),
        link: None,
    },
    MenuOption {
        id: OptionId(3),
        label: "Calendar",
        source: FeatureSource::Static("📅 No upcoming events today."),
        link: None,
    },
    MenuOption {
        id: OptionId(4),
        label: "Search",
        source: FeatureSource::Search,
        link: None,
    },
    MenuOption {
        id: OptionId(5),
        label: "Notes",
        source: FeatureSource::Static("📝 Keep your quick notes in Google Keep."),
        link: Some("https://keep.google.com/"),
    },
];

/// What the caller has to do after an option was chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    OpenSearch,
    /// Run the fetch described by the ticket, then call [`RadialMenu::complete`].
    Fetch(FetchTicket),
    Show,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEvent {
    Ignored,
    Expanded,
    /// The menu closed; focus goes back to the trigger when `restore_focus`.
    Collapsed { restore_focus: bool },
    Focused(usize),
    Selected(Selection),
}

/// Content of the feature panel for the active option.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanelView<'a> {
    Static(&'static str),
    Loading,
    Loaded(&'a FeatureContent),
    Failed(&'a FetchError),
}

impl PanelView<'_> {
    pub fn lines(&self) -> Vec<ContentLine> {
        match self {
            Self::Static(text) => FeatureContent::text(*text).lines(),
            Self::Loading => vec![ContentLine::new(LineStyle::Muted, LOADING_MESSAGE)],
            Self::Loaded(content) => content.lines(),
            Self::Failed(error) => vec![ContentLine::new(LineStyle::Error, error.placeholder())],
        }
    }

    pub fn links(&self) -> Vec<&str> {
        match self {
            Self::Loaded(content) => content.links(),
            _ => Vec::new(),
        }
    }
}

#[derive(Debug)]
pub struct RadialMenu {
    options: &'static [MenuOption],
    expanded: bool,
    focused_index: usize,
    active: Option<OptionId>,
    radius: u16,
    cache: FeatureCache,
}

impl Default for RadialMenu {
    fn default() -> Self {
        Self::new()
    }
}

impl RadialMenu {
    pub fn new() -> Self {
        Self::with_options(&OPTIONS)
    }

    pub fn with_options(options: &'static [MenuOption]) -> Self {
        Self {
            options,
            expanded: false,
            focused_index: 0,
            active: None,
            radius: WIDE_RADIUS,
            cache: FeatureCache::new(),
        }
    }

    pub const fn options(&self) -> &'static [MenuOption] {
        self.options
    }

    pub const fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub const fn focused_index(&self) -> usize {
        self.focused_index
    }

    pub const fn radius(&self) -> u16 {
        self.radius
    }

    pub fn active_option(&self) -> Option<&MenuOption> {
        let active = self.active?;
        self.options.iter().find(|option| option.id == active)
    }

    pub fn toggle_expand(&mut self) -> bool {
        self.expanded = !self.expanded;
        self.expanded
    }

    pub fn collapse(&mut self) {
        self.expanded = false;
    }

    /// Recomputes the radius for a new viewport width. Returns whether it changed.
    pub fn resize(&mut self, viewport_width_px: f64) -> bool {
        let radius = radius_for_width(viewport_width_px);
        let changed = radius != self.radius;
        self.radius = radius;
        changed
    }

    pub fn select(&mut self, index: usize) -> Option<Selection> {
        let option = *self.options.get(index)?;
        self.collapse();

        let selection = match option.source {
            FeatureSource::Search => Selection::OpenSearch,
            FeatureSource::Static(_) => {
                self.active = Some(option.id);
                Selection::Show
            }
            FeatureSource::Remote(feature) => {
                self.active = Some(option.id);
                match self.cache.begin(option.id, feature) {
                    Begin::Start(ticket) => {
                        tracing::debug!(option = option.label, "starting feature fetch");
                        Selection::Fetch(ticket)
                    }
                    Begin::Cached | Begin::InFlight => Selection::Show,
                }
            }
        };
        Some(selection)
    }

    pub fn close_feature(&mut self) {
        self.active = None;
    }

    pub fn complete(
        &mut self,
        ticket: &FetchTicket,
        result: Result<FeatureContent, FetchError>,
    ) -> bool {
        self.cache.complete(ticket, result)
    }

    /// Drops cached content for the active remote feature and starts over.
    pub fn refresh_active(&mut self) -> Option<FetchTicket> {
        let option = *self.active_option()?;
        let FeatureSource::Remote(feature) = option.source else {
            return None;
        };
        self.cache.invalidate(option.id);
        match self.cache.begin(option.id, feature) {
            Begin::Start(ticket) => Some(ticket),
            Begin::Cached | Begin::InFlight => None,
        }
    }

    pub fn panel(&self) -> Option<PanelView<'_>> {
        let option = self.active_option()?;
        let view = match option.source {
            FeatureSource::Static(text) => PanelView::Static(text),
            FeatureSource::Search => return None,
            FeatureSource::Remote(_) => match self.cache.state(option.id) {
                Some(FetchState::Loaded(content)) => PanelView::Loaded(content),
                Some(FetchState::Failed(error)) => PanelView::Failed(error),
                Some(FetchState::Loading) | None => PanelView::Loading,
            },
        };
        Some(view)
    }

    /// A pointer press that landed outside the control.
    pub fn outside_click(&mut self) -> MenuEvent {
        if self.expanded {
            self.expanded = false;
            MenuEvent::Collapsed {
                restore_focus: true,
            }
        } else {
            MenuEvent::Ignored
        }
    }

    pub fn handle_key(&mut self, key: NavKey) -> MenuEvent {
        if !self.expanded {
            return match key {
                NavKey::Enter | NavKey::Space => {
                    self.expanded = true;
                    MenuEvent::Expanded
                }
                _ => MenuEvent::Ignored,
            };
        }

        let count = self.options.len();
        match key {
            NavKey::Escape => {
                self.expanded = false;
                MenuEvent::Collapsed {
                    restore_focus: true,
                }
            }
            NavKey::Right | NavKey::Down => {
                self.focused_index = wrap_increment(self.focused_index, count);
                MenuEvent::Focused(self.focused_index)
            }
            NavKey::Left | NavKey::Up => {
                self.focused_index = wrap_decrement(self.focused_index, count);
                MenuEvent::Focused(self.focused_index)
            }
            NavKey::Enter => self
                .select(self.focused_index)
                .map_or(MenuEvent::Ignored, MenuEvent::Selected),
            NavKey::Space | NavKey::Other => MenuEvent::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_of(menu: &RadialMenu, label: &str) -> usize {
        menu.options()
            .iter()
            .position(|option| option.label == label)
            .unwrap_or(usize::MAX)
    }

    fn expanded_menu() -> RadialMenu {
        let mut menu = RadialMenu::new();
        menu.toggle_expand();
        menu
    }

    #[test]
    fn option_ids_are_unique_and_ordered() {
        let ids: Vec<u8> = OPTIONS.iter().map(|option| option.id.get()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn toggle_flips_expanded() {
        let mut menu = RadialMenu::new();
        assert!(menu.toggle_expand());
        assert!(!menu.toggle_expand());
    }

    #[test]
    fn enter_or_space_opens_collapsed_menu() {
        let mut menu = RadialMenu::new();
        assert_eq!(menu.handle_key(NavKey::Space), MenuEvent::Expanded);
        menu.handle_key(NavKey::Escape);
        assert_eq!(menu.handle_key(NavKey::Enter), MenuEvent::Expanded);
        assert!(menu.is_expanded());
    }

    #[test]
    fn arrows_are_ignored_while_collapsed() {
        let mut menu = RadialMenu::new();
        assert_eq!(menu.handle_key(NavKey::Right), MenuEvent::Ignored);
        assert_eq!(menu.focused_index(), 0);
    }

    #[test]
    fn focus_navigation_is_circular() {
        let mut menu = expanded_menu();
        let count = menu.options().len();
        for _ in 0..count {
            menu.handle_key(NavKey::Down);
        }
        assert_eq!(menu.focused_index(), 0);

        assert_eq!(menu.handle_key(NavKey::Left), MenuEvent::Focused(count - 1));
        assert_eq!(menu.handle_key(NavKey::Right), MenuEvent::Focused(0));
        assert_eq!(menu.handle_key(NavKey::Up), MenuEvent::Focused(count - 1));
    }

    #[test]
    fn escape_collapses_and_restores_focus() {
        let mut menu = expanded_menu();
        assert_eq!(
            menu.handle_key(NavKey::Escape),
            MenuEvent::Collapsed {
                restore_focus: true
            }
        );
        assert!(!menu.is_expanded());
    }

    #[test]
    fn outside_click_collapses_and_returns_focus_to_trigger() {
        let mut menu = RadialMenu::new();
        assert_eq!(menu.outside_click(), MenuEvent::Ignored);
        menu.toggle_expand();
        assert_eq!(
            menu.outside_click(),
            MenuEvent::Collapsed {
                restore_focus: true
            }
        );
        assert!(!menu.is_expanded());
    }

    #[test]
    fn selecting_search_never_sets_active_feature() {
        let mut menu = expanded_menu();
        let search = index_of(&menu, "Search");
        assert_eq!(menu.select(search), Some(Selection::OpenSearch));
        assert!(menu.active_option().is_none());
        assert!(menu.panel().is_none());
    }

    #[test]
    fn static_options_show_directly_and_collapse() {
        let mut menu = expanded_menu();
        let calendar = index_of(&menu, "Calendar");
        assert_eq!(menu.select(calendar), Some(Selection::Show));
        assert!(!menu.is_expanded());
        assert_eq!(
            menu.panel(),
            Some(PanelView::Static("📅 No upcoming events today."))
        );
    }

    #[test]
    fn remote_option_shows_loading_then_content() {
        let mut menu = expanded_menu();
        let news = index_of(&menu, "News");
        let Some(Selection::Fetch(ticket)) = menu.select(news) else {
            panic!("expected a fetch");
        };
        assert!(!menu.is_expanded());
        assert_eq!(menu.panel(), Some(PanelView::Loading));

        assert!(menu.complete(&ticket, Ok(FeatureContent::NoNews)));
        assert_eq!(menu.panel(), Some(PanelView::Loaded(&FeatureContent::NoNews)));
    }

    #[test]
    fn remote_failure_shows_error_placeholder() {
        let mut menu = expanded_menu();
        let weather = index_of(&menu, "Weather");
        let Some(Selection::Fetch(ticket)) = menu.select(weather) else {
            panic!("expected a fetch");
        };
        menu.complete(&ticket, Err(FetchError::LocationDenied));

        let lines = menu.panel().map(|view| view.lines()).unwrap_or_default();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].style, LineStyle::Error);
        assert!(lines[0].text.starts_with("Location access denied"));

        menu.close_feature();
        assert!(menu.panel().is_none());
    }

    #[test]
    fn reselecting_loaded_option_does_not_refetch() {
        let mut menu = RadialMenu::new();
        let news = index_of(&menu, "News");
        let Some(Selection::Fetch(ticket)) = menu.select(news) else {
            panic!("expected a fetch");
        };
        menu.complete(&ticket, Ok(FeatureContent::NoNews));
        menu.close_feature();
        assert_eq!(menu.select(news), Some(Selection::Show));
    }

    #[test]
    fn reselecting_during_fetch_is_deduplicated() {
        let mut menu = RadialMenu::new();
        let news = index_of(&menu, "News");
        assert!(matches!(menu.select(news), Some(Selection::Fetch(_))));
        assert_eq!(menu.select(news), Some(Selection::Show));
        assert_eq!(menu.panel(), Some(PanelView::Loading));
    }

    #[test]
    fn refresh_discards_the_older_request() {
        let mut menu = RadialMenu::new();
        let news = index_of(&menu, "News");
        let Some(Selection::Fetch(first)) = menu.select(news) else {
            panic!("expected a fetch");
        };
        let Some(second) = menu.refresh_active() else {
            panic!("expected a refresh ticket");
        };
        assert!(!menu.complete(&first, Ok(FeatureContent::NoNews)));
        assert_eq!(menu.panel(), Some(PanelView::Loading));
        assert!(menu.complete(&second, Ok(FeatureContent::NoNews)));
    }

    #[test]
    fn refresh_is_a_no_op_for_static_options() {
        let mut menu = RadialMenu::new();
        menu.select(index_of(&menu, "Notes"));
        assert!(menu.refresh_active().is_none());
    }

    #[test]
    fn enter_activates_focused_option() {
        let mut menu = expanded_menu();
        let search = index_of(&menu, "Search");
        while menu.focused_index() != search {
            menu.handle_key(NavKey::Right);
        }
        assert_eq!(
            menu.handle_key(NavKey::Enter),
            MenuEvent::Selected(Selection::OpenSearch)
        );
    }

    #[test]
    fn resize_tracks_breakpoints() {
        let mut menu = RadialMenu::new();
        assert!(menu.resize(500.0));
        assert_eq!(menu.radius(), 100);
        assert!(menu.resize(700.0));
        assert_eq!(menu.radius(), 130);
        assert!(!menu.resize(800.0));
        menu.resize(1200.0);
        assert_eq!(menu.radius(), 150);
    }
}
