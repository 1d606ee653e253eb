use crate::fetch::{FetchOutcome, Fetcher};
use color_eyre::Result;
use orbit_core::animation::ExpandAnimation;
use orbit_core::layout::{Hit, Point, RadialLayout};
use orbit_core::{
    Config, FetchTicket, MenuEvent, RadialMenu, SearchOutcome, SearchPanel, Selection, Theme,
    ThemeContext,
};
use ratatui::layout::Rect;
use std::time::{Duration, Instant};
use tachyonfx::{fx, Effect, Interpolation};
use throbber_widgets_tui::ThrobberState;
use tokio::sync::mpsc::error::TryRecvError;
use tokio::sync::mpsc::UnboundedReceiver;

/// Terminal cells are roughly twice as tall as they are wide.
pub const CELL_ASPECT: u16 = 2;
const PANEL_FADE_MS: u32 = 400;

pub struct App {
    pub running: bool,
    pub theme: ThemeContext,
    pub menu: RadialMenu,
    pub search: Option<SearchPanel>,
    pub animation: ExpandAnimation,
    pub status_message: String,
    pub cell_width_px: u16,
    /// Where the radial menu was last drawn, for mouse hit-testing.
    pub menu_area: Rect,
    pub throbber_state: ThrobberState,
    pub panel_fx: Option<Effect>,
    pub last_tick: Duration,
    started: Instant,
    last_frame: Instant,
    fetcher: Fetcher,
    results: UnboundedReceiver<FetchOutcome>,
}

impl App {
    pub fn new(config: Config, theme: Theme, cell_width_px: u16) -> Result<Self> {
        let (fetcher, results) = Fetcher::new(config)?;
        let now = Instant::now();

        Ok(Self {
            running: true,
            theme: ThemeContext::new(theme),
            menu: RadialMenu::new(),
            search: None,
            animation: ExpandAnimation::new(),
            status_message: String::new(),
            cell_width_px: cell_width_px.max(1),
            menu_area: Rect::default(),
            throbber_state: ThrobberState::default(),
            panel_fx: None,
            last_tick: Duration::ZERO,
            started: now,
            last_frame: now,
            fetcher,
            results,
        })
    }

    pub const fn cell_height_px(&self) -> u16 {
        self.cell_width_px * CELL_ASPECT
    }

    /// Advances animations and applies any finished fetches. Called once per frame.
    pub fn update(&mut self) {
        let now = Instant::now();
        self.last_tick = now.duration_since(self.last_frame);
        self.last_frame = now;

        if self.menu.is_expanded() && !self.animation.is_settled(self.menu.options().len()) {
            self.animation
                .tick(now.duration_since(self.started).as_secs_f64());
        }
        if self.fetcher.in_flight() > 0 {
            self.throbber_state.calc_next();
        }

        loop {
            match self.results.try_recv() {
                Ok(outcome) => self.apply_outcome(outcome),
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }
    }

    /// Waits for the next fetch to finish. Used by headless mode and tests.
    pub async fn next_outcome(&mut self) -> bool {
        match self.results.recv().await {
            Some(outcome) => {
                self.apply_outcome(outcome);
                true
            }
            None => false,
        }
    }

    fn apply_outcome(&mut self, outcome: FetchOutcome) {
        let FetchOutcome { ticket, result } = outcome;
        let failed = result.is_err();
        if !self.menu.complete(&ticket, result) {
            return;
        }

        let showing = self
            .menu
            .active_option()
            .is_some_and(|option| option.id == ticket.option);
        if showing {
            self.start_panel_fx();
            if failed {
                self.status_message = format!("Could not load {}", ticket.feature.provider());
            }
        }
    }

    pub fn resize(&mut self, columns: u16) {
        let width_px = f64::from(columns) * f64::from(self.cell_width_px);
        if self.menu.resize(width_px) {
            tracing::debug!(radius = self.menu.radius(), "menu radius changed");
        }
    }

    pub fn apply_menu_event(&mut self, event: MenuEvent) {
        match event {
            MenuEvent::Expanded => self.animation.restart(),
            MenuEvent::Collapsed { restore_focus } => {
                if restore_focus {
                    self.status_message = "Menu closed".to_string();
                }
            }
            MenuEvent::Selected(selection) => self.apply_selection(selection),
            MenuEvent::Focused(_) | MenuEvent::Ignored => {}
        }
    }

    pub fn apply_selection(&mut self, selection: Selection) {
        match selection {
            Selection::OpenSearch => {
                self.search = Some(SearchPanel::new());
            }
            Selection::Fetch(ticket) => {
                self.spawn_fetch(ticket);
                self.start_panel_fx();
            }
            Selection::Show => self.start_panel_fx(),
        }
    }

    pub fn spawn_fetch(&mut self, ticket: FetchTicket) {
        self.fetcher.spawn(ticket);
    }

    pub fn refresh_panel(&mut self) {
        if let Some(ticket) = self.menu.refresh_active() {
            self.status_message = format!("Refreshing {}", ticket.feature.provider());
            self.spawn_fetch(ticket);
        }
    }

    pub fn toggle_menu(&mut self) {
        if self.menu.toggle_expand() {
            self.animation.restart();
        }
    }

    pub fn toggle_theme(&mut self) {
        self.theme.toggle();
        self.status_message = format!("Switched to {}", self.theme.theme().label());
    }

    pub fn finish_search(&mut self, outcome: SearchOutcome) {
        self.search = None;
        if let SearchOutcome::Navigate(url) = outcome {
            self.open_url(&url);
        }
    }

    pub fn open_url(&mut self, url: &str) {
        match webbrowser::open(url) {
            Ok(()) => {
                tracing::info!(%url, "opened in browser");
                self.status_message = format!("Opened {url}");
            }
            Err(error) => {
                tracing::warn!(%url, %error, "failed to open browser");
                self.status_message = format!("Could not open {url}: {error}");
            }
        }
    }

    pub fn radial_layout(&self) -> RadialLayout {
        let center = Point::new(
            f64::from(self.menu_area.width) * f64::from(self.cell_width_px) / 2.0,
            f64::from(self.menu_area.height) * f64::from(self.cell_height_px()) / 2.0,
        );
        RadialLayout::new(center, self.menu.radius(), self.menu.options().len())
    }

    /// Resolves a left click at a terminal cell.
    pub fn click(&mut self, column: u16, row: u16) {
        let inside_area = column >= self.menu_area.x
            && row >= self.menu_area.y
            && column < self.menu_area.right()
            && row < self.menu_area.bottom();

        let hit = if inside_area {
            let point = Point::new(
                (f64::from(column - self.menu_area.x) + 0.5) * f64::from(self.cell_width_px),
                (f64::from(row - self.menu_area.y) + 0.5) * f64::from(self.cell_height_px()),
            );
            self.radial_layout().hit(point, self.menu.is_expanded())
        } else {
            Hit::Outside
        };

        match hit {
            Hit::Trigger => self.toggle_menu(),
            Hit::Node(index) => {
                if let Some(selection) = self.menu.select(index) {
                    self.apply_selection(selection);
                }
            }
            Hit::Outside => {
                let event = self.menu.outside_click();
                self.apply_menu_event(event);
            }
            Hit::Inside => {}
        }
    }

    fn start_panel_fx(&mut self) {
        let background = crate::ui::palette::color(self.theme.palette().background);
        self.panel_fx = Some(fx::fade_from(
            background,
            background,
            (PANEL_FADE_MS, Interpolation::QuadOut),
        ));
    }

    pub fn quit(&mut self) {
        self.running = false;
        self.fetcher.abort_all();
    }
}
