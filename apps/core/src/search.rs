//! Search overlay: filter known destinations by name and open the chosen one
//! with the typed query.

use crate::nav::{wrap_decrement, wrap_increment, NavKey};
use url::form_urlencoded;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Destination {
    pub label: &'static str,
    /// Everything before the encoded query.
    pub url_prefix: &'static str,
}

pub const DESTINATIONS: [Destination; 8] = [
    Destination {
        label: "Google",
        url_prefix: "https://www.google.com/search?q=",
    },
    Destination {
        label: "YouTube",
        url_prefix: "https://www.youtube.com/results?search_query=",
    },
    Destination {
        label: "GitHub",
        url_prefix: "https://github.com/search?q=",
    },
    Destination {
        label: "Wikipedia",
        url_prefix: "https://en.wikipedia.org/w/index.php?search=",
    },
    Destination {
        label: "Stack Overflow",
        url_prefix: "https://stackoverflow.com/search?q=",
    },
    Destination {
        label: "Reddit",
        url_prefix: "https://www.reddit.com/search/?q=",
    },
    Destination {
        label: "Amazon",
        url_prefix: "https://www.amazon.com/s?k=",
    },
    Destination {
        label: "DuckDuckGo",
        url_prefix: "https://duckduckgo.com/?q=",
    },
];

pub fn destination(label: &str) -> Option<&'static Destination> {
    DESTINATIONS.iter().find(|destination| destination.label == label)
}

/// Result of finishing with the panel. The panel is closed either way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Navigate(String),
    Dismiss,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
    Ignored,
    Moved(usize),
    Done(SearchOutcome),
}

#[derive(Debug, Clone, Default)]
pub struct SearchPanel {
    query: String,
    results: Vec<&'static str>,
    active_index: usize,
}

impl SearchPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[&'static str] {
        &self.results
    }

    pub const fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn set_query(&mut self, text: &str) {
        text.clone_into(&mut self.query);
        self.recompute();
    }

    pub fn push_char(&mut self, ch: char) {
        self.query.push(ch);
        self.recompute();
    }

    pub fn pop_char(&mut self) {
        self.query.pop();
        self.recompute();
    }

    fn recompute(&mut self) {
        let needle = self.query.trim().to_lowercase();
        self.results = if needle.is_empty() {
            Vec::new()
        } else {
            DESTINATIONS
                .iter()
                .map(|destination| destination.label)
                .filter(|label| label.to_lowercase().contains(&needle))
                .collect()
        };
        self.active_index = 0;
    }

    pub fn next(&mut self) {
        self.active_index = wrap_increment(self.active_index, self.results.len());
    }

    pub fn previous(&mut self) {
        self.active_index = wrap_decrement(self.active_index, self.results.len());
    }

    /// Message to show when a query matched nothing; `None` otherwise.
    pub fn empty_message(&self) -> Option<String> {
        if self.query.is_empty() || !self.results.is_empty() {
            return None;
        }
        Some(format!("No results found for \"{}\"", self.query))
    }

    pub fn select_result(&self, label: &str) -> SearchOutcome {
        let query = self.query.trim();
        if query.is_empty() {
            return SearchOutcome::Dismiss;
        }

        destination(label).map_or(SearchOutcome::Dismiss, |destination| {
            let encoded: String = form_urlencoded::byte_serialize(query.as_bytes()).collect();
            SearchOutcome::Navigate(format!("{}{encoded}", destination.url_prefix))
        })
    }

    pub fn handle_key(&mut self, key: NavKey) -> SearchEvent {
        match key {
            NavKey::Down => {
                self.next();
                SearchEvent::Moved(self.active_index)
            }
            NavKey::Up => {
                self.previous();
                SearchEvent::Moved(self.active_index)
            }
            NavKey::Enter => self
                .results
                .get(self.active_index)
                .map_or(SearchEvent::Ignored, |label| {
                    SearchEvent::Done(self.select_result(label))
                }),
            NavKey::Escape => SearchEvent::Done(SearchOutcome::Dismiss),
            NavKey::Left | NavKey::Right | NavKey::Space | NavKey::Other => SearchEvent::Ignored,
        }
    }
}
