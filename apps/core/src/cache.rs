//! Keyed cache of remote feature content.
//!
//! Each option has at most one request in flight. Requests are identified by a
//! generation number; invalidating an entry bumps it, so a response that lands
//! afterwards is recognised as stale and dropped.

use crate::error::FetchError;
use crate::feature::FeatureContent;
use crate::menu::{OptionId, RemoteFeature};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub enum FetchState {
    Loading,
    Loaded(FeatureContent),
    Failed(FetchError),
}

/// Proof that a fetch was started; hand it back with the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub option: OptionId,
    pub feature: RemoteFeature,
    generation: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Begin {
    /// Content already loaded; nothing to do.
    Cached,
    /// A request for this option is still running; it will fill the entry.
    InFlight,
    /// Caller must perform the fetch and report back.
    Start(FetchTicket),
}

#[derive(Debug, Default)]
struct Entry {
    generation: u64,
    state: Option<FetchState>,
}

#[derive(Debug, Default)]
pub struct FeatureCache {
    entries: HashMap<OptionId, Entry>,
}

impl FeatureCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, option: OptionId, feature: RemoteFeature) -> Begin {
        let entry = self.entries.entry(option).or_default();
        match entry.state {
            Some(FetchState::Loaded(_)) => Begin::Cached,
            Some(FetchState::Loading) => Begin::InFlight,
            Some(FetchState::Failed(_)) | None => {
                entry.generation += 1;
                entry.state = Some(FetchState::Loading);
                Begin::Start(FetchTicket {
                    option,
                    feature,
                    generation: entry.generation,
                })
            }
        }
    }

    /// Records the outcome of a fetch. Returns `false` when the ticket is
    /// stale and the result was discarded.
    pub fn complete(
        &mut self,
        ticket: &FetchTicket,
        result: Result<FeatureContent, FetchError>,
    ) -> bool {
        let Some(entry) = self.entries.get_mut(&ticket.option) else {
            return false;
        };

        if entry.generation != ticket.generation || entry.state != Some(FetchState::Loading) {
            tracing::debug!(
                option = ticket.option.get(),
                ticket = ticket.generation,
                current = entry.generation,
                "dropping stale fetch result"
            );
            return false;
        }

        entry.state = Some(match result {
            Ok(content) => FetchState::Loaded(content),
            Err(error) => {
                tracing::warn!(option = ticket.option.get(), %error, "feature fetch failed");
                FetchState::Failed(error)
            }
        });
        true
    }

    /// Forgets an entry so the next `begin` fetches again. Any request still
    /// running for it becomes stale.
    pub fn invalidate(&mut self, option: OptionId) {
        if let Some(entry) = self.entries.get_mut(&option) {
            entry.generation += 1;
            entry.state = None;
        }
    }

    pub fn state(&self, option: OptionId) -> Option<&FetchState> {
        self.entries.get(&option).and_then(|entry| entry.state.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NEWS: OptionId = OptionId::new(1);

    fn start(cache: &mut FeatureCache) -> FetchTicket {
        match cache.begin(NEWS, RemoteFeature::News) {
            Begin::Start(ticket) => ticket,
            other => panic!("expected a new fetch, got {other:?}"),
        }
    }

    #[test]
    fn first_begin_starts_and_marks_loading() {
        let mut cache = FeatureCache::new();
        let ticket = start(&mut cache);
        assert_eq!(ticket.option, NEWS);
        assert_eq!(cache.state(NEWS), Some(&FetchState::Loading));
    }

    #[test]
    fn second_begin_while_loading_is_deduplicated() {
        let mut cache = FeatureCache::new();
        start(&mut cache);
        assert_eq!(cache.begin(NEWS, RemoteFeature::News), Begin::InFlight);
    }

    #[test]
    fn loaded_content_is_not_refetched() {
        let mut cache = FeatureCache::new();
        let ticket = start(&mut cache);
        assert!(cache.complete(&ticket, Ok(FeatureContent::NoNews)));
        assert_eq!(cache.begin(NEWS, RemoteFeature::News), Begin::Cached);
        assert_eq!(
            cache.state(NEWS),
            Some(&FetchState::Loaded(FeatureContent::NoNews))
        );
    }

    #[test]
    fn failures_settle_and_are_retried() {
        let mut cache = FeatureCache::new();
        let ticket = start(&mut cache);
        assert!(cache.complete(&ticket, Err(FetchError::Status(500))));
        assert_eq!(
            cache.state(NEWS),
            Some(&FetchState::Failed(FetchError::Status(500)))
        );
        assert!(matches!(
            cache.begin(NEWS, RemoteFeature::News),
            Begin::Start(_)
        ));
    }

    #[test]
    fn stale_results_after_invalidate_are_dropped() {
        let mut cache = FeatureCache::new();
        let old = start(&mut cache);
        cache.invalidate(NEWS);
        let fresh = start(&mut cache);

        assert!(!cache.complete(&old, Ok(FeatureContent::NoNews)));
        assert_eq!(cache.state(NEWS), Some(&FetchState::Loading));
        assert!(cache.complete(&fresh, Ok(FeatureContent::text("fresh"))));
    }

    #[test]
    fn a_ticket_settles_only_once() {
        let mut cache = FeatureCache::new();
        let ticket = start(&mut cache);
        assert!(cache.complete(&ticket, Ok(FeatureContent::NoNews)));
        assert!(!cache.complete(&ticket, Err(FetchError::Status(500))));
    }
}
