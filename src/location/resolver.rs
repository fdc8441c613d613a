//! Position resolver: first non-empty answer from an ordered provider list.

use super::cache::FixStore;
use super::providers::FixProvider;
use super::types::Fix;

/// Walks providers in priority order and takes the first fix offered.
///
/// Resolution is a single synchronous pass: no waiting, no retries, no
/// freshness check. An empty walk is an answer too; the caller runs without
/// an origin.
pub struct LocationResolver {
    providers: Vec<Box<dyn FixProvider>>,
    store: Option<FixStore>,
}

impl LocationResolver {
    pub fn new(providers: Vec<Box<dyn FixProvider>>) -> Self {
        Self {
            providers,
            store: None,
        }
    }

    /// Record whatever resolves into `store`, so the next session's passive
    /// provider has something to consume.
    pub fn with_store(mut self, store: FixStore) -> Self {
        self.store = Some(store);
        self
    }

    /// The first provider's fix, or None when every provider is empty.
    pub fn resolve(&self) -> Option<Fix> {
        let fix = self.providers.iter().find_map(|p| p.last_known_fix())?;
        if let Some(store) = &self.store {
            store.record(&fix);
        }
        Some(fix)
    }
}
