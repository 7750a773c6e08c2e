//! Shared search state and the search-bar producer.
//!
//! [`SearchStore`] is the single place the search bar writes to and the
//! catalog reads from. It is backed by a `watch` channel so renderers can
//! subscribe to changes; every write replaces the state atomically.

use std::sync::Arc;

use brewmart_client::{ClientError, StoreApi};
use brewmart_core::Product;
use tokio::sync::watch;

/// Snapshot of the shared search state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    pub query: String,
    pub results: Vec<Product>,
    pub result_count: usize,
    pub loading: bool,
    /// Bumped by every `begin` and `clear`; results for an older generation
    /// are discarded.
    generation: u64,
}

impl SearchState {
    /// `true` when the store holds at least one result.
    #[must_use]
    pub fn has_results(&self) -> bool {
        self.result_count > 0
    }

    #[must_use]
    pub fn is_searching(&self) -> bool {
        !self.query.is_empty()
    }
}

/// Cloneable handle to the shared search state.
#[derive(Debug, Clone)]
pub struct SearchStore {
    tx: Arc<watch::Sender<SearchState>>,
}

impl Default for SearchStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchStore {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(SearchState::default());
        Self { tx: Arc::new(tx) }
    }

    #[must_use]
    pub fn snapshot(&self) -> SearchState {
        self.tx.borrow().clone()
    }

    /// Receiver notified on every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.tx.subscribe()
    }

    /// Starts a search for `query`: sets the query, marks loading, and drops
    /// previous results. Returns the generation the results must carry.
    pub fn begin(&self, query: &str) -> u64 {
        let mut generation = 0;
        self.tx.send_modify(|state| {
            state.generation += 1;
            generation = state.generation;
            state.query = query.to_owned();
            state.results.clear();
            state.result_count = 0;
            state.loading = true;
        });
        generation
    }

    /// Publishes results for a search started with [`Self::begin`].
    ///
    /// Returns `false` (and changes nothing) if a newer search or a clear
    /// happened in the meantime.
    pub fn publish(&self, generation: u64, results: Vec<Product>) -> bool {
        self.tx.send_if_modified(|state| {
            if state.generation != generation {
                return false;
            }
            state.result_count = results.len();
            state.results = results;
            state.loading = false;
            true
        })
    }

    /// Ends a failed search: zero results, loading off, query kept.
    pub fn fail(&self, generation: u64) -> bool {
        self.publish(generation, Vec::new())
    }

    pub fn set_loading(&self, loading: bool) {
        self.tx.send_if_modified(|state| {
            if state.loading == loading {
                return false;
            }
            state.loading = loading;
            true
        });
    }

    /// Resets query, results, count, and loading in one write.
    pub fn clear(&self) {
        self.tx.send_modify(|state| {
            state.generation += 1;
            state.query.clear();
            state.results.clear();
            state.result_count = 0;
            state.loading = false;
        });
    }
}

/// The search bar: submits queries to the API and feeds the store.
pub struct Search<A: StoreApi> {
    api: Arc<A>,
    store: SearchStore,
}

impl<A: StoreApi> Search<A> {
    pub fn new(api: Arc<A>, store: SearchStore) -> Self {
        Self { api, store }
    }

    /// Runs a search and publishes the results.
    ///
    /// A blank query clears the store. Returns the number of results
    /// published, or `0` if the response was superseded by a newer search.
    ///
    /// # Errors
    ///
    /// Propagates the API error after recording an empty result set, so the
    /// catalog shows the empty state rather than a stale list.
    pub async fn submit(&self, query: &str) -> Result<usize, ClientError> {
        let query = query.trim();
        if query.is_empty() {
            self.store.clear();
            return Ok(0);
        }

        let generation = self.store.begin(query);
        match self.api.search_products(query).await {
            Ok(results) => {
                let count = results.len();
                if self.store.publish(generation, results) {
                    tracing::info!(query, count, "search results published");
                    Ok(count)
                } else {
                    tracing::debug!(query, "dropping superseded search results");
                    Ok(0)
                }
            }
            Err(e) => {
                tracing::warn!(query, error = %e, "product search failed");
                self.store.fail(generation);
                Err(e)
            }
        }
    }

    pub fn clear(&self) {
        self.store.clear();
    }

    #[must_use]
    pub fn store(&self) -> &SearchStore {
        &self.store
    }
}

#[cfg(test)]
#[path = "search_test.rs"]
mod tests;
