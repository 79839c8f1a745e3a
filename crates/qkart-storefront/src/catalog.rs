//! Catalog loading and debounced, ordered search.
//!
//! Searches issued through the debouncer run as background tasks. Each one is
//! stamped with a ticket; issuing a newer search aborts the previous task, and
//! any completion whose ticket is not the latest is discarded so a slow
//! response never overwrites a newer one.

use std::sync::Arc;
use std::time::Duration;

use qkart_client::{ClientError, StorefrontClient};
use qkart_core::Product;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::debounce::Debouncer;
use crate::notify::{self, Notifier};

/// Result of applying a search response to the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The product set was replaced with this many results.
    Found(usize),
    /// The backend reported no matches; the product set is empty.
    NotFound,
    /// The request failed; the product set is empty and the user was notified.
    Failed,
}

/// Something the catalog did while driven by [`CatalogLoader::next_event`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogEvent {
    /// The debounce interval elapsed and a search request went out.
    SearchIssued { ticket: u64, query: String },
    /// The latest search completed and its result was applied.
    SearchApplied {
        query: String,
        outcome: SearchOutcome,
    },
}

struct SearchCompletion {
    ticket: u64,
    query: String,
    result: Result<Vec<Product>, ClientError>,
}

pub struct CatalogLoader {
    client: Arc<StorefrontClient>,
    products: Vec<Product>,
    loading: bool,
    search_value: String,
    debouncer: Debouncer<String>,
    fired: mpsc::UnboundedReceiver<String>,
    completions_tx: mpsc::UnboundedSender<SearchCompletion>,
    completions: mpsc::UnboundedReceiver<SearchCompletion>,
    in_flight: Option<JoinHandle<()>>,
    latest_ticket: u64,
}

impl CatalogLoader {
    #[must_use]
    pub fn new(client: Arc<StorefrontClient>, debounce: Duration) -> Self {
        let (debouncer, fired) = Debouncer::new(debounce);
        let (completions_tx, completions) = mpsc::unbounded_channel();
        Self {
            client,
            products: Vec::new(),
            loading: false,
            search_value: String::new(),
            debouncer,
            fired,
            completions_tx,
            completions,
            in_flight: None,
            latest_ticket: 0,
        }
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The search box contents as last typed, independent of whether the
    /// corresponding search has run yet.
    #[must_use]
    pub fn search_value(&self) -> &str {
        &self.search_value
    }

    /// Marks the catalog as loading so a render before [`Self::load_all`]
    /// completes shows the loading placeholder.
    pub fn begin_load(&mut self) {
        self.loading = true;
    }

    /// Fetches the full catalog and replaces the held product set.
    ///
    /// On failure the user is notified and the previous products are kept.
    /// Returns `true` on success.
    pub async fn load_all(&mut self, notifier: &mut dyn Notifier) -> bool {
        self.begin_load();
        let result = self.client.list_products().await;
        self.loading = false;

        match result {
            Ok(products) => {
                tracing::info!(count = products.len(), "catalog loaded");
                self.products = products;
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "catalog fetch failed");
                notifier.error(notify::FETCH_FAILED);
                false
            }
        }
    }

    /// Runs a search immediately and applies its result.
    ///
    /// Any pending debounce and background search still in flight are
    /// superseded.
    pub async fn search(&mut self, text: &str, notifier: &mut dyn Notifier) -> SearchOutcome {
        text.clone_into(&mut self.search_value);
        self.debouncer.cancel();
        self.supersede_in_flight();
        let result = self.client.search_products(text).await;
        self.apply_search_result(text, result, notifier)
    }

    /// Records `value` as the search box contents and restarts the debounce
    /// interval. The search itself is issued by [`CatalogLoader::next_event`]
    /// once the interval elapses without another call.
    pub fn debounced_search(&mut self, value: impl Into<String>) {
        let value = value.into();
        self.search_value.clone_from(&value);
        self.debouncer.trigger(value);
    }

    /// Issues a background search for `query`, aborting the previous one.
    /// Returns the ticket stamped on the request.
    pub fn begin_search(&mut self, query: String) -> u64 {
        let ticket = self.supersede_in_flight();
        let client = Arc::clone(&self.client);
        let tx = self.completions_tx.clone();
        tracing::debug!(ticket, query = %query, "issuing search");
        self.in_flight = Some(tokio::spawn(async move {
            let result = client.search_products(&query).await;
            let _ = tx.send(SearchCompletion {
                ticket,
                query,
                result,
            });
        }));
        ticket
    }

    /// Waits for the next debounce firing or search completion and handles
    /// it. Stale completions are dropped silently and waiting continues.
    ///
    /// Cancel-safe: may be raced against other input in `tokio::select!`.
    pub async fn next_event(&mut self, notifier: &mut dyn Notifier) -> Option<CatalogEvent> {
        loop {
            tokio::select! {
                Some(query) = self.fired.recv() => {
                    let ticket = self.begin_search(query.clone());
                    return Some(CatalogEvent::SearchIssued { ticket, query });
                }
                Some(done) = self.completions.recv() => {
                    if done.ticket != self.latest_ticket {
                        tracing::debug!(
                            ticket = done.ticket,
                            latest = self.latest_ticket,
                            "discarding stale search response"
                        );
                        continue;
                    }
                    self.in_flight = None;
                    let outcome = self.apply_search_result(&done.query, done.result, notifier);
                    return Some(CatalogEvent::SearchApplied { query: done.query, outcome });
                }
                else => return None,
            }
        }
    }

    /// Cancels the pending debounce timer and any in-flight search.
    pub fn cancel_pending(&mut self) {
        self.debouncer.cancel();
        self.supersede_in_flight();
    }

    /// Cancels pending work and empties the search box.
    pub fn reset_search(&mut self) {
        self.cancel_pending();
        self.search_value.clear();
    }

    /// Advances the ticket and aborts the in-flight search, returning the new
    /// ticket.
    fn supersede_in_flight(&mut self) -> u64 {
        self.latest_ticket += 1;
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
        self.latest_ticket
    }

    fn apply_search_result(
        &mut self,
        query: &str,
        result: Result<Vec<Product>, ClientError>,
        notifier: &mut dyn Notifier,
    ) -> SearchOutcome {
        match result {
            Ok(products) => {
                tracing::debug!(query, count = products.len(), "search results applied");
                let count = products.len();
                self.products = products;
                SearchOutcome::Found(count)
            }
            Err(ClientError::NotFound { .. }) => {
                tracing::debug!(query, "search returned no results");
                self.products.clear();
                SearchOutcome::NotFound
            }
            Err(e) => {
                tracing::warn!(query, error = %e, "search failed");
                self.products.clear();
                notifier.error(notify::FETCH_FAILED);
                SearchOutcome::Failed
            }
        }
    }
}

impl Drop for CatalogLoader {
    fn drop(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}
