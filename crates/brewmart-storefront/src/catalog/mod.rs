//! Infinite-scroll product catalog.
//!
//! [`Catalog`] owns the accumulated product list, the single in-flight page
//! request, the per-product "adding" markers, and the cart summary. All
//! network work runs in tasks owned by the catalog; [`Catalog::unmount`] (or
//! dropping the catalog) aborts them. Every task also carries the mount epoch
//! it was started under and drops its result if the catalog has since been
//! unmounted or remounted.

mod scroll;
mod view;

use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use brewmart_client::StoreApi;
use brewmart_core::{product_route, AppConfig, Cart, Product, DEFAULT_MARKET_FEE_RATE};
use rust_decimal::Decimal;
use tokio::task::{AbortHandle, JoinSet};

use crate::i18n::Translator;
use crate::search::SearchStore;
use crate::wallet::WalletSession;

pub use scroll::{ScrollMetrics, ScrollOutcome, SCROLL_THRESHOLD_PX};
pub use view::{CardView, CatalogView, EMPTY_SEARCH_ILLUSTRATION};

/// Quantity used when the caller does not pick one.
pub const DEFAULT_ADD_QUANTITY: u32 = 1;

/// Catalog tuning taken from [`AppConfig`].
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogSettings {
    pub page_size: u32,
    pub fee_rate: Decimal,
    pub ipfs_gateway: String,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            page_size: 3,
            fee_rate: DEFAULT_MARKET_FEE_RATE,
            ipfs_gateway: "https://ipfs.io".to_owned(),
        }
    }
}

impl CatalogSettings {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            page_size: config.page_size,
            fee_rate: config.market_fee_rate,
            ipfs_gateway: config.ipfs_gateway.clone(),
        }
    }
}

/// Result of an add-to-cart request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddToCart {
    /// Wallet disconnected; the connect handler was invoked instead.
    ConnectRequested,
    /// An add for this product is already in flight.
    AlreadyAdding,
    /// The mutation was started.
    Submitted,
    /// The catalog is unmounted.
    Detached,
}

#[derive(Debug, Default)]
struct CatalogState {
    products: Vec<Product>,
    next_cursor: Option<String>,
    pages_loaded: u32,
    initial_loading: bool,
    fetch_in_flight: bool,
    adding: HashSet<String>,
    /// Last failed add per product, cleared when that product is resubmitted.
    add_errors: HashMap<String, String>,
    cart: Option<Cart>,
    last_error: Option<String>,
    mounted: bool,
    /// Bumped on every mount and unmount.
    epoch: u64,
}

impl CatalogState {
    fn is_current(&self, epoch: u64) -> bool {
        self.mounted && self.epoch == epoch
    }

    /// Before the first page arrives there is always more to load, so a
    /// failed first request can be retried by scrolling.
    fn has_more(&self) -> bool {
        self.pages_loaded == 0 || self.next_cursor.is_some()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

pub struct Catalog<A: StoreApi> {
    api: Arc<A>,
    search: SearchStore,
    settings: CatalogSettings,
    state: Arc<Mutex<CatalogState>>,
    tasks: Mutex<JoinSet<()>>,
    /// Handles of tasks not yet joined. `settle` moves the join set out while
    /// it waits, so `unmount` aborts through these instead.
    aborts: Mutex<Vec<AbortHandle>>,
}

impl<A: StoreApi> Catalog<A> {
    pub fn new(api: Arc<A>, search: SearchStore, settings: CatalogSettings) -> Self {
        Self {
            api,
            search,
            settings,
            state: Arc::new(Mutex::new(CatalogState::default())),
            tasks: Mutex::new(JoinSet::new()),
            aborts: Mutex::new(Vec::new()),
        }
    }

    /// Attaches the scroll listener and requests the first page.
    ///
    /// A remount starts from an empty list, the same as a freshly constructed
    /// catalog. The cart summary is kept until the next refresh replaces it.
    ///
    /// Must be called from within a tokio runtime. Mounting twice is a no-op.
    pub fn mount(&self) {
        let mut state = lock(&self.state);
        if state.mounted {
            return;
        }
        state.mounted = true;
        state.epoch += 1;
        state.products.clear();
        state.next_cursor = None;
        state.pages_loaded = 0;
        state.last_error = None;
        state.add_errors.clear();
        state.fetch_in_flight = true;
        state.initial_loading = true;
        let epoch = state.epoch;
        drop(state);

        tracing::debug!(page_size = self.settings.page_size, epoch, "catalog mounted");
        self.spawn_page_fetch(None, epoch);
    }

    /// Detaches the scroll listener and aborts every outstanding request.
    pub fn unmount(&self) {
        {
            let mut state = lock(&self.state);
            state.mounted = false;
            state.epoch += 1;
            state.fetch_in_flight = false;
            state.initial_loading = false;
            state.adding.clear();
        }
        for handle in lock(&self.aborts).drain(..) {
            handle.abort();
        }
        lock(&self.tasks).abort_all();
        tracing::debug!("catalog unmounted");
    }

    /// Handles one scroll event.
    pub fn on_scroll(&self, metrics: ScrollMetrics) -> ScrollOutcome {
        let mut state = lock(&self.state);
        if !state.mounted {
            return ScrollOutcome::Detached;
        }
        if !metrics.is_near_bottom() {
            return ScrollOutcome::NotNearBottom;
        }
        if state.fetch_in_flight {
            return ScrollOutcome::AlreadyLoading;
        }
        if !state.has_more() {
            return ScrollOutcome::Exhausted;
        }
        state.fetch_in_flight = true;
        if state.pages_loaded == 0 {
            state.initial_loading = true;
        }
        let cursor = state.next_cursor.clone();
        let epoch = state.epoch;
        drop(state);

        self.spawn_page_fetch(cursor, epoch);
        ScrollOutcome::FetchStarted
    }

    /// Adds `quantity` of `product_id` to the cart.
    ///
    /// With a disconnected wallet and a connect handler, the handler runs and
    /// nothing is submitted. A detached catalog neither submits nor asks to
    /// connect. Failures are logged and recorded for [`Catalog::add_error`];
    /// the cart summary is refetched only after a successful add.
    pub fn add_to_cart(
        &self,
        product_id: &str,
        quantity: u32,
        wallet: &WalletSession,
        on_connect: Option<&dyn Fn()>,
    ) -> AddToCart {
        if !lock(&self.state).mounted {
            return AddToCart::Detached;
        }

        if !wallet.is_connected() {
            if let Some(connect) = on_connect {
                tracing::debug!(product_id, "wallet disconnected, requesting connect");
                connect();
                return AddToCart::ConnectRequested;
            }
        }

        let epoch = {
            let mut state = lock(&self.state);
            if !state.mounted {
                return AddToCart::Detached;
            }
            if !state.adding.insert(product_id.to_owned()) {
                return AddToCart::AlreadyAdding;
            }
            state.add_errors.remove(product_id);
            state.epoch
        };

        let api = Arc::clone(&self.api);
        let state = Arc::clone(&self.state);
        let product_id = product_id.to_owned();
        self.spawn(async move {
            let result = api.add_to_cart(&product_id, quantity).await;
            {
                let mut state = lock(&state);
                if !state.is_current(epoch) {
                    return;
                }
                state.adding.remove(&product_id);
                if let Err(e) = &result {
                    tracing::warn!(product_id, error = %e, "add to cart failed");
                    state.add_errors.insert(product_id.clone(), e.to_string());
                    return;
                }
            }
            tracing::info!(product_id, quantity, "added to cart");
            match api.fetch_cart().await {
                Ok(cart) => store_cart(&state, cart, epoch),
                Err(e) => tracing::warn!(error = %e, "cart refresh failed"),
            }
        });
        AddToCart::Submitted
    }

    /// Refetches the cart summary in the background.
    pub fn refresh_cart(&self) {
        let epoch = lock(&self.state).epoch;
        let api = Arc::clone(&self.api);
        let state = Arc::clone(&self.state);
        self.spawn(async move {
            match api.fetch_cart().await {
                Ok(cart) => store_cart(&state, cart, epoch),
                Err(e) => tracing::warn!(error = %e, "cart refresh failed"),
            }
        });
    }

    /// Resets the shared search state so the paginated grid shows again.
    pub fn clear_search(&self) {
        self.search.clear();
    }

    /// Route for a clicked card, if the product is currently displayed.
    #[must_use]
    pub fn on_card_click(&self, product_id: &str) -> Option<String> {
        let shown = |p: &Product| p.id == product_id && p.is_visible();
        let known = lock(&self.state).products.iter().any(shown)
            || self.search.snapshot().results.iter().any(shown);
        known.then(|| product_route(product_id))
    }

    /// Renders the catalog area.
    #[must_use]
    pub fn view(&self, tr: &Translator) -> CatalogView {
        let search = self.search.snapshot();
        let state = lock(&self.state);
        let input = view::RenderInput {
            products: &state.products,
            initial_loading: state.initial_loading,
            has_more: state.has_more(),
            load_failed: state.last_error.is_some(),
            adding: &state.adding,
        };
        view::render(&input, &search, &self.settings, tr)
    }

    /// Waits until every task started so far has finished.
    pub async fn settle(&self) {
        loop {
            let mut tasks = std::mem::take(&mut *lock(&self.tasks));
            if tasks.is_empty() {
                return;
            }
            while let Some(joined) = tasks.join_next().await {
                if let Err(e) = joined {
                    if e.is_panic() {
                        tracing::error!(error = %e, "catalog task panicked");
                    }
                }
            }
            lock(&self.aborts).retain(|handle| !handle.is_finished());
        }
    }

    /// All products loaded so far, hidden ones included.
    #[must_use]
    pub fn products(&self) -> Vec<Product> {
        lock(&self.state).products.clone()
    }

    #[must_use]
    pub fn cart(&self) -> Option<Cart> {
        lock(&self.state).cart.clone()
    }

    /// Message of the last failed page load, cleared by the next success.
    #[must_use]
    pub fn last_error(&self) -> Option<String> {
        lock(&self.state).last_error.clone()
    }

    /// Message of the last failed add for `product_id`.
    #[must_use]
    pub fn add_error(&self, product_id: &str) -> Option<String> {
        lock(&self.state).add_errors.get(product_id).cloned()
    }

    #[must_use]
    pub fn is_adding(&self, product_id: &str) -> bool {
        lock(&self.state).adding.contains(product_id)
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        lock(&self.state).mounted
    }

    #[must_use]
    pub fn is_fetching(&self) -> bool {
        lock(&self.state).fetch_in_flight
    }

    #[must_use]
    pub fn has_more(&self) -> bool {
        lock(&self.state).has_more()
    }

    #[must_use]
    pub fn pages_loaded(&self) -> u32 {
        lock(&self.state).pages_loaded
    }

    #[must_use]
    pub fn settings(&self) -> &CatalogSettings {
        &self.settings
    }

    fn spawn_page_fetch(&self, cursor: Option<String>, epoch: u64) {
        let api = Arc::clone(&self.api);
        let state = Arc::clone(&self.state);
        let limit = self.settings.page_size;
        self.spawn(async move {
            let result = api.list_products(limit, true, cursor.as_deref()).await;

            let mut state = lock(&state);
            if !state.is_current(epoch) {
                tracing::debug!(epoch, "dropping page from a previous mount");
                return;
            }
            state.fetch_in_flight = false;
            state.initial_loading = false;
            match result {
                Ok(page) => {
                    let received = page.products.len();
                    let mut products = Vec::with_capacity(state.products.len() + received);
                    products.extend(state.products.iter().cloned());
                    products.extend(page.products);
                    state.products = products;
                    state.next_cursor = page.next_cursor;
                    state.pages_loaded += 1;
                    state.last_error = None;
                    tracing::info!(
                        page = state.pages_loaded,
                        received,
                        total = state.products.len(),
                        has_more = state.next_cursor.is_some(),
                        "catalog page loaded"
                    );
                }
                Err(e) => {
                    tracing::warn!(cursor = ?cursor, error = %e, "catalog page load failed");
                    state.last_error = Some(e.to_string());
                }
            }
        });
    }

    fn spawn<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut tasks = lock(&self.tasks);
        while tasks.try_join_next().is_some() {}
        let handle = tasks.spawn(task);
        drop(tasks);

        let mut aborts = lock(&self.aborts);
        aborts.retain(|h| !h.is_finished());
        aborts.push(handle);
    }
}

fn store_cart(state: &Mutex<CatalogState>, cart: Cart, epoch: u64) {
    let mut state = lock(state);
    if state.is_current(epoch) {
        tracing::debug!(items = cart.item_count(), "cart summary refreshed");
        state.cart = Some(cart);
    }
}

#[cfg(test)]
#[path = "../catalog_test.rs"]
mod tests;
