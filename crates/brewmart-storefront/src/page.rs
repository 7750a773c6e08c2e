//! Catalog page composition: header, search bar, optional carousel, catalog.

use std::sync::Arc;

use brewmart_client::{ClientError, StoreApi};
use serde::Serialize;

use crate::catalog::{
    AddToCart, Catalog, CatalogSettings, CatalogView, ScrollMetrics, ScrollOutcome,
    DEFAULT_ADD_QUANTITY,
};
use crate::i18n::Translator;
use crate::search::{Search, SearchStore};
use crate::wallet::WalletSession;

/// Promotional slides, in display order, as translation keys.
const CAROUSEL_SLIDES: [&str; 3] = ["new_harvest", "subscription", "farm_direct"];

type Handler = Box<dyn Fn() + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewState {
    /// Query empty: carousel and paginated grid.
    Browsing,
    /// Query non-empty: the catalog shows results or the empty state.
    Searching,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageView {
    pub state: ViewState,
    pub header: HeaderView,
    pub search_bar: SearchBarView,
    pub carousel: Option<CarouselView>,
    pub catalog: CatalogView,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderView {
    pub title: String,
    /// Shortened wallet address, when connected.
    pub wallet_address: Option<String>,
    /// Label of the connect or disconnect control.
    pub wallet_action: String,
    pub cart_label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchBarView {
    pub query: String,
    pub placeholder: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CarouselView {
    pub slides: Vec<SlideView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlideView {
    pub id: &'static str,
    pub caption: String,
}

/// The storefront catalog page.
///
/// Owns one [`SearchStore`] shared by the search bar and the catalog.
pub struct StorefrontPage<A: StoreApi> {
    catalog: Catalog<A>,
    search: Search<A>,
    translator: Arc<Translator>,
    wallet: WalletSession,
    on_connect: Option<Handler>,
    on_disconnect: Option<Handler>,
}

impl<A: StoreApi> StorefrontPage<A> {
    pub fn new(
        api: Arc<A>,
        settings: CatalogSettings,
        translator: Arc<Translator>,
        wallet: WalletSession,
    ) -> Self {
        let store = SearchStore::new();
        Self {
            catalog: Catalog::new(Arc::clone(&api), store.clone(), settings),
            search: Search::new(api, store),
            translator,
            wallet,
            on_connect: None,
            on_disconnect: None,
        }
    }

    /// Handler invoked when an add-to-cart needs a wallet connection.
    #[must_use]
    pub fn with_connect_handler(mut self, handler: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_connect = Some(Box::new(handler));
        self
    }

    #[must_use]
    pub fn with_disconnect_handler(mut self, handler: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_disconnect = Some(Box::new(handler));
        self
    }

    /// Mounts the catalog and, with a connected wallet, loads the cart.
    pub fn mount(&self) {
        self.catalog.mount();
        if self.wallet.is_connected() {
            self.catalog.refresh_cart();
        }
    }

    pub fn unmount(&self) {
        self.catalog.unmount();
    }

    /// Submits the search bar.
    ///
    /// # Errors
    ///
    /// Returns the API error; the catalog already shows the empty state.
    pub async fn search(&self, query: &str) -> Result<usize, ClientError> {
        self.search.submit(query).await
    }

    pub fn clear_search(&self) {
        self.catalog.clear_search();
    }

    pub fn on_scroll(&self, metrics: ScrollMetrics) -> ScrollOutcome {
        self.catalog.on_scroll(metrics)
    }

    pub fn add_to_cart(&self, product_id: &str) -> AddToCart {
        let on_connect = self.on_connect.as_deref().map(|h| h as &dyn Fn());
        self.catalog
            .add_to_cart(product_id, DEFAULT_ADD_QUANTITY, &self.wallet, on_connect)
    }

    pub fn set_wallet(&mut self, wallet: WalletSession) {
        let newly_connected = wallet.is_connected() && !self.wallet.is_connected();
        self.wallet = wallet;
        if newly_connected {
            self.catalog.refresh_cart();
        }
    }

    /// Runs the disconnect handler and forgets the wallet session.
    pub fn disconnect(&mut self) {
        if let Some(handler) = &self.on_disconnect {
            handler();
        }
        self.wallet = WalletSession::disconnected();
        tracing::info!("wallet disconnected");
    }

    #[must_use]
    pub fn view_state(&self) -> ViewState {
        if self.search.store().snapshot().is_searching() {
            ViewState::Searching
        } else {
            ViewState::Browsing
        }
    }

    #[must_use]
    pub fn render(&self) -> PageView {
        let tr = self.translator.as_ref();
        let query = self.search.store().snapshot().query;
        let state = self.view_state();

        let carousel = (state == ViewState::Browsing).then(|| CarouselView {
            slides: CAROUSEL_SLIDES
                .iter()
                .map(|&id| SlideView {
                    id,
                    caption: tr.t(&format!("carousel.slides.{id}")),
                })
                .collect(),
        });

        PageView {
            state,
            header: self.header(tr),
            search_bar: SearchBarView {
                query,
                placeholder: tr.t("search.placeholder"),
            },
            carousel,
            catalog: self.catalog.view(tr),
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog<A> {
        &self.catalog
    }

    #[must_use]
    pub fn wallet(&self) -> &WalletSession {
        &self.wallet
    }

    fn header(&self, tr: &Translator) -> HeaderView {
        let wallet_action = if self.wallet.is_connected() {
            tr.t("header.disconnect")
        } else {
            tr.t("header.connect")
        };
        let cart_label = self
            .catalog
            .cart()
            .map(|cart| tr.t_count("header.cart", cart.item_count() as usize, &[]));
        HeaderView {
            title: tr.t("header.title"),
            wallet_address: self.wallet.short_address(),
            wallet_action,
            cart_label,
        }
    }
}
