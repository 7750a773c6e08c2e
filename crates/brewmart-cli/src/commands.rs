//! Command handlers. Each one builds a storefront page over the live API,
//! drives it the way a browser would, and prints the rendered view.

use std::sync::Arc;

use anyhow::Context as _;
use brewmart_client::{StoreApi, StoreClient};
use brewmart_core::AppConfig;
use brewmart_storefront::{
    AddToCart, CatalogSettings, PageView, ScrollMetrics, ScrollOutcome, StorefrontPage,
    Translator, WalletSession,
};

use crate::render;

/// A viewport parked at the end of the document; always triggers the next page.
const END_OF_DOCUMENT: ScrollMetrics = ScrollMetrics {
    scroll_y: 0.0,
    viewport_height: 0.0,
    document_height: 0.0,
};

pub(crate) struct Context {
    client: Arc<StoreClient>,
    settings: CatalogSettings,
    translator: Arc<Translator>,
    json: bool,
}

impl Context {
    pub(crate) fn from_config(config: &AppConfig, json: bool) -> anyhow::Result<Self> {
        let client = StoreClient::from_config(config)?;
        let translator = match &config.locale_path {
            Some(path) => Translator::from_path(path)
                .with_context(|| format!("loading locale {}", path.display()))?,
            None => Translator::english(),
        };
        tracing::debug!(locale = translator.locale(), "translations loaded");
        Ok(Self {
            client: Arc::new(client),
            settings: CatalogSettings::from_config(config),
            translator: Arc::new(translator),
            json,
        })
    }

    fn page(&self, wallet: WalletSession) -> StorefrontPage<StoreClient> {
        StorefrontPage::new(
            Arc::clone(&self.client),
            self.settings.clone(),
            Arc::clone(&self.translator),
            wallet,
        )
    }

    fn emit(&self, view: &PageView) -> anyhow::Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(view)?);
        } else {
            println!("{}", render::page(view));
        }
        Ok(())
    }
}

fn wallet_session(address: Option<String>) -> WalletSession {
    address.map_or_else(WalletSession::disconnected, WalletSession::connected)
}

pub(crate) async fn run_browse(
    ctx: &Context,
    pages: u32,
    wallet: Option<String>,
) -> anyhow::Result<()> {
    let page = ctx.page(wallet_session(wallet));
    page.mount();
    page.catalog().settle().await;

    for _ in 1..pages {
        match page.on_scroll(END_OF_DOCUMENT) {
            ScrollOutcome::FetchStarted => page.catalog().settle().await,
            ScrollOutcome::Exhausted => break,
            outcome => {
                tracing::debug!(?outcome, "stopped scrolling");
                break;
            }
        }
    }

    if let Some(error) = page.catalog().last_error() {
        tracing::warn!(%error, "catalog is incomplete");
    }
    ctx.emit(&page.render())?;
    page.unmount();
    Ok(())
}

pub(crate) async fn run_search(ctx: &Context, query: &str) -> anyhow::Result<()> {
    let page = ctx.page(WalletSession::disconnected());
    let result = page.search(query).await;
    ctx.emit(&page.render())?;
    result.with_context(|| format!("searching for \"{query}\""))?;
    Ok(())
}

pub(crate) async fn run_cart(ctx: &Context) -> anyhow::Result<()> {
    let cart = ctx.client.fetch_cart().await.context("fetching cart")?;
    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&cart)?);
    } else {
        println!("{}", render::cart(&cart, &ctx.translator));
    }
    Ok(())
}

pub(crate) async fn run_add(
    ctx: &Context,
    product_id: &str,
    quantity: u32,
    wallet: Option<String>,
) -> anyhow::Result<()> {
    let page = ctx.page(wallet_session(wallet));
    page.mount();
    page.catalog().settle().await;

    let connect = || tracing::warn!("no wallet connected; pass --wallet <ADDRESS>");
    let outcome = page
        .catalog()
        .add_to_cart(product_id, quantity, page.wallet(), Some(&connect));

    match outcome {
        AddToCart::Submitted => page.catalog().settle().await,
        AddToCart::ConnectRequested => anyhow::bail!("a connected wallet is required to add to the cart"),
        other => anyhow::bail!("add to cart was not submitted: {other:?}"),
    }

    if let Some(error) = page.catalog().add_error(product_id) {
        page.unmount();
        anyhow::bail!("adding {product_id} to the cart failed: {error}");
    }

    // The add went through even if the summary refetch did not.
    match page.catalog().cart() {
        Some(cart) if ctx.json => println!("{}", serde_json::to_string_pretty(&cart)?),
        Some(cart) => println!("{}", render::cart(&cart, &ctx.translator)),
        None => {
            tracing::warn!(product_id, "added, but the cart summary could not be refreshed");
            println!("added {quantity} x {product_id}");
        }
    }
    page.unmount();
    Ok(())
}
