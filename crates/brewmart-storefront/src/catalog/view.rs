//! Catalog render policy and card view models.

use std::collections::HashSet;

use brewmart_core::pricing::format_amount;
use brewmart_core::{product_route, resolve_image, Product, Strength};
use serde::Serialize;

use super::CatalogSettings;
use crate::i18n::Translator;
use crate::search::SearchState;

/// Illustration shown by the empty-search panel.
pub const EMPTY_SEARCH_ILLUSTRATION: &str = "/images/empty-cup.svg";

/// What the catalog area shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CatalogView {
    /// Skeleton placeholders while the first page or a search is loading.
    Loading { skeletons: usize },
    /// Search results replace the paginated grid.
    SearchResults {
        header: String,
        clear_label: String,
        cards: Vec<CardView>,
    },
    /// A non-empty query matched nothing.
    EmptySearch {
        query: String,
        title: String,
        hint: String,
        illustration: &'static str,
        clear_label: String,
    },
    /// The paginated catalog.
    Grid {
        cards: Vec<CardView>,
        has_more: bool,
        /// Localized notice after a failed page load.
        notice: Option<String>,
    },
}

/// One product card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardView {
    pub id: String,
    pub name: String,
    pub image_url: String,
    pub origin: Option<String>,
    pub farm: Option<String>,
    pub strength: Option<String>,
    pub stock: u32,
    pub stock_label: String,
    pub base_price: String,
    pub fee: String,
    pub fee_label: String,
    pub total_price: String,
    /// Detail page route the card navigates to.
    pub route: String,
    /// An add-to-cart for this product is in flight; the button is disabled.
    pub adding: bool,
    pub button_label: String,
}

/// Inputs to the render policy, gathered under the catalog lock.
pub(super) struct RenderInput<'a> {
    pub products: &'a [Product],
    pub initial_loading: bool,
    pub has_more: bool,
    pub load_failed: bool,
    pub adding: &'a HashSet<String>,
}

/// Applies the catalog render policy.
///
/// 1. Initial page or search loading → skeletons.
/// 2. Search results present → visible results with a count header.
/// 3. Non-empty query with nothing visible → empty-search panel.
/// 4. Otherwise the paginated grid.
pub(super) fn render(
    input: &RenderInput<'_>,
    search: &SearchState,
    settings: &CatalogSettings,
    tr: &Translator,
) -> CatalogView {
    if input.initial_loading || search.loading {
        return CatalogView::Loading {
            skeletons: settings.page_size as usize,
        };
    }

    let clear_label = tr.t("catalog.clear_search");

    if search.has_results() {
        let cards: Vec<CardView> = search
            .results
            .iter()
            .filter(|p| p.is_visible())
            .map(|p| card(p, input.adding, settings, tr))
            .collect();
        if !cards.is_empty() {
            let header = tr.t_count("catalog.results", cards.len(), &[("query", &search.query)]);
            return CatalogView::SearchResults {
                header,
                clear_label,
                cards,
            };
        }
    }

    if search.is_searching() {
        return CatalogView::EmptySearch {
            query: search.query.clone(),
            title: tr.t_with("catalog.empty_title", &[("query", &search.query)]),
            hint: tr.t("catalog.empty_hint"),
            illustration: EMPTY_SEARCH_ILLUSTRATION,
            clear_label,
        };
    }

    let cards = input
        .products
        .iter()
        .filter(|p| p.is_visible())
        .map(|p| card(p, input.adding, settings, tr))
        .collect();
    CatalogView::Grid {
        cards,
        has_more: input.has_more,
        notice: input.load_failed.then(|| tr.t("catalog.load_failed")),
    }
}

fn card(
    product: &Product,
    adding: &HashSet<String>,
    settings: &CatalogSettings,
    tr: &Translator,
) -> CardView {
    let prices = product.price_breakdown(settings.fee_rate);
    let meta = product.metadata.as_ref();
    let is_adding = adding.contains(&product.id);

    let stock_label = if product.in_stock() {
        tr.t_count("catalog.stock", product.stock as usize, &[])
    } else {
        tr.t("catalog.out_of_stock")
    };
    let fee = format_amount(prices.fee);
    let fee_label = tr.t_with("catalog.fee", &[("fee", &fee)]);
    let button_label = if is_adding {
        tr.t("catalog.adding")
    } else {
        tr.t("catalog.add_to_cart")
    };

    CardView {
        id: product.id.clone(),
        name: tr.t(&product.name),
        image_url: resolve_image(product.image_ref(), &settings.ipfs_gateway),
        origin: meta.and_then(|m| m.origin.clone()),
        farm: meta.and_then(|m| m.farm.clone()),
        strength: meta
            .and_then(|m| m.strength.as_ref())
            .map(|s| strength_label(s, tr)),
        stock: product.stock,
        stock_label,
        base_price: format_amount(prices.base),
        fee,
        fee_label,
        total_price: prices.display_total(),
        route: product_route(&product.id),
        adding: is_adding,
        button_label,
    }
}

fn strength_label(strength: &Strength, tr: &Translator) -> String {
    match strength {
        Strength::Other(raw) => raw.clone(),
        known => tr.t(&format!("strength.{known}")),
    }
}
