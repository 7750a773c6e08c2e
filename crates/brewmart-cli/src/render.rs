//! Plain-text rendering of storefront views.

use brewmart_core::Cart;
use brewmart_storefront::catalog::CardView;
use brewmart_storefront::page::HeaderView;
use brewmart_storefront::{CatalogView, PageView, Translator};

pub(crate) fn page(view: &PageView) -> String {
    let mut lines = header(&view.header);
    let search = non_empty_or(&view.search_bar.query, &view.search_bar.placeholder);
    lines.push(format!("[ {search} ]"));

    if let Some(carousel) = &view.carousel {
        for slide in &carousel.slides {
            lines.push(format!("  * {}", slide.caption));
        }
    }
    lines.push(String::new());
    lines.extend(catalog(&view.catalog));
    lines.join("\n")
}

fn header(view: &HeaderView) -> Vec<String> {
    let mut line = view.title.clone();
    if let Some(address) = &view.wallet_address {
        line.push_str(&format!("  {address}"));
    }
    line.push_str(&format!("  [{}]", view.wallet_action));
    if let Some(cart) = &view.cart_label {
        line.push_str(&format!("  {cart}"));
    }
    vec![line]
}

fn catalog(view: &CatalogView) -> Vec<String> {
    match view {
        CatalogView::Loading { skeletons } => vec!["░░░░░░░░".to_owned(); *skeletons],
        CatalogView::SearchResults {
            header,
            clear_label,
            cards,
        } => {
            let mut lines = vec![format!("{header}  ({clear_label})")];
            lines.extend(cards.iter().flat_map(card));
            lines
        }
        CatalogView::EmptySearch {
            title,
            hint,
            clear_label,
            ..
        } => vec![title.clone(), hint.clone(), format!("({clear_label})")],
        CatalogView::Grid {
            cards,
            has_more,
            notice,
        } => {
            let mut lines: Vec<String> = cards.iter().flat_map(card).collect();
            if let Some(notice) = notice {
                lines.push(format!("! {notice}"));
            } else if *has_more {
                lines.push("…".to_owned());
            }
            lines
        }
    }
}

fn card(card: &CardView) -> Vec<String> {
    let details: Vec<&str> = [&card.origin, &card.farm, &card.strength]
        .into_iter()
        .filter_map(Option::as_deref)
        .collect();
    let mut lines = vec![format!("{}  {}", card.name, card.total_price)];
    if !details.is_empty() {
        lines.push(format!("    {}", details.join(" · ")));
    }
    lines.push(format!("    {}  {}", card.stock_label, card.fee_label));
    lines.push(format!("    {}  {}", card.route, card.image_url));
    lines
}

pub(crate) fn cart(cart: &Cart, tr: &Translator) -> String {
    let count = usize::try_from(cart.item_count()).unwrap_or(usize::MAX);
    let mut lines = vec![tr.t_count("header.cart", count, &[])];
    for line in &cart.items {
        lines.push(format!("  {} x{}", line.product_id, line.quantity));
    }
    lines.join("\n")
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}
