//! Headless storefront catalog page.
//!
//! Everything a renderer needs to draw the coffee catalog: the shared
//! [`SearchStore`], the infinite-scroll [`Catalog`] with its render policy,
//! the [`StorefrontPage`] composer, and key-based localization.

pub mod catalog;
pub mod error;
pub mod i18n;
pub mod page;
pub mod search;
pub mod wallet;

#[cfg(test)]
mod test_support;

pub use catalog::{
    AddToCart, CardView, Catalog, CatalogSettings, CatalogView, ScrollMetrics, ScrollOutcome,
};
pub use error::StorefrontError;
pub use i18n::Translator;
pub use page::{PageView, StorefrontPage, ViewState};
pub use search::{Search, SearchState, SearchStore};
pub use wallet::WalletSession;
