//! Storefront API wire types.
//!
//! ## Observed shape of `GET /products`
//!
//! ### `id`
//! Older records expose numeric IDs, newer ones string IDs. Both are accepted
//! and normalized to a string.
//!
//! ### `stock`
//! Frequently absent or explicitly `null` for items that were never stocked.
//! Normalization treats both as `0`.
//!
//! ### `hidden`
//! Absent on most records; absent means visible.
//!
//! ### `metadata`
//! Either a JSON object or the same object serialized into a string. See
//! [`brewmart_core::RawMetadata`].
//!
//! ### `nextCursor`
//! `null` or absent on the last page. Some deployments omit it from the body
//! and send a `Link` header instead; see [`crate::pagination`].

use brewmart_core::{Product, RawMetadata};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Top-level response from `GET /products` and `GET /products/search`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireProductsResponse {
    #[serde(default)]
    pub products: Vec<WireProduct>,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// A single product record as the API sends it.
#[derive(Debug, Deserialize)]
pub struct WireProduct {
    pub id: WireId,
    /// Display name / translation key.
    pub name: String,
    /// Price as a JSON number or decimal string.
    pub price: Decimal,
    #[serde(default)]
    pub stock: Option<i64>,
    #[serde(default)]
    pub hidden: Option<bool>,
    #[serde(default)]
    pub metadata: Option<RawMetadata>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum WireId {
    Number(i64),
    Text(String),
}

impl std::fmt::Display for WireId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WireId::Number(n) => write!(f, "{n}"),
            WireId::Text(s) => write!(f, "{s}"),
        }
    }
}

/// Body of `POST /cart/items`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest<'a> {
    pub product_id: &'a str,
    pub quantity: u32,
}

/// One normalized page of the catalog listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPage {
    pub products: Vec<Product>,
    /// Cursor for the following page; `None` on the last page.
    pub next_cursor: Option<String>,
}

impl ProductPage {
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.next_cursor.is_some()
    }
}
