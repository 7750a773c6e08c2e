use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Cart summary as returned by the storefront API.
///
/// The API owns the cart; this is a read-only snapshot used to render the
/// header badge and the `cart` command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    #[serde(default)]
    pub items: Vec<CartLine>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: String,
    pub quantity: u32,
}

impl Cart {
    /// Total number of units across all lines, saturating at `u32::MAX`.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |total, l| total.saturating_add(l.quantity))
    }

    #[must_use]
    pub fn quantity_of(&self, product_id: &str) -> u32 {
        self.items
            .iter()
            .filter(|l| l.product_id == product_id)
            .fold(0u32, |total, l| total.saturating_add(l.quantity))
    }
}
