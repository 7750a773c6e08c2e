use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::pricing::PriceBreakdown;

/// Label attached to every product that came through the storefront listing.
pub const PROVENANCE_LABEL: &str = "storefront";

/// A catalog product, normalized from the storefront API for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Storefront product ID, kept as a string to avoid precision loss.
    pub id: String,
    /// Display name. Doubles as a translation key for localized catalogs.
    pub name: String,
    pub price: Decimal,
    /// Units in stock. Absent or `null` on the wire becomes `0`.
    pub stock: u32,
    pub hidden: bool,
    pub metadata: Option<ProductMetadata>,
    /// Where this product record came from, e.g. [`PROVENANCE_LABEL`].
    pub provenance: String,
}

impl Product {
    /// Returns `true` if the product should appear in any render path.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        !self.hidden
    }

    #[must_use]
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Price split into base, market fee, and all-in total.
    #[must_use]
    pub fn price_breakdown(&self, fee_rate: Decimal) -> PriceBreakdown {
        PriceBreakdown::compute(self.price, fee_rate)
    }

    /// The raw image reference from metadata, if any.
    #[must_use]
    pub fn image_ref(&self) -> Option<&str> {
        self.metadata.as_ref().and_then(|m| m.image.as_deref())
    }
}

/// NFT-style descriptive metadata attached to a coffee product.
///
/// Every field is optional; a product with unparseable metadata carries
/// `None` rather than a half-filled value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductMetadata {
    /// Image URL or content identifier (`Qm...`, `ipfs://...`).
    #[serde(default)]
    pub image: Option<String>,
    /// Growing region, e.g. `"Huila, Colombia"`.
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub farm: Option<String>,
    #[serde(default)]
    pub strength: Option<Strength>,
}

/// Roast strength category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Strength {
    Mild,
    Medium,
    Strong,
    /// Any category the catalog does not know about, kept verbatim.
    Other(String),
}

impl From<String> for Strength {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "mild" | "light" => Strength::Mild,
            "medium" => Strength::Medium,
            "strong" | "dark" | "bold" => Strength::Strong,
            _ => Strength::Other(value),
        }
    }
}

impl From<Strength> for String {
    fn from(value: Strength) -> Self {
        value.to_string()
    }
}

impl std::fmt::Display for Strength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strength::Mild => write!(f, "mild"),
            Strength::Medium => write!(f, "medium"),
            Strength::Strong => write!(f, "strong"),
            Strength::Other(s) => write!(f, "{s}"),
        }
    }
}

/// Metadata exactly as the storefront API delivers it.
///
/// Some records carry a JSON object, others the same object serialized into
/// a string. Both are accepted here and validated by [`RawMetadata::parse`];
/// anything else lands in `Unrecognized` instead of failing the whole record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawMetadata {
    Structured(ProductMetadata),
    Serialized(String),
    Unrecognized(serde_json::Value),
}

impl RawMetadata {
    /// Validates the raw value into [`ProductMetadata`].
    ///
    /// A serialized string that is empty or does not parse yields `None`;
    /// the failure is logged at `debug` and never surfaced to callers.
    #[must_use]
    pub fn parse(self) -> Option<ProductMetadata> {
        match self {
            RawMetadata::Structured(meta) => Some(meta),
            RawMetadata::Serialized(raw) => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return None;
                }
                match serde_json::from_str::<ProductMetadata>(trimmed) {
                    Ok(meta) => Some(meta),
                    Err(e) => {
                        tracing::debug!(error = %e, "discarding malformed product metadata");
                        None
                    }
                }
            }
            RawMetadata::Unrecognized(value) => {
                tracing::debug!(%value, "discarding product metadata of unexpected shape");
                None
            }
        }
    }
}
