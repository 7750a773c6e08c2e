//! Normalization from raw wire records to [`brewmart_core::Product`].

use brewmart_core::{Product, PROVENANCE_LABEL};

use crate::error::ClientError;
use crate::types::{ProductPage, WireProduct, WireProductsResponse};

/// Normalizes a raw [`WireProduct`] into a [`Product`].
///
/// Missing or `null` stock becomes `0`; negative stock is clamped to `0`.
/// Missing `hidden` becomes `false`. Metadata is validated and dropped to
/// `None` when it cannot be parsed.
///
/// # Errors
///
/// Returns [`ClientError::Normalization`] if the product has an empty ID or
/// a negative price.
pub fn normalize_product(product: WireProduct) -> Result<Product, ClientError> {
    let id = product.id.to_string();
    if id.trim().is_empty() {
        return Err(ClientError::Normalization {
            product_id: id,
            reason: "product has an empty id".into(),
        });
    }

    if product.price.is_sign_negative() {
        return Err(ClientError::Normalization {
            product_id: id,
            reason: format!("negative price {}", product.price),
        });
    }

    let stock = match product.stock {
        Some(n) => u32::try_from(n.max(0)).unwrap_or(u32::MAX),
        None => 0,
    };

    Ok(Product {
        id,
        name: product.name,
        price: product.price,
        stock,
        hidden: product.hidden.unwrap_or(false),
        metadata: product.metadata.and_then(brewmart_core::RawMetadata::parse),
        provenance: PROVENANCE_LABEL.to_string(),
    })
}

/// Normalizes a whole response page.
///
/// Records that fail normalization are skipped with a warning so that one
/// bad product does not blank the catalog.
#[must_use]
pub fn normalize_page(response: WireProductsResponse, next_cursor: Option<String>) -> ProductPage {
    let products = response
        .products
        .into_iter()
        .filter_map(|raw| match normalize_product(raw) {
            Ok(p) => Some(p),
            Err(e) => {
                tracing::warn!(error = %e, "skipping product that failed normalization");
                None
            }
        })
        .collect();

    ProductPage {
        products,
        next_cursor,
    }
}
