//! The seam between the storefront page and the remote API.

use std::future::Future;

use brewmart_core::{Cart, Product};

use crate::error::ClientError;
use crate::types::ProductPage;

/// Operations the storefront page needs from the remote store API.
///
/// [`crate::StoreClient`] implements this over HTTP; tests substitute an
/// in-memory implementation.
pub trait StoreApi: Send + Sync + 'static {
    /// Fetches one page of the catalog listing.
    fn list_products(
        &self,
        limit: u32,
        exclude_hidden: bool,
        cursor: Option<&str>,
    ) -> impl Future<Output = Result<ProductPage, ClientError>> + Send;

    /// Full-text product search.
    fn search_products(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<Product>, ClientError>> + Send;

    /// Reads the current user's cart.
    fn fetch_cart(&self) -> impl Future<Output = Result<Cart, ClientError>> + Send;

    /// Adds `quantity` units of a product to the cart.
    fn add_to_cart(
        &self,
        product_id: &str,
        quantity: u32,
    ) -> impl Future<Output = Result<(), ClientError>> + Send;
}
