pub mod api;
pub mod client;
pub mod error;
pub mod normalize;
pub mod pagination;
pub mod rate_limit;
pub mod types;

pub use api::StoreApi;
pub use client::StoreClient;
pub use error::ClientError;
pub use normalize::{normalize_page, normalize_product};
pub use types::{ProductPage, WireProduct, WireProductsResponse};
