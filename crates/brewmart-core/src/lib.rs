pub mod app_config;
pub mod cart;
pub mod config;
pub mod media;
pub mod pricing;
pub mod products;
pub mod routes;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use cart::{Cart, CartLine};
pub use config::{load_app_config, load_app_config_from_env};
pub use media::{resolve_image, DEFAULT_IMAGE_PATH};
pub use pricing::{PriceBreakdown, DEFAULT_MARKET_FEE_RATE};
pub use products::{Product, ProductMetadata, RawMetadata, Strength, PROVENANCE_LABEL};
pub use routes::product_route;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
