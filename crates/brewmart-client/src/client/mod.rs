//! HTTP client for the storefront API.

mod origin;

use std::time::Duration;

use brewmart_core::{AppConfig, Cart, Product};
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;

use crate::api::StoreApi;
use crate::error::ClientError;
use crate::normalize::normalize_page;
use crate::pagination::resolve_next_cursor;
use crate::rate_limit::retry_with_backoff;
use crate::types::{AddToCartRequest, ProductPage, WireProductsResponse};

#[cfg(test)]
use origin::{extract_host, parse_base_url};

/// Fallback `Retry-After` when a 429 carries none.
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// HTTP client for the storefront product and cart endpoints.
///
/// Maps 429, 404, and other non-2xx responses to typed errors. Read
/// endpoints are retried on transient failures; `add_to_cart` is not.
pub struct StoreClient {
    client: Client,
    base_url: Url,
    /// Bearer token sent to the cart endpoints.
    api_token: Option<String>,
    /// Maximum number of retry attempts after the first failure.
    max_retries: u32,
    backoff_base_ms: u64,
}

impl StoreClient {
    /// Creates a client from the loaded application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidBaseUrl`] if `api_url` is not a usable
    /// base URL, or [`ClientError::Http`] if the `reqwest::Client` cannot be
    /// built.
    pub fn from_config(config: &AppConfig) -> Result<Self, ClientError> {
        let client = Self::new(
            &config.api_url,
            config.api_timeout_secs,
            &config.api_user_agent,
            config.api_max_retries,
            config.api_retry_backoff_base_ms,
        )?;
        Ok(client.with_api_token(config.api_token.clone()))
    }

    /// Creates a client with an explicit base URL and retry policy.
    ///
    /// `max_retries` is the number of additional attempts for retriable
    /// errors on read endpoints. Set to `0` to disable retries.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidBaseUrl`] or [`ClientError::Http`].
    pub fn new(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, ClientError> {
        let base_url = origin::parse_base_url(base_url)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            base_url,
            api_token: None,
            max_retries,
            backoff_base_ms,
        })
    }

    #[must_use]
    pub fn with_api_token(mut self, api_token: Option<String>) -> Self {
        self.api_token = api_token;
        self
    }

    /// Fetches one page of products.
    ///
    /// # Errors
    ///
    /// - [`ClientError::RateLimited`]: HTTP 429 after all retries.
    /// - [`ClientError::NotFound`]: HTTP 404.
    /// - [`ClientError::UnexpectedStatus`]: any other non-2xx status.
    /// - [`ClientError::Http`]: network or TLS failure.
    /// - [`ClientError::Deserialize`]: response body does not match.
    pub async fn fetch_products_page(
        &self,
        limit: u32,
        exclude_hidden: bool,
        cursor: Option<&str>,
    ) -> Result<ProductPage, ClientError> {
        let url = self.products_url(limit, exclude_hidden, cursor)?;
        let (response, link_header) = self
            .get_json_with_retry::<WireProductsResponse>(&url, "products page", false)
            .await?;

        let body_cursor = response.next_cursor.clone();
        let next_cursor = resolve_next_cursor(body_cursor, link_header.as_deref());
        let page = normalize_page(response, next_cursor);
        tracing::debug!(
            count = page.products.len(),
            has_more = page.has_more(),
            "fetched products page"
        );
        Ok(page)
    }

    /// Searches products by free-text query.
    ///
    /// # Errors
    ///
    /// Same as [`Self::fetch_products_page`].
    pub async fn search(&self, query: &str) -> Result<Vec<Product>, ClientError> {
        let mut url = self.endpoint("products/search")?;
        url.query_pairs_mut().append_pair("q", query);
        let (response, _) = self
            .get_json_with_retry::<WireProductsResponse>(&url, "product search", false)
            .await?;
        Ok(normalize_page(response, None).products)
    }

    /// Reads the current cart.
    ///
    /// # Errors
    ///
    /// Same as [`Self::fetch_products_page`].
    pub async fn cart(&self) -> Result<Cart, ClientError> {
        let url = self.endpoint("cart")?;
        let (cart, _) = self.get_json_with_retry::<Cart>(&url, "cart", true).await?;
        Ok(cart)
    }

    /// Adds a product to the cart. Sent once; never retried.
    ///
    /// Each call carries a fresh `Idempotency-Key` so the server can discard
    /// replays of the same submission.
    ///
    /// # Errors
    ///
    /// Any non-2xx status or transport failure.
    pub async fn add_item(&self, product_id: &str, quantity: u32) -> Result<(), ClientError> {
        let url = self.endpoint("cart/items")?;
        let body = AddToCartRequest {
            product_id,
            quantity,
        };
        let request = self
            .authorize(self.client.post(url.clone()))
            .header("Idempotency-Key", uuid::Uuid::new_v4().to_string())
            .json(&body);

        let response = request.send().await?;
        Self::check_status(response, &url)?;
        tracing::info!(product_id, quantity, "added product to cart");
        Ok(())
    }

    async fn get_json_with_retry<T: DeserializeOwned>(
        &self,
        url: &Url,
        context: &'static str,
        authed: bool,
    ) -> Result<(T, Option<String>), ClientError> {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || async move {
            let mut request = self
                .client
                .get(url.clone())
                .header(reqwest::header::ACCEPT, "application/json");
            if authed {
                request = self.authorize(request);
            }

            let response = Self::check_status(request.send().await?, url)?;

            // Extract the Link header before consuming the response body.
            let link_header = response
                .headers()
                .get(reqwest::header::LINK)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned);

            let body = response.text().await?;
            let parsed = serde_json::from_str::<T>(&body).map_err(|e| ClientError::Deserialize {
                context: format!("{context} from {url}"),
                source: e,
            })?;
            Ok::<_, ClientError>((parsed, link_header))
        })
        .await
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn check_status(response: Response, url: &Url) -> Result<Response, ClientError> {
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
            return Err(ClientError::RateLimited {
                host: origin::extract_host(url),
                retry_after_secs,
            });
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound {
                url: url.to_string(),
            });
        }

        if !status.is_success() {
            return Err(ClientError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response)
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: format!("cannot join \"{path}\": {e}"),
            })
    }

    /// Builds the listing URL for the given page size, hidden filter, and
    /// optional cursor.
    fn products_url(
        &self,
        limit: u32,
        exclude_hidden: bool,
        cursor: Option<&str>,
    ) -> Result<Url, ClientError> {
        let mut url = self.endpoint("products")?;
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string())
            .append_pair("excludeHidden", if exclude_hidden { "true" } else { "false" });
        if let Some(cursor) = cursor {
            url.query_pairs_mut().append_pair("cursor", cursor);
        }
        Ok(url)
    }
}

impl StoreApi for StoreClient {
    async fn list_products(
        &self,
        limit: u32,
        exclude_hidden: bool,
        cursor: Option<&str>,
    ) -> Result<ProductPage, ClientError> {
        self.fetch_products_page(limit, exclude_hidden, cursor).await
    }

    async fn search_products(&self, query: &str) -> Result<Vec<Product>, ClientError> {
        self.search(query).await
    }

    async fn fetch_cart(&self) -> Result<Cart, ClientError> {
        self.cart().await
    }

    async fn add_to_cart(&self, product_id: &str, quantity: u32) -> Result<(), ClientError> {
        self.add_item(product_id, quantity).await
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
