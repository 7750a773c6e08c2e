//! Base URL handling for the store client.

use reqwest::Url;

use crate::error::ClientError;

/// Parses the API base URL, forcing exactly one trailing slash so that
/// relative endpoint paths join under it instead of replacing its last
/// segment.
pub(super) fn parse_base_url(base_url: &str) -> Result<Url, ClientError> {
    let normalised = format!("{}/", base_url.trim_end_matches('/'));
    let url = Url::parse(&normalised).map_err(|e| ClientError::InvalidBaseUrl {
        base_url: base_url.to_owned(),
        reason: e.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(ClientError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: "URL cannot be used as a base".to_owned(),
        });
    }
    Ok(url)
}

/// Extracts the hostname from a URL for use in error messages.
///
/// Falls back to the full URL string if it has no host.
pub(super) fn extract_host(url: &Url) -> String {
    url.host_str()
        .map_or_else(|| url.as_str().to_owned(), str::to_owned)
}
