//! Cursor pagination for the catalog listing.
//!
//! The listing endpoint reports the next page's cursor in the response body
//! (`nextCursor`). Deployments behind the legacy gateway drop that field and
//! send an RFC 8288 `Link` header instead:
//!
//! ```text
//! <https://api.brewmart.test/products?limit=3&cursor=CURSOR>; rel="next"
//! ```
//!
//! [`resolve_next_cursor`] prefers the body and falls back to the header.

/// Query parameter carrying the cursor in `Link` URLs.
const CURSOR_PARAM: &str = "cursor";

/// Picks the next-page cursor from the body field or the `Link` header.
///
/// An empty body cursor counts as absent.
#[must_use]
pub fn resolve_next_cursor(body_cursor: Option<String>, link_header: Option<&str>) -> Option<String> {
    body_cursor
        .filter(|c| !c.is_empty())
        .or_else(|| extract_next_cursor(link_header))
}

/// Parses a `Link` header value and extracts the cursor of the `rel="next"`
/// target.
///
/// Returns `None` if the header is absent, has no `rel="next"` segment, or
/// the next URL carries no `cursor` parameter.
#[must_use]
pub fn extract_next_cursor(link_header: Option<&str>) -> Option<String> {
    let header = link_header?;

    for segment in header.split(',') {
        let segment = segment.trim();

        if !segment.contains(r#"rel="next""#) {
            continue;
        }

        let url = extract_angle_bracket_url(segment)?;
        return extract_query_param(url, CURSOR_PARAM);
    }

    None
}

/// Extracts the URL between `<` and `>` in a link directive segment.
fn extract_angle_bracket_url(segment: &str) -> Option<&str> {
    let start = segment.find('<')? + 1;
    let end = segment.find('>')?;
    if start >= end {
        return None;
    }
    Some(&segment[start..end])
}

/// Extracts the value of a named query parameter from a URL string.
///
/// Cursors are opaque base64url tokens, so no percent-decoding is applied.
fn extract_query_param(url: &str, param: &str) -> Option<String> {
    let query_start = url.find('?')? + 1;
    let query = &url[query_start..];

    let needle = format!("{param}=");
    for pair in query.split('&') {
        if let Some(value) = pair.strip_prefix(needle.as_str()) {
            let value = value.split('#').next().unwrap_or(value);
            if !value.is_empty() {
                return Some(value.to_owned());
            }
        }
    }
    None
}
