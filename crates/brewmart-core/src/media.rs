//! Image reference resolution for product cards.
//!
//! Product metadata may reference an image by plain URL or by content
//! identifier. Content identifiers are rewritten onto the configured public
//! gateway; everything else passes through untouched.

/// Asset shown when a product carries no usable image reference.
pub const DEFAULT_IMAGE_PATH: &str = "/images/coffee-default.png";

const CID_V0_PREFIX: &str = "Qm";
const IPFS_SCHEME: &str = "ipfs://";

/// Resolves a metadata image reference to a displayable URL.
///
/// - `"Qm..."` becomes `{gateway}/ipfs/{value}`.
/// - `"ipfs://{cid}"` becomes `{gateway}/ipfs/{cid}`.
/// - Any other non-empty string is returned unchanged.
/// - `None` or a blank string yields [`DEFAULT_IMAGE_PATH`].
#[must_use]
pub fn resolve_image(image: Option<&str>, gateway_base: &str) -> String {
    let Some(image) = image.map(str::trim).filter(|s| !s.is_empty()) else {
        return DEFAULT_IMAGE_PATH.to_string();
    };

    let gateway = gateway_base.trim_end_matches('/');

    if image.starts_with(CID_V0_PREFIX) {
        return format!("{gateway}/ipfs/{image}");
    }

    if let Some(cid) = image.strip_prefix(IPFS_SCHEME) {
        let cid = cid.trim_start_matches("ipfs/");
        if !cid.is_empty() {
            return format!("{gateway}/ipfs/{cid}");
        }
        return DEFAULT_IMAGE_PATH.to_string();
    }

    image.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const GATEWAY: &str = "https://ipfs.io";

    #[test]
    fn cid_v0_is_rewritten_to_gateway() {
        assert_eq!(
            resolve_image(Some("QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG"), GATEWAY),
            "https://ipfs.io/ipfs/QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG"
        );
    }

    #[test]
    fn gateway_trailing_slash_is_not_doubled() {
        assert_eq!(
            resolve_image(Some("QmAbc"), "https://gateway.example/"),
            "https://gateway.example/ipfs/QmAbc"
        );
    }

    #[test]
    fn ipfs_scheme_is_rewritten_to_gateway() {
        assert_eq!(
            resolve_image(Some("ipfs://bafybeigdyrzt"), GATEWAY),
            "https://ipfs.io/ipfs/bafybeigdyrzt"
        );
        assert_eq!(
            resolve_image(Some("ipfs://ipfs/bafybeigdyrzt"), GATEWAY),
            "https://ipfs.io/ipfs/bafybeigdyrzt"
        );
    }

    #[test]
    fn plain_url_is_unchanged() {
        let url = "https://cdn.brewmart.test/beans/kenya-aa.jpg";
        assert_eq!(resolve_image(Some(url), GATEWAY), url);
    }

    #[test]
    fn relative_path_is_unchanged() {
        assert_eq!(
            resolve_image(Some("/static/sumatra.png"), GATEWAY),
            "/static/sumatra.png"
        );
    }

    #[test]
    fn missing_image_falls_back_to_default() {
        assert_eq!(resolve_image(None, GATEWAY), DEFAULT_IMAGE_PATH);
        assert_eq!(resolve_image(Some(""), GATEWAY), DEFAULT_IMAGE_PATH);
        assert_eq!(resolve_image(Some("  "), GATEWAY), DEFAULT_IMAGE_PATH);
        assert_eq!(resolve_image(Some("ipfs://"), GATEWAY), DEFAULT_IMAGE_PATH);
    }
}
