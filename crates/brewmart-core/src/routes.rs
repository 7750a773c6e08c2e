use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// Characters escaped in a path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Client-side route for a product detail page, e.g. `/product/42`.
#[must_use]
pub fn product_route(product_id: &str) -> String {
    format!("/product/{}", utf8_percent_encode(product_id, PATH_SEGMENT))
}
