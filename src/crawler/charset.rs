//! Character encoding detection for response bodies
//!
//! The encoding is taken from, in order:
//! - A byte order mark at the start of the body
//! - The `charset` parameter of the `Content-Type` header
//! - A `<meta charset>` or `<meta http-equiv>` declaration near the top of the body
//! - UTF-8

use encoding_rs::{Encoding, UTF_8};

/// How far into the body a `<meta>` declaration is searched for
const PRESCAN_LIMIT: usize = 1024;

/// Decodes a response body into text
///
/// # Arguments
///
/// * `body` - Raw response bytes
/// * `content_type` - The `Content-Type` header value, if any
pub fn decode_body(body: &[u8], content_type: Option<&str>) -> String {
    let encoding = content_type
        .and_then(charset_from_content_type)
        .or_else(|| prescan_meta_charset(body))
        .unwrap_or(UTF_8);

    // `decode` lets a BOM override the chosen encoding
    let (text, used, had_errors) = encoding.decode(body);
    if had_errors {
        tracing::debug!("Body contained bytes invalid in {}", used.name());
    }
    text.into_owned()
}

/// Reads the `charset` parameter of a `Content-Type` value
pub fn charset_from_content_type(content_type: &str) -> Option<&'static Encoding> {
    content_type
        .split(';')
        .skip(1)
        .filter_map(|param| param.split_once('='))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("charset"))
        .and_then(|(_, value)| Encoding::for_label(value.trim().trim_matches('"').as_bytes()))
}

/// Looks for a charset declared by a `<meta>` tag in the first bytes of a document
///
/// UTF-16 declarations are treated as UTF-8, as browsers do.
pub fn prescan_meta_charset(body: &[u8]) -> Option<&'static Encoding> {
    let head = &body[..body.len().min(PRESCAN_LIMIT)];
    let lower = head.to_ascii_lowercase();

    let mut offset = 0;
    while let Some(found) = find(&lower[offset..], b"<meta") {
        let tag_start = offset + found + b"<meta".len();
        let tag_end = find(&lower[tag_start..], b">")
            .map(|end| tag_start + end)
            .unwrap_or(lower.len());
        let tag = &lower[tag_start..tag_end];

        if let Some(encoding) = charset_in_tag(tag) {
            return Some(encoding.output_encoding());
        }
        offset = tag_end;
    }

    None
}

/// Extracts the label following `charset=` inside one lowercased tag
fn charset_in_tag(tag: &[u8]) -> Option<&'static Encoding> {
    let start = find(tag, b"charset")? + b"charset".len();
    let rest = skip_whitespace(&tag[start..]);
    let rest = skip_whitespace(rest.strip_prefix(b"=")?);
    let rest = rest
        .strip_prefix(b"\"")
        .or_else(|| rest.strip_prefix(b"'"))
        .unwrap_or(rest);

    let end = rest
        .iter()
        .position(|b| matches!(b, b'"' | b'\'' | b';' | b'/' | b' ' | b'\t' | b'\n' | b'\r'))
        .unwrap_or(rest.len());

    Encoding::for_label(&rest[..end])
}

fn skip_whitespace(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    &bytes[start..]
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
