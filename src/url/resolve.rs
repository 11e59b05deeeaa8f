use crate::UrlError;
use url::Url;

/// Resolves a link reference against the URL of the page it appeared on
///
/// Standard URL joining applies: scheme-relative (`//host/x`), path-relative
/// (`x`, `../x`), absolute-path (`/x`) and fragment-only (`#x`) references all
/// come back in absolute form. Absolute references are returned as parsed.
///
/// # Arguments
///
/// * `base` - The page URL
/// * `reference` - The raw `href` or `src` attribute value
///
/// # Returns
///
/// * `Ok(Url)` - The absolute URL
/// * `Err(UrlError)` - The reference cannot be joined
///
/// # Examples
///
/// ```
/// use url::Url;
/// use page_harvest::url::resolve;
///
/// let base = Url::parse("https://x.com/b/c").unwrap();
/// assert_eq!(resolve(&base, "/a").unwrap().as_str(), "https://x.com/a");
/// assert_eq!(resolve(&base, "d").unwrap().as_str(), "https://x.com/b/d");
/// ```
pub fn resolve(base: &Url, reference: &str) -> Result<Url, UrlError> {
    base.join(reference)
        .map_err(|e| UrlError::Parse(format!("{}: {}", reference, e)))
}

/// Resolves a reference, falling back to the raw value when joining fails
///
/// Extracted records keep every link, so an unjoinable reference is kept as
/// written and later rejected by [`crate::url::is_crawlable`].
pub fn resolve_or_raw(base: &Url, reference: &str) -> String {
    match resolve(base, reference) {
        Ok(url) => url.to_string(),
        Err(e) => {
            tracing::debug!("Keeping unresolvable reference as-is: {}", e);
            reference.to_string()
        }
    }
}
