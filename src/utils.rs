use url::Url;

/// Resolve an `href` found on `base`
///
/// Absolute addresses are returned unchanged so the row keeps the link exactly
/// as published. Relative ones are joined onto `base`.
pub fn resolve_link(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    if Url::parse(href).is_ok() {
        return Some(href.to_string());
    }
    base.join(href).ok().map(|u| u.to_string())
}
