// URL identity keys and domain extraction

use url::Url;

/// Reduce a URL to its last path segment, ignoring query, fragment and a
/// trailing slash. Returns `None` when there is no segment to key on.
pub fn normalize_url(url: &str) -> Option<String> {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    let trimmed = &url[..end];
    let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);

    match trimmed.rsplit('/').next() {
        Some(segment) if !segment.is_empty() => Some(segment.to_string()),
        _ => None,
    }
}

/// The authority of a URL: host, plus the port when one is given explicitly.
/// Hosts come back lowercased and userinfo is dropped, so `EXT.com` and
/// `ext.com` key the same domain node.
pub fn extract_domain(href: &str) -> Option<String> {
    let parsed = Url::parse(href).ok()?;
    let host = parsed.host_str()?;

    Some(match parsed.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}
