//! Cursor extraction from `next` links
//!
//! Collections describe the following page as `{"href": ..., "start": ...}`.
//! The token is opaque and is passed back verbatim.

use url::Url;

/// Query parameter that carries the cursor
pub const START_PARAM: &str = "start";

/// Resolve the cursor for the next request.
///
/// Prefers an explicit `start` value; otherwise reads the `start` query
/// parameter of `href`. Empty values count as absent.
pub fn next_start(href: Option<&str>, start: Option<&str>) -> Option<String> {
    if let Some(start) = start.filter(|s| !s.is_empty()) {
        return Some(start.to_string());
    }

    href.and_then(start_from_href)
}

/// Read the `start` query parameter from an absolute or relative URL
pub fn start_from_href(href: &str) -> Option<String> {
    if href.is_empty() {
        return None;
    }

    let url = match Url::parse(href) {
        Ok(url) => url,
        // relative links such as "/v1/projects?start=x"
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            Url::parse("http://localhost/").ok()?.join(href).ok()?
        }
        Err(_) => return None,
    };

    url.query_pairs()
        .find(|(key, _)| key == START_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}
