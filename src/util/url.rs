//! URL syntax check and href preparation
//!
//! Purely syntactic: nothing here resolves hosts or touches the network.

use std::sync::OnceLock;

use regex::{Regex, RegexBuilder};

/// Optional http(s) scheme, a dotted host with a 2+ letter TLD or an IPv4
/// quad, then optional port, path, query and fragment. Compiled ASCII-only:
/// `\d` is `[0-9]` and case folding never reaches non-ASCII letters.
const URL_PATTERN: &str = concat!(
    r"^(https?://)?",
    r"((([a-z\d]([a-z\d-]*[a-z\d])*)\.)+[a-z]{2,}|",
    r"((\d{1,3}\.){3}\d{1,3}))",
    r"(:\d+)?(/[-a-z\d%_.~+]*)*",
    r"(\?[;&a-z\d%_.~+=-]*)?",
    r"(#[-a-z\d_]*)?$",
);

fn url_regex() -> &'static Regex {
    static URL_RE: OnceLock<Regex> = OnceLock::new();
    URL_RE.get_or_init(|| {
        RegexBuilder::new(URL_PATTERN)
            .case_insensitive(true)
            .unicode(false)
            .build()
            .expect("URL pattern is a valid regex")
    })
}

/// Whether `url` is acceptable as a link target
///
/// With `validate` off every string passes, including the empty one.
pub fn is_valid(url: &str, validate: bool) -> bool {
    if !validate {
        return true;
    }
    url_regex().is_match(url)
}

/// Normalize user input into an href
///
/// Trims whitespace and prepends `http://` unless the link already names a
/// scheme or is internal (`/path`), an anchor (`#id`) or protocol-relative
/// (`//host`).
pub fn prepare_link(url: &str) -> String {
    let link = url.trim();
    if link.is_empty() || has_scheme(link) || link.starts_with('/') || link.starts_with('#') {
        return link.to_string();
    }
    format!("http://{}", link)
}

/// `scheme:` prefix per RFC 3986 (`mailto:`, `tel:`, `https://` ...)
fn has_scheme(link: &str) -> bool {
    let Some((scheme, _)) = link.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        // "example.com:8080" is a host with a port, not a scheme
        && !scheme.contains('.')
}
