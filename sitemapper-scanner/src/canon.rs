use url::{ParseError, Url};

/// Resolve `candidate` against `base` into a canonical absolute URL.
///
/// Absolute candidates are kept as parsed, relative ones are joined onto `base`.
/// The fragment is always dropped so that two references to the same document
/// compare equal. Returns `None` for unparseable input and for anything that ends
/// up without a host (`mailto:`, `javascript:`, `data:` ...).
///
/// Parsing follows the WHATWG URL rules, so a special scheme with a missing slash
/// such as `http:/rel` is read as `http://rel/` rather than rejected.
pub fn resolve(base: &Url, candidate: &str) -> Option<Url> {
    let mut url = match Url::parse(candidate) {
        Ok(url) => url,
        Err(ParseError::RelativeUrlWithoutBase) => base.join(candidate).ok()?,
        Err(_) => return None,
    };

    if !is_valid(&url) {
        return None;
    }

    url.set_fragment(None);
    Some(url)
}

/// A resolved URL is only usable when it carries a non-empty host.
pub fn is_valid(url: &Url) -> bool {
    url.host_str().is_some_and(|host| !host.is_empty())
}
