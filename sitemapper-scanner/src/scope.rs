use crate::error::{Result, ScanError};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use url::Url;

/// The last two dot-separated labels of a host (`a.b.example.com` -> `example.com`).
///
/// Public suffixes with more than one label (`co.uk`) are not special-cased, so every
/// `*.co.uk` host shares one domain. Hosts with fewer than two labels are returned as-is.
pub fn registrable_domain(host: &str) -> String {
    let labels: Vec<&str> = host.split('.').collect();
    let start = labels.len().saturating_sub(2);
    labels[start..].join(".")
}

/// URLs already enqueued or fetched during one crawl, keyed by canonical form.
///
/// Cloning yields another handle onto the same set.
#[derive(Debug, Clone, Default)]
pub struct VisitedSet {
    inner: Arc<Mutex<HashSet<String>>>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `url`, returning true only for the caller that inserted it first.
    pub fn mark(&self, url: &Url) -> bool {
        self.lock().insert(url.as_str().to_string())
    }

    pub fn contains(&self, url: &Url) -> bool {
        self.lock().contains(url.as_str())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashSet<String>> {
        // A panic while holding the lock cannot leave a HashSet half-inserted.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Restricts a crawl to the registrable domain of its seed.
#[derive(Debug, Clone)]
pub struct Scope {
    domain: String,
    visited: VisitedSet,
}

impl Scope {
    pub fn new(seed: &Url, visited: VisitedSet) -> Result<Self> {
        let host = seed
            .host_str()
            .filter(|host| !host.is_empty())
            .ok_or_else(|| ScanError::InvalidUrl(format!("Seed URL has no host: {}", seed)))?;

        Ok(Self {
            domain: registrable_domain(host),
            visited,
        })
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn visited(&self) -> &VisitedSet {
        &self.visited
    }

    pub fn in_scope(&self, url: &Url) -> bool {
        url.host_str()
            .is_some_and(|host| registrable_domain(host) == self.domain)
    }

    /// Check-and-mark in one step: true when `url` is in scope and nobody has
    /// claimed it yet. A true result means the caller now owns enqueueing it.
    pub fn should_visit(&self, url: &Url) -> bool {
        self.in_scope(url) && self.visited.mark(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_registrable_domain_subdomains() {
        assert_eq!(registrable_domain("a.b.example.com"), "example.com");
        assert_eq!(registrable_domain("www.example.com"), "example.com");
        assert_eq!(registrable_domain("example.com"), "example.com");
    }

    #[test]
    fn test_registrable_domain_single_label() {
        assert_eq!(registrable_domain("localhost"), "localhost");
    }

    #[test]
    fn test_registrable_domain_multi_label_suffix_is_not_special() {
        assert_eq!(registrable_domain("shop.example.co.uk"), "co.uk");
    }

    #[test]
    fn test_scope_accepts_subdomains() {
        let scope = Scope::new(&url("http://www.example.com/"), VisitedSet::new()).unwrap();
        assert_eq!(scope.domain(), "example.com");
        assert!(scope.in_scope(&url("https://blog.example.com/post")));
        assert!(scope.in_scope(&url("http://example.com:8080/")));
        assert!(!scope.in_scope(&url("http://other.com/x")));
        assert!(!scope.in_scope(&url("http://example.com.evil.net/")));
    }

    #[test]
    fn test_in_scope_is_pure() {
        let scope = Scope::new(&url("http://example.com/"), VisitedSet::new()).unwrap();
        let candidate = url("http://example.com/a");
        assert!(scope.in_scope(&candidate));
        assert!(scope.in_scope(&candidate));
        assert!(scope.visited().is_empty());
    }

    #[test]
    fn test_should_visit_marks_once() {
        let scope = Scope::new(&url("http://example.com/"), VisitedSet::new()).unwrap();
        let candidate = url("http://example.com/a");
        assert!(scope.should_visit(&candidate));
        assert!(!scope.should_visit(&candidate));
        assert!(scope.visited().contains(&candidate));
        assert_eq!(scope.visited().len(), 1);
    }

    #[test]
    fn test_should_visit_rejects_out_of_scope_without_marking() {
        let scope = Scope::new(&url("http://example.com/"), VisitedSet::new()).unwrap();
        assert!(!scope.should_visit(&url("http://other.com/")));
        assert!(scope.visited().is_empty());
    }

    #[test]
    fn test_seed_without_host_is_rejected() {
        let result = Scope::new(&url("mailto:a@example.com"), VisitedSet::new());
        assert!(matches!(result, Err(ScanError::InvalidUrl(_))));
    }

    #[test]
    fn test_concurrent_marks_accept_exactly_one() {
        let visited = VisitedSet::new();
        let candidate = url("http://example.com/shared");

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let visited = visited.clone();
                let candidate = candidate.clone();
                std::thread::spawn(move || visited.mark(&candidate))
            })
            .collect();

        let accepted = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|won| *won)
            .count();
        assert_eq!(accepted, 1);
    }
}
