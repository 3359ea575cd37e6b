use crate::canon;
use crate::result::Page;
use crate::scope::Scope;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;
use url::Url;

// Attribute-value scans rather than a DOM parse: they keep working on broken markup.
static LINK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<a.*?href="([^"]*)".*?>"#).expect("link pattern is valid"));
static ASSET_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<link.*?href="([^"]*)".*?>"#).expect("asset pattern is valid"));

/// What one page body yielded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// In-scope links this page was the first to claim, in document order.
    pub links: Vec<Url>,
    /// Every resolvable asset reference, in document order, unfiltered.
    pub assets: Vec<Url>,
    /// Raw anchor matches before resolution and filtering.
    pub link_matches: usize,
}

impl Extraction {
    /// Pages without a single anchor match are left out of the sitemap, even when
    /// they reference assets.
    pub fn into_page(self, location: Url) -> Option<Page> {
        if self.link_matches == 0 {
            return None;
        }
        Some(Page::new(location).with_links(self.links).with_assets(self.assets))
    }
}

/// Raw `href` values captured by `pattern`, in order of appearance.
fn captures<'a>(pattern: &Regex, body: &'a str) -> Vec<&'a str> {
    pattern
        .captures_iter(body)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect()
}

/// Scan `body` for anchors and `<link>` elements.
///
/// Every link that survives resolution and scoping is marked visited through
/// `scope` before this returns, so the caller may enqueue the result directly.
pub fn extract(page_url: &Url, body: &str, scope: &Scope) -> Extraction {
    let raw_links = captures(&LINK_PATTERN, body);
    let raw_assets = captures(&ASSET_PATTERN, body);

    let mut links = Vec::new();
    for href in &raw_links {
        let Some(absolute) = canon::resolve(page_url, href) else {
            debug!("Dropping unresolvable link {:?} on {}", href, page_url);
            continue;
        };
        if scope.should_visit(&absolute) {
            debug!("  -> New in-scope link {}", absolute);
            links.push(absolute);
        }
    }

    let assets = raw_assets
        .iter()
        .filter_map(|href| canon::resolve(page_url, href))
        .collect();

    Extraction {
        links,
        assets,
        link_matches: raw_links.len(),
    }
}
