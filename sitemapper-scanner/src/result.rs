use serde::{Deserialize, Serialize};
use url::Url;

/// One fetched page: its own location, the same-domain links it introduced to the
/// crawl, and every asset it references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub location: Url,
    pub links: Vec<Url>,
    pub assets: Vec<Url>,
}

impl Page {
    pub fn new(location: Url) -> Self {
        Self {
            location,
            links: Vec::new(),
            assets: Vec::new(),
        }
    }

    pub fn with_links(mut self, links: Vec<Url>) -> Self {
        self.links = links;
        self
    }

    pub fn with_assets(mut self, assets: Vec<Url>) -> Self {
        self.assets = assets;
        self
    }
}
