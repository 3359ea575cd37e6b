// Sitemap document accumulation and rendering

use serde::{Deserialize, Serialize};
use sitemapper_scanner::Page;
use url::Url;

const INDENT: &str = "  ";
const XML_HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
const URLSET_OPEN: &str = r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#;
const URLSET_CLOSE: &str = "</urlset>";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SitemapFormat {
    Xml,
    Json,
}

impl SitemapFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "xml" => Some(SitemapFormat::Xml),
            "json" => Some(SitemapFormat::Json),
            _ => None,
        }
    }
}

#[derive(Serialize)]
struct SitemapDocument<'a> {
    pages: &'a [Page],
}

/// Collects pages in fetch order and renders them once the crawl is over.
#[derive(Debug, Clone, Default)]
pub struct SitemapBuilder {
    pages: Vec<Page>,
}

impl SitemapBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, page: Page) {
        self.pages.push(page);
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn render(&self, format: SitemapFormat) -> serde_json::Result<String> {
        match format {
            SitemapFormat::Xml => Ok(self.serialize()),
            SitemapFormat::Json => self.to_json(),
        }
    }

    /// XML sitemap: one `<url>` per page holding `<loc>`, `<links>` and `<assets>`.
    /// Both collections are written even when empty.
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        out.push_str(XML_HEADER);
        out.push('\n');
        out.push_str(URLSET_OPEN);
        out.push('\n');

        for page in &self.pages {
            push_line(&mut out, 1, "<url>");
            push_element(&mut out, 2, "loc", &page.location);
            push_section(&mut out, "links", "link", &page.links);
            push_section(&mut out, "assets", "asset", &page.assets);
            push_line(&mut out, 1, "</url>");
        }

        out.push_str(URLSET_CLOSE);
        out.push('\n');
        out
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&SitemapDocument { pages: &self.pages })
    }
}

impl From<Vec<Page>> for SitemapBuilder {
    fn from(pages: Vec<Page>) -> Self {
        Self { pages }
    }
}

fn push_line(out: &mut String, depth: usize, line: &str) {
    out.push_str(&INDENT.repeat(depth));
    out.push_str(line);
    out.push('\n');
}

fn push_element(out: &mut String, depth: usize, tag: &str, url: &Url) {
    let text = html_escape::encode_text(url.as_str());
    push_line(out, depth, &format!("<{tag}>{text}</{tag}>"));
}

fn push_section(out: &mut String, section: &str, tag: &str, urls: &[Url]) {
    push_line(out, 2, &format!("<{section}>"));
    for url in urls {
        push_element(out, 3, tag, url);
    }
    push_line(out, 2, &format!("</{section}>"));
}
