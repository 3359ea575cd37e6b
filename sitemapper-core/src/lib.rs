pub mod crawl;
pub mod error;
pub mod sitemap;

pub use crawl::{CrawlOptions, execute_crawl, execute_crawl_with, extract_url_path};
pub use error::CrawlError;
pub use sitemap::{SitemapBuilder, SitemapFormat};
pub use sitemapper_scanner::Page;
