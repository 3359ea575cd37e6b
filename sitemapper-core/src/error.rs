use sitemapper_scanner::ScanError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrawlError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error("Invalid crawl option: {0}")]
    InvalidOption(String),
}

pub type Result<T> = std::result::Result<T, CrawlError>;
