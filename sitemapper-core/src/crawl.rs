use crate::error::{CrawlError, Result};
use crate::sitemap::SitemapBuilder;
use indicatif::{ProgressBar, ProgressStyle};
use sitemapper_scanner::{Crawler, Fetcher, HttpFetcher, ProgressCallback};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use url::Url;

/// Options for configuring a crawl operation
#[derive(Debug, Clone)]
pub struct CrawlOptions {
    pub url: String,
    pub threads: usize,
    pub max_pages: Option<usize>,
    pub timeout_secs: u64,
    pub show_progress: bool,
}

impl CrawlOptions {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            threads: 1,
            max_pages: None,
            timeout_secs: 10,
            show_progress: false,
        }
    }
}

/// Path shown on the spinner for `url`; unparseable input is shown as is.
pub fn extract_url_path(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) if !parsed.path().is_empty() => parsed.path().to_string(),
        Ok(_) => "/".to_string(),
        Err(_) => url.to_string(),
    }
}

/// Crawl `options.url` over HTTP and collect the sitemap.
pub async fn execute_crawl(options: CrawlOptions) -> Result<SitemapBuilder> {
    let fetcher = HttpFetcher::with_timeout(options.timeout_secs)?;
    execute_crawl_with(options, Arc::new(fetcher)).await
}

/// Like [`execute_crawl`], but with a caller-supplied fetcher.
pub async fn execute_crawl_with(
    options: CrawlOptions,
    fetcher: Arc<dyn Fetcher>,
) -> Result<SitemapBuilder> {
    let CrawlOptions {
        url,
        threads,
        max_pages,
        show_progress,
        ..
    } = options;

    if threads == 0 {
        return Err(CrawlError::InvalidOption(
            "threads must be at least 1".to_string(),
        ));
    }

    // Spinner draws on stderr, away from the document on stdout
    let progress_bar = if show_progress {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            pb.set_style(style);
        }
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message("Starting crawl...");
        Some(pb)
    } else {
        None
    };

    let mut crawler = Crawler::new(fetcher)
        .with_workers(threads)
        .with_max_pages(max_pages);

    if let Some(ref pb) = progress_bar {
        let pb = pb.clone();
        let callback: ProgressCallback = Arc::new(move |count: usize, url: &Url| {
            pb.set_message(format!(
                "Crawling... {} URLs dispatched, now {}",
                count,
                extract_url_path(url.as_str())
            ));
        });
        crawler = crawler.with_progress_callback(callback);
    }

    let result = crawler.crawl(&url).await;

    if let Some(ref pb) = progress_bar {
        pb.finish_and_clear();
    }

    let mut builder = SitemapBuilder::new();
    for page in result? {
        builder.append(page);
    }

    info!(
        "Sitemap holds {} pages out of {} visited URLs",
        builder.len(),
        crawler.visited_count()
    );
    Ok(builder)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_defaults() {
        let options = CrawlOptions::new("http://example.com/");
        assert_eq!(options.threads, 1);
        assert_eq!(options.max_pages, None);
        assert_eq!(options.timeout_secs, 10);
        assert!(!options.show_progress);
    }
}
