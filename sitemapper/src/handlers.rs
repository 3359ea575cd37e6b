use anyhow::{Context, Result, anyhow};
use clap::ArgMatches;
use colored::Colorize;
use sitemapper_core::{CrawlOptions, SitemapBuilder, SitemapFormat, execute_crawl};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;
use url::Url;

/// Install the log subscriber. Logs go to stderr so stdout carries only the sitemap.
/// `RUST_LOG` takes precedence over `quiet`.
pub fn init_tracing(quiet: bool) {
    let default_level = if quiet { "warn" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A subscriber may already be installed (tests), which is fine
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// Build crawl options from the parsed command line
pub fn crawl_options_from_matches(args: &ArgMatches) -> Result<CrawlOptions> {
    let url = args
        .get_one::<Url>("URL")
        .ok_or_else(|| anyhow!("A seed URL is required"))?;

    let mut options = CrawlOptions::new(url.as_str());
    options.threads = args.get_one::<usize>("threads").copied().unwrap_or(1);
    options.timeout_secs = args.get_one::<u64>("timeout").copied().unwrap_or(10);
    options.max_pages = args.get_one::<usize>("max-pages").copied();
    options.show_progress = args.get_flag("progress");
    Ok(options)
}

pub fn sitemap_format_from_matches(args: &ArgMatches) -> SitemapFormat {
    args.get_one::<String>("format")
        .and_then(|f| SitemapFormat::from_str(f))
        .unwrap_or(SitemapFormat::Xml)
}

/// Expand a leading `~` in a user-supplied output path
pub fn resolve_output_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).as_ref())
}

/// Write the rendered document to `output`, or to stdout when no path is given
pub fn write_document(document: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => fs::write(path, document)
            .with_context(|| format!("Failed to write sitemap to {}", path.display())),
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(document.as_bytes())
                .and_then(|_| stdout.flush())
                .context("Failed to write sitemap to stdout")
        }
    }
}

pub fn summary_line(builder: &SitemapBuilder) -> String {
    let links: usize = builder.pages().iter().map(|p| p.links.len()).sum();
    let assets: usize = builder.pages().iter().map(|p| p.assets.len()).sum();
    format!(
        "{} Crawl complete: {} pages, {} links, {} assets",
        "✓".green().bold(),
        builder.len(),
        links,
        assets
    )
}

pub async fn handle_crawl(args: &ArgMatches) -> Result<()> {
    let quiet = args.get_flag("quiet");
    init_tracing(quiet);

    let options = crawl_options_from_matches(args)?;
    let format = sitemap_format_from_matches(args);
    let output = args
        .get_one::<String>("output")
        .map(|raw| resolve_output_path(raw));

    info!(
        "Crawling {} with {} workers (timeout {}s)",
        options.url, options.threads, options.timeout_secs
    );

    let builder = execute_crawl(options).await?;
    let document = builder
        .render(format)
        .context("Failed to render sitemap")?;
    write_document(&document, output.as_deref())?;

    if !quiet {
        eprintln!("{}", summary_line(&builder));
    }
    if let Some(path) = output {
        info!("Sitemap written to {}", path.display());
    }
    Ok(())
}
