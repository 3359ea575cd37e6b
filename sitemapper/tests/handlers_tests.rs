use sitemapper::handlers::*;
use sitemapper::command_argument_builder;
use sitemapper_core::{SitemapBuilder, SitemapFormat};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_seed_is_the_only_required_argument() {
    let matches = command_argument_builder()
        .try_get_matches_from(["sitemapper", "http://example.com/"])
        .unwrap();
    let options = crawl_options_from_matches(&matches).unwrap();

    assert_eq!(options.url, "http://example.com/");
    assert_eq!(options.threads, 1);
    assert_eq!(options.timeout_secs, 10);
    assert_eq!(options.max_pages, None);
    assert!(!options.show_progress);
    assert_eq!(sitemap_format_from_matches(&matches), SitemapFormat::Xml);
}

#[test]
fn test_missing_seed_is_rejected() {
    let result = command_argument_builder().try_get_matches_from(["sitemapper"]);
    assert!(result.is_err());
}

#[test]
fn test_relative_seed_is_rejected() {
    let result = command_argument_builder().try_get_matches_from(["sitemapper", "/about"]);
    assert!(result.is_err());
}

#[test]
fn test_all_options() {
    let matches = command_argument_builder()
        .try_get_matches_from([
            "sitemapper",
            "https://example.com",
            "-t",
            "8",
            "--timeout",
            "3",
            "--max-pages",
            "50",
            "-f",
            "json",
            "-p",
        ])
        .unwrap();
    let options = crawl_options_from_matches(&matches).unwrap();

    assert_eq!(options.url, "https://example.com/");
    assert_eq!(options.threads, 8);
    assert_eq!(options.timeout_secs, 3);
    assert_eq!(options.max_pages, Some(50));
    assert!(options.show_progress);
    assert_eq!(sitemap_format_from_matches(&matches), SitemapFormat::Json);
}

#[test]
fn test_unknown_format_is_rejected() {
    let result = command_argument_builder().try_get_matches_from([
        "sitemapper",
        "https://example.com",
        "--format",
        "csv",
    ]);
    assert!(result.is_err());
}

#[test]
fn test_resolve_output_path_plain() {
    assert_eq!(
        resolve_output_path("out/sitemap.xml"),
        std::path::PathBuf::from("out/sitemap.xml")
    );
}

#[test]
fn test_resolve_output_path_expands_tilde() {
    let resolved = resolve_output_path("~/sitemap.xml");
    assert!(!resolved.to_string_lossy().starts_with('~'));
    assert!(resolved.ends_with("sitemap.xml"));
}

#[test]
fn test_write_document_to_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("sitemap.xml");
    let document = SitemapBuilder::new().serialize();

    write_document(&document, Some(path.as_path()))?;

    assert_eq!(fs::read_to_string(&path)?, document);
    Ok(())
}

#[test]
fn test_write_document_to_missing_directory_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing").join("sitemap.xml");

    let result = write_document("<urlset/>", Some(path.as_path()));

    assert!(result.is_err());
    assert!(format!("{}", result.unwrap_err()).contains("Failed to write sitemap"));
}

#[test]
fn test_summary_line_counts() {
    use sitemapper_core::Page;
    use url::Url;

    let mut builder = SitemapBuilder::new();
    builder.append(
        Page::new(Url::parse("http://example.com/").unwrap())
            .with_links(vec![Url::parse("http://example.com/a").unwrap()])
            .with_assets(vec![
                Url::parse("http://example.com/a.css").unwrap(),
                Url::parse("http://example.com/b.css").unwrap(),
            ]),
    );

    let line = summary_line(&builder);
    assert!(line.contains("1 pages"));
    assert!(line.contains("1 links"));
    assert!(line.contains("2 assets"));
}
