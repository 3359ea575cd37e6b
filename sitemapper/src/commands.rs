use crate::CLAP_STYLING;
use clap::arg;
use url::Url;

pub fn command_argument_builder() -> clap::Command {
    clap::Command::new("sitemapper")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("sitemapper")
        .about(
            "Crawl every page under a seed URL's domain and print a sitemap of its pages, \
            links and assets.",
        )
        .styles(CLAP_STYLING)
        .arg(
            arg!(<URL>)
                .help("The absolute seed URL to crawl, including scheme")
                .value_parser(clap::value_parser!(Url)),
        )
        .arg(
            arg!(-t --"threads" <NUM_WORKERS>)
                .required(false)
                .help("The number of concurrent fetches.")
                .value_parser(clap::value_parser!(usize))
                .default_value("1"),
        )
        .arg(
            arg!(--"timeout" <SECONDS>)
                .required(false)
                .help("Request timeout in seconds")
                .value_parser(clap::value_parser!(u64))
                .default_value("10"),
        )
        .arg(
            arg!(--"max-pages" <NUM_PAGES>)
                .required(false)
                .help("Stop dispatching fetches after this many pages (default: unbounded)")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            arg!(-f --"format" <FORMAT>)
                .required(false)
                .help("Sitemap format: xml, json")
                .value_parser(["xml", "json"])
                .default_value("xml"),
        )
        .arg(
            arg!(-o --"output" <PATH>)
                .required(false)
                .help("Write the sitemap to a file (default: standard output)"),
        )
        .arg(
            arg!(-p --"progress")
                .required(false)
                .help("Show a progress spinner on standard error")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            arg!(-q --"quiet")
                .required(false)
                .help("Only log warnings and errors")
                .action(clap::ArgAction::SetTrue),
        )
}
