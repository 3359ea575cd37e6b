pub mod canon;
pub mod crawler;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod result;
pub mod scope;

pub use crawler::{Crawler, ProgressCallback};
pub use error::ScanError;
pub use fetch::{Fetcher, HttpFetcher};
pub use result::Page;
pub use scope::{Scope, VisitedSet};
