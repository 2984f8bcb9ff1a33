pub mod config;
pub mod crawler;
pub mod error;
pub mod fetch;
pub mod links;
pub mod normalize;
pub mod rank;
pub mod result;

pub use config::CrawlConfig;
pub use crawler::{Crawler, ProgressCallback};
pub use error::{FetchError, ScanError};
pub use fetch::{Fetcher, HttpFetcher, MemoryFetcher};
pub use links::LinkCandidate;
pub use result::{CrawlStats, CrawlTree, TopicNode, TreeEntry};
