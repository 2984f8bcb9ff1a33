// Include handlers module directly from handlers.rs
#[path = "handlers.rs"]
pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::{CrawlArgs, build_options, emit_report, parse_positive};

// Re-export crawl functionality from wikiwalk-core
pub use wikiwalk_core::crawl::{CrawlOptions, CrawlProgressCallback, execute_crawl};
pub use wikiwalk_core::report::ReportFormat;
