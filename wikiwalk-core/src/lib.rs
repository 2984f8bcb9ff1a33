pub mod crawl;
pub mod report;
pub mod tree;

pub use crawl::{CrawlOptions, CrawlProgressCallback, execute_crawl, execute_crawl_with};
pub use report::{ReportFormat, generate_report, save_report};
pub use tree::{TreeLine, render_tree};
