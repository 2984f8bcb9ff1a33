use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing::info;
use wikiwalk_scanner::error::Result;
use wikiwalk_scanner::{CrawlConfig, CrawlTree, Crawler, Fetcher, HttpFetcher};

/// Options for configuring a crawl operation
pub struct CrawlOptions {
    pub topic: String,
    pub config: CrawlConfig,
    pub show_progress_bars: bool,
}

/// Callback for reporting crawl progress
pub type CrawlProgressCallback = Arc<dyn Fn(String) + Send + Sync>;

/// Execute a crawl over HTTP with the given options
pub async fn execute_crawl(
    options: CrawlOptions,
    progress_callback: Option<CrawlProgressCallback>,
) -> Result<CrawlTree> {
    let fetcher = HttpFetcher::with_timeout(options.config.timeout_secs)?;
    execute_crawl_with(fetcher, options, progress_callback).await
}

/// Execute a crawl through any `Fetcher`
pub async fn execute_crawl_with<F: Fetcher>(
    fetcher: F,
    options: CrawlOptions,
    progress_callback: Option<CrawlProgressCallback>,
) -> Result<CrawlTree> {
    let CrawlOptions {
        topic,
        config,
        show_progress_bars,
    } = options;

    let progress_bar = if show_progress_bars {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message(format!("Starting crawl of {}...", topic));
        Some(pb)
    } else {
        None
    };

    let expanded_count = Arc::new(AtomicUsize::new(0));

    let count_clone = expanded_count.clone();
    let pb_clone = progress_bar.clone();
    let internal_callback: wikiwalk_scanner::ProgressCallback =
        Arc::new(move |depth: usize, topic: String| {
            let count = count_clone.fetch_add(1, Ordering::Relaxed) + 1;
            if let Some(ref pb) = pb_clone {
                pb.set_message(format!(
                    "Expanding {} (depth {}) - {} topics",
                    topic, depth, count
                ));
            }
            if let Some(ref callback) = progress_callback {
                callback(format!("Expanding {}", topic));
            }
        });

    let crawler = Crawler::new(fetcher, config).with_progress_callback(internal_callback);
    let result = crawler.crawl(&topic).await;

    if let Some(ref pb) = progress_bar {
        match result {
            Ok(ref tree) => pb.finish_with_message(format!(
                "Crawl complete! {} topics expanded",
                tree.len()
            )),
            Err(_) => pb.finish_and_clear(),
        }
    }

    info!(
        "Attempted {} expansions for {}",
        expanded_count.load(Ordering::Relaxed),
        topic
    );
    result
}
