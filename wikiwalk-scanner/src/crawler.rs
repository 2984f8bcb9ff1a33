use crate::config::CrawlConfig;
use crate::error::{FetchError, Result, ScanError};
use crate::fetch::Fetcher;
use crate::links::{LinkCandidate, extract_links, topic_key};
use crate::normalize::PageContent;
use crate::rank::rank_links;
use crate::result::{CrawlTree, TopicNode};
use futures::stream::{self, StreamExt};
use regex::Regex;
use std::collections::{HashSet, VecDeque};
use std::sync::{Arc, LazyLock};
use tracing::{debug, info, warn};

/// Called with `(depth, topic)` as each topic starts expanding.
pub type ProgressCallback = Arc<dyn Fn(usize, String) + Send + Sync>;

static WHAT_LINKS_HERE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<ul id="mw-whatlinkshere-list">.*?</ul>(?:\s|<[^>]*>)*View\s*\(\s*(?:previous|next)"#)
        .unwrap_or_else(|_| panic!("Invalid Regex"))
});

/// Normalizes, extracts and ranks the links of one page.
pub fn rank_page(markup: &str) -> Vec<LinkCandidate> {
    let content = PageContent::from_markup(markup);
    rank_links(extract_links(&content.link_source), &content.text)
}

/// Counts the distinct articles listed on a "what links here" page.
///
/// Returns `ParseMismatch` when the list markers are absent.
pub fn count_linking_pages(markup: &str) -> Result<usize> {
    let list = WHAT_LINKS_HERE_RE.find(markup).ok_or_else(|| {
        ScanError::ParseMismatch("what-links-here list not found".to_string())
    })?;
    Ok(extract_links(list.as_str()).len())
}

/// Breadth-first expansion engine.
pub struct Crawler<F: Fetcher> {
    fetcher: F,
    config: CrawlConfig,
    progress_callback: Option<ProgressCallback>,
}

impl<F: Fetcher> Crawler<F> {
    pub fn new(fetcher: F, config: CrawlConfig) -> Self {
        Self {
            fetcher,
            config,
            progress_callback: None,
        }
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Crawls outward from `topic`.
    ///
    /// Only a failed root fetch is an error. Any other failure degrades the
    /// affected topic and the crawl carries on.
    pub async fn crawl(&self, topic: &str) -> Result<CrawlTree> {
        let root_key = topic_key(topic);
        if root_key.is_empty() {
            return Err(ScanError::Config("topic must not be empty".to_string()));
        }

        info!(
            "Starting crawl of {} (distance {}, branching {}, {} workers)",
            root_key, self.config.distance, self.config.branching, self.config.workers
        );

        let root = self.expand(&root_key, 0).await?;

        let mut tree = CrawlTree::new(
            root_key.clone(),
            self.config.distance,
            self.config.branching,
        );
        let mut visited: HashSet<String> = HashSet::new();
        let mut frontier: VecDeque<LinkCandidate> = root.children.iter().cloned().collect();

        visited.insert(root_key);
        tree.insert(root);

        for depth in 1..=self.config.distance {
            if frontier.is_empty() {
                break;
            }

            // Everything currently queued belongs to this level.
            let mut scheduled = HashSet::new();
            let level: Vec<LinkCandidate> = frontier
                .drain(..)
                .filter(|candidate| {
                    !visited.contains(&candidate.key) && scheduled.insert(candidate.key.clone())
                })
                .collect();

            debug!("Level {}: expanding {} topics", depth, level.len());

            // `buffered` yields in frontier order, so commits are deterministic.
            let nodes: Vec<TopicNode> = stream::iter(
                level
                    .iter()
                    .map(|candidate| self.expand_or_degrade(&candidate.key, depth)),
            )
            .buffered(self.config.workers)
            .collect()
            .await;

            for node in nodes {
                frontier.extend(node.children.iter().cloned());
                visited.insert(node.topic.clone());
                tree.insert(node);
            }
        }

        let mut leftover = HashSet::new();
        tree.unexpanded = frontier
            .into_iter()
            .filter(|candidate| {
                !visited.contains(&candidate.key) && leftover.insert(candidate.key.clone())
            })
            .collect();

        info!(
            "Crawl complete. Expanded {} topics, {} left unexpanded",
            tree.len(),
            tree.unexpanded.len()
        );
        Ok(tree)
    }

    /// Number of distinct articles linking to `key`. Zero when the lookup
    /// fails or its list is missing.
    pub async fn out_degree(&self, key: &str) -> usize {
        let url = self.config.what_links_here_url(key);
        let markup = match self.fetcher.fetch(&url).await {
            Ok(markup) => markup,
            Err(e) => {
                warn!("Out-degree lookup for {} failed: {}", key, e);
                return 0;
            }
        };

        match count_linking_pages(&markup) {
            Ok(count) => count,
            Err(e) => {
                debug!("No linking pages for {}: {}", key, e);
                0
            }
        }
    }

    async fn expand(&self, key: &str, depth: usize) -> std::result::Result<TopicNode, FetchError> {
        if let Some(ref callback) = self.progress_callback {
            callback(depth, key.to_string());
        }
        info!("Expanding {}", key);

        let markup = self.fetcher.fetch(&self.config.article_url(key)).await?;
        let ranked = rank_page(&markup);

        let mut node = TopicNode::new(key.to_string(), depth);
        node.in_degree = ranked.len();
        node.out_degree = self.out_degree(key).await;
        node.children = ranked.into_iter().take(self.config.branching).collect();

        debug!(
            "{} at depth {}: {} links, {} selected",
            node,
            depth,
            node.in_degree,
            node.children.len()
        );
        Ok(node)
    }

    async fn expand_or_degrade(&self, key: &str, depth: usize) -> TopicNode {
        match self.expand(key, depth).await {
            Ok(node) => node,
            Err(e) => {
                warn!("Failed to expand {}: {}", key, e);
                TopicNode::failed(key.to_string(), depth)
            }
        }
    }
}
