use crate::error::{Result, ScanError};
use crate::fetch::DEFAULT_TIMEOUT_SECS;
use crate::links::ARTICLE_PREFIX;
use serde::Serialize;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://en.wikipedia.org";
pub const DEFAULT_WORKERS: usize = 4;
/// Result-size cap of a "what links here" query.
pub const WHAT_LINKS_HERE_LIMIT: usize = 5000;

/// Parameters of one crawl. Built once and never mutated during the crawl.
#[derive(Debug, Clone, Serialize)]
pub struct CrawlConfig {
    /// Number of breadth-first levels expanded below the root.
    pub distance: usize,
    /// Maximum children selected per page.
    pub branching: usize,
    /// Wiki root, without a trailing slash.
    pub base_url: String,
    /// Concurrent fetches allowed within one level.
    pub workers: usize,
    pub timeout_secs: u64,
    pub what_links_here_limit: usize,
}

impl CrawlConfig {
    pub fn new(distance: usize, branching: usize, base_url: &str) -> Result<Self> {
        if distance == 0 {
            return Err(ScanError::Config(
                "distance must be a positive integer".to_string(),
            ));
        }
        if branching == 0 {
            return Err(ScanError::Config(
                "branching factor must be a positive integer".to_string(),
            ));
        }

        Ok(Self {
            distance,
            branching,
            base_url: normalize_base_url(base_url)?,
            workers: DEFAULT_WORKERS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            what_links_here_limit: WHAT_LINKS_HERE_LIMIT,
        })
    }

    pub fn with_workers(mut self, workers: usize) -> Result<Self> {
        if workers == 0 {
            return Err(ScanError::Config(
                "worker count must be a positive integer".to_string(),
            ));
        }
        self.workers = workers;
        Ok(self)
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Result<Self> {
        if timeout_secs == 0 {
            return Err(ScanError::Config(
                "timeout must be a positive number of seconds".to_string(),
            ));
        }
        self.timeout_secs = timeout_secs;
        Ok(self)
    }

    pub fn with_what_links_here_limit(mut self, limit: usize) -> Self {
        self.what_links_here_limit = limit;
        self
    }

    pub fn article_url(&self, key: &str) -> String {
        format!("{}{}{}", self.base_url, ARTICLE_PREFIX, key)
    }

    pub fn what_links_here_url(&self, key: &str) -> String {
        format!(
            "{}{}Special:WhatLinksHere/{}?limit={}",
            self.base_url, ARTICLE_PREFIX, key, self.what_links_here_limit
        )
    }
}

fn normalize_base_url(base_url: &str) -> Result<String> {
    let trimmed = base_url.trim().trim_end_matches('/');
    let parsed = Url::parse(trimmed)
        .map_err(|e| ScanError::InvalidUrl(format!("{}: {}", base_url, e)))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ScanError::InvalidUrl(format!(
            "{}: only http and https are supported",
            base_url
        )));
    }

    Ok(trimmed.to_string())
}
