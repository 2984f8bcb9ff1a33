use crate::links::LinkCandidate;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// One expanded topic.
#[derive(Debug, Clone, Serialize)]
pub struct TopicNode {
    pub topic: String,
    /// Distinct article links found on the page.
    pub in_degree: usize,
    /// Distinct pages linking to this topic.
    pub out_degree: usize,
    pub depth: usize,
    /// Highest-ranked links, at most the branching factor.
    pub children: Vec<LinkCandidate>,
    /// The page could not be fetched; degrees are zero and there are no children.
    pub failed: bool,
}

impl TopicNode {
    pub fn new(topic: String, depth: usize) -> Self {
        Self {
            topic,
            in_degree: 0,
            out_degree: 0,
            depth,
            children: Vec::new(),
            failed: false,
        }
    }

    pub fn failed(topic: String, depth: usize) -> Self {
        Self {
            failed: true,
            ..Self::new(topic, depth)
        }
    }
}

impl fmt::Display for TopicNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}/{})", self.topic, self.in_degree, self.out_degree)
    }
}

/// What a child reference points at.
#[derive(Debug, Clone, Copy)]
pub enum TreeEntry<'a> {
    Expanded(&'a TopicNode),
    Unexpanded(&'a LinkCandidate),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CrawlStats {
    pub expanded: usize,
    pub failed: usize,
    pub unexpanded: usize,
    pub max_depth: usize,
}

/// Every topic expanded during one crawl, keyed by canonical key.
///
/// Children reference other nodes by key only, so cycles in the link graph
/// are representable without shared ownership.
#[derive(Debug, Clone, Serialize)]
pub struct CrawlTree {
    pub root: String,
    pub distance: usize,
    pub branching: usize,
    pub nodes: HashMap<String, TopicNode>,
    pub expansion_order: Vec<String>,
    /// Frontier left behind when the distance bound was reached.
    pub unexpanded: Vec<LinkCandidate>,
}

impl CrawlTree {
    pub fn new(root: String, distance: usize, branching: usize) -> Self {
        Self {
            root,
            distance,
            branching,
            nodes: HashMap::new(),
            expansion_order: Vec::new(),
            unexpanded: Vec::new(),
        }
    }

    /// Records a node. The first node for a key wins; returns false for a duplicate.
    pub fn insert(&mut self, node: TopicNode) -> bool {
        if self.nodes.contains_key(&node.topic) {
            return false;
        }
        self.expansion_order.push(node.topic.clone());
        self.nodes.insert(node.topic.clone(), node);
        true
    }

    pub fn contains(&self, key: &str) -> bool {
        self.nodes.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&TopicNode> {
        self.nodes.get(key)
    }

    pub fn root_node(&self) -> Option<&TopicNode> {
        self.nodes.get(&self.root)
    }

    pub fn resolve<'a>(&'a self, link: &'a LinkCandidate) -> TreeEntry<'a> {
        match self.nodes.get(&link.key) {
            Some(node) => TreeEntry::Expanded(node),
            None => TreeEntry::Unexpanded(link),
        }
    }

    /// Nodes in the order they were expanded (breadth-first).
    pub fn nodes_in_order(&self) -> impl Iterator<Item = &TopicNode> {
        self.expansion_order
            .iter()
            .filter_map(|key| self.nodes.get(key))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn stats(&self) -> CrawlStats {
        CrawlStats {
            expanded: self.nodes.len(),
            failed: self.nodes.values().filter(|n| n.failed).count(),
            unexpanded: self.unexpanded.len(),
            max_depth: self.nodes.values().map(|n| n.depth).max().unwrap_or(0),
        }
    }
}
