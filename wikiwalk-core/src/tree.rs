//! Renders a `CrawlTree` as an indented outline.
//!
//! Expanded topics print at their own depth with their degrees. A reference
//! to a topic that already printed, or to a frontier entry that was never
//! expanded, prints as a bare name at the configured distance.

use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use wikiwalk_scanner::links::LinkCandidate;
use wikiwalk_scanner::result::{CrawlTree, TopicNode, TreeEntry};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeLine {
    pub depth: usize,
    pub topic: String,
    /// `(in_degree, out_degree)` for expanded topics, `None` for references.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degrees: Option<(usize, usize)>,
}

impl TreeLine {
    fn expanded(node: &TopicNode) -> Self {
        Self {
            depth: node.depth,
            topic: node.topic.clone(),
            degrees: Some((node.in_degree, node.out_degree)),
        }
    }

    fn reference(topic: &str, depth: usize) -> Self {
        Self {
            depth,
            topic: topic.to_string(),
            degrees: None,
        }
    }

    pub fn is_reference(&self) -> bool {
        self.degrees.is_none()
    }
}

impl fmt::Display for TreeLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", "\t".repeat(self.depth), self.topic)?;
        if let Some((in_degree, out_degree)) = self.degrees {
            write!(f, " ({}/{})", in_degree, out_degree)?;
        }
        Ok(())
    }
}

enum Pending<'a> {
    Node(&'a TopicNode),
    Child(&'a LinkCandidate),
}

/// Depth-first, pre-order walk from the root.
///
/// Each topic expands at most once: `rendered` only grows, and a topic in it
/// is never pushed for expansion again, so the walk ends on cyclic graphs.
pub fn render_tree(tree: &CrawlTree) -> Vec<TreeLine> {
    let mut lines = Vec::new();
    let Some(root) = tree.root_node() else {
        return lines;
    };

    let mut rendered: HashSet<&str> = HashSet::new();
    let mut stack = vec![Pending::Node(root)];

    while let Some(pending) = stack.pop() {
        let node = match pending {
            Pending::Node(node) => node,
            Pending::Child(link) => match tree.resolve(link) {
                TreeEntry::Expanded(node) if !rendered.contains(node.topic.as_str()) => node,
                TreeEntry::Expanded(node) => {
                    lines.push(TreeLine::reference(&node.topic, tree.distance));
                    continue;
                }
                TreeEntry::Unexpanded(link) => {
                    lines.push(TreeLine::reference(&link.key, tree.distance));
                    continue;
                }
            },
        };

        rendered.insert(node.topic.as_str());
        lines.push(TreeLine::expanded(node));
        stack.extend(node.children.iter().rev().map(Pending::Child));
    }

    lines
}
