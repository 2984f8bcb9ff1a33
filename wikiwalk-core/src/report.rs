// Report generation from a finished crawl

use crate::tree::{TreeLine, render_tree};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use wikiwalk_scanner::result::{CrawlStats, CrawlTree, TopicNode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReportFormat {
    Text,
    Json,
    Markdown,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            "markdown" | "md" => Some(ReportFormat::Markdown),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportData {
    pub root: String,
    pub distance: usize,
    pub branching: usize,
    pub stats: CrawlStats,
    pub lines: Vec<TreeLine>,
    /// Expanded topics in breadth-first order.
    pub nodes: Vec<TopicNode>,
}

pub fn gather_report_data(tree: &CrawlTree) -> ReportData {
    ReportData {
        root: tree.root.clone(),
        distance: tree.distance,
        branching: tree.branching,
        stats: tree.stats(),
        lines: render_tree(tree),
        nodes: tree.nodes_in_order().cloned().collect(),
    }
}

/// One line per rendered entry, tab-indented by depth.
pub fn generate_text_report(data: &ReportData) -> String {
    let mut report = String::new();
    for line in &data.lines {
        report.push_str(&line.to_string());
        report.push('\n');
    }
    report
}

pub fn generate_json_report(data: &ReportData) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(data)
}

pub fn generate_markdown_report(data: &ReportData) -> String {
    let mut report = String::new();

    report.push_str(&format!("# {}\n\n", data.root.replace('_', " ")));
    report.push_str(&format!(
        "Distance {}, branching factor {}.\n\n",
        data.distance, data.branching
    ));
    report.push_str("| Expanded | Failed | Unexpanded | Max depth |\n");
    report.push_str("|---|---|---|---|\n");
    report.push_str(&format!(
        "| {} | {} | {} | {} |\n\n",
        data.stats.expanded, data.stats.failed, data.stats.unexpanded, data.stats.max_depth
    ));

    for line in &data.lines {
        let indent = "  ".repeat(line.depth);
        match line.degrees {
            Some((in_degree, out_degree)) => report.push_str(&format!(
                "{}- **{}** ({}/{})\n",
                indent, line.topic, in_degree, out_degree
            )),
            None => report.push_str(&format!("{}- {}\n", indent, line.topic)),
        }
    }

    report
}

pub fn generate_report(tree: &CrawlTree, format: ReportFormat) -> Result<String, serde_json::Error> {
    let data = gather_report_data(tree);
    match format {
        ReportFormat::Text => Ok(generate_text_report(&data)),
        ReportFormat::Json => generate_json_report(&data),
        ReportFormat::Markdown => Ok(generate_markdown_report(&data)),
    }
}

pub fn save_report(content: &str, path: &Path) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}
