// Tests for report generation functionality

use std::fs;
use tempfile::TempDir;
use wikiwalk_core::report::{
    ReportFormat, gather_report_data, generate_json_report, generate_markdown_report,
    generate_report, generate_text_report, save_report,
};
use wikiwalk_scanner::links::LinkCandidate;
use wikiwalk_scanner::result::{CrawlTree, TopicNode};

// ============================================================================
// Helpers
// ============================================================================

fn node(topic: &str, depth: usize, degrees: (usize, usize), children: &[&str]) -> TopicNode {
    let mut node = TopicNode::new(topic.to_string(), depth);
    node.in_degree = degrees.0;
    node.out_degree = degrees.1;
    node.children = children
        .iter()
        .map(|c| LinkCandidate::new(*c, c.replace('_', " ")))
        .collect();
    node
}

fn sample_tree() -> CrawlTree {
    let mut tree = CrawlTree::new("Eric_Cartman".to_string(), 1, 2);
    tree.insert(node("Eric_Cartman", 0, (120, 900), &["Kyle_Broflovski", "South_Park"]));
    tree.insert(node("Kyle_Broflovski", 1, (80, 400), &["Stan_Marsh"]));
    tree.insert(TopicNode::failed("South_Park".to_string(), 1));
    tree.unexpanded.push(LinkCandidate::new("Stan_Marsh", "Stan Marsh"));
    tree
}

// ============================================================================
// Report Format Tests
// ============================================================================

#[test]
fn test_report_format_from_str_text() {
    assert!(matches!(ReportFormat::from_str("text"), Some(ReportFormat::Text)));
}

#[test]
fn test_report_format_from_str_json() {
    assert!(matches!(ReportFormat::from_str("json"), Some(ReportFormat::Json)));
}

#[test]
fn test_report_format_from_str_markdown_aliases() {
    assert!(matches!(
        ReportFormat::from_str("markdown"),
        Some(ReportFormat::Markdown)
    ));
    assert!(matches!(ReportFormat::from_str("md"), Some(ReportFormat::Markdown)));
}

#[test]
fn test_report_format_from_str_case_insensitive() {
    assert!(matches!(ReportFormat::from_str("TEXT"), Some(ReportFormat::Text)));
    assert!(matches!(ReportFormat::from_str("Json"), Some(ReportFormat::Json)));
}

#[test]
fn test_report_format_from_str_invalid() {
    assert!(ReportFormat::from_str("csv").is_none());
    assert!(ReportFormat::from_str("").is_none());
}

// ============================================================================
// Report Content Tests
// ============================================================================

#[test]
fn test_text_report_format() {
    let data = gather_report_data(&sample_tree());
    let report = generate_text_report(&data);

    assert_eq!(
        report,
        "Eric_Cartman (120/900)\n\tKyle_Broflovski (80/400)\n\tStan_Marsh\n\tSouth_Park (0/0)\n"
    );
}

#[test]
fn test_gather_report_data_stats() {
    let data = gather_report_data(&sample_tree());

    assert_eq!(data.root, "Eric_Cartman");
    assert_eq!(data.stats.expanded, 3);
    assert_eq!(data.stats.failed, 1);
    assert_eq!(data.stats.unexpanded, 1);
    assert_eq!(data.stats.max_depth, 1);

    let order: Vec<_> = data.nodes.iter().map(|n| n.topic.as_str()).collect();
    assert_eq!(order, vec!["Eric_Cartman", "Kyle_Broflovski", "South_Park"]);
}

#[test]
fn test_json_report_structure() {
    let data = gather_report_data(&sample_tree());
    let json = generate_json_report(&data).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["root"], "Eric_Cartman");
    assert_eq!(value["distance"], 1);
    assert_eq!(value["lines"][0]["degrees"][0], 120);
    assert!(value["lines"][2].get("degrees").is_none());
    assert_eq!(value["nodes"][2]["failed"], true);
    assert_eq!(value["nodes"][0]["children"][0]["title"], "Kyle Broflovski");
}

#[test]
fn test_markdown_report() {
    let data = gather_report_data(&sample_tree());
    let report = generate_markdown_report(&data);

    assert!(report.starts_with("# Eric Cartman\n"));
    assert!(report.contains("| 3 | 1 | 1 | 1 |"));
    assert!(report.contains("- **Eric_Cartman** (120/900)\n"));
    assert!(report.contains("  - **Kyle_Broflovski** (80/400)\n"));
    assert!(report.contains("  - Stan_Marsh\n"));
}

#[test]
fn test_generate_report_dispatch() {
    let tree = sample_tree();

    let text = generate_report(&tree, ReportFormat::Text).unwrap();
    let json = generate_report(&tree, ReportFormat::Json).unwrap();

    assert!(text.starts_with("Eric_Cartman (120/900)"));
    assert!(json.trim_start().starts_with('{'));
}

// ============================================================================
// Persistence Tests
// ============================================================================

#[test]
fn test_save_report() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("report.txt");

    save_report("Eric_Cartman (1/2)\n", &path).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "Eric_Cartman (1/2)\n");
}
