// Tests for report generation functionality

use kgraph_core::map::{GraphOptions, build_graph};
use kgraph_core::model::{Article, GraphResult, UserInfo};
use kgraph_core::report::{
    GraphSummary, ReportFormat, generate_report, save_report, to_vis_dataset,
};

fn sample_graph() -> GraphResult {
    let articles = vec![
        Article::new("https://blog.io/a", 10.0)
            .with_title("Alpha")
            .with_link("docs", "https://docs.rs/x")
            .with_link("docs", "https://docs.rs/y")
            .with_link("b", "https://blog.io/b"),
        Article::new("https://blog.io/b", 20.0)
            .with_title("Beta")
            .with_link("docs", "https://docs.rs/z")
            .with_link("crates", "https://crates.io/c"),
        Article::new("https://blog.io/c", 5.0).with_title("Gamma"),
    ];
    let user = UserInfo {
        profile: "profile".to_string(),
        image_url: "https://img.io/me.png".to_string(),
    };
    build_graph(&articles, &user, GraphOptions::default()).unwrap()
}

// ============================================================================
// Report Format Tests
// ============================================================================

#[test]
fn test_report_format_from_str() {
    assert_eq!(ReportFormat::from_str("json"), Some(ReportFormat::Json));
    assert_eq!(ReportFormat::from_str("vis"), Some(ReportFormat::Vis));
    assert_eq!(ReportFormat::from_str("text"), Some(ReportFormat::Text));
    assert_eq!(ReportFormat::from_str("markdown"), Some(ReportFormat::Markdown));
    assert_eq!(ReportFormat::from_str("md"), Some(ReportFormat::Markdown));
}

#[test]
fn test_report_format_from_str_case_insensitive() {
    assert_eq!(ReportFormat::from_str("JSON"), Some(ReportFormat::Json));
    assert_eq!(ReportFormat::from_str("Text"), Some(ReportFormat::Text));
}

#[test]
fn test_report_format_from_str_invalid() {
    assert_eq!(ReportFormat::from_str("html"), None);
    assert_eq!(ReportFormat::from_str(""), None);
}

#[test]
fn test_report_format_extension() {
    assert_eq!(ReportFormat::Vis.extension(), "json");
    assert_eq!(ReportFormat::Markdown.extension(), "md");
}

// ============================================================================
// Summary Tests
// ============================================================================

#[test]
fn test_summary_counts() {
    let graph = sample_graph();
    let summary = GraphSummary::from_graph(&graph, 10);

    assert_eq!(summary.article_count, 3);
    assert_eq!(summary.external_count, 2);
    // a-docs, a-b, b-docs, b-crates
    assert_eq!(summary.edge_count, 4);
    // {a, b, docs, crates} and {c}
    assert_eq!(summary.components, 2);
    assert_eq!(summary.isolated_articles, vec![3]);
}

#[test]
fn test_summary_top_domains_sorted() {
    let graph = sample_graph();
    let summary = GraphSummary::from_graph(&graph, 10);

    assert_eq!(summary.top_domains[0].domain, "docs.rs");
    assert_eq!(summary.top_domains[0].references, 3);
    assert_eq!(summary.top_domains[1].domain, "crates.io");
}

#[test]
fn test_summary_most_connected() {
    let graph = sample_graph();
    let summary = GraphSummary::from_graph(&graph, 1);

    assert_eq!(summary.most_connected.len(), 1);
    // Beta links to Alpha, docs.rs and crates.io
    assert_eq!(summary.most_connected[0].title, "Beta");
    assert_eq!(summary.most_connected[0].degree, 3);
}

#[test]
fn test_summary_empty_graph() {
    let summary = GraphSummary::from_graph(&GraphResult::default(), 5);

    assert_eq!(summary.article_count, 0);
    assert_eq!(summary.components, 0);
    assert!(summary.top_domains.is_empty());
}

// ============================================================================
// Output Tests
// ============================================================================

#[test]
fn test_json_report_round_trips() {
    let graph = sample_graph();
    let report = generate_report(&graph, ReportFormat::Json, "writer").unwrap();
    let parsed: GraphResult = serde_json::from_str(&report).unwrap();

    assert_eq!(parsed, graph);
}

#[test]
fn test_vis_dataset_shape() {
    let graph = sample_graph();
    let vis = to_vis_dataset(&graph);

    let nodes = vis["nodes"].as_array().unwrap();
    assert_eq!(nodes.len(), graph.nodes.len());
    assert_eq!(nodes[0]["shape"], "star");
    assert_eq!(nodes[0]["color"], "#fdfd96");
    assert_eq!(nodes[0]["title"], "Alpha");

    let docs = nodes.iter().find(|n| n["label"] == "docs.rs|3").unwrap();
    assert_eq!(docs["shape"], "dot");
    assert!(docs.get("color").is_none());
    assert!(docs["title"].as_str().unwrap().contains("docs|https://docs.rs/y"));

    assert_eq!(vis["edges"].as_array().unwrap().len(), 4);
    assert_eq!(vis["user_image"], "https://img.io/me.png");
}

#[test]
fn test_text_report_contents() {
    let report = generate_report(&sample_graph(), ReportFormat::Text, "writer").unwrap();

    assert!(report.contains("LINK GRAPH: writer"));
    assert!(report.contains("Articles: 3"));
    assert!(report.contains("External domains: 2"));
    assert!(report.contains("Connections: 4"));
    assert!(report.contains("docs.rs"));
}

#[test]
fn test_markdown_report_contents() {
    let report = generate_report(&sample_graph(), ReportFormat::Markdown, "writer").unwrap();

    assert!(report.starts_with("# Link graph: writer"));
    assert!(report.contains("| Articles | 3 |"));
    assert!(report.contains("| docs.rs | 3 |"));
    assert!(report.contains("| Alpha | 2 |"));
}

#[test]
fn test_markdown_report_escapes_pipes() {
    let articles = vec![
        Article::new("https://blog.io/a", 1.0)
            .with_title("Rust | Graphs")
            .with_link("docs", "https://docs.rs/x"),
    ];
    let graph = build_graph(&articles, &UserInfo::default(), GraphOptions::default()).unwrap();

    let report = generate_report(&graph, ReportFormat::Markdown, "writer").unwrap();

    assert!(report.contains(r"| Rust \| Graphs | 1 |"));
    assert!(!report.contains("| Rust | Graphs |"));
}

#[test]
fn test_save_report() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("graph.json");

    save_report("{}", &path)?;

    assert_eq!(std::fs::read_to_string(&path)?, "{}");
    Ok(())
}
