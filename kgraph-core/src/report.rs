// Report generation from a built graph

use crate::error::Result;
use crate::model::{GraphResult, Node};
use chrono::Local;
use petgraph::algo::connected_components;
use petgraph::graph::{NodeIndex, UnGraph};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportFormat {
    Json,
    Vis,
    Text,
    Markdown,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(ReportFormat::Json),
            "vis" => Some(ReportFormat::Vis),
            "text" => Some(ReportFormat::Text),
            "markdown" | "md" => Some(ReportFormat::Markdown),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Json | ReportFormat::Vis => "json",
            ReportFormat::Text => "txt",
            ReportFormat::Markdown => "md",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainCount {
    pub id: u64,
    pub domain: String,
    pub references: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleDegree {
    pub id: u64,
    pub title: String,
    pub degree: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSummary {
    pub article_count: usize,
    pub external_count: usize,
    pub edge_count: usize,
    pub components: usize,
    pub isolated_articles: Vec<u64>,
    pub top_domains: Vec<DomainCount>,
    pub most_connected: Vec<ArticleDegree>,
}

impl GraphSummary {
    pub fn from_graph(graph: &GraphResult, top_n: usize) -> Self {
        let mut ungraph: UnGraph<u64, ()> = UnGraph::new_undirected();
        let indices: HashMap<u64, NodeIndex> = graph
            .nodes
            .iter()
            .map(|node| (node.id(), ungraph.add_node(node.id())))
            .collect();
        for edge in &graph.edges {
            if let (Some(&a), Some(&b)) = (indices.get(&edge.from), indices.get(&edge.to)) {
                ungraph.add_edge(a, b, ());
            }
        }

        let isolated_articles = graph
            .article_nodes()
            .filter(|node| graph.degree(node.id) == 0)
            .map(|node| node.id)
            .collect();

        let mut top_domains: Vec<DomainCount> = graph
            .external_nodes()
            .map(|node| DomainCount {
                id: node.id,
                domain: node.domain.clone(),
                references: node.reference_count,
            })
            .collect();
        // Stable sort keeps creation order among ties
        top_domains.sort_by(|a, b| b.references.cmp(&a.references));
        top_domains.truncate(top_n);

        let mut most_connected: Vec<ArticleDegree> = graph
            .article_nodes()
            .map(|node| ArticleDegree {
                id: node.id,
                title: node.title.clone(),
                degree: graph.degree(node.id),
            })
            .filter(|entry| entry.degree > 0)
            .collect();
        most_connected.sort_by(|a, b| b.degree.cmp(&a.degree));
        most_connected.truncate(top_n);

        Self {
            article_count: graph.article_nodes().count(),
            external_count: graph.external_nodes().count(),
            edge_count: graph.edges.len(),
            components: connected_components(&ungraph),
            isolated_articles,
            top_domains,
            most_connected,
        }
    }
}

/// Nodes and edges in the dataset shape vis-network consumes.
pub fn to_vis_dataset(graph: &GraphResult) -> Value {
    let nodes: Vec<Value> = graph
        .nodes
        .iter()
        .map(|node| {
            let mut entry = json!({
                "id": node.id(),
                "label": node.label(),
                "shape": node.shape(),
                "size": node.size(),
                "value": node.reference_count(),
            });
            if let Some(color) = node.color() {
                entry["color"] = json!(color);
            }
            entry["title"] = match node {
                Node::Article(article) => json!(article.title),
                Node::External(external) => json!(external.urls.join("\n")),
            };
            entry
        })
        .collect();

    let edges: Vec<Value> = graph
        .edges
        .iter()
        .map(|edge| {
            json!({
                "from": edge.from,
                "to": edge.to,
                "color": {
                    "color": edge.color.color,
                    "highlight": edge.color.highlight,
                },
            })
        })
        .collect();

    json!({
        "nodes": nodes,
        "edges": edges,
        "user_profile": graph.user_profile,
        "user_image": graph.user_image,
    })
}

pub fn generate_report(graph: &GraphResult, format: ReportFormat, username: &str) -> Result<String> {
    Ok(match format {
        ReportFormat::Json => serde_json::to_string_pretty(graph)?,
        ReportFormat::Vis => serde_json::to_string_pretty(&to_vis_dataset(graph))?,
        ReportFormat::Text => generate_text_report(graph, username),
        ReportFormat::Markdown => generate_markdown_report(graph, username),
    })
}

fn generate_text_report(graph: &GraphResult, username: &str) -> String {
    let summary = GraphSummary::from_graph(graph, 10);
    let mut report = String::new();

    report.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
    report.push_str(&format!("  LINK GRAPH: {}\n", username));
    report.push_str(&format!(
        "  Generated: {}\n",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    ));
    report.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");

    report.push_str("# Summary:\n");
    report.push_str(&format!("  Articles: {}\n", summary.article_count));
    report.push_str(&format!("  External domains: {}\n", summary.external_count));
    report.push_str(&format!("  Connections: {}\n", summary.edge_count));
    report.push_str(&format!("  Connected components: {}\n", summary.components));
    report.push_str(&format!(
        "  Articles without links: {}\n\n",
        summary.isolated_articles.len()
    ));

    if !summary.top_domains.is_empty() {
        report.push_str("# Most referenced domains:\n");
        for entry in &summary.top_domains {
            report.push_str(&format!("  {:>4}  {}\n", entry.references, entry.domain));
        }
        report.push('\n');
    }

    if !summary.most_connected.is_empty() {
        report.push_str("# Most connected articles:\n");
        for entry in &summary.most_connected {
            report.push_str(&format!("  {:>4}  #{} {}\n", entry.degree, entry.id, entry.title));
        }
        report.push('\n');
    }

    report
}

fn generate_markdown_report(graph: &GraphResult, username: &str) -> String {
    let summary = GraphSummary::from_graph(graph, 10);
    let mut report = String::new();

    report.push_str(&format!("# Link graph: {}\n\n", username));
    report.push_str(&format!(
        "_Generated {}_\n\n",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    ));

    report.push_str("## Summary\n\n");
    report.push_str("| Metric | Count |\n|---|---|\n");
    report.push_str(&format!("| Articles | {} |\n", summary.article_count));
    report.push_str(&format!("| External domains | {} |\n", summary.external_count));
    report.push_str(&format!("| Connections | {} |\n", summary.edge_count));
    report.push_str(&format!("| Connected components | {} |\n", summary.components));
    report.push_str(&format!(
        "| Articles without links | {} |\n\n",
        summary.isolated_articles.len()
    ));

    if !summary.top_domains.is_empty() {
        report.push_str("## Most referenced domains\n\n");
        report.push_str("| Domain | References |\n|---|---|\n");
        for entry in &summary.top_domains {
            report.push_str(&format!(
                "| {} | {} |\n",
                escape_cell(&entry.domain),
                entry.references
            ));
        }
        report.push('\n');
    }

    if !summary.most_connected.is_empty() {
        report.push_str("## Most connected articles\n\n");
        report.push_str("| Article | Connections |\n|---|---|\n");
        for entry in &summary.most_connected {
            report.push_str(&format!("| {} | {} |\n", escape_cell(&entry.title), entry.degree));
        }
        report.push('\n');
    }

    report
}

// A bare pipe would end the table cell early
fn escape_cell(value: &str) -> String {
    value.replace('|', "\\|")
}

pub fn save_report(content: &str, path: &Path) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}
