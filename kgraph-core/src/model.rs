use kgraph_scanner::extract::resolve_links;
use kgraph_scanner::result::{ArticleContent, Link, UserRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const ARTICLE_COLOR: &str = "#fdfd96";
const ARTICLE_LABEL_CHARS: usize = 20;

const ARTICLE_EDGE_COLOR: &str = "#A7C7E7";
const ARTICLE_EDGE_HIGHLIGHT: &str = "#3c82ca";
const EXTERNAL_EDGE_COLOR: &str = "#dbd7d7";
const EXTERNAL_EDGE_HIGHLIGHT: &str = "#9a8f8f";

/// Display fields copied verbatim onto an article node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayStats {
    pub title: String,
    pub description: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

/// A normalized input article.
#[derive(Debug, Clone, PartialEq)]
pub struct Article {
    pub url: String,
    pub popularity: f64,
    pub stats: DisplayStats,
    pub links: Vec<Link>,
}

impl Article {
    pub fn new(url: impl Into<String>, popularity: f64) -> Self {
        Self {
            url: url.into(),
            popularity,
            stats: DisplayStats::default(),
            links: Vec::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.stats.title = title.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.stats.description = description.into();
        self
    }

    pub fn with_link(mut self, text: impl Into<String>, href: impl Into<String>) -> Self {
        self.links.push(Link::new(text, href));
        self
    }
}

impl From<&ArticleContent> for Article {
    fn from(content: &ArticleContent) -> Self {
        Self {
            url: content.url.clone(),
            popularity: content.popularity,
            stats: DisplayStats {
                title: content.title.clone(),
                description: content.description.clone(),
                extra: content.extra.clone(),
            },
            links: resolve_links(content),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub profile: String,
    pub image_url: String,
}

impl From<&UserRecord> for UserInfo {
    fn from(user: &UserRecord) -> Self {
        Self {
            profile: user.profile.clone(),
            image_url: user.image_url.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Article,
    External,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleNode {
    pub id: u64,
    pub size: f64,
    pub label: String,
    pub title: String,
    pub description: String,
    pub url: String,
    pub reference_count: u32,
    pub stats: DisplayStats,
}

impl ArticleNode {
    pub fn new(id: u64, article: &Article, size: f64) -> Self {
        Self {
            id,
            size,
            label: article.stats.title.chars().take(ARTICLE_LABEL_CHARS).collect(),
            title: article.stats.title.clone(),
            description: article.stats.description.clone(),
            url: article.url.clone(),
            reference_count: 1,
            stats: article.stats.clone(),
        }
    }
}

/// An external domain referenced from one or more articles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalNode {
    pub id: u64,
    pub domain: String,
    pub size: f64,
    pub reference_count: u32,
    /// `text|href` pairs, insertion ordered, no duplicates.
    pub urls: Vec<String>,
    pub label: String,
    pub description: String,
}

impl ExternalNode {
    pub fn new(id: u64, domain: &str, link: &Link, size: f64) -> Self {
        Self {
            id,
            domain: domain.to_string(),
            size,
            reference_count: 1,
            urls: vec![link_key(link)],
            label: display_domain(domain).to_string(),
            description: link.text.clone(),
        }
    }

    /// Count one more qualifying link to this domain.
    pub fn record_reference(&mut self, link: &Link, step: f64, cap: f64) {
        self.reference_count += 1;
        self.size = (self.size + step).min(cap);

        let key = link_key(link);
        if !self.urls.contains(&key) {
            self.urls.push(key);
        }

        self.label = format!("{}|{}", display_domain(&self.domain), self.reference_count);
    }
}

pub fn link_key(link: &Link) -> String {
    format!("{}|{}", link.text, link.href)
}

fn display_domain(domain: &str) -> &str {
    domain.strip_prefix("www.").unwrap_or(domain)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    Article(ArticleNode),
    External(ExternalNode),
}

impl Node {
    pub fn id(&self) -> u64 {
        match self {
            Node::Article(node) => node.id,
            Node::External(node) => node.id,
        }
    }

    pub fn size(&self) -> f64 {
        match self {
            Node::Article(node) => node.size,
            Node::External(node) => node.size,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Node::Article(node) => &node.label,
            Node::External(node) => &node.label,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Article(_) => NodeKind::Article,
            Node::External(_) => NodeKind::External,
        }
    }

    pub fn reference_count(&self) -> u32 {
        match self {
            Node::Article(node) => node.reference_count,
            Node::External(node) => node.reference_count,
        }
    }

    pub fn shape(&self) -> &'static str {
        match self {
            Node::Article(_) => "star",
            Node::External(_) => "dot",
        }
    }

    /// Fill color; external nodes use the renderer's default.
    pub fn color(&self) -> Option<&'static str> {
        match self {
            Node::Article(_) => Some(ARTICLE_COLOR),
            Node::External(_) => None,
        }
    }

    pub fn as_external(&self) -> Option<&ExternalNode> {
        match self {
            Node::External(node) => Some(node),
            Node::Article(_) => None,
        }
    }

    pub fn as_article(&self) -> Option<&ArticleNode> {
        match self {
            Node::Article(node) => Some(node),
            Node::External(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeColor {
    pub color: String,
    pub highlight: String,
}

impl EdgeColor {
    pub fn for_target(kind: NodeKind) -> Self {
        let (color, highlight) = match kind {
            NodeKind::Article => (ARTICLE_EDGE_COLOR, ARTICLE_EDGE_HIGHLIGHT),
            NodeKind::External => (EXTERNAL_EDGE_COLOR, EXTERNAL_EDGE_HIGHLIGHT),
        };
        Self {
            color: color.to_string(),
            highlight: highlight.to_string(),
        }
    }
}

/// A connection from a link target (`from`) to the referencing article (`to`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub from: u64,
    pub to: u64,
    pub color: EdgeColor,
}

impl Edge {
    pub fn new(from: u64, to: u64, target: NodeKind) -> Self {
        Self {
            from,
            to,
            color: EdgeColor::for_target(target),
        }
    }

    /// The unordered endpoint pair, smaller id first.
    pub fn pair(&self) -> (u64, u64) {
        (self.from.min(self.to), self.from.max(self.to))
    }

    pub fn touches(&self, id: u64) -> bool {
        self.from == id || self.to == id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphResult {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub user_profile: String,
    pub user_image: String,
}

impl GraphResult {
    pub fn node(&self, id: u64) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id() == id)
    }

    pub fn article_nodes(&self) -> impl Iterator<Item = &ArticleNode> {
        self.nodes.iter().filter_map(Node::as_article)
    }

    pub fn external_nodes(&self) -> impl Iterator<Item = &ExternalNode> {
        self.nodes.iter().filter_map(Node::as_external)
    }

    pub fn externals_for_domain<'a>(
        &'a self,
        domain: &'a str,
    ) -> impl Iterator<Item = &'a ExternalNode> + 'a {
        self.external_nodes().filter(move |node| node.domain == domain)
    }

    pub fn degree(&self, id: u64) -> usize {
        self.edges.iter().filter(|edge| edge.touches(id)).count()
    }
}
