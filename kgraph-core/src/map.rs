// Graph construction: article seeding, link resolution and edge dedup

use crate::error::{GraphError, Result};
use crate::filter::{LinkDecision, LinkFilter, default_exclude_patterns};
use crate::model::{Article, ArticleNode, Edge, ExternalNode, GraphResult, Node, NodeKind, UserInfo};
use crate::normalize::{extract_domain, normalize_url};
use crate::rescale::{SizeRange, rescale};
use kgraph_scanner::result::Link;
use std::collections::{HashMap, HashSet};
use std::fmt;
use tracing::{debug, info};

/// External ids are allocated strictly above this value.
pub const EXTERNAL_ID_BASE: u64 = 100_000;

/// Options for configuring a graph build
#[derive(Debug, Clone)]
pub struct GraphOptions {
    /// Give every article its own external nodes instead of sharing them.
    pub isolate_articles: bool,
    pub size_range: SizeRange,
    pub external_size: f64,
    pub external_size_step: f64,
    pub external_size_cap: f64,
    pub exclude_patterns: Vec<String>,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            isolate_articles: false,
            size_range: SizeRange::default(),
            external_size: 10.0,
            external_size_step: 2.0,
            external_size_cap: 50.0,
            exclude_patterns: default_exclude_patterns(),
        }
    }
}

impl GraphOptions {
    fn validate(&self) -> Result<()> {
        SizeRange::new(self.size_range.min, self.size_range.max)?;

        let sizes = [
            self.external_size,
            self.external_size_step,
            self.external_size_cap,
        ];
        if sizes.iter().any(|s| !s.is_finite() || *s < 0.0) {
            return Err(GraphError::InvalidExternalSize(
                "sizes must be finite and non-negative".to_string(),
            ));
        }
        if self.external_size > self.external_size_cap {
            return Err(GraphError::InvalidExternalSize(format!(
                "initial size {} exceeds cap {}",
                self.external_size, self.external_size_cap
            )));
        }
        Ok(())
    }
}

/// Where a single link points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    Article(u64),
    External(String),
    Skipped(LinkDecision),
}

impl fmt::Display for LinkTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkTarget::Article(id) => write!(f, "article #{}", id),
            LinkTarget::External(domain) => write!(f, "external {}", domain),
            LinkTarget::Skipped(reason) => write!(f, "skipped ({})", reason),
        }
    }
}

/// Classified links of one article, in link order.
#[derive(Debug, Clone)]
pub struct ArticleLinks {
    pub id: u64,
    pub url: String,
    pub links: Vec<(Link, LinkTarget)>,
}

/// Accumulates nodes, edges and identity indices over one build.
pub struct MapBuilder {
    options: GraphOptions,
    filter: LinkFilter,
    nodes: Vec<Node>,
    slots: HashMap<u64, usize>,
    article_index: HashMap<String, u64>,
    external_index: HashMap<String, u64>,
    edges: Vec<Edge>,
    edge_pairs: HashSet<(u64, u64)>,
    next_external_id: u64,
}

impl MapBuilder {
    pub fn new(options: GraphOptions) -> Result<Self> {
        options.validate()?;
        let filter = LinkFilter::new(&options.exclude_patterns)?;

        Ok(Self {
            options,
            filter,
            nodes: Vec::new(),
            slots: HashMap::new(),
            article_index: HashMap::new(),
            external_index: HashMap::new(),
            edges: Vec::new(),
            edge_pairs: HashSet::new(),
            next_external_id: EXTERNAL_ID_BASE,
        })
    }

    /// Run every stage and return the finished graph.
    pub fn build(mut self, articles: &[Article], user: &UserInfo) -> Result<GraphResult> {
        validate_popularity(articles)?;

        let article_ids = self.seed_articles(articles);
        for (article, &article_id) in articles.iter().zip(&article_ids) {
            self.resolve_article_links(article, article_id);
        }

        info!(
            "Built graph: {} nodes ({} articles), {} edges",
            self.nodes.len(),
            articles.len(),
            self.edges.len()
        );

        Ok(GraphResult {
            nodes: self.nodes,
            edges: self.edges,
            user_profile: user.profile.clone(),
            user_image: user.image_url.clone(),
        })
    }

    /// Classify each article's links without creating nodes or edges.
    pub fn classify(mut self, articles: &[Article]) -> Result<Vec<ArticleLinks>> {
        validate_popularity(articles)?;

        let article_ids = self.seed_articles(articles);
        Ok(articles
            .iter()
            .zip(article_ids)
            .map(|(article, id)| ArticleLinks {
                id,
                url: article.url.clone(),
                links: article
                    .links
                    .iter()
                    .map(|link| (link.clone(), self.classify_link(&link.href)))
                    .collect(),
            })
            .collect())
    }

    /// Assign ids from 1 in input order and register each article's identity key.
    /// Returns the article ids by input position.
    fn seed_articles(&mut self, articles: &[Article]) -> Vec<u64> {
        let popularity: Vec<f64> = articles.iter().map(|a| a.popularity).collect();
        let sizes = rescale(&popularity, self.options.size_range);

        let mut article_ids = Vec::with_capacity(articles.len());
        for (article, size) in articles.iter().zip(sizes) {
            let id = article_ids.len() as u64 + 1;

            match normalize_url(&article.url) {
                Some(key) => {
                    if let Some(previous) = self.article_index.insert(key.clone(), id) {
                        debug!("Article #{} replaces #{} for key '{}'", id, previous, key);
                    }
                }
                None => debug!("Article #{} has no identity key: {}", id, article.url),
            }

            self.push_node(Node::Article(ArticleNode::new(id, article, size)));
            article_ids.push(id);
        }

        // Keep external ids clear of article ids however many articles there are
        self.next_external_id = EXTERNAL_ID_BASE.max(articles.len() as u64);
        article_ids
    }

    fn resolve_article_links(&mut self, article: &Article, article_id: u64) {
        if self.options.isolate_articles {
            self.external_index.clear();
        }

        for link in &article.links {
            let (target_id, kind) = match self.classify_link(&link.href) {
                LinkTarget::Skipped(reason) => {
                    debug!("Skipping link '{}' in #{}: {}", link.href, article_id, reason);
                    continue;
                }
                LinkTarget::Article(id) => (id, NodeKind::Article),
                LinkTarget::External(domain) => match self.resolve_external(&domain, link) {
                    Some(id) => (id, NodeKind::External),
                    None => continue,
                },
            };

            self.push_edge(target_id, article_id, kind);
        }
    }

    fn classify_link(&self, href: &str) -> LinkTarget {
        match self.filter.check(href) {
            LinkDecision::Accept => {}
            reason => return LinkTarget::Skipped(reason),
        }

        if let Some(key) = normalize_url(href)
            && let Some(&id) = self.article_index.get(&key)
        {
            return LinkTarget::Article(id);
        }

        match extract_domain(href) {
            Some(domain) => LinkTarget::External(domain),
            None => LinkTarget::Skipped(LinkDecision::InvalidUrl),
        }
    }

    /// Find or create the external node for `domain`. Returns `None` when the
    /// reference only updates an existing node and must not produce an edge.
    fn resolve_external(&mut self, domain: &str, link: &Link) -> Option<u64> {
        if let Some(&id) = self.external_index.get(domain) {
            if let Some(&slot) = self.slots.get(&id)
                && let Node::External(node) = &mut self.nodes[slot]
            {
                node.record_reference(
                    link,
                    self.options.external_size_step,
                    self.options.external_size_cap,
                );
            }

            if self.options.isolate_articles {
                return None;
            }
            return Some(id);
        }

        self.next_external_id += 1;
        let id = self.next_external_id;
        debug!("New external node #{} for {}", id, domain);

        self.push_node(Node::External(ExternalNode::new(
            id,
            domain,
            link,
            self.options.external_size,
        )));
        self.external_index.insert(domain.to_string(), id);
        Some(id)
    }

    fn push_node(&mut self, node: Node) {
        self.slots.insert(node.id(), self.nodes.len());
        self.nodes.push(node);
    }

    fn push_edge(&mut self, target_id: u64, article_id: u64, kind: NodeKind) {
        if target_id == article_id {
            return;
        }

        let edge = Edge::new(target_id, article_id, kind);
        if self.edge_pairs.insert(edge.pair()) {
            self.edges.push(edge);
        }
    }
}

fn validate_popularity(articles: &[Article]) -> Result<()> {
    match articles
        .iter()
        .find(|a| !a.popularity.is_finite() || a.popularity < 0.0)
    {
        Some(article) => Err(GraphError::InvalidPopularity {
            url: article.url.clone(),
            value: article.popularity,
        }),
        None => Ok(()),
    }
}

/// Build the graph for `articles` in one call.
pub fn build_graph(
    articles: &[Article],
    user: &UserInfo,
    options: GraphOptions,
) -> Result<GraphResult> {
    MapBuilder::new(options)?.build(articles, user)
}

pub fn classify_links(articles: &[Article], options: GraphOptions) -> Result<Vec<ArticleLinks>> {
    MapBuilder::new(options)?.classify(articles)
}
