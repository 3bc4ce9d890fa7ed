// Link filtering: URL validity and the exclusion list

use crate::error::Result;
use regex::{Regex, RegexBuilder};
use std::fmt;
use url::Url;

/// Stock-photo providers and image assets that never become nodes.
pub const DEFAULT_EXCLUDE_PATTERNS: &[&str] = &[
    "unsplash",
    "shutterstock",
    "freepi",
    ".png",
    ".jpeg",
    ".gif",
    ".jpg",
];

const ALLOWED_SCHEMES: &[&str] = &["http", "https", "ftp"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkDecision {
    Accept,
    Empty,
    InvalidUrl,
    Excluded,
}

impl fmt::Display for LinkDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            LinkDecision::Accept => "accepted",
            LinkDecision::Empty => "empty href",
            LinkDecision::InvalidUrl => "invalid url",
            LinkDecision::Excluded => "excluded",
        };
        f.write_str(reason)
    }
}

pub fn default_exclude_patterns() -> Vec<String> {
    DEFAULT_EXCLUDE_PATTERNS.iter().map(|p| p.to_string()).collect()
}

/// Decides which hrefs qualify for the graph.
#[derive(Debug, Clone)]
pub struct LinkFilter {
    patterns: Vec<String>,
    exclude: Option<Regex>,
}

impl LinkFilter {
    /// Patterns are literal substrings, matched case-insensitively.
    pub fn new(patterns: &[String]) -> Result<Self> {
        let patterns: Vec<String> = patterns
            .iter()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();

        let exclude = compile_exclusions(&patterns)?;

        Ok(Self { patterns, exclude })
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn check(&self, href: &str) -> LinkDecision {
        if href.trim().is_empty() {
            LinkDecision::Empty
        } else if !is_valid_url(href) {
            LinkDecision::InvalidUrl
        } else if self.is_excluded(href) {
            LinkDecision::Excluded
        } else {
            LinkDecision::Accept
        }
    }

    pub fn is_excluded(&self, href: &str) -> bool {
        self.exclude
            .as_ref()
            .is_some_and(|pattern| pattern.is_match(href))
    }
}

impl Default for LinkFilter {
    fn default() -> Self {
        let patterns = default_exclude_patterns();
        // Escaped constant literals always compile
        let exclude = compile_exclusions(&patterns).ok().flatten();
        Self { patterns, exclude }
    }
}

fn compile_exclusions(patterns: &[String]) -> std::result::Result<Option<Regex>, regex::Error> {
    if patterns.is_empty() {
        return Ok(None);
    }

    let alternation = patterns
        .iter()
        .map(|p| regex::escape(p))
        .collect::<Vec<_>>()
        .join("|");
    RegexBuilder::new(&alternation)
        .case_insensitive(true)
        .build()
        .map(Some)
}

/// An absolute http(s) or ftp URL with a host.
pub fn is_valid_url(href: &str) -> bool {
    if href.chars().any(char::is_whitespace) {
        return false;
    }
    Url::parse(href).is_ok_and(|url| {
        ALLOWED_SCHEMES.contains(&url.scheme()) && url.host_str().is_some_and(|h| !h.is_empty())
    })
}
