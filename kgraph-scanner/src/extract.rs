use crate::result::{ArticleContent, Link};
use regex::Regex;
use scraper::{Html, Selector};
use std::collections::HashMap;
use std::sync::LazyLock;
use tracing::debug;

static INLINE_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("inline link pattern"));
static REFERENCE_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\[(\d+)\]").expect("reference link pattern"));
static REFERENCE_DEFINITION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(\d+)\]:\s+(\S+)").expect("reference definition pattern"));

/// Pick the links for an article: explicit links win, then markdown, then HTML.
pub fn resolve_links(content: &ArticleContent) -> Vec<Link> {
    if let Some(ref links) = content.links {
        return links.clone();
    }
    if let Some(ref markdown) = content.markdown {
        return extract_markdown_links(markdown);
    }
    if let Some(ref html) = content.html {
        return extract_html_links(html);
    }
    debug!("No link source for {}", content.url);
    Vec::new()
}

/// Inline links in document order, followed by reference-style links.
pub fn extract_markdown_links(markdown: &str) -> Vec<Link> {
    let mut links: Vec<Link> = INLINE_LINK
        .captures_iter(markdown)
        .filter_map(|cap| {
            // Drop an optional link title: [text](href "title")
            let href = cap[2].split_whitespace().next()?;
            Some(Link::new(&cap[1], href))
        })
        .collect();

    let definitions: HashMap<&str, &str> = REFERENCE_DEFINITION
        .captures_iter(markdown)
        .filter_map(|cap| Some((cap.get(1)?.as_str(), cap.get(2)?.as_str())))
        .collect();

    for cap in REFERENCE_LINK.captures_iter(markdown) {
        let number = &cap[2];
        match definitions.get(number) {
            Some(href) => links.push(Link::new(&cap[1], *href)),
            None => debug!("Reference [{}] has no definition, skipping", number),
        }
    }

    links
}

pub fn extract_html_links(html: &str) -> Vec<Link> {
    let document = Html::parse_document(html);
    let Ok(link_selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&link_selector)
        .filter_map(|element| {
            let href = element.value().attr("href")?;
            let text = element.text().collect::<String>();
            Some(Link::new(text.trim(), href))
        })
        .collect()
}
