use kgraph::handlers::*;
use kgraph_core::map::{GraphOptions, classify_links};
use kgraph_core::model::GraphResult;
use kgraph_core::report::ReportFormat;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

const COLLECTION: &str = r#"{
    "user": {"username": "writer", "profile": "Writes about Rust", "image_url": "https://img.io/me.png"},
    "articles": [
        {
            "url": "https://blog.io/@writer/ownership-101",
            "voter_count": 40,
            "title": "Ownership 101",
            "description": "Borrowing basics",
            "markdown": "See [the book](https://doc.rust-lang.org/book/) and [part two](https://blog.io/@writer/lifetimes-202?source=series).\n![cover](https://images.unsplash.com/cover.jpg)"
        },
        {
            "url": "https://blog.io/@writer/lifetimes-202",
            "voter_count": 10,
            "title": "Lifetimes 202",
            "links": [
                {"text": "nomicon", "href": "https://doc.rust-lang.org/nomicon/"},
                {"text": "", "href": ""}
            ]
        }
    ]
}"#;

fn collection_file() -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "{}", COLLECTION).unwrap();
    temp_file
}

fn options(input: PathBuf, format: ReportFormat) -> BuildOptions {
    BuildOptions {
        input,
        limit: 0,
        format,
        output: None,
        graph: GraphOptions::default(),
    }
}

#[test]
fn test_parse_format() {
    assert_eq!(parse_format("json"), Ok(ReportFormat::Json));
    assert_eq!(parse_format("MD"), Ok(ReportFormat::Markdown));
    assert!(parse_format("pdf").unwrap_err().contains("Unknown report format"));
}

#[test]
fn test_resolve_output_path_plain() {
    assert_eq!(
        resolve_output_path("output/graph.json"),
        PathBuf::from("output/graph.json")
    );
}

#[test]
fn test_resolve_output_path_expands_tilde() {
    let resolved = resolve_output_path("~/graph.json");
    assert!(resolved.ends_with("graph.json"));
    if std::env::var_os("HOME").is_some() {
        assert!(!resolved.to_string_lossy().starts_with('~'));
    }
}

#[test]
fn test_load_articles_resolves_links() {
    let file = collection_file();
    let loaded = load_articles(file.path(), 0).unwrap();

    assert_eq!(loaded.username, "writer");
    assert_eq!(loaded.user.profile, "Writes about Rust");
    assert_eq!(loaded.articles.len(), 2);
    assert_eq!(loaded.articles[0].links.len(), 3);
    assert_eq!(loaded.articles[1].links.len(), 2);
}

#[test]
fn test_load_articles_missing_file() {
    let result = load_articles(&PathBuf::from("/nonexistent/articles.json"), 0);
    let message = format!("{:#}", result.err().unwrap());

    assert!(message.contains("Failed to load articles"));
}

#[test]
fn test_run_build_json() {
    let file = collection_file();
    let report = run_build(&options(file.path().to_path_buf(), ReportFormat::Json))
        .unwrap()
        .content;
    let graph: GraphResult = serde_json::from_str(&report).unwrap();

    assert_eq!(graph.article_nodes().count(), 2);
    let externals: Vec<_> = graph.external_nodes().collect();
    assert_eq!(externals.len(), 1);
    assert_eq!(externals[0].domain, "doc.rust-lang.org");
    assert_eq!(externals[0].reference_count, 2);
    // ownership <-> book, ownership <-> lifetimes, lifetimes <-> book
    assert_eq!(graph.edges.len(), 3);
    assert_eq!(graph.user_image, "https://img.io/me.png");
}

#[test]
fn test_run_build_isolated() {
    let file = collection_file();
    let mut opts = options(file.path().to_path_buf(), ReportFormat::Json);
    opts.graph.isolate_articles = true;

    let report = run_build(&opts).unwrap().content;
    let graph: GraphResult = serde_json::from_str(&report).unwrap();

    assert_eq!(graph.externals_for_domain("doc.rust-lang.org").count(), 2);
}

#[test]
fn test_run_build_respects_limit() {
    let file = collection_file();
    let mut opts = options(file.path().to_path_buf(), ReportFormat::Json);
    opts.limit = 1;

    let report = run_build(&opts).unwrap().content;
    let graph: GraphResult = serde_json::from_str(&report).unwrap();

    assert_eq!(graph.article_nodes().count(), 1);
    // The link to part two now resolves to an external domain
    assert_eq!(graph.external_nodes().count(), 2);
}

#[test]
fn test_run_build_writes_output() -> Result<(), Box<dyn std::error::Error>> {
    let file = collection_file();
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("writer.md");
    let mut opts = options(file.path().to_path_buf(), ReportFormat::Markdown);
    opts.output = Some(path.clone());

    let built = run_build(&opts)?;

    assert_eq!(built.written_to, Some(path.clone()));
    assert_eq!(std::fs::read_to_string(&path)?, built.content);
    assert!(built.content.contains("# Link graph: writer"));
    Ok(())
}

#[test]
fn test_run_build_output_directory_uses_username() -> Result<(), Box<dyn std::error::Error>> {
    let file = collection_file();
    let dir = tempfile::tempdir()?;
    let mut opts = options(file.path().to_path_buf(), ReportFormat::Text);
    opts.output = Some(dir.path().to_path_buf());

    let built = run_build(&opts)?;
    let expected = dir.path().join("writer.txt");

    assert_eq!(built.written_to, Some(expected.clone()));
    assert_eq!(std::fs::read_to_string(&expected)?, built.content);
    Ok(())
}

#[test]
fn test_report_destination_keeps_file_paths() {
    let path = PathBuf::from("/nonexistent/graph.json");
    assert_eq!(report_destination(&path, "writer", ReportFormat::Vis), path);
}

#[test]
fn test_format_link_listing() {
    let file = collection_file();
    let loaded = load_articles(file.path(), 0).unwrap();
    let classified = classify_links(&loaded.articles, GraphOptions::default()).unwrap();

    let listing = format_link_listing(&classified);

    assert!(listing.contains("#1 https://blog.io/@writer/ownership-101"));
    assert!(listing.contains("https://doc.rust-lang.org/book/ -> external doc.rust-lang.org"));
    assert!(listing.contains("-> article #2"));
    assert!(listing.contains("skipped (excluded)"));
    assert!(listing.contains("skipped (empty href)"));
}

#[test]
fn test_exclusion_list_replaces_defaults() {
    let with_defaults = exclusion_list(true, vec!["x.com".to_string()]);
    assert!(with_defaults.iter().any(|p| p == "unsplash"));
    assert_eq!(with_defaults.last().map(String::as_str), Some("x.com"));

    let custom = exclusion_list(false, vec!["nomicon".to_string()]);
    assert_eq!(custom, vec!["nomicon".to_string()]);
}

#[test]
fn test_link_listing_follows_custom_exclusions() {
    let file = collection_file();
    let loaded = load_articles(file.path(), 0).unwrap();
    let options = GraphOptions {
        exclude_patterns: exclusion_list(false, vec!["nomicon".to_string()]),
        ..GraphOptions::default()
    };
    let classified = classify_links(&loaded.articles, options).unwrap();

    let listing = format_link_listing(&classified);

    assert!(listing.contains("https://images.unsplash.com/cover.jpg -> external images.unsplash.com"));
    assert!(listing.contains("https://doc.rust-lang.org/nomicon/ -> skipped (excluded)"));
}
