use anyhow::{Context, Result};
use clap::ArgMatches;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use kgraph_core::filter::default_exclude_patterns;
use kgraph_core::map::{ArticleLinks, GraphOptions, LinkTarget, build_graph, classify_links};
use kgraph_core::model::{Article, UserInfo};
use kgraph_core::report::{ReportFormat, generate_report, save_report};
use kgraph_core::rescale::SizeRange;
use kgraph_scanner::load_collection;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::Level;

/// Options for a single `build` invocation
pub struct BuildOptions {
    pub input: PathBuf,
    pub limit: usize,
    pub format: ReportFormat,
    pub output: Option<PathBuf>,
    pub graph: GraphOptions,
}

/// A loaded collection, ready for the graph builder.
pub struct LoadedArticles {
    pub username: String,
    pub user: UserInfo,
    pub articles: Vec<Article>,
}

pub fn parse_format(s: &str) -> Result<ReportFormat, String> {
    ReportFormat::from_str(s).ok_or_else(|| format!("Unknown report format '{}'", s))
}

/// Expand `~` in a user-supplied output path
pub fn resolve_output_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}

pub fn load_articles(path: &Path, limit: usize) -> Result<LoadedArticles> {
    let collection = load_collection(path, limit)
        .with_context(|| format!("Failed to load articles from {}", path.display()))?;

    Ok(LoadedArticles {
        username: collection.user.username.clone(),
        user: UserInfo::from(&collection.user),
        articles: collection.articles.iter().map(Article::from).collect(),
    })
}

/// A rendered report and, when one was requested, the file it went to.
pub struct BuiltReport {
    pub content: String,
    pub written_to: Option<PathBuf>,
}

/// The file a report is written to. A directory gets `<username>.<ext>`.
pub fn report_destination(output: &Path, username: &str, format: ReportFormat) -> PathBuf {
    if output.is_dir() {
        output.join(format!("{}.{}", username, format.extension()))
    } else {
        output.to_path_buf()
    }
}

/// Load, build and render. Writes to `options.output` when set and returns
/// the rendered report either way.
pub fn run_build(options: &BuildOptions) -> Result<BuiltReport> {
    let loaded = load_articles(&options.input, options.limit)?;
    let graph = build_graph(&loaded.articles, &loaded.user, options.graph.clone())
        .context("Failed to build graph")?;
    let content = generate_report(&graph, options.format, &loaded.username)
        .context("Failed to render report")?;

    let written_to = match options.output {
        Some(ref output) => {
            let path = report_destination(output, &loaded.username, options.format);
            save_report(&content, &path)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            Some(path)
        }
        None => None,
    };

    Ok(BuiltReport {
        content,
        written_to,
    })
}

pub fn format_link_listing(classified: &[ArticleLinks]) -> String {
    let mut listing = String::new();

    for article in classified {
        listing.push_str(&format!("#{} {}\n", article.id, article.url));
        if article.links.is_empty() {
            listing.push_str("    (no links)\n");
        }
        for (link, target) in &article.links {
            let marker = match target {
                LinkTarget::Article(_) => "*",
                LinkTarget::External(_) => "+",
                LinkTarget::Skipped(_) => "-",
            };
            listing.push_str(&format!("  {} {} -> {}\n", marker, link.href, target));
        }
        listing.push('\n');
    }

    listing
}

fn graph_options_from_args(args: &ArgMatches) -> Result<GraphOptions, String> {
    let min_size = *args.get_one::<f64>("min-size").unwrap_or(&30.0);
    let max_size = *args.get_one::<f64>("max-size").unwrap_or(&70.0);
    let size_range = SizeRange::new(min_size, max_size).map_err(|e| e.to_string())?;

    Ok(GraphOptions {
        isolate_articles: args.get_flag("isolate"),
        size_range,
        exclude_patterns: exclude_patterns_from_args(args),
        ..GraphOptions::default()
    })
}

/// The exclusion list: the defaults unless disabled, then any extra patterns.
pub fn exclusion_list(use_defaults: bool, extra: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut patterns = if use_defaults {
        default_exclude_patterns()
    } else {
        Vec::new()
    };
    patterns.extend(extra);
    patterns
}

fn exclude_patterns_from_args(args: &ArgMatches) -> Vec<String> {
    let extra = args
        .get_many::<String>("exclude")
        .into_iter()
        .flatten()
        .cloned();
    exclusion_list(!args.get_flag("no-default-excludes"), extra)
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        pb.set_style(style);
    }
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(message.to_string());
    pb
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("{} {}", "✗".red().bold(), message);
    std::process::exit(1);
}

pub fn handle_build(sub_matches: &ArgMatches) {
    init_tracing(sub_matches.get_flag("verbose"));

    let Some(input) = sub_matches.get_one::<PathBuf>("input") else {
        fail("--input is required");
    };
    let limit = *sub_matches.get_one::<usize>("limit").unwrap_or(&0);
    let format = sub_matches
        .get_one::<String>("format")
        .map(|f| parse_format(f))
        .unwrap_or(Ok(ReportFormat::Json))
        .unwrap_or_else(|e| fail(e));
    let output = sub_matches
        .get_one::<String>("output")
        .map(|p| resolve_output_path(p));
    let graph = graph_options_from_args(sub_matches).unwrap_or_else(|e| fail(e));

    let isolation = if graph.isolate_articles {
        "isolated (per-article domain nodes)"
    } else {
        "shared (domain hubs across articles)"
    };
    eprintln!("{} Input: {}", "→".blue(), input.display().to_string().bright_white());
    eprintln!("{} Domains: {}", "→".blue(), isolation);

    let options = BuildOptions {
        input: input.clone(),
        limit,
        format,
        output,
        graph,
    };

    let pb = spinner("Building graph...");
    let built = match run_build(&options) {
        Ok(built) => built,
        Err(e) => {
            pb.finish_and_clear();
            fail(format!("{:#}", e));
        }
    };
    pb.finish_and_clear();

    match built.written_to {
        Some(ref path) => eprintln!(
            "{} Report written: {}",
            "✓".green().bold(),
            path.display().to_string().bright_white()
        ),
        None => print!("{}", built.content),
    }
}

pub fn handle_links(sub_matches: &ArgMatches) {
    init_tracing(sub_matches.get_flag("verbose"));

    let Some(input) = sub_matches.get_one::<PathBuf>("input") else {
        fail("--input is required");
    };
    let limit = *sub_matches.get_one::<usize>("limit").unwrap_or(&0);

    let loaded = load_articles(input, limit).unwrap_or_else(|e| fail(format!("{:#}", e)));
    let options = GraphOptions {
        exclude_patterns: exclude_patterns_from_args(sub_matches),
        ..GraphOptions::default()
    };
    let classified = classify_links(&loaded.articles, options).unwrap_or_else(|e| fail(e));

    print!("{}", format_link_listing(&classified));
}
