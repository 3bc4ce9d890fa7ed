// Include handlers module directly from handlers.rs
#[path = "handlers.rs"]
pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::{
    BuildOptions, BuiltReport, exclusion_list, format_link_listing, load_articles, parse_format,
    report_destination, resolve_output_path, run_build,
};
