pub mod error;
pub mod filter;
pub mod map;
pub mod model;
pub mod normalize;
pub mod report;
pub mod rescale;

pub use error::GraphError;
pub use map::{GraphOptions, MapBuilder, build_graph};
pub use model::{Article, Edge, GraphResult, Node, UserInfo};

use colored::Colorize;

pub fn print_banner() {
    let banner = r#"
  _                            _
 | | ____ _ _ __ __ _ _ __ | |__
 | |/ / _` | '__/ _` | '_ \| '_ \
 |   < (_| | | | (_| | |_) | | | |
 |_|\_\__, |_|  \__,_| .__/|_| |_|
      |___/          |_|
"#;
    eprintln!("{}", banner.bright_yellow().bold());
    eprintln!(
        "  {} {}\n",
        "article link graphs".bright_white(),
        format!("v{}", env!("CARGO_PKG_VERSION")).bright_black()
    );
}
