use crate::CLAP_STYLING;
use clap::{arg, command};

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("kgraph")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("kgraph")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress banner and non-essential output").required(false))
        .subcommand_required(false)
        .subcommand(
            command!("build")
                .about(
                    "Build a link graph from an article collection. Articles become main nodes, \
                linked domains become secondary nodes.",
                )
                .arg(
                    arg!(-i --"input" <PATH>)
                        .required(true)
                        .help("Path to the article collection (JSON)")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                )
                .arg(
                    arg!(-l --"limit" <NUM_ARTICLES>)
                        .required(false)
                        .help("Maximum number of articles to use (0 for all)")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("0"),
                )
                .arg(
                    arg!(--"isolate")
                        .required(false)
                        .help("Give each article its own external domain nodes instead of shared hubs")
                        .action(clap::ArgAction::SetTrue),
                )
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Output format: json, vis, text, markdown")
                        .value_parser(["json", "vis", "text", "markdown", "md"])
                        .default_value("json"),
                )
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help("Save output to file (default: print to stdout)"),
                )
                .arg(
                    arg!(--"min-size" <SIZE>)
                        .required(false)
                        .help("Smallest article node size")
                        .value_parser(clap::value_parser!(f64))
                        .default_value("30"),
                )
                .arg(
                    arg!(--"max-size" <SIZE>)
                        .required(false)
                        .help("Largest article node size")
                        .value_parser(clap::value_parser!(f64))
                        .default_value("70"),
                )
                .arg(
                    arg!(--"exclude" <PATTERN>)
                        .required(false)
                        .help("Additional case-insensitive substring to exclude links by (repeatable)")
                        .action(clap::ArgAction::Append),
                )
                .arg(
                    arg!(--"no-default-excludes")
                        .required(false)
                        .help("Do not exclude image and stock-photo links by default")
                        .action(clap::ArgAction::SetTrue),
                )
                .arg(
                    arg!(-v --"verbose")
                        .required(false)
                        .help("Log every skipped link and node decision")
                        .action(clap::ArgAction::SetTrue),
                ),
        )
        .subcommand(
            command!("links")
                .about("List each article's links and how they would be classified")
                .arg(
                    arg!(-i --"input" <PATH>)
                        .required(true)
                        .help("Path to the article collection (JSON)")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                )
                .arg(
                    arg!(-l --"limit" <NUM_ARTICLES>)
                        .required(false)
                        .help("Maximum number of articles to use (0 for all)")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("0"),
                )
                .arg(
                    arg!(--"exclude" <PATTERN>)
                        .required(false)
                        .help("Additional case-insensitive substring to exclude links by (repeatable)")
                        .action(clap::ArgAction::Append),
                )
                .arg(
                    arg!(--"no-default-excludes")
                        .required(false)
                        .help("Do not exclude image and stock-photo links by default")
                        .action(clap::ArgAction::SetTrue),
                )
                .arg(
                    arg!(-v --"verbose")
                        .required(false)
                        .help("Enable debug logging")
                        .action(clap::ArgAction::SetTrue),
                ),
        )
}
