//! CLI argument parsing for docreader

use clap::{CommandFactory, Parser};
use std::path::PathBuf;
use tracing::debug;

const AFTER_HELP: &str = "\
Topics are paths relative to the content root, without the .md extension.
Append .adv to a topic to read its advanced companion document.

Examples:
  dr express/middleware        Show the basic document
  dr express/middleware.adv    Show the advanced document
  dr --list                    List every available topic";

#[derive(Parser, Debug)]
#[command(name = "dr")]
#[command(author, version, about = "Read topic documentation from the bundled Markdown tree", long_about = None)]
#[command(after_help = AFTER_HELP)]
pub struct Cli {
    /// Topic to display (e.g. express/middleware)
    pub topic: Option<String>,

    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,

    /// Content root to read documents from
    #[arg(short, long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// List every available topic
    #[arg(long, conflicts_with = "topic")]
    pub list: bool,
}

/// Static usage listing shown when no topic is given
pub fn help_text() -> String {
    Cli::command().render_help().to_string()
}

/// Output format for rendered documents
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        debug!(%s, "OutputFormat::from_str: called");
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {}. Use: text or json", s)),
        }
    }
}
