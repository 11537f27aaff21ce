use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bbking")]
#[command(author, version)]
#[command(about = "Compile BBCode-style markup to HTML")]
#[command(
    long_about = "bbking compiles bracket-tagged markup such as [b]bold[/b] or \
    [url=https://example.com]a link[/url] into HTML. Every tag renders through its own \
    template, which can be overridden from a template directory."
)]
#[command(after_help = "\
EXAMPLES:

    # Render a file to stdout
    bbking render post.bb

    # Render from stdin
    echo '[b]hello[/b]' | bbking render

    # Only load some tag libraries
    bbking render --library text --library quote post.bb

    # Override tag templates
    bbking render --template-dir ./templates post.bb

    # Inspect the parse tree
    bbking parse post.bb

CONFIGURATION:

Example bbking.yaml:

    tag_libraries: [text, hrefs, quote]
    template_dirs:
      - ./templates

Relative template directories are resolved against the config file.")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to a YAML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Tag library to load (repeatable; replaces the configured list)
    #[arg(long = "library", global = true, value_name = "NAME")]
    pub libraries: Vec<String>,

    /// Directory searched for tag templates (repeatable)
    #[arg(long = "template-dir", global = true, value_name = "DIR")]
    pub template_dirs: Vec<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render markup to HTML
    #[command(
        long_about = "Render markup to HTML. Reads FILE, or stdin when no file is given, and \
        writes the HTML to stdout. Exits with status 1 if the markup uses an unknown tag or a \
        template cannot be rendered."
    )]
    Render {
        /// Input file (stdin if not provided)
        file: Option<PathBuf>,
    },

    /// Parse markup and print the parse tree as JSON
    Parse {
        /// Input file (stdin if not provided)
        file: Option<PathBuf>,
    },

    /// List the available tags and how to write them
    Tags,
}
