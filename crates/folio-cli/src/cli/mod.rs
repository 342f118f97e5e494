use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod args;

pub use args::{SearchArgs, ShowArgs, SlugArg, TagArg, WebArgs};

#[derive(Debug, Parser)]
#[command(name = "folio")]
#[command(about = "Markdown documentation site engine", version)]
pub struct Cli {
    /// Site root; configuration and the docs directory resolve against it.
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Explicit config file path instead of `<root>/folio.toml`.
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List every document in corpus order.
    List,
    /// Print one document as JSON, or its rendered HTML with `--html`.
    Show(ShowArgs),
    /// Print the table of contents extracted from a document.
    Toc(SlugArg),
    /// List the tag vocabulary with per-tag document counts.
    Tags,
    /// Resolve a tag query, with similar-tag suggestions on a miss.
    Tag(TagArg),
    /// Full-text search across the corpus.
    Search(SearchArgs),
    /// List documents grouped by category.
    Categories,
    /// Validate the corpus: duplicate slugs and untitled documents.
    Check,
    /// Serve the documentation site over HTTP.
    Web(WebArgs),
}
