//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use sblgnt_viewer_engine::data::inspect::CorpusSource;

#[derive(Parser, Debug)]
#[command(
    name = "sblgnt-viewer-cli",
    version,
    about = "Read the SBL Greek New Testament in the terminal"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Open the terminal reader.
    Read(ReadArgs),

    /// Convert a plain-text book into viewer JSON and register it in a manifest.
    BuildData(BuildDataArgs),

    /// Print verses from a directory of plain-text books for spot-checking.
    Inspect(InspectArgs),
}

#[derive(Args, Debug, Default)]
pub struct ReadArgs {
    /// Directory that viewer URLs resolve against (default: config file `data_root`).
    #[arg(value_name = "DATA_ROOT")]
    pub data_root: Option<PathBuf>,

    /// Book id to open instead of the manifest's preferred book.
    #[arg(long, value_name = "BOOK_ID")]
    pub book: Option<String>,

    /// Book JSON to load when no manifest is available.
    #[arg(long = "data-url", value_name = "URL")]
    pub data_url: Option<String>,

    /// Manifest listing the available books.
    #[arg(long = "manifest-url", value_name = "URL")]
    pub manifest_url: Option<String>,

    /// Start with the clause overlay switched off.
    #[arg(long = "no-clauses")]
    pub no_clauses: bool,
}

#[derive(Args, Debug)]
pub struct BuildDataArgs {
    /// Plain-text source: header line followed by `Book C:V text` lines.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Where to write the book JSON.
    #[arg(long, short, value_name = "PATH")]
    pub output: PathBuf,

    /// Book id (default: lower-cased input file stem).
    #[arg(long = "book-id")]
    pub book_id: Option<String>,

    /// Display name (default: input file stem).
    #[arg(long = "display-name")]
    pub display_name: Option<String>,

    /// Manifest to create or update (default: `manifest.json` beside the output).
    #[arg(long, value_name = "PATH")]
    pub manifest: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// SBLGNT data directory holding `text/` and `xml/` book folders.
    #[arg(value_name = "CORPUS_DIR")]
    pub corpus_dir: PathBuf,

    /// Book identifier to inspect.
    #[arg(long, default_value = "Mark")]
    pub book: String,

    /// Corpus to read verses from.
    #[arg(long, value_enum, default_value_t = SourceArg::Xml)]
    pub source: SourceArg,

    /// Maximum number of verses to display (0 shows everything).
    #[arg(long, default_value_t = 20)]
    pub limit: usize,

    /// Start at the first verse whose reference starts with this value.
    #[arg(long)]
    pub start: Option<String>,

    /// Only show verses containing this exact substring.
    #[arg(long)]
    pub contains: Option<String>,

    /// Only list the available books for the selected source.
    #[arg(long = "list-books")]
    pub list_books: bool,

    /// Include paragraph indices when rendering XML verses.
    #[arg(long = "show-paragraphs")]
    pub show_paragraphs: bool,

    /// Wrap verse output to this column width.
    #[arg(long, default_value_t = 88)]
    pub width: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SourceArg {
    Xml,
    Text,
}

impl From<SourceArg> for CorpusSource {
    fn from(source: SourceArg) -> Self {
        match source {
            SourceArg::Xml => CorpusSource::Xml,
            SourceArg::Text => CorpusSource::Text,
        }
    }
}
