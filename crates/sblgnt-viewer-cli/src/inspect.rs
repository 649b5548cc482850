use anyhow::Result;
use sblgnt_viewer_engine::data::inspect::{
    CorpusSource, InspectedVerse, filter_verses, list_books, read_book, resolve_source_dir,
};
use std::io::Write;
use textwrap::Options;

use crate::cli::InspectArgs;

const NO_MATCHES: &str = "No verses matched the requested filters.";

/// Print the books or verses `args` selects to `out`
pub fn run(args: &InspectArgs, out: &mut impl Write) -> Result<()> {
    let source = CorpusSource::from(args.source);
    let dir = resolve_source_dir(&args.corpus_dir, source)?;

    if args.list_books {
        for book in list_books(&dir, source)? {
            writeln!(out, "{book}")?;
        }
        return Ok(());
    }

    let (header, verses) = read_book(&dir, &args.book, source)?;
    let verses = filter_verses(verses, args.start.as_deref(), args.contains.as_deref())?;
    log::debug!("{} verses selected from {}", verses.len(), args.book);

    // The header is noise once the output is a search result
    let show_header = args.contains.is_none() && args.start.is_none() && !header.is_empty();
    if verses.is_empty() && !show_header {
        writeln!(out, "{NO_MATCHES}")?;
        return Ok(());
    }
    if show_header {
        writeln!(out, "{header}")?;
    }

    let limit = if args.limit == 0 { verses.len() } else { args.limit };
    for verse in verses.iter().take(limit) {
        writeln!(out, "{}", format_verse(verse, args.width, args.show_paragraphs))?;
    }
    Ok(())
}

/// `<reference>: <text>`, wrapped with continuation lines aligned under the text.
///
/// With `show_paragraphs`, XML verses carry their paragraph as `[¶n]`.
pub fn format_verse(verse: &InspectedVerse, width: usize, show_paragraphs: bool) -> String {
    let reference = match verse.paragraph_index {
        Some(index) if show_paragraphs => format!("{} [¶{index}]", verse.reference),
        _ => verse.reference.clone(),
    };
    let first = format!("{reference}: ");
    let rest = " ".repeat(first.chars().count());
    let options = Options::new(width)
        .initial_indent(&first)
        .subsequent_indent(&rest);
    textwrap::fill(&verse.text, options)
}
