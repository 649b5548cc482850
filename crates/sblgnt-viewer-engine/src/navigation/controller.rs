use super::index::NavigationIndex;

/// A resolved navigation target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JumpTarget {
    pub reference: String,
    pub chapter: u32,
    pub verse: u32,
    /// Position in the original verse list
    pub index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavigationError {
    #[error("No verses are loaded.")]
    NothingLoaded,
    #[error("Chapter {0} is not available.")]
    ChapterUnavailable(u32),
    #[error("{chapter}:{verse} is not available.")]
    VerseUnavailable { chapter: u32, verse: u32 },
    #[error("You have reached the final verse.")]
    AtEnd,
    #[error("You are at the beginning of the book.")]
    AtBeginning,
}

/// Resolve a chapter and optional verse against the index.
///
/// Without a verse the chapter's first verse in document order is chosen.
pub fn resolve_jump(
    index: &NavigationIndex,
    chapter: u32,
    verse: Option<u32>,
) -> Result<JumpTarget, NavigationError> {
    let summary = index
        .chapter(chapter)
        .ok_or(NavigationError::ChapterUnavailable(chapter))?;

    let slot = match verse {
        None => summary.first_verse(),
        Some(verse) => summary.find_verse(verse),
    }
    .ok_or(NavigationError::VerseUnavailable {
        chapter,
        verse: verse.unwrap_or_default(),
    })?;

    Ok(JumpTarget {
        reference: slot.reference.clone(),
        chapter,
        verse: slot.verse,
        index: slot.index,
    })
}

/// Step one reference forward or back from `active`.
///
/// With no active reference, `Next` lands on the first verse and `Previous`
/// on the last. Stepping past either end is an error, never a wrap.
pub fn resolve_step(
    index: &NavigationIndex,
    active: Option<&str>,
    direction: Direction,
) -> Result<JumpTarget, NavigationError> {
    let ordered = index.ordered_references();
    if ordered.is_empty() {
        return Err(NavigationError::NothingLoaded);
    }

    let position = match active.and_then(|reference| index.ordered_position(reference)) {
        None => match direction {
            Direction::Next => 0,
            Direction::Previous => ordered.len() - 1,
        },
        Some(current) => match direction {
            Direction::Next if current + 1 < ordered.len() => current + 1,
            Direction::Next => return Err(NavigationError::AtEnd),
            Direction::Previous if current > 0 => current - 1,
            Direction::Previous => return Err(NavigationError::AtBeginning),
        },
    };

    let entry = &ordered[position];
    Ok(JumpTarget {
        reference: entry.reference.clone(),
        chapter: entry.chapter,
        verse: entry.verse,
        index: entry.index,
    })
}
