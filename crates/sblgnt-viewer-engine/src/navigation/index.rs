use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::LazyLock;

use crate::models::Verse;

static REFERENCE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\S.*) (\d+):(\d+)$").expect("reference pattern is a valid regex")
});

/// The parts of a `"<book> <chapter>:<verse>"` reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceParts {
    pub book: String,
    pub chapter: u32,
    pub verse: u32,
}

/// Split a reference into book, chapter and verse.
///
/// The book name is everything before the last space-delimited
/// `chapter:verse` token. Chapter and verse must be positive integers.
pub fn parse_reference(reference: &str) -> Option<ReferenceParts> {
    let captures = REFERENCE_PATTERN.captures(reference)?;
    let chapter: u32 = captures[2].parse().ok().filter(|n| *n > 0)?;
    let verse: u32 = captures[3].parse().ok().filter(|n| *n > 0)?;

    Some(ReferenceParts {
        book: captures[1].to_string(),
        chapter,
        verse,
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerseSlot {
    pub verse: u32,
    /// Position in the original verse list
    pub index: usize,
    pub reference: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChapterSummary {
    pub chapter: u32,
    pub start_index: usize,
    pub end_index: usize,
    pub start_reference: String,
    pub end_reference: String,
    pub verses: Vec<VerseSlot>,
}

impl ChapterSummary {
    fn open(chapter: u32, slot: VerseSlot) -> Self {
        Self {
            chapter,
            start_index: slot.index,
            end_index: slot.index,
            start_reference: slot.reference.clone(),
            end_reference: slot.reference.clone(),
            verses: vec![slot],
        }
    }

    fn extend(&mut self, slot: VerseSlot) {
        self.end_index = slot.index;
        self.end_reference = slot.reference.clone();
        self.verses.push(slot);
    }

    pub fn first_verse(&self) -> Option<&VerseSlot> {
        self.verses.first()
    }

    pub fn find_verse(&self, verse: u32) -> Option<&VerseSlot> {
        self.verses.iter().find(|slot| slot.verse == verse)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReferenceLocation {
    pub index: usize,
    pub chapter: u32,
    pub verse: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderedReference {
    pub index: usize,
    pub reference: String,
    pub chapter: u32,
    pub verse: u32,
}

/// Lookup structures over a loaded verse list.
///
/// Rebuilt from scratch whenever the verses change. Verses whose reference
/// does not parse are absent from every lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationIndex {
    chapters: Vec<ChapterSummary>,
    chapter_lookup: HashMap<u32, usize>,
    reference_lookup: HashMap<String, ReferenceLocation>,
    ordered_references: Vec<OrderedReference>,
}

impl NavigationIndex {
    pub fn build(verses: &[Verse]) -> Self {
        let mut index = Self::default();
        let mut current: Option<usize> = None;

        for (position, verse) in verses.iter().enumerate() {
            let Some(parts) = parse_reference(&verse.reference) else {
                log::debug!("Skipping unparseable reference {:?}", verse.reference);
                continue;
            };

            let slot = VerseSlot {
                verse: parts.verse,
                index: position,
                reference: verse.reference.clone(),
            };

            let same_chapter = current
                .map(|at| index.chapters[at].chapter == parts.chapter)
                .unwrap_or(false);

            if same_chapter {
                if let Some(at) = current {
                    index.chapters[at].extend(slot);
                }
            } else if let Some(&existing) = index.chapter_lookup.get(&parts.chapter) {
                index.chapters[existing].extend(slot);
                current = Some(existing);
            } else {
                index.chapters.push(ChapterSummary::open(parts.chapter, slot));
                let at = index.chapters.len() - 1;
                index.chapter_lookup.insert(parts.chapter, at);
                current = Some(at);
            }

            index.reference_lookup.insert(
                verse.reference.clone(),
                ReferenceLocation {
                    index: position,
                    chapter: parts.chapter,
                    verse: parts.verse,
                },
            );
            index.ordered_references.push(OrderedReference {
                index: position,
                reference: verse.reference.clone(),
                chapter: parts.chapter,
                verse: parts.verse,
            });
        }

        index
    }

    pub fn chapters(&self) -> &[ChapterSummary] {
        &self.chapters
    }

    pub fn chapter(&self, chapter: u32) -> Option<&ChapterSummary> {
        self.chapter_lookup
            .get(&chapter)
            .and_then(|at| self.chapters.get(*at))
    }

    pub fn location(&self, reference: &str) -> Option<&ReferenceLocation> {
        self.reference_lookup.get(reference)
    }

    pub fn ordered_references(&self) -> &[OrderedReference] {
        &self.ordered_references
    }

    /// Position of `reference` within [`Self::ordered_references`]
    pub fn ordered_position(&self, reference: &str) -> Option<usize> {
        let location = self.location(reference)?;
        self.ordered_references
            .binary_search_by_key(&location.index, |entry| entry.index)
            .ok()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered_references.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ordered_references.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn verses(references: &[&str]) -> Vec<Verse> {
        references
            .iter()
            .map(|reference| Verse::new(*reference, "text"))
            .collect()
    }

    #[rstest]
    #[case("Mk 1:1", Some(("Mk", 1, 1)))]
    #[case("1 John 3:16", Some(("1 John", 3, 16)))]
    #[case("Mark 16:20", Some(("Mark", 16, 20)))]
    #[case("Mk 0:1", None)]
    #[case("Mk 1:0", None)]
    #[case("Mk 1", None)]
    #[case("1:1", None)]
    #[case(" Mk 1:1", None)]
    #[case("Mk 1:1a", None)]
    #[case("TITLE", None)]
    fn test_parse_reference(#[case] reference: &str, #[case] expected: Option<(&str, u32, u32)>) {
        let parsed = parse_reference(reference).map(|p| (p.book, p.chapter, p.verse));
        assert_eq!(
            parsed,
            expected.map(|(book, chapter, verse)| (book.to_string(), chapter, verse))
        );
    }

    #[test]
    fn test_empty_input_builds_empty_index() {
        let index = NavigationIndex::build(&[]);
        assert!(index.is_empty());
        assert!(index.chapters().is_empty());
        assert_eq!(index.chapter(1), None);
    }

    #[test]
    fn test_chapters_track_start_and_end() {
        let index = NavigationIndex::build(&verses(&["Mk 1:1", "Mk 1:2", "Mk 2:1", "Mk 2:2", "Mk 2:3"]));

        assert_eq!(index.chapters().len(), 2);
        let second = index.chapter(2).unwrap();
        assert_eq!(second.start_index, 2);
        assert_eq!(second.end_index, 4);
        assert_eq!(second.start_reference, "Mk 2:1");
        assert_eq!(second.end_reference, "Mk 2:3");
        assert_eq!(second.verses.len(), 3);
    }

    #[test]
    fn test_malformed_reference_does_not_split_chapter() {
        let index = NavigationIndex::build(&verses(&["Mk 1:1", "heading", "Mk 1:2", "Mk 2:1"]));

        assert_eq!(index.chapters().len(), 2);
        let first = index.chapter(1).unwrap();
        assert_eq!(first.start_index, 0);
        assert_eq!(first.end_index, 2);
        assert_eq!(
            first.verses.iter().map(|v| v.index).collect::<Vec<_>>(),
            vec![0, 2]
        );
        assert_eq!(index.location("heading"), None);
        assert_eq!(index.location("Mk 1:2").map(|l| l.index), Some(2));
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn test_returning_chapter_reuses_entry() {
        let index = NavigationIndex::build(&verses(&["Mk 1:1", "Mk 2:1", "Mk 1:2"]));

        assert_eq!(index.chapters().len(), 2);
        assert_eq!(index.chapter(1).unwrap().end_reference, "Mk 1:2");
        assert_eq!(index.chapter(1).unwrap().verses.len(), 2);
    }

    #[test]
    fn test_ordered_position_follows_document_order() {
        let index = NavigationIndex::build(&verses(&["Mk 1:1", "bad", "Mk 1:2", "Mk 1:3"]));

        assert_eq!(index.ordered_position("Mk 1:1"), Some(0));
        assert_eq!(index.ordered_position("Mk 1:2"), Some(1));
        assert_eq!(index.ordered_position("Mk 1:3"), Some(2));
        assert_eq!(index.ordered_position("bad"), None);
    }

    #[test]
    fn test_chapter_summaries_snapshot() {
        let index = NavigationIndex::build(&verses(&["Mk 1:1", "Mk 1:2", "Mk 2:1"]));
        insta::assert_debug_snapshot!(index.chapters());
    }
}
