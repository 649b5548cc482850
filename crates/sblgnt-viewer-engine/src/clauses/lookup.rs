use serde::Serialize;
use std::collections::HashMap;

use super::payload::{ClausePayload, ClauseRecord};

/// The part of one clause that falls inside a single verse.
///
/// Offsets are codepoint positions into that verse's text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClauseRange {
    pub clause_id: String,
    pub start_offset: usize,
    pub end_offset: usize,
    pub category_tags: Vec<String>,
    pub description: String,
}

/// Reference to sorted clause ranges, used when splitting verse text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClauseLookup {
    ranges: HashMap<String, Vec<ClauseRange>>,
}

impl ClauseLookup {
    pub fn build(payload: &ClausePayload) -> Self {
        let mut ranges: HashMap<String, Vec<ClauseRange>> = HashMap::new();

        for clause in payload.clauses.iter().filter(|c| !c.group_only) {
            let last = clause.references.len().saturating_sub(1);
            for (position, reference) in clause.references.iter().enumerate() {
                let (start_offset, end_offset) =
                    span_for_reference(clause, position, last, payload.character_counts.get(reference));
                ranges.entry(reference.clone()).or_default().push(ClauseRange {
                    clause_id: clause.clause_id.clone(),
                    start_offset,
                    end_offset,
                    category_tags: clause.category_tags.clone(),
                    description: describe(clause),
                });
            }
        }

        for list in ranges.values_mut() {
            list.sort_by(|a, b| {
                (a.start_offset, a.end_offset, &a.clause_id).cmp(&(
                    b.start_offset,
                    b.end_offset,
                    &b.clause_id,
                ))
            });
        }

        Self { ranges }
    }

    pub fn ranges_for(&self, reference: &str) -> &[ClauseRange] {
        self.ranges
            .get(reference)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn reference_count(&self) -> usize {
        self.ranges.len()
    }
}

fn span_for_reference(
    clause: &ClauseRecord,
    position: usize,
    last: usize,
    character_count: Option<&usize>,
) -> (usize, usize) {
    let verse_end = character_count.copied().unwrap_or(clause.end_offset);

    if last == 0 {
        (clause.start_offset, clause.end_offset.max(clause.start_offset))
    } else if position == 0 {
        (clause.start_offset, verse_end.max(clause.start_offset))
    } else if position == last {
        (0, clause.end_offset)
    } else {
        (0, verse_end)
    }
}

fn describe(clause: &ClauseRecord) -> String {
    clause
        .function
        .clone()
        .unwrap_or_else(|| clause.clause_id.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn lookup(value: serde_json::Value) -> ClauseLookup {
        ClauseLookup::build(&ClausePayload::from_value(&value))
    }

    fn spans(lookup: &ClauseLookup, reference: &str) -> Vec<(String, usize, usize)> {
        lookup
            .ranges_for(reference)
            .iter()
            .map(|r| (r.clause_id.clone(), r.start_offset, r.end_offset))
            .collect()
    }

    #[test]
    fn test_single_reference_clause_uses_offsets_directly() {
        let lookup = lookup(json!({
            "clauses": [{
                "clause_id": "c1",
                "function": "Title",
                "references": ["Mk 1:1"],
                "start": { "offset": 2 },
                "end": { "offset": 5 },
                "category_tags": ["main"]
            }]
        }));

        let ranges = lookup.ranges_for("Mk 1:1");
        assert_eq!(ranges.len(), 1);
        assert_eq!(ranges[0].start_offset, 2);
        assert_eq!(ranges[0].end_offset, 5);
        assert_eq!(ranges[0].description, "Title");
        assert_eq!(ranges[0].category_tags, vec!["main".to_string()]);
    }

    #[test]
    fn test_end_before_start_collapses_to_start() {
        let lookup = lookup(json!({
            "clauses": [{
                "clause_id": "c1",
                "references": ["Mk 1:1"],
                "start": { "offset": 6 },
                "end": { "offset": 2 }
            }]
        }));

        assert_eq!(spans(&lookup, "Mk 1:1"), vec![("c1".to_string(), 6, 6)]);
        assert_eq!(lookup.ranges_for("Mk 1:1")[0].description, "c1");
    }

    #[test]
    fn test_multi_reference_clause_is_split_per_verse() {
        let lookup = lookup(json!({
            "verses": [
                { "reference": "Mk 1:1", "character_count": 20 },
                { "reference": "Mk 1:2", "character_count": 30 }
            ],
            "clauses": [{
                "clause_id": "c1",
                "references": ["Mk 1:1", "Mk 1:2", "Mk 1:3"],
                "start": { "offset": 4 },
                "end": { "offset": 9 }
            }]
        }));

        assert_eq!(spans(&lookup, "Mk 1:1"), vec![("c1".to_string(), 4, 20)]);
        assert_eq!(spans(&lookup, "Mk 1:2"), vec![("c1".to_string(), 0, 30)]);
        assert_eq!(spans(&lookup, "Mk 1:3"), vec![("c1".to_string(), 0, 9)]);
    }

    #[test]
    fn test_multi_reference_without_counts_falls_back_to_end_offset() {
        let lookup = lookup(json!({
            "clauses": [{
                "clause_id": "c1",
                "references": ["Mk 1:1", "Mk 1:2", "Mk 1:3"],
                "start": { "offset": 1 },
                "end": { "offset": 7 }
            }]
        }));

        assert_eq!(spans(&lookup, "Mk 1:1"), vec![("c1".to_string(), 1, 7)]);
        assert_eq!(spans(&lookup, "Mk 1:2"), vec![("c1".to_string(), 0, 7)]);
    }

    #[test]
    fn test_group_only_and_unreferenced_clauses_are_excluded() {
        let lookup = lookup(json!({
            "clauses": [
                {
                    "clause_id": "group",
                    "references": ["Mk 1:1"],
                    "analysis": { "group_only": true }
                },
                { "clause_id": "floating", "references": [] }
            ]
        }));

        assert!(lookup.is_empty());
        assert!(lookup.ranges_for("Mk 1:1").is_empty());
    }

    #[test]
    fn test_ranges_sorted_by_start_end_and_id() {
        let lookup = lookup(json!({
            "clauses": [
                { "clause_id": "b", "references": ["Mk 1:1"], "start": { "offset": 5 }, "end": { "offset": 8 } },
                { "clause_id": "c", "references": ["Mk 1:1"], "start": { "offset": 0 }, "end": { "offset": 4 } },
                { "clause_id": "a", "references": ["Mk 1:1"], "start": { "offset": 5 }, "end": { "offset": 8 } },
                { "clause_id": "d", "references": ["Mk 1:1"], "start": { "offset": 5 }, "end": { "offset": 6 } }
            ]
        }));

        let ids: Vec<String> = spans(&lookup, "Mk 1:1").into_iter().map(|s| s.0).collect();
        assert_eq!(ids, vec!["c", "d", "a", "b"]);
    }
}
