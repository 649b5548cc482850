mod common;

use common::{FakeFetch, RecordingConsole};
use pretty_assertions::assert_eq;
use sblgnt_viewer_engine::{LoadBookOptions, Surface, TextRun, Viewer, ViewerHost};
use serde_json::json;

fn clause_fetch() -> FakeFetch {
    FakeFetch::new()
        .json(
            "data/manifest.json",
            json!({
                "books": [{
                    "book_id": "mark",
                    "display_name": "Gospel of Mark",
                    "data_url": "data/mark.json",
                    "clause_data_url": "data/mark.clauses.json"
                }]
            }),
        )
        .json(
            "data/mark.json",
            json!({
                "book_id": "mark",
                "display_name": "Gospel of Mark",
                "verses": [
                    { "reference": "Mk 1:1", "text": "0123456789" },
                    { "reference": "Mk 1:2", "text": "abcdefghij" }
                ]
            }),
        )
        .json(
            "data/mark.clauses.json",
            json!({
                "verses": [
                    { "reference": "Mk 1:1", "character_count": 10 },
                    { "reference": "Mk 1:2", "character_count": 10 }
                ],
                "clauses": [
                    {
                        "clause_id": "c1",
                        "function": "Title",
                        "references": ["Mk 1:1"],
                        "start": { "offset": 2 },
                        "end": { "offset": 5 },
                        "category_tags": ["main"],
                        "parent_clause_id": "g1",
                        "source": { "method": "manual", "reviewed_by": ["Ann", "Bo"] }
                    },
                    {
                        "clause_id": "c2",
                        "function": "Quotation",
                        "references": ["Mk 1:1", "Mk 1:2"],
                        "start": { "offset": 7 },
                        "end": { "offset": 4 }
                    },
                    {
                        "clause_id": "g1",
                        "function": "Opening",
                        "references": ["Mk 1:1"],
                        "start": { "offset": 0 },
                        "end": { "offset": 10 },
                        "analysis": {
                            "group_only": true,
                            "sub_clauses": [{ "clause_id": "c1", "label": "Incipit", "role": "head" }]
                        }
                    }
                ]
            }),
        )
}

fn started_viewer(fetch: &FakeFetch) -> Viewer {
    let mut viewer = Viewer::new(ViewerHost::new(Surface::complete()).with_fetch(fetch.clone()));
    viewer.init();
    viewer
}

fn shape(viewer: &Viewer, at: usize) -> Vec<(Option<String>, String)> {
    viewer.surface().verses()[at]
        .runs
        .iter()
        .map(|run| (run.clause_id().map(str::to_string), run.text().to_string()))
        .collect()
}

fn run(id: Option<&str>, text: &str) -> (Option<String>, String) {
    (id.map(str::to_string), text.to_string())
}

#[test]
fn test_clauses_are_indexed_before_the_first_render() {
    let fetch = clause_fetch();
    let viewer = started_viewer(&fetch);

    assert_eq!(
        fetch.calls(),
        vec!["data/manifest.json", "data/mark.json", "data/mark.clauses.json"]
    );
    assert_eq!(
        shape(&viewer, 0),
        vec![
            run(None, "01"),
            run(Some("c1"), "234"),
            run(None, "56"),
            run(Some("c2"), "789"),
        ]
    );
    assert_eq!(
        shape(&viewer, 1),
        vec![run(Some("c2"), "abcd"), run(None, "efghij")]
    );

    let controls = viewer.surface().clause_controls.clone().unwrap();
    assert_eq!(controls.status_text, "Clause overlay available.");
    assert!(controls.toggle_checked);
    assert!(!controls.toggle_disabled);
}

#[test]
fn test_group_only_clauses_are_never_highlighted() {
    let viewer = started_viewer(&clause_fetch());

    let highlighted: Vec<&str> = viewer
        .surface()
        .verses()
        .iter()
        .flat_map(|verse| verse.runs.iter())
        .filter_map(TextRun::clause_id)
        .collect();
    assert!(!highlighted.contains(&"g1"));
}

#[test]
fn test_toggling_the_overlay_keeps_the_reading_position() {
    let mut viewer = started_viewer(&clause_fetch());
    viewer.jump_to_reference(1, Some(2));

    assert!(viewer.set_clause_overlay(false));

    assert_eq!(shape(&viewer, 0), vec![run(None, "0123456789")]);
    assert_eq!(viewer.active_reference(), Some("Mk 1:2"));
    assert_eq!(
        viewer.surface().active_verse().map(|v| v.reference.as_str()),
        Some("Mk 1:2")
    );
    assert!(!viewer.surface().clause_controls.as_ref().unwrap().toggle_checked);

    assert!(viewer.set_clause_overlay(true));
    assert_eq!(shape(&viewer, 0).len(), 4);
    assert_eq!(viewer.active_reference(), Some("Mk 1:2"));
}

#[test]
fn test_activating_a_clause_fills_the_details_panel() {
    let mut viewer = started_viewer(&clause_fetch());

    assert!(viewer.activate_clause("c1"));

    let detail = viewer
        .surface()
        .clause_controls
        .as_ref()
        .and_then(|controls| controls.details.clone())
        .unwrap();
    assert_eq!(detail.function_text, "Title");
    assert_eq!(detail.source_summary, "manual · reviewed by Ann, Bo");
    assert_eq!(detail.parent_summary, "Opening");
    assert_eq!(detail.category_tags, vec!["main".to_string()]);

    let active = viewer.surface().verses()[0]
        .runs
        .iter()
        .find(|run| run.clause_id() == Some("c1"))
        .cloned();
    assert!(matches!(active, Some(TextRun::Clause { active: true, .. })));

    // Group clauses have details even though they never render
    assert!(viewer.activate_clause("g1"));
    let group = viewer.surface().clause_controls.as_ref().unwrap().details.clone().unwrap();
    assert!(group.is_group_only);
    assert_eq!(group.child_clauses[0].label, "Incipit");

    assert!(!viewer.activate_clause("missing"));
}

#[test]
fn test_active_clause_survives_an_overlay_round_trip() {
    let mut viewer = started_viewer(&clause_fetch());
    viewer.activate_clause("c2");

    viewer.set_clause_overlay(false);
    viewer.set_clause_overlay(true);

    let active: Vec<bool> = viewer.surface().verses()[1]
        .runs
        .iter()
        .map(|run| matches!(run, TextRun::Clause { active: true, .. }))
        .collect();
    assert_eq!(active, vec![true, false]);
}

#[test]
fn test_clause_panel_collapses_and_expands() {
    let mut viewer = started_viewer(&clause_fetch());

    assert!(viewer.toggle_clause_panel());
    assert!(viewer.surface().clause_controls.as_ref().unwrap().collapsed);
    assert!(!viewer.toggle_clause_panel());
    assert!(!viewer.surface().clause_controls.as_ref().unwrap().collapsed);
}

#[test]
fn test_failed_clause_fetch_leaves_the_book_readable() {
    let fetch = clause_fetch().status("data/mark.clauses.json", 500);
    let console = RecordingConsole::default();
    let mut viewer = Viewer::new(
        ViewerHost::new(Surface::complete())
            .with_fetch(fetch.clone())
            .with_console(console.clone()),
    );

    viewer.init();

    assert_eq!(viewer.surface().verses().len(), 2);
    assert_eq!(shape(&viewer, 0), vec![run(None, "0123456789")]);
    let controls = viewer.surface().clause_controls.clone().unwrap();
    assert_eq!(controls.status_text, "Clause overlay unavailable for this book.");
    assert!(controls.toggle_disabled);
    assert!(!viewer.set_clause_overlay(false));
    assert_eq!(console.error_count(), 0);
}

#[test]
fn test_books_without_clause_data_clear_the_overlay_status() {
    let fetch = FakeFetch::new().json(
        "data/mark.json",
        json!({ "verses": [{ "reference": "Mk 1:1", "text": "Ἀρχὴ τοῦ εὐαγγελίου" }] }),
    );
    let mut viewer = Viewer::new(ViewerHost::new(Surface::complete()).with_fetch(fetch));

    viewer.load_book(LoadBookOptions::default());

    let controls = viewer.surface().clause_controls.clone().unwrap();
    assert_eq!(controls.status_text, "");
    assert!(controls.toggle_disabled);
    assert!(!viewer.surface().verses()[0].has_highlights());
}

#[test]
fn test_failed_book_load_clears_the_previous_clause_panel() {
    let mut viewer = started_viewer(&clause_fetch());
    assert!(viewer.activate_clause("c1"));

    let book = viewer.load_book(LoadBookOptions {
        data_url: Some("data/missing.json".to_string()),
        clause_data_url: None,
    });

    assert_eq!(book, None);
    assert!(!viewer.state().clauses_available);
    assert_eq!(viewer.state().active_clause_id, None);
    let controls = viewer.surface().clause_controls.clone().unwrap();
    assert_eq!(controls.details, None);
    assert_eq!(controls.status_text, "");
    assert!(controls.toggle_disabled);
    assert!(!controls.toggle_checked);
}

#[test]
fn test_clauses_with_null_or_mistyped_fields_still_highlight() {
    let fetch = clause_fetch().json(
        "data/mark.clauses.json",
        json!({
            "clauses": [
                {
                    "clause_id": "c1",
                    "references": ["Mk 1:1"],
                    "start": { "offset": 0 },
                    "end": { "offset": 3 },
                    "category_tags": null
                },
                {
                    "clause_id": "c2",
                    "references": ["Mk 1:2"],
                    "start": { "offset": 5 },
                    "end": { "offset": 10 },
                    "parent_clause_id": 7
                }
            ]
        }),
    );
    let mut viewer = started_viewer(&fetch);

    assert!(viewer.state().clauses_available);
    assert_eq!(
        shape(&viewer, 0),
        vec![run(Some("c1"), "012"), run(None, "3456789")]
    );
    assert_eq!(
        shape(&viewer, 1),
        vec![run(None, "abcde"), run(Some("c2"), "fghij")]
    );

    assert!(viewer.activate_clause("c1"));
    let details = viewer.surface().clause_controls.clone().unwrap().details.unwrap();
    assert!(details.category_tags.is_empty());
    assert!(viewer.activate_clause("c2"));
    let details = viewer.surface().clause_controls.clone().unwrap().details.unwrap();
    assert_eq!(details.parent_clause_id, None);
}
