use criterion::{Criterion, black_box, criterion_group, criterion_main};
use sblgnt_viewer_engine::clauses::ClauseLookup;
use sblgnt_viewer_engine::navigation::NavigationIndex;
use sblgnt_viewer_engine::render::render_verses;
use sblgnt_viewer_engine::{ClauseIndex, Verse};
use serde_json::json;

fn generate_verses(chapters: u32, verses_per_chapter: u32) -> Vec<Verse> {
    (1..=chapters)
        .flat_map(|chapter| {
            (1..=verses_per_chapter).map(move |verse| {
                Verse::new(
                    format!("Mk {chapter}:{verse}"),
                    "Ἀρχὴ τοῦ εὐαγγελίου Ἰησοῦ Χριστοῦ υἱοῦ θεοῦ",
                )
            })
        })
        .collect()
}

fn generate_clauses(verses: &[Verse]) -> ClauseLookup {
    let clauses: Vec<_> = verses
        .iter()
        .enumerate()
        .map(|(n, verse)| {
            json!({
                "clause_id": format!("c{n}"),
                "function": "Main clause",
                "references": [verse.reference],
                "start": { "offset": 5 },
                "end": { "offset": 20 }
            })
        })
        .collect();
    ClauseIndex::from_value(&json!({ "clauses": clauses })).lookup
}

fn bench_index_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("navigation_index");
    group.sample_size(20);

    // Mark has 16 chapters and 678 verses
    let verses = generate_verses(16, 45);
    group.bench_function("build", |b| {
        b.iter(|| {
            let index = NavigationIndex::build(black_box(&verses));
            black_box(index);
        });
    });

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    group.sample_size(20);

    let verses = generate_verses(16, 45);
    let lookup = generate_clauses(&verses);
    group.bench_function("plain", |b| {
        b.iter(|| black_box(render_verses(black_box(&verses), None, None)));
    });
    group.bench_function("with_clauses", |b| {
        b.iter(|| black_box(render_verses(black_box(&verses), Some(&lookup), None)));
    });

    group.finish();
}

criterion_group!(benches, bench_index_build, bench_render);
criterion_main!(benches);
