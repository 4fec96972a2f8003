use criterion::{Criterion, black_box, criterion_group, criterion_main};
use mania_sr_core::{DifficultyContext, EngineConfig, NoteEvent, rate_with_config};

/// A dense stream with a hold every fifth note.
fn dense_chart(key_count: usize, count: u32) -> Vec<NoteEvent> {
    (0..count)
        .map(|i| {
            let column = i as usize % key_count;
            let head = i * 35;
            if i % 5 == 0 {
                NoteEvent::hold(column, head, head + 200).unwrap()
            } else {
                NoteEvent::tap(column, head)
            }
        })
        .collect()
}

fn bench_rating(c: &mut Criterion) {
    let config = EngineConfig::default();

    for key_count in [7u32, 18] {
        let notes = dense_chart(key_count as usize, 4_000);
        let context = DifficultyContext::new(key_count, 8.5);
        c.bench_function(&format!("rate_{}k_dense", key_count), |b| {
            b.iter(|| rate_with_config(black_box(&notes), black_box(&context), &config))
        });
    }
}

criterion_group!(benches, bench_rating);
criterion_main!(benches);
