use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use webchat::prompt;
use webchat::store::{IdScheme, SessionStore};
use webchat::types::Turn;

fn build_store(sessions: usize, turns: usize) -> SessionStore {
    let mut store = SessionStore::new(IdScheme::Sequential);
    for _ in 0..sessions {
        let (id, _) = store.resolve_or_create(None);
        for t in 0..turns {
            let turn = if t % 2 == 0 {
                Turn::user(format!("message {t}"))
            } else {
                Turn::assistant(format!("reply {t}"))
            };
            store.append(&id, turn).unwrap();
        }
    }
    store
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("store_resolve");

    for size in [100usize, 1_000, 10_000] {
        let mut store = build_store(size, 0);
        let id = size.to_string();

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                let (resolved, _) = store.resolve_or_create(black_box(Some(id.as_str())));
                black_box(resolved);
            });
        });
    }

    group.finish();
}

fn bench_flatten(c: &mut Criterion) {
    let mut group = c.benchmark_group("prompt_flatten");

    for turns in [10usize, 100, 1_000] {
        let store = build_store(1, turns);
        let transcript = store.get("1").unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(turns), &turns, |b, _| {
            b.iter(|| black_box(prompt::flatten(black_box(transcript))));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_resolve, bench_flatten);
criterion_main!(benches);
