use criterion::{criterion_group, criterion_main, Criterion};
use docserve_core::tokenizer::analyze;

fn bench_analyze(c: &mut Criterion) {
    let text = "The quick brown fox jumps over the lazy dog.\tPack my box with five dozen liquor jugs.\n"
        .repeat(500);
    c.bench_function("analyze_pangrams", |b| b.iter(|| analyze(&text)));
}

criterion_group!(benches, bench_analyze);
criterion_main!(benches);
