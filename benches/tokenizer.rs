use criterion::{criterion_group, criterion_main, Criterion};
use lessen::{Tokenizer, TokenizerConfig, TokenizerOptions};
use std::hint::black_box;

fn criterion_benchmark(c: &mut Criterion) {
    // Criterion can report inconsistent results from run to run in some cases.  We attempt to
    // minimize that in this setup.
    let mut group = c.benchmark_group("tokenization");
    group.significance_level(0.1).sample_size(500);

    // Read the file outside of the closure to avoid issues with file io
    let source = std::fs::read_to_string("tests/data/tokenizer/theme.less").unwrap().repeat(50);

    group.bench_function("theme", |b| {
        b.iter(|| {
            let count = Tokenizer::new(black_box(&source)).count();
            black_box(count)
        })
    });

    let config = TokenizerConfig {
        options: TokenizerOptions::MULTILINE_COMMENT_BEGIN_END_TOKENS,
        ..Default::default()
    };
    group.bench_function("theme with comment markers", |b| {
        b.iter(|| {
            let tokenizer = Tokenizer::with_config(black_box(&source), config.clone()).unwrap();
            black_box(tokenizer.count())
        })
    });

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
