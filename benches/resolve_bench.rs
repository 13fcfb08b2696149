//! Benchmarks for sentence alignment over pages of varying length.
//!
//! Run with: `cargo bench --bench resolve_bench`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use spanlight::{BBox, MatchConfig, TargetSentence, WordToken, aggregate, resolve};

const FILLER: &[&str] = &[
    "the", "results", "of", "our", "experiments", "show", "that", "model", "performance",
    "depends", "on", "data", "quality", "and", "training", "time",
];

const SENTENCE: &str = "We find that careful pre-processing of scanned inter-national records \
    improves recall substantially.";

/// A page of `n_words` filler words with the target sentence (one word
/// hyphen-split across a line break) placed three quarters of the way down.
fn page(n_words: usize) -> Vec<WordToken> {
    let mut texts: Vec<String> = (0..n_words).map(|i| FILLER[i % FILLER.len()].to_string()).collect();
    let at = n_words * 3 / 4;
    let quoted = [
        "We", "find", "that", "careful", "pre-processing", "of", "scanned", "inter-", "national",
        "records", "improves", "recall", "substantially.",
    ];
    for (offset, w) in quoted.iter().enumerate() {
        if at + offset < texts.len() {
            texts[at + offset] = w.to_string();
        }
    }

    texts
        .into_iter()
        .enumerate()
        .map(|(i, text)| {
            let line = (i / 12) as u32;
            let x = (i % 12) as f32 * 45.0;
            let y = line as f32 * 14.0;
            WordToken::new(BBox::new(x, y, x + 40.0, y + 11.0), text, line / 8, line)
        })
        .collect()
}

fn bench_resolve(c: &mut Criterion) {
    let config = MatchConfig::default();
    let sentence = TargetSentence::new(SENTENCE);

    let mut group = c.benchmark_group("resolve");
    for n_words in [200, 800, 3200] {
        let tokens = page(n_words);
        group.throughput(Throughput::Elements(n_words as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n_words), &tokens, |b, tokens| {
            b.iter(|| {
                let span = resolve(black_box(&sentence), black_box(tokens), &config);
                aggregate(&span)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_resolve);
criterion_main!(benches);
