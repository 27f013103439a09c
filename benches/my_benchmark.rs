use criterion::{criterion_group, criterion_main, Criterion, BenchmarkId};
use crossword_synth::generator::{attempt_placement, CrosswordGenerator, CrosswordGeneratorSettings};
use crossword_synth::word::{normalize_words, Direction};

const WORDS: [&str; 12] = ["Hello", "world", "asdf", "myname", "sesame", "yeeee", "nouyt", "planet", "orbit", "comet", "moon", "star"];

pub fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("crossword");

    group.bench_function(BenchmarkId::new("Single attempt", "15x15"),
        |b|
        {
            let words = normalize_words(WORDS).words;
            b.iter(|| attempt_placement(&words, 15, 15, Direction::Across).unwrap())
        });

    group.bench_function(BenchmarkId::new("Generator", "15x15"),
        |b|
        {
            let generator = CrosswordGenerator::new(CrosswordGeneratorSettings { shuffle_rounds: 4, seed: Some(42) });
            b.iter(|| generator.generate(WORDS, 15, 15).unwrap())
        });

    group.finish();

}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
