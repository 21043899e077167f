//! Performance benchmarks for input normalization
//!
//! Run with: cargo bench

use a3s_inspect::{ascii_to_lower, Pipeline, Plugins};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const CASES: &[(&str, &str)] = &[
    ("ascii_lower", "this is a completely lowercase sentence for testing purposes."),
    ("ascii_upper", "THIS IS A COMPLETELY UPPERCASE SENTENCE FOR TESTING PURPOSES."),
    ("ascii_mixed", "This Is A Randomized Mixed Case Sentence For Evaluation."),
    ("greek", "Αυτό είναι ένα τεστ με ελληνικούς χαρακτήρες."),
    ("cyrillic", "Это тест с использованием кириллических символов."),
    ("emoji", "😀😃😄😁🤣 Emoji characters mixed with text."),
    ("turkish", "Turkish İ and i cases: İSTANBUL, istanbul, İstanbul, ıstanbul."),
    ("empty", ""),
];

fn bench_case_fold(c: &mut Criterion) {
    let mut group = c.benchmark_group("case_fold");
    for (name, input) in CASES {
        group.bench_function(format!("ascii_to_lower/{name}"), |b| {
            b.iter(|| ascii_to_lower(black_box(input)))
        });
        group.bench_function(format!("str_to_lowercase/{name}"), |b| {
            b.iter(|| black_box(input).to_lowercase())
        });
    }
    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let plugins = Plugins::with_defaults();
    let pipeline = Pipeline::from_names(
        &plugins.transformations,
        ["removeQuotes", "compressWhitespace", "lowercase"],
    )
    .unwrap();

    c.bench_function("Pipeline::apply", |b| {
        b.iter(|| pipeline.apply(black_box("'UNION   SELECT password FROM Users'")))
    });
}

criterion_group!(benches, bench_case_fold, bench_pipeline);
criterion_main!(benches);
