//! Benchmarks for rapid_lingo

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rapid_lingo::*;

/// Topic snippets combined into synthetic corpora of varying sizes.
const SNIPPETS: &[(&str, &str)] = &[
    (
        "Solar subsidies announced",
        "The government announced new solar energy subsidies to accelerate panel installation.",
    ),
    (
        "Solar adoption grows",
        "Cheap solar energy keeps growing as panel prices continue to fall worldwide.",
    ),
    (
        "Rate decision looms",
        "The central bank will announce its interest rate decision on Thursday.",
    ),
    (
        "Rates rise again",
        "Another interest rate rise as the central bank fights persistent inflation.",
    ),
    (
        "Transfer window opens",
        "The football club confirmed a record transfer fee for the young striker.",
    ),
    (
        "Championship recap",
        "The football final ended with a dramatic penalty shootout victory.",
    ),
    (
        "Climate summit outcome",
        "Leaders agreed on a new climate change policy covering the next decade.",
    ),
    (
        "Climate policy reactions",
        "Economists debate whether the climate change policy goes far enough.",
    ),
];

fn corpus(size: usize) -> Vec<Document> {
    (0..size)
        .map(|i| {
            let (title, snippet) = SNIPPETS[i % SNIPPETS.len()];
            Document::new(title, format!("{snippet} (variant {i})"))
        })
        .collect()
}

fn benchmark_preprocessing(c: &mut Criterion) {
    let components = LanguageComponents::for_language("en").unwrap();
    let documents = corpus(50);

    c.bench_function("preprocess_50_docs", |b| {
        b.iter(|| {
            PreprocessingPipeline::new(1).preprocess(black_box(&documents), None, &components)
        })
    });
}

fn benchmark_phrase_mining(c: &mut Criterion) {
    let components = LanguageComponents::for_language("en").unwrap();
    let documents = corpus(50);
    let context = PreprocessingPipeline::new(1).preprocess(&documents, None, &components);

    c.bench_function("mine_phrases_50_docs", |b| {
        b.iter(|| PhraseMiner::new(2, 8, 2).mine(black_box(&context)))
    });
}

fn benchmark_full_clustering(c: &mut Criterion) {
    let engine =
        ClusteringEngine::new(ClusteringConfig::default().with_cluster_count(4)).unwrap();

    let mut group = c.benchmark_group("cluster_by_corpus_size");
    for size in [8usize, 32, 128] {
        let documents = corpus(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &documents, |b, docs| {
            b.iter(|| engine.cluster(black_box(docs), None).unwrap())
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_preprocessing,
    benchmark_phrase_mining,
    benchmark_full_clustering
);
criterion_main!(benches);
