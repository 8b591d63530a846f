//! Performance benchmarks for wordhunt
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::fs;
use tempfile::TempDir;
use wordhunt::index::build::FileIndexer;
use wordhunt::index::detect::TextFileTypeDetector;
use wordhunt::matcher::{MatcherChain, SearchConfig, SearchTerms};
use wordhunt::output::MemorySink;
use wordhunt::search::{IndexedSearch, LiveSearch, SearchStrategy};

/// A tree of small text files spread over a few directories
fn create_benchmark_fixtures() -> (TempDir, SearchConfig) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    for d in 0..5 {
        let sub = temp_dir.path().join(format!("module{}/nestedDir", d));
        fs::create_dir_all(&sub).expect("Failed to create dir");
        for i in 0..20 {
            let content = format!(
                "// File {i} of module {d}\n\
                 fn handleRequest_{i}(user_id: u32) -> Response {{\n\
                 \x20   let cacheKey = \"user-{i}.profile\";\n\
                 \x20   lookup(cacheKey)\n\
                 }}\n"
            );
            fs::write(sub.join(format!("handler_{}.rs", i)), content)
                .expect("Failed to write file");
        }
    }

    let config = SearchConfig {
        brief: true,
        ..SearchConfig::new(temp_dir.path()).expect("Invalid root")
    };
    (temp_dir, config)
}

fn bench_word_extraction(c: &mut Criterion) {
    let samples = [
        "Report-Final.txt",
        "src/searchEngine/QueryParser.java",
        "fn getUserById(userId: i32) -> Option<User> { let HTTPResponseCode = 200; }",
    ];

    let mut group = c.benchmark_group("extract_words");
    for sample in samples {
        group.bench_with_input(BenchmarkId::from_parameter(sample.len()), &sample, |b, &s| {
            b.iter(|| wordhunt::utils::extract_words(black_box(s), false, true))
        });
    }
    group.finish();
}

fn bench_matches_all_words(c: &mut Criterion) {
    let words = vec!["SEARCH".to_string(), "PARSER".to_string()];
    c.bench_function("matches_all_words", |b| {
        b.iter(|| {
            wordhunt::utils::matches_all_words(
                black_box("src/searchEngine/QueryParser.java"),
                &words,
                false,
                true,
            )
        })
    });
}

fn bench_search(c: &mut Criterion) {
    let (_temp_dir, config) = create_benchmark_fixtures();
    let chain = MatcherChain::standard(&config);
    let terms = SearchTerms::builder()
        .path(["nested"])
        .content(["cache profile"])
        .build();

    let mut group = c.benchmark_group("search");

    group.bench_function("live", |b| {
        let strategy = LiveSearch::new(config.clone());
        b.iter(|| {
            let mut sink = MemorySink::default();
            strategy.search(black_box(&terms), &chain, &mut sink)
        })
    });

    let detector = TextFileTypeDetector::new();
    FileIndexer::new(&config.root_dir, &config.index_path, &detector)
        .expect("Invalid root")
        .silent(true)
        .build_index(&mut MemorySink::default())
        .expect("Failed to build index");

    group.bench_function("indexed", |b| {
        let strategy = IndexedSearch::new(config.clone());
        b.iter(|| {
            let mut sink = MemorySink::default();
            strategy.search(black_box(&terms), &chain, &mut sink)
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_word_extraction,
    bench_matches_all_words,
    bench_search,
);

criterion_main!(benches);
