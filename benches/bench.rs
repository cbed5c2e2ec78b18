//! Criterion benchmarks for querydsl.
//!
//! - Translation of leaf and nested compound requests
//! - Analyzer registry construction from index settings
//! - Text analysis through built-in and custom analyzers

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use querydsl::analysis::registry::{AnalyzerRegistry, standard_analyzer};
use querydsl::dsl::{TranslateOptions, Translator};
use querydsl::mapping::Mappings;
use querydsl::settings::IndexSettings;
use serde_json::{Value, json};
use std::hint::black_box;

fn settings() -> IndexSettings {
    IndexSettings::from_value(json!({
        "analysis": {
            "analyzer": {
                "folded": {
                    "tokenizer": "standard",
                    "char_filter": ["html_strip"],
                    "filter": ["lowercase", "ascii_folding", "english_stemmer"]
                },
                "grams": {"tokenizer": "edge", "filter": ["lowercase"]},
                "csv": {"type": "pattern", "pattern": ",", "stopwords": "_english_"}
            },
            "tokenizer": {
                "edge": {"type": "edge_ngram", "min_gram": 2, "max_gram": 5}
            }
        }
    }))
    .unwrap()
}

fn mappings() -> Mappings {
    Mappings::from_value(json!({
        "properties": {
            "title": {"type": "text", "analyzer": "folded"},
            "body": {"type": "text"},
            "tags": {"type": "keyword"},
            "year": {"type": "integer"},
            "published": {"type": "date"}
        }
    }))
    .unwrap()
}

/// A bool request nested `depth` levels deep, each level carrying a mix of
/// leaf queries.
fn nested_request(depth: usize) -> Value {
    let mut request = json!({"match": {"title": "quick brown fox"}});
    for level in 0..depth {
        request = json!({"bool": {
            "must": [request, {"term": {"tags": format!("tag-{level}")}}],
            "should": [
                {"match_phrase": {"body": "lazy dog"}},
                {"prefix": {"tags": "ru"}},
                {"range": {"year": {"gte": 2000, "lt": 2020}}}
            ],
            "filter": {"range": {"published": {"gte": "2020-01-01T00:00:00Z"}}},
            "must_not": {"wildcard": {"tags": "spam*"}},
            "minimum_should_match": "2<-25%"
        }});
    }
    request
}

/// Benchmark translating requests.
fn bench_translation(c: &mut Criterion) {
    let mut group = c.benchmark_group("translation");

    let mappings = mappings();
    let analyzers = AnalyzerRegistry::from_settings(&settings().analysis).unwrap();
    let translator = Translator::new(&mappings, &analyzers).with_options(TranslateOptions {
        max_depth: 128,
        ..TranslateOptions::default()
    });

    let leaf = json!({"match": {"title": {"query": "quick brown fox", "operator": "and"}}});
    group.bench_function("leaf_match", |b| {
        b.iter(|| black_box(translator.translate(black_box(Some(&leaf)))))
    });

    let query_string = json!({"query_string": {
        "query": "title:(quick OR brown) AND year:[2000 TO 2020} -tags:spam",
        "default_field": "body"
    }});
    group.bench_function("query_string", |b| {
        b.iter(|| black_box(translator.translate(black_box(Some(&query_string)))))
    });

    for depth in [1, 4, 16] {
        let request = nested_request(depth);
        group.throughput(Throughput::Elements(depth as u64));
        group.bench_with_input(BenchmarkId::new("nested_bool", depth), &request, |b, request| {
            b.iter(|| black_box(translator.translate(black_box(Some(request)))))
        });
    }

    group.finish();
}

/// Benchmark building the analyzer registry from settings.
fn bench_analyzer_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyzer_construction");

    let settings = settings();
    group.bench_function("registry_from_settings", |b| {
        b.iter(|| black_box(AnalyzerRegistry::from_settings(black_box(&settings.analysis))))
    });

    group.finish();
}

/// Benchmark text analysis.
fn bench_text_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("text_analysis");

    let text = "<p>The Quick Brown Fox jumped over the lazy dogs, crème brûlée and café</p> "
        .repeat(16);
    let analyzers = AnalyzerRegistry::from_settings(&settings().analysis).unwrap();
    let standard = standard_analyzer();
    let folded = analyzers.resolve("folded").unwrap();

    group.throughput(Throughput::Bytes(text.len() as u64));
    group.bench_function("standard", |b| {
        b.iter(|| black_box(standard.analyze(black_box(&text)).unwrap().count()))
    });
    group.bench_function("custom_folded", |b| {
        b.iter(|| black_box(folded.analyze(black_box(&text)).unwrap().count()))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_translation,
    bench_analyzer_construction,
    bench_text_analysis
);

criterion_main!(benches);
