//! Criterion benchmarks for Argent.
//!
//! Covers the per-record hot path of an indexing pass:
//! - word extraction
//! - Double Metaphone encoding
//! - a full pass into the memory store

use std::hint::black_box;
use std::sync::Arc;

use argent::analysis::WordFilter;
use argent::index::{IndexDescriptor, Indexer};
use argent::phonetic::{DoubleMetaphone, PhoneticEncoder};
use argent::record::FieldNames;
use argent::source::MemorySource;
use argent::store::MemoryStore;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use serde_json::{Value, json};

const WORDS: &[&str] = &[
    "Bright", "Sunset", "Harbour", "Lighthouse", "Schmidt", "Smith", "Xavier", "Wasserman",
    "Czerny", "Cabrillo", "Jose", "Thomas", "Knight", "Caesar", "Chianti", "Washington",
    "Filipowicz", "McHugh", "Gallegos", "Breaux", "Rogier", "Zhao", "Bacchus", "Edgar",
];

/// Generate captions for benchmarking.
fn generate_captions(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            let words: Vec<&str> = (0..6).map(|j| WORDS[(i * 7 + j * 3) % WORDS.len()]).collect();
            format!("{} at the {} {}.jpg", words[..3].join(" "), words[3], words[4..].join("_"))
        })
        .collect()
}

fn generate_records(count: usize) -> Vec<Value> {
    generate_captions(count)
        .into_iter()
        .enumerate()
        .map(|(i, caption)| {
            json!({
                "id": format!("rec-{i}"),
                "created_time": (1_577_923_200 + i as i64 * 60).to_string(),
                "caption": caption,
            })
        })
        .collect()
}

fn bench_word_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("word_filter");
    let filter = WordFilter::new().unwrap();
    let captions = generate_captions(100);

    group.bench_function("filter_single_caption", |b| {
        b.iter(|| black_box(filter.filter(black_box(&captions[0])).unwrap()))
    });

    group.throughput(Throughput::Elements(captions.len() as u64));
    group.bench_function("filter_batch_captions", |b| {
        b.iter(|| {
            for caption in &captions {
                black_box(filter.filter(caption).unwrap());
            }
        })
    });

    group.finish();
}

fn bench_double_metaphone(c: &mut Criterion) {
    let mut group = c.benchmark_group("double_metaphone");
    let encoder = DoubleMetaphone::new();

    group.throughput(Throughput::Elements(WORDS.len() as u64));
    group.bench_function("encode_words", |b| {
        b.iter(|| {
            for word in WORDS {
                black_box(encoder.encode(black_box(word)));
            }
        })
    });

    group.finish();
}

fn bench_indexing_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("indexing");
    group.sample_size(20);
    let records = generate_records(1000);

    group.throughput(Throughput::Elements(records.len() as u64));
    group.bench_function("pass_1000_records", |b| {
        b.iter(|| {
            let source = MemorySource::with_records("created_time", records.clone());
            let indexer = Indexer::new(
                IndexDescriptor::new("bench", "created_time", source),
                Arc::new(MemoryStore::new()),
            )
            .unwrap();
            black_box(
                indexer
                    .run_pass_report(&FieldNames::new("id", "caption"))
                    .unwrap(),
            )
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_word_filter,
    bench_double_metaphone,
    bench_indexing_pass
);
criterion_main!(benches);
