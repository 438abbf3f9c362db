//! Forecast pipeline benchmarks.
//!
//! Run with: `cargo bench --package spotpris-bench`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use spotpris_bench::{DocumentConfig, document, publication_xml, rate};
use spotpris_fetch::decode_market_document;
use spotpris_format::{OutputFormat, write_forecast};
use spotpris_forecast::ForecastBuilder;
use spotpris_types::DEFAULT_TIME_ZONE;
use std::hint::black_box;

fn configs() -> [(&'static str, DocumentConfig); 2] {
    [
        ("hourly", DocumentConfig::HOURLY),
        ("quarter-hourly", DocumentConfig::QUARTER_HOURLY),
    ]
}

fn build_benchmark(c: &mut Criterion) {
    let builder = ForecastBuilder::new(DEFAULT_TIME_ZONE);
    let rate = rate();

    let mut group = c.benchmark_group("build");
    for (name, config) in configs() {
        let doc = document(config);
        group.throughput(Throughput::Elements(u64::from(config.samples)));
        group.bench_with_input(BenchmarkId::from_parameter(name), &doc, |b, doc| {
            b.iter(|| builder.build(black_box(doc), black_box(&rate)).unwrap());
        });
    }
    group.finish();
}

fn decode_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");
    for (name, config) in configs() {
        let xml = publication_xml(config);
        group.throughput(Throughput::Bytes(xml.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), &xml, |b, xml| {
            b.iter(|| decode_market_document(black_box(xml.as_bytes())).unwrap());
        });
    }
    group.finish();
}

fn format_benchmark(c: &mut Criterion) {
    let forecast = ForecastBuilder::new(DEFAULT_TIME_ZONE)
        .build(&document(DocumentConfig::HOURLY), &rate())
        .unwrap();

    let mut group = c.benchmark_group("format");
    for format in OutputFormat::all() {
        group.bench_function(format.extension(), |b| {
            b.iter(|| {
                let mut buffer = Vec::with_capacity(8 * 1024);
                write_forecast(*format, black_box(&forecast), &mut buffer).unwrap();
                buffer
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    build_benchmark,
    decode_benchmark,
    format_benchmark
);
criterion_main!(benches);
