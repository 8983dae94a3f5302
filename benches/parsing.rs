//! Benchmarks for markdown parsing.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use splitmark::document::Document;

fn bench_parse_simple(c: &mut Criterion) {
    let md = "# Hello\n\nWorld";
    c.bench_function("parse_simple", |b| {
        b.iter(|| Document::parse(black_box(md), black_box(60)))
    });
}

fn bench_parse_medium(c: &mut Criterion) {
    let md = include_str!("../tests/fixtures/sample.md");
    c.bench_function("parse_medium", |b| {
        b.iter(|| Document::parse(black_box(md), black_box(60)))
    });
}

fn bench_parse_narrow(c: &mut Criterion) {
    let md = include_str!("../tests/fixtures/sample.md").repeat(20);
    c.bench_function("parse_narrow_long", |b| {
        b.iter(|| Document::parse(black_box(&md), black_box(24)))
    });
}

criterion_group!(benches, bench_parse_simple, bench_parse_medium, bench_parse_narrow);
criterion_main!(benches);
