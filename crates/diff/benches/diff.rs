//! Benchmarks for the diff pipeline
//!
//! Measures:
//! - Single-line values with a small edit
//! - Multiline values where most lines are equal
//! - Rendering cost per terminal encoding

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use requisite_diff::{DiffGenerator, TerminalEncoding};

fn single_line(c: &mut Criterion) {
    let mut group = c.benchmark_group("diff/single_line");
    let generator = DiffGenerator::new(TerminalEncoding::None);

    group.bench_function("one_character", |b| {
        b.iter(|| black_box(generator.diff(black_box("int[6]"), black_box("int[5]"))));
    });

    group.bench_function("words", |b| {
        b.iter(|| black_box(generator.diff(black_box("The dog is brown"), black_box("The fox is down"))));
    });

    group.finish();
}

fn multiline(c: &mut Criterion) {
    let mut group = c.benchmark_group("diff/multiline");
    let generator = DiffGenerator::new(TerminalEncoding::None);

    for lines in [10_usize, 100, 1_000] {
        let actual: String = (0..lines).map(|i| format!("line {i}\n")).collect();
        let expected = actual.replacen("line 3\n", "line three\n", 1);
        group.bench_with_input(BenchmarkId::from_parameter(lines), &lines, |b, _| {
            b.iter(|| black_box(generator.diff(&actual, &expected)));
        });
    }

    group.finish();
}

fn encodings(c: &mut Criterion) {
    let mut group = c.benchmark_group("diff/encoding");

    for encoding in TerminalEncoding::ALL {
        let generator = DiffGenerator::new(encoding);
        group.bench_function(encoding.as_str(), |b| {
            b.iter(|| black_box(generator.diff("The dog is brown\nand old", "The fox is down\nand old")));
        });
    }

    group.finish();
}

criterion_group!(benches, single_line, multiline, encodings);
criterion_main!(benches);
