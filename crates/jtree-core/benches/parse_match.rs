//! Parse, print and match throughput on synthetic catalog documents.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use jtree_core::{match_values, parse, print};
use std::hint::black_box;

/// Generate an object with an `items` array of roughly `size_bytes` of JSON.
fn generate_json(size_bytes: usize) -> String {
    let item = r#"{"id":12345,"name":"Alice Johnson","email":"alice@example.com","active":true,"tags":["a","b","c"]}"#;
    let count = (size_bytes / item.len()).max(1);
    let items = vec![item; count].join(",");
    format!(r#"{{"title":"catalog","items":[{items}]}}"#)
}

/// Nested `name`/`children` tree with `fanout^depth` leaves.
fn generate_hierarchy(depth: usize, fanout: usize) -> String {
    fn node(name: String, depth: usize, fanout: usize) -> String {
        if depth == 0 {
            return format!(r#"{{"name":"{name}","size":1}}"#);
        }
        let children: Vec<String> = (0..fanout)
            .map(|i| node(format!("{name}.{i}"), depth - 1, fanout))
            .collect();
        format!(r#"{{"name":"{name}","children":[{}]}}"#, children.join(","))
    }
    node("root".to_string(), depth, fanout)
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for (label, size) in [("1KB", 1024), ("100KB", 100 * 1024), ("1MB", 1024 * 1024)] {
        let json = generate_json(size);
        group.throughput(Throughput::Bytes(json.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(label), &json, |b, json| {
            b.iter(|| parse(black_box(json)))
        });
    }
    group.finish();
}

fn bench_print(c: &mut Criterion) {
    let json = generate_json(100 * 1024);
    let tree = parse(&json).unwrap();
    c.bench_function("print/100KB", |b| b.iter(|| print(black_box(tree.root()))));
}

fn bench_match(c: &mut Criterion) {
    let json = generate_json(100 * 1024);
    let tree = parse(&json).unwrap();
    let mut group = c.benchmark_group("match");
    for expr in ["items/[?size]", "items/[]/name", "items/[0,99]/{id,tags/[1]}", "items/[]/#"] {
        group.bench_with_input(BenchmarkId::from_parameter(expr), expr, |b, expr| {
            b.iter(|| match_values(tree.root(), black_box(expr)))
        });
    }
    group.finish();

    let hier = generate_hierarchy(5, 6);
    let tree = parse(&hier).unwrap();
    c.bench_function("match/hierarchy", |b| {
        b.iter(|| match_values(tree.root(), black_box("name...children...size")))
    });
}

criterion_group!(benches, bench_parse, bench_print, bench_match);
criterion_main!(benches);
