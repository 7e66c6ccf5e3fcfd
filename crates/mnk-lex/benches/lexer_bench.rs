//! Lexer benchmarks.
//!
//! Run with: `cargo bench --package mnk-lex`

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use mnk_lex::Lexer;

fn lexer_token_count(source: &str) -> usize {
    Lexer::new(source).count()
}

fn bench_lexer_simple(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer");

    let source = "let add = fn(x, y) { x + y; }; let result = add(5, 10);";
    group.throughput(Throughput::Bytes(source.len() as u64));

    group.bench_function("simple_let", |b| {
        b.iter(|| lexer_token_count(black_box("let x = 42;")))
    });

    group.bench_function("function_with_body", |b| {
        b.iter(|| lexer_token_count(black_box(source)))
    });

    group.finish();
}

fn bench_lexer_complex(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_complex");

    let source = r#"
        let map = fn(arr, f) {
            let iter = fn(arr, accumulated) {
                if (len(arr) == 0) {
                    accumulated
                } else {
                    iter(rest(arr), push(accumulated, f(first(arr))));
                }
            };
            iter(arr, []);
        };

        // double every element
        let numbers = [1, 2, 3, 4, 5];
        let doubled = map(numbers, fn(x) { x * 2 });
        let table = {"one": 1, "two": 2, "three": 3};
        while (1 < 2) { puts("spin"); }
    "#;
    group.throughput(Throughput::Bytes(source.len() as u64));

    group.bench_function("higher_order_program", |b| {
        b.iter(|| lexer_token_count(black_box(source)))
    });

    group.finish();
}

criterion_group!(benches, bench_lexer_simple, bench_lexer_complex);
criterion_main!(benches);
