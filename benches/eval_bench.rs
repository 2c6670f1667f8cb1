//! Benchmarks for calcd request evaluation

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use calcd::eval::evaluate;
use calcd::network::serve_session;
use calcd::protocol::{format_number, split_tokens};

fn eval_benchmarks(c: &mut Criterion) {
    c.bench_function("evaluate_add", |b| {
        b.iter(|| evaluate(black_box(&["ADD", "12.5", "-3E2"])))
    });

    c.bench_function("evaluate_bad_operand", |b| {
        b.iter(|| evaluate(black_box(&["MUL", "ABC", "2"])))
    });

    c.bench_function("split_and_evaluate_line", |b| {
        b.iter(|| evaluate(&split_tokens(black_box("DIV 1234.5678 0.001"))))
    });

    c.bench_function("format_number", |b| {
        b.iter(|| format_number(black_box(0.1 + 0.2)))
    });
}

fn session_benchmarks(c: &mut Criterion) {
    let input = "add 1 2\nsub 3 4\nmul 5 6\ndiv 7 8\n".repeat(256) + "quit\n";

    c.bench_function("session_1k_lines", |b| {
        b.iter(|| {
            let mut reader = std::io::Cursor::new(input.as_bytes());
            let mut writer = Vec::with_capacity(32 * 1024);
            serve_session(&mut reader, &mut writer)
        })
    });
}

criterion_group!(benches, eval_benchmarks, session_benchmarks);
criterion_main!(benches);
