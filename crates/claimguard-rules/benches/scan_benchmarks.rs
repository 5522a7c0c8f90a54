//! Latency benchmarks for the compliance engine
//!
//! Run with: cargo bench -p claimguard-rules

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use claimguard_rules::{builtin_rules, check, compile, scan, CheckOptions, ComplianceEngine};

const CASES: &[(&str, &str)] = &[
    ("short_clean", "健康維持をサポートします"),
    ("short_flagged", "この商品で糖尿病が治ります"),
    (
        "medium_clean",
        "毎日の食事で不足しがちな栄養素を手軽に補えるサプリメントです。朝食と一緒にお召し上がりください。",
    ),
    (
        "medium_flagged",
        "必ず効きます！薬のような効き目で血圧を下げる。副作用はありません。免疫力アップで若返り、痩せられる。",
    ),
];

/// Benchmark rule compilation (startup and reload cost)
fn benchmark_compile(c: &mut Criterion) {
    let rules = builtin_rules();

    c.bench_function("compile_builtin", |b| {
        b.iter(|| compile(black_box(&rules)).unwrap())
    });
}

/// Benchmark the matcher alone
fn benchmark_scan(c: &mut Criterion) {
    let set = compile(&builtin_rules()).expect("Failed to compile built-in rules");

    let mut group = c.benchmark_group("Scan");
    group.sample_size(100);

    for (name, text) in CASES {
        group.bench_with_input(BenchmarkId::new("scan", name), text, |b, text| {
            b.iter(|| scan(black_box(text), &set))
        });
    }

    group.finish();
}

/// Benchmark the full check with and without autofix
fn benchmark_check(c: &mut Criterion) {
    let set = compile(&builtin_rules()).expect("Failed to compile built-in rules");

    let mut group = c.benchmark_group("Check");

    for (name, text) in CASES {
        group.bench_with_input(BenchmarkId::new("report_only", name), text, |b, text| {
            b.iter(|| check(black_box(text), &set, CheckOptions::report_only()))
        });
        group.bench_with_input(BenchmarkId::new("autofix", name), text, |b, text| {
            b.iter(|| check(black_box(text), &set, CheckOptions::autofix()))
        });
    }

    group.finish();
}

/// Benchmark the engine path, including the snapshot of the shared rule set
fn benchmark_engine(c: &mut Criterion) {
    let engine = ComplianceEngine::with_builtin_rules().expect("Failed to build engine");

    c.bench_function("engine_check_autofix", |b| {
        b.iter(|| engine.check(black_box(CASES[3].1), CheckOptions::autofix()))
    });
}

criterion_group!(
    benches,
    benchmark_compile,
    benchmark_scan,
    benchmark_check,
    benchmark_engine
);
criterion_main!(benches);
