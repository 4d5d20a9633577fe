//   Copyright (c) 2024-2026 Anton Kundenko <singaraiona@gmail.com>
//   All rights reserved.
//
//   Permission is hereby granted, free of charge, to any person obtaining a copy
//   of this software and associated documentation files (the "Software"), to deal
//   in the Software without restriction, including without limitation the rights
//   to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
//   copies of the Software, and to permit persons to whom the Software is
//   furnished to do so, subject to the following conditions:
//
//   The above copyright notice and this permission notice shall be included in all
//   copies or substantial portions of the Software.
//
//   THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
//   IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
//   FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
//   AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
//   LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
//   OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
//   SOFTWARE.

//! Reduce-family benchmark suite (criterion).
//!
//! One `criterion_group` per concern, a `benchmark_group` per value
//! shape, short warm-up/measure windows since these are in-process
//! micro-benchmarks rather than dataset-backed ones.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use aplcore::bridge::NullBridge;
use aplcore::cell::Cell;
use aplcore::config::Config;
use aplcore::error::Result;
use aplcore::operator::reduce::reduce;
use aplcore::operator::scan::{scan, scan_direct};
use aplcore::primitive::scalar::{add, pervade_dyadic};
use aplcore::primitive::EvalCtx;
use aplcore::value::Value;

fn iota_vector(n: i64) -> Value {
    Value::vector((0..n).map(Cell::Int))
}

fn add_fn(ctx: &mut EvalCtx, a: &Value, b: &Value) -> Result<Value> {
    pervade_dyadic(ctx, a, b, add)
}

fn bench_reduce(c: &mut Criterion) {
    let cfg = Config::default();
    let mut group = c.benchmark_group("reduce");
    for &n in &[10i64, 1_000, 100_000] {
        let v = iota_vector(n);
        group.bench_function(format!("plus_over_{n}"), |b| {
            b.iter(|| {
                let mut bridge = NullBridge;
                let mut ctx = EvalCtx::new(&cfg, &mut bridge);
                black_box(reduce(&mut ctx, &add_fn, 0, black_box(&v)).unwrap())
            })
        });
    }
    group.finish();
}

fn bench_scan(c: &mut Criterion) {
    let cfg = Config::default();
    let mut group = c.benchmark_group("scan");
    for &n in &[10i64, 1_000, 10_000] {
        let v = iota_vector(n);
        group.bench_function(format!("running_path_{n}"), |b| {
            b.iter(|| {
                let mut bridge = NullBridge;
                let mut ctx = EvalCtx::new(&cfg, &mut bridge);
                black_box(scan(&mut ctx, &add_fn, 0, black_box(&v)).unwrap())
            })
        });
        // The O(n^2) direct-recompute reference path only at the smaller
        // sizes: it exists to check `scan`'s fast path agrees with it, not
        // to be fast itself.
        if n <= 1_000 {
            group.bench_function(format!("direct_path_{n}"), |b| {
                b.iter(|| {
                    let mut bridge = NullBridge;
                    let mut ctx = EvalCtx::new(&cfg, &mut bridge);
                    black_box(scan_direct(&mut ctx, &add_fn, 0, black_box(&v)).unwrap())
                })
            });
        }
    }
    group.finish();
}

fn bench_reshape(c: &mut Criterion) {
    let cfg = Config::default();
    let mut group = c.benchmark_group("reshape");
    let shape = Value::vector([Cell::Int(1_000), Cell::Int(100)]);
    let b = iota_vector(1);
    group.bench_function("cycle_scalar_into_100k", |b_| {
        b_.iter(|| {
            let mut bridge = NullBridge;
            let mut ctx = EvalCtx::new(&cfg, &mut bridge);
            black_box(aplcore::primitive::catenate::reshape(&mut ctx, black_box(&shape), black_box(&b)).unwrap())
        })
    });
    group.finish();
}

criterion_group!(benches, bench_reduce, bench_scan, bench_reshape);
criterion_main!(benches);
