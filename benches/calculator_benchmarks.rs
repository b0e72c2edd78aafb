//! Calculator benchmarks.
//!
//! Every calculator runs synchronously on each dashboard keystroke, so
//! these track the cost of one full evaluation including its chart data.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fromagerie::models::{
    compute_eoq, compute_queue, optimize_production, production_report, seasonal_demand,
    InventoryRequest, ProductionRequest, QueueRequest,
};
use fromagerie::visualization::ascii::{self, GridSize};
use fromagerie::visualization::Chart;

fn bench_production(c: &mut Criterion) {
    let mut group = c.benchmark_group("production");
    let request = ProductionRequest::default();

    group.bench_function("optimize", |b| {
        b.iter(|| black_box(optimize_production(black_box(&request))));
    });

    for samples in [100usize, 400, 1600] {
        group.bench_with_input(BenchmarkId::new("report", samples), &samples, |b, &samples| {
            b.iter(|| black_box(production_report(&request, samples)));
        });
    }

    group.finish();
}

fn bench_inventory(c: &mut Criterion) {
    let mut group = c.benchmark_group("inventory");
    let request = InventoryRequest::default();

    for points in [100usize, 1000] {
        group.bench_with_input(BenchmarkId::new("eoq_curve", points), &points, |b, &points| {
            b.iter(|| black_box(compute_eoq(&request, points)));
        });
    }

    group.finish();
}

fn bench_queue_and_seasonal(c: &mut Criterion) {
    let request = QueueRequest::default();
    c.bench_function("queue/mm1", |b| {
        b.iter(|| black_box(compute_queue(black_box(&request), 100)));
    });
    c.bench_function("seasonal/series", |b| b.iter(|| black_box(seasonal_demand())));
}

fn bench_ascii_chart(c: &mut Criterion) {
    let report = production_report(&ProductionRequest::default(), 400);
    let Ok(report) = report else {
        return;
    };
    let chart = Chart::from(&report);
    c.bench_function("ascii/feasible_region", |b| {
        b.iter(|| black_box(ascii::render(&chart, GridSize::default())));
    });
}

criterion_group!(
    benches,
    bench_production,
    bench_inventory,
    bench_queue_and_seasonal,
    bench_ascii_chart
);
criterion_main!(benches);
