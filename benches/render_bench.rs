//! Benchmarks for the dashboard render path
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use midday::*;

fn renderer() -> ViewRenderer {
    ViewRenderer::new(
        Box::new(MemorySurface::dashboard_layout()),
        Box::new(TextChartBackend),
    )
}

fn bench_chart(c: &mut Criterion) {
    let mut group = c.benchmark_group("chart");

    group.bench_function("build_config", |b| {
        b.iter(|| ChartDataAdapter.build_config(black_box(&SeriesSelector::Revenue), Theme::Dark))
    });

    group.bench_function("apply_chart", |b| {
        let mut renderer = renderer();
        let light = ChartDataAdapter.build_config(&SeriesSelector::Revenue, Theme::Light);
        let dark = ChartDataAdapter.build_config(&SeriesSelector::Revenue, Theme::Dark);
        let mut toggle = false;

        b.iter(|| {
            toggle = !toggle;
            renderer.apply_chart(black_box(if toggle { &dark } else { &light }))
        });
    });

    group.finish();
}

fn bench_refresh(c: &mut Criterion) {
    let mut group = c.benchmark_group("refresh");

    for count in [10, 100, 1000] {
        group.throughput(Throughput::Elements(count as u64));

        group.bench_function(format!("transactions_{}", count), |b| {
            let mut generator = MockDataGenerator::seeded(7);
            b.iter(|| {
                let mut renderer = renderer();
                for _ in 0..count {
                    renderer.apply_transaction(generator.next_transaction());
                }
                black_box(renderer.feed().len())
            })
        });
    }

    group.bench_function("balance", |b| {
        let mut generator = MockDataGenerator::seeded(7);
        let mut renderer = renderer();
        b.iter(|| renderer.apply_balance(black_box(generator.balance_delta())))
    });

    group.finish();
}

criterion_group!(benches, bench_chart, bench_refresh);
criterion_main!(benches);
