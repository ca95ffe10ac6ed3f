//! Benchmarks for rock surface graph assembly
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rock_surface::graph::{OperationRegistry, ParamValue};
use rock_surface::{RockSurface, RockSurfaceConfig};

fn surface() -> RockSurface {
    let config = RockSurfaceConfig {
        seed: Some(1),
        ..Default::default()
    };
    RockSurface::new(OperationRegistry::standard(), &config).unwrap()
}

fn bench_construction(c: &mut Criterion) {
    let config = RockSurfaceConfig {
        seed: Some(1),
        ..Default::default()
    };
    c.bench_function("construct", |b| {
        b.iter(|| {
            black_box(RockSurface::new(OperationRegistry::standard(), black_box(&config)).unwrap())
        });
    });
}

fn bench_relink(c: &mut Criterion) {
    let mut group = c.benchmark_group("relink");

    let mut s = surface();
    group.bench_function("same_stage", |b| {
        b.iter(|| s.update().unwrap());
    });

    let mut s = surface();
    let mut enabled = true;
    group.bench_function("toggle", |b| {
        b.iter(|| {
            enabled = !enabled;
            s.set_property("switchm6", ParamValue::Bool(black_box(enabled)))
                .unwrap()
        });
    });

    group.finish();
}

fn bench_property_write(c: &mut Criterion) {
    let mut s = surface();
    let mut depth = 0;
    c.bench_function("set_redirected_property", |b| {
        b.iter(|| {
            depth = (depth + 1) % 30;
            s.set_property("depth", ParamValue::Int(black_box(depth)))
                .unwrap()
        });
    });
}

fn bench_topology(c: &mut Criterion) {
    let s = surface();
    c.bench_function("compile_topology", |b| {
        b.iter(|| black_box(s.topology().unwrap()));
    });
}

criterion_group!(
    benches,
    bench_construction,
    bench_relink,
    bench_property_write,
    bench_topology,
);

criterion_main!(benches);
