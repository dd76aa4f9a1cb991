use RustedRevolve::numerical::disk_method::{VolumeSettings, compute_volume, compute_volume_with};
use RustedRevolve::numerical::quadrature::{QuadMethod, QuadratureConfig};
use RustedRevolve::symbolic::symbolic_lambdify::parse;
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse sphere profile", |b| {
        b.iter(|| parse(black_box("sqrt(4 - x^2) * exp(-x/10) + arctg(x)")))
    });
}

fn bench_volume_methods(c: &mut Criterion) {
    let f = parse("sin(x)^2 + exp(-x) * cos(3*x)").unwrap();
    let mut group = c.benchmark_group("disk method");
    group.bench_function("adaptive", |b| {
        b.iter(|| compute_volume(&f, black_box(0.0), black_box(10.0)))
    });
    for method in [QuadMethod::GaussLegendre, QuadMethod::Simpson] {
        let settings = VolumeSettings {
            quadrature: QuadratureConfig::with_method(method),
            ..Default::default()
        };
        group.bench_function(method.to_string(), |b| {
            b.iter(|| compute_volume_with(&f, black_box(0.0), black_box(10.0), &settings))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_parse, bench_volume_methods);
criterion_main!(benches);
