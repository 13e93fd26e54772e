//! Benchmarks for the injector

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use named_injector::{Inject, InjectionPoint, Injector, Instance, Result, downcast};
use std::hint::black_box;
use std::sync::Arc;

#[allow(dead_code)]
#[derive(Default)]
struct SmallService {
    value: i32,
}

#[derive(Default)]
struct Target {
    first: Option<Arc<SmallService>>,
    second: Option<Arc<SmallService>>,
}

impl Inject for Target {
    fn injection_points() -> Vec<InjectionPoint> {
        vec![
            InjectionPoint::new("first", "small"),
            InjectionPoint::new("second", ("small", "named")),
        ]
    }

    fn assign(&mut self, point: &InjectionPoint, instance: Instance) -> Result<()> {
        let value = downcast(instance, point.identifier())?;
        if point.member() == "first" {
            self.first = Some(value);
        } else {
            self.second = Some(value);
        }
        Ok(())
    }
}

fn populated() -> Injector {
    let injector = Injector::new();
    injector
        .map("small")
        .unwrap()
        .to_value(SmallService { value: 42 })
        .unwrap();
    injector
        .map(("small", "named"))
        .unwrap()
        .to_singleton(SmallService::default)
        .unwrap();
    injector
        .map("transient")
        .unwrap()
        .to_type(SmallService::default)
        .unwrap();
    injector
}

fn bench_mapping(c: &mut Criterion) {
    let mut group = c.benchmark_group("mapping");

    group.bench_function("new_injector", |b| b.iter(|| black_box(Injector::new())));

    group.bench_function("map_value", |b| {
        b.iter(|| {
            let injector = Injector::new();
            injector
                .map("small")
                .unwrap()
                .to_value(SmallService { value: 42 })
                .unwrap();
            black_box(injector)
        })
    });

    let injector = populated();
    group.bench_function("map_existing", |b| {
        b.iter(|| black_box(injector.map("small").unwrap()))
    });

    group.finish();
}

fn bench_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolution");
    group.throughput(Throughput::Elements(1));

    let injector = populated();

    group.bench_function("value", |b| {
        b.iter(|| black_box(injector.get::<SmallService>("small").unwrap()))
    });

    group.bench_function("singleton_named", |b| {
        b.iter(|| black_box(injector.get::<SmallService>(("small", "named")).unwrap()))
    });

    group.bench_function("type", |b| {
        b.iter(|| black_box(injector.get::<SmallService>("transient").unwrap()))
    });

    group.bench_function("missing", |b| {
        b.iter(|| black_box(injector.get_instance("missing").is_err()))
    });

    group.finish();
}

fn bench_scoped(c: &mut Criterion) {
    let mut group = c.benchmark_group("scoped");

    let root = populated();
    let child = root.create_child_injector();
    let grandchild = child.create_child_injector();

    group.bench_function("create_child", |b| {
        b.iter(|| black_box(root.create_child_injector()))
    });

    group.bench_function("resolve_from_parent", |b| {
        b.iter(|| black_box(child.get::<SmallService>("small").unwrap()))
    });

    group.bench_function("resolve_from_grandparent", |b| {
        b.iter(|| black_box(grandchild.get::<SmallService>("small").unwrap()))
    });

    group.finish();
}

fn bench_inject_into(c: &mut Criterion) {
    let mut group = c.benchmark_group("inject_into");

    let injector = populated();
    group.bench_function("two_points", |b| {
        b.iter(|| black_box(injector.create_instance::<Target>().unwrap()))
    });

    group.bench_function("parse_directive", |b| {
        b.iter(|| {
            black_box(InjectionPoint::parse(
                "member",
                black_box(r#"inject(name="named"):small"#),
            ))
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_mapping,
    bench_resolution,
    bench_scoped,
    bench_inject_into,
);
criterion_main!(benches);
