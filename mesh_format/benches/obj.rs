use std::fmt::Write;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use mesh_format::obj;

fn synthetic_obj(vertices: usize) -> String {
    let mut out = String::new();
    for i in 0..vertices {
        let t = i as f64 * 0.37;
        writeln!(out, "v {} {} {}", t.sin() * 100.0, t.cos() * 100.0, t).unwrap();
        writeln!(out, "vn {} {} 0", t.sin(), t.cos()).unwrap();
        writeln!(out, "vt {} {}", t.fract(), 0.5).unwrap();
    }
    for i in 1..vertices.saturating_sub(1) {
        writeln!(out, "f {0}/{0}/{0} {1}/{1}/{1} {2}/{2}/{2}", i, i + 1, i + 2).unwrap();
    }
    out
}

pub fn bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("Obj");

    for vertices in [1_000, 100_000] {
        let raw = synthetic_obj(vertices);
        let mesh = obj::parse(raw.as_bytes()).unwrap();

        group.bench_with_input(BenchmarkId::new("Parse", vertices), &raw, |b, i| {
            b.iter(|| obj::parse(i.as_bytes()).unwrap())
        });

        group.bench_with_input(BenchmarkId::new("Write", vertices), &mesh, |b, i| {
            b.iter(|| {
                let mut out = Vec::with_capacity(raw.len());
                obj::write(&mut out, i).unwrap();
                out
            })
        });
    }
}

criterion_group!(benches, bench);
criterion_main!(benches);
