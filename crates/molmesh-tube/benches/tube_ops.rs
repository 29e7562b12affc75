use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use molmesh_mesh::MeshBuilder;
use molmesh_tube::{
    helix_points, rotation_minimizing_frames, CrossSection, OwnedTubeSamples, TubeBuilder,
    TubeParams,
};

fn helix_samples(n: usize) -> OwnedTubeSamples {
    let points = helix_points(8.0, 5.0, 4.0, n);
    let frames = rotation_minimizing_frames(&points).expect("helix frames");
    OwnedTubeSamples::uniform(&frames, 0.4, 1.2)
}

fn bench_add_tube(c: &mut Criterion) {
    let builder = TubeBuilder::new();
    let mut group = c.benchmark_group("add_tube");

    for &n in &[64usize, 512, 4096] {
        let samples = helix_samples(n);
        for kind in [CrossSection::Elliptical, CrossSection::Rounded] {
            let params = TubeParams::default()
                .with_linear_segments(n - 1)
                .with_radial_segments(16)
                .with_cross_section(kind);
            group.bench_with_input(BenchmarkId::new(format!("{kind:?}"), n), &n, |b, _| {
                b.iter(|| {
                    let mut sink = MeshBuilder::with_capacity(
                        params.added_vertex_count().expect("vertex count"),
                        params.added_triangle_count().expect("triangle count"),
                    );
                    builder
                        .add_tube(&mut sink, &samples.as_samples(), black_box(&params))
                        .expect("tube");
                    black_box(sink.finish())
                });
            });
        }
    }

    group.finish();
}

fn bench_frames(c: &mut Criterion) {
    let points = helix_points(8.0, 5.0, 4.0, 4096);
    c.bench_function("rotation_minimizing_frames_4096", |b| {
        b.iter(|| rotation_minimizing_frames(black_box(&points)).expect("frames"))
    });
}

criterion_group!(benches, bench_add_tube, bench_frames);
criterion_main!(benches);
