use criterion::{black_box, criterion_group, criterion_main, Criterion};
use h3o::Resolution;
use hexglobe::data::PointDatum;
use hexglobe::hexbin::{bin_points, build_hex_mesh, HexStyle};
use hexglobe::options::HexBinOptions;
use rand::{Rng, SeedableRng};

fn random_points(count: usize) -> Vec<PointDatum> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(7);
    (0..count)
        .map(|_| PointDatum {
            lat: rng.random_range(-80.0..80.0),
            lng: rng.random_range(-180.0..180.0),
            weight: rng.random_range(0.0..5e6),
        })
        .collect()
}

fn binning_benchmark(c: &mut Criterion) {
    let res = Resolution::Three;
    let mut group = c.benchmark_group("bin_points");
    for count in [1_000, 10_000, 50_000] {
        let points = random_points(count);
        group.bench_function(format!("{count}_points"), |b| {
            b.iter(|| black_box(bin_points(black_box(&points), res)))
        });
    }
    group.finish();
}

fn mesh_benchmark(c: &mut Criterion) {
    let res = Resolution::Three;
    let style = HexStyle::from_options(&HexBinOptions::default(), 100.0);
    let bins = bin_points(&random_points(10_000), res);
    c.bench_function("build_hex_mesh", |b| {
        b.iter(|| black_box(build_hex_mesh(black_box(&bins), &style)))
    });
}

criterion_group!(benches, binning_benchmark, mesh_benchmark);
criterion_main!(benches);
