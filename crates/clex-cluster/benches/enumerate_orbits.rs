use clex_cluster::SiteCluster;
use clex_orbit::{enumerate_orbits, Aperiodic, Orbit, SymCompare};
use criterion::{criterion_group, criterion_main, Criterion};
use nalgebra::Vector3;

#[path = "../tests/fixtures.rs"]
mod fixtures;

fn pair_seeds(extent: i64) -> Vec<SiteCluster> {
    let mut seeds = Vec::new();
    for x in 0..=extent {
        for y in 0..=x {
            for z in 0..=y {
                if (x, y, z) != (0, 0, 0) {
                    seeds.push(SiteCluster::new(vec![
                        Vector3::zeros(),
                        Vector3::new(x as f64, y as f64, z as f64),
                    ]));
                }
            }
        }
    }
    seeds
}

fn bench_orbits(c: &mut Criterion) {
    let sym_group = fixtures::cubic_group();
    let cmp: SymCompare<SiteCluster, Aperiodic> =
        SymCompare::new(Aperiodic, fixtures::TOL).expect("tolerance");

    let mut group = c.benchmark_group("enumerate_orbits");
    group.bench_function("mirror_pair", |b| {
        let seed = fixtures::mirror_pair();
        b.iter(|| {
            let _ = Orbit::new(&seed, sym_group.ops(), &cmp).unwrap();
        })
    });
    group.bench_function("pair_seeds_extent_4", |b| {
        let seeds = pair_seeds(4);
        b.iter(|| {
            let _ = enumerate_orbits(&seeds, sym_group.ops(), &cmp).unwrap();
        })
    });
    group.finish();
}

criterion_group!(benches, bench_orbits);
criterion_main!(benches);
