#[macro_use]
extern crate criterion;

use criterion::{BenchmarkId, Criterion};
use merkle_rtree::{MerkleRTree, Point, Rect, SortOrder, TreeConfig};
use rand::{Rng, SeedableRng, rngs::StdRng};

fn random_points(count: u32, rng: &mut StdRng) -> Vec<Point> {
    (1..=count)
        .map(|id| {
            Point::new(
                id,
                rng.random_range(0..1_000_000),
                rng.random_range(0..1_000_000),
            )
        })
        .collect()
}

fn random_query(rng: &mut StdRng, side: i32) -> Rect {
    let lx = rng.random_range(0..1_000_000 - side);
    let ly = rng.random_range(0..1_000_000 - side);
    Rect {
        lx,
        ly,
        ux: lx + side,
        uy: ly + side,
    }
}

fn prepare_tree(count: u32, order: SortOrder) -> MerkleRTree {
    let mut rng = StdRng::seed_from_u64(count as u64);
    MerkleRTree::build(
        random_points(count, &mut rng),
        TreeConfig::default().with_order(order),
    )
    .unwrap()
    .expect("build")
}

fn bench(c: &mut Criterion) {
    {
        let mut group = c.benchmark_group("Merkle R-tree build");
        let inputs = [10_000, 100_000];
        for input in inputs.iter() {
            group.bench_with_input(BenchmarkId::new("points", input), &input, |b, &&size| {
                let mut rng = StdRng::seed_from_u64(1);
                let points = random_points(size, &mut rng);
                b.iter(|| {
                    MerkleRTree::build(points.clone(), TreeConfig::default())
                        .unwrap()
                        .expect("build")
                });
            });
        }
    }

    for (name, order) in [
        ("lexicographic", SortOrder::Lexicographic),
        ("z-order", SortOrder::ZOrder),
    ] {
        c.bench_function(&format!("Merkle R-tree gen proof ({})", name), |b| {
            let tree = prepare_tree(100_000, order);
            let mut rng = StdRng::seed_from_u64(2);
            b.iter(|| {
                let query = random_query(&mut rng, 10_000);
                tree.query(&query).unwrap().expect("query")
            });
        });
    }

    c.bench_function("Merkle R-tree verify", |b| {
        let tree = prepare_tree(100_000, SortOrder::ZOrder);
        let root = tree.root_digest().expect("non-empty tree");
        let mut rng = StdRng::seed_from_u64(3);
        let proofs: Vec<_> = (0..1_000)
            .map(|_| {
                let query = random_query(&mut rng, 10_000);
                let vo = tree
                    .query(&query)
                    .unwrap()
                    .expect("query")
                    .expect("non-empty tree");
                (query, vo)
            })
            .collect();
        let mut i = 0;
        b.iter(|| {
            let (query, vo) = &proofs[i % proofs.len()];
            i += 1;
            vo.verify_against(query, &root).unwrap().expect("verify")
        });
    });
}

criterion_group!(benches, bench);
criterion_main!(benches);
