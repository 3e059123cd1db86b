//! Shared helpers for unit tests.

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{MerkleRTree, Node, Point, Rect, TreeConfig, VerificationObject};

/// `count` points with ids `1..=count` and coordinates in `[min, max]`,
/// drawn from a fixed seed.
pub(crate) fn random_points(seed: u64, count: usize, min: i32, max: i32) -> Vec<Point> {
    let mut rng = StdRng::seed_from_u64(seed);
    (1..=count as u32)
        .map(|id| Point::new(id, rng.random_range(min..=max), rng.random_range(min..=max)))
        .collect()
}

/// A random valid query rectangle with corners in `[min, max]`.
pub(crate) fn random_query(rng: &mut StdRng, min: i32, max: i32) -> Rect {
    let (x1, x2) = (rng.random_range(min..=max), rng.random_range(min..=max));
    let (y1, y2) = (rng.random_range(min..=max), rng.random_range(min..=max));
    Rect {
        lx: x1.min(x2),
        ly: y1.min(y2),
        ux: x1.max(x2),
        uy: y1.max(y2),
    }
}

/// Brute-force answer: every point inside `query`.
pub(crate) fn brute_force(points: &[Point], query: &Rect) -> Vec<Point> {
    points.iter().filter(|p| query.contains(p)).copied().collect()
}

/// Sorted ids, for order-independent comparison of answers.
pub(crate) fn sorted_ids(points: &[Point]) -> Vec<u32> {
    let mut ids: Vec<u32> = points.iter().map(|p| p.id).collect();
    ids.sort_unstable();
    ids
}

/// Build a tree over `points`, panicking on failure.
pub(crate) fn make_tree(points: &[Point], capacity: usize) -> MerkleRTree {
    MerkleRTree::build(points.to_vec(), TreeConfig::new(capacity))
        .unwrap()
        .expect("build should succeed")
}

/// Generate and verify a proof for `query` against the tree's root,
/// returning the matching points.
pub(crate) fn prove_and_verify(tree: &MerkleRTree, query: &Rect) -> Vec<Point> {
    let root = tree.root_digest().expect("non-empty tree");
    let vo = tree
        .query(query)
        .unwrap()
        .expect("query should succeed")
        .expect("non-empty tree");
    vo.verify_against(query, &root)
        .unwrap()
        .expect("verification should succeed")
        .points
}

/// Assert that every subtree replaced by a placeholder in `vo` holds no point
/// inside `query`, by scanning the matching subtree of `node`.
pub(crate) fn assert_pruning_sound(node: &Node, vo: &VerificationObject, query: &Rect) {
    match (node, vo) {
        (_, VerificationObject::Pruned { rect, digest }) => {
            assert_eq!(rect, node.rect(), "placeholder rect must be the node rect");
            assert_eq!(digest, node.digest(), "placeholder digest must be the node digest");
            assert!(
                node.points().all(|p| !query.contains(p)),
                "pruned subtree {} contains a point inside {}",
                rect,
                query
            );
        }
        (Node::Leaf(leaf), VerificationObject::DisclosedLeaf(points)) => {
            assert_eq!(leaf.points(), points.as_slice());
        }
        (Node::Internal(internal), VerificationObject::Explored(children)) => {
            assert_eq!(internal.children().len(), children.len());
            for (child, child_vo) in internal.children().iter().zip(children) {
                assert_pruning_sound(child, child_vo, query);
            }
        }
        (node, vo) => panic!("proof shape {:?} does not mirror node {:?}", vo, node),
    }
}
