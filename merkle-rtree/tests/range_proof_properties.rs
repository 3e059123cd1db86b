//! Property tests for range proofs over arbitrary point sets.
//!
//! Every proof produced by an honest tree must verify against the published
//! root, return exactly the brute-force answer, and never prune a subtree
//! holding a matching point.

use merkle_rtree::{
    MerkleRTree, MerkleRTreeError, Node, Point, QueryOptions, Rect, SortOrder, TreeConfig,
    VerificationObject,
};
use proptest::prelude::*;

fn arb_points() -> impl Strategy<Value = Vec<Point>> {
    prop::collection::vec((-1000i32..1000, -1000i32..1000), 1..300).prop_map(|coords| {
        coords
            .into_iter()
            .zip(1u32..)
            .map(|((x, y), id)| Point::new(id, x, y))
            .collect()
    })
}

fn arb_query() -> impl Strategy<Value = Rect> {
    (-1100i32..1100, -1100i32..1100, 0i32..800, 0i32..800).prop_map(|(lx, ly, w, h)| Rect {
        lx,
        ly,
        ux: lx + w,
        uy: ly + h,
    })
}

fn arb_order() -> impl Strategy<Value = SortOrder> {
    prop_oneof![Just(SortOrder::Lexicographic), Just(SortOrder::ZOrder)]
}

fn sorted_ids<'a>(points: impl IntoIterator<Item = &'a Point>) -> Vec<u32> {
    let mut ids: Vec<u32> = points.into_iter().map(|p| p.id).collect();
    ids.sort_unstable();
    ids
}

fn pruned_subtrees_hold_no_match(node: &Node, vo: &VerificationObject, query: &Rect) -> bool {
    match (node, vo) {
        (_, VerificationObject::Pruned { rect, digest }) => {
            rect == node.rect()
                && digest == node.digest()
                && node.points().all(|p| !query.contains(p))
        }
        (Node::Leaf(_), VerificationObject::DisclosedLeaf(_)) => true,
        (Node::Internal(internal), VerificationObject::Explored(children)) => {
            internal.children().len() == children.len()
                && internal
                    .children()
                    .iter()
                    .zip(children)
                    .all(|(child, child_vo)| pruned_subtrees_hold_no_match(child, child_vo, query))
        }
        _ => false,
    }
}

proptest! {
    #[test]
    fn proof_answers_like_brute_force(
        points in arb_points(),
        query in arb_query(),
        capacity in 2usize..12,
        order in arb_order(),
        strict in any::<bool>(),
    ) {
        let tree = MerkleRTree::build(points.clone(), TreeConfig::new(capacity).with_order(order))
            .unwrap()
            .expect("build");
        let root = tree.root_digest().expect("non-empty tree");
        let options = if strict { QueryOptions::strict() } else { QueryOptions::default() };

        let vo = tree
            .query_with_options(&query, &options)
            .unwrap()
            .expect("query")
            .expect("non-empty tree");
        prop_assert!(pruned_subtrees_hold_no_match(tree.root().expect("root"), &vo, &query));

        let result = vo.verify_against(&query, &root).unwrap().expect("verify");
        let expected = points.iter().filter(|p| query.contains(p));
        prop_assert_eq!(sorted_ids(&result.points), sorted_ids(expected));
    }

    #[test]
    fn input_order_does_not_change_answer(
        points in arb_points(),
        query in arb_query(),
        capacity in 2usize..12,
    ) {
        let forward = MerkleRTree::build(points.clone(), TreeConfig::new(capacity))
            .unwrap()
            .expect("build");
        let mut reversed_points = points;
        reversed_points.reverse();
        let reversed = MerkleRTree::build(reversed_points, TreeConfig::new(capacity))
            .unwrap()
            .expect("build");

        let answer = |tree: &MerkleRTree| {
            let vo = tree.query(&query).unwrap().expect("query").expect("non-empty tree");
            let root = tree.root_digest().expect("non-empty tree");
            sorted_ids(&vo.verify_against(&query, &root).unwrap().expect("verify").points)
        };
        prop_assert_eq!(answer(&forward), answer(&reversed));
    }

    #[test]
    fn moved_disclosed_point_is_detected(
        points in arb_points(),
        capacity in 2usize..12,
        shift in 1i32..50,
    ) {
        let tree = MerkleRTree::build(points, TreeConfig::new(capacity))
            .unwrap()
            .expect("build");
        let root = tree.root_digest().expect("non-empty tree");
        let query = tree.bounds();
        let mut vo = tree.query(&query).unwrap().expect("query").expect("non-empty tree");

        fn first_point(vo: &mut VerificationObject) -> Option<&mut Point> {
            match vo {
                VerificationObject::DisclosedLeaf(points) => points.first_mut(),
                VerificationObject::Pruned { .. } => None,
                VerificationObject::Explored(children) => children.iter_mut().find_map(first_point),
            }
        }
        first_point(&mut vo).expect("whole-tree query discloses a point").x += shift;

        let err = vo.verify_against(&query, &root).unwrap().expect_err("tampering detected");
        prop_assert!(matches!(err, MerkleRTreeError::RootMismatch { .. }), "expected RootMismatch, got {:?}", err);
    }
}
