//! Canonical serialization and Blake3 digests of node content.
//!
//! Hash domain separation:
//! - Leaf nodes:     `blake3(0x00 || id || x || y || id || x || y || ...)`
//! - Internal nodes: `blake3(0x01 || lx || ly || ux || uy || digest || ...)`
//!
//! Every integer is written as 4 big-endian bytes, in content order. The
//! builder and the verifier both go through [`leaf_digest`] and
//! [`internal_digest`], so a tree and a proof of it always serialize the same
//! content identically.

use merkle_rtree_costs::OperationCost;

use crate::{Point, Rect};

/// Length in bytes of a node digest.
pub const DIGEST_LEN: usize = 32;

/// A node commitment.
pub type Digest = [u8; DIGEST_LEN];

/// Domain tag prepended to leaf hash inputs.
const LEAF_TAG: u8 = 0x00;
/// Domain tag prepended to internal hash inputs.
const INTERNAL_TAG: u8 = 0x01;

/// Serialized size of one point entry.
pub(crate) const POINT_ENTRY_LEN: usize = 12;
/// Serialized size of one child entry.
pub(crate) const CHILD_ENTRY_LEN: usize = 16 + DIGEST_LEN;

/// `id || x || y`.
pub(crate) fn point_entry(point: &Point) -> [u8; POINT_ENTRY_LEN] {
    let mut entry = [0u8; POINT_ENTRY_LEN];
    entry[0..4].copy_from_slice(&point.id.to_be_bytes());
    entry[4..8].copy_from_slice(&point.x.to_be_bytes());
    entry[8..12].copy_from_slice(&point.y.to_be_bytes());
    entry
}

/// `lx || ly || ux || uy || digest`.
pub(crate) fn child_entry(rect: &Rect, digest: &Digest) -> [u8; CHILD_ENTRY_LEN] {
    let mut entry = [0u8; CHILD_ENTRY_LEN];
    entry[0..4].copy_from_slice(&rect.lx.to_be_bytes());
    entry[4..8].copy_from_slice(&rect.ly.to_be_bytes());
    entry[8..12].copy_from_slice(&rect.ux.to_be_bytes());
    entry[12..16].copy_from_slice(&rect.uy.to_be_bytes());
    entry[16..].copy_from_slice(digest);
    entry
}

/// Digest of a leaf holding `points` in the given order.
///
/// Also returns the cost of the hash call.
pub fn leaf_digest<'a>(points: impl IntoIterator<Item = &'a Point>) -> (Digest, OperationCost) {
    let mut hasher = blake3::Hasher::new();
    hasher.update(&[LEAF_TAG]);
    let mut hashed_bytes = 1u64;
    for point in points {
        hasher.update(&point_entry(point));
        hashed_bytes += POINT_ENTRY_LEN as u64;
    }
    (
        *hasher.finalize().as_bytes(),
        OperationCost::with_node_hash(hashed_bytes),
    )
}

/// Digest of an internal node whose children have the given rectangles and
/// digests, in the given order.
///
/// Also returns the cost of the hash call.
pub fn internal_digest<'a>(
    children: impl IntoIterator<Item = (&'a Rect, &'a Digest)>,
) -> (Digest, OperationCost) {
    let mut hasher = blake3::Hasher::new();
    hasher.update(&[INTERNAL_TAG]);
    let mut hashed_bytes = 1u64;
    for (rect, digest) in children {
        hasher.update(&child_entry(rect, digest));
        hashed_bytes += CHILD_ENTRY_LEN as u64;
    }
    (
        *hasher.finalize().as_bytes(),
        OperationCost::with_node_hash(hashed_bytes),
    )
}

/// Lowercase hex rendering of a digest, for logs and error messages.
pub fn digest_hex(digest: &Digest) -> String {
    hex::encode(digest)
}
