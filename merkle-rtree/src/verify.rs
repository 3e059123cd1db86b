//! Proof verification.
//!
//! Needs no tree, only the proof. Recomputes rectangles and digests
//! bottom-up from the proof content, keeping only the disclosed points that
//! satisfy the query, and optionally compares the rebuilt root digest with a
//! trusted one.
//!
//! Disclosed leaves contribute all their points to the digest but only their
//! matching points to the result. Pruned placeholders contribute their
//! rectangle and digest as given; they are authenticated only through the
//! root comparison, which covers a placeholder's rectangle only through its
//! parent. A placeholder at the top of the proof is therefore rejected, as is
//! one whose rectangle meets the query.

use merkle_rtree_costs::{CostResult, CostsExt, OperationCost};
use tracing::{debug, warn};

use crate::{
    MerkleRTreeError, Point, Rect, VerificationObject, VerifyOptions,
    hash::{Digest, digest_hex, internal_digest, leaf_digest},
};

/// What a proof reconstructs: the rectangle and digest of the proved
/// subtree, and the points in it that satisfy the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationResult {
    /// Rectangle covering every disclosed point and pruned rectangle.
    pub rect: Rect,
    /// Digest rebuilt over the whole proof.
    pub digest: Digest,
    /// Disclosed points inside the query, in tree order.
    pub points: Vec<Point>,
}

impl VerificationResult {
    /// `true` if the rebuilt digest equals `trusted_root`.
    ///
    /// The points may only be used when this holds.
    pub fn matches_root(&self, trusted_root: &Digest) -> bool {
        self.digest == *trusted_root
    }

    /// Number of matching points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl VerificationObject {
    /// Rebuild the result of this proof for `query`, with default limits.
    ///
    /// This does not compare against a trusted root; use
    /// [`verify_against`](Self::verify_against) unless the digest is checked
    /// elsewhere.
    pub fn verify(&self, query: &Rect) -> CostResult<VerificationResult, MerkleRTreeError> {
        self.verify_with_options(query, &VerifyOptions::default())
    }

    /// Rebuild the result of this proof for `query` under `options`.
    pub fn verify_with_options(
        &self,
        query: &Rect,
        options: &VerifyOptions,
    ) -> CostResult<VerificationResult, MerkleRTreeError> {
        let mut cost = OperationCost::default();
        if let Err(e) = query.validate() {
            return Err(e).wrap_with_cost(cost);
        }
        if let VerificationObject::Pruned { rect, .. } = self {
            return Err(MerkleRTreeError::MalformedProof(format!(
                "proof root is a placeholder {}",
                rect
            )))
            .wrap_with_cost(cost);
        }
        let result = self.verify_inner(query, options, 1, &mut cost);
        if let Ok(result) = &result {
            debug!(
                query = %query,
                matched = result.points.len(),
                examined = cost.points_examined,
                digest = %digest_hex(&result.digest),
                "verified range proof"
            );
        }
        result.wrap_with_cost(cost)
    }

    /// Rebuild the result of this proof for `query` and check it against
    /// `trusted_root`.
    ///
    /// A differing root fails with `RootMismatch`; no points are returned in
    /// that case.
    pub fn verify_against(
        &self,
        query: &Rect,
        trusted_root: &Digest,
    ) -> CostResult<VerificationResult, MerkleRTreeError> {
        self.verify_against_with_options(query, trusted_root, &VerifyOptions::default())
    }

    /// [`verify_against`](Self::verify_against) with explicit limits.
    pub fn verify_against_with_options(
        &self,
        query: &Rect,
        trusted_root: &Digest,
        options: &VerifyOptions,
    ) -> CostResult<VerificationResult, MerkleRTreeError> {
        self.verify_with_options(query, options).map(|result| {
            let result = result?;
            if !result.matches_root(trusted_root) {
                warn!(
                    expected = %digest_hex(trusted_root),
                    actual = %digest_hex(&result.digest),
                    "range proof does not match trusted root"
                );
                return Err(MerkleRTreeError::RootMismatch {
                    expected: digest_hex(trusted_root),
                    actual: digest_hex(&result.digest),
                });
            }
            Ok(result)
        })
    }

    fn verify_inner(
        &self,
        query: &Rect,
        options: &VerifyOptions,
        depth: usize,
        cost: &mut OperationCost,
    ) -> Result<VerificationResult, MerkleRTreeError> {
        if depth > options.max_depth {
            return Err(MerkleRTreeError::MalformedProof(format!(
                "proof nested deeper than {} levels",
                options.max_depth
            )));
        }
        cost.nodes_visited += 1;

        match self {
            VerificationObject::DisclosedLeaf(points) => {
                if points.is_empty() {
                    return Err(MerkleRTreeError::MalformedProof(
                        "disclosed leaf without points".into(),
                    ));
                }
                check_fanout(points.len(), options, "disclosed leaf")?;

                let (digest, hash_cost) = leaf_digest(points);
                *cost += hash_cost;
                cost.points_examined += points.len() as u64;

                let matching: Vec<Point> = points
                    .iter()
                    .filter(|point| point.is_inside(query))
                    .copied()
                    .collect();
                cost.points_returned += matching.len() as u64;

                Ok(VerificationResult {
                    rect: Rect::bounding(points),
                    digest,
                    points: matching,
                })
            }
            VerificationObject::Pruned { rect, digest } => {
                if rect.is_empty() {
                    return Err(MerkleRTreeError::MalformedProof(format!(
                        "pruned node has inverted rectangle {}",
                        rect
                    )));
                }
                // A placeholder meeting the query could hide matching points.
                if rect.intersects(query) {
                    return Err(MerkleRTreeError::MalformedProof(format!(
                        "pruned node {} overlaps query {}",
                        rect, query
                    )));
                }
                cost.nodes_pruned += 1;
                Ok(VerificationResult {
                    rect: *rect,
                    digest: *digest,
                    points: Vec::new(),
                })
            }
            VerificationObject::Explored(children) => {
                if children.is_empty() {
                    return Err(MerkleRTreeError::MalformedProof(
                        "explored node without children".into(),
                    ));
                }
                check_fanout(children.len(), options, "explored node")?;

                let mut child_results = Vec::with_capacity(children.len());
                for child in children {
                    child_results.push(child.verify_inner(query, options, depth + 1, cost)?);
                }

                let rect = child_results
                    .iter()
                    .fold(Rect::EMPTY, |rect, child| rect.enlarge(&child.rect));
                let (digest, hash_cost) =
                    internal_digest(child_results.iter().map(|c| (&c.rect, &c.digest)));
                *cost += hash_cost;

                let points = child_results
                    .into_iter()
                    .flat_map(|child| child.points)
                    .collect();

                Ok(VerificationResult {
                    rect,
                    digest,
                    points,
                })
            }
        }
    }
}

fn check_fanout(len: usize, options: &VerifyOptions, what: &str) -> Result<(), MerkleRTreeError> {
    match options.max_fanout {
        Some(max) if len > max => Err(MerkleRTreeError::MalformedProof(format!(
            "{} has {} entries, more than the capacity {}",
            what, len, max
        ))),
        _ => Ok(()),
    }
}

/// Rebuild the result of `vo` for `query` and check it against
/// `trusted_root`.
pub fn verify_range_proof(
    vo: &VerificationObject,
    query: &Rect,
    trusted_root: &Digest,
) -> CostResult<VerificationResult, MerkleRTreeError> {
    vo.verify_against(query, trusted_root)
}
