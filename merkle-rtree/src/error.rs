use thiserror::Error;

/// Errors from Merkle R-tree operations.
///
/// The variants separate bad caller input, proofs that cannot describe any
/// pruning of a real tree, and proofs that are well-formed but do not
/// reproduce the trusted root.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MerkleRTreeError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("malformed proof: {0}")]
    MalformedProof(String),
    #[error("root hash mismatch: expected {expected}, got {actual}")]
    RootMismatch { expected: String, actual: String },
    #[error("encoding error: {0}")]
    EncodingError(String),
}

impl MerkleRTreeError {
    /// `true` for a reconstructed root that differs from the trusted one.
    pub fn is_authentication_failure(&self) -> bool {
        matches!(self, MerkleRTreeError::RootMismatch { .. })
    }

    /// `true` for a proof whose shape is invalid, independent of any digest.
    pub fn is_malformed_proof(&self) -> bool {
        matches!(self, MerkleRTreeError::MalformedProof(_))
    }
}
