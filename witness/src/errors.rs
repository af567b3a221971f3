//! Error types for commitments and witness shaping.

use curve::{CurveError, CurveModel};
use sshsig::SshSigError;
use thiserror::Error;

/// Failures of Merkle tree construction and proof requests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MerkleError {
    #[error("tree depth {0} is outside 1..={max}", max = crate::constants::MAX_TREE_DEPTH)]
    InvalidDepth(usize),

    #[error("{leaves} leaves do not fit in a tree of capacity {capacity}")]
    CapacityExceeded { leaves: usize, capacity: usize },

    #[error("leaf index {index} is outside capacity {capacity}")]
    IndexOutOfRange { index: usize, capacity: usize },

    #[error("value not found in merkle tree")]
    ValueNotFound,
}

/// Errors raised while shaping witness data.
#[derive(Debug, Error)]
pub enum WitnessError {
    #[error(transparent)]
    Merkle(#[from] MerkleError),

    #[error(transparent)]
    Signature(#[from] SshSigError),

    #[error(transparent)]
    Curve(#[from] CurveError),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("value of {bits} bits does not fit in {capacity} bits of limbs")]
    ValueTooWide { bits: u64, capacity: u64 },

    #[error("{0} key type is not accepted")]
    KeyTypeNotAccepted(String),

    #[error("the point at infinity has no coordinates in the {0} model")]
    PointAtInfinity(CurveModel),

    #[error("RSA modulus is {actual} bytes, the circuit expects {expected}")]
    ModulusSizeMismatch { expected: usize, actual: usize },

    #[error("signature does not satisfy the verification equation")]
    InvalidSignature,

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
