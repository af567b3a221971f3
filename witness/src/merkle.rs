//! Fixed-depth binary Merkle tree over hash digests.
//!
//! Nodes are stored in heap order: the root at position 1, the children of
//! `i` at `2i` and `2i + 1`, and the `2^depth` leaves at
//! `[2^depth, 2^(depth+1))`. Unfilled leaves hold the zero digest.

use p3_symmetric::PseudoCompressionFunction;
use serde::Serialize;
use tracing::debug;

use crate::constants::MAX_TREE_DEPTH;
use crate::errors::MerkleError;
use crate::hash::{default_compression, hash_pair, Digest, Poseidon2Compression, ZERO_DIGEST};

/// Sibling digests ordered leaf to root, with one direction bit per level.
///
/// `false` means the sibling is the right child, `true` the left child.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MerkleProof {
    pub siblings: Vec<Digest>,
    pub directions: Vec<bool>,
}

impl MerkleProof {
    pub fn len(&self) -> usize {
        self.siblings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.siblings.is_empty()
    }
}

#[derive(Clone, Debug)]
pub struct MerkleTree<C = Poseidon2Compression> {
    compression: C,
    depth: usize,
    nodes: Vec<Digest>,
}

impl MerkleTree<Poseidon2Compression> {
    /// Builds with the default Poseidon2 compression.
    pub fn new(leaves: &[Digest], depth: usize) -> Result<Self, MerkleError> {
        Self::build(default_compression(), leaves, depth)
    }
}

impl<C: PseudoCompressionFunction<Digest, 2>> MerkleTree<C> {
    /// Places `leaves` at indices `0..leaves.len()` and hashes every level.
    pub fn build(compression: C, leaves: &[Digest], depth: usize) -> Result<Self, MerkleError> {
        if depth == 0 || depth > MAX_TREE_DEPTH {
            return Err(MerkleError::InvalidDepth(depth));
        }
        let capacity = 1usize << depth;
        if leaves.len() > capacity {
            return Err(MerkleError::CapacityExceeded {
                leaves: leaves.len(),
                capacity,
            });
        }

        let mut nodes = vec![ZERO_DIGEST; 2 * capacity];
        nodes[capacity..capacity + leaves.len()].copy_from_slice(leaves);
        for i in (1..capacity).rev() {
            nodes[i] = hash_pair(&compression, nodes[2 * i], nodes[2 * i + 1]);
        }

        debug!(depth, leaves = leaves.len(), capacity, "built merkle tree");
        Ok(MerkleTree {
            compression,
            depth,
            nodes,
        })
    }

    pub fn root(&self) -> &Digest {
        &self.nodes[1]
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn capacity(&self) -> usize {
        1 << self.depth
    }

    pub fn compression(&self) -> &C {
        &self.compression
    }

    pub fn leaves(&self) -> &[Digest] {
        &self.nodes[self.capacity()..]
    }

    pub fn leaf(&self, index: usize) -> Option<&Digest> {
        self.leaves().get(index)
    }

    /// First index holding `value`.
    pub fn position_of(&self, value: &Digest) -> Option<usize> {
        self.leaves().iter().position(|leaf| leaf == value)
    }

    /// Proof for the leaf at `index`, which must hold `value`.
    pub fn proof(&self, index: usize, value: &Digest) -> Result<MerkleProof, MerkleError> {
        let capacity = self.capacity();
        if index >= capacity {
            return Err(MerkleError::IndexOutOfRange { index, capacity });
        }
        if self.nodes[capacity + index] != *value {
            return Err(MerkleError::ValueNotFound);
        }

        let mut siblings = Vec::with_capacity(self.depth);
        let mut directions = Vec::with_capacity(self.depth);
        let mut pos = capacity + index;
        while pos > 1 {
            siblings.push(self.nodes[pos ^ 1]);
            // An odd position is a right child, so its sibling is on the left.
            directions.push(pos & 1 == 1);
            pos >>= 1;
        }
        Ok(MerkleProof {
            siblings,
            directions,
        })
    }

    /// Proof for the first leaf equal to `value`.
    pub fn proof_for_value(&self, value: &Digest) -> Result<(usize, MerkleProof), MerkleError> {
        let index = self.position_of(value).ok_or(MerkleError::ValueNotFound)?;
        Ok((index, self.proof(index, value)?))
    }

    /// Overwrites the leaf at `index` and rehashes its path to the root.
    pub fn update(&mut self, index: usize, value: Digest) -> Result<(), MerkleError> {
        let capacity = self.capacity();
        if index >= capacity {
            return Err(MerkleError::IndexOutOfRange { index, capacity });
        }
        let mut pos = capacity + index;
        self.nodes[pos] = value;
        while pos > 1 {
            pos >>= 1;
            self.nodes[pos] = hash_pair(&self.compression, self.nodes[2 * pos], self.nodes[2 * pos + 1]);
        }
        Ok(())
    }

    /// Checks `proof` for `value` against this tree's current root.
    pub fn verify(&self, value: &Digest, proof: &MerkleProof) -> bool {
        verify_proof(&self.compression, value, proof, self.root())
    }
}

/// Folds `value` up through `proof` and compares with `root`.
pub fn verify_proof<C: PseudoCompressionFunction<Digest, 2>>(
    compression: &C,
    value: &Digest,
    proof: &MerkleProof,
    root: &Digest,
) -> bool {
    if proof.siblings.len() != proof.directions.len() {
        debug!(
            siblings = proof.siblings.len(),
            directions = proof.directions.len(),
            "rejecting proof with mismatched lengths"
        );
        return false;
    }
    let computed = proof
        .siblings
        .iter()
        .zip(&proof.directions)
        .fold(*value, |acc, (sibling, &left)| {
            if left {
                hash_pair(compression, *sibling, acc)
            } else {
                hash_pair(compression, acc, *sibling)
            }
        });
    computed == *root
}
