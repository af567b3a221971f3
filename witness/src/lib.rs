//! # Key-set commitments and circuit inputs for SSH signatures
//!
//! This crate turns a verified SSHSIG envelope into the inputs an external
//! membership circuit consumes. The circuit proves that the signer's key sits
//! in a committed set without saying which one.
//!
//! ## Pipeline
//!
//! 1. Contributors and their public keys are read from JSON
//!    ([`ContributorSet`]) and committed with [`KeySetCommitment`]. Each key
//!    is split into integer limbs, absorbed into an arithmetic hash, and
//!    placed as a leaf of a fixed-depth [`MerkleTree`].
//! 2. A signature is parsed and verified with the `sshsig` crate.
//! 3. [`RsaCircuitInputs`] or [`Ed25519CircuitInputs`] gather the signature
//!    values, the membership proof and the root, rendered as decimal strings.
//!
//! ```rust,ignore
//! use sshsig::SshSigFrame;
//! use witness::{ContributorSet, KeySetCommitment, RsaCircuitInputs, WitnessConfig};
//!
//! let contributors = ContributorSet::from_json(&json)?;
//! let commitment = KeySetCommitment::new(&contributors, &WitnessConfig::default())?;
//! let frame = SshSigFrame::parse_armored(&armored)?;
//! let inputs = RsaCircuitInputs::new(&frame, b"0xPARC", &commitment)?;
//! println!("{}", inputs.to_json()?);
//! ```
//!
//! ## Hash
//!
//! The tree is generic over any two-to-one
//! [`PseudoCompressionFunction`](p3_symmetric::PseudoCompressionFunction).
//! The default is Poseidon2 over BabyBear, width 16, truncated to eight
//! elements. Integer limbs are cut into 30-bit elements before hashing.
//!
//! ## Ed25519
//!
//! Ed25519 signatures are checked in the circuit on the short Weierstrass
//! model of Curve25519. [`Ed25519Witness`] maps `R` and `A` across and checks
//! `s·G = R + h·A` there before any inputs are emitted.

mod config;
mod constants;
mod ed25519_witness;
mod errors;
mod hash;
mod inputs;
mod keyset;
mod limbs;
mod merkle;

#[cfg(test)]
mod tests;

pub use config::WitnessConfig;
pub use constants::{
    DEFAULT_CHUNK_BITS, DEFAULT_NUM_CHUNKS, DEFAULT_TREE_DEPTH, DIGEST_WIDTH, ELEMENT_BITS,
    MAX_TREE_DEPTH, U64_LIMBS,
};
pub use ed25519_witness::Ed25519Witness;
pub use errors::{MerkleError, WitnessError};
pub use hash::{
    default_compression, digest_to_strings, hash_array, hash_limbs, hash_pair, limb_to_digest,
    Digest, Poseidon2Compression, MAX_LIMB_BITS, ZERO_DIGEST,
};
pub use inputs::{Ed25519CircuitInputs, RsaCircuitInputs};
pub use keyset::{
    key_leaf, CommittedKey, Contributor, ContributorKey, ContributorSet, KeySetCommitment,
    SkippedKey,
};
pub use limbs::{join_chunks, split_to_chunks, split_u64_limbs};
pub use merkle::{verify_proof, MerkleProof, MerkleTree};
