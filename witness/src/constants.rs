//! Shape constants for the witness output.

/// Depth of the key-set tree in deployed circuits (8 leaves).
pub const DEFAULT_TREE_DEPTH: usize = 3;

/// Largest depth accepted when building a tree.
pub const MAX_TREE_DEPTH: usize = 20;

/// Bits per integer limb fed to the circuit.
pub const DEFAULT_CHUNK_BITS: usize = 120;

/// Limbs per RSA-sized integer (35 × 120 = 4200 bits).
pub const DEFAULT_NUM_CHUNKS: usize = 35;

/// Width of the Poseidon2 permutation.
pub(crate) const POSEIDON2_WIDTH: usize = 16;

/// Field elements in a digest.
pub const DIGEST_WIDTH: usize = 8;

/// Bits carried by each field element when a limb is absorbed.
pub const ELEMENT_BITS: usize = 30;

/// 64-bit limbs per 256-bit value in Ed25519 witnesses.
pub const U64_LIMBS: usize = 4;
