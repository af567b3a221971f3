//! Arithmetic hash used as the Merkle compression function.
//!
//! The default instance is Poseidon2 over BabyBear (width 16) truncated to an
//! 8-element digest. Integers enter the hash limb by limb: each limb is cut
//! into 30-bit field elements and zero padded to a full digest.

use num_bigint::BigUint;
use p3_baby_bear::{default_babybear_poseidon2_16, BabyBear, Poseidon2BabyBear};
use p3_field::{PrimeCharacteristicRing, PrimeField32};
use p3_symmetric::{PseudoCompressionFunction, TruncatedPermutation};

use crate::constants::{DIGEST_WIDTH, ELEMENT_BITS, POSEIDON2_WIDTH};
use crate::errors::WitnessError;

/// A node value: eight BabyBear elements.
pub type Digest = [BabyBear; DIGEST_WIDTH];

/// Two-to-one Poseidon2 compression over BabyBear digests.
pub type Poseidon2Compression =
    TruncatedPermutation<Poseidon2BabyBear<POSEIDON2_WIDTH>, 2, DIGEST_WIDTH, POSEIDON2_WIDTH>;

/// The zero digest, used for empty leaves and as the fold seed.
pub const ZERO_DIGEST: Digest = [BabyBear::ZERO; DIGEST_WIDTH];

/// Widest limb a single digest can carry.
pub const MAX_LIMB_BITS: usize = DIGEST_WIDTH * ELEMENT_BITS;

pub fn default_compression() -> Poseidon2Compression {
    TruncatedPermutation::new(default_babybear_poseidon2_16())
}

/// `H(left, right)`.
#[inline]
pub fn hash_pair<C: PseudoCompressionFunction<Digest, 2>>(
    compression: &C,
    left: Digest,
    right: Digest,
) -> Digest {
    compression.compress([left, right])
}

/// Left fold `acc = H(acc, item)` from the zero digest.
pub fn hash_array<C: PseudoCompressionFunction<Digest, 2>>(compression: &C, items: &[Digest]) -> Digest {
    items
        .iter()
        .fold(ZERO_DIGEST, |acc, item| hash_pair(compression, acc, *item))
}

/// Packs a limb into a digest, 30 bits per element, little-endian.
pub fn limb_to_digest(limb: &BigUint) -> Result<Digest, WitnessError> {
    if limb.bits() > MAX_LIMB_BITS as u64 {
        return Err(WitnessError::ValueTooWide {
            bits: limb.bits(),
            capacity: MAX_LIMB_BITS as u64,
        });
    }
    let mask = (BigUint::from(1u32) << ELEMENT_BITS) - 1u32;
    let mut digest = ZERO_DIGEST;
    for (i, slot) in digest.iter_mut().enumerate() {
        let element = (limb >> (i * ELEMENT_BITS)) & &mask;
        let value = element.iter_u32_digits().next().unwrap_or(0);
        *slot = BabyBear::from_u32(value);
    }
    Ok(digest)
}

/// Hashes a sequence of integer limbs with [`hash_array`].
pub fn hash_limbs<C: PseudoCompressionFunction<Digest, 2>>(
    compression: &C,
    limbs: &[BigUint],
) -> Result<Digest, WitnessError> {
    let digests = limbs
        .iter()
        .map(limb_to_digest)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(hash_array(compression, &digests))
}

/// Canonical decimal rendering of each element.
pub fn digest_to_strings(digest: &Digest) -> Vec<String> {
    digest
        .iter()
        .map(|element| element.as_canonical_u32().to_string())
        .collect()
}
