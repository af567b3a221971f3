//! Splitting big integers into circuit limbs.

use curve::biguint_to_u64_limbs;
use num_bigint::BigUint;

use crate::constants::U64_LIMBS;
use crate::errors::WitnessError;

/// Little-endian limbs of `chunk_bits` bits each, exactly `num_chunks` long.
///
/// Fails if `value` needs more than `chunk_bits * num_chunks` bits, or if
/// that product does not fit in a `usize`.
pub fn split_to_chunks(
    value: &BigUint,
    chunk_bits: usize,
    num_chunks: usize,
) -> Result<Vec<BigUint>, WitnessError> {
    let capacity = chunk_bits.checked_mul(num_chunks).ok_or_else(|| {
        WitnessError::InvalidConfig(format!(
            "{num_chunks} chunks of {chunk_bits} bits overflow the limb capacity"
        ))
    })? as u64;
    if value.bits() > capacity {
        return Err(WitnessError::ValueTooWide {
            bits: value.bits(),
            capacity,
        });
    }
    let mask = (BigUint::from(1u32) << chunk_bits) - 1u32;
    Ok((0..num_chunks)
        .map(|i| (value >> (i * chunk_bits)) & &mask)
        .collect())
}

/// Four little-endian 64-bit limbs of a value below 2^256.
pub fn split_u64_limbs(value: &BigUint) -> Result<[u64; U64_LIMBS], WitnessError> {
    if value.bits() > 256 {
        return Err(WitnessError::ValueTooWide {
            bits: value.bits(),
            capacity: 256,
        });
    }
    Ok(biguint_to_u64_limbs(value))
}

/// Reassembles limbs produced by [`split_to_chunks`].
pub fn join_chunks(chunks: &[BigUint], chunk_bits: usize) -> BigUint {
    chunks
        .iter()
        .rev()
        .fold(BigUint::default(), |acc, chunk| (acc << chunk_bits) + chunk)
}

pub(crate) fn to_decimal_strings<T: ToString>(values: &[T]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}
