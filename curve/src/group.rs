use core::ops::{Add, Neg};

use num_bigint::BigUint;

/// Low 256 bits of `value` as little-endian 64-bit limbs.
pub fn biguint_to_u64_limbs(value: &BigUint) -> [u64; 4] {
    let mut limbs = [0u64; 4];
    for (slot, digit) in limbs.iter_mut().zip(value.iter_u64_digits()) {
        *slot = digit;
    }
    limbs
}

/// The integer whose little-endian 64-bit limbs are `limbs`.
pub fn biguint_from_u64_limbs(limbs: &[u64; 4]) -> BigUint {
    let mut digits = Vec::with_capacity(8);
    for &limb in limbs {
        digits.push(limb as u32);
        digits.push((limb >> 32) as u32);
    }
    BigUint::new(digits)
}

/// Exposes the low 256 bits of a scalar as little-endian 64-bit limbs.
pub trait ScalarBits {
    fn to_u64_limbs(&self) -> [u64; 4];
}

impl ScalarBits for BigUint {
    /// Bits above 2^256 are ignored.
    fn to_u64_limbs(&self) -> [u64; 4] {
        biguint_to_u64_limbs(self)
    }
}

impl ScalarBits for u64 {
    fn to_u64_limbs(&self) -> [u64; 4] {
        [*self, 0, 0, 0]
    }
}

pub trait Group: Sized + Clone + PartialEq + Add<Output = Self> + Neg<Output = Self> {
    fn identity() -> Self;
    fn is_identity(&self) -> bool;
    fn generator() -> Self;
    fn double(&self) -> Self;
    fn negate(&self) -> Self;

    /// Binary double-and-add over the fixed 256-bit exponent, most significant
    /// bit first. Runs in time dependent on the scalar.
    fn scalar_mul<S: ScalarBits + ?Sized>(&self, scalar: &S) -> Self {
        let scalar_limbs = scalar.to_u64_limbs();
        let mut result = Self::identity();

        for &limb in scalar_limbs.iter().rev() {
            for shift in (0..64).rev() {
                result = result.double();
                if (limb >> shift) & 1 == 1 {
                    result = result + self.clone();
                }
            }
        }

        result
    }

    fn mul_u64(&self, n: u64) -> Self {
        if n == 0 {
            return Self::identity();
        }
        if n == 1 {
            return self.clone();
        }

        let mut result = Self::identity();
        let mut temp = self.clone();
        let mut bits = n;

        while bits > 0 {
            if bits & 1 == 1 {
                result = result + temp.clone();
            }
            temp = temp.double();
            bits >>= 1;
        }

        result
    }

    fn multi_scalar_mul<S: ScalarBits>(points: &[Self], scalars: &[S]) -> Self {
        assert_eq!(
            points.len(),
            scalars.len(),
            "Points and scalars must have same length"
        );

        let mut result = Self::identity();
        for (point, scalar) in points.iter().zip(scalars.iter()) {
            result = result + point.scalar_mul(scalar);
        }
        result
    }
}
