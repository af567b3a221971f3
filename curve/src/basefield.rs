//! Prime field GF(p) with p = 2^255 - 19.
//!
//! Elements are stored as canonical `BigUint` representatives in `[0, p)`;
//! every operation reduces its result before returning. The arithmetic is
//! variable-time. That is acceptable for verifying public signatures and
//! unsuitable for any code path that handles secret scalars.

use core::fmt::{self, Debug, Display, Formatter};
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use std::sync::OnceLock;

use num_bigint::BigUint;
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};

use crate::errors::CurveError;
use crate::group::{biguint_from_u64_limbs, biguint_to_u64_limbs};

/// Size of a little-endian field element encoding.
pub const FIELD_BYTES: usize = 32;

/// The field modulus p = 2^255 - 19.
pub fn modulus() -> &'static BigUint {
    static P: OnceLock<BigUint> = OnceLock::new();
    P.get_or_init(|| (BigUint::one() << 255u32) - BigUint::from(19u32))
}

/// (p + 3) / 8, the candidate exponent for square roots when p ≡ 5 (mod 8).
fn sqrt_exponent() -> &'static BigUint {
    static E: OnceLock<BigUint> = OnceLock::new();
    E.get_or_init(|| (modulus() + 3u32) >> 3u32)
}

/// p - 2, the Fermat inversion exponent.
fn inverse_exponent() -> &'static BigUint {
    static E: OnceLock<BigUint> = OnceLock::new();
    E.get_or_init(|| modulus() - 2u32)
}

/// Element of GF(2^255 - 19) in canonical form.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "BigUint")]
pub struct FieldElement(BigUint);

impl TryFrom<BigUint> for FieldElement {
    type Error = CurveError;

    /// Accepts only canonical representatives.
    fn try_from(value: BigUint) -> Result<Self, Self::Error> {
        if &value < modulus() {
            Ok(FieldElement(value))
        } else {
            Err(CurveError::NotCanonical("field"))
        }
    }
}

impl FieldElement {
    /// The additive identity.
    pub fn zero() -> Self {
        FieldElement(BigUint::zero())
    }

    /// The multiplicative identity.
    pub fn one() -> Self {
        FieldElement(BigUint::one())
    }

    pub fn from_u64(value: u64) -> Self {
        Self::from_biguint(&BigUint::from(value))
    }

    /// Reduces an arbitrary integer into the field.
    pub fn from_biguint(value: &BigUint) -> Self {
        FieldElement(value % modulus())
    }

    /// Builds an element from four little-endian 64-bit limbs, reducing mod p.
    pub fn from_u64_limbs(limbs: [u64; 4]) -> Self {
        Self::from_biguint(&biguint_from_u64_limbs(&limbs))
    }

    /// Interprets little-endian bytes as an integer and reduces it mod p.
    pub fn from_bytes_le(bytes: &[u8]) -> Self {
        Self::from_biguint(&BigUint::from_bytes_le(bytes))
    }

    /// Like [`FieldElement::from_bytes_le`], but rejects values `>= p`.
    pub fn from_canonical_bytes(bytes: &[u8; FIELD_BYTES]) -> Option<Self> {
        let value = BigUint::from_bytes_le(bytes);
        (&value < modulus()).then_some(FieldElement(value))
    }

    /// Canonical 32-byte little-endian encoding.
    pub fn to_bytes_le(&self) -> [u8; FIELD_BYTES] {
        let mut out = [0u8; FIELD_BYTES];
        let bytes = self.0.to_bytes_le();
        out[..bytes.len()].copy_from_slice(&bytes);
        out
    }

    /// Canonical value as four little-endian 64-bit limbs.
    pub fn to_u64_limbs(&self) -> [u64; 4] {
        biguint_to_u64_limbs(&self.0)
    }

    pub fn as_biguint(&self) -> &BigUint {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Parity of the canonical representative.
    pub fn is_odd(&self) -> bool {
        self.0.bit(0)
    }

    pub fn square(&self) -> Self {
        self * self
    }

    pub fn double(&self) -> Self {
        self + self
    }

    /// `self^exp mod p`.
    pub fn pow(&self, exp: &BigUint) -> Self {
        FieldElement(self.0.modpow(exp, modulus()))
    }

    /// Multiplicative inverse `self^(p-2)`.
    pub fn inverse(&self) -> Result<Self, CurveError> {
        if self.is_zero() {
            return Err(CurveError::NotInvertible);
        }
        Ok(self.invert_unchecked())
    }

    /// Fermat inversion without the zero check. Maps zero to zero.
    pub(crate) fn invert_unchecked(&self) -> Self {
        self.pow(inverse_exponent())
    }

    /// Square root for p ≡ 5 (mod 8).
    ///
    /// Computes `r = n^((p+3)/8)`; if `r^2 != n` the candidate is multiplied by
    /// [`sqrt_m1`]. Of the two roots, the smaller canonical representative is
    /// returned.
    pub fn sqrt(&self) -> Result<Self, CurveError> {
        let root = self.sqrt_candidate()?;
        let negated = -&root;
        Ok(if root <= negated { root } else { negated })
    }

    /// Either root of `self`, without normalizing the sign.
    pub(crate) fn sqrt_candidate(&self) -> Result<Self, CurveError> {
        let candidate = self.pow(sqrt_exponent());
        if candidate.square() == *self {
            return Ok(candidate);
        }
        let adjusted = &candidate * sqrt_m1();
        if adjusted.square() == *self {
            Ok(adjusted)
        } else {
            Err(CurveError::NoSquareRoot)
        }
    }
}

/// The fourth root of unity `I = 2^((p-1)/4)`, a square root of -1.
pub fn sqrt_m1() -> &'static FieldElement {
    static I: OnceLock<FieldElement> = OnceLock::new();
    I.get_or_init(|| {
        let exp = (modulus() - 1u32) >> 2u32;
        FieldElement::from_u64(2).pow(&exp)
    })
}

impl Debug for FieldElement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "FieldElement({})", self.0)
    }
}

impl Display for FieldElement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl From<u64> for FieldElement {
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}

impl<'a> Add<&'a FieldElement> for &FieldElement {
    type Output = FieldElement;

    fn add(self, rhs: &'a FieldElement) -> FieldElement {
        FieldElement((&self.0 + &rhs.0) % modulus())
    }
}

impl<'a> Sub<&'a FieldElement> for &FieldElement {
    type Output = FieldElement;

    fn sub(self, rhs: &'a FieldElement) -> FieldElement {
        // Both operands are canonical, so adding p keeps the difference non-negative.
        FieldElement((modulus() + &self.0 - &rhs.0) % modulus())
    }
}

impl<'a> Mul<&'a FieldElement> for &FieldElement {
    type Output = FieldElement;

    fn mul(self, rhs: &'a FieldElement) -> FieldElement {
        FieldElement((&self.0 * &rhs.0) % modulus())
    }
}

impl Neg for &FieldElement {
    type Output = FieldElement;

    fn neg(self) -> FieldElement {
        if self.is_zero() {
            return FieldElement::zero();
        }
        FieldElement(modulus() - &self.0)
    }
}

impl Neg for FieldElement {
    type Output = FieldElement;

    fn neg(self) -> FieldElement {
        -&self
    }
}

macro_rules! forward_binop {
    ($imp:ident, $method:ident, $assign_imp:ident, $assign_method:ident) => {
        impl $imp<FieldElement> for FieldElement {
            type Output = FieldElement;

            #[inline]
            fn $method(self, rhs: FieldElement) -> FieldElement {
                (&self).$method(&rhs)
            }
        }

        impl<'a> $imp<&'a FieldElement> for FieldElement {
            type Output = FieldElement;

            #[inline]
            fn $method(self, rhs: &'a FieldElement) -> FieldElement {
                (&self).$method(rhs)
            }
        }

        impl $imp<FieldElement> for &FieldElement {
            type Output = FieldElement;

            #[inline]
            fn $method(self, rhs: FieldElement) -> FieldElement {
                self.$method(&rhs)
            }
        }

        impl $assign_imp<FieldElement> for FieldElement {
            #[inline]
            fn $assign_method(&mut self, rhs: FieldElement) {
                *self = (&*self).$method(&rhs);
            }
        }

        impl<'a> $assign_imp<&'a FieldElement> for FieldElement {
            #[inline]
            fn $assign_method(&mut self, rhs: &'a FieldElement) {
                *self = (&*self).$method(rhs);
            }
        }
    };
}

forward_binop!(Add, add, AddAssign, add_assign);
forward_binop!(Sub, sub, SubAssign, sub_assign);
forward_binop!(Mul, mul, MulAssign, mul_assign);
