//! Scalars modulo the prime order of the Ed25519 base point.
//!
//! ℓ = 2^252 + 27742317777372353535851937790883648493
//!
//! Scalars are model independent: the same value multiplies Edwards and
//! Weierstrass points through [`crate::Group::scalar_mul`].

use core::fmt::{self, Debug, Display, Formatter};
use core::ops::{Add, Mul, Neg, Sub};
use std::sync::OnceLock;

use num_bigint::BigUint;
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};

use crate::errors::CurveError;
use crate::group::{biguint_from_u64_limbs, ScalarBits};

/// Size of a little-endian scalar encoding.
pub const SCALAR_BYTES: usize = 32;

// ℓ as little-endian 64-bit limbs
const ORDER_LIMBS: [u64; 4] = [
    0x5812631a5cf5d3ed,
    0x14def9dea2f79cd6,
    0x0000000000000000,
    0x1000000000000000,
];

/// The group order ℓ.
pub fn group_order() -> &'static BigUint {
    static L: OnceLock<BigUint> = OnceLock::new();
    L.get_or_init(|| biguint_from_u64_limbs(&ORDER_LIMBS))
}

/// Integer reduced modulo ℓ.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "BigUint")]
pub struct Scalar(BigUint);

impl TryFrom<BigUint> for Scalar {
    type Error = CurveError;

    fn try_from(value: BigUint) -> Result<Self, Self::Error> {
        if &value < group_order() {
            Ok(Scalar(value))
        } else {
            Err(CurveError::NotCanonical("scalar"))
        }
    }
}

impl Scalar {
    pub fn zero() -> Self {
        Scalar(BigUint::zero())
    }

    pub fn one() -> Self {
        Scalar(BigUint::one())
    }

    pub fn from_u64(value: u64) -> Self {
        Self::from_biguint(&BigUint::from(value))
    }

    pub fn from_biguint(value: &BigUint) -> Self {
        Scalar(value % group_order())
    }

    /// Interprets any number of little-endian bytes as an integer and reduces
    /// it mod ℓ. Used for the 64-byte SHA-512 challenge.
    pub fn from_bytes_mod_order(bytes: &[u8]) -> Self {
        Self::from_biguint(&BigUint::from_bytes_le(bytes))
    }

    /// Decodes a 32-byte little-endian scalar, rejecting values `>= ℓ`.
    pub fn from_canonical_bytes(bytes: &[u8; SCALAR_BYTES]) -> Option<Self> {
        let value = BigUint::from_bytes_le(bytes);
        (&value < group_order()).then_some(Scalar(value))
    }

    pub fn to_bytes_le(&self) -> [u8; SCALAR_BYTES] {
        let mut out = [0u8; SCALAR_BYTES];
        let bytes = self.0.to_bytes_le();
        out[..bytes.len()].copy_from_slice(&bytes);
        out
    }

    pub fn as_biguint(&self) -> &BigUint {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl ScalarBits for Scalar {
    fn to_u64_limbs(&self) -> [u64; 4] {
        self.0.to_u64_limbs()
    }
}

impl Debug for Scalar {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Scalar({})", self.0)
    }
}

impl Display for Scalar {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl<'a> Add<&'a Scalar> for &Scalar {
    type Output = Scalar;

    fn add(self, rhs: &'a Scalar) -> Scalar {
        Scalar((&self.0 + &rhs.0) % group_order())
    }
}

impl<'a> Sub<&'a Scalar> for &Scalar {
    type Output = Scalar;

    fn sub(self, rhs: &'a Scalar) -> Scalar {
        Scalar((group_order() + &self.0 - &rhs.0) % group_order())
    }
}

impl<'a> Mul<&'a Scalar> for &Scalar {
    type Output = Scalar;

    fn mul(self, rhs: &'a Scalar) -> Scalar {
        Scalar((&self.0 * &rhs.0) % group_order())
    }
}

impl Add for Scalar {
    type Output = Scalar;

    fn add(self, rhs: Scalar) -> Scalar {
        &self + &rhs
    }
}

impl Sub for Scalar {
    type Output = Scalar;

    fn sub(self, rhs: Scalar) -> Scalar {
        &self - &rhs
    }
}

impl Mul for Scalar {
    type Output = Scalar;

    fn mul(self, rhs: Scalar) -> Scalar {
        &self * &rhs
    }
}

impl Neg for &Scalar {
    type Output = Scalar;

    fn neg(self) -> Scalar {
        &Scalar::zero() - self
    }
}

impl Neg for Scalar {
    type Output = Scalar;

    fn neg(self) -> Scalar {
        -&self
    }
}
