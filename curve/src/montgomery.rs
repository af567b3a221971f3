//! Curve25519 in Montgomery form: B*v^2 = u^3 + A*u^2 + u, A = 486662, B = 1.

use std::sync::OnceLock;

use serde::Serialize;

use crate::basefield::FieldElement;
use crate::edwards::EdwardsPoint;
use crate::errors::CurveError;
use crate::weierstrass::WeierstrassPoint;
use crate::CurveModel;

/// The Montgomery coefficient A.
pub const MONTGOMERY_A: u64 = 486662;

/// The Montgomery coefficient B.
pub const MONTGOMERY_B: u64 = 1;

// -sqrt(-486664), taking the smaller root of -486664 before negation.
const EDWARDS_SCALE: [u64; 4] = [
    0x3391fb5500ba81e7,
    0x3a5e2c2eb482e57d,
    0x2d84f723fc03b081,
    0x70d9120b9f5ff944,
];

pub(crate) fn montgomery_a() -> &'static FieldElement {
    static A: OnceLock<FieldElement> = OnceLock::new();
    A.get_or_init(|| FieldElement::from_u64(MONTGOMERY_A))
}

/// The factor `-sqrt(-(A + 2))` applied to `u/x` when mapping from Edwards.
pub fn edwards_scale() -> &'static FieldElement {
    static C: OnceLock<FieldElement> = OnceLock::new();
    C.get_or_init(|| FieldElement::from_u64_limbs(EDWARDS_SCALE))
}

/// Affine point on the Montgomery curve.
///
/// The point at infinity has no affine representation here; it only exists
/// on the Weierstrass side.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct MontgomeryPoint {
    u: FieldElement,
    v: FieldElement,
}

impl MontgomeryPoint {
    pub fn new(u: FieldElement, v: FieldElement) -> Result<Self, CurveError> {
        let point = MontgomeryPoint { u, v };
        if point.is_on_curve() {
            Ok(point)
        } else {
            Err(CurveError::NotOnCurve(CurveModel::Montgomery))
        }
    }

    pub fn u(&self) -> &FieldElement {
        &self.u
    }

    pub fn v(&self) -> &FieldElement {
        &self.v
    }

    /// Check `B*v^2 = u^3 + A*u^2 + u`.
    pub fn is_on_curve(&self) -> bool {
        let u2 = self.u.square();
        let lhs = FieldElement::from_u64(MONTGOMERY_B) * self.v.square();
        let rhs = &u2 * &self.u + montgomery_a() * &u2 + &self.u;
        lhs == rhs
    }

    /// Birational map from twisted Edwards:
    /// `u = (1 + y) / (1 - y)`, `v = u / x * (-sqrt(-486664))`.
    ///
    /// The Edwards identity maps to infinity and is rejected. The 2-torsion
    /// point (0, -1) maps to (0, 0).
    pub fn from_edwards(point: &EdwardsPoint) -> Result<Self, CurveError> {
        if point.is_identity() {
            return Err(CurveError::ExceptionalPoint(CurveModel::Montgomery));
        }
        let one = FieldElement::one();
        let x = point.x();
        let y = point.y();

        if x.is_zero() {
            // Only (0, -1) remains once the identity is excluded.
            return Ok(MontgomeryPoint {
                u: FieldElement::zero(),
                v: FieldElement::zero(),
            });
        }

        let u = (&one + y) * (&one - y).inverse()?;
        let v = &u * x.inverse()? * edwards_scale();
        Ok(MontgomeryPoint { u, v })
    }

    /// Shift to short Weierstrass form: `x' = u + A/3`, `y' = v`.
    pub fn to_weierstrass(&self) -> WeierstrassPoint {
        WeierstrassPoint::from_coordinates_unchecked(
            &self.u + WeierstrassPoint::x_shift(),
            self.v.clone(),
        )
    }
}
