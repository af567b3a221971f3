// edwards25519: -x^2 + y^2 = 1 + d*x^2*y^2 over GF(2^255 - 19)
// d = -121665/121666
// Base point order ℓ = 2^252 + 27742317777372353535851937790883648493, cofactor 8

use core::ops::{Add, Neg, Sub};
use std::sync::OnceLock;

use serde::Serialize;

use crate::basefield::{FieldElement, FIELD_BYTES};
use crate::errors::CurveError;
use crate::{CurveModel, Group};

// Base point coordinates as little-endian 64-bit limbs
const BASE_X: [u64; 4] = [
    0xc9562d608f25d51a,
    0x692cc7609525a7b2,
    0xc0a4e231fdd6dc5c,
    0x216936d3cd6e53fe,
];
const BASE_Y: [u64; 4] = [
    0x6666666666666658,
    0x6666666666666666,
    0x6666666666666666,
    0x6666666666666666,
];

/// The curve constant d = -121665 * inverse(121666).
pub fn edwards_d() -> &'static FieldElement {
    static D: OnceLock<FieldElement> = OnceLock::new();
    D.get_or_init(|| {
        -FieldElement::from_u64(121665) * FieldElement::from_u64(121666).invert_unchecked()
    })
}

/// Affine point on the twisted Edwards curve.
///
/// Coordinates are private: every value of this type satisfies the curve
/// equation.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct EdwardsPoint {
    x: FieldElement,
    y: FieldElement,
}

impl EdwardsPoint {
    /// Creates a point, checking the curve equation.
    pub fn new(x: FieldElement, y: FieldElement) -> Result<Self, CurveError> {
        let point = EdwardsPoint { x, y };
        if point.is_on_curve() {
            Ok(point)
        } else {
            Err(CurveError::NotOnCurve(CurveModel::Edwards))
        }
    }

    /// Coordinates produced by the group law on valid inputs.
    pub(crate) fn from_coordinates_unchecked(x: FieldElement, y: FieldElement) -> Self {
        EdwardsPoint { x, y }
    }

    pub fn x(&self) -> &FieldElement {
        &self.x
    }

    pub fn y(&self) -> &FieldElement {
        &self.y
    }

    /// The neutral element (0, 1).
    pub fn identity() -> Self {
        EdwardsPoint {
            x: FieldElement::zero(),
            y: FieldElement::one(),
        }
    }

    pub fn is_identity(&self) -> bool {
        self.x.is_zero() && self.y == FieldElement::one()
    }

    /// The standard base point B (y = 4/5, x even).
    pub fn basepoint() -> Self {
        EdwardsPoint {
            x: FieldElement::from_u64_limbs(BASE_X),
            y: FieldElement::from_u64_limbs(BASE_Y),
        }
    }

    /// Check `-x^2 + y^2 = 1 + d*x^2*y^2`.
    pub fn is_on_curve(&self) -> bool {
        let x2 = self.x.square();
        let y2 = self.y.square();
        let lhs = &y2 - &x2;
        let rhs = FieldElement::one() + edwards_d() * &x2 * &y2;
        lhs == rhs
    }

    /// Decode a 32-byte compressed point.
    ///
    /// The low 255 bits carry `y`, bit 255 carries the parity of `x`. The
    /// recovered point is checked against the curve equation before it is
    /// returned.
    pub fn decompress(bytes: &[u8; FIELD_BYTES]) -> Result<Self, CurveError> {
        let sign = (bytes[31] >> 7) == 1;
        let mut y_bytes = *bytes;
        y_bytes[31] &= 0x7f;
        let y = FieldElement::from_canonical_bytes(&y_bytes)
            .ok_or(CurveError::InvalidPointEncoding("y coordinate is not reduced"))?;

        let y2 = y.square();
        let numerator = &y2 - FieldElement::one();
        // d is a non-square, so d*y^2 + 1 never vanishes
        let denominator = edwards_d() * &y2 + FieldElement::one();
        let x2 = numerator * denominator.invert_unchecked();

        let mut x = x2
            .sqrt_candidate()
            .map_err(|_| CurveError::InvalidPointEncoding("x^2 is not a square"))?;

        if x.is_zero() && sign {
            return Err(CurveError::InvalidPointEncoding(
                "sign bit set for x = 0",
            ));
        }
        if x.is_odd() != sign {
            x = -x;
        }

        let point = EdwardsPoint { x, y };
        if !point.is_on_curve() {
            return Err(CurveError::InvalidPointEncoding("decoded point is off the curve"));
        }
        Ok(point)
    }

    /// Encode as `y` little-endian with the parity of `x` in bit 255.
    pub fn compress(&self) -> [u8; FIELD_BYTES] {
        let mut bytes = self.y.to_bytes_le();
        if self.x.is_odd() {
            bytes[31] |= 0x80;
        }
        bytes
    }

    pub fn negate(&self) -> Self {
        EdwardsPoint {
            x: -&self.x,
            y: self.y.clone(),
        }
    }

    /// Doubling through the unified addition law.
    pub fn double(&self) -> Self {
        self + self
    }
}

impl Group for EdwardsPoint {
    #[inline]
    fn identity() -> Self {
        EdwardsPoint::identity()
    }

    #[inline]
    fn is_identity(&self) -> bool {
        EdwardsPoint::is_identity(self)
    }

    #[inline]
    fn generator() -> Self {
        EdwardsPoint::basepoint()
    }

    #[inline]
    fn double(&self) -> Self {
        EdwardsPoint::double(self)
    }

    #[inline]
    fn negate(&self) -> Self {
        EdwardsPoint::negate(self)
    }
}

impl<'a> Add<&'a EdwardsPoint> for &EdwardsPoint {
    type Output = EdwardsPoint;

    // x3 = (x1*y2 + x2*y1) / (1 + d*x1*x2*y1*y2)
    // y3 = (y1*y2 + x1*x2) / (1 - d*x1*x2*y1*y2)
    fn add(self, other: &'a EdwardsPoint) -> EdwardsPoint {
        let x1x2 = &self.x * &other.x;
        let y1y2 = &self.y * &other.y;
        let t = edwards_d() * &x1x2 * &y1y2;

        let x_num = &self.x * &other.y + &other.x * &self.y;
        let y_num = &y1y2 + &x1x2;
        // The law is complete on this curve: both denominators are nonzero
        // for any pair of curve points.
        let x_den = FieldElement::one() + &t;
        let y_den = FieldElement::one() - &t;

        EdwardsPoint::from_coordinates_unchecked(
            x_num * x_den.invert_unchecked(),
            y_num * y_den.invert_unchecked(),
        )
    }
}

impl Add for EdwardsPoint {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        &self + &other
    }
}

#[allow(clippy::suspicious_arithmetic_impl)]
impl Sub for EdwardsPoint {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        &self + &other.negate()
    }
}

impl Neg for EdwardsPoint {
    type Output = Self;

    fn neg(self) -> Self {
        self.negate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{group_order, Scalar};

    const BASE_ENCODING: [u8; 32] = [
        0x58, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66,
        0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66,
        0x66, 0x66,
    ];

    #[test]
    fn test_d_matches_definition() {
        let d = edwards_d();
        assert_eq!(
            d * FieldElement::from_u64(121666),
            -FieldElement::from_u64(121665)
        );
    }

    #[test]
    fn test_basepoint_on_curve() {
        let b = EdwardsPoint::basepoint();
        assert!(b.is_on_curve());
        assert!(!b.is_identity());
        assert!(!b.x().is_odd());
    }

    #[test]
    fn test_identity_on_curve() {
        assert!(EdwardsPoint::identity().is_on_curve());
    }

    #[test]
    fn test_new_rejects_off_curve() {
        let err = EdwardsPoint::new(FieldElement::from_u64(1), FieldElement::from_u64(1));
        assert_eq!(err, Err(CurveError::NotOnCurve(CurveModel::Edwards)));
    }

    #[test]
    fn test_basepoint_decompress() {
        let b = EdwardsPoint::decompress(&BASE_ENCODING).expect("valid encoding");
        assert_eq!(b, EdwardsPoint::basepoint());
        assert_eq!(b.compress(), BASE_ENCODING);
    }

    #[test]
    fn test_decompress_rejects_flipped_sign_of_zero_x() {
        // y = 1 gives x = 0; a set sign bit has no matching root.
        let mut encoding = [0u8; 32];
        encoding[0] = 1;
        assert_eq!(
            EdwardsPoint::decompress(&encoding).expect("identity"),
            EdwardsPoint::identity()
        );
        encoding[31] |= 0x80;
        assert!(matches!(
            EdwardsPoint::decompress(&encoding),
            Err(CurveError::InvalidPointEncoding(_))
        ));
    }

    #[test]
    fn test_decompress_rejects_non_square() {
        // y = 2 yields a non-residue x^2
        let mut rejected = 0;
        for y in 2u8..40 {
            let mut encoding = [0u8; 32];
            encoding[0] = y;
            match EdwardsPoint::decompress(&encoding) {
                Ok(point) => assert!(point.is_on_curve()),
                Err(CurveError::InvalidPointEncoding(_)) => rejected += 1,
                Err(other) => panic!("unexpected error {other:?}"),
            }
        }
        assert!(rejected > 0);
    }

    #[test]
    fn test_decompress_rejects_unreduced_y() {
        let encoding = [0xffu8; 32];
        assert!(matches!(
            EdwardsPoint::decompress(&encoding),
            Err(CurveError::InvalidPointEncoding(_))
        ));
    }

    #[test]
    fn test_addition_identity() {
        let b = EdwardsPoint::basepoint();
        let id = EdwardsPoint::identity();
        assert_eq!(&b + &id, b);
        assert_eq!(&id + &b, b);
    }

    #[test]
    fn test_doubling_matches_addition() {
        let b = EdwardsPoint::basepoint();
        let b2 = b.double();
        assert!(b2.is_on_curve());
        assert_eq!(b2, &b + &b);
    }

    #[test]
    fn test_negation() {
        let b = EdwardsPoint::basepoint();
        assert!(b.negate().is_on_curve());
        assert_eq!(&b + &b.negate(), EdwardsPoint::identity());
    }

    #[test]
    fn test_scalar_mul_zero_one() {
        let b = EdwardsPoint::basepoint();
        assert_eq!(b.scalar_mul(&Scalar::zero()), EdwardsPoint::identity());
        assert_eq!(b.scalar_mul(&Scalar::one()), b);
    }

    #[test]
    fn test_scalar_mul_small() {
        let b = EdwardsPoint::basepoint();
        let five = b.scalar_mul(&Scalar::from_u64(5));
        let expected = b.clone() + b.clone() + b.clone() + b.clone() + b.clone();
        assert_eq!(five, expected);
        assert_eq!(five, b.mul_u64(5));
    }

    #[test]
    fn test_scalar_mul_by_order_is_identity() {
        let b = EdwardsPoint::basepoint();
        assert_eq!(b.scalar_mul(group_order()), EdwardsPoint::identity());
    }

    #[test]
    fn test_scalar_mul_distributes() {
        let b = EdwardsPoint::basepoint();
        let a = Scalar::from_u64(3);
        let c = Scalar::from_u64(11);
        let left = b.scalar_mul(&(&a + &c));
        let right = b.scalar_mul(&a) + b.scalar_mul(&c);
        assert_eq!(left, right);
    }

    #[test]
    fn test_multi_scalar_mul() {
        let b = EdwardsPoint::basepoint();
        let points = [b.clone(), b.mul_u64(2), b.mul_u64(3)];
        let scalars = [Scalar::from_u64(4), Scalar::from_u64(5), Scalar::from_u64(6)];
        // 4 + 10 + 18
        assert_eq!(EdwardsPoint::multi_scalar_mul(&points, &scalars), b.mul_u64(32));
    }

    #[test]
    fn test_compress_roundtrip() {
        let p = EdwardsPoint::basepoint().mul_u64(7);
        let decoded = EdwardsPoint::decompress(&p.compress()).expect("roundtrip");
        assert_eq!(decoded, p);
    }
}
