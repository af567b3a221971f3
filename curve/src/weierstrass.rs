// Wei25519: y^2 = x^3 + a*x + b over GF(2^255 - 19)
// a = (3 - A^2) / 3, b = (2*A^3 - 9*A) / 27, A = 486662
// a = 19298681539552699237261830834781317975544997444273427339909597334573241639236
// b = 55751746669818908907645289078257140818241103727901012315294400837956729358436
// Generator: image of the Ed25519 base point, x = 9 + A/3

use core::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::sync::OnceLock;

use serde::Serialize;

use crate::basefield::FieldElement;
use crate::edwards::EdwardsPoint;
use crate::errors::CurveError;
use crate::montgomery::{montgomery_a, MontgomeryPoint};
use crate::{CurveModel, Group};

const GENERATOR_X: [u64; 4] = [
    0xaaaaaaaaaaad245a,
    0xaaaaaaaaaaaaaaaa,
    0xaaaaaaaaaaaaaaaa,
    0x2aaaaaaaaaaaaaaa,
];
const GENERATOR_Y: [u64; 4] = [
    0x29e9c5a27eced3d9,
    0x923d4d7e6d7c61b2,
    0xe01edd2c7748d14c,
    0x20ae19a1b8a086b4,
];

/// Affine point on the short Weierstrass curve, or the point at infinity.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct WeierstrassPoint {
    x: FieldElement,
    y: FieldElement,
    is_infinity: bool,
}

impl WeierstrassPoint {
    /// The `a` coefficient.
    pub fn curve_a() -> &'static FieldElement {
        static A: OnceLock<FieldElement> = OnceLock::new();
        A.get_or_init(|| {
            let three = FieldElement::from_u64(3);
            (&three - montgomery_a().square()) * three.invert_unchecked()
        })
    }

    /// The `b` coefficient.
    pub fn curve_b() -> &'static FieldElement {
        static B: OnceLock<FieldElement> = OnceLock::new();
        B.get_or_init(|| {
            let a = montgomery_a();
            let a3 = a.square() * a;
            let numerator = a3.double() - FieldElement::from_u64(9) * a;
            numerator * FieldElement::from_u64(27).invert_unchecked()
        })
    }

    /// `A/3`, the shift between Montgomery `u` and Weierstrass `x`.
    pub fn x_shift() -> &'static FieldElement {
        static SHIFT: OnceLock<FieldElement> = OnceLock::new();
        SHIFT.get_or_init(|| montgomery_a() * FieldElement::from_u64(3).invert_unchecked())
    }

    /// The point at infinity (identity element)
    pub fn infinity() -> Self {
        WeierstrassPoint {
            x: FieldElement::zero(),
            y: FieldElement::zero(),
            is_infinity: true,
        }
    }

    /// Creates a finite point, checking the curve equation.
    pub fn new(x: FieldElement, y: FieldElement) -> Result<Self, CurveError> {
        let point = Self::from_coordinates_unchecked(x, y);
        if point.is_on_curve() {
            Ok(point)
        } else {
            Err(CurveError::NotOnCurve(CurveModel::Weierstrass))
        }
    }

    pub(crate) fn from_coordinates_unchecked(x: FieldElement, y: FieldElement) -> Self {
        WeierstrassPoint {
            x,
            y,
            is_infinity: false,
        }
    }

    /// `None` for the point at infinity.
    pub fn coordinates(&self) -> Option<(&FieldElement, &FieldElement)> {
        (!self.is_infinity).then_some((&self.x, &self.y))
    }

    #[inline]
    pub fn is_infinity(&self) -> bool {
        self.is_infinity
    }

    /// Check if a point is on the curve: y^2 = x^3 + a*x + b.
    pub fn is_on_curve(&self) -> bool {
        if self.is_infinity {
            return true;
        }

        let y2 = self.y.square();
        let x3 = self.x.square() * &self.x;
        let rhs = x3 + Self::curve_a() * &self.x + Self::curve_b();

        y2 == rhs
    }

    /// Image of the Ed25519 base point.
    pub fn generator() -> Self {
        Self::from_coordinates_unchecked(
            FieldElement::from_u64_limbs(GENERATOR_X),
            FieldElement::from_u64_limbs(GENERATOR_Y),
        )
    }

    /// Edwards to Weierstrass through the Montgomery form. The Edwards
    /// identity lands on the point at infinity.
    pub fn from_edwards(point: &EdwardsPoint) -> Result<Self, CurveError> {
        if point.is_identity() {
            return Ok(Self::infinity());
        }
        Ok(MontgomeryPoint::from_edwards(point)?.to_weierstrass())
    }

    /// Point doubling: 2*P.
    pub fn double(&self) -> Self {
        if self.is_infinity {
            return self.clone();
        }

        if self.y.is_zero() {
            return Self::infinity();
        }

        // λ = (3x^2 + a) / (2y)
        let x2 = self.x.square();
        let numerator = &x2 + &x2 + &x2 + Self::curve_a();
        let lambda = numerator * self.y.double().invert_unchecked();

        // x_r = λ^2 - 2x
        let x_r = lambda.square() - self.x.double();

        // y_r = λ(x - x_r) - y
        let y_r = &lambda * (&self.x - &x_r) - &self.y;

        Self::from_coordinates_unchecked(x_r, y_r)
    }

    pub fn negate(&self) -> Self {
        if self.is_infinity {
            return self.clone();
        }
        Self::from_coordinates_unchecked(self.x.clone(), -&self.y)
    }
}

impl Group for WeierstrassPoint {
    #[inline]
    fn identity() -> Self {
        Self::infinity()
    }

    #[inline]
    fn is_identity(&self) -> bool {
        self.is_infinity
    }

    #[inline]
    fn generator() -> Self {
        WeierstrassPoint::generator()
    }

    #[inline]
    fn double(&self) -> Self {
        Self::double(self)
    }

    #[inline]
    fn negate(&self) -> Self {
        Self::negate(self)
    }
}

impl<'a> Add<&'a WeierstrassPoint> for &WeierstrassPoint {
    type Output = WeierstrassPoint;

    fn add(self, other: &'a WeierstrassPoint) -> WeierstrassPoint {
        if self.is_infinity {
            return other.clone();
        }
        if other.is_infinity {
            return self.clone();
        }

        if self.x == other.x {
            if self.y == other.y {
                return self.double();
            }
            return WeierstrassPoint::infinity();
        }

        // λ = (y2 - y1) / (x2 - x1)
        let lambda = (&other.y - &self.y) * (&other.x - &self.x).invert_unchecked();

        // x_r = λ^2 - x1 - x2
        let x_r = lambda.square() - &self.x - &other.x;

        // y_r = λ(x1 - x_r) - y1
        let y_r = &lambda * (&self.x - &x_r) - &self.y;

        WeierstrassPoint::from_coordinates_unchecked(x_r, y_r)
    }
}

impl Add for WeierstrassPoint {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        &self + &other
    }
}

impl AddAssign for WeierstrassPoint {
    fn add_assign(&mut self, other: Self) {
        *self = &*self + &other;
    }
}

#[allow(clippy::suspicious_arithmetic_impl)]
impl Sub for WeierstrassPoint {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        &self + &other.negate()
    }
}

impl SubAssign for WeierstrassPoint {
    fn sub_assign(&mut self, other: Self) {
        *self = &*self + &other.negate();
    }
}

impl Neg for WeierstrassPoint {
    type Output = Self;

    fn neg(self) -> Self {
        self.negate()
    }
}
