//! Error types for field and curve arithmetic.

use thiserror::Error;

use crate::CurveModel;

/// Failures raised by field arithmetic, point decoding and model conversion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurveError {
    /// The element has no square root in GF(p).
    #[error("element has no square root modulo p")]
    NoSquareRoot,

    /// Inversion of an element congruent to zero.
    #[error("element is not invertible (zero modulo p)")]
    NotInvertible,

    /// A 32-byte string does not decode to a point of the curve.
    #[error("invalid point encoding: {0}")]
    InvalidPointEncoding(&'static str),

    /// Coordinates that do not satisfy the equation of the named model.
    #[error("coordinates do not satisfy the {0} curve equation")]
    NotOnCurve(CurveModel),

    /// An integer outside the canonical range `[0, modulus)`.
    #[error("value is not below the {0} modulus")]
    NotCanonical(&'static str),

    /// The point has no affine image in the target model.
    #[error("point has no affine image in the {0} model")]
    ExceptionalPoint(CurveModel),
}
