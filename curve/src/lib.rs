//! Curve25519 arithmetic in three models.
//!
//! Points on the twisted Edwards curve used by Ed25519 can be moved to the
//! Montgomery form and on to the short Weierstrass form, which is the model a
//! circuit works in. Field elements and scalars are backed by arbitrary
//! precision integers and reduced after every operation.

mod basefield;
mod convert;
mod edwards;
mod errors;
mod group;
mod montgomery;
mod random;
mod scalarfield;
mod weierstrass;

pub use basefield::{modulus, sqrt_m1, FieldElement, FIELD_BYTES};
pub use convert::{CurveModel, CurvePoint};
pub use edwards::{edwards_d, EdwardsPoint};
pub use errors::CurveError;
pub use group::{biguint_from_u64_limbs, biguint_to_u64_limbs, Group, ScalarBits};
pub use montgomery::{edwards_scale, MontgomeryPoint, MONTGOMERY_A, MONTGOMERY_B};
pub use random::RandomField;
pub use scalarfield::{group_order, Scalar, SCALAR_BYTES};
pub use weierstrass::WeierstrassPoint;
