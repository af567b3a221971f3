use curve::{EdwardsPoint, Group, Scalar, WeierstrassPoint};
use serde::Serialize;
use sshsig::{SshSigFrame, VerifyContext};
use tracing::debug;

use crate::errors::WitnessError;

/// Signature values mapped onto the short Weierstrass model.
///
/// The external circuit proves `s·G = R + h·A` on Wei25519, where `G` is the
/// image of the Ed25519 base point.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Ed25519Witness {
    pub s: Scalar,
    pub h: Scalar,
    pub r: WeierstrassPoint,
    pub a: WeierstrassPoint,
    pub r_edwards: EdwardsPoint,
    pub a_edwards: EdwardsPoint,
}

impl Ed25519Witness {
    /// Decodes `R` and `A`, maps them across, and takes `S` as a canonical
    /// scalar. A non-canonical `S` is rejected with `InvalidSignature`.
    pub fn from_context(context: &VerifyContext) -> Result<Self, WitnessError> {
        let r_edwards = EdwardsPoint::decompress(context.r())?;
        let a_edwards = EdwardsPoint::decompress(context.public_key())?;
        let s = Scalar::from_canonical_bytes(context.s()).ok_or_else(|| {
            debug!("signature scalar is not below the group order");
            WitnessError::InvalidSignature
        })?;

        Ok(Ed25519Witness {
            s,
            h: context.challenge().clone(),
            r: WeierstrassPoint::from_edwards(&r_edwards)?,
            a: WeierstrassPoint::from_edwards(&a_edwards)?,
            r_edwards,
            a_edwards,
        })
    }

    pub fn from_frame(frame: &SshSigFrame, message: &[u8]) -> Result<Self, WitnessError> {
        let context = VerifyContext::new(frame, message)?;
        Self::from_context(&context)
    }

    /// `s·G == R + h·A` on the Weierstrass curve.
    pub fn check_equation(&self) -> bool {
        let lhs = WeierstrassPoint::generator().scalar_mul(&self.s);
        let rhs = &self.r + &self.a.scalar_mul(&self.h);
        lhs == rhs
    }

    /// The same equation on the Edwards curve.
    pub fn check_edwards_equation(&self) -> bool {
        let lhs = EdwardsPoint::basepoint().scalar_mul(&self.s);
        let rhs = &self.r_edwards + &self.a_edwards.scalar_mul(&self.h);
        lhs == rhs
    }
}
