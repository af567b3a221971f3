//! Signature verification.

use curve::{EdwardsPoint, Group, Scalar};
use tracing::debug;

use crate::context::VerifyContext;
use crate::errors::SshSigError;
use crate::frame::{Signature, SshSigFrame};
use crate::rsa::verify_rsa;

/// Verifies `frame` over `message`, dispatching on the signature algorithm.
///
/// Returns `Ok(false)` for a well-formed signature that does not match.
pub fn verify(frame: &SshSigFrame, message: &[u8]) -> Result<bool, SshSigError> {
    match frame.signature() {
        Signature::Ed25519 { .. } => verify_ed25519(frame, message),
        Signature::Rsa { .. } => verify_rsa(frame, message),
    }
}

/// Parses armored text and verifies it over `message`.
pub fn verify_armored(armored: &str, message: &[u8]) -> Result<bool, SshSigError> {
    let frame = SshSigFrame::parse_armored(armored)?;
    verify(&frame, message)
}

/// Checks `S·B == R + h·A` in affine Edwards coordinates.
pub fn verify_ed25519(frame: &SshSigFrame, message: &[u8]) -> Result<bool, SshSigError> {
    let context = VerifyContext::new(frame, message)?;
    Ok(check_context(&context))
}

pub(crate) fn check_context(context: &VerifyContext) -> bool {
    let Ok(r) = EdwardsPoint::decompress(context.r()) else {
        debug!("rejecting signature: R does not decode to a curve point");
        return false;
    };
    let Ok(a) = EdwardsPoint::decompress(context.public_key()) else {
        debug!("rejecting signature: public key does not decode to a curve point");
        return false;
    };
    let Some(s) = Scalar::from_canonical_bytes(context.s()) else {
        debug!("rejecting signature: S is not reduced modulo the group order");
        return false;
    };

    let lhs = EdwardsPoint::basepoint().scalar_mul(&s);
    let rhs = &r + &a.scalar_mul(context.challenge());
    if lhs != rhs {
        debug!("rejecting signature: S·B != R + h·A");
        return false;
    }
    true
}
