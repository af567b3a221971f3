use rand::Rng;

use crate::{FieldElement, Scalar};

/// Helper trait for sampling random field elements.
pub trait RandomField: Sized {
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self;
}

// 512 uniform bits reduced once leave a negligible bias for 255-bit moduli.
fn wide_bytes<R: Rng + ?Sized>(rng: &mut R) -> [u8; 64] {
    let mut bytes = [0u8; 64];
    rng.fill(&mut bytes[..]);
    bytes
}

impl RandomField for FieldElement {
    #[inline]
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        FieldElement::from_bytes_le(&wide_bytes(rng))
    }
}

impl RandomField for Scalar {
    #[inline]
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Scalar::from_bytes_mod_order(&wide_bytes(rng))
    }
}
