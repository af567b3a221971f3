//! Reconstruction of the signed data and the Ed25519 challenge.

use curve::Scalar;
use serde::Serialize;
use sha2::{Digest, Sha512};

use crate::constants::MAGIC;
use crate::errors::SshSigError;
use crate::frame::{HashAlgorithm, PublicKey, Signature, SshSigFrame};
use crate::reader::put_string;

/// `"SSHSIG" ‖ str(namespace) ‖ str("") ‖ str(hash name) ‖ str(digest)`.
///
/// This is the byte string the signer actually signs.
pub fn signed_wrapper(namespace: &[u8], hash: HashAlgorithm, digest: &[u8]) -> Vec<u8> {
    let mut wrapper = Vec::with_capacity(MAGIC.len() + 16 + namespace.len() + digest.len() + 6);
    wrapper.extend_from_slice(MAGIC);
    put_string(&mut wrapper, namespace);
    put_string(&mut wrapper, &[]);
    put_string(&mut wrapper, hash.name().as_bytes());
    put_string(&mut wrapper, digest);
    wrapper
}

/// Everything needed to check `S·B = R + h·A` for one message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VerifyContext {
    r: [u8; 32],
    s: [u8; 32],
    public_key: [u8; 32],
    digest: Vec<u8>,
    wrapper: Vec<u8>,
    challenge: Scalar,
}

impl VerifyContext {
    /// Fails with `UnsupportedAlgorithm` for a non-Ed25519 frame.
    pub fn new(frame: &SshSigFrame, message: &[u8]) -> Result<Self, SshSigError> {
        let (public_key, r, s) = match (frame.public_key(), frame.signature()) {
            (PublicKey::Ed25519(a), Signature::Ed25519 { r, s }) => (*a, *r, *s),
            _ => {
                return Err(SshSigError::UnsupportedAlgorithm {
                    field: "signature_algorithm",
                    name: frame.signature_algorithm().to_string(),
                });
            }
        };

        let hash = frame.hash_algorithm();
        let digest = hash.digest(message);
        let wrapper = signed_wrapper(frame.namespace(), hash, &digest);
        let challenge = challenge_scalar(&r, &public_key, &wrapper);

        Ok(VerifyContext::from_parts(r, s, public_key, digest, wrapper, challenge))
    }

    pub(crate) fn from_parts(
        r: [u8; 32],
        s: [u8; 32],
        public_key: [u8; 32],
        digest: Vec<u8>,
        wrapper: Vec<u8>,
        challenge: Scalar,
    ) -> Self {
        VerifyContext {
            r,
            s,
            public_key,
            digest,
            wrapper,
            challenge,
        }
    }

    /// Compressed commitment point `R`.
    pub fn r(&self) -> &[u8; 32] {
        &self.r
    }

    /// Little-endian response scalar `S`, as carried in the signature.
    pub fn s(&self) -> &[u8; 32] {
        &self.s
    }

    /// Compressed public key `A`.
    pub fn public_key(&self) -> &[u8; 32] {
        &self.public_key
    }

    pub fn digest(&self) -> &[u8] {
        &self.digest
    }

    pub fn wrapper(&self) -> &[u8] {
        &self.wrapper
    }

    /// `SHA-512(R ‖ A ‖ wrapper)` as a little-endian integer mod ℓ.
    pub fn challenge(&self) -> &Scalar {
        &self.challenge
    }
}

pub(crate) fn challenge_scalar(r: &[u8; 32], public_key: &[u8; 32], wrapper: &[u8]) -> Scalar {
    let digest = Sha512::new()
        .chain_update(r)
        .chain_update(public_key)
        .chain_update(wrapper)
        .finalize();
    Scalar::from_bytes_mod_order(&digest)
}
