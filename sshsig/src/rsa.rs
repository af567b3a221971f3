//! PKCS#1 v1.5 encoding and verification for RSA envelopes.

use num_bigint::BigUint;
use tracing::debug;

use crate::constants::MIN_RSA_PADDING;
use crate::context::signed_wrapper;
use crate::errors::SshSigError;
use crate::frame::{HashAlgorithm, PublicKey, Signature, SshSigFrame};

/// `0x00 0x01 FF..FF 0x00 ‖ DigestInfo ‖ hash(wrapper)`, `k` bytes long.
pub fn encoded_message(
    hash: HashAlgorithm,
    wrapper: &[u8],
    k: usize,
) -> Result<Vec<u8>, SshSigError> {
    let prefix = hash.digest_info_prefix();
    let digest = hash.digest(wrapper);
    let t_len = prefix.len() + digest.len();
    if k < t_len + 3 + MIN_RSA_PADDING {
        return Err(SshSigError::ModulusTooShort {
            needed: t_len + 3 + MIN_RSA_PADDING,
            actual: k,
        });
    }

    let mut em = Vec::with_capacity(k);
    em.extend_from_slice(&[0x00, 0x01]);
    em.resize(k - t_len - 1, 0xff);
    em.push(0x00);
    em.extend_from_slice(prefix);
    em.extend_from_slice(&digest);
    Ok(em)
}

/// The encoded message of an RSA frame over `message`, as an integer.
///
/// The wrapper hash follows the signature algorithm; the inner message hash
/// follows the envelope.
pub fn rsa_encoded_message(
    frame: &SshSigFrame,
    message: &[u8],
    k: usize,
) -> Result<BigUint, SshSigError> {
    let Signature::Rsa { algorithm, .. } = frame.signature() else {
        return Err(SshSigError::UnsupportedAlgorithm {
            field: "signature_algorithm",
            name: frame.signature_algorithm().to_string(),
        });
    };
    let declared = frame.hash_algorithm();
    let wrapper = signed_wrapper(frame.namespace(), declared, &declared.digest(message));
    let em = encoded_message(algorithm.wrapper_hash(declared), &wrapper, k)?;
    Ok(BigUint::from_bytes_be(&em))
}

/// Modulus length in bytes.
pub fn modulus_bytes(n: &BigUint) -> usize {
    n.bits().div_ceil(8) as usize
}

/// Accepts iff `sig^e mod n` equals the encoded message.
pub fn verify_rsa(frame: &SshSigFrame, message: &[u8]) -> Result<bool, SshSigError> {
    let (PublicKey::Rsa { e, n }, Signature::Rsa { value, .. }) =
        (frame.public_key(), frame.signature())
    else {
        return Err(SshSigError::UnsupportedAlgorithm {
            field: "signature_algorithm",
            name: frame.signature_algorithm().to_string(),
        });
    };

    let expected = rsa_encoded_message(frame, message, modulus_bytes(n))?;
    if value >= n {
        debug!("rejecting signature: RSA value is not below the modulus");
        return Ok(false);
    }
    if value.modpow(e, n) != expected {
        debug!("rejecting signature: sig^e mod n does not match the encoding");
        return Ok(false);
    }
    Ok(true)
}
