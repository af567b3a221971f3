//! Parsing and verification of SSH detached signatures (`SSHSIG`).
//!
//! An armored signature is decoded into an [`SshSigFrame`]; the frame plus
//! the original message yield a [`VerifyContext`] holding `R`, `S`, the signed
//! wrapper and the challenge `h`. Ed25519 envelopes are verified natively over
//! edwards25519 with `S·B = R + h·A`; RSA envelopes are checked against their
//! PKCS#1 v1.5 encoding.
//!
//! # Example
//!
//! ```no_run
//! let armored = std::fs::read_to_string("message.sig").expect("read");
//! let valid = sshsig::verify_armored(&armored, b"Hello, World\n").expect("well-formed");
//! assert!(valid);
//! ```
//!
//! Arithmetic is variable-time. That is fine for public signatures and not
//! suitable for anything handling secrets.

mod constants;
mod context;
mod errors;
mod frame;
mod reader;
mod rsa;
mod verify;


pub use constants::{
    DEFAULT_RSA_MODULUS_BYTES, ED25519_ALGORITHM, ED25519_PUBLIC_KEY_SIZE, ED25519_SIGNATURE_SIZE,
    RSA_KEY_ALGORITHM, RSA_SHA2_256_ALGORITHM, RSA_SHA2_512_ALGORITHM,
};
pub use context::{VerifyContext, signed_wrapper};
pub use errors::{FrameError, SshSigError};
pub use frame::{
    HashAlgorithm, KeyType, PublicKey, RsaSignatureAlgorithm, Signature, SshSigFrame, decode_armor,
};
pub use rsa::{encoded_message, modulus_bytes, rsa_encoded_message, verify_rsa};
pub use verify::{verify, verify_armored, verify_ed25519};
