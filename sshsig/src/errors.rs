//! Error types for envelope parsing and verification.

use curve::CurveError;
use thiserror::Error;

/// Structural defects in the binary envelope. Parsing stops at the first one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    #[error("{field} is truncated: needed {needed} bytes, {remaining} remaining")]
    Truncated {
        field: &'static str,
        needed: usize,
        remaining: usize,
    },

    #[error("missing SSHSIG magic")]
    BadMagic,

    #[error("unsupported envelope version {0}")]
    UnsupportedVersion(u32),

    #[error("{0} bytes left after the signature field")]
    TrailingBytes(usize),

    #[error("reserved field is not empty")]
    ReservedNotEmpty,

    #[error("{field} is not valid UTF-8")]
    InvalidUtf8 { field: &'static str },
}

/// Errors that can occur while parsing or verifying an SSH signature.
///
/// A signature that parses but does not match is not an error: verification
/// reports it as `Ok(false)`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SshSigError {
    #[error("malformed frame: {0}")]
    Malformed(#[from] FrameError),

    #[error("unsupported {field}: {name}")]
    UnsupportedAlgorithm { field: &'static str, name: String },

    #[error("signature payload is {actual} bytes, expected {expected}")]
    BadSignatureLength { expected: usize, actual: usize },

    #[error("public key is {actual} bytes, expected {expected}")]
    BadPublicKeyLength { expected: usize, actual: usize },

    #[error("{signature} signature does not match a {key} key")]
    AlgorithmMismatch { key: String, signature: String },

    #[error("RSA modulus of {actual} bytes cannot hold a {needed}-byte encoding")]
    ModulusTooShort { needed: usize, actual: usize },

    #[error("invalid key line: {0}")]
    InvalidKeyLine(&'static str),

    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error(transparent)]
    Curve(#[from] CurveError),
}
