//! Decoding of the armored envelope into typed fields.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256, Sha512};

use crate::constants::{
    ARMOR_BEGIN, ARMOR_END, ED25519_ALGORITHM, ED25519_PUBLIC_KEY_SIZE, ED25519_SIGNATURE_SIZE,
    MAGIC, RSA_KEY_ALGORITHM, RSA_SHA2_256_ALGORITHM, RSA_SHA2_512_ALGORITHM, SHA256_DIGEST_INFO,
    SHA512_DIGEST_INFO, SIG_VERSION,
};
use crate::errors::{FrameError, SshSigError};
use crate::reader::{SshReader, put_string};

/// Message hash declared in the envelope.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    Sha256,
    Sha512,
}

impl HashAlgorithm {
    pub fn from_name(name: &str) -> Result<Self, SshSigError> {
        match name {
            "sha256" => Ok(HashAlgorithm::Sha256),
            "sha512" => Ok(HashAlgorithm::Sha512),
            other => Err(SshSigError::UnsupportedAlgorithm {
                field: "hash_algorithm",
                name: other.to_string(),
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha512 => "sha512",
        }
    }

    pub fn digest(&self, data: &[u8]) -> Vec<u8> {
        match self {
            HashAlgorithm::Sha256 => Sha256::digest(data).to_vec(),
            HashAlgorithm::Sha512 => Sha512::digest(data).to_vec(),
        }
    }

    /// DER `DigestInfo` header used by PKCS#1 v1.5.
    pub fn digest_info_prefix(&self) -> &'static [u8] {
        match self {
            HashAlgorithm::Sha256 => &SHA256_DIGEST_INFO,
            HashAlgorithm::Sha512 => &SHA512_DIGEST_INFO,
        }
    }
}

/// RSA signature algorithm names.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RsaSignatureAlgorithm {
    #[serde(rename = "ssh-rsa")]
    SshRsa,
    #[serde(rename = "rsa-sha2-256")]
    RsaSha2_256,
    #[serde(rename = "rsa-sha2-512")]
    RsaSha2_512,
}

impl RsaSignatureAlgorithm {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            RSA_KEY_ALGORITHM => Some(RsaSignatureAlgorithm::SshRsa),
            RSA_SHA2_256_ALGORITHM => Some(RsaSignatureAlgorithm::RsaSha2_256),
            RSA_SHA2_512_ALGORITHM => Some(RsaSignatureAlgorithm::RsaSha2_512),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RsaSignatureAlgorithm::SshRsa => RSA_KEY_ALGORITHM,
            RsaSignatureAlgorithm::RsaSha2_256 => RSA_SHA2_256_ALGORITHM,
            RsaSignatureAlgorithm::RsaSha2_512 => RSA_SHA2_512_ALGORITHM,
        }
    }

    /// Hash applied to the signed wrapper. Plain `ssh-rsa` carries no hash of
    /// its own and falls back to the envelope's declared algorithm.
    pub fn wrapper_hash(&self, declared: HashAlgorithm) -> HashAlgorithm {
        match self {
            RsaSignatureAlgorithm::SshRsa => declared,
            RsaSignatureAlgorithm::RsaSha2_256 => HashAlgorithm::Sha256,
            RsaSignatureAlgorithm::RsaSha2_512 => HashAlgorithm::Sha512,
        }
    }
}

/// Public key decoded from an SSH key blob.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum PublicKey {
    /// Compressed Edwards point.
    Ed25519([u8; ED25519_PUBLIC_KEY_SIZE]),
    Rsa { e: BigUint, n: BigUint },
}

impl PublicKey {
    /// Parses `str(algorithm) ‖ payload`.
    pub fn from_blob(blob: &[u8]) -> Result<Self, SshSigError> {
        let mut reader = SshReader::new(blob);
        let algorithm = reader.read_utf8("public_key_algorithm")?;
        let key = match algorithm {
            ED25519_ALGORITHM => {
                let payload = reader.read_string("public_key_payload")?;
                let key = payload
                    .try_into()
                    .map_err(|_| SshSigError::BadPublicKeyLength {
                        expected: ED25519_PUBLIC_KEY_SIZE,
                        actual: payload.len(),
                    })?;
                PublicKey::Ed25519(key)
            }
            RSA_KEY_ALGORITHM => {
                let e = reader.read_string("rsa_exponent")?;
                let n = reader.read_string("rsa_modulus")?;
                PublicKey::Rsa {
                    e: BigUint::from_bytes_be(e),
                    n: BigUint::from_bytes_be(n),
                }
            }
            other => {
                return Err(SshSigError::UnsupportedAlgorithm {
                    field: "public_key_algorithm",
                    name: other.to_string(),
                });
            }
        };
        reader.finish()?;
        Ok(key)
    }

    /// Parses an authorized-keys style line: `algorithm base64 [comment]`.
    pub fn from_key_line(line: &str) -> Result<Self, SshSigError> {
        let mut parts = line.split_whitespace();
        let algorithm = parts
            .next()
            .ok_or(SshSigError::InvalidKeyLine("empty line"))?;
        let encoded = parts
            .next()
            .ok_or(SshSigError::InvalidKeyLine("missing key data"))?;
        let key = PublicKey::from_blob(&STANDARD.decode(encoded)?)?;
        if key.algorithm() != algorithm {
            return Err(SshSigError::InvalidKeyLine(
                "algorithm prefix does not match the key blob",
            ));
        }
        Ok(key)
    }

    /// Encodes the key as an SSH blob. RSA integers are written as `mpint`.
    pub fn to_blob(&self) -> Vec<u8> {
        let mut blob = Vec::new();
        put_string(&mut blob, self.algorithm().as_bytes());
        match self {
            PublicKey::Ed25519(key) => put_string(&mut blob, key),
            PublicKey::Rsa { e, n } => {
                put_mpint(&mut blob, e);
                put_mpint(&mut blob, n);
            }
        }
        blob
    }

    /// `algorithm base64`, followed by ` comment` when one is given.
    pub fn to_key_line(&self, comment: Option<&str>) -> String {
        let encoded = STANDARD.encode(self.to_blob());
        match comment {
            Some(comment) => format!("{} {encoded} {comment}", self.algorithm()),
            None => format!("{} {encoded}", self.algorithm()),
        }
    }

    pub fn algorithm(&self) -> &'static str {
        match self {
            PublicKey::Ed25519(_) => ED25519_ALGORITHM,
            PublicKey::Rsa { .. } => RSA_KEY_ALGORITHM,
        }
    }

    pub fn key_type(&self) -> KeyType {
        match self {
            PublicKey::Ed25519(_) => KeyType::Ed25519,
            PublicKey::Rsa { .. } => KeyType::Rsa,
        }
    }
}

/// Positive `mpint`: minimal big-endian bytes, with a zero byte in front
/// when the top bit is set.
fn put_mpint(out: &mut Vec<u8>, value: &BigUint) {
    if value.bits() == 0 {
        put_string(out, &[]);
        return;
    }
    let bytes = value.to_bytes_be();
    if bytes[0] & 0x80 != 0 {
        let mut padded = Vec::with_capacity(bytes.len() + 1);
        padded.push(0);
        padded.extend_from_slice(&bytes);
        put_string(out, &padded);
    } else {
        put_string(out, &bytes);
    }
}

/// Signature decoded from an SSH signature blob.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Signature {
    Ed25519 { r: [u8; 32], s: [u8; 32] },
    Rsa {
        algorithm: RsaSignatureAlgorithm,
        value: BigUint,
    },
}

impl Signature {
    /// Parses `str(algorithm) ‖ str(payload)`.
    pub fn from_blob(blob: &[u8]) -> Result<Self, SshSigError> {
        let mut reader = SshReader::new(blob);
        let algorithm = reader.read_utf8("signature_algorithm")?;
        let payload = reader.read_string("signature_payload")?;
        reader.finish()?;

        if algorithm == ED25519_ALGORITHM {
            if payload.len() != ED25519_SIGNATURE_SIZE {
                return Err(SshSigError::BadSignatureLength {
                    expected: ED25519_SIGNATURE_SIZE,
                    actual: payload.len(),
                });
            }
            let mut r = [0u8; 32];
            let mut s = [0u8; 32];
            r.copy_from_slice(&payload[..32]);
            s.copy_from_slice(&payload[32..]);
            return Ok(Signature::Ed25519 { r, s });
        }

        match RsaSignatureAlgorithm::from_name(algorithm) {
            Some(algorithm) => Ok(Signature::Rsa {
                algorithm,
                value: BigUint::from_bytes_be(payload),
            }),
            None => Err(SshSigError::UnsupportedAlgorithm {
                field: "signature_algorithm",
                name: algorithm.to_string(),
            }),
        }
    }

    pub fn algorithm(&self) -> &'static str {
        match self {
            Signature::Ed25519 { .. } => ED25519_ALGORITHM,
            Signature::Rsa { algorithm, .. } => algorithm.name(),
        }
    }
}

/// A parsed SSHSIG envelope.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SshSigFrame {
    version: u32,
    namespace: Vec<u8>,
    hash_algorithm: HashAlgorithm,
    public_key: PublicKey,
    signature: Signature,
}

impl SshSigFrame {
    /// Parses armored text, or a bare base64 body.
    pub fn parse_armored(text: &str) -> Result<Self, SshSigError> {
        Self::parse(&decode_armor(text)?)
    }

    /// Parses the binary envelope. Every byte must be consumed.
    pub fn parse(bytes: &[u8]) -> Result<Self, SshSigError> {
        let mut reader = SshReader::new(bytes);

        let magic = reader
            .read_bytes("magic", MAGIC.len())
            .map_err(|_| FrameError::BadMagic)?;
        if magic != MAGIC {
            return Err(FrameError::BadMagic.into());
        }
        let version = reader.read_u32("version")?;
        if version != SIG_VERSION {
            return Err(FrameError::UnsupportedVersion(version).into());
        }

        let public_key_blob = reader.read_string("public_key")?;
        let namespace = reader.read_string("namespace")?;
        let reserved = reader.read_string("reserved")?;
        let hash_name = reader.read_utf8("hash_algorithm")?;
        let signature_blob = reader.read_string("signature")?;
        reader.finish()?;

        if !reserved.is_empty() {
            return Err(FrameError::ReservedNotEmpty.into());
        }
        let hash_algorithm = HashAlgorithm::from_name(hash_name)?;
        let public_key = PublicKey::from_blob(public_key_blob)?;
        let signature = Signature::from_blob(signature_blob)?;

        match (&public_key, &signature) {
            (PublicKey::Ed25519(_), Signature::Ed25519 { .. })
            | (PublicKey::Rsa { .. }, Signature::Rsa { .. }) => {}
            _ => {
                return Err(SshSigError::AlgorithmMismatch {
                    key: public_key.algorithm().to_string(),
                    signature: signature.algorithm().to_string(),
                });
            }
        }

        Ok(SshSigFrame {
            version,
            namespace: namespace.to_vec(),
            hash_algorithm,
            public_key,
            signature,
        })
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn namespace(&self) -> &[u8] {
        &self.namespace
    }

    pub fn hash_algorithm(&self) -> HashAlgorithm {
        self.hash_algorithm
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    pub fn public_key_algorithm(&self) -> &'static str {
        self.public_key.algorithm()
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn signature_algorithm(&self) -> &'static str {
        self.signature.algorithm()
    }
}

/// Strips the armor delimiters and all whitespace, then base64-decodes.
pub fn decode_armor(text: &str) -> Result<Vec<u8>, SshSigError> {
    let body: String = text
        .lines()
        .map(str::trim)
        .filter(|line| *line != ARMOR_BEGIN && *line != ARMOR_END)
        .flat_map(|line| line.chars().filter(|c| !c.is_whitespace()))
        .collect();
    Ok(STANDARD.decode(body)?)
}

/// Key family, detected from the algorithm prefix of a key line.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum KeyType {
    Rsa,
    Ed25519,
    Ecdsa,
    Dsa,
    #[serde(other)]
    Unknown,
}

impl KeyType {
    pub fn detect(key_line: &str) -> Self {
        let line = key_line.trim_start();
        if line.starts_with(RSA_KEY_ALGORITHM) {
            KeyType::Rsa
        } else if line.starts_with(ED25519_ALGORITHM) {
            KeyType::Ed25519
        } else if line.starts_with("ecdsa-sha2-") {
            KeyType::Ecdsa
        } else if line.starts_with("ssh-dss") {
            KeyType::Dsa
        } else {
            KeyType::Unknown
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope(hash: &str, reserved: &[u8], key_blob: &[u8], sig_blob: &[u8]) -> Vec<u8> {
        let mut out = MAGIC.to_vec();
        out.extend_from_slice(&SIG_VERSION.to_be_bytes());
        put_string(&mut out, key_blob);
        put_string(&mut out, b"file");
        put_string(&mut out, reserved);
        put_string(&mut out, hash.as_bytes());
        put_string(&mut out, sig_blob);
        out
    }

    fn ed25519_blobs(sig_len: usize) -> (Vec<u8>, Vec<u8>) {
        let mut key = Vec::new();
        put_string(&mut key, ED25519_ALGORITHM.as_bytes());
        put_string(&mut key, &[7u8; 32]);
        let mut sig = Vec::new();
        put_string(&mut sig, ED25519_ALGORITHM.as_bytes());
        put_string(&mut sig, &vec![1u8; sig_len]);
        (key, sig)
    }

    #[test]
    fn test_parse_minimal_envelope() {
        let (key, sig) = ed25519_blobs(64);
        let frame = SshSigFrame::parse(&envelope("sha512", b"", &key, &sig)).expect("parse");
        assert_eq!(frame.version(), 1);
        assert_eq!(frame.namespace(), b"file");
        assert_eq!(frame.hash_algorithm(), HashAlgorithm::Sha512);
        assert_eq!(frame.public_key(), &PublicKey::Ed25519([7u8; 32]));
        assert_eq!(frame.signature_algorithm(), ED25519_ALGORITHM);
    }

    #[test]
    fn test_bad_magic() {
        let (key, sig) = ed25519_blobs(64);
        let mut bytes = envelope("sha512", b"", &key, &sig);
        bytes[0] = b'X';
        assert_eq!(SshSigFrame::parse(&bytes), Err(FrameError::BadMagic.into()));
        assert_eq!(SshSigFrame::parse(b"SSH"), Err(FrameError::BadMagic.into()));
    }

    #[test]
    fn test_unsupported_version() {
        let (key, sig) = ed25519_blobs(64);
        let mut bytes = envelope("sha512", b"", &key, &sig);
        bytes[9] = 2;
        assert_eq!(
            SshSigFrame::parse(&bytes),
            Err(FrameError::UnsupportedVersion(2).into())
        );
    }

    #[test]
    fn test_trailing_bytes() {
        let (key, sig) = ed25519_blobs(64);
        let mut bytes = envelope("sha512", b"", &key, &sig);
        bytes.push(0);
        assert_eq!(
            SshSigFrame::parse(&bytes),
            Err(FrameError::TrailingBytes(1).into())
        );
    }

    #[test]
    fn test_truncated_signature_field() {
        let (key, sig) = ed25519_blobs(64);
        let mut bytes = envelope("sha512", b"", &key, &sig);
        bytes.truncate(bytes.len() - 5);
        assert!(matches!(
            SshSigFrame::parse(&bytes),
            Err(SshSigError::Malformed(FrameError::Truncated {
                field: "signature",
                ..
            }))
        ));
    }

    #[test]
    fn test_reserved_must_be_empty() {
        let (key, sig) = ed25519_blobs(64);
        assert_eq!(
            SshSigFrame::parse(&envelope("sha512", b"x", &key, &sig)),
            Err(FrameError::ReservedNotEmpty.into())
        );
    }

    #[test]
    fn test_unsupported_hash() {
        let (key, sig) = ed25519_blobs(64);
        assert_eq!(
            SshSigFrame::parse(&envelope("md5", b"", &key, &sig)),
            Err(SshSigError::UnsupportedAlgorithm {
                field: "hash_algorithm",
                name: "md5".to_string(),
            })
        );
    }

    #[test]
    fn test_bad_signature_length() {
        let (key, sig) = ed25519_blobs(63);
        assert_eq!(
            SshSigFrame::parse(&envelope("sha256", b"", &key, &sig)),
            Err(SshSigError::BadSignatureLength {
                expected: 64,
                actual: 63,
            })
        );
    }

    #[test]
    fn test_unsupported_signature_algorithm() {
        let mut sig = Vec::new();
        put_string(&mut sig, b"ecdsa-sha2-nistp256");
        put_string(&mut sig, &[0u8; 64]);
        assert!(matches!(
            Signature::from_blob(&sig),
            Err(SshSigError::UnsupportedAlgorithm {
                field: "signature_algorithm",
                ..
            })
        ));
    }

    #[test]
    fn test_key_and_signature_families_must_match() {
        let (key, _) = ed25519_blobs(64);
        let mut sig = Vec::new();
        put_string(&mut sig, RSA_SHA2_512_ALGORITHM.as_bytes());
        put_string(&mut sig, &[1u8; 16]);
        assert!(matches!(
            SshSigFrame::parse(&envelope("sha512", b"", &key, &sig)),
            Err(SshSigError::AlgorithmMismatch { .. })
        ));
    }

    #[test]
    fn test_rsa_public_key_blob() {
        let mut blob = Vec::new();
        put_string(&mut blob, RSA_KEY_ALGORITHM.as_bytes());
        put_string(&mut blob, &[0x01, 0x00, 0x01]);
        put_string(&mut blob, &[0x00, 0xc7, 0xab]);
        assert_eq!(
            PublicKey::from_blob(&blob).expect("rsa"),
            PublicKey::Rsa {
                e: BigUint::from(65537u32),
                n: BigUint::from(0xc7abu32),
            }
        );
    }

    #[test]
    fn test_short_ed25519_key() {
        let mut blob = Vec::new();
        put_string(&mut blob, ED25519_ALGORITHM.as_bytes());
        put_string(&mut blob, &[0u8; 31]);
        assert_eq!(
            PublicKey::from_blob(&blob),
            Err(SshSigError::BadPublicKeyLength {
                expected: 32,
                actual: 31,
            })
        );
    }

    #[test]
    fn test_armor_variants() {
        let body = STANDARD.encode(b"SSHSIG");
        let armored = format!("  {ARMOR_BEGIN}\r\n  {body}\r\n{ARMOR_END}\r\n");
        assert_eq!(decode_armor(&armored).expect("armored"), b"SSHSIG");
        assert_eq!(decode_armor(&body).expect("bare"), b"SSHSIG");
        assert!(matches!(
            decode_armor("not*base64"),
            Err(SshSigError::Base64(_))
        ));
    }

    #[test]
    fn test_key_type_detection() {
        assert_eq!(KeyType::detect("ssh-rsa AAAA"), KeyType::Rsa);
        assert_eq!(KeyType::detect("ssh-ed25519 AAAA"), KeyType::Ed25519);
        assert_eq!(KeyType::detect("ecdsa-sha2-nistp256 AAAA"), KeyType::Ecdsa);
        assert_eq!(KeyType::detect("ssh-dss AAAA"), KeyType::Dsa);
        assert_eq!(KeyType::detect("sk-ssh-ed25519@openssh.com AAAA"), KeyType::Unknown);
    }

    #[test]
    fn test_key_line_prefix_must_match_blob() {
        let mut blob = Vec::new();
        put_string(&mut blob, ED25519_ALGORITHM.as_bytes());
        put_string(&mut blob, &[9u8; 32]);
        let encoded = STANDARD.encode(&blob);
        assert_eq!(
            PublicKey::from_key_line(&format!("ssh-ed25519 {encoded} me@host")),
            Ok(PublicKey::Ed25519([9u8; 32]))
        );
        assert!(matches!(
            PublicKey::from_key_line(&format!("ssh-rsa {encoded}")),
            Err(SshSigError::InvalidKeyLine(_))
        ));
        assert!(matches!(
            PublicKey::from_key_line("ssh-rsa"),
            Err(SshSigError::InvalidKeyLine(_))
        ));
    }

    #[test]
    fn test_to_key_line() {
        let key = PublicKey::Ed25519([9u8; 32]);
        let mut blob = Vec::new();
        put_string(&mut blob, ED25519_ALGORITHM.as_bytes());
        put_string(&mut blob, &[9u8; 32]);
        assert_eq!(key.to_blob(), blob);
        let encoded = STANDARD.encode(&blob);
        assert_eq!(key.to_key_line(None), format!("ssh-ed25519 {encoded}"));
        assert_eq!(key.to_key_line(Some("me@host")), format!("ssh-ed25519 {encoded} me@host"));
    }

    #[test]
    fn test_rsa_blob_uses_mpint() {
        let key = PublicKey::Rsa {
            e: BigUint::from(65537u32),
            n: BigUint::from(0x80ffu32),
        };
        let mut expected = Vec::new();
        put_string(&mut expected, RSA_KEY_ALGORITHM.as_bytes());
        put_string(&mut expected, &[0x01, 0x00, 0x01]);
        put_string(&mut expected, &[0x00, 0x80, 0xff]);
        assert_eq!(key.to_blob(), expected);
        assert_eq!(PublicKey::from_blob(&expected), Ok(key));
    }
}
