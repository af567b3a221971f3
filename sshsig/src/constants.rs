//! Wire-format constants for SSH detached signatures.

/// Literal that opens both the envelope and the signed wrapper.
pub const MAGIC: &[u8; 6] = b"SSHSIG";

/// The only envelope version in use.
pub const SIG_VERSION: u32 = 1;

pub const ARMOR_BEGIN: &str = "-----BEGIN SSH SIGNATURE-----";
pub const ARMOR_END: &str = "-----END SSH SIGNATURE-----";

/// Size of a compressed Ed25519 public key.
pub const ED25519_PUBLIC_KEY_SIZE: usize = 32;

/// Size of an Ed25519 signature: `R` followed by `S`.
pub const ED25519_SIGNATURE_SIZE: usize = 64;

pub const ED25519_ALGORITHM: &str = "ssh-ed25519";
pub const RSA_KEY_ALGORITHM: &str = "ssh-rsa";
pub const RSA_SHA2_256_ALGORITHM: &str = "rsa-sha2-256";
pub const RSA_SHA2_512_ALGORITHM: &str = "rsa-sha2-512";

/// DER `DigestInfo` header for SHA-256.
pub const SHA256_DIGEST_INFO: [u8; 19] = [
    0x30, 0x31, 0x30, 0x0d, 0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02, 0x01, 0x05,
    0x00, 0x04, 0x20,
];

/// DER `DigestInfo` header for SHA-512.
pub const SHA512_DIGEST_INFO: [u8; 19] = [
    0x30, 0x51, 0x30, 0x0d, 0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02, 0x03, 0x05,
    0x00, 0x04, 0x40,
];

/// Minimum PKCS#1 v1.5 padding string length.
pub(crate) const MIN_RSA_PADDING: usize = 8;

/// Modulus size in bytes of the 4096-bit keys used by deployed signers.
pub const DEFAULT_RSA_MODULUS_BYTES: usize = 512;
