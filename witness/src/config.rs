//! Runtime settings for witness shaping.

use serde::{Deserialize, Serialize};
use sshsig::{KeyType, DEFAULT_RSA_MODULUS_BYTES};

use crate::constants::{DEFAULT_CHUNK_BITS, DEFAULT_NUM_CHUNKS, DEFAULT_TREE_DEPTH, MAX_TREE_DEPTH};
use crate::errors::WitnessError;
use crate::hash::MAX_LIMB_BITS;

/// Tree and limb layout expected by the external circuit.
///
/// Missing fields in a JSON document take their default values.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WitnessConfig {
    pub tree_depth: usize,
    pub chunk_bits: usize,
    pub num_chunks: usize,
    pub rsa_modulus_bytes: usize,
    pub accepted_key_types: Vec<KeyType>,
}

impl Default for WitnessConfig {
    fn default() -> Self {
        WitnessConfig {
            tree_depth: DEFAULT_TREE_DEPTH,
            chunk_bits: DEFAULT_CHUNK_BITS,
            num_chunks: DEFAULT_NUM_CHUNKS,
            rsa_modulus_bytes: DEFAULT_RSA_MODULUS_BYTES,
            accepted_key_types: vec![KeyType::Rsa, KeyType::Ed25519],
        }
    }
}

impl WitnessConfig {
    /// Parses and validates a JSON document.
    pub fn from_json(json: &str) -> Result<Self, WitnessError> {
        let config: WitnessConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), WitnessError> {
        if self.tree_depth == 0 || self.tree_depth > MAX_TREE_DEPTH {
            return Err(WitnessError::InvalidConfig(format!(
                "tree_depth must be in 1..={MAX_TREE_DEPTH}, got {}",
                self.tree_depth
            )));
        }
        if self.chunk_bits == 0 || self.chunk_bits > MAX_LIMB_BITS {
            return Err(WitnessError::InvalidConfig(format!(
                "chunk_bits must be in 1..={MAX_LIMB_BITS}, got {}",
                self.chunk_bits
            )));
        }
        if self.rsa_modulus_bytes == 0 {
            return Err(WitnessError::InvalidConfig(
                "rsa_modulus_bytes must be positive".to_string(),
            ));
        }
        let Some(limb_bits) = self.chunk_bits.checked_mul(self.num_chunks) else {
            return Err(WitnessError::InvalidConfig(format!(
                "{} chunks of {} bits overflow the limb capacity",
                self.num_chunks, self.chunk_bits
            )));
        };
        let Some(modulus_bits) = self.rsa_modulus_bytes.checked_mul(8) else {
            return Err(WitnessError::InvalidConfig(format!(
                "rsa_modulus_bytes {} is too large",
                self.rsa_modulus_bytes
            )));
        };
        if limb_bits < modulus_bits {
            return Err(WitnessError::InvalidConfig(format!(
                "{} chunks of {} bits cannot hold a {}-byte modulus",
                self.num_chunks, self.chunk_bits, self.rsa_modulus_bytes
            )));
        }
        if self.accepted_key_types.is_empty() {
            return Err(WitnessError::InvalidConfig(
                "accepted_key_types is empty".to_string(),
            ));
        }
        if let Some(unsupported) = self
            .accepted_key_types
            .iter()
            .find(|t| !matches!(t, KeyType::Rsa | KeyType::Ed25519))
        {
            return Err(WitnessError::InvalidConfig(format!(
                "key type {unsupported:?} cannot be committed"
            )));
        }
        Ok(())
    }

    pub fn accepts(&self, key_type: KeyType) -> bool {
        self.accepted_key_types.contains(&key_type)
    }
}
