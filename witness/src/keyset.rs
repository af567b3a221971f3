//! Commitment to the public keys of a contributor set.
//!
//! Keys are taken in a fixed order (contributors sorted by identity, keys in
//! listed order), hashed into leaves and placed in a Merkle tree. Keys that
//! fail to parse are recorded and skipped so one bad entry does not sink the
//! batch.

use std::collections::BTreeMap;

use curve::{EdwardsPoint, WeierstrassPoint};
use num_bigint::BigUint;
use p3_symmetric::PseudoCompressionFunction;
use serde::{Deserialize, Serialize};
use sshsig::{KeyType, PublicKey};
use tracing::{debug, info, warn};

use crate::config::WitnessConfig;
use crate::errors::{MerkleError, WitnessError};
use crate::hash::{default_compression, hash_limbs, Digest, Poseidon2Compression};
use crate::limbs::split_to_chunks;
use crate::merkle::{MerkleProof, MerkleTree};

/// One key as listed for a contributor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributorKey {
    /// Authorized-keys style line.
    pub key: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub key_type: Option<KeyType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl ContributorKey {
    pub fn new(key: impl Into<String>) -> Self {
        ContributorKey {
            key: key.into(),
            key_type: None,
            id: None,
            title: None,
        }
    }

    /// The declared type, or the one detected from the key prefix.
    pub fn key_type(&self) -> KeyType {
        self.key_type.unwrap_or_else(|| KeyType::detect(&self.key))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contributor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contributions: Option<u64>,
    #[serde(default)]
    pub public_keys: Vec<ContributorKey>,
}

/// Contributors keyed by identity. Iteration order is sorted by identity.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributorSet {
    pub contributors: BTreeMap<String, Contributor>,
}

impl ContributorSet {
    pub fn from_json(json: &str) -> Result<Self, WitnessError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn insert(&mut self, identity: impl Into<String>, keys: Vec<ContributorKey>) {
        self.contributors
            .entry(identity.into())
            .or_default()
            .public_keys
            .extend(keys);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Contributor)> {
        self.contributors.iter()
    }
}

/// A key that made it into the tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CommittedKey {
    pub identity: String,
    /// Position in the contributor's key list.
    pub key_index: usize,
    /// Position among the tree leaves.
    pub leaf_index: usize,
    pub public_key: PublicKey,
    pub leaf: Digest,
}

/// A key that was dropped, with the reason.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SkippedKey {
    pub identity: String,
    pub index: usize,
    pub reason: String,
}

/// Leaf digest of a public key.
///
/// RSA keys hash the chunks of their modulus. Ed25519 keys hash the eight
/// 64-bit limbs of their Weierstrass image, `x` limbs then `y` limbs.
pub fn key_leaf<C: PseudoCompressionFunction<Digest, 2>>(
    compression: &C,
    key: &PublicKey,
    config: &WitnessConfig,
) -> Result<Digest, WitnessError> {
    let limbs = match key {
        PublicKey::Rsa { n, .. } => split_to_chunks(n, config.chunk_bits, config.num_chunks)?,
        PublicKey::Ed25519(bytes) => {
            let point = WeierstrassPoint::from_edwards(&EdwardsPoint::decompress(bytes)?)?;
            weierstrass_limbs(&point)?
                .into_iter()
                .flatten()
                .map(BigUint::from)
                .collect()
        }
    };
    hash_limbs(compression, &limbs)
}

/// `[x limbs, y limbs]` of a finite point.
pub(crate) fn weierstrass_limbs(point: &WeierstrassPoint) -> Result<[[u64; 4]; 2], WitnessError> {
    let (x, y) = point
        .coordinates()
        .ok_or(WitnessError::PointAtInfinity(curve::CurveModel::Weierstrass))?;
    Ok([x.to_u64_limbs(), y.to_u64_limbs()])
}

/// Merkle commitment over a contributor set.
#[derive(Clone, Debug)]
pub struct KeySetCommitment<C = Poseidon2Compression> {
    tree: MerkleTree<C>,
    keys: Vec<CommittedKey>,
    skipped: Vec<SkippedKey>,
    config: WitnessConfig,
}

impl KeySetCommitment<Poseidon2Compression> {
    /// Commits with the default Poseidon2 compression.
    pub fn new(contributors: &ContributorSet, config: &WitnessConfig) -> Result<Self, WitnessError> {
        Self::build(default_compression(), contributors, config)
    }
}

impl<C: PseudoCompressionFunction<Digest, 2>> KeySetCommitment<C> {
    pub fn build(
        compression: C,
        contributors: &ContributorSet,
        config: &WitnessConfig,
    ) -> Result<Self, WitnessError> {
        config.validate()?;

        let mut keys = Vec::new();
        let mut skipped = Vec::new();
        for (identity, contributor) in contributors.iter() {
            for (index, entry) in contributor.public_keys.iter().enumerate() {
                let declared = entry.key_type();
                if !config.accepts(declared) {
                    debug!(identity = %identity, index, key_type = ?declared, "key type not accepted");
                    continue;
                }

                let parsed = PublicKey::from_key_line(&entry.key)
                    .map_err(WitnessError::from)
                    .and_then(|public_key| {
                        if public_key.key_type() != declared {
                            return Err(WitnessError::KeyTypeNotAccepted(format!(
                                "declared {declared:?} but parsed {:?}",
                                public_key.key_type()
                            )));
                        }
                        let leaf = key_leaf(&compression, &public_key, config)?;
                        Ok((public_key, leaf))
                    });

                match parsed {
                    Ok((public_key, leaf)) => keys.push(CommittedKey {
                        identity: identity.clone(),
                        key_index: index,
                        leaf_index: keys.len(),
                        public_key,
                        leaf,
                    }),
                    Err(err) => {
                        warn!(identity = %identity, index, error = %err, "skipping key");
                        skipped.push(SkippedKey {
                            identity: identity.clone(),
                            index,
                            reason: err.to_string(),
                        });
                    }
                }
            }
        }

        let leaves: Vec<Digest> = keys.iter().map(|key| key.leaf).collect();
        let tree = MerkleTree::build(compression, &leaves, config.tree_depth)?;
        info!(
            committed = keys.len(),
            skipped = skipped.len(),
            "committed key set"
        );

        Ok(KeySetCommitment {
            tree,
            keys,
            skipped,
            config: config.clone(),
        })
    }

    pub fn tree(&self) -> &MerkleTree<C> {
        &self.tree
    }

    pub fn root(&self) -> &Digest {
        self.tree.root()
    }

    pub fn keys(&self) -> &[CommittedKey] {
        &self.keys
    }

    pub fn skipped(&self) -> &[SkippedKey] {
        &self.skipped
    }

    pub fn config(&self) -> &WitnessConfig {
        &self.config
    }

    pub fn leaf_for(&self, key: &PublicKey) -> Result<Digest, WitnessError> {
        key_leaf(self.tree.compression(), key, &self.config)
    }

    /// Proof for the first leaf matching `key`.
    pub fn membership(&self, key: &PublicKey) -> Result<(usize, MerkleProof), WitnessError> {
        let leaf = self.leaf_for(key)?;
        let found = self.tree.proof_for_value(&leaf)?;
        Ok(found)
    }

    /// Replaces the key at `leaf_index` and rehashes its path.
    pub fn replace(&mut self, leaf_index: usize, key: PublicKey) -> Result<(), WitnessError> {
        let leaf = self.leaf_for(&key)?;
        let entry = self
            .keys
            .get_mut(leaf_index)
            .ok_or(MerkleError::IndexOutOfRange {
                index: leaf_index,
                capacity: self.tree.capacity(),
            })?;
        self.tree.update(leaf_index, leaf)?;
        entry.public_key = key;
        entry.leaf = leaf;
        Ok(())
    }
}
