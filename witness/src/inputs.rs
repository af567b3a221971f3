//! Circuit inputs rendered for the external prover.
//!
//! Every number is a decimal string. Proof siblings are digests rendered
//! element by element; directions are `"0"` (sibling on the right) or `"1"`.

use num_bigint::BigUint;
use p3_symmetric::PseudoCompressionFunction;
use serde::Serialize;
use sshsig::{modulus_bytes, rsa_encoded_message, verify_rsa, PublicKey, Signature, SshSigFrame};
use tracing::{debug, info};

use crate::ed25519_witness::Ed25519Witness;
use crate::errors::WitnessError;
use crate::hash::{digest_to_strings, Digest};
use crate::keyset::{weierstrass_limbs, KeySetCommitment};
use crate::limbs::{split_to_chunks, split_u64_limbs, to_decimal_strings};
use crate::merkle::MerkleProof;

fn proof_strings(proof: &MerkleProof) -> (Vec<Vec<String>>, Vec<String>) {
    let siblings = proof.siblings.iter().map(digest_to_strings).collect();
    let directions = proof
        .directions
        .iter()
        .map(|&left| if left { "1" } else { "0" }.to_string())
        .collect();
    (siblings, directions)
}

fn point_strings(limbs: [[u64; 4]; 2]) -> Vec<Vec<String>> {
    limbs.iter().map(|coordinate| to_decimal_strings(coordinate)).collect()
}

/// Inputs for the RSA membership circuit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RsaCircuitInputs {
    /// Chunks of the PKCS#1 v1.5 encoded message.
    pub message: Vec<String>,
    pub tree_proofs: Vec<Vec<String>>,
    pub tree_directions: Vec<String>,
    pub signature: Vec<String>,
    /// Chunks of the signer's modulus.
    pub correct_key: Vec<String>,
    pub merkle_root: Vec<String>,
}

impl RsaCircuitInputs {
    /// Verifies the envelope, then locates its key in `commitment`.
    pub fn new<C: PseudoCompressionFunction<Digest, 2>>(
        frame: &SshSigFrame,
        message: &[u8],
        commitment: &KeySetCommitment<C>,
    ) -> Result<Self, WitnessError> {
        let (PublicKey::Rsa { n, .. }, Signature::Rsa { value, .. }) =
            (frame.public_key(), frame.signature())
        else {
            return Err(WitnessError::KeyTypeNotAccepted(
                frame.public_key_algorithm().to_string(),
            ));
        };

        let config = commitment.config();
        let k = modulus_bytes(n);
        if k != config.rsa_modulus_bytes {
            return Err(WitnessError::ModulusSizeMismatch {
                expected: config.rsa_modulus_bytes,
                actual: k,
            });
        }
        if !verify_rsa(frame, message)? {
            debug!("RSA signature does not verify, refusing to build inputs");
            return Err(WitnessError::InvalidSignature);
        }

        let (index, proof) = commitment.membership(frame.public_key())?;
        let em = rsa_encoded_message(frame, message, k)?;
        let chunk = |value: &BigUint| split_to_chunks(value, config.chunk_bits, config.num_chunks);
        let (tree_proofs, tree_directions) = proof_strings(&proof);
        info!(index, "built RSA circuit inputs");

        Ok(RsaCircuitInputs {
            message: to_decimal_strings(&chunk(&em)?),
            tree_proofs,
            tree_directions,
            signature: to_decimal_strings(&chunk(value)?),
            correct_key: to_decimal_strings(&chunk(n)?),
            merkle_root: digest_to_strings(commitment.root()),
        })
    }

    /// Message chunks followed by the root elements.
    pub fn public_signals(&self) -> Vec<String> {
        self.message
            .iter()
            .chain(&self.merkle_root)
            .cloned()
            .collect()
    }

    pub fn to_json(&self) -> Result<String, WitnessError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Inputs for the Ed25519 membership circuit, on the Weierstrass model.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ed25519CircuitInputs {
    pub s: Vec<String>,
    #[serde(rename = "R")]
    pub r: Vec<Vec<String>>,
    pub h: Vec<String>,
    #[serde(rename = "A")]
    pub a: Vec<Vec<String>>,
    pub tree_proofs: Vec<Vec<String>>,
    pub tree_directions: Vec<String>,
    pub merkle_root: Vec<String>,
}

impl Ed25519CircuitInputs {
    pub fn new<C: PseudoCompressionFunction<Digest, 2>>(
        frame: &SshSigFrame,
        message: &[u8],
        commitment: &KeySetCommitment<C>,
    ) -> Result<Self, WitnessError> {
        let witness = Ed25519Witness::from_frame(frame, message)?;
        if !witness.check_equation() {
            debug!("Ed25519 equation fails on the Weierstrass curve");
            return Err(WitnessError::InvalidSignature);
        }
        let (index, proof) = commitment.membership(frame.public_key())?;
        info!(index, "built Ed25519 circuit inputs");
        Self::from_witness(&witness, &proof, commitment.root())
    }

    /// Renders an already checked witness.
    pub fn from_witness(
        witness: &Ed25519Witness,
        proof: &MerkleProof,
        root: &Digest,
    ) -> Result<Self, WitnessError> {
        let (tree_proofs, tree_directions) = proof_strings(proof);
        Ok(Ed25519CircuitInputs {
            s: to_decimal_strings(&split_u64_limbs(witness.s.as_biguint())?),
            r: point_strings(weierstrass_limbs(&witness.r)?),
            h: to_decimal_strings(&split_u64_limbs(witness.h.as_biguint())?),
            a: point_strings(weierstrass_limbs(&witness.a)?),
            tree_proofs,
            tree_directions,
            merkle_root: digest_to_strings(root),
        })
    }

    /// Challenge limbs followed by the root elements.
    pub fn public_signals(&self) -> Vec<String> {
        self.h.iter().chain(&self.merkle_root).cloned().collect()
    }

    pub fn to_json(&self) -> Result<String, WitnessError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
