use super::*;
use curve::{EdwardsPoint, Group, WeierstrassPoint};
use num_bigint::BigUint;
use sshsig::{rsa_encoded_message, KeyType, PublicKey, SshSigFrame};

const ED25519_SAMPLE: &str = include_str!("../../sshsig/testdata/ed25519_sample.sig");
const ED25519_KEY_LINE: &str = include_str!("../../sshsig/testdata/ed25519.pub");
const RSA_SAMPLE: &str = include_str!("../../sshsig/testdata/rsa_sample.sig");
const RSA_KEY_LINE: &str = include_str!("../../sshsig/testdata/rsa.pub");

const HELLO: &[u8] = b"Hello, World\n";
const PARC: &[u8] = b"0xPARC";

/// Key line for `k·B`.
fn ed25519_key_line(k: u64) -> String {
    let point = EdwardsPoint::basepoint().mul_u64(k).compress();
    PublicKey::Ed25519(point).to_key_line(Some(&format!("generated-{k}")))
}

/// alice: the Ed25519 sample key.
/// bob: the RSA sample key, then an undecodable RSA line.
/// carol: an ECDSA key, then an Ed25519 key labelled RSA.
fn sample_contributors_json() -> String {
    format!(
        r#"{{
            "repository": {{ "owner": "sample", "repo": "keys", "url": "https://example.com/sample/keys" }},
            "contributors": {{
                "carol": {{
                    "contributions": 1,
                    "publicKeys": [
                        {{ "id": 30, "key": "ecdsa-sha2-nistp256 AAAAE2VjZHNh", "title": "work", "type": "ECDSA" }},
                        {{ "id": 31, "key": "{ed}", "type": "RSA" }}
                    ]
                }},
                "bob": {{
                    "contributions": 12,
                    "publicKeys": [
                        {{ "id": 20, "key": "{rsa}", "type": "RSA" }},
                        {{ "id": 21, "key": "ssh-rsa !!!not-base64", "type": "RSA" }}
                    ]
                }},
                "alice": {{
                    "contributions": 40,
                    "publicKeys": [{{ "id": 10, "key": "{ed}", "type": "ED25519" }}]
                }}
            }}
        }}"#,
        ed = ED25519_KEY_LINE.trim(),
        rsa = RSA_KEY_LINE.trim(),
    )
}

fn sample_commitment() -> KeySetCommitment {
    let contributors = ContributorSet::from_json(&sample_contributors_json()).expect("valid json");
    KeySetCommitment::new(&contributors, &WitnessConfig::default()).expect("commit")
}

fn parse_decimal(values: &[String]) -> Vec<BigUint> {
    values
        .iter()
        .map(|value| value.parse().expect("decimal"))
        .collect()
}

#[test]
fn test_commitment_skips_bad_keys() {
    let commitment = sample_commitment();

    let committed: Vec<(&str, usize)> = commitment
        .keys()
        .iter()
        .map(|key| (key.identity.as_str(), key.key_index))
        .collect();
    assert_eq!(committed, [("alice", 0), ("bob", 0)]);
    assert_eq!(commitment.keys()[1].leaf_index, 1);

    let skipped: Vec<(&str, usize)> = commitment
        .skipped()
        .iter()
        .map(|key| (key.identity.as_str(), key.index))
        .collect();
    // The ECDSA entry is filtered, not skipped.
    assert_eq!(skipped, [("bob", 1), ("carol", 1)]);

    for key in commitment.keys() {
        let (index, proof) = commitment.membership(&key.public_key).expect("member");
        assert_eq!(index, key.leaf_index);
        assert!(commitment.tree().verify(&key.leaf, &proof));
        assert!(verify_proof(
            commitment.tree().compression(),
            &key.leaf,
            &proof,
            commitment.root()
        ));
    }
}

#[test]
fn test_commitment_is_deterministic() {
    assert_eq!(sample_commitment().root(), sample_commitment().root());
}

#[test]
fn test_commitment_respects_accepted_types() {
    let contributors = ContributorSet::from_json(&sample_contributors_json()).expect("valid json");
    let config = WitnessConfig {
        accepted_key_types: vec![KeyType::Ed25519],
        ..WitnessConfig::default()
    };
    let commitment = KeySetCommitment::new(&contributors, &config).expect("commit");
    assert_eq!(commitment.keys().len(), 1);
    assert_eq!(commitment.keys()[0].identity, "alice");
    // carol's mislabelled key is declared RSA, so it is filtered out.
    assert!(commitment.skipped().is_empty());
}

#[test]
fn test_rsa_inputs_from_sample() {
    let commitment = sample_commitment();
    let frame = SshSigFrame::parse_armored(RSA_SAMPLE).expect("parse");
    let inputs = RsaCircuitInputs::new(&frame, PARC, &commitment).expect("inputs");

    assert_eq!(inputs.message.len(), DEFAULT_NUM_CHUNKS);
    assert_eq!(inputs.signature.len(), DEFAULT_NUM_CHUNKS);
    assert_eq!(inputs.correct_key.len(), DEFAULT_NUM_CHUNKS);
    assert_eq!(inputs.merkle_root.len(), DIGEST_WIDTH);
    assert_eq!(inputs.tree_proofs.len(), DEFAULT_TREE_DEPTH);
    assert!(inputs.tree_proofs.iter().all(|p| p.len() == DIGEST_WIDTH));
    // Leaf 1 is a right child, then left, then left.
    assert_eq!(inputs.tree_directions, ["1", "0", "0"]);

    let em = rsa_encoded_message(&frame, PARC, 512).expect("encode");
    assert_eq!(join_chunks(&parse_decimal(&inputs.message), DEFAULT_CHUNK_BITS), em);
    let PublicKey::Rsa { n, .. } = frame.public_key() else {
        panic!("RSA sample");
    };
    assert_eq!(join_chunks(&parse_decimal(&inputs.correct_key), DEFAULT_CHUNK_BITS), *n);
    assert_eq!(inputs.merkle_root, digest_to_strings(commitment.root()));

    let signals = inputs.public_signals();
    assert_eq!(signals.len(), DEFAULT_NUM_CHUNKS + DIGEST_WIDTH);
    assert_eq!(signals[..DEFAULT_NUM_CHUNKS], inputs.message[..]);
}

#[test]
fn test_rsa_inputs_json_keys() {
    let commitment = sample_commitment();
    let frame = SshSigFrame::parse_armored(RSA_SAMPLE).expect("parse");
    let inputs = RsaCircuitInputs::new(&frame, PARC, &commitment).expect("inputs");
    let json: serde_json::Value =
        serde_json::from_str(&inputs.to_json().expect("render")).expect("json");
    for key in [
        "message",
        "treeProofs",
        "treeDirections",
        "signature",
        "correctKey",
        "merkleRoot",
    ] {
        assert!(json.get(key).is_some(), "missing {key}");
    }
    assert!(json["message"][0].is_string());
}

#[test]
fn test_rsa_inputs_reject_wrong_message() {
    let commitment = sample_commitment();
    let frame = SshSigFrame::parse_armored(RSA_SAMPLE).expect("parse");
    assert!(matches!(
        RsaCircuitInputs::new(&frame, b"0xPARC\n", &commitment),
        Err(WitnessError::InvalidSignature)
    ));
}

#[test]
fn test_rsa_inputs_reject_modulus_size() {
    let contributors = ContributorSet::from_json(&sample_contributors_json()).expect("valid json");
    let config = WitnessConfig {
        rsa_modulus_bytes: 256,
        ..WitnessConfig::default()
    };
    let commitment = KeySetCommitment::new(&contributors, &config).expect("commit");
    let frame = SshSigFrame::parse_armored(RSA_SAMPLE).expect("parse");
    assert!(matches!(
        RsaCircuitInputs::new(&frame, PARC, &commitment),
        Err(WitnessError::ModulusSizeMismatch {
            expected: 256,
            actual: 512,
        })
    ));
}

#[test]
fn test_rsa_inputs_reject_ed25519_frame() {
    let commitment = sample_commitment();
    let frame = SshSigFrame::parse_armored(ED25519_SAMPLE).expect("parse");
    assert!(matches!(
        RsaCircuitInputs::new(&frame, HELLO, &commitment),
        Err(WitnessError::KeyTypeNotAccepted(_))
    ));
}

#[test]
fn test_ed25519_witness_from_sample() {
    let frame = SshSigFrame::parse_armored(ED25519_SAMPLE).expect("parse");
    let witness = Ed25519Witness::from_frame(&frame, HELLO).expect("witness");
    assert!(witness.check_equation());
    assert!(witness.check_edwards_equation());
    assert!(witness.a.is_on_curve());
    assert!(witness.r.is_on_curve());

    let tampered = Ed25519Witness::from_frame(&frame, b"Hello, World").expect("witness");
    assert!(!tampered.check_equation());
    assert!(!tampered.check_edwards_equation());
}

#[test]
fn test_ed25519_inputs_from_sample() {
    let commitment = sample_commitment();
    let frame = SshSigFrame::parse_armored(ED25519_SAMPLE).expect("parse");
    let inputs = Ed25519CircuitInputs::new(&frame, HELLO, &commitment).expect("inputs");

    assert_eq!(inputs.s.len(), U64_LIMBS);
    assert_eq!(inputs.h.len(), U64_LIMBS);
    assert_eq!(inputs.r.len(), 2);
    assert!(inputs.a.iter().all(|coordinate| coordinate.len() == U64_LIMBS));
    assert_eq!(inputs.tree_directions, ["0", "0", "0"]);

    let PublicKey::Ed25519(bytes) = frame.public_key() else {
        panic!("Ed25519 sample");
    };
    let a = WeierstrassPoint::from_edwards(&EdwardsPoint::decompress(bytes).expect("point"))
        .expect("finite");
    let (x, y) = a.coordinates().expect("finite");
    let expected: Vec<Vec<String>> = [x.to_u64_limbs(), y.to_u64_limbs()]
        .iter()
        .map(|limbs| limbs.iter().map(u64::to_string).collect())
        .collect();
    assert_eq!(inputs.a, expected);

    assert_eq!(inputs.public_signals().len(), U64_LIMBS + DIGEST_WIDTH);

    let json: serde_json::Value =
        serde_json::from_str(&inputs.to_json().expect("render")).expect("json");
    for key in ["s", "R", "h", "A", "treeProofs", "treeDirections", "merkleRoot"] {
        assert!(json.get(key).is_some(), "missing {key}");
    }
}

#[test]
fn test_ed25519_inputs_reject_tampered_message() {
    let commitment = sample_commitment();
    let frame = SshSigFrame::parse_armored(ED25519_SAMPLE).expect("parse");
    assert!(matches!(
        Ed25519CircuitInputs::new(&frame, b"Hello, World", &commitment),
        Err(WitnessError::InvalidSignature)
    ));
}

#[test]
fn test_non_member_has_no_proof() {
    let mut contributors = ContributorSet::default();
    contributors.insert("bob", vec![ContributorKey::new(RSA_KEY_LINE.trim())]);
    let commitment = KeySetCommitment::new(&contributors, &WitnessConfig::default()).expect("commit");

    let frame = SshSigFrame::parse_armored(ED25519_SAMPLE).expect("parse");
    assert!(matches!(
        Ed25519CircuitInputs::new(&frame, HELLO, &commitment),
        Err(WitnessError::Merkle(MerkleError::ValueNotFound))
    ));
}

#[test]
fn test_capacity_exceeded() {
    let mut contributors = ContributorSet::default();
    for k in 1..=8 {
        contributors.insert(format!("user{k}"), vec![ContributorKey::new(ed25519_key_line(k))]);
    }
    let full = KeySetCommitment::new(&contributors, &WitnessConfig::default()).expect("fits");
    assert_eq!(full.keys().len(), 8);

    contributors.insert("user9", vec![ContributorKey::new(ed25519_key_line(9))]);
    assert!(matches!(
        KeySetCommitment::new(&contributors, &WitnessConfig::default()),
        Err(WitnessError::Merkle(MerkleError::CapacityExceeded {
            leaves: 9,
            capacity: 8,
        }))
    ));
}

#[test]
fn test_ed25519_leaf_hashes_weierstrass_limbs() {
    let commitment = sample_commitment();
    let key = PublicKey::from_key_line(&ed25519_key_line(5)).expect("key line");
    let point = WeierstrassPoint::from_edwards(&EdwardsPoint::basepoint().mul_u64(5)).expect("finite");
    let (x, y) = point.coordinates().expect("finite");
    let limbs: Vec<BigUint> = x
        .to_u64_limbs()
        .into_iter()
        .chain(y.to_u64_limbs())
        .map(BigUint::from)
        .collect();
    let expected = hash_limbs(commitment.tree().compression(), &limbs).expect("narrow");
    assert_eq!(commitment.leaf_for(&key).expect("leaf"), expected);
    assert_ne!(
        commitment.leaf_for(&key).expect("leaf"),
        commitment.leaf_for(&PublicKey::from_key_line(&ed25519_key_line(6)).expect("key")).expect("leaf")
    );
}

#[test]
fn test_replace_moves_membership() {
    let mut commitment = sample_commitment();
    let old = commitment.keys()[0].public_key.clone();
    let new = PublicKey::from_key_line(&ed25519_key_line(7)).expect("key line");
    let old_root = *commitment.root();

    commitment.replace(0, new.clone()).expect("in range");
    assert_ne!(*commitment.root(), old_root);
    assert!(matches!(
        commitment.membership(&old),
        Err(WitnessError::Merkle(MerkleError::ValueNotFound))
    ));
    let (index, proof) = commitment.membership(&new).expect("member");
    assert_eq!(index, 0);
    assert!(commitment.tree().verify(&commitment.keys()[0].leaf, &proof));

    assert!(matches!(
        commitment.replace(5, new),
        Err(WitnessError::Merkle(MerkleError::IndexOutOfRange { index: 5, .. }))
    ));
}
