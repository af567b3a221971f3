//! Commits the sample keys and renders circuit inputs for both sample
//! signatures. Set `RUST_LOG=debug` to see skipped keys and tree details.

use std::time::Instant;

use sshsig::{verify, SshSigFrame};
use tracing_subscriber::EnvFilter;
use witness::{
    digest_to_strings, ContributorKey, ContributorSet, Ed25519CircuitInputs, KeySetCommitment,
    RsaCircuitInputs, WitnessConfig,
};

const ED25519_SAMPLE: &str = include_str!("../../sshsig/testdata/ed25519_sample.sig");
const ED25519_KEY_LINE: &str = include_str!("../../sshsig/testdata/ed25519.pub");
const RSA_SAMPLE: &str = include_str!("../../sshsig/testdata/rsa_sample.sig");
const RSA_KEY_LINE: &str = include_str!("../../sshsig/testdata/rsa.pub");

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let mut contributors = ContributorSet::default();
    contributors.insert("alice", vec![ContributorKey::new(ED25519_KEY_LINE.trim())]);
    contributors.insert(
        "bob",
        vec![
            ContributorKey::new(RSA_KEY_LINE.trim()),
            ContributorKey::new("ssh-rsa truncated"),
        ],
    );

    let config = WitnessConfig::default();
    let commit_start = Instant::now();
    let commitment = KeySetCommitment::new(&contributors, &config).expect("commit");
    println!("Committed keys: {}", commitment.keys().len());
    println!("Skipped keys: {}", commitment.skipped().len());
    println!("Merkle root: {:?}", digest_to_strings(commitment.root()));
    println!("Commit time: {:?}", commit_start.elapsed());

    let rsa_frame = SshSigFrame::parse_armored(RSA_SAMPLE).expect("parse RSA sample");
    assert!(verify(&rsa_frame, b"0xPARC").expect("well-formed"));
    let rsa_start = Instant::now();
    let rsa_inputs = RsaCircuitInputs::new(&rsa_frame, b"0xPARC", &commitment).expect("RSA inputs");
    println!("RSA inputs time: {:?}", rsa_start.elapsed());
    println!("RSA public signals: {}", rsa_inputs.public_signals().len());
    println!("{}", rsa_inputs.to_json().expect("render"));

    let ed_frame = SshSigFrame::parse_armored(ED25519_SAMPLE).expect("parse Ed25519 sample");
    let ed_start = Instant::now();
    let ed_inputs = Ed25519CircuitInputs::new(&ed_frame, b"Hello, World\n", &commitment)
        .expect("Ed25519 inputs");
    println!("Ed25519 inputs time: {:?}", ed_start.elapsed());
    println!("{}", ed_inputs.to_json().expect("render"));
}
