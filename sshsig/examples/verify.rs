//! Verifies an armored signature against a message file.
//!
//! `cargo run --example verify -- message.sig message.txt`; with no
//! arguments the bundled Ed25519 sample is checked.

use sshsig::{SshSigFrame, VerifyContext, verify};

const ED25519_SAMPLE: &str = include_str!("../testdata/ed25519_sample.sig");

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

fn main() {
    let mut args = std::env::args().skip(1);
    let (armored, message) = match (args.next(), args.next()) {
        (Some(sig_path), Some(message_path)) => (
            std::fs::read_to_string(sig_path).expect("read signature"),
            std::fs::read(message_path).expect("read message"),
        ),
        _ => (ED25519_SAMPLE.to_string(), b"Hello, World\n".to_vec()),
    };

    let frame = SshSigFrame::parse_armored(&armored).expect("parse");
    println!("Namespace: {}", String::from_utf8_lossy(frame.namespace()));
    println!("Hash: {}", frame.hash_algorithm().name());
    println!("Key algorithm: {}", frame.public_key_algorithm());
    println!("Signature algorithm: {}", frame.signature_algorithm());

    if let Ok(context) = VerifyContext::new(&frame, &message) {
        println!("A: {}", hex(context.public_key()));
        println!("R: {}", hex(context.r()));
        println!("S: {}", hex(context.s()));
        println!("h: {}", context.challenge());
    }

    let valid = verify(&frame, &message).expect("verify");
    println!("Valid: {valid}");
}
