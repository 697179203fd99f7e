#![no_main]

use libfuzzer_sys::fuzz_target;
use paillier_commit::commitment::{check_commitment, generate_signing_key, SigningKey};
use paillier_commit::Commitment;

use std::sync::OnceLock;

static SIGNING_KEY: OnceLock<SigningKey> = OnceLock::new();

fuzz_target!(|data: &[u8]| {
    let signing_key = SIGNING_KEY.get_or_init(generate_signing_key);

    let split = data.first().map_or(0, |b| *b as usize).min(data.len());
    let (ciphertext, identity) = data.split_at(split);
    let identity = String::from_utf8_lossy(identity);

    let commitment = Commitment::commit(signing_key, ciphertext, &identity).unwrap();
    let token = commitment.encode();

    let decoded = Commitment::decode(&token).unwrap();
    assert!(decoded.verify(ciphertext, &identity));
    assert!(!decoded.verify(ciphertext, &format!("{identity}!")));

    // Untrusted tokens never panic.
    let _ = Commitment::decode(&String::from_utf8_lossy(data));
    let _ = check_commitment(&String::from_utf8_lossy(data), &identity, &token);
});
