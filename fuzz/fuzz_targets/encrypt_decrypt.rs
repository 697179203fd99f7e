#![no_main]

use libfuzzer_sys::fuzz_target;
use num_bigint_dig::BigUint;
use paillier_commit::{Ciphertext, KeyPair, Paillier, Plaintext};
use std::sync::OnceLock;

static KEYPAIR: OnceLock<KeyPair> = OnceLock::new();

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let key_pair = KEYPAIR.get_or_init(|| KeyPair::generate_with_size(1024).unwrap());
    let public = key_pair.public_key();
    let secret = key_pair.private_key();
    let n = public.n();

    let m = BigUint::from_bytes_be(data) % n;
    let plaintext = Plaintext::new(m.clone());

    let ciphertext = Paillier::encrypt(&plaintext, public).unwrap();
    assert!(ciphertext.value() < public.n_squared());

    let decrypted = Paillier::decrypt(&ciphertext, public, secret).unwrap();
    assert_eq!(decrypted.value(), &m);

    // Arbitrary bytes as a ciphertext must fail cleanly or decrypt into Z_n.
    let forged = Ciphertext::from(data);
    if let Ok(p) = Paillier::decrypt(&forged, public, secret) {
        assert!(p.value() < n);
    }
});
