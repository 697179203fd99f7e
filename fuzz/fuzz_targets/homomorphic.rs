#![no_main]

use libfuzzer_sys::fuzz_target;
use num_bigint_dig::BigUint;
use paillier_commit::{KeyPair, Paillier, Plaintext};

use std::sync::OnceLock;

static KEYPAIR: OnceLock<KeyPair> = OnceLock::new();

fuzz_target!(|data: &[u8]| {
    if data.len() < 16 {
        return;
    }
    let keypair = KEYPAIR.get_or_init(|| KeyPair::generate_with_size(1024).unwrap());

    let public = keypair.public_key();
    let secret = keypair.private_key();
    let n = public.n();

    let (m1_bytes, rest) = data.split_at(data.len() / 2);
    let (m2_bytes, k_bytes) = rest.split_at(rest.len() / 2);
    let m1 = BigUint::from_bytes_be(m1_bytes) % n;
    let m2 = BigUint::from_bytes_be(m2_bytes) % n;
    let k = BigUint::from_bytes_be(k_bytes);

    let c1 = Paillier::encrypt(&Plaintext::new(m1.clone()), public).unwrap();
    let c2 = Paillier::encrypt(&Plaintext::new(m2.clone()), public).unwrap();

    let sum = Paillier::homomorphic_add(public, &c1, &c2).unwrap();
    let decrypted = Paillier::decrypt(&sum, public, secret).unwrap();
    assert_eq!(decrypted.value(), &((&m1 + &m2) % n));

    let scaled = Paillier::homomorphic_scale(public, &c1, &k).unwrap();
    let decrypted = Paillier::decrypt(&scaled, public, secret).unwrap();
    assert_eq!(decrypted.value(), &((&m1 * &k) % n));
});
