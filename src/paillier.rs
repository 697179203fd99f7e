// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use num_bigint_dig::BigUint;

use crate::ciphertext::Ciphertext;
use crate::crypto::{Decrypt, Encrypt, Homomorphic};
use crate::error::{Error, Result};
use crate::keypair::{KeyPairBuilder, PrivateKey, PublicKey};
use crate::plaintext::Plaintext;

/// Stateless entry points for the Paillier cryptosystem.
///
/// Every function is a pure function of its arguments; the security parameter
/// is passed explicitly to [`Paillier::keygen`] and afterwards carried by the
/// keys themselves.
pub struct Paillier;

impl Paillier {
    /// Generate a key pair whose modulus has `security_bits` bits.
    ///
    /// Fails with [`Error::InvalidSecurityParameter`] below 1024 bits or for an
    /// odd bit count.
    pub fn keygen(security_bits: usize) -> Result<(PublicKey, PrivateKey)> {
        Ok(KeyPairBuilder::new().bit_length(security_bits).build()?.into_parts())
    }

    /// Encrypt `plaintext` under `pub_key`. Requires `0 ≤ m < n`.
    pub fn encrypt(plaintext: &Plaintext, pub_key: &PublicKey) -> Result<Ciphertext> {
        pub_key.encrypt(plaintext)
    }

    /// Decrypt `ciphertext`. Requires `0 ≤ c < n²` and a private key paired
    /// with `pub_key`.
    pub fn decrypt(
        ciphertext: &Ciphertext,
        pub_key: &PublicKey,
        priv_key: &PrivateKey,
    ) -> Result<Plaintext> {
        if !priv_key.matches(pub_key) {
            return Err(Error::KeyMismatch);
        }
        priv_key.decrypt(ciphertext)
    }

    /// `c1 · c2 mod n²`; decrypts to `m1 + m2 mod n`.
    pub fn homomorphic_add(
        pub_key: &PublicKey,
        c1: &Ciphertext,
        c2: &Ciphertext,
    ) -> Result<Ciphertext> {
        pub_key.add(c1, c2)
    }

    /// `c^k mod n²`; decrypts to `k · m mod n`.
    pub fn homomorphic_scale(
        pub_key: &PublicKey,
        ciphertext: &Ciphertext,
        scalar: &BigUint,
    ) -> Result<Ciphertext> {
        pub_key.scale(ciphertext, scalar)
    }
}
