// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::Encrypt;
use crate::arith;
use crate::ciphertext::Ciphertext;
use crate::error::{Error, Result};
use crate::keypair::{KeyPair, PublicKey};
use crate::plaintext::Plaintext;

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

impl PublicKey {
    /// Encrypt with caller-supplied randomness.
    ///
    /// `c = g^m · rⁿ mod n²` with `r` drawn uniformly from `Z*_n`.
    pub fn encrypt_with_rng<R: RngCore + CryptoRng + ?Sized>(
        &self,
        plaintext: &Plaintext,
        rng: &mut R,
    ) -> Result<Ciphertext> {
        let m = plaintext.value();
        if m >= &self.n {
            return Err(Error::PlaintextOutOfRange);
        }

        let r = arith::random_in_zn_star(&self.n, rng)?;

        let gm = self.g_pow(m);
        let rn = arith::mod_pow(&r, &self.n, &self.n_squared);
        let c = (gm * rn) % &self.n_squared;

        Ok(Ciphertext::new(c))
    }
}

impl Encrypt for PublicKey {
    fn encrypt(&self, plaintext: &Plaintext) -> Result<Ciphertext> {
        self.encrypt_with_rng(plaintext, &mut OsRng)
    }
}

impl Encrypt for KeyPair {
    fn encrypt(&self, plaintext: &Plaintext) -> Result<Ciphertext> {
        self.public_key().encrypt(plaintext)
    }
}
