// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::Decrypt;
use crate::arith;
use crate::ciphertext::Ciphertext;
use crate::error::{Error, Result};
use crate::keypair::{KeyPair, PrivateKey};
use crate::plaintext::Plaintext;

use num_traits::One;
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

impl PrivateKey {
    /// Decrypt with caller-supplied randomness for exponent blinding.
    ///
    /// m = L(c^λ mod n²) · μ mod n
    ///
    /// The secret exponent λ is blinded with a random multiple of `n·λ`,
    /// the exponent of `Z*_{n²}`, so the result is unaffected.
    pub fn decrypt_with_rng<R: RngCore + CryptoRng + ?Sized>(
        &self,
        ciphertext: &Ciphertext,
        rng: &mut R,
    ) -> Result<Plaintext> {
        let n = &self.n;
        let n_squared = &self.n_squared;

        let c = ciphertext.value();
        if c >= n_squared {
            return Err(Error::CiphertextOutOfRange);
        }

        // Only units of Z_{n²} are valid ciphertexts.
        if !arith::gcd(c, n).is_one() {
            return Err(Error::MalformedCiphertext);
        }

        let mut group_exponent = n * &self.lambda;
        let mut c_lambda = arith::mod_pow_blinded(c, &self.lambda, &group_exponent, n_squared, rng);
        group_exponent.zeroize();

        let l_c = arith::l_function(&c_lambda, n);
        c_lambda.zeroize();

        let m = (l_c? * &self.mu) % n;
        Ok(Plaintext::new(m))
    }
}

impl Decrypt for PrivateKey {
    fn decrypt(&self, ciphertext: &Ciphertext) -> Result<Plaintext> {
        self.decrypt_with_rng(ciphertext, &mut OsRng)
    }
}

impl Decrypt for KeyPair {
    fn decrypt(&self, ciphertext: &Ciphertext) -> Result<Plaintext> {
        self.private_key().decrypt(ciphertext)
    }
}
