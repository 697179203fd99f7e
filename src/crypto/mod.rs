// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

mod decrypt;
mod encrypt;
mod homomorphic;

use num_bigint_dig::BigUint;

use crate::ciphertext::Ciphertext;
use crate::error::Result;
use crate::plaintext::Plaintext;

/// Encrypts a single integer.
pub trait Encrypt {
    /// Encrypt `plaintext` with fresh randomness.
    ///
    /// The plaintext must be strictly smaller than the public modulus `n`.
    /// Encrypting the same value twice yields different ciphertexts.
    fn encrypt(&self, plaintext: &Plaintext) -> Result<Ciphertext>;
}

/// Recovers the integer behind a ciphertext.
pub trait Decrypt {
    /// Recover the plaintext `m` from a ciphertext `c`.
    fn decrypt(&self, ciphertext: &Ciphertext) -> Result<Plaintext>;
}

/// Operations on ciphertexts that act on the hidden plaintexts.
///
/// All inputs must belong to the key the operation is invoked on. Results
/// wrap modulo `n` on decryption.
pub trait Homomorphic {
    /// `E(m1) · E(m2) = E(m1 + m2)`
    fn add(&self, lhs: &Ciphertext, rhs: &Ciphertext) -> Result<Ciphertext>;

    /// `E(m)^k = E(k · m)`
    fn scale(&self, ciphertext: &Ciphertext, scalar: &BigUint) -> Result<Ciphertext>;

    /// `E(m) · g^k = E(m + k)`
    fn add_plain(&self, ciphertext: &Ciphertext, constant: &Plaintext) -> Result<Ciphertext>;

    /// `E(m) · rⁿ`: a fresh ciphertext of the same plaintext.
    fn rerandomize(&self, ciphertext: &Ciphertext) -> Result<Ciphertext>;
}
