// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::Homomorphic;
use crate::arith;
use crate::ciphertext::Ciphertext;
use crate::error::{Error, Result};
use crate::keypair::PublicKey;
use crate::plaintext::Plaintext;

use num_bigint_dig::BigUint;
use rand::rngs::OsRng;

impl PublicKey {
    #[inline]
    fn check_ciphertext(&self, ciphertext: &Ciphertext) -> Result<()> {
        if ciphertext.value() >= &self.n_squared {
            return Err(Error::CiphertextOutOfRange);
        }
        Ok(())
    }
}

impl Homomorphic for PublicKey {
    fn add(&self, lhs: &Ciphertext, rhs: &Ciphertext) -> Result<Ciphertext> {
        self.check_ciphertext(lhs)?;
        self.check_ciphertext(rhs)?;

        Ok(Ciphertext::new((lhs.value() * rhs.value()) % &self.n_squared))
    }

    fn scale(&self, ciphertext: &Ciphertext, scalar: &BigUint) -> Result<Ciphertext> {
        self.check_ciphertext(ciphertext)?;

        Ok(Ciphertext::new(arith::mod_pow(ciphertext.value(), scalar, &self.n_squared)))
    }

    fn add_plain(&self, ciphertext: &Ciphertext, constant: &Plaintext) -> Result<Ciphertext> {
        self.check_ciphertext(ciphertext)?;
        if constant.value() >= &self.n {
            return Err(Error::PlaintextOutOfRange);
        }

        let gk = self.g_pow(constant.value());
        Ok(Ciphertext::new((ciphertext.value() * gk) % &self.n_squared))
    }

    fn rerandomize(&self, ciphertext: &Ciphertext) -> Result<Ciphertext> {
        self.check_ciphertext(ciphertext)?;

        let r = arith::random_in_zn_star(&self.n, &mut OsRng)?;
        let rn = arith::mod_pow(&r, &self.n, &self.n_squared);
        Ok(Ciphertext::new((ciphertext.value() * rn) % &self.n_squared))
    }
}
