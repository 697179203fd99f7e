// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Arbitrary-precision helpers shared by key generation, encryption and
//! decryption.
//!
//! Everything here is a thin, checked layer over `num-bigint-dig`: failures
//! surface as [`Error`] values instead of panics or `Option`s so the
//! cryptosystem can propagate them with `?`.

mod prime;

pub use prime::{random_prime, MAX_RESTARTS, MIN_PRIME_BITS};

use num_bigint_dig::{BigUint, ModInverse, RandBigInt};
use num_integer::Integer;
use num_traits::{One, Zero};
use rand::{CryptoRng, RngCore};

use crate::error::{Error, Result};

/// Upper bound on rejection-sampling rounds in [`random_in_zn_star`].
///
/// For an RSA-type modulus the probability of drawing a non-unit is about
/// `2 / sqrt(n)`, so exhausting this budget means the modulus is broken.
const MAX_UNIT_SAMPLES: usize = 128;

/// Computes `base^exponent mod modulus`.
///
/// # Panics
/// Panics if `modulus` is zero.
#[inline]
pub fn mod_pow(base: &BigUint, exponent: &BigUint, modulus: &BigUint) -> BigUint {
    base.modpow(exponent, modulus)
}

/// Computes `base^exponent mod modulus` with a randomised exponent.
///
/// The exponent actually used is `exponent + k·group_exponent` for a fresh
/// 64-bit `k`. The result is unchanged as long as `base^group_exponent ≡ 1`,
/// but the bit pattern processed by the exponentiation differs on every call,
/// so timing observations cannot be accumulated against a fixed secret.
pub fn mod_pow_blinded<R: RngCore + CryptoRng + ?Sized>(
    base: &BigUint,
    exponent: &BigUint,
    group_exponent: &BigUint,
    modulus: &BigUint,
    rng: &mut R,
) -> BigUint {
    let k = BigUint::from(rng.next_u64());
    let blinded = exponent + group_exponent * k;
    base.modpow(&blinded, modulus)
}

/// Computes the modular inverse `a⁻¹ mod modulus`.
///
/// Fails with [`Error::NotInvertible`] when `gcd(a, modulus) ≠ 1`.
pub fn mod_inverse<'i>(a: &'i BigUint, modulus: &'i BigUint) -> Result<BigUint> {
    if modulus <= &BigUint::one() {
        return Err(Error::NotInvertible);
    }

    a.mod_inverse(modulus)
        .ok_or(Error::NotInvertible)?
        .to_biguint()
        .ok_or(Error::NotInvertible)
}

#[inline]
pub fn gcd(a: &BigUint, b: &BigUint) -> BigUint {
    a.gcd(b)
}

#[inline]
pub fn lcm(a: &BigUint, b: &BigUint) -> BigUint {
    a.lcm(b)
}

/// L(x) = (x - 1) / n
///
/// Only defined for `x ≥ 1`. During decryption `x = c^λ mod n²` is zero only
/// when `c` shares a factor with `n`, so that case maps to
/// [`Error::MalformedCiphertext`].
#[inline]
pub fn l_function(x: &BigUint, n: &BigUint) -> Result<BigUint> {
    if x.is_zero() || n.is_zero() {
        return Err(Error::MalformedCiphertext);
    }
    Ok((x - BigUint::one()) / n)
}

/// Returns a uniformly random element of `Z*_n`, i.e. a value in `[1, n)`
/// coprime to `n`.
pub fn random_in_zn_star<R: RngCore + CryptoRng + ?Sized>(
    n: &BigUint,
    rng: &mut R,
) -> Result<BigUint> {
    let one = BigUint::one();
    if n <= &one {
        return Err(Error::GenerationExhausted { attempts: 0 });
    }

    for _ in 0..MAX_UNIT_SAMPLES {
        let r = rng.gen_biguint_range(&one, n);
        if gcd(&r, n).is_one() {
            return Ok(r);
        }
    }

    Err(Error::GenerationExhausted { attempts: MAX_UNIT_SAMPLES })
}
