// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Random prime generation for Paillier moduli.
//!
//! Candidates are drawn uniformly with the two most significant bits set,
//! then walked upwards in steps of two. Each candidate is pre-sieved against
//! small primes before the probabilistic test runs, which rejects most
//! composites for the cost of a few word-sized remainders.

use log::debug;
use num_bigint_dig::prime::probably_prime;
use num_bigint_dig::{BigUint, RandBigInt};
use num_traits::{One, Zero};
use rand::{CryptoRng, RngCore};

use crate::error::{Error, Result};

/// Odd primes below 600 used for sieving.
const SIEVE_PRIMES: &[u32] = &[
    3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97,
    101, 103, 107, 109, 113, 127, 131, 137, 139, 149, 151, 157, 163, 167, 173, 179, 181, 191, 193,
    197, 199, 211, 223, 227, 229, 233, 239, 241, 251, 257, 263, 269, 271, 277, 281, 283, 293, 307,
    311, 313, 317, 331, 337, 347, 349, 353, 359, 367, 373, 379, 383, 389, 397, 401, 409, 419, 421,
    431, 433, 439, 443, 449, 457, 461, 463, 467, 479, 487, 491, 499, 503, 509, 521, 523, 541, 547,
    557, 563, 569, 571, 577, 587, 593, 599,
];

/// Odd candidates examined from one random starting point.
const SEARCH_WINDOW: usize = 8192;

/// Random starting points tried before giving up.
pub const MAX_RESTARTS: usize = 64;

/// Smallest prime size accepted; keeps every candidate above the sieve range.
pub const MIN_PRIME_BITS: usize = 16;

/// Returns a probable prime of exactly `bits` bits whose two top bits are set.
///
/// Setting the second bit guarantees that the product of two such primes has
/// exactly `2 · bits` bits.
///
/// # Errors
///
/// [`Error::InvalidSecurityParameter`] if `bits < MIN_PRIME_BITS`, and
/// [`Error::GenerationExhausted`] if no prime turns up within
/// `MAX_RESTARTS · SEARCH_WINDOW` candidates.
pub fn random_prime<R: RngCore + CryptoRng + ?Sized>(bits: usize, rng: &mut R) -> Result<BigUint> {
    if bits < MIN_PRIME_BITS {
        return Err(Error::InvalidSecurityParameter {
            min: MIN_PRIME_BITS,
            actual: bits,
        });
    }

    let rounds = miller_rabin_rounds(bits);

    for restart in 0..MAX_RESTARTS {
        let mut candidate = generate_candidate(bits, rng);

        for step in 0..SEARCH_WINDOW {
            // walked past 2^bits
            if candidate.bits() != bits {
                break;
            }

            if !divisible_by_small_prime(&candidate) && probably_prime(&candidate, rounds) {
                debug!(
                    "found {}-bit prime after {} restarts and {} steps",
                    bits, restart, step
                );
                return Ok(candidate);
            }

            candidate += 2u32;
        }
    }

    Err(Error::GenerationExhausted {
        attempts: MAX_RESTARTS,
    })
}

/// Random odd value with bits `bits - 1` and `bits - 2` set.
#[inline]
fn generate_candidate<R: RngCore + CryptoRng + ?Sized>(bits: usize, rng: &mut R) -> BigUint {
    let mut candidate = rng.gen_biguint(bits);

    candidate |= BigUint::one() << (bits - 1);
    candidate |= BigUint::one() << (bits - 2);
    candidate |= BigUint::one();

    candidate
}

/// Returns true if `n` is divisible by one of [`SIEVE_PRIMES`].
#[inline]
fn divisible_by_small_prime(n: &BigUint) -> bool {
    SIEVE_PRIMES.iter().any(|&prime| (n % prime).is_zero())
}

/// Miller-Rabin rounds per candidate size, targeting an error probability
/// below 2^-128 (FIPS 186-4, Table C.1).
#[inline]
const fn miller_rabin_rounds(bits: usize) -> usize {
    match bits {
        0..=256 => 40,
        257..=512 => 15,
        513..=1024 => 10,
        1025..=2048 => 6,
        _ => 4,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::OsRng;

    #[test]
    fn generates_prime_of_exact_length() {
        for bits in [16usize, 64, 256] {
            let p = random_prime(bits, &mut OsRng).unwrap();

            assert_eq!(p.bits(), bits, "wrong bit length");
            assert!(probably_prime(&p, 20), "{p} is not prime");
            // second-highest bit set
            assert!(!(&p >> (bits - 2) & BigUint::one()).is_zero());
        }
    }

    #[test]
    fn product_of_two_primes_has_double_length() {
        let p = random_prime(128, &mut OsRng).unwrap();
        let q = random_prime(128, &mut OsRng).unwrap();
        assert_eq!((&p * &q).bits(), 256);
    }

    #[test]
    fn rejects_small_bit_lengths() {
        assert!(matches!(
            random_prime(8, &mut OsRng),
            Err(Error::InvalidSecurityParameter { min: MIN_PRIME_BITS, actual: 8 })
        ));
    }

    #[test]
    fn generated_primes_are_distinct() {
        let p1 = random_prime(256, &mut OsRng).unwrap();
        let p2 = random_prime(256, &mut OsRng).unwrap();
        assert_ne!(p1, p2, "Should generate different primes");
    }

    #[test]
    fn sieve_rejects_small_multiples() {
        assert!(divisible_by_small_prime(&BigUint::from(599u32 * 601)));
        assert!(!divisible_by_small_prime(&BigUint::from(65_537u32)));
    }

    #[test]
    #[ignore] // slow in debug builds
    fn generates_1024_bit_prime() {
        let p = random_prime(1024, &mut OsRng).unwrap();
        assert_eq!(p.bits(), 1024);
    }
}
