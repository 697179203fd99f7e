// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

mod encoding;

use crate::arith;
use crate::error::{Error, Result};

use log::{debug, warn};
use num_bigint_dig::BigUint;
use num_traits::{One, Zero};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Smallest modulus size accepted by key generation.
pub const MIN_SECURITY_BITS: usize = 1024;

/// Minimum recommended for production (NIST/ENISA standard).
pub const RECOMMENDED_SECURITY_BITS: usize = 2048;

/// Fresh `(p, q)` draws tried before key generation gives up.
const MAX_KEYGEN_ATTEMPTS: usize = 16;

/// Public parameters of the cryptosystem.
///
/// The modulus is `n = pq`. Plaintexts live in `Z_n`, ciphertexts in `Z_{n²}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    pub(crate) n: BigUint,
    pub(crate) g: BigUint,
    pub(crate) n_squared: BigUint,
    pub(crate) bit_length: usize,
}

impl PublicKey {
    /// Construct a public key from its components.
    ///
    /// `n` must have exactly `bit_length` bits, `bit_length` must fit the
    /// `u32` of the key blob, and `g` must be a non-zero element of `Z_{n²}`.
    pub fn new(n: BigUint, g: BigUint, bit_length: usize) -> Result<Self> {
        if n <= BigUint::one() || n.bits() != bit_length || u32::try_from(bit_length).is_err() {
            return Err(Error::InvalidPublicKey);
        }

        let n_squared = &n * &n;
        if g.is_zero() || g >= n_squared {
            return Err(Error::InvalidPublicKey);
        }

        Ok(Self { n, g, n_squared, bit_length })
    }

    /// Return the public modulus `n`.
    #[inline]
    pub fn n(&self) -> &BigUint {
        &self.n
    }

    /// Return the generator `g`.
    #[inline]
    pub fn g(&self) -> &BigUint {
        &self.g
    }

    /// Return `n²`, the ciphertext modulus.
    #[inline]
    pub fn n_squared(&self) -> &BigUint {
        &self.n_squared
    }

    /// Return the bit length of `n`, i.e. the security parameter the key was
    /// generated with.
    #[inline]
    pub fn bit_length(&self) -> usize {
        self.bit_length
    }

    /// Width of a serialized ciphertext: the byte length of `n²`.
    #[inline]
    pub fn ciphertext_bytes(&self) -> usize {
        (2 * self.bit_length + 7) / 8
    }

    /// `g^m mod n²`, using `(1 + n)^m = 1 + mn` for the standard generator.
    pub(crate) fn g_pow(&self, m: &BigUint) -> BigUint {
        if self.g == &self.n + 1u32 {
            (BigUint::one() + m * &self.n) % &self.n_squared
        } else {
            arith::mod_pow(&self.g, m, &self.n_squared)
        }
    }
}

/// Secret key material.
///
/// Holds the Carmichael value `λ = lcm(p-1, q-1)` and `μ = L(g^λ mod n²)⁻¹ mod n`
/// together with the modulus of the public key it belongs to. `λ` and `μ` are
/// zeroized on drop.
#[allow(missing_debug_implementations)]
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
#[cfg_attr(feature = "expose-secret", derive(Debug))]
pub struct PrivateKey {
    #[zeroize(skip)]
    pub(crate) n: BigUint,
    #[zeroize(skip)]
    pub(crate) n_squared: BigUint,
    pub(crate) lambda: BigUint,
    pub(crate) mu: BigUint,
}

impl PrivateKey {
    /// Construct a private key from its components.
    pub fn new(n: BigUint, lambda: BigUint, mu: BigUint) -> Result<Self> {
        if n <= BigUint::one() || lambda.is_zero() || mu.is_zero() || mu >= n {
            return Err(Error::InvalidPrivateKey);
        }

        let n_squared = &n * &n;
        Ok(Self { n, n_squared, lambda, mu })
    }

    /// Return the modulus of the matching public key.
    #[inline]
    pub fn n(&self) -> &BigUint {
        &self.n
    }

    /// Whether this key decrypts ciphertexts produced under `public_key`.
    #[inline]
    pub fn matches(&self, public_key: &PublicKey) -> bool {
        self.n == public_key.n
    }
}

/// A complete key pair consisting of public and private components.
#[allow(missing_debug_implementations)]
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "expose-secret", derive(Debug))]
pub struct KeyPair {
    public: PublicKey,
    secret: PrivateKey,
}

impl KeyPair {
    /// Generate a key pair with default parameters (2048-bit modulus).
    pub fn generate() -> Result<Self> {
        KeyPairBuilder::new().build()
    }

    /// Generate a key pair with a custom modulus size.
    pub fn generate_with_size(bit_length: usize) -> Result<Self> {
        KeyPairBuilder::new().bit_length(bit_length).build()
    }

    /// Return the public key.
    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }

    /// Return the private key.
    pub fn private_key(&self) -> &PrivateKey {
        &self.secret
    }

    /// Split the pair into its halves.
    pub fn into_parts(self) -> (PublicKey, PrivateKey) {
        (self.public, self.secret)
    }
}

/// Builder for generating key pairs with configurable parameters.
#[derive(Debug, Clone, Copy)]
pub struct KeyPairBuilder {
    bit_length: usize,
}

impl KeyPairBuilder {
    /// Create a builder with default parameters.
    pub fn new() -> Self {
        Self {
            bit_length: RECOMMENDED_SECURITY_BITS,
        }
    }

    /// Set the desired modulus bit length.
    pub fn bit_length(mut self, bits: usize) -> Self {
        self.bit_length = bits;
        self
    }

    /// Generate the key pair using the operating system's CSPRNG.
    pub fn build(self) -> Result<KeyPair> {
        self.build_with_rng(&mut OsRng)
    }

    /// Generate the key pair from the supplied randomness source.
    ///
    /// Draws two distinct primes of `bit_length / 2` bits with
    /// `gcd(pq, (p-1)(q-1)) = 1`, then sets `g = n + 1`,
    /// `λ = lcm(p-1, q-1)` and `μ = L(g^λ mod n²)⁻¹ mod n`.
    pub fn build_with_rng<R: RngCore + CryptoRng + ?Sized>(self, rng: &mut R) -> Result<KeyPair> {
        let bits = self.bit_length;
        if bits < MIN_SECURITY_BITS || bits % 2 != 0 {
            return Err(Error::InvalidSecurityParameter {
                min: MIN_SECURITY_BITS,
                actual: bits,
            });
        }

        if bits < RECOMMENDED_SECURITY_BITS {
            warn!(
                "{}-bit Paillier modulus is below the recommended {} bits",
                bits, RECOMMENDED_SECURITY_BITS
            );
        }

        let half = bits / 2;
        for attempt in 1..=MAX_KEYGEN_ATTEMPTS {
            let mut p = arith::random_prime(half, rng)?;
            let mut q = arith::random_prime(half, rng)?;

            if p == q {
                debug!("keygen attempt {}: p == q, resampling", attempt);
                continue;
            }

            let n = &p * &q;
            let mut p_minus_1 = &p - 1u32;
            let mut q_minus_1 = &q - 1u32;
            p.zeroize();
            q.zeroize();

            let coprime = arith::gcd(&n, &(&p_minus_1 * &q_minus_1)).is_one();
            let lambda = arith::lcm(&p_minus_1, &q_minus_1);
            p_minus_1.zeroize();
            q_minus_1.zeroize();

            if !coprime {
                debug!("keygen attempt {}: gcd(n, phi(n)) != 1, resampling", attempt);
                continue;
            }

            let g = &n + 1u32;
            let public = PublicKey::new(n, g, bits)?;

            let g_lambda = arith::mod_pow(public.g(), &lambda, public.n_squared());
            let mu = arith::mod_inverse(&arith::l_function(&g_lambda, public.n())?, public.n())?;
            let secret = PrivateKey::new(public.n().clone(), lambda, mu)?;

            debug!("generated {}-bit Paillier key pair after {} attempts", bits, attempt);
            return Ok(KeyPair { public, secret });
        }

        Err(Error::GenerationExhausted {
            attempts: MAX_KEYGEN_ATTEMPTS,
        })
    }
}

impl Default for KeyPairBuilder {
    fn default() -> Self {
        Self::new()
    }
}
