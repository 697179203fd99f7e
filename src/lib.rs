// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Paillier Cryptosystem with Ciphertext Commitments
//!
//! Probabilistic public-key encryption with additive homomorphism, based on
//! the decisional composite residuosity assumption over `Z*_{n²}`.
//!
//! Reference: [Paillier (1999), EUROCRYPT](https://link.springer.com/chapter/10.1007/3-540-48910-X_16)
//!
//! Ciphertexts can be bound to the identity that submitted them with a
//! P-256 ECDSA [`commitment`], and the whole surface is reachable through
//! a JSON [`dispatch`] layer.
//!
//! ## Security
//!
//! Keys below 1024 bits are refused and 2048 bits is the default. The
//! private key (λ, μ) is zeroized on drop, and decryption blinds λ with a
//! random multiple of the group exponent.
//!
//! ## Example
//!
//! ```rust,no_run
//! use paillier_commit::{Paillier, Plaintext};
//! use num_bigint_dig::BigUint;
//!
//! let (public, secret) = Paillier::keygen(2048).expect("key generation failed");
//!
//! let c1 = Paillier::encrypt(&Plaintext::from(15u64), &public).expect("encryption failed");
//! let c2 = Paillier::encrypt(&Plaintext::from(20u64), &public).expect("encryption failed");
//!
//! let sum = Paillier::homomorphic_add(&public, &c1, &c2).expect("addition failed");
//! let scaled = Paillier::homomorphic_scale(&public, &sum, &BigUint::from(2u32)).expect("scaling failed");
//!
//! let m = Paillier::decrypt(&scaled, &public, &secret).expect("decryption failed");
//! assert_eq!(m, Plaintext::from(70u64));
//! ```

pub mod arith;
mod ciphertext;
mod codec;
pub mod commitment;
pub mod config;
mod crypto;
pub mod dispatch;
mod error;
mod keypair;
mod paillier;
mod plaintext;

pub use ciphertext::*;
pub use commitment::Commitment;
pub use config::Config;
pub use crypto::*;
pub use dispatch::{DispatchError, Dispatcher};
pub use error::*;
pub use keypair::*;
pub use paillier::*;
pub use plaintext::*;
