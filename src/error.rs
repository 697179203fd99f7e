// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

/// Errors that can occur during cryptographic operations.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid security parameter: must be an even number of at least {min} bits, got {actual}")]
    InvalidSecurityParameter { min: usize, actual: usize },

    #[error("Plaintext is outside the message space [0, n)")]
    PlaintextOutOfRange,

    #[error("Ciphertext is outside the ciphertext space [0, n²)")]
    CiphertextOutOfRange,

    #[error("Ciphertext is not invertible modulo n²")]
    MalformedCiphertext,

    #[error("Value is not invertible for the given modulus")]
    NotInvertible,

    #[error("Prime generation exhausted its retry budget after {attempts} attempts")]
    GenerationExhausted { attempts: usize },

    #[error("Private key does not belong to the supplied public key")]
    KeyMismatch,

    #[error("Invalid public key")]
    InvalidPublicKey,

    #[error("Invalid private key")]
    InvalidPrivateKey,

    #[error("Key decoding failed: {0}")]
    KeyDecode(String),

    #[error("Plaintext decoding failed: {0}")]
    PlaintextDecode(String),

    #[error("Ciphertext decoding failed: {0}")]
    CiphertextDecode(String),

    #[error("Commitment decoding failed: {0}")]
    CommitmentDecode(String),

    #[error("Signing failed: {0}")]
    Signing(String),
}

pub type Result<T> = std::result::Result<T, Error>;
