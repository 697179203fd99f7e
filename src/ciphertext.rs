// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::ops::Deref;

use num_bigint_dig::BigUint;

use crate::error::{Error, Result};
use crate::keypair::PublicKey;

/// An encrypted integer in `Z_{n²}`.
///
/// A ciphertext does not record which key produced it; pairing it with the
/// right [`PublicKey`] is the caller's responsibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ciphertext {
    value: BigUint,
}

impl Ciphertext {
    pub fn new(value: BigUint) -> Self {
        Self { value }
    }

    pub fn value(&self) -> &BigUint {
        &self.value
    }

    /// Minimal big-endian bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.value.to_bytes_be()
    }

    /// Big-endian bytes left-padded to `width`.
    ///
    /// Values wider than `width` (never produced by this crate's operations)
    /// are returned unpadded rather than truncated.
    pub fn to_bytes_padded(&self, width: usize) -> Vec<u8> {
        let bytes = self.value.to_bytes_be();
        if bytes.len() >= width {
            return bytes;
        }

        let mut padded = vec![0u8; width - bytes.len()];
        padded.extend_from_slice(&bytes);
        padded
    }

    /// Fixed-width hex encoding sized to `n²` of `public_key`.
    pub fn to_hex(&self, public_key: &PublicKey) -> String {
        hex::encode(self.to_bytes_padded(public_key.ciphertext_bytes()))
    }

    /// Parse a hex-encoded ciphertext. Leading zero bytes are accepted.
    pub fn from_hex(encoded: &str) -> Result<Self> {
        let encoded = encoded.trim();
        if encoded.is_empty() {
            return Err(Error::CiphertextDecode("empty ciphertext".into()));
        }

        let bytes = hex::decode(encoded).map_err(|e| Error::CiphertextDecode(e.to_string()))?;
        Ok(Self::from(bytes))
    }
}

impl Deref for Ciphertext {
    type Target = BigUint;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl<T> From<T> for Ciphertext
where
    T: AsRef<[u8]>,
{
    fn from(data: T) -> Self {
        Self {
            value: BigUint::from_bytes_be(data.as_ref()),
        }
    }
}
