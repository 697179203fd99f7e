// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Hex key blobs.
//!
//! Public key:  `[version][bit_length:u32][len][n][len][g]`
//! Private key: `[version][len][λ][len][μ][len][n]`

use super::{PrivateKey, PublicKey, MIN_SECURITY_BITS};
use crate::codec::{FrameError, Reader, Writer};
use crate::error::{Error, Result};

use num_bigint_dig::BigUint;
use zeroize::Zeroize;

fn key_decode(err: FrameError) -> Error {
    Error::KeyDecode(err.to_string())
}

fn decode_hex(blob: &str) -> Result<Vec<u8>> {
    hex::decode(blob.trim()).map_err(|e| Error::KeyDecode(e.to_string()))
}

impl PublicKey {
    /// Serialize into the framed binary form.
    pub fn to_bytes(&self) -> Vec<u8> {
        // PublicKey::new bounds bit_length to u32, so this never saturates.
        let bit_length = u32::try_from(self.bit_length).unwrap_or(u32::MAX);

        Writer::new()
            .put_u32(bit_length)
            .put_bytes(&self.n.to_bytes_be())
            .put_bytes(&self.g.to_bytes_be())
            .finish()
    }

    /// Parse the framed binary form and validate the recovered key.
    ///
    /// Keys below [`MIN_SECURITY_BITS`] are refused.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut reader = Reader::new(bytes).map_err(key_decode)?;
        let bit_length = reader.u32().map_err(key_decode)? as usize;
        let n = BigUint::from_bytes_be(reader.bytes().map_err(key_decode)?);
        let g = BigUint::from_bytes_be(reader.bytes().map_err(key_decode)?);
        reader.finish().map_err(key_decode)?;

        if bit_length < MIN_SECURITY_BITS {
            return Err(Error::InvalidPublicKey);
        }
        Self::new(n, g, bit_length)
    }

    /// Hex-encoded public key blob, as exchanged at the dispatch boundary.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    pub fn from_hex(blob: &str) -> Result<Self> {
        Self::from_bytes(&decode_hex(blob)?)
    }
}

impl PrivateKey {
    /// Serialize into the framed binary form.
    ///
    /// The returned buffer contains secret material; callers own its erasure.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut lambda = self.lambda.to_bytes_be();
        let mut mu = self.mu.to_bytes_be();

        let packed = Writer::new()
            .put_bytes(&lambda)
            .put_bytes(&mu)
            .put_bytes(&self.n.to_bytes_be())
            .finish();

        lambda.zeroize();
        mu.zeroize();
        packed
    }

    /// Parse the framed binary form and validate the recovered key.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut reader = Reader::new(bytes).map_err(key_decode)?;
        let lambda = BigUint::from_bytes_be(reader.bytes().map_err(key_decode)?);
        let mu = BigUint::from_bytes_be(reader.bytes().map_err(key_decode)?);
        let n = BigUint::from_bytes_be(reader.bytes().map_err(key_decode)?);
        reader.finish().map_err(key_decode)?;

        if n.bits() < MIN_SECURITY_BITS {
            return Err(Error::InvalidPrivateKey);
        }
        Self::new(n, lambda, mu)
    }

    /// Hex-encoded private key blob.
    pub fn to_hex(&self) -> String {
        let mut bytes = self.to_bytes();
        let blob = hex::encode(&bytes);
        bytes.zeroize();
        blob
    }

    pub fn from_hex(blob: &str) -> Result<Self> {
        let mut bytes = decode_hex(blob)?;
        let key = Self::from_bytes(&bytes);
        bytes.zeroize();
        key
    }
}
