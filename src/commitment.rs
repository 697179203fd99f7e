// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Signed commitments binding a ciphertext to the identity that submitted it.
//!
//! A commitment is an ECDSA P-256 signature over a domain-separated SHA-256
//! hash of `(ciphertext, identity)`, bundled with the signer's uncompressed
//! public key so it can be checked without a separate key lookup.
//!
//! Token layout (base64, standard alphabet, no padding):
//! `[SEC1 uncompressed public key: 65 bytes][DER signature]`
//!
//! The embedded key is not tied to any identity registry. Callers that need
//! "this key belongs to this identity" must check [`Commitment::signer`]
//! themselves. Commitments carry no nonce, so a captured token stays valid
//! for the same `(ciphertext, identity)` pair indefinitely.

use base64::engine::general_purpose::STANDARD_NO_PAD;
use base64::Engine as _;
use log::debug;
use p256::ecdsa::signature::hazmat::{PrehashVerifier, RandomizedPrehashSigner};
use p256::ecdsa::Signature;
pub use p256::ecdsa::{SigningKey, VerifyingKey};
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};

use crate::error::{Error, Result};

/// Length of an uncompressed SEC1 P-256 point.
const PUBLIC_KEY_LEN: usize = 65;

/// Prefix of every hashed commitment message.
const DOMAIN_TAG: &[u8] = b"paillier-commit/ciphertext-identity/v1";

/// A verified-on-demand binding of a ciphertext to an identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commitment {
    signer: VerifyingKey,
    signature: Signature,
}

impl Commitment {
    /// Sign `(ciphertext, identity)` with `signing_key`.
    ///
    /// ECDSA nonces mix in fresh randomness, so two commitments over the same
    /// inputs differ byte-wise while both verify.
    pub fn commit(signing_key: &SigningKey, ciphertext: &[u8], identity: &str) -> Result<Self> {
        let digest = domain_hash(ciphertext, identity);
        let signature: Signature = signing_key
            .sign_prehash_with_rng(&mut OsRng, &digest)
            .map_err(|e| Error::Signing(e.to_string()))?;

        Ok(Self {
            signer: VerifyingKey::from(signing_key),
            signature,
        })
    }

    /// Check the signature against the embedded key for exactly this
    /// `(ciphertext, identity)` pair.
    pub fn verify(&self, ciphertext: &[u8], identity: &str) -> bool {
        let digest = domain_hash(ciphertext, identity);
        match self.signer.verify_prehash(&digest, &self.signature) {
            Ok(()) => true,
            Err(_) => {
                debug!("commitment signature mismatch for identity {:?}", identity);
                false
            }
        }
    }

    /// The key the commitment was signed with.
    pub fn signer(&self) -> &VerifyingKey {
        &self.signer
    }

    /// Encode into the opaque base64 token.
    pub fn encode(&self) -> String {
        let point = self.signer.to_encoded_point(false);
        let der = self.signature.to_der();

        let mut raw = Vec::with_capacity(PUBLIC_KEY_LEN + der.as_bytes().len());
        raw.extend_from_slice(point.as_bytes());
        raw.extend_from_slice(der.as_bytes());

        STANDARD_NO_PAD.encode(raw)
    }

    /// Decode a token produced by [`Commitment::encode`].
    pub fn decode(token: &str) -> Result<Self> {
        let raw = STANDARD_NO_PAD
            .decode(token.trim())
            .map_err(|e| Error::CommitmentDecode(e.to_string()))?;

        if raw.len() <= PUBLIC_KEY_LEN {
            return Err(Error::CommitmentDecode(format!(
                "token too short: {} bytes",
                raw.len()
            )));
        }

        let (point, der) = raw.split_at(PUBLIC_KEY_LEN);
        let signer = VerifyingKey::from_sec1_bytes(point)
            .map_err(|_| Error::CommitmentDecode("invalid public key".into()))?;
        let signature = Signature::from_der(der)
            .map_err(|_| Error::CommitmentDecode("invalid signature encoding".into()))?;

        Ok(Self { signer, signature })
    }
}

/// SHA-256 over the domain tag and the length-framed inputs.
///
/// Length framing keeps `("ab", "c")` and `("a", "bc")` apart.
fn domain_hash(ciphertext: &[u8], identity: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(DOMAIN_TAG);
    hasher.update((ciphertext.len() as u64).to_be_bytes());
    hasher.update(ciphertext);
    hasher.update((identity.len() as u64).to_be_bytes());
    hasher.update(identity.as_bytes());
    hasher.finalize().into()
}

/// Produce a commitment token over a hex-encoded ciphertext.
///
/// The hashed material is the decoded ciphertext bytes, so the fixed-width
/// hex produced by [`crate::Ciphertext::to_hex`] must be used consistently.
pub fn commit_hex(signing_key: &SigningKey, ciphertext_hex: &str, identity: &str) -> Result<String> {
    let material =
        hex::decode(ciphertext_hex.trim()).map_err(|e| Error::CiphertextDecode(e.to_string()))?;
    Ok(Commitment::commit(signing_key, &material, identity)?.encode())
}

/// Verify a commitment token over a hex-encoded ciphertext.
///
/// Never fails: malformed hex, malformed tokens and bad signatures all
/// return `false`.
pub fn check_commitment(ciphertext_hex: &str, identity: &str, token: &str) -> bool {
    let material = match hex::decode(ciphertext_hex.trim()) {
        Ok(material) => material,
        Err(e) => {
            debug!("rejecting commitment: ciphertext is not hex ({})", e);
            return false;
        }
    };

    verify(&material, identity, token)
}

/// Decode `token` and check it against `(ciphertext, identity)`.
///
/// Returns `false` for malformed tokens as well as bad signatures.
pub fn verify(ciphertext: &[u8], identity: &str, token: &str) -> bool {
    match Commitment::decode(token) {
        Ok(commitment) => commitment.verify(ciphertext, identity),
        Err(e) => {
            debug!("rejecting commitment: {}", e);
            false
        }
    }
}

/// Generate a fresh P-256 signing key from the operating system's CSPRNG.
pub fn generate_signing_key() -> SigningKey {
    SigningKey::random(&mut OsRng)
}

/// Import a signing key from its hex-encoded 32-byte scalar.
pub fn signing_key_from_hex(encoded: &str) -> Result<SigningKey> {
    let bytes = hex::decode(encoded.trim()).map_err(|e| Error::KeyDecode(e.to_string()))?;
    SigningKey::from_slice(&bytes).map_err(|_| Error::KeyDecode("invalid P-256 scalar".into()))
}
