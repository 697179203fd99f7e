// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! String-typed request routing for hosts that speak JSON.
//!
//! Keys travel as hex blobs, ciphertexts as fixed-width hex and plaintexts as
//! decimal strings. Every call is a pure function of its arguments and the
//! dispatcher's [`Config`].

mod params;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use log::{debug, warn};
use num_bigint_dig::BigUint;
use num_traits::Num;
use serde::de::DeserializeOwned;

use crate::ciphertext::Ciphertext;
use crate::commitment::check_commitment;
use crate::config::Config;
use crate::error::Error;
use crate::keypair::{PrivateKey, PublicKey};
use crate::paillier::Paillier;
use crate::plaintext::Plaintext;

pub use params::FuncCaller;
use params::{DecParams, EncParams, ExpParams, KeyGenParams, MulParams};

/// The only method name accepted by [`Dispatcher::submit`].
pub const METHOD: &str = "paillier";

/// Flat string map returned by every operation.
pub type Outputs = BTreeMap<String, String>;

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("Argument decoding failed: {0}")]
    ArgumentDecode(String),

    #[error("Paillier dispatch is disabled")]
    Disabled,

    #[error("Commitment rejected for {field}")]
    CommitmentRejected { field: &'static str },

    #[error("Result encoding failed: {0}")]
    Encode(String),

    #[error(transparent)]
    Crypto(#[from] Error),
}

/// Operations reachable through the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    KeyGen,
    Encrypt,
    Decrypt,
    /// Homomorphic addition of two ciphertexts.
    Mul,
    /// Homomorphic scaling of a ciphertext.
    Exp,
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::KeyGen => "KeyGen",
            Operation::Encrypt => "PaillierEnc",
            Operation::Decrypt => "PaillierDec",
            Operation::Mul => "PaillierMul",
            Operation::Exp => "PaillierExp",
        }
    }
}

impl FromStr for Operation {
    type Err = DispatchError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "KeyGen" | "PaillierKeyGen" => Ok(Operation::KeyGen),
            "PaillierEnc" => Ok(Operation::Encrypt),
            "PaillierDec" => Ok(Operation::Decrypt),
            "PaillierMul" => Ok(Operation::Mul),
            "PaillierExp" => Ok(Operation::Exp),
            other => Err(DispatchError::UnsupportedOperation(other.to_string())),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn parse_args<T: DeserializeOwned>(args: &str) -> Result<T, DispatchError> {
    let args = if args.trim().is_empty() { "{}" } else { args };
    serde_json::from_str(args).map_err(|e| DispatchError::ArgumentDecode(e.to_string()))
}

/// Unparseable argument fields become `ArgumentDecode`; everything else
/// stays a cryptosystem error.
fn argument_error(err: Error) -> DispatchError {
    match err {
        Error::PlaintextDecode(msg) | Error::KeyDecode(msg) | Error::CiphertextDecode(msg) => {
            DispatchError::ArgumentDecode(msg)
        }
        other => DispatchError::Crypto(other),
    }
}

fn single(key: &str, value: String) -> Outputs {
    let mut outputs = Outputs::new();
    outputs.insert(key.to_string(), value);
    outputs
}

/// Routes Paillier requests to the cryptosystem.
#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    config: Config,
}

impl Dispatcher {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Handle a JSON [`FuncCaller`] envelope and return the JSON-encoded
    /// result map.
    pub fn submit(&self, method: &str, inputs: &str) -> Result<String, DispatchError> {
        if method != METHOD {
            return Err(DispatchError::UnsupportedOperation(method.to_string()));
        }

        let caller: FuncCaller = serde_json::from_str(inputs)
            .map_err(|e| DispatchError::ArgumentDecode(e.to_string()))?;
        let operation = caller.method.parse::<Operation>()?;

        let outputs = self.call(operation, &caller.args, &caller.address)?;
        serde_json::to_string(&outputs).map_err(|e| DispatchError::Encode(e.to_string()))
    }

    /// Run `operation` with its JSON `args` on behalf of `identity`.
    pub fn call(
        &self,
        operation: Operation,
        args: &str,
        identity: &str,
    ) -> Result<Outputs, DispatchError> {
        if !self.config.enable {
            return Err(DispatchError::Disabled);
        }

        debug!("dispatching {} for {:?}", operation, identity);

        match operation {
            Operation::KeyGen => self.key_gen(parse_args(args)?),
            Operation::Encrypt => self.encrypt(parse_args(args)?),
            Operation::Decrypt => self.decrypt(parse_args(args)?),
            Operation::Mul => self.mul(parse_args(args)?, identity),
            Operation::Exp => self.exp(parse_args(args)?, identity),
        }
    }

    fn key_gen(&self, params: KeyGenParams) -> Result<Outputs, DispatchError> {
        let bits = params.secbit.unwrap_or(self.config.default_secbit);
        let (public, secret) = Paillier::keygen(bits)?;

        let mut outputs = Outputs::new();
        outputs.insert("privateKey".into(), secret.to_hex());
        outputs.insert("publicKey".into(), public.to_hex());
        Ok(outputs)
    }

    fn encrypt(&self, params: EncParams) -> Result<Outputs, DispatchError> {
        let public = PublicKey::from_hex(&params.public_key).map_err(argument_error)?;
        let message = params.message.parse::<Plaintext>().map_err(argument_error)?;

        let ciphertext = Paillier::encrypt(&message, &public)?;
        Ok(single("ciphertext", ciphertext.to_hex(&public)))
    }

    fn decrypt(&self, params: DecParams) -> Result<Outputs, DispatchError> {
        let public = PublicKey::from_hex(&params.public_key).map_err(argument_error)?;
        let secret = PrivateKey::from_hex(&params.private_key).map_err(argument_error)?;
        let ciphertext = Ciphertext::from_hex(&params.ciphertext).map_err(argument_error)?;

        let plaintext = Paillier::decrypt(&ciphertext, &public, &secret)?;
        Ok(single("plaintext", plaintext.to_string()))
    }

    fn mul(&self, params: MulParams, identity: &str) -> Result<Outputs, DispatchError> {
        self.check_commitment(
            "commitment1",
            &params.ciphertext1,
            params.commitment1.as_deref(),
            identity,
        )?;
        self.check_commitment(
            "commitment2",
            &params.ciphertext2,
            params.commitment2.as_deref(),
            identity,
        )?;

        let public = PublicKey::from_hex(&params.public_key).map_err(argument_error)?;
        let c1 = Ciphertext::from_hex(&params.ciphertext1).map_err(argument_error)?;
        let c2 = Ciphertext::from_hex(&params.ciphertext2).map_err(argument_error)?;

        let sum = Paillier::homomorphic_add(&public, &c1, &c2)?;
        Ok(single("ciphertext", sum.to_hex(&public)))
    }

    fn exp(&self, params: ExpParams, identity: &str) -> Result<Outputs, DispatchError> {
        self.check_commitment(
            "commitment",
            &params.ciphertext,
            params.commitment.as_deref(),
            identity,
        )?;

        let scalar = BigUint::from_str_radix(params.scalar.trim(), 10)
            .map_err(|_| DispatchError::ArgumentDecode(format!("invalid scalar {:?}", params.scalar)))?;

        let public = PublicKey::from_hex(&params.public_key).map_err(argument_error)?;
        let ciphertext = Ciphertext::from_hex(&params.ciphertext).map_err(argument_error)?;

        let scaled = Paillier::homomorphic_scale(&public, &ciphertext, &scalar)?;
        Ok(single("ciphertext", scaled.to_hex(&public)))
    }

    fn check_commitment(
        &self,
        field: &'static str,
        ciphertext_hex: &str,
        token: Option<&str>,
        identity: &str,
    ) -> Result<(), DispatchError> {
        match token {
            Some(token) if check_commitment(ciphertext_hex, identity, token) => Ok(()),
            Some(_) => {
                warn!("{} does not bind the ciphertext to {:?}", field, identity);
                Err(DispatchError::CommitmentRejected { field })
            }
            None if self.config.require_commitment => {
                warn!("{} missing for {:?}", field, identity);
                Err(DispatchError::CommitmentRejected { field })
            }
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commitment::{commit_hex, generate_signing_key};
    use crate::test_support::keypair;

    fn keys() -> (String, String) {
        let keypair = keypair();
        (keypair.public_key().to_hex(), keypair.private_key().to_hex())
    }

    fn envelope(method: &str, args: serde_json::Value, address: &str) -> String {
        serde_json::to_string(&FuncCaller {
            method: method.into(),
            args: args.to_string(),
            address: address.into(),
            ..FuncCaller::default()
        })
        .unwrap()
    }

    fn encrypt(dispatcher: &Dispatcher, public: &str, message: &str) -> String {
        let args = serde_json::json!({ "message": message, "publicKey": public });
        let out = dispatcher.call(Operation::Encrypt, &args.to_string(), "alice").unwrap();
        out["ciphertext"].clone()
    }

    fn decrypt(dispatcher: &Dispatcher, public: &str, secret: &str, ciphertext: &str) -> String {
        let args = serde_json::json!({
            "ciphertext": ciphertext,
            "publicKey": public,
            "privateKey": secret,
        });
        let out = dispatcher.call(Operation::Decrypt, &args.to_string(), "alice").unwrap();
        out["plaintext"].clone()
    }

    #[test]
    fn operation_names_parse() {
        assert_eq!("KeyGen".parse::<Operation>().unwrap(), Operation::KeyGen);
        assert_eq!("PaillierKeyGen".parse::<Operation>().unwrap(), Operation::KeyGen);
        assert_eq!("PaillierExp".parse::<Operation>().unwrap(), Operation::Exp);
        assert!(matches!(
            "PaillierDiv".parse::<Operation>(),
            Err(DispatchError::UnsupportedOperation(_))
        ));
    }

    #[test]
    fn submit_full_flow() {
        let dispatcher = Dispatcher::default();
        let (public, secret) = keys();

        let c15 = encrypt(&dispatcher, &public, "15");
        let c20 = encrypt(&dispatcher, &public, "20");
        assert_eq!(c15.len(), keypair().public_key().ciphertext_bytes() * 2);

        let inputs = envelope(
            "PaillierMul",
            serde_json::json!({ "publicKey": public, "ciphertext1": c15, "ciphertext2": c20 }),
            "alice",
        );
        let response = dispatcher.submit(METHOD, &inputs).unwrap();
        let outputs: Outputs = serde_json::from_str(&response).unwrap();
        assert_eq!(decrypt(&dispatcher, &public, &secret, &outputs["ciphertext"]), "35");

        let inputs = envelope(
            "PaillierExp",
            serde_json::json!({ "publicKey": public, "ciphertext": c15, "scalar": "2" }),
            "alice",
        );
        let response = dispatcher.submit(METHOD, &inputs).unwrap();
        let outputs: Outputs = serde_json::from_str(&response).unwrap();
        assert_eq!(decrypt(&dispatcher, &public, &secret, &outputs["ciphertext"]), "30");
    }

    #[test]
    fn keygen_returns_hex_blobs() {
        let dispatcher = Dispatcher::default();
        let out = dispatcher
            .call(Operation::KeyGen, r#"{"secbit":1024}"#, "alice")
            .unwrap();

        let public = PublicKey::from_hex(&out["publicKey"]).unwrap();
        let secret = PrivateKey::from_hex(&out["privateKey"]).unwrap();
        assert_eq!(public.bit_length(), 1024);
        assert!(secret.matches(&public));
    }

    #[test]
    fn keygen_rejects_weak_secbit() {
        let err = Dispatcher::default()
            .call(Operation::KeyGen, r#"{"secbit":512}"#, "alice")
            .unwrap_err();
        assert!(matches!(
            err,
            DispatchError::Crypto(Error::InvalidSecurityParameter { actual: 512, .. })
        ));
    }

    #[test]
    fn submit_rejects_wrong_method() {
        let err = Dispatcher::default().submit("rsa", "{}").unwrap_err();
        assert_eq!(err, DispatchError::UnsupportedOperation("rsa".into()));
    }

    #[test]
    fn submit_rejects_unknown_operation() {
        let inputs = envelope("PaillierDiv", serde_json::json!({}), "alice");
        let err = Dispatcher::default().submit(METHOD, &inputs).unwrap_err();
        assert_eq!(err, DispatchError::UnsupportedOperation("PaillierDiv".into()));
    }

    #[test]
    fn submit_rejects_bad_json() {
        let dispatcher = Dispatcher::default();
        assert!(matches!(
            dispatcher.submit(METHOD, "not json"),
            Err(DispatchError::ArgumentDecode(_))
        ));

        let inputs = serde_json::to_string(&FuncCaller {
            method: "PaillierEnc".into(),
            args: "{".into(),
            ..FuncCaller::default()
        })
        .unwrap();
        assert!(matches!(
            dispatcher.submit(METHOD, &inputs),
            Err(DispatchError::ArgumentDecode(_))
        ));
    }

    #[test]
    fn disabled_dispatcher_refuses_calls() {
        let dispatcher = Dispatcher::new(Config {
            enable: false,
            ..Config::default()
        });
        assert_eq!(
            dispatcher.call(Operation::KeyGen, "", "alice"),
            Err(DispatchError::Disabled)
        );
    }

    #[test]
    fn encrypt_rejects_out_of_range_message() {
        let dispatcher = Dispatcher::default();
        let (public, _) = keys();

        let n = keypair().public_key().n().to_string();
        let args = serde_json::json!({ "message": n, "publicKey": public });
        assert_eq!(
            dispatcher.call(Operation::Encrypt, &args.to_string(), "alice"),
            Err(DispatchError::Crypto(Error::PlaintextOutOfRange))
        );
    }

    #[test]
    fn exp_rejects_invalid_scalar() {
        let dispatcher = Dispatcher::default();
        let (public, _) = keys();
        let c = encrypt(&dispatcher, &public, "3");

        for scalar in ["-2", "two", ""] {
            let args = serde_json::json!({ "publicKey": public, "ciphertext": c, "scalar": scalar });
            assert!(matches!(
                dispatcher.call(Operation::Exp, &args.to_string(), "alice"),
                Err(DispatchError::ArgumentDecode(_))
            ));
        }
    }

    #[test]
    fn matching_commitments_are_accepted() {
        let dispatcher = Dispatcher::new(Config {
            require_commitment: true,
            ..Config::default()
        });
        let (public, secret) = keys();
        let signing_key = generate_signing_key();

        let c1 = encrypt(&dispatcher, &public, "4");
        let c2 = encrypt(&dispatcher, &public, "5");
        let args = serde_json::json!({
            "publicKey": public,
            "ciphertext1": c1,
            "ciphertext2": c2,
            "commitment1": commit_hex(&signing_key, &c1, "alice").unwrap(),
            "commitment2": commit_hex(&signing_key, &c2, "alice").unwrap(),
        });

        let out = dispatcher.call(Operation::Mul, &args.to_string(), "alice").unwrap();
        assert_eq!(decrypt(&dispatcher, &public, &secret, &out["ciphertext"]), "9");
    }

    #[test]
    fn commitment_for_other_identity_is_rejected() {
        let dispatcher = Dispatcher::default();
        let (public, _) = keys();
        let signing_key = generate_signing_key();

        let c = encrypt(&dispatcher, &public, "4");
        let args = serde_json::json!({
            "publicKey": public,
            "ciphertext": c,
            "scalar": "3",
            "commitment": commit_hex(&signing_key, &c, "mallory").unwrap(),
        });

        assert_eq!(
            dispatcher.call(Operation::Exp, &args.to_string(), "alice"),
            Err(DispatchError::CommitmentRejected { field: "commitment" })
        );
    }

    #[test]
    fn commitment_over_other_ciphertext_is_rejected() {
        let dispatcher = Dispatcher::default();
        let (public, _) = keys();
        let signing_key = generate_signing_key();

        let c1 = encrypt(&dispatcher, &public, "4");
        let c2 = encrypt(&dispatcher, &public, "5");
        let args = serde_json::json!({
            "publicKey": public,
            "ciphertext1": c1,
            "ciphertext2": c2,
            "commitment2": commit_hex(&signing_key, &c1, "alice").unwrap(),
        });

        assert_eq!(
            dispatcher.call(Operation::Mul, &args.to_string(), "alice"),
            Err(DispatchError::CommitmentRejected { field: "commitment2" })
        );
    }

    #[test]
    fn required_commitment_must_be_present() {
        let dispatcher = Dispatcher::new(Config {
            require_commitment: true,
            ..Config::default()
        });
        let (public, _) = keys();

        let c = encrypt(&dispatcher, &public, "4");
        let args = serde_json::json!({ "publicKey": public, "ciphertext": c, "scalar": "3" });

        assert_eq!(
            dispatcher.call(Operation::Exp, &args.to_string(), "alice"),
            Err(DispatchError::CommitmentRejected { field: "commitment" })
        );
    }

    #[test]
    fn decrypt_rejects_mismatched_keys() {
        let dispatcher = Dispatcher::default();
        let (public, _) = keys();
        let foreign = PrivateKey::new(
            keypair().public_key().n() + 2u32,
            BigUint::from(80u32),
            BigUint::from(5u32),
        )
        .unwrap()
        .to_hex();

        let c = encrypt(&dispatcher, &public, "4");
        let args = serde_json::json!({ "ciphertext": c, "publicKey": public, "privateKey": foreign });
        assert_eq!(
            dispatcher.call(Operation::Decrypt, &args.to_string(), "alice"),
            Err(DispatchError::Crypto(Error::KeyMismatch))
        );
    }

    #[test]
    fn unparseable_fields_are_argument_errors() {
        let dispatcher = Dispatcher::default();
        let (public, secret) = keys();
        let c = encrypt(&dispatcher, &public, "4");

        let cases = [
            (Operation::Encrypt, serde_json::json!({ "message": "fifteen", "publicKey": public })),
            (Operation::Encrypt, serde_json::json!({ "message": "15", "publicKey": "zz" })),
            (
                Operation::Decrypt,
                serde_json::json!({ "ciphertext": "not hex", "publicKey": public, "privateKey": secret }),
            ),
            (
                Operation::Decrypt,
                serde_json::json!({ "ciphertext": c, "publicKey": public, "privateKey": "zz" }),
            ),
            (
                Operation::Mul,
                serde_json::json!({ "publicKey": public, "ciphertext1": c, "ciphertext2": "xyz" }),
            ),
            (
                Operation::Exp,
                serde_json::json!({ "publicKey": public, "ciphertext": "", "scalar": "2" }),
            ),
        ];

        for (operation, args) in cases {
            assert!(
                matches!(
                    dispatcher.call(operation, &args.to_string(), "alice"),
                    Err(DispatchError::ArgumentDecode(_))
                ),
                "{operation}: {args}"
            );
        }
    }

    #[test]
    fn negative_message_stays_out_of_range() {
        let dispatcher = Dispatcher::default();
        let (public, _) = keys();

        let args = serde_json::json!({ "message": "-1", "publicKey": public });
        assert_eq!(
            dispatcher.call(Operation::Encrypt, &args.to_string(), "alice"),
            Err(DispatchError::Crypto(Error::PlaintextOutOfRange))
        );
    }
}
