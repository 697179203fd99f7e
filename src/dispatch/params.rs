// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! JSON shapes accepted at the dispatch boundary.
//!
//! Argument objects use camelCase keys; snake_case spellings are accepted as
//! aliases.

use serde::{Deserialize, Serialize};

/// Request envelope passed to [`super::Dispatcher::submit`].
///
/// `args` is itself a JSON document, decoded according to `method`.
/// `public_key` and `signature` are carried for the host but not checked here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuncCaller {
    pub method: String,
    #[serde(default)]
    pub args: String,
    /// Caller identity; commitments are checked against it.
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub public_key: String,
    #[serde(default)]
    pub signature: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct KeyGenParams {
    #[serde(default)]
    pub secbit: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EncParams {
    pub message: String,
    #[serde(alias = "public_key")]
    pub public_key: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DecParams {
    pub ciphertext: String,
    #[serde(alias = "public_key")]
    pub public_key: String,
    #[serde(alias = "private_key")]
    pub private_key: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MulParams {
    #[serde(alias = "public_key")]
    pub public_key: String,
    pub ciphertext1: String,
    pub ciphertext2: String,
    #[serde(default)]
    pub commitment1: Option<String>,
    #[serde(default)]
    pub commitment2: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ExpParams {
    #[serde(alias = "public_key")]
    pub public_key: String,
    pub ciphertext: String,
    pub scalar: String,
    #[serde(default)]
    pub commitment: Option<String>,
}
