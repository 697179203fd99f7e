// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt;
use std::str::FromStr;

use num_bigint_dig::{BigInt, BigUint};

use crate::error::{Error, Result};

/// An unsigned message in `Z_n`.
///
/// The upper bound depends on the key, so it is checked at encryption time;
/// construction only rules out negative values.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Plaintext {
    value: BigUint,
}

impl Plaintext {
    pub fn new(value: BigUint) -> Self {
        Self { value }
    }

    pub fn value(&self) -> &BigUint {
        &self.value
    }

    pub fn into_inner(self) -> BigUint {
        self.value
    }
}

impl From<BigUint> for Plaintext {
    fn from(value: BigUint) -> Self {
        Self::new(value)
    }
}

impl From<u64> for Plaintext {
    fn from(value: u64) -> Self {
        Self::new(BigUint::from(value))
    }
}

impl TryFrom<BigInt> for Plaintext {
    type Error = Error;

    fn try_from(value: BigInt) -> Result<Self> {
        value.to_biguint().map(Self::new).ok_or(Error::PlaintextOutOfRange)
    }
}

/// Parses a decimal integer. Negative values are out of range.
impl FromStr for Plaintext {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let value = BigInt::from_str(s.trim()).map_err(|e| Error::PlaintextDecode(e.to_string()))?;
        Self::try_from(value)
    }
}

impl fmt::Display for Plaintext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}
