//! Address - Hash-derived identity of a balance-holding party
//!
//! Accounts, shares, staking pools and the bank itself all hold balances
//! at an `Address`. Addresses are SHA-256 digests over a namespaced,
//! length-prefixed encoding of the party's business identity, which makes
//! them stable, collision-resistant directory keys.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur when parsing addresses
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("invalid address hex: {0}")]
    InvalidHex(String),

    #[error("address must be 32 bytes, got {0}")]
    InvalidLength(usize),
}

/// Opaque 32-byte identity, rendered as lowercase hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address([u8; 32]);

impl Address {
    /// Derive an address from a namespace and the identity parts.
    ///
    /// Each part is length-prefixed before hashing, so ("ab", "c") and
    /// ("a", "bc") produce distinct addresses.
    pub fn derive(namespace: &str, parts: &[&str]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(namespace.as_bytes());
        for part in parts {
            hasher.update((part.len() as u64).to_be_bytes());
            hasher.update(part.as_bytes());
        }
        Self(hasher.finalize().into())
    }

    /// Get the raw digest bytes
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s).map_err(|_| AddressError::InvalidHex(s.to_string()))?;
        let digest: [u8; 32] = bytes
            .try_into()
            .map_err(|rest: Vec<u8>| AddressError::InvalidLength(rest.len()))?;
        Ok(Self(digest))
    }
}

impl TryFrom<String> for Address {
    type Error = AddressError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.to_string()
    }
}
