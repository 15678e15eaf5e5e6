use crate::error::PositionError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Opaque 32-byte ledger address (mint, pair, position or owner).
///
/// Displayed and serialized as base58.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address([u8; 32]);

impl Address {
    /// Creates an address from raw bytes.
    #[must_use]
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the raw bytes.
    #[must_use]
    pub const fn to_bytes(&self) -> [u8; 32] {
        self.0
    }
}

impl FromStr for Address {
    type Err = PositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = bs58::decode(s)
            .into_vec()
            .map_err(|e| PositionError::InvalidAddress(format!("{s}: {e}")))?;
        let bytes: [u8; 32] = bytes
            .try_into()
            .map_err(|v: Vec<u8>| {
                PositionError::InvalidAddress(format!("{s}: expected 32 bytes, got {}", v.len()))
            })?;
        Ok(Self(bytes))
    }
}

impl TryFrom<String> for Address {
    type Error = PositionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.to_string()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", bs58::encode(self.0).into_string())
    }
}
