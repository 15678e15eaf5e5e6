use crate::error::{PositionError, Result};
use crate::value_objects::Address;
use crate::value_objects::amount::MAX_DECIMALS;
use serde::{Deserialize, Serialize};

/// A token mint and the decimals used to scale its raw amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenInfo {
    pub mint: Address,
    pub decimals: u8,
}

impl TokenInfo {
    pub fn new(mint: Address, decimals: u8) -> Result<Self> {
        let token = Self { mint, decimals };
        token.validate()?;
        Ok(token)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.decimals > MAX_DECIMALS {
            return Err(PositionError::InvalidDecimals(self.decimals));
        }
        Ok(())
    }
}
