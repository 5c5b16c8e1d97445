//! Configuration for a custody platform instance.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{AccountId, constants};

/// Full configuration handed to `CustodyPlatform::initialize`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Ledger token metadata.
    pub token: TokenConfig,
    /// Reserve exchange pricing.
    pub reserve: ReserveConfig,
    /// Mint-authorized sale settings.
    pub sale: SaleConfig,
}

impl EngineConfig {
    /// Standard configuration: default prices, the given token identity
    /// and treasury.
    #[must_use]
    pub fn standard(
        name: impl Into<String>,
        symbol: impl Into<String>,
        treasury: AccountId,
    ) -> Self {
        Self {
            token: TokenConfig {
                name: name.into(),
                symbol: symbol.into(),
            },
            reserve: ReserveConfig::default(),
            sale: SaleConfig::new(treasury),
        }
    }
}

/// Ledger token metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenConfig {
    /// Human-readable token name.
    pub name: String,
    /// Short ticker symbol.
    pub symbol: String,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            name: constants::DEFAULT_TOKEN_NAME.to_string(),
            symbol: constants::DEFAULT_TOKEN_SYMBOL.to_string(),
        }
    }
}

/// Reserve exchange pricing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReserveConfig {
    /// Initial buy price (payment units per token). The sell price is
    /// always derived from it, never configured directly.
    pub buy_price: Decimal,
    /// Whether the exchange starts in the selling state.
    pub active: bool,
}

impl Default for ReserveConfig {
    fn default() -> Self {
        Self {
            buy_price: Decimal::from(constants::DEFAULT_BUY_PRICE),
            active: true,
        }
    }
}

/// Mint-authorized sale configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleConfig {
    /// Price per token in foreign stable units.
    pub token_price: Decimal,
    /// Account credited with every sale's proceeds.
    pub treasury: AccountId,
}

impl SaleConfig {
    /// Sale configuration at the default token price.
    #[must_use]
    pub fn new(treasury: AccountId) -> Self {
        Self {
            token_price: Decimal::from(constants::DEFAULT_SALE_TOKEN_PRICE),
            treasury,
        }
    }
}
