//! System-wide constants for the OpenVault custody engine.

/// Numerator of the fixed sell-price discount: sell = buy * 98 / 100.
pub const SELL_DISCOUNT_NUMERATOR: u32 = 98;

/// Denominator of the fixed sell-price discount.
pub const SELL_DISCOUNT_DENOMINATOR: u32 = 100;

/// Default exchange buy price (payment units per token).
pub const DEFAULT_BUY_PRICE: u64 = 100;

/// Default sale token price in foreign stable units (6-decimal quote:
/// 8600 = 0.0086 per token).
pub const DEFAULT_SALE_TOKEN_PRICE: u64 = 8600;

/// Default token metadata.
pub const DEFAULT_TOKEN_NAME: &str = "OpenVault Credit";

/// Default token symbol.
pub const DEFAULT_TOKEN_SYMBOL: &str = "OVC";

/// Version of the platform's persistent state layout. A migration is a
/// pure transform from one schema version's state to the next.
pub const STATE_SCHEMA_VERSION: u32 = 1;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "OpenVault";
