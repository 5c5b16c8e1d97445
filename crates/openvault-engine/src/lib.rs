//! # openvault-engine
//!
//! The custody engine's top plane:
//!
//! - [`ReserveExchange`]: fixed-price mint-on-payment and discounted
//!   burn-for-payout against a custodied reserve that must always cover
//!   redemption of every outstanding unit.
//! - [`StakingRegistry`]: time-locked positions backed by ledger custody.
//! - [`MintAuthorizedSale`]: token sale settled in a foreign stable
//!   unit, minting through a [`Role::Minter`] grant.
//! - [`CustodyPlatform`]: the initialize-once facade owning every
//!   component and exposing the full operation surface.
//!
//! Operations are strictly serialized: each runs to completion (success
//! or no effect) before the next, with no partial-effect visibility.
//!
//! [`Role::Minter`]: openvault_types::Role

pub mod platform;
pub mod reserve;
pub mod sale;
pub mod staking;

pub use platform::CustodyPlatform;
pub use reserve::ReserveExchange;
pub use sale::MintAuthorizedSale;
pub use staking::StakingRegistry;
