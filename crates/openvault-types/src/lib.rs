//! # openvault-types
//!
//! Shared types, errors, and configuration for the **OpenVault** custody engine.
//!
//! This crate is the leaf dependency of the workspace; every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`AccountId`], [`ListingId`], [`TokenId`], [`CollectionId`]
//! - **Listing model**: [`Listing`], [`ListedItem`], [`ListingStatus`]
//! - **Stake model**: [`StakePosition`]
//! - **Role model**: [`Role`]
//! - **Notification model**: [`EngineEvent`], [`EventRecord`], [`EventLog`]
//! - **Boundary traits**: [`PaymentLedger`], [`UniqueAssetRegistry`]
//! - **Configuration**: [`EngineConfig`], [`TokenConfig`], [`ReserveConfig`], [`SaleConfig`]
//! - **Errors**: [`VaultError`] with `OV_ERR_` prefix codes
//! - **Constants**: discount ratio, default prices, schema version

pub mod config;
pub mod constants;
pub mod error;
pub mod event;
pub mod ids;
pub mod interfaces;
pub mod listing;
pub mod role;
pub mod stake;

#[cfg(any(test, feature = "test-helpers"))]
pub mod testkit;

// Re-export all primary types at crate root for ergonomic imports:
//   use openvault_types::{AccountId, Listing, VaultError, ...};

pub use config::*;
pub use error::*;
pub use event::*;
pub use ids::*;
pub use interfaces::*;
pub use listing::*;
pub use role::*;
pub use stake::*;

// Constants are accessed via `openvault_types::constants::FOO`
// (not re-exported to avoid name collisions).
