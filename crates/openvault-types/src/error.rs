//! Error types for the OpenVault custody engine.
//!
//! All errors use the `OV_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Access control errors
//! - 2xx: Ledger errors
//! - 3xx: Reserve exchange errors
//! - 4xx: Marketplace / listing errors
//! - 6xx: Token sale errors
//! - 9xx: Lifecycle / internal errors
//!
//! Every error aborts the whole operation with no partial state change;
//! callers resubmit corrected requests, the engine never retries.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{CollectionId, ListingId, TokenId};

/// Central error enum for all OpenVault operations.
#[derive(Debug, Error)]
pub enum VaultError {
    // =================================================================
    // Access Control Errors (1xx)
    // =================================================================
    /// The caller lacks the required owner or role authority.
    #[error("OV_ERR_100: unauthorized: {reason}")]
    Unauthorized { reason: String },

    // =================================================================
    // Ledger Errors (2xx)
    // =================================================================
    /// Not enough balance to perform the operation.
    #[error("OV_ERR_200: insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: Decimal, available: Decimal },

    /// The spender's allowance does not cover the transfer.
    #[error("OV_ERR_201: insufficient allowance: need {needed}, have {available}")]
    InsufficientAllowance { needed: Decimal, available: Decimal },

    /// Zero or otherwise out-of-domain quantity.
    #[error("OV_ERR_202: invalid amount: {amount}")]
    InvalidAmount { amount: Decimal },

    // =================================================================
    // Reserve Exchange Errors (3xx)
    // =================================================================
    /// The exchange is not currently selling.
    #[error("OV_ERR_300: sale is not active")]
    SaleInactive,

    /// A purchase carried no payment.
    #[error("OV_ERR_301: no payment sent")]
    NoPaymentSent,

    /// Paying out would leave the reserve unable to redeem every
    /// remaining holder at the sell price.
    #[error("OV_ERR_302: reserve exhausted: need {required}, have {available}")]
    ReserveExhausted { required: Decimal, available: Decimal },

    /// The reserve holds no value beyond its redemption obligation.
    #[error("OV_ERR_303: nothing to withdraw")]
    NothingToWithdraw,

    // =================================================================
    // Marketplace Errors (4xx)
    // =================================================================
    /// No listing exists with this id.
    #[error("OV_ERR_400: listing not found: {0}")]
    ListingNotFound(ListingId),

    /// The listing has already been sold or delisted.
    #[error("OV_ERR_401: listing already settled: {0}")]
    AlreadySettled(ListingId),

    /// Only the original seller may delist.
    #[error("OV_ERR_402: caller is not the seller of {0}")]
    NotSeller(ListingId),

    /// The registry has not granted the marketplace custody of the asset.
    #[error("OV_ERR_403: transfer not approved for {token_id}")]
    TransferNotApproved { token_id: TokenId },

    /// The registry passed in does not serve the listing's collection.
    #[error("OV_ERR_404: collection mismatch: expected {expected}, got {actual}")]
    CollectionMismatch {
        expected: CollectionId,
        actual: CollectionId,
    },

    // =================================================================
    // Token Sale Errors (6xx)
    // =================================================================
    /// The buyer's foreign-unit allowance does not cover the cost.
    ///
    /// Wording is preserved verbatim for existing integrations; this is
    /// the one error rendered without an `OV_ERR_` code.
    #[error("allowance insufficient — check approval and amount")]
    SaleAllowanceInsufficient,

    // =================================================================
    // Lifecycle / Internal (9xx)
    // =================================================================
    /// `initialize` was called a second time.
    #[error("OV_ERR_900: already initialized")]
    AlreadyInitialized,

    /// An operation was attempted before `initialize` completed.
    #[error("OV_ERR_901: not initialized")]
    NotInitialized,

    /// Unrecoverable internal error (broken custody invariant).
    #[error("OV_ERR_902: internal error: {0}")]
    Internal(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, VaultError>;
