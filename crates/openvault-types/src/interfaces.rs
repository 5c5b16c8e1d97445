//! Boundary traits for the external ledgers this engine settles against.
//!
//! The marketplace and the token sale never assume exclusive ownership of
//! these collaborators: every call can fail without side effects on this
//! engine's state, so callers query first and mutate their own state only
//! after the external call has succeeded.

use rust_decimal::Decimal;

use crate::{AccountId, CollectionId, Result, TokenId};

/// A fungible payment ledger (the engine's own `Ledger` or a foreign one).
pub trait PaymentLedger {
    /// Current balance of `account`.
    fn balance_of(&self, account: AccountId) -> Decimal;

    /// Remaining amount `spender` may move out of `owner`'s balance.
    fn allowance(&self, owner: AccountId, spender: AccountId) -> Decimal;

    /// Move `amount` from `owner` to `to`, spending `spender`'s allowance.
    ///
    /// # Errors
    /// `InsufficientAllowance` or `InsufficientBalance`; on error nothing
    /// moved.
    fn transfer_from(
        &mut self,
        owner: AccountId,
        spender: AccountId,
        to: AccountId,
        amount: Decimal,
    ) -> Result<()>;
}

/// A registry of uniquely-identified assets (one collection per registry).
pub trait UniqueAssetRegistry {
    /// Identity of the collection this registry serves.
    fn collection_id(&self) -> CollectionId;

    /// Current owner of `token`, if it exists.
    fn owner_of(&self, token: TokenId) -> Option<AccountId>;

    /// Whether `operator` may take custody of `token`.
    fn is_approved(&self, operator: AccountId, token: TokenId) -> bool;

    /// Move custody of `token` from `from` to `to`.
    ///
    /// # Errors
    /// `TransferNotApproved` if `from` does not currently own `token`;
    /// on error custody is unchanged.
    fn transfer_from(&mut self, from: AccountId, to: AccountId, token: TokenId) -> Result<()>;
}
