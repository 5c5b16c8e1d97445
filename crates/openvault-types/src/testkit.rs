//! In-memory doubles of the boundary traits for tests.
//!
//! **Never use in production.** These back the integration tests that
//! exercise marketplace and sale settlement against a foreign ledger.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::{
    AccountId, CollectionId, PaymentLedger, Result, TokenId, UniqueAssetRegistry, VaultError,
};

/// A minimal foreign payment ledger: balances plus allowances.
#[derive(Debug, Clone, Default)]
pub struct MemoryPaymentLedger {
    balances: HashMap<AccountId, Decimal>,
    allowances: HashMap<(AccountId, AccountId), Decimal>,
}

impl MemoryPaymentLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit `account` out of thin air (test setup only).
    pub fn fund(&mut self, account: AccountId, amount: Decimal) {
        *self.balances.entry(account).or_insert(Decimal::ZERO) += amount;
    }

    /// Let `spender` move up to `amount` of `owner`'s balance.
    pub fn approve(&mut self, owner: AccountId, spender: AccountId, amount: Decimal) {
        self.allowances.insert((owner, spender), amount);
    }
}

impl PaymentLedger for MemoryPaymentLedger {
    fn balance_of(&self, account: AccountId) -> Decimal {
        self.balances.get(&account).copied().unwrap_or(Decimal::ZERO)
    }

    fn allowance(&self, owner: AccountId, spender: AccountId) -> Decimal {
        self.allowances
            .get(&(owner, spender))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    fn transfer_from(
        &mut self,
        owner: AccountId,
        spender: AccountId,
        to: AccountId,
        amount: Decimal,
    ) -> Result<()> {
        let allowed = self.allowance(owner, spender);
        if allowed < amount {
            return Err(VaultError::InsufficientAllowance {
                needed: amount,
                available: allowed,
            });
        }
        let balance = self.balance_of(owner);
        if balance < amount {
            return Err(VaultError::InsufficientBalance {
                needed: amount,
                available: balance,
            });
        }
        self.allowances.insert((owner, spender), allowed - amount);
        *self.balances.entry(owner).or_insert(Decimal::ZERO) -= amount;
        *self.balances.entry(to).or_insert(Decimal::ZERO) += amount;
        Ok(())
    }
}

/// A minimal unique-asset registry for one collection.
#[derive(Debug, Clone)]
pub struct MemoryUniqueRegistry {
    collection: CollectionId,
    owners: HashMap<TokenId, AccountId>,
    approvals: HashMap<TokenId, AccountId>,
}

impl MemoryUniqueRegistry {
    #[must_use]
    pub fn new(collection: CollectionId) -> Self {
        Self {
            collection,
            owners: HashMap::new(),
            approvals: HashMap::new(),
        }
    }

    /// Create `token` owned by `owner` (test setup only).
    pub fn mint(&mut self, owner: AccountId, token: TokenId) {
        self.owners.insert(token, owner);
    }

    /// Approve `operator` to take custody of `token`.
    pub fn approve(&mut self, operator: AccountId, token: TokenId) {
        self.approvals.insert(token, operator);
    }
}

impl UniqueAssetRegistry for MemoryUniqueRegistry {
    fn collection_id(&self) -> CollectionId {
        self.collection
    }

    fn owner_of(&self, token: TokenId) -> Option<AccountId> {
        self.owners.get(&token).copied()
    }

    fn is_approved(&self, operator: AccountId, token: TokenId) -> bool {
        self.approvals.get(&token) == Some(&operator)
    }

    fn transfer_from(&mut self, from: AccountId, to: AccountId, token: TokenId) -> Result<()> {
        if self.owners.get(&token) != Some(&from) {
            return Err(VaultError::TransferNotApproved { token_id: token });
        }
        self.owners.insert(token, to);
        // Custody changed hands; any standing approval is void.
        self.approvals.remove(&token);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_transfer_spends_allowance() {
        let mut ledger = MemoryPaymentLedger::new();
        let (owner, spender, to) = (AccountId::new(), AccountId::new(), AccountId::new());
        ledger.fund(owner, Decimal::new(100, 0));
        ledger.approve(owner, spender, Decimal::new(60, 0));

        ledger
            .transfer_from(owner, spender, to, Decimal::new(40, 0))
            .unwrap();

        assert_eq!(ledger.balance_of(owner), Decimal::new(60, 0));
        assert_eq!(ledger.balance_of(to), Decimal::new(40, 0));
        assert_eq!(ledger.allowance(owner, spender), Decimal::new(20, 0));
    }

    #[test]
    fn payment_transfer_without_allowance_fails() {
        let mut ledger = MemoryPaymentLedger::new();
        let (owner, spender, to) = (AccountId::new(), AccountId::new(), AccountId::new());
        ledger.fund(owner, Decimal::new(100, 0));

        let err = ledger
            .transfer_from(owner, spender, to, Decimal::new(10, 0))
            .unwrap_err();
        assert!(matches!(err, VaultError::InsufficientAllowance { .. }));
        assert_eq!(ledger.balance_of(owner), Decimal::new(100, 0));
    }

    #[test]
    fn unique_transfer_moves_custody_and_clears_approval() {
        let mut registry = MemoryUniqueRegistry::new(CollectionId::new());
        let (seller, market) = (AccountId::new(), AccountId::new());
        let token = TokenId(1);
        registry.mint(seller, token);
        registry.approve(market, token);

        assert!(registry.is_approved(market, token));
        registry.transfer_from(seller, market, token).unwrap();
        assert_eq!(registry.owner_of(token), Some(market));
        assert!(!registry.is_approved(market, token));
    }

    #[test]
    fn unique_transfer_from_non_owner_fails() {
        let mut registry = MemoryUniqueRegistry::new(CollectionId::new());
        let (seller, stranger) = (AccountId::new(), AccountId::new());
        let token = TokenId(1);
        registry.mint(seller, token);

        let err = registry
            .transfer_from(stranger, AccountId::new(), token)
            .unwrap_err();
        assert!(matches!(err, VaultError::TransferNotApproved { .. }));
        assert_eq!(registry.owner_of(token), Some(seller));
    }
}
