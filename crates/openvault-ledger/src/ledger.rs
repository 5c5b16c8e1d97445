//! Fungible balance ledger.
//!
//! All mutations are atomic: either the full operation succeeds or the
//! ledger is unchanged. Balance entries are created implicitly on first
//! credit and never removed; burning to zero leaves a zero entry.

use std::collections::HashMap;

use openvault_types::{
    AccountId, EngineEvent, EventLog, EventRecord, PaymentLedger, Result, Role, VaultError,
};
use rust_decimal::Decimal;

use crate::AccessControl;

/// The source of truth for token balances, allowances, and total supply.
///
/// Minting is gated by [`AccessControl`]: the owner, or any account
/// granted [`Role::Minter`], may create balance. Everything else is
/// caller-authorized standard transfer semantics.
#[derive(Debug, Clone)]
pub struct Ledger {
    name: String,
    symbol: String,
    balances: HashMap<AccountId, Decimal>,
    allowances: HashMap<(AccountId, AccountId), Decimal>,
    total_supply: Decimal,
    events: EventLog,
}

impl Ledger {
    /// Create an empty ledger with its token metadata.
    #[must_use]
    pub fn new(name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            balances: HashMap::new(),
            allowances: HashMap::new(),
            total_supply: Decimal::ZERO,
            events: EventLog::new(),
        }
    }

    /// Token name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Token symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Current balance of `account` (zero if never credited).
    #[must_use]
    pub fn balance_of(&self, account: AccountId) -> Decimal {
        self.balances.get(&account).copied().unwrap_or(Decimal::ZERO)
    }

    /// Remaining amount `spender` may move out of `owner`'s balance.
    #[must_use]
    pub fn allowance(&self, owner: AccountId, spender: AccountId) -> Decimal {
        self.allowances
            .get(&(owner, spender))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Sum of every balance ever minted minus every balance burned.
    #[must_use]
    pub fn total_supply(&self) -> Decimal {
        self.total_supply
    }

    /// Create `amount` new units in `account`'s balance.
    ///
    /// # Errors
    /// - `Unauthorized` unless `caller` is the owner or holds `Minter`
    /// - `InvalidAmount` if `amount` is not positive
    pub fn mint(
        &mut self,
        acl: &AccessControl,
        caller: AccountId,
        account: AccountId,
        amount: Decimal,
    ) -> Result<()> {
        if caller != acl.owner() && !acl.has_role(Role::Minter, caller) {
            return Err(VaultError::Unauthorized {
                reason: "not authorized to mint".to_string(),
            });
        }
        if amount <= Decimal::ZERO {
            return Err(VaultError::InvalidAmount { amount });
        }

        *self.balances.entry(account).or_insert(Decimal::ZERO) += amount;
        self.total_supply += amount;
        tracing::debug!(%account, %amount, supply = %self.total_supply, "minted");
        self.events.record(EngineEvent::Minted { account, amount });
        Ok(())
    }

    /// Destroy `amount` units of the caller's own balance.
    ///
    /// # Errors
    /// - `InvalidAmount` if `amount` is not positive
    /// - `InsufficientBalance` if the caller's balance does not cover it
    pub fn burn(&mut self, caller: AccountId, amount: Decimal) -> Result<()> {
        if amount <= Decimal::ZERO {
            return Err(VaultError::InvalidAmount { amount });
        }
        let balance = self.balance_of(caller);
        if balance < amount {
            return Err(VaultError::InsufficientBalance {
                needed: amount,
                available: balance,
            });
        }

        // Entry stays behind at zero; accounts are never destroyed.
        *self.balances.entry(caller).or_insert(Decimal::ZERO) -= amount;
        self.total_supply -= amount;
        tracing::debug!(account = %caller, %amount, supply = %self.total_supply, "burned");
        self.events.record(EngineEvent::Burned {
            account: caller,
            amount,
        });
        Ok(())
    }

    /// Move `amount` from `from` to `to`.
    ///
    /// # Errors
    /// - `InvalidAmount` if `amount` is not positive
    /// - `InsufficientBalance` if `from` cannot cover it; nothing moves
    pub fn transfer(&mut self, from: AccountId, to: AccountId, amount: Decimal) -> Result<()> {
        if amount <= Decimal::ZERO {
            return Err(VaultError::InvalidAmount { amount });
        }
        let balance = self.balance_of(from);
        if balance < amount {
            return Err(VaultError::InsufficientBalance {
                needed: amount,
                available: balance,
            });
        }

        *self.balances.entry(from).or_insert(Decimal::ZERO) -= amount;
        *self.balances.entry(to).or_insert(Decimal::ZERO) += amount;
        self.events.record(EngineEvent::Transferred { from, to, amount });
        Ok(())
    }

    /// Let `spender` move up to `amount` of `owner`'s balance.
    /// Overwrites any previous allowance for the pair.
    pub fn approve(&mut self, owner: AccountId, spender: AccountId, amount: Decimal) {
        self.allowances.insert((owner, spender), amount);
        self.events.record(EngineEvent::Approved {
            owner,
            spender,
            amount,
        });
    }

    /// Verify the supply-conservation invariant:
    /// `total_supply == Σ balances`.
    ///
    /// # Errors
    /// Returns `Internal` if the invariant is broken; something has gone
    /// catastrophically wrong and the caller should halt.
    pub fn verify_supply(&self) -> Result<()> {
        let actual: Decimal = self.balances.values().copied().sum();
        if actual != self.total_supply {
            return Err(VaultError::Internal(format!(
                "supply invariant violated: recorded {recorded} != actual {actual}",
                recorded = self.total_supply,
            )));
        }
        Ok(())
    }

    /// Notifications emitted so far.
    #[must_use]
    pub fn events(&self) -> &[EventRecord] {
        self.events.records()
    }
}

impl PaymentLedger for Ledger {
    fn balance_of(&self, account: AccountId) -> Decimal {
        Ledger::balance_of(self, account)
    }

    fn allowance(&self, owner: AccountId, spender: AccountId) -> Decimal {
        Ledger::allowance(self, owner, spender)
    }

    /// Move `amount` from `owner` to `to`, spending `spender`'s allowance.
    ///
    /// Allowance is checked before balance; on any failure neither the
    /// allowance nor any balance changes.
    fn transfer_from(
        &mut self,
        owner: AccountId,
        spender: AccountId,
        to: AccountId,
        amount: Decimal,
    ) -> Result<()> {
        if amount <= Decimal::ZERO {
            return Err(VaultError::InvalidAmount { amount });
        }
        let allowed = self.allowance(owner, spender);
        if allowed < amount {
            return Err(VaultError::InsufficientAllowance {
                needed: amount,
                available: allowed,
            });
        }
        let balance = Ledger::balance_of(self, owner);
        if balance < amount {
            return Err(VaultError::InsufficientBalance {
                needed: amount,
                available: balance,
            });
        }

        self.allowances.insert((owner, spender), allowed - amount);
        *self.balances.entry(owner).or_insert(Decimal::ZERO) -= amount;
        *self.balances.entry(to).or_insert(Decimal::ZERO) += amount;
        self.events.record(EngineEvent::Transferred {
            from: owner,
            to,
            amount,
        });
        Ok(())
    }
}
