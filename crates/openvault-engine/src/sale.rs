//! Mint-authorized token sale.
//!
//! Sells ledger balance for a foreign stable payment unit at a fixed,
//! administratively set price. The proceeds go to the treasury account on
//! the foreign ledger; the tokens are minted through the sale's
//! `Minter` grant. The foreign ledger is untrusted: the allowance is
//! checked first and the mint only happens after the pull succeeded.

use openvault_ledger::{AccessControl, Ledger};
use openvault_types::{
    AccountId, EngineEvent, EventLog, EventRecord, PaymentLedger, Result, SaleConfig, VaultError,
};
use rust_decimal::Decimal;

/// Fixed-price sale settled in a foreign stable unit.
#[derive(Debug, Clone)]
pub struct MintAuthorizedSale {
    /// Component account; must hold the `Minter` grant, and is the
    /// allowance spender buyers approve on the foreign ledger.
    account: AccountId,
    /// Credited with every sale's proceeds.
    treasury: AccountId,
    /// Foreign stable units per token.
    token_price: Decimal,
    events: EventLog,
}

impl MintAuthorizedSale {
    /// Create the sale from its configuration.
    ///
    /// # Errors
    /// `InvalidAmount` if the configured token price is not positive.
    pub fn new(config: &SaleConfig) -> Result<Self> {
        if config.token_price <= Decimal::ZERO {
            return Err(VaultError::InvalidAmount {
                amount: config.token_price,
            });
        }
        Ok(Self {
            account: AccountId::new(),
            treasury: config.treasury,
            token_price: config.token_price,
            events: EventLog::new(),
        })
    }

    /// Buy `token_amount` tokens for `token_amount * token_price` foreign
    /// units. Returns the cost charged.
    ///
    /// # Errors
    /// - `InvalidAmount` for a non-positive token amount
    /// - `SaleAllowanceInsufficient` if the buyer's approval does not
    ///   cover the cost (wording preserved for existing integrations)
    /// - foreign-ledger failures propagate before any mint happens
    pub fn purchase(
        &mut self,
        acl: &AccessControl,
        ledger: &mut Ledger,
        payment: &mut impl PaymentLedger,
        buyer: AccountId,
        token_amount: Decimal,
    ) -> Result<Decimal> {
        if token_amount <= Decimal::ZERO {
            return Err(VaultError::InvalidAmount {
                amount: token_amount,
            });
        }
        let cost = token_amount * self.token_price;
        if payment.allowance(buyer, self.account) < cost {
            return Err(VaultError::SaleAllowanceInsufficient);
        }

        // Pull the payment first; a failing foreign ledger must not
        // leave freshly minted tokens behind.
        payment.transfer_from(buyer, self.account, self.treasury, cost)?;
        ledger.mint(acl, self.account, buyer, token_amount)?;

        tracing::info!(%buyer, amount = %token_amount, %cost, "sale purchase");
        self.events.record(EngineEvent::SaleTokensPurchased {
            buyer,
            amount: token_amount,
            cost,
        });
        Ok(cost)
    }

    /// Set a new token price. Owner only.
    ///
    /// # Errors
    /// `Unauthorized` / `InvalidAmount`.
    pub fn update_price(
        &mut self,
        acl: &AccessControl,
        caller: AccountId,
        new_price: Decimal,
    ) -> Result<()> {
        acl.require_owner(caller)?;
        if new_price <= Decimal::ZERO {
            return Err(VaultError::InvalidAmount { amount: new_price });
        }
        self.token_price = new_price;
        tracing::info!(price = %new_price, "sale price updated");
        self.events
            .record(EngineEvent::SalePriceUpdated { price: new_price });
        Ok(())
    }

    /// Current price per token in foreign stable units.
    #[must_use]
    pub fn token_price(&self) -> Decimal {
        self.token_price
    }

    /// The treasury credited with sale proceeds.
    #[must_use]
    pub fn treasury(&self) -> AccountId {
        self.treasury
    }

    /// The sale's component account (minter and allowance spender).
    #[must_use]
    pub fn account(&self) -> AccountId {
        self.account
    }

    /// Notifications emitted so far.
    #[must_use]
    pub fn events(&self) -> &[EventRecord] {
        self.events.records()
    }
}
