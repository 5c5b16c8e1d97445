//! Reserve-backed bonding exchange.
//!
//! Buys mint new ledger balance at the buy price; sells burn balance and
//! pay out at the sell price, a fixed 2% discount below the buy price.
//! The payment taken in stays custodied by the exchange, and the
//! **reserve-sufficiency invariant** holds after every successful sell
//! and surplus withdrawal:
//!
//! ```text
//! custodied >= floor(total_supply * sell_price)
//! ```
//!
//! i.e. every remaining holder stays fully redeemable. Divisions floor,
//! matching the truncating integer arithmetic of the original system, so
//! buyers should send exact multiples of the buy price to avoid dust loss.

use openvault_ledger::{AccessControl, Ledger};
use openvault_types::{
    AccountId, EngineEvent, EventLog, EventRecord, ReserveConfig, Result, VaultError, constants,
};
use rust_decimal::Decimal;

/// The two-way exchange and its custodied reserve.
#[derive(Debug, Clone)]
pub struct ReserveExchange {
    /// Component account; must hold the `Minter` grant.
    account: AccountId,
    buy_price: Decimal,
    sell_price: Decimal,
    active: bool,
    /// Native-currency value held against redemption.
    custodied: Decimal,
    events: EventLog,
}

impl ReserveExchange {
    /// Create the exchange from its pricing configuration.
    ///
    /// # Errors
    /// `InvalidAmount` if the configured buy price is not positive.
    pub fn new(config: &ReserveConfig) -> Result<Self> {
        if config.buy_price <= Decimal::ZERO {
            return Err(VaultError::InvalidAmount {
                amount: config.buy_price,
            });
        }
        Ok(Self {
            account: AccountId::new(),
            buy_price: config.buy_price,
            sell_price: Self::derive_sell_price(config.buy_price),
            active: config.active,
            custodied: Decimal::ZERO,
            events: EventLog::new(),
        })
    }

    /// `floor(buy * 98 / 100)`: the operator's fixed spread.
    fn derive_sell_price(buy_price: Decimal) -> Decimal {
        (buy_price * Decimal::from(constants::SELL_DISCOUNT_NUMERATOR)
            / Decimal::from(constants::SELL_DISCOUNT_DENOMINATOR))
        .floor()
    }

    /// Mint against an incoming payment.
    ///
    /// `minted = floor(payment / buy_price)`; the full payment joins the
    /// reserve. Returns the minted amount.
    ///
    /// # Errors
    /// - `SaleInactive` while the exchange is switched off
    /// - `NoPaymentSent` for a non-positive payment
    /// - `InvalidAmount` if the payment is too small to mint one unit
    pub fn purchase(
        &mut self,
        acl: &AccessControl,
        ledger: &mut Ledger,
        buyer: AccountId,
        payment: Decimal,
    ) -> Result<Decimal> {
        if !self.active {
            return Err(VaultError::SaleInactive);
        }
        if payment <= Decimal::ZERO {
            return Err(VaultError::NoPaymentSent);
        }
        let minted = (payment / self.buy_price).floor();
        if minted <= Decimal::ZERO {
            return Err(VaultError::InvalidAmount { amount: payment });
        }

        ledger.mint(acl, self.account, buyer, minted)?;
        self.custodied += payment;
        tracing::info!(%buyer, %minted, %payment, custodied = %self.custodied, "exchange purchase");
        self.events.record(EngineEvent::TokensPurchased {
            buyer,
            minted,
            payment,
        });
        Ok(minted)
    }

    /// Burn `amount` for a payout at the sell price.
    ///
    /// The payout only leaves the reserve if what remains still covers
    /// redemption of every other outstanding unit. Returns the payout.
    ///
    /// # Errors
    /// - `InvalidAmount` for a non-positive amount
    /// - `InsufficientBalance` if the seller cannot cover `amount`
    /// - `ReserveExhausted` if the sufficiency check fails
    pub fn sell(
        &mut self,
        ledger: &mut Ledger,
        seller: AccountId,
        amount: Decimal,
    ) -> Result<Decimal> {
        if amount <= Decimal::ZERO {
            return Err(VaultError::InvalidAmount { amount });
        }
        let balance = ledger.balance_of(seller);
        if balance < amount {
            return Err(VaultError::InsufficientBalance {
                needed: amount,
                available: balance,
            });
        }

        let payout = (amount * self.sell_price).floor();
        let remaining_obligation = ((ledger.total_supply() - amount) * self.sell_price).floor();
        if self.custodied - payout < remaining_obligation {
            return Err(VaultError::ReserveExhausted {
                required: remaining_obligation + payout,
                available: self.custodied,
            });
        }

        ledger.burn(seller, amount)?;
        self.custodied -= payout;
        tracing::info!(%seller, %amount, %payout, custodied = %self.custodied, "exchange sell");
        self.events.record(EngineEvent::TokensSold {
            seller,
            amount,
            payout,
        });
        Ok(payout)
    }

    /// Set a new buy price; the sell price follows at the fixed discount.
    /// Owner only.
    ///
    /// # Errors
    /// `Unauthorized` / `InvalidAmount`.
    pub fn set_buy_price(
        &mut self,
        acl: &AccessControl,
        caller: AccountId,
        new_price: Decimal,
    ) -> Result<()> {
        acl.require_owner(caller)?;
        if new_price <= Decimal::ZERO {
            return Err(VaultError::InvalidAmount { amount: new_price });
        }
        self.buy_price = new_price;
        self.sell_price = Self::derive_sell_price(new_price);
        tracing::info!(buy_price = %self.buy_price, sell_price = %self.sell_price, "price updated");
        self.events.record(EngineEvent::BuyPriceUpdated {
            buy_price: self.buy_price,
            sell_price: self.sell_price,
        });
        Ok(())
    }

    /// Switch selling on or off. Owner only.
    pub fn set_active(&mut self, acl: &AccessControl, caller: AccountId, active: bool) -> Result<()> {
        acl.require_owner(caller)?;
        self.active = active;
        self.events
            .record(EngineEvent::ExchangeStatusChanged { active });
        Ok(())
    }

    /// Withdraw everything the reserve holds beyond its redemption
    /// obligation. Owner only. Returns the withdrawn amount.
    ///
    /// # Errors
    /// `Unauthorized` / `NothingToWithdraw`.
    pub fn withdraw_surplus(
        &mut self,
        acl: &AccessControl,
        ledger: &Ledger,
        caller: AccountId,
    ) -> Result<Decimal> {
        acl.require_owner(caller)?;
        let required = self.required_reserve(ledger);
        let withdrawable = self.custodied - required;
        if withdrawable <= Decimal::ZERO {
            return Err(VaultError::NothingToWithdraw);
        }

        self.custodied -= withdrawable;
        tracing::info!(to = %caller, amount = %withdrawable, "surplus withdrawn");
        self.events.record(EngineEvent::SurplusWithdrawn {
            to: caller,
            amount: withdrawable,
        });
        Ok(withdrawable)
    }

    /// What the reserve must hold to redeem all outstanding supply:
    /// `floor(total_supply * sell_price)`.
    #[must_use]
    pub fn required_reserve(&self, ledger: &Ledger) -> Decimal {
        (ledger.total_supply() * self.sell_price).floor()
    }

    /// Current buy price.
    #[must_use]
    pub fn buy_price(&self) -> Decimal {
        self.buy_price
    }

    /// Current sell price.
    #[must_use]
    pub fn sell_price(&self) -> Decimal {
        self.sell_price
    }

    /// Whether purchases are currently accepted.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Value currently custodied against redemption.
    #[must_use]
    pub fn custodied(&self) -> Decimal {
        self.custodied
    }

    /// The exchange's component account (holds the `Minter` grant).
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
