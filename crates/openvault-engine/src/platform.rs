//! The initialize-once custody platform facade.
//!
//! `CustodyPlatform` owns every component behind a single versioned state
//! struct. The shell is created empty; `initialize` builds the state
//! exactly once (the one contract this engine has with an external
//! upgrade/initialization collaborator), and every operation before that
//! fails `NotInitialized`. A future migration is a pure transform of
//! [`PlatformState`] to the next schema version, not inheritance.
//!
//! The marketplaces settle in the platform's own ledger, the same
//! composition the original deployment used, with the token doubling as
//! the marketplaces' payment unit.

use openvault_ledger::{AccessControl, Ledger};
use openvault_market::{AssetMarketplace, UniqueMarketplace};
use openvault_types::{
    AccountId, EngineConfig, ListingId, PaymentLedger, Result, Role, StakePosition, TokenId,
    UniqueAssetRegistry, VaultError, constants,
};
use rust_decimal::Decimal;

use crate::{MintAuthorizedSale, ReserveExchange, StakingRegistry};

/// Everything mutable, in one versioned structure.
#[derive(Debug, Clone)]
struct PlatformState {
    schema_version: u32,
    acl: AccessControl,
    ledger: Ledger,
    reserve: ReserveExchange,
    staking: StakingRegistry,
    sale: MintAuthorizedSale,
    assets: AssetMarketplace,
    uniques: UniqueMarketplace,
}

/// The top-level engine instance.
#[derive(Debug, Clone, Default)]
pub struct CustodyPlatform {
    state: Option<PlatformState>,
}

impl CustodyPlatform {
    /// Create an uninitialized shell. Unusable until [`Self::initialize`].
    #[must_use]
    pub fn new() -> Self {
        Self { state: None }
    }

    /// Build the platform state. Callable exactly once.
    ///
    /// Grants `Role::Minter` to the exchange and sale component accounts
    /// so they can create ledger balance without being the owner.
    ///
    /// # Errors
    /// - `AlreadyInitialized` on a second call
    /// - `InvalidAmount` for non-positive configured prices
    pub fn initialize(&mut self, owner: AccountId, config: EngineConfig) -> Result<()> {
        if self.state.is_some() {
            return Err(VaultError::AlreadyInitialized);
        }

        let mut acl = AccessControl::new(owner);
        let ledger = Ledger::new(config.token.name, config.token.symbol);
        let reserve = ReserveExchange::new(&config.reserve)?;
        let sale = MintAuthorizedSale::new(&config.sale)?;
        acl.grant_role(owner, Role::Minter, reserve.account())?;
        acl.grant_role(owner, Role::Minter, sale.account())?;

        self.state = Some(PlatformState {
            schema_version: constants::STATE_SCHEMA_VERSION,
            acl,
            ledger,
            reserve,
            staking: StakingRegistry::new(),
            sale,
            assets: AssetMarketplace::new(),
            uniques: UniqueMarketplace::new(),
        });
        tracing::info!(%owner, schema = constants::STATE_SCHEMA_VERSION, "platform initialized");
        Ok(())
    }

    /// Whether `initialize` has completed.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    /// Version of the live state layout.
    pub fn schema_version(&self) -> Result<u32> {
        Ok(self.state()?.schema_version)
    }

    fn state(&self) -> Result<&PlatformState> {
        self.state.as_ref().ok_or(VaultError::NotInitialized)
    }

    fn state_mut(&mut self) -> Result<&mut PlatformState> {
        self.state.as_mut().ok_or(VaultError::NotInitialized)
    }

    // -----------------------------------------------------------------
    // Access control
    // -----------------------------------------------------------------

    /// The current owner.
    pub fn owner(&self) -> Result<AccountId> {
        Ok(self.state()?.acl.owner())
    }

    /// Hand ownership to `new_owner`. Owner only.
    pub fn transfer_ownership(&mut self, caller: AccountId, new_owner: AccountId) -> Result<()> {
        self.state_mut()?.acl.transfer_ownership(caller, new_owner)
    }

    /// Grant `role` to `account`. Owner only; idempotent.
    pub fn grant_role(&mut self, caller: AccountId, role: Role, account: AccountId) -> Result<()> {
        self.state_mut()?.acl.grant_role(caller, role, account)
    }

    /// Revoke `role` from `account`. Owner only; idempotent.
    pub fn revoke_role(&mut self, caller: AccountId, role: Role, account: AccountId) -> Result<()> {
        self.state_mut()?.acl.revoke_role(caller, role, account)
    }

    /// Whether `account` holds `role`.
    pub fn has_role(&self, role: Role, account: AccountId) -> Result<bool> {
        Ok(self.state()?.acl.has_role(role, account))
    }

    // -----------------------------------------------------------------
    // Ledger
    // -----------------------------------------------------------------

    /// Mint new balance. Owner or `Minter` grant required.
    pub fn mint(&mut self, caller: AccountId, account: AccountId, amount: Decimal) -> Result<()> {
        let s = self.state_mut()?;
        s.ledger.mint(&s.acl, caller, account, amount)
    }

    /// Burn the caller's own balance.
    pub fn burn(&mut self, caller: AccountId, amount: Decimal) -> Result<()> {
        self.state_mut()?.ledger.burn(caller, amount)
    }

    /// Move balance between accounts.
    pub fn transfer(&mut self, from: AccountId, to: AccountId, amount: Decimal) -> Result<()> {
        self.state_mut()?.ledger.transfer(from, to, amount)
    }

    /// Set `spender`'s allowance over `owner`'s balance.
    pub fn approve(&mut self, owner: AccountId, spender: AccountId, amount: Decimal) -> Result<()> {
        self.state_mut()?.ledger.approve(owner, spender, amount);
        Ok(())
    }

    /// Balance of `account`.
    pub fn balance_of(&self, account: AccountId) -> Result<Decimal> {
        Ok(self.state()?.ledger.balance_of(account))
    }

    /// Outstanding total supply.
    pub fn total_supply(&self) -> Result<Decimal> {
        Ok(self.state()?.ledger.total_supply())
    }

    /// Audit the supply-conservation invariant.
    pub fn verify_supply(&self) -> Result<()> {
        self.state()?.ledger.verify_supply()
    }

    // -----------------------------------------------------------------
    // Reserve exchange
    // -----------------------------------------------------------------

    /// Buy from the exchange; returns the minted amount.
    pub fn exchange_purchase(&mut self, buyer: AccountId, payment: Decimal) -> Result<Decimal> {
        let s = self.state_mut()?;
        s.reserve.purchase(&s.acl, &mut s.ledger, buyer, payment)
    }

    /// Sell back to the exchange; returns the payout.
    pub fn exchange_sell(&mut self, seller: AccountId, amount: Decimal) -> Result<Decimal> {
        let s = self.state_mut()?;
        s.reserve.sell(&mut s.ledger, seller, amount)
    }

    /// Set a new buy price (sell price follows). Owner only.
    pub fn set_buy_price(&mut self, caller: AccountId, new_price: Decimal) -> Result<()> {
        let s = self.state_mut()?;
        s.reserve.set_buy_price(&s.acl, caller, new_price)
    }

    /// Switch the exchange on or off. Owner only.
    pub fn set_exchange_active(&mut self, caller: AccountId, active: bool) -> Result<()> {
        let s = self.state_mut()?;
        s.reserve.set_active(&s.acl, caller, active)
    }

    /// Withdraw the reserve surplus. Owner only; returns the amount.
    pub fn withdraw_surplus(&mut self, caller: AccountId) -> Result<Decimal> {
        let s = self.state_mut()?;
        s.reserve.withdraw_surplus(&s.acl, &s.ledger, caller)
    }

    /// The exchange component, for queries.
    pub fn reserve(&self) -> Result<&ReserveExchange> {
        Ok(&self.state()?.reserve)
    }

    // -----------------------------------------------------------------
    // Staking
    // -----------------------------------------------------------------

    /// Lock `amount` for `duration_secs`.
    pub fn stake(&mut self, staker: AccountId, amount: Decimal, duration_secs: u64) -> Result<()> {
        let s = self.state_mut()?;
        s.staking.stake(&mut s.ledger, staker, amount, duration_secs)
    }

    /// `account`'s lock positions in creation order.
    pub fn stake_positions(&self, account: AccountId) -> Result<&[StakePosition]> {
        Ok(self.state()?.staking.positions(account))
    }

    /// The staking component, for queries.
    pub fn staking(&self) -> Result<&StakingRegistry> {
        Ok(&self.state()?.staking)
    }

    // -----------------------------------------------------------------
    // Token sale
    // -----------------------------------------------------------------

    /// Buy minted tokens for foreign stable units; returns the cost.
    pub fn sale_purchase(
        &mut self,
        payment: &mut impl PaymentLedger,
        buyer: AccountId,
        token_amount: Decimal,
    ) -> Result<Decimal> {
        let s = self.state_mut()?;
        s.sale
            .purchase(&s.acl, &mut s.ledger, payment, buyer, token_amount)
    }

    /// Set the sale's token price. Owner only.
    pub fn update_sale_price(&mut self, caller: AccountId, new_price: Decimal) -> Result<()> {
        let s = self.state_mut()?;
        s.sale.update_price(&s.acl, caller, new_price)
    }

    /// The sale component, for queries.
    pub fn sale(&self) -> Result<&MintAuthorizedSale> {
        Ok(&self.state()?.sale)
    }

    // -----------------------------------------------------------------
    // Marketplaces (settled in the platform's own ledger)
    // -----------------------------------------------------------------

    /// Offer a named fungible item for sale.
    pub fn list_asset(
        &mut self,
        seller: AccountId,
        name: impl Into<String>,
        price: Decimal,
        category: impl Into<String>,
    ) -> Result<ListingId> {
        self.state_mut()?.assets.list_asset(seller, name, price, category)
    }

    /// Buy an asset listing, paying in the platform's ledger.
    pub fn purchase_asset(&mut self, buyer: AccountId, id: ListingId) -> Result<()> {
        let s = self.state_mut()?;
        s.assets.purchase_asset(&mut s.ledger, buyer, id)
    }

    /// Withdraw an asset listing. Seller only.
    pub fn delist_asset(&mut self, caller: AccountId, id: ListingId) -> Result<()> {
        self.state_mut()?.assets.delist_asset(caller, id)
    }

    /// List a unique asset, escrowing it with the marketplace.
    pub fn list_unique(
        &mut self,
        registry: &mut impl UniqueAssetRegistry,
        seller: AccountId,
        token_id: TokenId,
        price: Decimal,
    ) -> Result<ListingId> {
        self.state_mut()?
            .uniques
            .list_unique(registry, seller, token_id, price)
    }

    /// Buy a unique listing, paying in the platform's ledger.
    pub fn purchase_unique(
        &mut self,
        registry: &mut impl UniqueAssetRegistry,
        buyer: AccountId,
        id: ListingId,
    ) -> Result<()> {
        let s = self.state_mut()?;
        s.uniques
            .purchase_unique(&mut s.ledger, registry, buyer, id)
    }

    /// Withdraw a unique listing, returning the escrowed asset. Seller only.
    pub fn delist_unique(
        &mut self,
        registry: &mut impl UniqueAssetRegistry,
        caller: AccountId,
        id: ListingId,
    ) -> Result<()> {
        self.state_mut()?.uniques.delist_unique(registry, caller, id)
    }

    /// The fungible-asset marketplace, for queries.
    pub fn assets(&self) -> Result<&AssetMarketplace> {
        Ok(&self.state()?.assets)
    }

    /// The unique-asset marketplace, for queries.
    pub fn uniques(&self) -> Result<&UniqueMarketplace> {
        Ok(&self.state()?.uniques)
    }

    /// The ledger, for queries.
    pub fn ledger(&self) -> Result<&Ledger> {
        Ok(&self.state()?.ledger)
    }

    /// The access controller, for queries.
    pub fn access_control(&self) -> Result<&AccessControl> {
        Ok(&self.state()?.acl)
    }
}
