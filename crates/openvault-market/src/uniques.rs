//! Unique-asset marketplace with escrow-at-listing.
//!
//! Custody of the asset moves into the marketplace when the listing is
//! created, to the buyer at purchase, and back to the seller at
//! delisting. Listing therefore requires the external registry to show
//! the seller as owner *and* this marketplace as approved operator.

use openvault_types::{
    AccountId, EngineEvent, EventLog, EventRecord, ListedItem, Listing, ListingId, ListingStatus,
    PaymentLedger, Result, TokenId, UniqueAssetRegistry, VaultError,
};
use rust_decimal::Decimal;

use crate::ListingBook;

/// Sale board for uniquely-identified assets, one listing per token.
#[derive(Debug, Clone)]
pub struct UniqueMarketplace {
    /// This marketplace's identity: allowance spender on payment ledgers
    /// and custody holder on asset registries.
    account: AccountId,
    book: ListingBook,
    events: EventLog,
}

impl UniqueMarketplace {
    /// Create an empty marketplace with a fresh component account.
    #[must_use]
    pub fn new() -> Self {
        Self {
            account: AccountId::new(),
            book: ListingBook::new(),
            events: EventLog::new(),
        }
    }

    /// The account sellers must approve and buyers must allowance.
    #[must_use]
    pub fn account(&self) -> AccountId {
        self.account
    }

    /// List `token_id` for sale, escrowing it with the marketplace.
    ///
    /// # Errors
    /// - `InvalidAmount` if `price` is not positive
    /// - `TransferNotApproved` unless the registry shows `seller` as the
    ///   owner and this marketplace as approved operator
    pub fn list_unique(
        &mut self,
        registry: &mut impl UniqueAssetRegistry,
        seller: AccountId,
        token_id: TokenId,
        price: Decimal,
    ) -> Result<ListingId> {
        if price <= Decimal::ZERO {
            return Err(VaultError::InvalidAmount { amount: price });
        }
        if registry.owner_of(token_id) != Some(seller)
            || !registry.is_approved(self.account, token_id)
        {
            return Err(VaultError::TransferNotApproved { token_id });
        }

        // Escrow first; the insert below cannot fail once price is valid.
        registry.transfer_from(seller, self.account, token_id)?;
        let collection = registry.collection_id();
        let id = self.book.insert(
            seller,
            price,
            ListedItem::Unique {
                collection,
                token_id,
            },
        )?;
        tracing::info!(%id, %seller, %token_id, %price, "unique asset listed");
        self.events.record(EngineEvent::UniqueListed {
            id,
            seller,
            collection,
            token_id,
            price,
        });
        Ok(id)
    }

    /// Buy listing `id`: price to the seller, custody to the buyer.
    ///
    /// # Errors
    /// - `ListingNotFound` / `AlreadySettled` for a bad id
    /// - `CollectionMismatch` if `registry` serves another collection
    /// - `InsufficientAllowance` / `InsufficientBalance` from the payment
    ///   ledger; nothing changes anywhere in that case
    pub fn purchase_unique(
        &mut self,
        payment: &mut impl PaymentLedger,
        registry: &mut impl UniqueAssetRegistry,
        buyer: AccountId,
        id: ListingId,
    ) -> Result<()> {
        let listing = self.book.active(id)?;
        let (seller, price) = (listing.seller, listing.price);
        let token_id = Self::token_of(listing, registry)?;

        // The asset must still sit in escrow; anything else means the
        // registry was mutated behind our back.
        if registry.owner_of(token_id) != Some(self.account) {
            return Err(VaultError::Internal(format!(
                "escrowed asset {token_id} left marketplace custody"
            )));
        }

        let allowed = payment.allowance(buyer, self.account);
        if allowed < price {
            return Err(VaultError::InsufficientAllowance {
                needed: price,
                available: allowed,
            });
        }
        payment.transfer_from(buyer, self.account, seller, price)?;
        registry.transfer_from(self.account, buyer, token_id)?;

        self.book.settle(id, ListingStatus::Sold)?;
        tracing::info!(%id, %buyer, %price, "unique asset purchased");
        self.events
            .record(EngineEvent::UniquePurchased { id, buyer, price });
        Ok(())
    }

    /// Withdraw listing `id`, returning the escrowed asset to the seller.
    ///
    /// # Errors
    /// `NotSeller` when `caller` did not create the listing;
    /// `CollectionMismatch` for the wrong registry; otherwise as
    /// [`ListingBook::active`].
    pub fn delist_unique(
        &mut self,
        registry: &mut impl UniqueAssetRegistry,
        caller: AccountId,
        id: ListingId,
    ) -> Result<()> {
        let listing = self.book.active(id)?;
        if listing.seller != caller {
            return Err(VaultError::NotSeller(id));
        }
        let token_id = Self::token_of(listing, registry)?;

        registry.transfer_from(self.account, caller, token_id)?;
        self.book.settle(id, ListingStatus::Delisted)?;
        tracing::info!(%id, "unique asset delisted");
        self.events.record(EngineEvent::UniqueDelisted { id });
        Ok(())
    }

    /// Read access to the listing board.
    #[must_use]
    pub fn book(&self) -> &ListingBook {
        &self.book
    }

    /// Notifications emitted so far.
    #[must_use]
    pub fn events(&self) -> &[EventRecord] {
        self.events.records()
    }

    /// Extract the token behind a listing, verifying the registry serves
    /// the listing's collection.
    fn token_of(listing: &Listing, registry: &impl UniqueAssetRegistry) -> Result<TokenId> {
        match listing.item {
            ListedItem::Unique {
                collection,
                token_id,
            } => {
                let actual = registry.collection_id();
                if collection != actual {
                    return Err(VaultError::CollectionMismatch {
                        expected: collection,
                        actual,
                    });
                }
                Ok(token_id)
            }
            ListedItem::Asset { .. } => Err(VaultError::Internal(format!(
                "listing {} is not a unique asset",
                listing.id
            ))),
        }
    }
}

impl Default for UniqueMarketplace {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use openvault_types::CollectionId;
    use openvault_types::testkit::{MemoryPaymentLedger, MemoryUniqueRegistry};

    fn dec(n: i64) -> Decimal {
        Decimal::new(n, 0)
    }

    struct Setup {
        market: UniqueMarketplace,
        payment: MemoryPaymentLedger,
        registry: MemoryUniqueRegistry,
        seller: AccountId,
        buyer: AccountId,
        token: TokenId,
    }

    fn setup() -> Setup {
        let market = UniqueMarketplace::new();
        let mut payment = MemoryPaymentLedger::new();
        let mut registry = MemoryUniqueRegistry::new(CollectionId::new());
        let seller = AccountId::new();
        let buyer = AccountId::new();
        let token = TokenId(1);
        payment.fund(buyer, dec(1000));
        registry.mint(seller, token);
        Setup {
            market,
            payment,
            registry,
            seller,
            buyer,
            token,
        }
    }

    #[test]
    fn listing_requires_approval() {
        let mut s = setup();
        // Owner, but the marketplace was never approved.
        let err = s
            .market
            .list_unique(&mut s.registry, s.seller, s.token, dec(100))
            .unwrap_err();
        assert!(matches!(err, VaultError::TransferNotApproved { .. }));
        assert_eq!(s.registry.owner_of(s.token), Some(s.seller));
    }

    #[test]
    fn listing_requires_ownership() {
        let mut s = setup();
        s.registry.approve(s.market.account(), s.token);
        let stranger = AccountId::new();
        let err = s
            .market
            .list_unique(&mut s.registry, stranger, s.token, dec(100))
            .unwrap_err();
        assert!(matches!(err, VaultError::TransferNotApproved { .. }));
    }

    #[test]
    fn listing_escrows_the_asset() {
        let mut s = setup();
        s.registry.approve(s.market.account(), s.token);
        let id = s
            .market
            .list_unique(&mut s.registry, s.seller, s.token, dec(100))
            .unwrap();

        assert_eq!(id, ListingId(0));
        assert_eq!(s.registry.owner_of(s.token), Some(s.market.account()));
    }

    #[test]
    fn purchase_moves_payment_and_custody() {
        let mut s = setup();
        s.registry.approve(s.market.account(), s.token);
        let id = s
            .market
            .list_unique(&mut s.registry, s.seller, s.token, dec(100))
            .unwrap();

        s.payment.approve(s.buyer, s.market.account(), dec(100));
        s.market
            .purchase_unique(&mut s.payment, &mut s.registry, s.buyer, id)
            .unwrap();

        assert_eq!(s.registry.owner_of(s.token), Some(s.buyer));
        assert_eq!(s.payment.balance_of(s.seller), dec(100));
        let listing = s.market.book().get(id).unwrap();
        assert_eq!(listing.status, ListingStatus::Sold);
        assert_eq!(listing.price, Decimal::ZERO);
    }

    #[test]
    fn purchase_without_allowance_keeps_escrow() {
        let mut s = setup();
        s.registry.approve(s.market.account(), s.token);
        let id = s
            .market
            .list_unique(&mut s.registry, s.seller, s.token, dec(100))
            .unwrap();

        let err = s
            .market
            .purchase_unique(&mut s.payment, &mut s.registry, s.buyer, id)
            .unwrap_err();
        assert!(matches!(err, VaultError::InsufficientAllowance { .. }));
        // Asset still in escrow, listing still active.
        assert_eq!(s.registry.owner_of(s.token), Some(s.market.account()));
        assert!(s.market.book().active(id).is_ok());
    }

    #[test]
    fn wrong_registry_is_rejected() {
        let mut s = setup();
        s.registry.approve(s.market.account(), s.token);
        let id = s
            .market
            .list_unique(&mut s.registry, s.seller, s.token, dec(100))
            .unwrap();

        let mut other = MemoryUniqueRegistry::new(CollectionId::new());
        s.payment.approve(s.buyer, s.market.account(), dec(100));
        let err = s
            .market
            .purchase_unique(&mut s.payment, &mut other, s.buyer, id)
            .unwrap_err();
        assert!(matches!(err, VaultError::CollectionMismatch { .. }));
        // Payment untouched.
        assert_eq!(s.payment.balance_of(s.buyer), dec(1000));
    }

    #[test]
    fn delist_returns_the_asset() {
        let mut s = setup();
        s.registry.approve(s.market.account(), s.token);
        let id = s
            .market
            .list_unique(&mut s.registry, s.seller, s.token, dec(100))
            .unwrap();

        s.market
            .delist_unique(&mut s.registry, s.seller, id)
            .unwrap();

        assert_eq!(s.registry.owner_of(s.token), Some(s.seller));
        let listing = s.market.book().get(id).unwrap();
        assert_eq!(listing.status, ListingStatus::Delisted);
        assert_eq!(listing.price, Decimal::ZERO);
    }

    #[test]
    fn only_seller_can_delist() {
        let mut s = setup();
        s.registry.approve(s.market.account(), s.token);
        let id = s
            .market
            .list_unique(&mut s.registry, s.seller, s.token, dec(100))
            .unwrap();

        let err = s
            .market
            .delist_unique(&mut s.registry, s.buyer, id)
            .unwrap_err();
        assert!(matches!(err, VaultError::NotSeller(_)));
        assert_eq!(s.registry.owner_of(s.token), Some(s.market.account()));
    }

    #[test]
    fn settled_listing_rejects_everything() {
        let mut s = setup();
        s.registry.approve(s.market.account(), s.token);
        let id = s
            .market
            .list_unique(&mut s.registry, s.seller, s.token, dec(100))
            .unwrap();
        s.payment.approve(s.buyer, s.market.account(), dec(100));
        s.market
            .purchase_unique(&mut s.payment, &mut s.registry, s.buyer, id)
            .unwrap();

        let err = s
            .market
            .delist_unique(&mut s.registry, s.seller, id)
            .unwrap_err();
        assert!(matches!(err, VaultError::AlreadySettled(_)));
    }
}
