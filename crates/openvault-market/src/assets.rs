//! Fungible-described asset marketplace.
//!
//! Nothing is escrowed at listing time; the buyer's payment is pulled at
//! settlement via the external payment ledger. The payment ledger is
//! untrusted: allowance and balance are checked before the transfer, and
//! the book is marked Sold only after the transfer succeeded, so a
//! failing external call leaves every listing untouched.

use openvault_types::{
    AccountId, EngineEvent, EventLog, EventRecord, ListedItem, ListingId, ListingStatus,
    PaymentLedger, Result, VaultError,
};
use rust_decimal::Decimal;

use crate::ListingBook;

/// Sale board for named fungible items ("Sword of Valor", price 10).
#[derive(Debug, Clone)]
pub struct AssetMarketplace {
    /// This marketplace's identity on payment ledgers (allowance spender).
    account: AccountId,
    book: ListingBook,
    events: EventLog,
}

impl AssetMarketplace {
    /// Create an empty marketplace with a fresh component account.
    #[must_use]
    pub fn new() -> Self {
        Self {
            account: AccountId::new(),
            book: ListingBook::new(),
            events: EventLog::new(),
        }
    }

    /// The account buyers must approve as allowance spender.
    #[must_use]
    pub fn account(&self) -> AccountId {
        self.account
    }

    /// Offer a named item for sale at a fixed price.
    ///
    /// # Errors
    /// `InvalidAmount` if `price` is not positive.
    pub fn list_asset(
        &mut self,
        seller: AccountId,
        name: impl Into<String>,
        price: Decimal,
        category: impl Into<String>,
    ) -> Result<ListingId> {
        let name = name.into();
        let category = category.into();
        let id = self.book.insert(
            seller,
            price,
            ListedItem::Asset {
                name: name.clone(),
                category: category.clone(),
            },
        )?;
        tracing::info!(%id, %seller, %price, "asset listed");
        self.events.record(EngineEvent::AssetListed {
            id,
            seller,
            name,
            price,
            category,
        });
        Ok(id)
    }

    /// Buy listing `id`, paying its price to the seller.
    ///
    /// # Errors
    /// - `ListingNotFound` / `AlreadySettled` for a bad id
    /// - `InsufficientAllowance` / `InsufficientBalance` from the payment
    ///   ledger; in that case no state changed anywhere
    pub fn purchase_asset(
        &mut self,
        payment: &mut impl PaymentLedger,
        buyer: AccountId,
        id: ListingId,
    ) -> Result<()> {
        let listing = self.book.active(id)?;
        let (seller, price) = (listing.seller, listing.price);

        // Check before acting: a short allowance must not move anything.
        let allowed = payment.allowance(buyer, self.account);
        if allowed < price {
            return Err(VaultError::InsufficientAllowance {
                needed: price,
                available: allowed,
            });
        }
        payment.transfer_from(buyer, self.account, seller, price)?;

        // Payment cleared; the transition itself can no longer fail.
        self.book.settle(id, ListingStatus::Sold)?;
        tracing::info!(%id, %buyer, %price, "asset purchased");
        self.events
            .record(EngineEvent::AssetPurchased { id, buyer, price });
        Ok(())
    }

    /// Withdraw listing `id`. Only its seller may do this.
    ///
    /// # Errors
    /// `NotSeller` when `caller` did not create the listing, otherwise as
    /// [`ListingBook::active`].
    pub fn delist_asset(&mut self, caller: AccountId, id: ListingId) -> Result<()> {
        let listing = self.book.active(id)?;
        if listing.seller != caller {
            return Err(VaultError::NotSeller(id));
        }
        self.book.settle(id, ListingStatus::Delisted)?;
        tracing::info!(%id, "asset delisted");
        self.events.record(EngineEvent::AssetDelisted { id });
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
}

impl Default for AssetMarketplace {
    fn default() -> Self {
        Self::new()
    }
}
