//! The listing state machine shared by both marketplace variants.

use openvault_types::{
    AccountId, ListedItem, Listing, ListingId, ListingStatus, Result, VaultError,
};
use rust_decimal::Decimal;

/// Sequentially-identified listings with terminal settlement.
///
/// Ids start at 0 and are never reused; settled listings stay queryable
/// with their price cleared to zero.
#[derive(Debug, Clone, Default)]
pub struct ListingBook {
    listings: Vec<Listing>,
}

impl ListingBook {
    /// Create an empty book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new Active listing and return its id.
    ///
    /// # Errors
    /// `InvalidAmount` if `price` is not positive.
    pub fn insert(&mut self, seller: AccountId, price: Decimal, item: ListedItem) -> Result<ListingId> {
        if price <= Decimal::ZERO {
            return Err(VaultError::InvalidAmount { amount: price });
        }
        let id = ListingId(self.listings.len() as u64);
        self.listings.push(Listing {
            id,
            seller,
            price,
            status: ListingStatus::Active,
            item,
        });
        Ok(id)
    }

    /// Look up a listing by id, settled or not.
    #[must_use]
    pub fn get(&self, id: ListingId) -> Option<&Listing> {
        self.listings.get(usize::try_from(id.0).ok()?)
    }

    /// Fetch a listing that must still be Active.
    ///
    /// # Errors
    /// - `ListingNotFound` if no listing was ever created with this id
    /// - `AlreadySettled` if the listing reached a terminal state
    pub fn active(&self, id: ListingId) -> Result<&Listing> {
        let listing = self.get(id).ok_or(VaultError::ListingNotFound(id))?;
        if listing.status.is_terminal() {
            return Err(VaultError::AlreadySettled(id));
        }
        Ok(listing)
    }

    /// Transition an Active listing into a terminal state, clearing its
    /// price so repeat queries observe a cleared record.
    ///
    /// # Errors
    /// As [`ListingBook::active`], plus `Internal` if `target` is not a
    /// terminal state (a caller bug).
    pub fn settle(&mut self, id: ListingId, target: ListingStatus) -> Result<()> {
        if !target.is_terminal() {
            return Err(VaultError::Internal(format!(
                "settle target must be terminal, got {target}"
            )));
        }
        // Borrow immutably first so failed checks leave no trace.
        let status = self.active(id)?.status;
        if !status.can_transition_to(target) {
            return Err(VaultError::AlreadySettled(id));
        }
        let listing = self
            .listings
            .get_mut(usize::try_from(id.0).map_err(|_| VaultError::ListingNotFound(id))?)
            .ok_or(VaultError::ListingNotFound(id))?;
        listing.status = target;
        listing.price = Decimal::ZERO;
        Ok(())
    }

    /// Number of listings ever created.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listings.len()
    }

    /// Whether no listing was ever created.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}
