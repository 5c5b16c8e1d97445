//! # Listing: the marketplace sale offer
//!
//! A `Listing` is a seller's fixed-price offer, tracked through a small
//! monotonic state machine:
//!
//! ```text
//!   ┌────────┐  purchase   ┌──────┐
//!   │ ACTIVE ├────────────▶│ SOLD │
//!   └───┬────┘             └──────┘
//!       │ delist
//!       ▼
//!   ┌──────────┐
//!   │ DELISTED │
//!   └──────────┘
//! ```
//!
//! Both transitions are terminal; there is no reactivation and ids are
//! never reused. When a listing settles, its price is cleared to zero so
//! repeat queries observe a cleared record (the original system deleted
//! the record outright; the explicit status enum replaces that sentinel).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{AccountId, CollectionId, ListingId, TokenId};

/// The lifecycle state of a listing.
///
/// Transitions are **monotonic** (never go backwards):
/// - `Active → Sold` (a buyer settled the purchase)
/// - `Active → Delisted` (the seller withdrew the offer)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ListingStatus {
    /// Open for purchase or delisting.
    Active,
    /// A buyer paid and took delivery. **Irreversible.**
    Sold,
    /// The seller withdrew the offer. **Irreversible.**
    Delisted,
}

impl ListingStatus {
    /// Can this listing transition to the given target state?
    #[must_use]
    pub fn can_transition_to(&self, target: Self) -> bool {
        matches!((self, target), (Self::Active, Self::Sold | Self::Delisted))
    }

    /// Whether this state accepts no further transitions.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Active)
    }
}

impl std::fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "ACTIVE"),
            Self::Sold => write!(f, "SOLD"),
            Self::Delisted => write!(f, "DELISTED"),
        }
    }
}

/// What is being sold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListedItem {
    /// A fungible-described item; nothing is escrowed, payment is
    /// collected at settlement.
    Asset { name: String, category: String },
    /// A uniquely-identified asset held in marketplace custody for the
    /// life of the listing.
    Unique {
        collection: CollectionId,
        token_id: TokenId,
    },
}

/// A seller's fixed-price offer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    /// Monotonically assigned by the listing book, starting at 0.
    pub id: ListingId,
    /// The account that created the listing.
    pub seller: AccountId,
    /// Asking price in payment-ledger units. Cleared to zero once the
    /// listing reaches a terminal state.
    pub price: Decimal,
    /// Current lifecycle state.
    pub status: ListingStatus,
    /// The subject of the sale.
    pub item: ListedItem,
}

impl Listing {
    /// Whether the listing can still be purchased or delisted.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == ListingStatus::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_listing() -> Listing {
        Listing {
            id: ListingId(0),
            seller: AccountId::new(),
            price: Decimal::new(10, 0),
            status: ListingStatus::Active,
            item: ListedItem::Asset {
                name: "Sword of Valor".to_string(),
                category: "item".to_string(),
            },
        }
    }

    #[test]
    fn status_transitions_valid() {
        assert!(ListingStatus::Active.can_transition_to(ListingStatus::Sold));
        assert!(ListingStatus::Active.can_transition_to(ListingStatus::Delisted));
    }

    #[test]
    fn status_transitions_invalid() {
        assert!(!ListingStatus::Sold.can_transition_to(ListingStatus::Active));
        assert!(!ListingStatus::Sold.can_transition_to(ListingStatus::Delisted));
        assert!(!ListingStatus::Delisted.can_transition_to(ListingStatus::Active));
        assert!(!ListingStatus::Delisted.can_transition_to(ListingStatus::Sold));
    }

    #[test]
    fn terminal_states() {
        assert!(!ListingStatus::Active.is_terminal());
        assert!(ListingStatus::Sold.is_terminal());
        assert!(ListingStatus::Delisted.is_terminal());
    }

    #[test]
    fn status_display() {
        assert_eq!(format!("{}", ListingStatus::Active), "ACTIVE");
        assert_eq!(format!("{}", ListingStatus::Sold), "SOLD");
        assert_eq!(format!("{}", ListingStatus::Delisted), "DELISTED");
    }

    #[test]
    fn listing_is_active() {
        let mut listing = make_listing();
        assert!(listing.is_active());
        listing.status = ListingStatus::Sold;
        assert!(!listing.is_active());
    }

    #[test]
    fn serde_roundtrip() {
        let listing = make_listing();
        let json = serde_json::to_string(&listing).unwrap();
        let back: Listing = serde_json::from_str(&json).unwrap();
        assert_eq!(listing.id, back.id);
        assert_eq!(listing.price, back.price);
        assert_eq!(listing.status, back.status);
        assert_eq!(listing.item, back.item);
    }
}
