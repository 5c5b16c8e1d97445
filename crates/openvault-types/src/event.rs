//! Notification events for external observers (indexers, UIs).
//!
//! Every mutating operation appends one [`EngineEvent`] to the owning
//! component's [`EventLog`]. Records carry the literal identifiers and
//! amounts used in the operation, a strictly increasing sequence number,
//! and a SHA-256 digest of the serialized payload so an external consumer
//! can verify what it indexed. Events are fire-and-forget; the engine
//! never replays them.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::{AccountId, CollectionId, ListingId, Role, TokenId};

/// A notification emitted by a mutating operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineEvent {
    // --- access control ---
    OwnershipTransferred {
        previous: AccountId,
        new: AccountId,
    },
    RoleGranted {
        role: Role,
        account: AccountId,
    },
    RoleRevoked {
        role: Role,
        account: AccountId,
    },

    // --- ledger ---
    Minted {
        account: AccountId,
        amount: Decimal,
    },
    Burned {
        account: AccountId,
        amount: Decimal,
    },
    Transferred {
        from: AccountId,
        to: AccountId,
        amount: Decimal,
    },
    Approved {
        owner: AccountId,
        spender: AccountId,
        amount: Decimal,
    },

    // --- reserve exchange ---
    TokensPurchased {
        buyer: AccountId,
        minted: Decimal,
        payment: Decimal,
    },
    TokensSold {
        seller: AccountId,
        amount: Decimal,
        payout: Decimal,
    },
    BuyPriceUpdated {
        buy_price: Decimal,
        sell_price: Decimal,
    },
    ExchangeStatusChanged {
        active: bool,
    },
    SurplusWithdrawn {
        to: AccountId,
        amount: Decimal,
    },

    // --- staking ---
    Staked {
        account: AccountId,
        amount: Decimal,
        duration_secs: u64,
    },

    // --- marketplace ---
    AssetListed {
        id: ListingId,
        seller: AccountId,
        name: String,
        price: Decimal,
        category: String,
    },
    AssetPurchased {
        id: ListingId,
        buyer: AccountId,
        price: Decimal,
    },
    AssetDelisted {
        id: ListingId,
    },
    UniqueListed {
        id: ListingId,
        seller: AccountId,
        collection: CollectionId,
        token_id: TokenId,
        price: Decimal,
    },
    UniquePurchased {
        id: ListingId,
        buyer: AccountId,
        price: Decimal,
    },
    UniqueDelisted {
        id: ListingId,
    },

    // --- token sale ---
    SaleTokensPurchased {
        buyer: AccountId,
        amount: Decimal,
        cost: Decimal,
    },
    SalePriceUpdated {
        price: Decimal,
    },
}

impl EngineEvent {
    /// Stable SCREAMING label for log lines and indexer dispatch.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::OwnershipTransferred { .. } => "OWNERSHIP_TRANSFERRED",
            Self::RoleGranted { .. } => "ROLE_GRANTED",
            Self::RoleRevoked { .. } => "ROLE_REVOKED",
            Self::Minted { .. } => "MINTED",
            Self::Burned { .. } => "BURNED",
            Self::Transferred { .. } => "TRANSFERRED",
            Self::Approved { .. } => "APPROVED",
            Self::TokensPurchased { .. } => "TOKENS_PURCHASED",
            Self::TokensSold { .. } => "TOKENS_SOLD",
            Self::BuyPriceUpdated { .. } => "BUY_PRICE_UPDATED",
            Self::ExchangeStatusChanged { .. } => "EXCHANGE_STATUS_CHANGED",
            Self::SurplusWithdrawn { .. } => "SURPLUS_WITHDRAWN",
            Self::Staked { .. } => "STAKED",
            Self::AssetListed { .. } => "ASSET_LISTED",
            Self::AssetPurchased { .. } => "ASSET_PURCHASED",
            Self::AssetDelisted { .. } => "ASSET_DELISTED",
            Self::UniqueListed { .. } => "UNIQUE_LISTED",
            Self::UniquePurchased { .. } => "UNIQUE_PURCHASED",
            Self::UniqueDelisted { .. } => "UNIQUE_DELISTED",
            Self::SaleTokensPurchased { .. } => "SALE_TOKENS_PURCHASED",
            Self::SalePriceUpdated { .. } => "SALE_PRICE_UPDATED",
        }
    }
}

impl std::fmt::Display for EngineEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind())
    }
}

/// One appended notification: the event plus its audit metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    /// Strictly increasing per log, starting at 0.
    pub seq: u64,
    /// The notification payload.
    pub event: EngineEvent,
    /// SHA-256 over `seq || canonical JSON payload`.
    pub digest: [u8; 32],
    /// When the record was appended.
    pub recorded_at: DateTime<Utc>,
}

impl EventRecord {
    /// Hex rendering of the digest for log lines and external indexes.
    #[must_use]
    pub fn digest_hex(&self) -> String {
        hex::encode(self.digest)
    }
}

/// Append-only notification log owned by one component.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventLog {
    records: Vec<EventRecord>,
}

impl EventLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Append an event, assigning the next sequence number and digest.
    pub fn record(&mut self, event: EngineEvent) -> &EventRecord {
        let seq = self.records.len() as u64;
        let payload =
            serde_json::to_vec(&event).expect("EngineEvent serialization is infallible");
        let mut hasher = Sha256::new();
        hasher.update(seq.to_le_bytes());
        hasher.update(&payload);
        let digest: [u8; 32] = hasher.finalize().into();

        self.records.push(EventRecord {
            seq,
            event,
            digest,
            recorded_at: Utc::now(),
        });
        self.records.last().expect("just pushed")
    }

    /// All records in append order.
    #[must_use]
    pub fn records(&self) -> &[EventRecord] {
        &self.records
    }

    /// The most recent record, if any.
    #[must_use]
    pub fn last(&self) -> Option<&EventRecord> {
        self.records.last()
    }

    /// Number of records appended.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether nothing has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn purchase_event() -> EngineEvent {
        EngineEvent::TokensPurchased {
            buyer: AccountId::from_bytes([1u8; 16]),
            minted: Decimal::new(10, 0),
            payment: Decimal::new(1000, 0),
        }
    }

    #[test]
    fn kind_labels() {
        assert_eq!(purchase_event().kind(), "TOKENS_PURCHASED");
        assert_eq!(
            EngineEvent::AssetDelisted { id: ListingId(0) }.kind(),
            "ASSET_DELISTED"
        );
    }

    #[test]
    fn sequence_is_strictly_increasing() {
        let mut log = EventLog::new();
        for _ in 0..5 {
            log.record(purchase_event());
        }
        let seqs: Vec<u64> = log.records().iter().map(|r| r.seq).collect();
        assert_eq!(seqs, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn digest_is_stable_for_same_payload_and_seq() {
        let mut a = EventLog::new();
        let mut b = EventLog::new();
        let da = a.record(purchase_event()).digest;
        let db = b.record(purchase_event()).digest;
        assert_eq!(da, db);
    }

    #[test]
    fn digest_differs_by_seq() {
        let mut log = EventLog::new();
        let d0 = log.record(purchase_event()).digest;
        let d1 = log.record(purchase_event()).digest;
        assert_ne!(d0, d1);
    }

    #[test]
    fn record_carries_literal_amounts() {
        let mut log = EventLog::new();
        log.record(purchase_event());
        match &log.last().unwrap().event {
            EngineEvent::TokensPurchased {
                minted, payment, ..
            } => {
                assert_eq!(*minted, Decimal::new(10, 0));
                assert_eq!(*payment, Decimal::new(1000, 0));
            }
            other => panic!("unexpected event: {other}"),
        }
    }

    #[test]
    fn serde_roundtrip() {
        let mut log = EventLog::new();
        log.record(purchase_event());
        let json = serde_json::to_string(&log).unwrap();
        let back: EventLog = serde_json::from_str(&json).unwrap();
        assert_eq!(back.len(), 1);
        assert_eq!(back.last().unwrap().digest, log.last().unwrap().digest);
    }
}
