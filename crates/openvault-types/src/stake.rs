//! Time-locked stake positions.
//!
//! A position is immutable once created: no partial withdrawal, no
//! top-up. The staked amount lives in the registry's custody account on
//! the ledger for the life of the position.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single lock position owned by one staking account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakePosition {
    /// Ordinal of this position within the owning account (0-based,
    /// creation order).
    pub index: u32,
    /// Amount locked. Always positive.
    pub amount: Decimal,
    /// Lock duration in seconds. Always positive.
    pub duration_secs: u64,
    /// When the position was created.
    pub staked_at: DateTime<Utc>,
}

impl StakePosition {
    /// The instant the lock duration elapses.
    #[must_use]
    pub fn matures_at(&self) -> DateTime<Utc> {
        self.staked_at + chrono::Duration::seconds(i64::try_from(self.duration_secs).unwrap_or(i64::MAX))
    }

    /// Whether the lock duration has elapsed at `now`.
    #[must_use]
    pub fn is_mature(&self, now: DateTime<Utc>) -> bool {
        now >= self.matures_at()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_position() -> StakePosition {
        StakePosition {
            index: 0,
            amount: Decimal::new(1000, 0),
            duration_secs: 90 * 24 * 60 * 60,
            staked_at: Utc::now(),
        }
    }

    #[test]
    fn matures_after_duration() {
        let pos = make_position();
        let before = pos.staked_at + chrono::Duration::days(89);
        let after = pos.staked_at + chrono::Duration::days(91);
        assert!(!pos.is_mature(before));
        assert!(pos.is_mature(after));
    }

    #[test]
    fn matures_at_matches_duration() {
        let pos = make_position();
        assert_eq!(
            pos.matures_at() - pos.staked_at,
            chrono::Duration::days(90)
        );
    }

    #[test]
    fn serde_roundtrip() {
        let pos = make_position();
        let json = serde_json::to_string(&pos).unwrap();
        let back: StakePosition = serde_json::from_str(&json).unwrap();
        assert_eq!(pos, back);
    }
}
