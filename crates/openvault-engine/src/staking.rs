//! Time-locked staking registry.
//!
//! Staking is a transfer, not a burn: the amount moves from the staker
//! into the registry's custody account on the ledger and stays there for
//! the life of the position. If the transfer fails, no position is
//! created. There is no unlock path; positions are append-only.

use std::collections::HashMap;

use chrono::Utc;
use openvault_ledger::Ledger;
use openvault_types::{
    AccountId, EngineEvent, EventLog, EventRecord, Result, StakePosition, VaultError,
};
use rust_decimal::Decimal;

/// Per-account lock positions backed by ledger custody.
#[derive(Debug, Clone)]
pub struct StakingRegistry {
    /// Ledger account holding every staked amount.
    custody_account: AccountId,
    positions: HashMap<AccountId, Vec<StakePosition>>,
    events: EventLog,
}

impl StakingRegistry {
    /// Create an empty registry with a fresh custody account.
    #[must_use]
    pub fn new() -> Self {
        Self {
            custody_account: AccountId::new(),
            positions: HashMap::new(),
            events: EventLog::new(),
        }
    }

    /// Lock `amount` for `duration_secs`.
    ///
    /// # Errors
    /// - `InvalidAmount` for a non-positive amount or zero duration
    /// - `InsufficientBalance` if the staker cannot cover `amount`;
    ///   no position is created in that case
    pub fn stake(
        &mut self,
        ledger: &mut Ledger,
        staker: AccountId,
        amount: Decimal,
        duration_secs: u64,
    ) -> Result<()> {
        if amount <= Decimal::ZERO {
            return Err(VaultError::InvalidAmount { amount });
        }
        if duration_secs == 0 {
            return Err(VaultError::InvalidAmount {
                amount: Decimal::ZERO,
            });
        }

        // Custody first; on failure nothing is recorded.
        ledger.transfer(staker, self.custody_account, amount)?;

        let entry = self.positions.entry(staker).or_default();
        let index = u32::try_from(entry.len())
            .map_err(|_| VaultError::Internal("position index overflow".to_string()))?;
        entry.push(StakePosition {
            index,
            amount,
            duration_secs,
            staked_at: Utc::now(),
        });
        tracing::info!(%staker, %amount, duration_secs, "stake created");
        self.events.record(EngineEvent::Staked {
            account: staker,
            amount,
            duration_secs,
        });
        Ok(())
    }

    /// All of `account`'s positions in creation order.
    #[must_use]
    pub fn positions(&self, account: AccountId) -> &[StakePosition] {
        self.positions.get(&account).map_or(&[], Vec::as_slice)
    }

    /// Total amount `account` currently has locked.
    #[must_use]
    pub fn total_locked(&self, account: AccountId) -> Decimal {
        self.positions(account).iter().map(|p| p.amount).sum()
    }

    /// The ledger account holding all staked value.
    #[must_use]
    pub fn custody_account(&self) -> AccountId {
        self.custody_account
    }

    /// Notifications emitted so far.
    #[must_use]
    pub fn events(&self) -> &[EventRecord] {
        self.events.records()
    }
}

impl Default for StakingRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use openvault_ledger::AccessControl;

    fn dec(n: i64) -> Decimal {
        Decimal::new(n, 0)
    }

    const DAY: u64 = 24 * 60 * 60;

    fn setup() -> (Ledger, StakingRegistry, AccountId) {
        let owner = AccountId::new();
        let acl = AccessControl::new(owner);
        let mut ledger = Ledger::new("CaDuCoinX", "CDX");
        let staker = AccountId::new();
        ledger.mint(&acl, owner, staker, dec(10_000)).unwrap();
        (ledger, StakingRegistry::new(), staker)
    }

    #[test]
    fn stake_moves_balance_into_custody() {
        let (mut ledger, mut registry, staker) = setup();

        registry
            .stake(&mut ledger, staker, dec(1000), 90 * DAY)
            .unwrap();

        assert_eq!(ledger.balance_of(staker), dec(9000));
        assert_eq!(
            ledger.balance_of(registry.custody_account()),
            dec(1000)
        );
        assert_eq!(registry.total_locked(staker), dec(1000));
    }

    #[test]
    fn positions_keep_creation_order() {
        // Two stakes: 1000 for 90 days, then 500 for 180 days.
        let (mut ledger, mut registry, staker) = setup();

        registry
            .stake(&mut ledger, staker, dec(1000), 90 * DAY)
            .unwrap();
        registry
            .stake(&mut ledger, staker, dec(500), 180 * DAY)
            .unwrap();

        let positions = registry.positions(staker);
        assert_eq!(positions.len(), 2);
        assert_eq!(positions[0].index, 0);
        assert_eq!(positions[0].amount, dec(1000));
        assert_eq!(positions[0].duration_secs, 90 * DAY);
        assert_eq!(positions[1].index, 1);
        assert_eq!(positions[1].amount, dec(500));
        assert_eq!(positions[1].duration_secs, 180 * DAY);
    }

    #[test]
    fn stake_beyond_balance_creates_nothing() {
        let (mut ledger, mut registry, staker) = setup();

        let err = registry
            .stake(&mut ledger, staker, dec(20_000), 90 * DAY)
            .unwrap_err();
        assert!(matches!(err, VaultError::InsufficientBalance { .. }));
        assert!(registry.positions(staker).is_empty());
        assert_eq!(ledger.balance_of(staker), dec(10_000));
    }

    #[test]
    fn zero_amount_rejected() {
        let (mut ledger, mut registry, staker) = setup();
        let err = registry
            .stake(&mut ledger, staker, Decimal::ZERO, 90 * DAY)
            .unwrap_err();
        assert!(matches!(err, VaultError::InvalidAmount { .. }));
    }

    #[test]
    fn zero_duration_rejected() {
        let (mut ledger, mut registry, staker) = setup();
        let err = registry
            .stake(&mut ledger, staker, dec(100), 0)
            .unwrap_err();
        assert!(matches!(err, VaultError::InvalidAmount { .. }));
        assert_eq!(ledger.balance_of(staker), dec(10_000));
    }

    #[test]
    fn unknown_account_has_no_positions() {
        let (_, registry, _) = setup();
        assert!(registry.positions(AccountId::new()).is_empty());
        assert_eq!(registry.total_locked(AccountId::new()), Decimal::ZERO);
    }

    #[test]
    fn stake_emits_notification() {
        let (mut ledger, mut registry, staker) = setup();
        registry
            .stake(&mut ledger, staker, dec(1000), 90 * DAY)
            .unwrap();

        match &registry.events().last().unwrap().event {
            EngineEvent::Staked {
                account,
                amount,
                duration_secs,
            } => {
                assert_eq!(*account, staker);
                assert_eq!(*amount, dec(1000));
                assert_eq!(*duration_secs, 90 * DAY);
            }
            other => panic!("unexpected event: {other}"),
        }
    }
}
