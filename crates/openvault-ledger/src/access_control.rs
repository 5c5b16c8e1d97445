//! Owner singleton and named role grants.
//!
//! One `AccessControl` value is owned by the platform and passed by
//! reference to every component that needs an authorization check. It is
//! never a process-wide global.

use std::collections::{HashMap, HashSet};

use openvault_types::{AccountId, EngineEvent, EventLog, EventRecord, Result, Role, VaultError};

/// Owner pointer plus the set of role grants.
///
/// Grants are idempotent: granting a role an account already holds (or
/// revoking one it does not) is a silent no-op success, and no
/// notification is emitted for a non-change.
#[derive(Debug, Clone)]
pub struct AccessControl {
    owner: AccountId,
    grants: HashMap<Role, HashSet<AccountId>>,
    events: EventLog,
}

impl AccessControl {
    /// Create the authority with its initial owner.
    #[must_use]
    pub fn new(owner: AccountId) -> Self {
        Self {
            owner,
            grants: HashMap::new(),
            events: EventLog::new(),
        }
    }

    /// The current owner.
    #[must_use]
    pub fn owner(&self) -> AccountId {
        self.owner
    }

    /// Whether `account` holds `role`.
    #[must_use]
    pub fn has_role(&self, role: Role, account: AccountId) -> bool {
        self.grants
            .get(&role)
            .is_some_and(|holders| holders.contains(&account))
    }

    /// Guard helper: `Ok` only when `caller` is the owner.
    pub fn require_owner(&self, caller: AccountId) -> Result<()> {
        if caller == self.owner {
            Ok(())
        } else {
            Err(VaultError::Unauthorized {
                reason: "caller is not the owner".to_string(),
            })
        }
    }

    /// Hand ownership to `new_owner`. Owner only.
    pub fn transfer_ownership(&mut self, caller: AccountId, new_owner: AccountId) -> Result<()> {
        self.require_owner(caller)?;
        let previous = self.owner;
        self.owner = new_owner;
        tracing::info!(%previous, %new_owner, "ownership transferred");
        self.events.record(EngineEvent::OwnershipTransferred {
            previous,
            new: new_owner,
        });
        Ok(())
    }

    /// Grant `role` to `account`. Owner only; idempotent.
    pub fn grant_role(&mut self, caller: AccountId, role: Role, account: AccountId) -> Result<()> {
        self.require_owner(caller)?;
        let inserted = self.grants.entry(role).or_default().insert(account);
        if inserted {
            tracing::debug!(%role, %account, "role granted");
            self.events.record(EngineEvent::RoleGranted { role, account });
        }
        Ok(())
    }

    /// Revoke `role` from `account`. Owner only; idempotent.
    pub fn revoke_role(&mut self, caller: AccountId, role: Role, account: AccountId) -> Result<()> {
        self.require_owner(caller)?;
        let removed = self
            .grants
            .get_mut(&role)
            .is_some_and(|holders| holders.remove(&account));
        if removed {
            tracing::debug!(%role, %account, "role revoked");
            self.events.record(EngineEvent::RoleRevoked { role, account });
        }
        Ok(())
    }

    /// Notifications emitted so far.
    #[must_use]
    pub fn events(&self) -> &[EventRecord] {
        self.events.records()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_is_set_at_creation() {
        let owner = AccountId::new();
        let acl = AccessControl::new(owner);
        assert_eq!(acl.owner(), owner);
        assert!(acl.require_owner(owner).is_ok());
    }

    #[test]
    fn non_owner_cannot_transfer_ownership() {
        let owner = AccountId::new();
        let stranger = AccountId::new();
        let mut acl = AccessControl::new(owner);
        let err = acl.transfer_ownership(stranger, stranger).unwrap_err();
        assert!(matches!(err, VaultError::Unauthorized { .. }));
        assert_eq!(acl.owner(), owner);
    }

    #[test]
    fn ownership_transfer_updates_owner_and_notifies() {
        let owner = AccountId::new();
        let next = AccountId::new();
        let mut acl = AccessControl::new(owner);
        acl.transfer_ownership(owner, next).unwrap();

        assert_eq!(acl.owner(), next);
        // Old owner lost authority.
        assert!(acl.require_owner(owner).is_err());
        assert!(matches!(
            acl.events().last().unwrap().event,
            EngineEvent::OwnershipTransferred { .. }
        ));
    }

    #[test]
    fn grant_and_check_role() {
        let owner = AccountId::new();
        let minter = AccountId::new();
        let mut acl = AccessControl::new(owner);

        assert!(!acl.has_role(Role::Minter, minter));
        acl.grant_role(owner, Role::Minter, minter).unwrap();
        assert!(acl.has_role(Role::Minter, minter));
    }

    #[test]
    fn duplicate_grant_is_noop_success() {
        let owner = AccountId::new();
        let minter = AccountId::new();
        let mut acl = AccessControl::new(owner);

        acl.grant_role(owner, Role::Minter, minter).unwrap();
        acl.grant_role(owner, Role::Minter, minter).unwrap();

        assert!(acl.has_role(Role::Minter, minter));
        // Only the first grant produced a notification.
        assert_eq!(acl.events().len(), 1);
    }

    #[test]
    fn revoke_removes_grant() {
        let owner = AccountId::new();
        let minter = AccountId::new();
        let mut acl = AccessControl::new(owner);

        acl.grant_role(owner, Role::Minter, minter).unwrap();
        acl.revoke_role(owner, Role::Minter, minter).unwrap();
        assert!(!acl.has_role(Role::Minter, minter));

        // Revoking again is a silent no-op.
        acl.revoke_role(owner, Role::Minter, minter).unwrap();
        assert_eq!(acl.events().len(), 2);
    }

    #[test]
    fn non_owner_cannot_grant() {
        let owner = AccountId::new();
        let stranger = AccountId::new();
        let mut acl = AccessControl::new(owner);
        let err = acl
            .grant_role(stranger, Role::Minter, stranger)
            .unwrap_err();
        assert!(matches!(err, VaultError::Unauthorized { .. }));
        assert!(!acl.has_role(Role::Minter, stranger));
    }
}
