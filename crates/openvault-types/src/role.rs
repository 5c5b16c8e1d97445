//! Named roles grantable by the owner, independent of ownership itself.

use serde::{Deserialize, Serialize};

/// A capability the owner can grant to a specific account.
///
/// Roles are checked, never implicitly revoked. Today the only role is
/// `Minter`, the grant that lets the exchange and sale components create
/// ledger balance without being the owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// May call `Ledger::mint`.
    Minter,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Minter => write!(f, "MINTER"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_display() {
        assert_eq!(format!("{}", Role::Minter), "MINTER");
    }

    #[test]
    fn role_serde_roundtrip() {
        let json = serde_json::to_string(&Role::Minter).unwrap();
        let back: Role = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Role::Minter);
    }
}
