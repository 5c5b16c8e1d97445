//! # openvault-ledger
//!
//! The value plane of the custody engine:
//!
//! - [`AccessControl`]: owner singleton plus named role grants. Leaf
//!   authority consulted by every privileged operation.
//! - [`Ledger`]: fungible balance store with mint/burn/transfer and
//!   allowance-based `transfer_from`, plus a supply-conservation audit.
//!
//! Components never reach into each other's state: the ledger takes the
//! access controller by reference for authorization checks, and the
//! higher planes take the ledger by `&mut` per operation.

pub mod access_control;
pub mod ledger;

pub use access_control::AccessControl;
pub use ledger::Ledger;
