//! # openvault-market
//!
//! The settlement plane for fixed-price sales:
//!
//! - [`ListingBook`]: the shared listing state machine (monotonic ids,
//!   Active → Sold/Delisted terminal transitions, cleared price on
//!   settlement).
//! - [`AssetMarketplace`]: fungible-described items; payment is pulled
//!   from the buyer at settlement, nothing is escrowed.
//! - [`UniqueMarketplace`]: uniquely-identified assets held in
//!   marketplace custody from listing until sale or delisting.
//!
//! Both marketplaces settle against an external [`PaymentLedger`] and
//! treat it as untrusted: every check runs before the first external
//! mutation, and the book is only updated after external calls succeed.
//!
//! [`PaymentLedger`]: openvault_types::PaymentLedger

pub mod assets;
pub mod book;
pub mod uniques;

pub use assets::AssetMarketplace;
pub use book::ListingBook;
pub use uniques::UniqueMarketplace;
