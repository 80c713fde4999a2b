//! # Merit Ledger
//!
//! Durable-state contract for the Merit engine. The only thing the engine
//! persists is a single non-negative XP integer per identity; this crate
//! owns that contract ([`XpLedger`]), ships an in-memory implementation,
//! and provides the per-identity lock registry ([`IdentityLocks`]) that
//! serializes read-modify-write sequences for one identity without
//! coupling unrelated identities.

pub mod guard;
pub mod store;

pub use guard::IdentityLocks;
pub use store::{InMemoryXpLedger, XpLedger, XpRecord};
