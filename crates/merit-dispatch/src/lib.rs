//! # Merit Dispatch
//!
//! Reward delivery for the Merit engine. Detection of a level-up is pure
//! and lives in `merit-core`; this crate owns everything that can fail:
//! resolving an identity to a payment destination ([`AddressResolver`]),
//! the single external payment call ([`PaymentSender`]), and the
//! [`RewardDispatcher`] that ties one reward-worthy transition to at most
//! one payment attempt.

pub mod dispatcher;
pub mod resolver;
pub mod sender;

pub use dispatcher::RewardDispatcher;
pub use resolver::{AddressResolver, HttpAddressResolver};
pub use sender::{HttpWalletSender, PaymentSender};
