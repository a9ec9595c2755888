//! Order Concierge Core - lookup keys and speakable order formatting.
//!
//! This crate holds everything about an order lookup that does not touch the
//! network:
//! - validating and normalizing the caller's lookup key (phone, email,
//!   order number, order id)
//! - reshaping an upstream order graph into a flat [`FormattedOrder`] that a
//!   voice agent can read aloud
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no global configuration. Anything store-specific (such as which
//! product types ship physically) is passed in through [`FormatOptions`].
//!
//! # Modules
//!
//! - [`types`] - Domain types for phone numbers, emails, money and orders
//! - [`format`] - Money/date formatting, ship-date tags, fulfillment
//!   reconciliation and the order formatter
//! - [`lookup`] - Lookup keys and the not-found messages for each lookup kind

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod format;
pub mod lookup;
pub mod types;

pub use format::{FormatOptions, FormattedOrder, format_order};
pub use lookup::{LookupError, LookupKey, LookupKind};
pub use types::*;
