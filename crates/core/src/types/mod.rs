//! Core types for Order Concierge.
//!
//! This module provides type-safe wrappers for lookup input and the
//! request-scoped order graph returned by the store.

pub mod email;
pub mod money;
pub mod order;
pub mod phone;
pub mod status;

pub use email::{Email, EmailError};
pub use money::{CurrencyCode, Money};
pub use order::{
    CustomerSummary, DiscountAllocation, FulfillmentRecord, LineItem, MailingAddress, OrderRecord,
    TrackingEntry,
};
pub use phone::PhoneNumber;
pub use status::*;
