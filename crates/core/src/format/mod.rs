//! Turning an [`OrderRecord`](crate::OrderRecord) into something a voice agent
//! can say out loud.
//!
//! # Modules
//!
//! - [`money`] - `"$1,234.50"` style amounts, with zero treated as absent
//! - [`date`] - Timestamp parsing and `"June 15, 2024"` style dates
//! - [`ship_date`] - Expected ship date encoded as an order tag
//! - [`fulfillment`] - Per-line fulfillment status and the latest fulfillment
//! - [`order`] - The order formatter that composes the above

pub mod date;
pub mod fulfillment;
pub mod money;
pub mod order;
pub mod ship_date;

pub use date::{format_date, format_timestamp, parse_timestamp};
pub use fulfillment::{fulfilled_line_item_ids, latest_fulfillment, reconcile_line_items};
pub use money::{format_money, sum_money};
pub use order::{
    FormatOptions, FormattedItem, FormattedOrder, OrderStatusView, PricingView, ShippingInfo,
    format_order, resolve_customer_name,
};
pub use ship_date::{SHIP_DATE_TAG_PREFIX, expected_ship_date};
