//! Order graph as returned by the store, after wire decoding.
//!
//! These types are deliberately permissive: lightly-used fields are not
//! schema-guaranteed upstream, so anything that can be missing is an
//! `Option` or an empty collection and the formatter degrades gracefully.

use serde::{Deserialize, Serialize};

use super::money::Money;

/// A customer as far as the voice agent cares.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerSummary {
    /// First name.
    pub first_name: Option<String>,
    /// Last name.
    pub last_name: Option<String>,
    /// Email address.
    pub email: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
}

impl CustomerSummary {
    /// Full name from whichever name parts are present and non-blank.
    ///
    /// Returns `None` when both parts are absent or blank.
    #[must_use]
    pub fn display_name(&self) -> Option<String> {
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }
}

/// Mailing address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailingAddress {
    /// First line of the address.
    pub address1: Option<String>,
    /// Second line of the address.
    pub address2: Option<String>,
    /// City.
    pub city: Option<String>,
    /// Province or state code.
    pub province_code: Option<String>,
    /// Postal/ZIP code.
    pub zip: Option<String>,
    /// Country name.
    pub country: Option<String>,
}

/// Tracking information attached to a fulfillment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingEntry {
    /// Carrier name.
    pub company: Option<String>,
    /// Tracking number.
    pub number: Option<String>,
    /// Tracking URL.
    pub url: Option<String>,
}

/// A shipment event covering a subset of an order's line items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FulfillmentRecord {
    /// Creation timestamp (ISO 8601).
    pub created_at: String,
    /// Display status (e.g., `"FULFILLED"`, `"IN_TRANSIT"`).
    pub display_status: Option<String>,
    /// Tracking entries; the store returns at most one per fulfillment here.
    pub tracking: Vec<TrackingEntry>,
    /// Line item IDs this fulfillment covers.
    pub line_item_ids: Vec<String>,
}

/// A discount applied to a line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountAllocation {
    /// Allocated amount.
    pub amount: Money,
}

/// A line item in an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Line item ID, cross-referenced by fulfillments.
    pub id: String,
    /// Product title.
    pub title: String,
    /// Variant title.
    pub variant_title: Option<String>,
    /// Quantity ordered.
    pub quantity: i64,
    /// Price per unit before discounts.
    pub original_unit_price: Option<Money>,
    /// Line total after discounts.
    pub discounted_total: Option<Money>,
    /// Discounts allocated to this line.
    pub discount_allocations: Vec<DiscountAllocation>,
    /// Whether the store flags this item as shippable.
    pub requires_shipping: bool,
    /// Product type classifier.
    pub product_type: Option<String>,
}

/// An order as returned by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    /// Order GID.
    pub id: String,
    /// Display number (e.g., `"#1024"`).
    pub name: String,
    /// Creation timestamp (ISO 8601).
    pub created_at: String,
    /// Display financial status (e.g., `"PAID"`).
    pub financial_status: Option<String>,
    /// Display fulfillment status (e.g., `"UNFULFILLED"`).
    pub fulfillment_status: Option<String>,
    /// Email the order was placed with.
    pub email: Option<String>,
    /// Subtotal.
    pub subtotal: Option<Money>,
    /// Total shipping charged.
    pub shipping: Option<Money>,
    /// Total tax.
    pub tax: Option<Money>,
    /// Total discounts.
    pub discounts: Option<Money>,
    /// Grand total.
    pub total: Option<Money>,
    /// Order tags.
    pub tags: Vec<String>,
    /// Shipping address.
    pub shipping_address: Option<MailingAddress>,
    /// Line items.
    pub line_items: Vec<LineItem>,
    /// Fulfillments.
    pub fulfillments: Vec<FulfillmentRecord>,
    /// Customer embedded in the order.
    pub customer: Option<CustomerSummary>,
}
