//! The order formatter.
//!
//! Composes money/date formatting, the ship-date tag, and fulfillment
//! reconciliation into the flat [`FormattedOrder`] returned to the agent.
//! Every nested access tolerates missing data: an order with no items, no
//! address, and no fulfillments still formats.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::types::{
    CustomerSummary, FulfillmentRecord, FulfillmentStatus, ItemCategory, LineItem,
    MailingAddress, OrderRecord,
};

use super::date::{format_date, format_timestamp, parse_timestamp};
use super::fulfillment::{latest_fulfillment, reconcile_line_items};
use super::money::{format_money, sum_money};
use super::ship_date::expected_ship_date;

/// Name used when neither customer source has one.
pub const PLACEHOLDER_CUSTOMER_NAME: &str = "Valued Customer";
/// Summary for an order without line items.
pub const NO_ITEMS_SUMMARY: &str = "No items found in this order.";
/// Status message when nothing indicates a ship date yet.
pub const AWAITING_SHIPMENT: &str = "Awaiting shipment";
/// Status message for orders with nothing to ship.
pub const NOT_SHIPPABLE_MESSAGE: &str = "This order does not require shipping.";

const UNKNOWN_STATUS: &str = "UNKNOWN";
const DEFAULT_VARIANT_TITLE: &str = "Default Title";

/// Store-specific formatting knobs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    /// Product types that ship physically even when the store does not flag
    /// the item as requiring shipping. Compared case-insensitively.
    pub physical_product_types: Vec<String>,
}

impl FormatOptions {
    /// Product types treated as physical when no list is configured.
    pub const DEFAULT_PHYSICAL_PRODUCT_TYPES: &[&str] = &["Embroidered Patches", "Alterations"];

    /// Options with a custom physical product-type allow-list.
    #[must_use]
    pub fn new(physical_product_types: Vec<String>) -> Self {
        Self {
            physical_product_types,
        }
    }

    /// Whether `product_type` is on the physical allow-list.
    #[must_use]
    pub fn is_physical_product_type(&self, product_type: &str) -> bool {
        let product_type = product_type.trim();
        !product_type.is_empty()
            && self
                .physical_product_types
                .iter()
                .any(|t| t.trim().eq_ignore_ascii_case(product_type))
    }

    /// Classify a line item.
    #[must_use]
    pub fn item_category(&self, item: &LineItem) -> ItemCategory {
        let listed = item
            .product_type
            .as_deref()
            .is_some_and(|t| self.is_physical_product_type(t));

        if item.requires_shipping || listed {
            ItemCategory::Physical
        } else {
            ItemCategory::Digital
        }
    }
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_PHYSICAL_PRODUCT_TYPES
                .iter()
                .map(ToString::to_string)
                .collect(),
        )
    }
}

/// Display-ready order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedOrder {
    pub order_number: String,
    pub order_date: String,
    pub customer_name: String,
    pub customer_email: Option<String>,
    pub status: OrderStatusView,
    pub pricing: PricingView,
    pub items: Vec<FormattedItem>,
    pub items_summary: String,
    pub shipping_info: ShippingInfo,
}

/// Financial and fulfillment status as the store displays them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatusView {
    pub financial: String,
    pub fulfillment: String,
}

/// Order totals; zero amounts are `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingView {
    pub subtotal: Option<String>,
    pub shipping: Option<String>,
    pub tax: Option<String>,
    pub total_discount: Option<String>,
    pub total: Option<String>,
}

/// One line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedItem {
    pub name: String,
    pub variant: Option<String>,
    pub quantity: i64,
    pub unit_price: Option<String>,
    pub total_price: Option<String>,
    pub discount: Option<String>,
    pub item_category: ItemCategory,
    pub fulfillment_status: FulfillmentStatus,
}

/// Where the order is going and where it is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingInfo {
    pub is_shippable: bool,
    pub address: Option<String>,
    pub status_message: String,
    pub carrier: Option<String>,
    pub tracking_number: Option<String>,
    pub tracking_url: Option<String>,
}

impl ShippingInfo {
    fn not_shippable() -> Self {
        Self {
            is_shippable: false,
            address: None,
            status_message: NOT_SHIPPABLE_MESSAGE.to_string(),
            carrier: None,
            tracking_number: None,
            tracking_url: None,
        }
    }
}

/// Format an order for the voice agent.
///
/// `customer` is the separately-fetched customer when the lookup resolved a
/// customer before the order (phone lookups); it takes precedence over the
/// customer embedded in the order.
#[must_use]
pub fn format_order(
    order: &OrderRecord,
    customer: Option<&CustomerSummary>,
    options: &FormatOptions,
) -> FormattedOrder {
    let statuses = reconcile_line_items(&order.line_items, &order.fulfillments);
    let items: Vec<FormattedItem> = order
        .line_items
        .iter()
        .zip(statuses)
        .map(|(item, status)| format_item(item, status, options))
        .collect();

    let is_shippable = items.iter().any(|i| i.item_category.is_physical());
    let shipping_info = if is_shippable {
        shipping_info(order)
    } else {
        ShippingInfo::not_shippable()
    };

    FormattedOrder {
        order_number: order.name.clone(),
        order_date: format_timestamp(&order.created_at)
            .unwrap_or_else(|| order.created_at.clone()),
        customer_name: resolve_customer_name(customer, order.customer.as_ref()),
        customer_email: resolve_customer_email(customer, order),
        status: OrderStatusView {
            financial: status_or_unknown(order.financial_status.as_deref()),
            fulfillment: status_or_unknown(order.fulfillment_status.as_deref()),
        },
        pricing: PricingView {
            subtotal: format_money(order.subtotal.as_ref()),
            shipping: format_money(order.shipping.as_ref()),
            tax: format_money(order.tax.as_ref()),
            total_discount: format_money(order.discounts.as_ref()),
            total: format_money(order.total.as_ref()),
        },
        items_summary: items_summary(&order.line_items),
        items,
        shipping_info,
    }
}

/// Customer display name.
///
/// Precedence: the separately-fetched customer, then the customer embedded
/// in the order, then [`PLACEHOLDER_CUSTOMER_NAME`]. A source counts only if
/// it has a non-blank first or last name.
#[must_use]
pub fn resolve_customer_name(
    separate: Option<&CustomerSummary>,
    embedded: Option<&CustomerSummary>,
) -> String {
    [separate, embedded]
        .into_iter()
        .flatten()
        .find_map(CustomerSummary::display_name)
        .unwrap_or_else(|| PLACEHOLDER_CUSTOMER_NAME.to_string())
}

fn resolve_customer_email(
    separate: Option<&CustomerSummary>,
    order: &OrderRecord,
) -> Option<String> {
    [
        separate.and_then(|c| c.email.as_deref()),
        order.email.as_deref(),
        order.customer.as_ref().and_then(|c| c.email.as_deref()),
    ]
    .into_iter()
    .flatten()
    .map(str::trim)
    .find(|e| !e.is_empty())
    .map(ToString::to_string)
}

fn status_or_unknown(status: Option<&str>) -> String {
    status
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(UNKNOWN_STATUS)
        .to_string()
}

fn format_item(
    item: &LineItem,
    status: FulfillmentStatus,
    options: &FormatOptions,
) -> FormattedItem {
    let currency = item
        .original_unit_price
        .as_ref()
        .or(item.discounted_total.as_ref())
        .or_else(|| item.discount_allocations.first().map(|d| &d.amount))
        .map_or("USD", |m| m.currency_code.as_str());
    let discount = sum_money(item.discount_allocations.iter().map(|d| &d.amount), currency);

    FormattedItem {
        name: item.title.clone(),
        variant: item
            .variant_title
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty() && *v != DEFAULT_VARIANT_TITLE)
            .map(ToString::to_string),
        quantity: item.quantity,
        unit_price: format_money(item.original_unit_price.as_ref()),
        total_price: format_money(item.discounted_total.as_ref()),
        discount: format_money(discount.as_ref()),
        item_category: options.item_category(item),
        fulfillment_status: status,
    }
}

fn items_summary(items: &[LineItem]) -> String {
    match items.split_first() {
        None => NO_ITEMS_SUMMARY.to_string(),
        Some((first, [])) => format!("{}x {}", first.quantity, first.title),
        Some((first, rest)) => format!(
            "{}x {} and {} other item(s)",
            first.quantity,
            first.title,
            rest.len()
        ),
    }
}

fn shipping_info(order: &OrderRecord) -> ShippingInfo {
    let latest = latest_fulfillment(&order.fulfillments);
    let tracking = latest.and_then(|f| f.tracking.first());
    let non_blank = |value: Option<&String>| {
        value
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(ToString::to_string)
    };

    ShippingInfo {
        is_shippable: true,
        address: order.shipping_address.as_ref().and_then(format_address),
        status_message: shipping_status_message(expected_ship_date(&order.tags), latest),
        carrier: non_blank(tracking.and_then(|t| t.company.as_ref())),
        tracking_number: non_blank(tracking.and_then(|t| t.number.as_ref())),
        tracking_url: non_blank(tracking.and_then(|t| t.url.as_ref())),
    }
}

fn shipping_status_message(
    ship_date: Option<DateTime<Utc>>,
    latest: Option<&FulfillmentRecord>,
) -> String {
    ship_date
        .or_else(|| latest.and_then(|f| parse_timestamp(&f.created_at)))
        .map_or_else(|| AWAITING_SHIPMENT.to_string(), format_date)
}

fn format_address(address: &MailingAddress) -> Option<String> {
    fn clean(v: Option<&str>) -> Option<&str> {
        v.map(str::trim).filter(|v| !v.is_empty())
    }

    let region = match (
        clean(address.province_code.as_deref()),
        clean(address.zip.as_deref()),
    ) {
        (Some(province), Some(zip)) => Some(format!("{province} {zip}")),
        (Some(part), None) | (None, Some(part)) => Some(part.to_string()),
        (None, None) => None,
    };

    let parts: Vec<String> = [
        clean(address.address1.as_deref()).map(ToString::to_string),
        clean(address.address2.as_deref()).map(ToString::to_string),
        clean(address.city.as_deref()).map(ToString::to_string),
        region,
        clean(address.country.as_deref()).map(ToString::to_string),
    ]
    .into_iter()
    .flatten()
    .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::types::{DiscountAllocation, Money, TrackingEntry};

    fn usd(amount: &str) -> Option<Money> {
        Some(Money::new(amount, "USD"))
    }

    fn item(id: &str, title: &str, quantity: i64) -> LineItem {
        LineItem {
            id: id.to_string(),
            title: title.to_string(),
            variant_title: None,
            quantity,
            original_unit_price: usd("25.00"),
            discounted_total: usd("50.00"),
            discount_allocations: vec![],
            requires_shipping: true,
            product_type: None,
        }
    }

    fn order(items: Vec<LineItem>) -> OrderRecord {
        OrderRecord {
            id: "gid://shopify/Order/1".to_string(),
            name: "#1024".to_string(),
            created_at: "2024-05-01T15:00:00Z".to_string(),
            financial_status: Some("PAID".to_string()),
            fulfillment_status: Some("PARTIALLY_FULFILLED".to_string()),
            email: Some("order@example.com".to_string()),
            subtotal: usd("100.00"),
            shipping: usd("0.00"),
            tax: usd("8.25"),
            discounts: usd("0.00"),
            total: usd("108.25"),
            tags: vec![],
            shipping_address: Some(MailingAddress {
                address1: Some("1 Main St".to_string()),
                address2: None,
                city: Some("Springfield".to_string()),
                province_code: Some("IL".to_string()),
                zip: Some("62701".to_string()),
                country: Some("United States".to_string()),
            }),
            line_items: items,
            fulfillments: vec![],
            customer: None,
        }
    }

    fn customer(first: Option<&str>, last: Option<&str>) -> CustomerSummary {
        CustomerSummary {
            first_name: first.map(ToString::to_string),
            last_name: last.map(ToString::to_string),
            email: None,
            phone: None,
        }
    }

    fn shipped(created_at: &str, ids: &[&str]) -> FulfillmentRecord {
        FulfillmentRecord {
            created_at: created_at.to_string(),
            display_status: Some("IN_TRANSIT".to_string()),
            tracking: vec![TrackingEntry {
                company: Some("UPS".to_string()),
                number: Some("1Z999".to_string()),
                url: Some("https://ups.example/1Z999".to_string()),
            }],
            line_item_ids: ids.iter().map(ToString::to_string).collect(),
        }
    }

    #[test]
    fn test_empty_order_does_not_panic() {
        let formatted = format_order(&OrderRecord::default(), None, &FormatOptions::default());

        assert_eq!(formatted.items_summary, NO_ITEMS_SUMMARY);
        assert!(formatted.items.is_empty());
        assert_eq!(formatted.customer_name, PLACEHOLDER_CUSTOMER_NAME);
        assert_eq!(formatted.status.financial, "UNKNOWN");
        assert!(!formatted.shipping_info.is_shippable);
        assert_eq!(formatted.shipping_info.status_message, NOT_SHIPPABLE_MESSAGE);
        assert_eq!(formatted.pricing.total, None);
    }

    #[test]
    fn test_two_items_one_fulfilled() {
        let mut record = order(vec![
            item("li-1", "Denim Jacket", 2),
            item("li-2", "Canvas Tote", 1),
        ]);
        record.fulfillments = vec![shipped("2024-05-03T10:00:00Z", &["li-1"])];

        let formatted = format_order(&record, None, &FormatOptions::default());

        assert_eq!(formatted.items_summary, "2x Denim Jacket and 1 other item(s)");
        assert_eq!(formatted.items[0].fulfillment_status, FulfillmentStatus::Fulfilled);
        assert_eq!(formatted.items[1].fulfillment_status, FulfillmentStatus::Unfulfilled);
        assert_eq!(formatted.shipping_info.status_message, "May 3, 2024");
        assert_eq!(formatted.shipping_info.carrier.as_deref(), Some("UPS"));
        assert_eq!(formatted.shipping_info.tracking_number.as_deref(), Some("1Z999"));
    }

    #[test]
    fn test_single_item_summary() {
        let formatted = format_order(
            &order(vec![item("li-1", "Denim Jacket", 3)]),
            None,
            &FormatOptions::default(),
        );
        assert_eq!(formatted.items_summary, "3x Denim Jacket");
    }

    #[test]
    fn test_tag_date_beats_fulfillment_date() {
        let mut record = order(vec![item("li-1", "Custom Patch", 1)]);
        record.tags = vec!["w3dd:2024-06-15".to_string()];
        record.fulfillments = vec![shipped("2024-05-03", &["li-1"])];

        let formatted = format_order(&record, None, &FormatOptions::default());
        assert_eq!(formatted.shipping_info.status_message, "June 15, 2024");
    }

    #[test]
    fn test_tag_date_without_fulfillments() {
        let mut record = order(vec![item("li-1", "Custom Patch", 1)]);
        record.tags = vec!["w3dd:2024-06-15".to_string()];

        let formatted = format_order(&record, None, &FormatOptions::default());
        assert_eq!(formatted.shipping_info.status_message, "June 15, 2024");
        assert_eq!(formatted.shipping_info.carrier, None);
    }

    #[test]
    fn test_awaiting_shipment() {
        let formatted = format_order(
            &order(vec![item("li-1", "Denim Jacket", 1)]),
            None,
            &FormatOptions::default(),
        );
        assert_eq!(formatted.shipping_info.status_message, AWAITING_SHIPMENT);
        assert_eq!(formatted.shipping_info.tracking_url, None);
        assert_eq!(
            formatted.shipping_info.address.as_deref(),
            Some("1 Main St, Springfield, IL 62701, United States")
        );
    }

    #[test]
    fn test_digital_only_order_nulls_shipping() {
        let mut gift_card = item("li-1", "Gift Card", 1);
        gift_card.requires_shipping = false;
        let mut record = order(vec![gift_card]);
        record.fulfillments = vec![shipped("2024-05-03", &["li-1"])];
        record.tags = vec!["w3dd:2024-06-15".to_string()];

        let formatted = format_order(&record, None, &FormatOptions::default());
        let shipping = &formatted.shipping_info;

        assert!(!shipping.is_shippable);
        assert_eq!(shipping.address, None);
        assert_eq!(shipping.carrier, None);
        assert_eq!(shipping.tracking_number, None);
        assert_eq!(shipping.status_message, NOT_SHIPPABLE_MESSAGE);
        assert_eq!(formatted.items[0].item_category, ItemCategory::Digital);
    }

    #[test]
    fn test_allow_listed_product_type_is_physical() {
        let mut patch = item("li-1", "Name Patch", 1);
        patch.requires_shipping = false;
        patch.product_type = Some("embroidered patches".to_string());

        let formatted = format_order(&order(vec![patch]), None, &FormatOptions::default());
        assert_eq!(formatted.items[0].item_category, ItemCategory::Physical);
        assert!(formatted.shipping_info.is_shippable);
    }

    #[test]
    fn test_custom_allow_list() {
        let mut service = item("li-1", "Hemming", 1);
        service.requires_shipping = false;
        service.product_type = Some("Alterations".to_string());

        let options = FormatOptions::new(vec!["Monograms".to_string()]);
        let formatted = format_order(&order(vec![service]), None, &options);
        assert_eq!(formatted.items[0].item_category, ItemCategory::Digital);
    }

    #[test]
    fn test_zero_money_is_null() {
        let formatted = format_order(
            &order(vec![item("li-1", "Denim Jacket", 1)]),
            None,
            &FormatOptions::default(),
        );
        assert_eq!(formatted.pricing.shipping, None);
        assert_eq!(formatted.pricing.total_discount, None);
        assert_eq!(formatted.pricing.subtotal.as_deref(), Some("$100.00"));
        assert_eq!(formatted.pricing.total.as_deref(), Some("$108.25"));
    }

    #[test]
    fn test_line_discount_sums_allocations() {
        let mut discounted = item("li-1", "Denim Jacket", 2);
        discounted.discount_allocations = vec![
            DiscountAllocation {
                amount: Money::new("5.00", "USD"),
            },
            DiscountAllocation {
                amount: Money::new("2.50", "USD"),
            },
        ];

        let formatted = format_order(&order(vec![discounted]), None, &FormatOptions::default());
        assert_eq!(formatted.items[0].discount.as_deref(), Some("$7.50"));
        assert_eq!(formatted.items[0].unit_price.as_deref(), Some("$25.00"));
        assert_eq!(formatted.items[0].total_price.as_deref(), Some("$50.00"));
    }

    #[test]
    fn test_no_discount_is_null() {
        let formatted = format_order(
            &order(vec![item("li-1", "Denim Jacket", 1)]),
            None,
            &FormatOptions::default(),
        );
        assert_eq!(formatted.items[0].discount, None);
    }

    #[test]
    fn test_default_variant_title_hidden() {
        let mut plain = item("li-1", "Denim Jacket", 1);
        plain.variant_title = Some("Default Title".to_string());
        let mut sized = item("li-2", "Canvas Tote", 1);
        sized.variant_title = Some("Large / Navy".to_string());

        let formatted = format_order(&order(vec![plain, sized]), None, &FormatOptions::default());
        assert_eq!(formatted.items[0].variant, None);
        assert_eq!(formatted.items[1].variant.as_deref(), Some("Large / Navy"));
    }

    #[test]
    fn test_customer_name_precedence() {
        let separate = customer(Some("Grace"), Some("Hopper"));
        let embedded = customer(Some("Ada"), Some("Lovelace"));

        assert_eq!(
            resolve_customer_name(Some(&separate), Some(&embedded)),
            "Grace Hopper"
        );
        assert_eq!(resolve_customer_name(None, Some(&embedded)), "Ada Lovelace");
        assert_eq!(
            resolve_customer_name(Some(&customer(None, None)), Some(&embedded)),
            "Ada Lovelace"
        );
        assert_eq!(
            resolve_customer_name(Some(&customer(None, None)), Some(&customer(None, None))),
            PLACEHOLDER_CUSTOMER_NAME
        );
        assert_eq!(resolve_customer_name(None, None), PLACEHOLDER_CUSTOMER_NAME);
    }

    #[test]
    fn test_customer_email_precedence() {
        let mut record = order(vec![]);
        let mut separate = customer(Some("Grace"), None);
        separate.email = Some("grace@example.com".to_string());

        let formatted = format_order(&record, Some(&separate), &FormatOptions::default());
        assert_eq!(formatted.customer_email.as_deref(), Some("grace@example.com"));

        let formatted = format_order(&record, None, &FormatOptions::default());
        assert_eq!(formatted.customer_email.as_deref(), Some("order@example.com"));

        record.email = None;
        record.customer = Some(CustomerSummary {
            email: Some("embedded@example.com".to_string()),
            ..Default::default()
        });
        let formatted = format_order(&record, None, &FormatOptions::default());
        assert_eq!(
            formatted.customer_email.as_deref(),
            Some("embedded@example.com")
        );
    }

    #[test]
    fn test_order_date_and_number() {
        let formatted = format_order(&order(vec![]), None, &FormatOptions::default());
        assert_eq!(formatted.order_number, "#1024");
        assert_eq!(formatted.order_date, "May 1, 2024");
    }

    #[test]
    fn test_missing_address_is_null() {
        let mut record = order(vec![item("li-1", "Denim Jacket", 1)]);
        record.shipping_address = Some(MailingAddress::default());
        let formatted = format_order(&record, None, &FormatOptions::default());
        assert_eq!(formatted.shipping_info.address, None);

        record.shipping_address = None;
        let formatted = format_order(&record, None, &FormatOptions::default());
        assert_eq!(formatted.shipping_info.address, None);
    }

    #[test]
    fn test_address_joins_trimmed_parts() {
        let formatted = format_order(
            &order(vec![item("li-1", "Denim Jacket", 1)]),
            None,
            &FormatOptions::default(),
        );
        assert_eq!(
            formatted.shipping_info.address.as_deref(),
            Some("1 Main St, Springfield, IL 62701, United States")
        );

        let mut record = order(vec![item("li-1", "Denim Jacket", 1)]);
        record.shipping_address = Some(MailingAddress {
            address1: Some("  12 Analytical Way ".to_string()),
            address2: Some("   ".to_string()),
            city: Some("London".to_string()),
            province_code: None,
            zip: Some(" N1 9GU".to_string()),
            country: Some("United Kingdom".to_string()),
        });
        let formatted = format_order(&record, None, &FormatOptions::default());
        assert_eq!(
            formatted.shipping_info.address.as_deref(),
            Some("12 Analytical Way, London, N1 9GU, United Kingdom")
        );
    }

    #[test]
    fn test_serialized_shape() {
        let mut record = order(vec![item("li-1", "Denim Jacket", 1)]);
        record.fulfillments = vec![shipped("2024-05-03", &["li-1"])];
        let json = serde_json::to_value(format_order(&record, None, &FormatOptions::default()))
            .unwrap();

        assert_eq!(json["orderNumber"], "#1024");
        assert_eq!(json["pricing"]["totalDiscount"], serde_json::Value::Null);
        assert_eq!(json["items"][0]["itemCategory"], "PHYSICAL");
        assert_eq!(json["items"][0]["fulfillmentStatus"], "FULFILLED");
        assert_eq!(json["shippingInfo"]["isShippable"], true);
        assert_eq!(json["shippingInfo"]["trackingUrl"], "https://ups.example/1Z999");
    }
}
