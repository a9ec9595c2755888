//! Conversions from GraphQL wire types to core order types.

use order_concierge_core::{
    CustomerSummary, DiscountAllocation, FulfillmentRecord, LineItem, MailingAddress, Money,
    OrderRecord, TrackingEntry,
};

use super::queries::wire;

fn convert_money(bag: wire::MoneyBag) -> Money {
    Money::new(bag.shop_money.amount, bag.shop_money.currency_code)
}

pub fn convert_customer(customer: wire::Customer) -> CustomerSummary {
    CustomerSummary {
        first_name: customer.first_name,
        last_name: customer.last_name,
        email: customer.email,
        phone: customer.phone,
    }
}

fn convert_address(address: wire::Address) -> MailingAddress {
    MailingAddress {
        address1: address.address1,
        address2: address.address2,
        city: address.city,
        province_code: address.province_code,
        zip: address.zip,
        country: address.country,
    }
}

fn convert_line_item(item: wire::LineItem) -> LineItem {
    LineItem {
        id: item.id,
        title: item.title,
        variant_title: item.variant_title,
        quantity: item.quantity,
        original_unit_price: item.original_unit_price_set.map(convert_money),
        discounted_total: item.discounted_total_set.map(convert_money),
        discount_allocations: item
            .discount_allocations
            .into_iter()
            .map(|d| DiscountAllocation {
                amount: convert_money(d.allocated_amount_set),
            })
            .collect(),
        requires_shipping: item.requires_shipping,
        product_type: item.product.and_then(|p| p.product_type),
    }
}

fn convert_fulfillment(fulfillment: wire::Fulfillment) -> FulfillmentRecord {
    FulfillmentRecord {
        created_at: fulfillment.created_at,
        display_status: fulfillment.display_status,
        tracking: fulfillment
            .tracking_info
            .into_iter()
            .map(|t| TrackingEntry {
                company: t.company,
                number: t.number,
                url: t.url,
            })
            .collect(),
        line_item_ids: fulfillment
            .fulfillment_line_items
            .into_nodes()
            .filter_map(|n| n.line_item.map(|li| li.id))
            .collect(),
    }
}

pub fn convert_order(order: wire::Order) -> OrderRecord {
    OrderRecord {
        id: order.id,
        name: order.name,
        created_at: order.created_at,
        financial_status: order.display_financial_status,
        fulfillment_status: order.display_fulfillment_status,
        email: order.email,
        subtotal: order.subtotal_price_set.map(convert_money),
        shipping: order.total_shipping_price_set.map(convert_money),
        tax: order.total_tax_set.map(convert_money),
        discounts: order.total_discounts_set.map(convert_money),
        total: order.total_price_set.map(convert_money),
        tags: order.tags,
        shipping_address: order.shipping_address.map(convert_address),
        line_items: order.line_items.into_nodes().map(convert_line_item).collect(),
        fulfillments: order
            .fulfillments
            .into_iter()
            .map(convert_fulfillment)
            .collect(),
        customer: order.customer.map(convert_customer),
    }
}
