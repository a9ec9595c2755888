//! GraphQL query definitions for the Shopify Admin API.
//!
//! Each query implements `graphql_client::GraphQLQuery` by hand over a
//! `Variables`/`ResponseData` module, the same shape the derive macro emits.
//! All three order lookups select the same `OrderFields` fragment, so they
//! share the wire types in [`wire`].

use graphql_client::{GraphQLQuery, QueryBody};

macro_rules! order_fields_fragment {
    () => {
        r"
fragment MoneyFields on MoneyBag {
  shopMoney { amount currencyCode }
}

fragment OrderFields on Order {
  id
  name
  createdAt
  email
  tags
  displayFinancialStatus
  displayFulfillmentStatus
  subtotalPriceSet { ...MoneyFields }
  totalShippingPriceSet { ...MoneyFields }
  totalTaxSet { ...MoneyFields }
  totalDiscountsSet { ...MoneyFields }
  totalPriceSet { ...MoneyFields }
  shippingAddress { address1 address2 city provinceCode zip country }
  customer { firstName lastName email phone }
  lineItems(first: 50) {
    edges {
      node {
        id
        title
        variantTitle
        quantity
        requiresShipping
        product { productType }
        originalUnitPriceSet { ...MoneyFields }
        discountedTotalSet { ...MoneyFields }
        discountAllocations { allocatedAmountSet { ...MoneyFields } }
      }
    }
  }
  fulfillments(first: 10) {
    createdAt
    displayStatus
    trackingInfo(first: 1) { company number url }
    fulfillmentLineItems(first: 50) {
      edges { node { lineItem { id } } }
    }
  }
}
"
    };
}

/// Wire types for the `OrderFields` fragment.
pub mod wire {
    use serde::{Deserialize, Deserializer};

    /// Deserialize an explicit `null` the same way as a missing key.
    fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Default + Deserialize<'de>,
    {
        Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
    }

    /// Relay-style connection.
    #[derive(Debug, Clone, Deserialize)]
    #[serde(bound(deserialize = "T: Deserialize<'de>"))]
    pub struct Connection<T> {
        #[serde(default = "Vec::new", deserialize_with = "null_as_default")]
        pub edges: Vec<Edge<T>>,
    }

    impl<T> Default for Connection<T> {
        fn default() -> Self {
            Self { edges: Vec::new() }
        }
    }

    impl<T> Connection<T> {
        /// Consume the connection, yielding its nodes in order.
        pub fn into_nodes(self) -> impl Iterator<Item = T> {
            self.edges.into_iter().map(|e| e.node)
        }
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct Edge<T> {
        pub node: T,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct MoneyV2 {
        pub amount: String,
        pub currency_code: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct MoneyBag {
        pub shop_money: MoneyV2,
    }

    #[derive(Debug, Clone, Default, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Address {
        pub address1: Option<String>,
        pub address2: Option<String>,
        pub city: Option<String>,
        pub province_code: Option<String>,
        pub zip: Option<String>,
        pub country: Option<String>,
    }

    #[derive(Debug, Clone, Default, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Customer {
        pub first_name: Option<String>,
        pub last_name: Option<String>,
        pub email: Option<String>,
        pub phone: Option<String>,
    }

    #[derive(Debug, Clone, Default, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Product {
        pub product_type: Option<String>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct DiscountAllocation {
        pub allocated_amount_set: MoneyBag,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct LineItem {
        pub id: String,
        #[serde(default, deserialize_with = "null_as_default")]
        pub title: String,
        pub variant_title: Option<String>,
        #[serde(default, deserialize_with = "null_as_default")]
        pub quantity: i64,
        #[serde(default, deserialize_with = "null_as_default")]
        pub requires_shipping: bool,
        pub product: Option<Product>,
        pub original_unit_price_set: Option<MoneyBag>,
        pub discounted_total_set: Option<MoneyBag>,
        #[serde(default, deserialize_with = "null_as_default")]
        pub discount_allocations: Vec<DiscountAllocation>,
    }

    #[derive(Debug, Clone, Default, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TrackingInfo {
        pub company: Option<String>,
        pub number: Option<String>,
        pub url: Option<String>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct LineItemRef {
        pub id: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct FulfillmentLineItem {
        pub line_item: Option<LineItemRef>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Fulfillment {
        #[serde(default, deserialize_with = "null_as_default")]
        pub created_at: String,
        pub display_status: Option<String>,
        #[serde(default, deserialize_with = "null_as_default")]
        pub tracking_info: Vec<TrackingInfo>,
        #[serde(default, deserialize_with = "null_as_default")]
        pub fulfillment_line_items: Connection<FulfillmentLineItem>,
    }

    /// An order as selected by `OrderFields`.
    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Order {
        pub id: String,
        #[serde(default, deserialize_with = "null_as_default")]
        pub name: String,
        #[serde(default, deserialize_with = "null_as_default")]
        pub created_at: String,
        pub email: Option<String>,
        #[serde(default, deserialize_with = "null_as_default")]
        pub tags: Vec<String>,
        pub display_financial_status: Option<String>,
        pub display_fulfillment_status: Option<String>,
        pub subtotal_price_set: Option<MoneyBag>,
        pub total_shipping_price_set: Option<MoneyBag>,
        pub total_tax_set: Option<MoneyBag>,
        pub total_discounts_set: Option<MoneyBag>,
        pub total_price_set: Option<MoneyBag>,
        pub shipping_address: Option<Address>,
        pub customer: Option<Customer>,
        #[serde(default, deserialize_with = "null_as_default")]
        pub line_items: Connection<LineItem>,
        #[serde(default, deserialize_with = "null_as_default")]
        pub fulfillments: Vec<Fulfillment>,
    }

    /// A customer with their most recent order.
    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CustomerWithOrders {
        #[serde(flatten)]
        pub customer: Customer,
        #[serde(default, deserialize_with = "null_as_default")]
        pub orders: Connection<Order>,
    }
}

// =============================================================================
// Customer queries
// =============================================================================

/// The customer matching a `phone:` filter, with their most recent order.
pub struct FindCustomerByPhone;

pub mod find_customer_by_phone {
    use serde::{Deserialize, Serialize};

    use super::wire::{Connection, CustomerWithOrders};

    pub const OPERATION_NAME: &str = "FindCustomerByPhone";
    pub const QUERY: &str = concat!(
        r"
query FindCustomerByPhone($query: String!) {
  customers(first: 1, query: $query) {
    edges {
      node {
        firstName
        lastName
        email
        phone
        orders(first: 1, sortKey: CREATED_AT, reverse: true) {
          edges { node { ...OrderFields } }
        }
      }
    }
  }
}
",
        order_fields_fragment!()
    );

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub query: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub customers: Connection<CustomerWithOrders>,
    }
}

impl GraphQLQuery for FindCustomerByPhone {
    type Variables = find_customer_by_phone::Variables;
    type ResponseData = find_customer_by_phone::ResponseData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: find_customer_by_phone::QUERY,
            operation_name: find_customer_by_phone::OPERATION_NAME,
        }
    }
}

// =============================================================================
// Order queries
// =============================================================================

/// The most recent order matching a search filter (`name:`, `email:`).
pub struct FindOrder;

pub mod find_order {
    use serde::{Deserialize, Serialize};

    use super::wire::{Connection, Order};

    pub const OPERATION_NAME: &str = "FindOrder";
    pub const QUERY: &str = concat!(
        r"
query FindOrder($query: String!) {
  orders(first: 1, query: $query, sortKey: CREATED_AT, reverse: true) {
    edges { node { ...OrderFields } }
  }
}
",
        order_fields_fragment!()
    );

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub query: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub orders: Connection<Order>,
    }
}

impl GraphQLQuery for FindOrder {
    type Variables = find_order::Variables;
    type ResponseData = find_order::ResponseData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: find_order::QUERY,
            operation_name: find_order::OPERATION_NAME,
        }
    }
}

/// A single order by GID.
pub struct GetOrder;

pub mod get_order {
    use serde::{Deserialize, Serialize};

    use super::wire::Order;

    pub const OPERATION_NAME: &str = "GetOrder";
    pub const QUERY: &str = concat!(
        r"
query GetOrder($id: ID!) {
  order(id: $id) { ...OrderFields }
}
",
        order_fields_fragment!()
    );

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub id: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub order: Option<Order>,
    }
}

impl GraphQLQuery for GetOrder {
    type Variables = get_order::Variables;
    type ResponseData = get_order::ResponseData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: get_order::QUERY,
            operation_name: get_order::OPERATION_NAME,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_queries_include_fragment() {
        for query in [
            find_customer_by_phone::QUERY,
            find_order::QUERY,
            get_order::QUERY,
        ] {
            assert!(query.contains("fragment OrderFields on Order"));
            assert!(query.contains("...OrderFields"));
        }
    }

    #[test]
    fn test_build_query_body() {
        let body = FindOrder::build_query(find_order::Variables {
            query: "name:1024".to_string(),
        });
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["operationName"], "FindOrder");
        assert_eq!(json["variables"]["query"], "name:1024");
        assert!(json["query"].as_str().unwrap().starts_with("\nquery FindOrder"));
    }

    #[test]
    fn test_sparse_order_deserializes() {
        let order: wire::Order = serde_json::from_value(serde_json::json!({
            "id": "gid://shopify/Order/1",
            "name": "#1001",
            "createdAt": "2024-05-01T00:00:00Z",
            "email": null,
            "tags": [],
            "displayFinancialStatus": null,
            "displayFulfillmentStatus": null,
            "subtotalPriceSet": null,
            "totalShippingPriceSet": null,
            "totalTaxSet": null,
            "totalDiscountsSet": null,
            "totalPriceSet": null,
            "shippingAddress": null,
            "customer": null,
            "lineItems": { "edges": [] },
            "fulfillments": []
        }))
        .unwrap();

        assert_eq!(order.name, "#1001");
        assert!(order.line_items.edges.is_empty());
    }

    #[test]
    fn test_null_collections_read_as_empty() {
        let order: wire::Order = serde_json::from_value(serde_json::json!({
            "id": "gid://shopify/Order/2",
            "name": null,
            "createdAt": null,
            "tags": null,
            "lineItems": null,
            "fulfillments": null
        }))
        .unwrap();

        assert_eq!(order.name, "");
        assert_eq!(order.created_at, "");
        assert!(order.tags.is_empty());
        assert!(order.line_items.edges.is_empty());
        assert!(order.fulfillments.is_empty());
    }

    #[test]
    fn test_null_line_item_fields_read_as_default() {
        let item: wire::LineItem = serde_json::from_value(serde_json::json!({
            "id": "gid://shopify/LineItem/1",
            "title": null,
            "quantity": null,
            "requiresShipping": null,
            "discountAllocations": null
        }))
        .unwrap();

        assert_eq!(item.title, "");
        assert_eq!(item.quantity, 0);
        assert!(!item.requires_shipping);
        assert!(item.discount_allocations.is_empty());
    }

    #[test]
    fn test_null_fulfillment_fields_read_as_empty() {
        let fulfillment: wire::Fulfillment = serde_json::from_value(serde_json::json!({
            "createdAt": null,
            "displayStatus": "IN_TRANSIT",
            "trackingInfo": null,
            "fulfillmentLineItems": { "edges": null }
        }))
        .unwrap();

        assert_eq!(fulfillment.created_at, "");
        assert!(fulfillment.tracking_info.is_empty());
        assert!(fulfillment.fulfillment_line_items.edges.is_empty());

        let bare: wire::Fulfillment =
            serde_json::from_value(serde_json::json!({ "fulfillmentLineItems": null })).unwrap();
        assert!(bare.fulfillment_line_items.edges.is_empty());
    }

    #[test]
    fn test_customer_with_null_orders() {
        let customer: wire::CustomerWithOrders = serde_json::from_value(serde_json::json!({
            "firstName": "Grace",
            "lastName": null,
            "email": null,
            "phone": "+15551234567",
            "orders": null
        }))
        .unwrap();

        assert_eq!(customer.customer.first_name.as_deref(), Some("Grace"));
        assert_eq!(customer.orders.into_nodes().count(), 0);
    }
}
