//! Integration tests for Order Concierge.
//!
//! # Running Tests
//!
//! ```bash
//! # End-to-end tests against a mocked Shopify (no credentials needed)
//! cargo test -p order-concierge-integration-tests
//!
//! # Live smoke test against a deployed server
//! CONCIERGE_BASE_URL=https://concierge.internal \
//!   cargo test -p order-concierge-integration-tests -- --ignored
//! ```
//!
//! [`TestServer`] boots the real router on an ephemeral port with Shopify
//! replaced by a `wiremock` server, so tests exercise HTTP end to end.

use std::net::SocketAddr;
use std::time::Duration;

use order_concierge_core::FormatOptions;
use order_concierge_server::config::{EmailConfig, ShopifyConfig};
use order_concierge_server::services::EmailService;
use order_concierge_server::shopify::ShopifyClient;
use order_concierge_server::{AppState, build_app};
use reqwest::{Client, StatusCode};
use secrecy::SecretString;
use serde_json::{Value, json};
use tokio::task::JoinHandle;
use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A running server backed by a mock Shopify.
pub struct TestServer {
    /// Mock Shopify GraphQL endpoint.
    pub shopify: MockServer,
    client: Client,
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a server without SMTP (escalation disabled).
    pub async fn start() -> Self {
        Self::start_with(None, FormatOptions::default()).await
    }

    /// Start a server with explicit SMTP config and formatter options.
    pub async fn start_with(email: Option<EmailConfig>, format_options: FormatOptions) -> Self {
        let shopify = MockServer::start().await;

        let client = ShopifyClient::new(&ShopifyConfig {
            store: "concierge-test.myshopify.com".to_string(),
            api_version: "2025-01".to_string(),
            access_token: SecretString::from("shpat_integration_7Hq2Lx9Vb4"),
            timeout: Duration::from_secs(5),
            endpoint_override: Some(format!("{}/admin/api/2025-01/graphql.json", shopify.uri())),
        })
        .expect("Failed to build Shopify client");

        let email = email.map(|config| EmailService::new(&config).expect("Failed to build mailer"));
        let app = build_app(AppState::from_parts(client, email, format_options));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has no address");

        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            shopify,
            client: Client::new(),
            addr,
            handle,
        }
    }

    /// Absolute URL for a path on the test server.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// POST a JSON body and return the status and parsed JSON response.
    pub async fn post_json(&self, path: &str, body: &Value) -> (StatusCode, Value) {
        let resp = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Request failed");
        read_json(resp).await
    }

    /// GET a path and return the status and parsed JSON response.
    pub async fn get_json(&self, path: &str) -> (StatusCode, Value) {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Request failed");
        read_json(resp).await
    }

    /// Answer any GraphQL request whose variables contain `variables` with
    /// `data`.
    pub async fn mock_query(&self, variables: Value, data: Value) {
        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "variables": variables })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": data })))
            .mount(&self.shopify)
            .await;
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn read_json(resp: reqwest::Response) -> (StatusCode, Value) {
    let status = resp.status();
    let body = resp.json().await.expect("Response is not JSON");
    (status, body)
}

// =============================================================================
// Upstream fixtures
// =============================================================================

/// Shopify `MoneyBag` JSON in USD.
#[must_use]
pub fn usd(amount: &str) -> Value {
    json!({ "shopMoney": { "amount": amount, "currencyCode": "USD" } })
}

/// A line item node.
#[must_use]
pub fn line_item(id: u64, title: &str, quantity: i64, requires_shipping: bool) -> Value {
    json!({
        "id": format!("gid://shopify/LineItem/{id}"),
        "title": title,
        "variantTitle": "Default Title",
        "quantity": quantity,
        "requiresShipping": requires_shipping,
        "product": { "productType": null },
        "originalUnitPriceSet": usd("25.00"),
        "discountedTotalSet": usd("25.00"),
        "discountAllocations": []
    })
}

/// A fulfillment covering the given line item ids.
#[must_use]
pub fn fulfillment(
    created_at: &str,
    line_item_ids: &[u64],
    tracking_number: Option<&str>,
) -> Value {
    let edges: Vec<Value> = line_item_ids
        .iter()
        .map(|id| {
            json!({ "node": { "lineItem": { "id": format!("gid://shopify/LineItem/{id}") } } })
        })
        .collect();
    let tracking: Vec<Value> = tracking_number
        .map(|number| {
            json!({
                "company": "UPS",
                "number": number,
                "url": format!("https://ups.test/track/{number}")
            })
        })
        .into_iter()
        .collect();

    json!({
        "createdAt": created_at,
        "displayStatus": "IN_TRANSIT",
        "trackingInfo": tracking,
        "fulfillmentLineItems": { "edges": edges }
    })
}

/// An order node selected by the `OrderFields` fragment.
#[must_use]
pub fn order(name: &str, line_items: Vec<Value>, fulfillments: Vec<Value>, tags: &[&str]) -> Value {
    let number = name.trim_start_matches('#');
    let edges: Vec<Value> = line_items.into_iter().map(|node| json!({ "node": node })).collect();

    json!({
        "id": format!("gid://shopify/Order/{number}"),
        "name": name,
        "createdAt": "2024-05-01T15:00:00Z",
        "email": "ada@example.com",
        "tags": tags,
        "displayFinancialStatus": "PAID",
        "displayFulfillmentStatus": "UNFULFILLED",
        "subtotalPriceSet": usd("50.00"),
        "totalShippingPriceSet": usd("0.00"),
        "totalTaxSet": usd("4.13"),
        "totalDiscountsSet": usd("0.00"),
        "totalPriceSet": usd("54.13"),
        "shippingAddress": {
            "address1": "12 Analytical Way",
            "address2": null,
            "city": "London",
            "provinceCode": null,
            "zip": "N1 9GU",
            "country": "United Kingdom"
        },
        "customer": {
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@example.com",
            "phone": null
        },
        "lineItems": { "edges": edges },
        "fulfillments": fulfillments
    })
}
