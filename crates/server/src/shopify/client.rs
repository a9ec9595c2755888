//! Shopify Admin API GraphQL client.
//!
//! Holds a single `reqwest::Client` behind an `Arc` so handlers can clone the
//! client freely. Every lookup is one POST to the GraphQL endpoint; no
//! retries, no caching.

use std::sync::Arc;

use graphql_client::GraphQLQuery;
use order_concierge_core::{CustomerSummary, LookupKey, OrderRecord, PhoneNumber};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, de::DeserializeOwned};
use tracing::instrument;

use crate::config::ShopifyConfig;

use super::conversions::{convert_customer, convert_order};
use super::queries::{
    FindCustomerByPhone, FindOrder, GetOrder, find_customer_by_phone, find_order, get_order,
};
use super::{GraphQLError, GraphQLErrorLocation, ShopifyError};

/// An order found by a lookup, plus the customer the lookup went through.
#[derive(Debug, Clone)]
pub struct ResolvedOrder {
    pub order: OrderRecord,
    /// Set for phone lookups, which resolve the customer first.
    pub customer: Option<CustomerSummary>,
}

/// Shopify Admin API GraphQL client.
#[derive(Clone)]
pub struct ShopifyClient {
    inner: Arc<ShopifyClientInner>,
}

struct ShopifyClientInner {
    client: reqwest::Client,
    endpoint: String,
    access_token: SecretString,
}

/// GraphQL response wrapper.
#[derive(Debug, Deserialize)]
struct GraphQLResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQLErrorResponse>>,
}

#[derive(Debug, Deserialize)]
struct GraphQLErrorResponse {
    message: String,
    #[serde(default)]
    locations: Vec<GraphQLErrorLocationResponse>,
    #[serde(default)]
    path: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct GraphQLErrorLocationResponse {
    line: i64,
    column: i64,
}

impl ShopifyClient {
    /// Create a new client for the configured store.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &ShopifyConfig) -> Result<Self, ShopifyError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(ShopifyClientInner {
                client,
                endpoint: config.endpoint(),
                access_token: config.access_token.clone(),
            }),
        })
    }

    /// Execute a GraphQL query.
    async fn execute<Q: GraphQLQuery>(
        &self,
        variables: Q::Variables,
    ) -> Result<Q::ResponseData, ShopifyError>
    where
        Q::ResponseData: DeserializeOwned,
    {
        let body = Q::build_query(variables);

        let response = self
            .inner
            .client
            .post(&self.inner.endpoint)
            .header("X-Shopify-Access-Token", self.inner.access_token.expose_secret())
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            return Err(ShopifyError::RateLimited(retry_after));
        }

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(ShopifyError::Unauthorized(
                "Invalid or revoked access token".to_string(),
            ));
        }

        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %response_text.chars().take(500).collect::<String>(),
                "Shopify API returned error status"
            );
            return Err(ShopifyError::message(format!("HTTP {status}")));
        }

        let graphql_response: GraphQLResponse<Q::ResponseData> =
            serde_json::from_str(&response_text)?;

        if let Some(errors) = graphql_response.errors
            && !errors.is_empty()
        {
            let converted_errors: Vec<GraphQLError> = errors
                .into_iter()
                .map(|e| GraphQLError {
                    message: e.message,
                    locations: e
                        .locations
                        .into_iter()
                        .map(|l| GraphQLErrorLocation {
                            line: l.line,
                            column: l.column,
                        })
                        .collect(),
                    path: e.path,
                })
                .collect();
            return Err(ShopifyError::GraphQL(converted_errors));
        }

        graphql_response
            .data
            .ok_or_else(|| ShopifyError::message("No data in response"))
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    /// Resolve a lookup key to at most one order.
    ///
    /// `Ok(None)` means the store has no match, which is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error response.
    #[instrument(skip(self, key), fields(kind = %key.kind()))]
    pub async fn resolve_order(
        &self,
        key: &LookupKey,
    ) -> Result<Option<ResolvedOrder>, ShopifyError> {
        let resolved = match key {
            LookupKey::Phone(phone) => self.find_by_phone(phone).await?,
            LookupKey::Id(id) => self.get_order(id).await?.map(|order| ResolvedOrder {
                order,
                customer: None,
            }),
            LookupKey::OrderNumber(_) | LookupKey::Email(_) => {
                let Some(query) = key.filter_query() else {
                    return Ok(None);
                };
                self.find_order(query).await?.map(|order| ResolvedOrder {
                    order,
                    customer: None,
                })
            }
        };

        tracing::debug!(found = resolved.is_some(), "Order lookup finished");
        Ok(resolved)
    }

    /// The most recent order of the customer with this phone number.
    ///
    /// `None` if no customer matches or the customer has no orders.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error response.
    #[instrument(skip(self, phone))]
    pub async fn find_by_phone(
        &self,
        phone: &PhoneNumber,
    ) -> Result<Option<ResolvedOrder>, ShopifyError> {
        let variables = find_customer_by_phone::Variables {
            query: format!("phone:{phone}"),
        };

        let response = self.execute::<FindCustomerByPhone>(variables).await?;

        let Some(customer) = response.customers.into_nodes().next() else {
            return Ok(None);
        };

        Ok(customer
            .orders
            .into_nodes()
            .next()
            .map(|order| ResolvedOrder {
                order: convert_order(order),
                customer: Some(convert_customer(customer.customer)),
            }))
    }

    /// The most recent order matching a search filter such as `name:1024`.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error response.
    #[instrument(skip(self, query))]
    pub async fn find_order(&self, query: String) -> Result<Option<OrderRecord>, ShopifyError> {
        let variables = find_order::Variables { query };

        let response = self.execute::<FindOrder>(variables).await?;

        Ok(response.orders.into_nodes().next().map(convert_order))
    }

    /// Get an order by GID.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error response.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn get_order(&self, id: &str) -> Result<Option<OrderRecord>, ShopifyError> {
        let variables = get_order::Variables { id: id.to_string() };

        let response = self.execute::<GetOrder>(variables).await?;

        Ok(response.order.map(convert_order))
    }
}
