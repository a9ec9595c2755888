//! Shopify Admin API client (read-only order lookups).
//!
//! # Architecture
//!
//! - Query bodies and response types implement `graphql_client::GraphQLQuery`
//! - Direct API calls to Shopify (no local cache, no retries)
//! - Wire types are converted to `order_concierge_core` types before they
//!   leave this module
//!
//! # Example
//!
//! ```rust,ignore
//! use order_concierge_core::{LookupKey, LookupKind};
//! use order_concierge_server::shopify::ShopifyClient;
//!
//! let client = ShopifyClient::new(&config.shopify)?;
//! let key = LookupKey::parse(LookupKind::OrderNumber, "#1024")?;
//!
//! if let Some(resolved) = client.resolve_order(&key).await? {
//!     println!("{}", resolved.order.name);
//! }
//! ```

mod client;
mod conversions;
pub mod queries;

pub use client::{ResolvedOrder, ShopifyClient};

use thiserror::Error;

/// Errors that can occur when talking to the Shopify Admin API.
#[derive(Debug, Error)]
pub enum ShopifyError {
    /// HTTP request failed (connection, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// GraphQL query returned errors, or the response had no data.
    #[error("GraphQL errors: {}", format_graphql_errors(.0))]
    GraphQL(Vec<GraphQLError>),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Rate limited by Shopify.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// The access token was rejected.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

impl ShopifyError {
    /// A single synthetic GraphQL error.
    pub(crate) fn message(message: impl Into<String>) -> Self {
        Self::GraphQL(vec![GraphQLError {
            message: message.into(),
            locations: vec![],
            path: vec![],
        }])
    }
}

/// A GraphQL error returned by the Shopify Admin API.
#[derive(Debug, Clone)]
pub struct GraphQLError {
    /// Error message.
    pub message: String,
    /// Source locations in the query.
    pub locations: Vec<GraphQLErrorLocation>,
    /// Path to the error in the response.
    pub path: Vec<serde_json::Value>,
}

/// Location in a GraphQL query where an error occurred.
#[derive(Debug, Clone)]
pub struct GraphQLErrorLocation {
    /// Line number (1-indexed).
    pub line: i64,
    /// Column number (1-indexed).
    pub column: i64,
}

fn format_graphql_errors(errors: &[GraphQLError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
