//! Order lookup handlers.
//!
//! Each handler validates its key, makes at most one Shopify call, and
//! answers with either the formatted order or a speakable not-found message.
//! Not-found is a normal 200 response with `success: false`.

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    routing::{get, post},
};
use order_concierge_core::{FormattedOrder, LookupKey, LookupKind, format_order};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{error::ApiError, state::AppState};

/// Build the order lookup router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/orders/by-phone", post(by_phone))
        .route("/api/orders/by-number", post(by_number))
        .route("/api/orders/by-email", post(by_email))
        .route("/api/orders/{id}", get(by_id))
}

/// Request for a phone lookup.
#[derive(Debug, Default, Deserialize)]
pub struct PhoneLookupRequest {
    #[serde(default)]
    pub phone: Option<String>,
}

/// Request for an order-number lookup.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderNumberLookupRequest {
    #[serde(default)]
    pub order_number: Option<String>,
}

/// Request for an email lookup.
#[derive(Debug, Default, Deserialize)]
pub struct EmailLookupRequest {
    #[serde(default)]
    pub email: Option<String>,
}

/// Lookup response envelope.
#[derive(Debug, Serialize)]
pub struct LookupResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<FormattedOrder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

impl LookupResponse {
    const fn found(order: FormattedOrder) -> Self {
        Self {
            success: true,
            order: Some(order),
            message: None,
        }
    }

    const fn not_found(message: &'static str) -> Self {
        Self {
            success: false,
            order: None,
            message: Some(message),
        }
    }
}

/// Look up the most recent order for a phone number.
///
/// # Errors
///
/// Returns 400 for a missing or too-short phone number, 500 if Shopify fails.
pub async fn by_phone(
    State(state): State<AppState>,
    body: Result<Json<PhoneLookupRequest>, JsonRejection>,
) -> Result<Json<LookupResponse>, ApiError> {
    let Json(body) = body?;
    lookup(&state, LookupKind::Phone, body.phone.as_deref()).await
}

/// Look up an order by its display number (`#1024` or `1024`).
///
/// # Errors
///
/// Returns 400 for a missing order number, 500 if Shopify fails.
pub async fn by_number(
    State(state): State<AppState>,
    body: Result<Json<OrderNumberLookupRequest>, JsonRejection>,
) -> Result<Json<LookupResponse>, ApiError> {
    let Json(body) = body?;
    lookup(&state, LookupKind::OrderNumber, body.order_number.as_deref()).await
}

/// Look up the most recent order placed with an email address.
///
/// # Errors
///
/// Returns 400 for a missing or malformed email, 500 if Shopify fails.
pub async fn by_email(
    State(state): State<AppState>,
    body: Result<Json<EmailLookupRequest>, JsonRejection>,
) -> Result<Json<LookupResponse>, ApiError> {
    let Json(body) = body?;
    lookup(&state, LookupKind::Email, body.email.as_deref()).await
}

/// Look up an order by numeric id or GID.
///
/// # Errors
///
/// Returns 400 for a malformed id, 500 if Shopify fails.
pub async fn by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<LookupResponse>, ApiError> {
    lookup(&state, LookupKind::Id, Some(&id)).await
}

#[instrument(skip(state, raw), fields(kind = %kind))]
async fn lookup(
    state: &AppState,
    kind: LookupKind,
    raw: Option<&str>,
) -> Result<Json<LookupResponse>, ApiError> {
    let key = LookupKey::parse(kind, raw.unwrap_or_default())?;

    let Some(resolved) = state.shopify().resolve_order(&key).await? else {
        tracing::info!("No matching order");
        return Ok(Json(LookupResponse::not_found(key.not_found_message())));
    };

    let order = format_order(
        &resolved.order,
        resolved.customer.as_ref(),
        state.format_options(),
    );
    tracing::info!(order_number = %order.order_number, "Order found");

    Ok(Json(LookupResponse::found(order)))
}
