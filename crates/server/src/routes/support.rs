//! Support escalation handler.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::post,
};
use order_concierge_core::{Email, LookupError, PhoneNumber};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{error::ApiError, services::Escalation, state::AppState};

/// Message read back to the caller after a successful escalation.
pub const ESCALATION_ACCEPTED: &str = "A support specialist will follow up shortly.";
/// Error when SMTP is not configured.
pub const ESCALATION_UNAVAILABLE: &str = "Support escalation is not available.";

/// Build the support router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/support/escalate", post(escalate))
}

/// Escalation request from the agent.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EscalationRequest {
    pub reason: Option<String>,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub order_number: Option<String>,
    pub summary: Option<String>,
}

impl EscalationRequest {
    /// Validate into an [`Escalation`]. Blank optional fields are dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if `reason` is blank or the email/phone is malformed.
    pub fn validate(self) -> Result<Escalation, LookupError> {
        let reason = non_blank(self.reason).ok_or(LookupError::Missing { field: "reason" })?;

        let customer_email = non_blank(self.customer_email)
            .map(|e| Email::parse(&e))
            .transpose()?;
        let customer_phone = non_blank(self.customer_phone)
            .map(|p| PhoneNumber::normalize(&p).ok_or(LookupError::InvalidPhone))
            .transpose()?;

        Ok(Escalation {
            reason,
            customer_name: non_blank(self.customer_name),
            customer_email,
            customer_phone,
            order_number: non_blank(self.order_number),
            summary: non_blank(self.summary),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Escalation response envelope.
#[derive(Debug, Serialize)]
pub struct EscalationResponse {
    pub success: bool,
    pub message: &'static str,
}

/// Email the support inbox on behalf of the caller.
///
/// # Errors
///
/// Returns 400 for invalid input, 503 when SMTP is not configured, and 500
/// if the email cannot be sent.
#[instrument(skip_all)]
pub async fn escalate(
    State(state): State<AppState>,
    body: Result<Json<EscalationRequest>, JsonRejection>,
) -> Result<Json<EscalationResponse>, ApiError> {
    let Json(body) = body?;
    let escalation = body.validate()?;

    let Some(email) = state.email() else {
        return Err(ApiError::Unavailable(ESCALATION_UNAVAILABLE));
    };

    email.send_escalation(&escalation).await?;
    tracing::info!(
        has_order = escalation.order_number.is_some(),
        "Support escalation sent"
    );

    Ok(Json(EscalationResponse {
        success: true,
        message: ESCALATION_ACCEPTED,
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn request(reason: &str) -> EscalationRequest {
        EscalationRequest {
            reason: Some(reason.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_reason_required() {
        assert_eq!(
            EscalationRequest::default().validate(),
            Err(LookupError::Missing { field: "reason" })
        );
        assert_eq!(
            request("   ").validate(),
            Err(LookupError::Missing { field: "reason" })
        );
    }

    #[test]
    fn test_optional_fields_normalized() {
        let escalation = EscalationRequest {
            customer_phone: Some("(555) 123-4567".to_string()),
            customer_email: Some(" grace@example.com ".to_string()),
            customer_name: Some("  ".to_string()),
            order_number: Some("#1024".to_string()),
            ..request("Damaged item")
        }
        .validate()
        .unwrap();

        assert_eq!(escalation.reason, "Damaged item");
        assert_eq!(escalation.customer_phone.unwrap().as_str(), "+5551234567");
        assert_eq!(escalation.customer_email.unwrap().as_str(), "grace@example.com");
        assert_eq!(escalation.customer_name, None);
        assert_eq!(escalation.order_number.as_deref(), Some("#1024"));
    }

    #[test]
    fn test_invalid_contact_details_rejected() {
        let bad_phone = EscalationRequest {
            customer_phone: Some("12345".to_string()),
            ..request("Damaged item")
        };
        assert_eq!(bad_phone.validate(), Err(LookupError::InvalidPhone));

        let bad_email = EscalationRequest {
            customer_email: Some("grace@".to_string()),
            ..request("Damaged item")
        };
        assert!(matches!(
            bad_email.validate(),
            Err(LookupError::InvalidEmail(_))
        ));
    }
}
