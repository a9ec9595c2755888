//! Support escalation tests.

use order_concierge_core::FormatOptions;
use order_concierge_integration_tests::TestServer;
use order_concierge_server::config::EmailConfig;
use reqwest::StatusCode;
use secrecy::SecretString;
use serde_json::json;

/// SMTP config pointing at a port nothing listens on.
fn unreachable_smtp() -> EmailConfig {
    EmailConfig {
        smtp_host: "127.0.0.1".to_string(),
        smtp_port: 1,
        smtp_username: "concierge".to_string(),
        smtp_password: SecretString::from("Vq8mT3zR6pLw1nXc"),
        from_address: "Order Concierge <concierge@example.com>".to_string(),
        support_address: "support@example.com".to_string(),
    }
}

#[tokio::test]
async fn test_escalation_without_smtp_is_unavailable() {
    let server = TestServer::start().await;

    let (status, body) = server
        .post_json(
            "/api/support/escalate",
            &json!({ "reason": "Package arrived damaged", "orderNumber": "#1024" }),
        )
        .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        body,
        json!({ "success": false, "error": "Support escalation is not available." })
    );
}

#[tokio::test]
async fn test_escalation_validates_before_checking_smtp() {
    let server = TestServer::start().await;

    let (status, body) = server
        .post_json(
            "/api/support/escalate",
            &json!({ "reason": "Refund", "customerEmail": "not-an-email" }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_escalation_smtp_failure_is_generic_500() {
    let server = TestServer::start_with(Some(unreachable_smtp()), FormatOptions::default()).await;

    let (status, body) = server
        .post_json(
            "/api/support/escalate",
            &json!({
                "reason": "Wrong size delivered",
                "customerName": "Grace Hopper",
                "customerPhone": "555-123-4567"
            }),
        )
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert!(!body["error"].as_str().unwrap_or_default().contains("127.0.0.1"));
}
