//! Application state shared across handlers.

use std::sync::Arc;

use order_concierge_core::FormatOptions;

use crate::config::AppConfig;
use crate::services::EmailService;
use crate::shopify::{ShopifyClient, ShopifyError};

/// Errors building application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("Shopify client error: {0}")]
    Shopify(#[from] ShopifyError),
    #[error("SMTP configuration error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

/// Application state shared across all handlers.
///
/// Everything inside is immutable after startup.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    shopify: ShopifyClient,
    email: Option<EmailService>,
    format_options: FormatOptions,
}

impl AppState {
    /// Build state from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or SMTP transport cannot be built.
    pub fn new(config: &AppConfig) -> Result<Self, StateError> {
        let shopify = ShopifyClient::new(&config.shopify)?;
        let email = config.email.as_ref().map(EmailService::new).transpose()?;

        if email.is_none() {
            tracing::warn!("SMTP not configured; support escalation disabled");
        }

        Ok(Self::from_parts(shopify, email, config.format_options()))
    }

    /// Assemble state from already-built services.
    #[must_use]
    pub fn from_parts(
        shopify: ShopifyClient,
        email: Option<EmailService>,
        format_options: FormatOptions,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                shopify,
                email,
                format_options,
            }),
        }
    }

    #[must_use]
    pub fn shopify(&self) -> &ShopifyClient {
        &self.inner.shopify
    }

    /// The mailer, if SMTP is configured.
    #[must_use]
    pub fn email(&self) -> Option<&EmailService> {
        self.inner.email.as_ref()
    }

    #[must_use]
    pub fn format_options(&self) -> &FormatOptions {
        &self.inner.format_options
    }
}
