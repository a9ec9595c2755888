//! Email service for support escalations.
//!
//! Uses SMTP via lettre for delivery with Askama templates (HTML and plain
//! text alternatives).

use askama::Template;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, MultiPart, SinglePart, header::ContentType},
    transport::smtp::{Error as SmtpError, authentication::Credentials},
};
use order_concierge_core::{Email, PhoneNumber};
use secrecy::ExposeSecret;
use thiserror::Error;

use crate::config::EmailConfig;

/// A validated escalation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Escalation {
    pub reason: String,
    pub customer_name: Option<String>,
    pub customer_email: Option<Email>,
    pub customer_phone: Option<PhoneNumber>,
    pub order_number: Option<String>,
    pub summary: Option<String>,
}

impl Escalation {
    /// Subject line for the support inbox.
    #[must_use]
    pub fn subject(&self) -> String {
        match &self.order_number {
            Some(number) => format!("Support escalation: order {number}"),
            None => "Support escalation".to_string(),
        }
    }
}

/// HTML template for the escalation email.
#[derive(Template)]
#[template(path = "email/escalation.html")]
struct EscalationEmailHtml<'a> {
    reason: &'a str,
    customer_name: Option<&'a str>,
    customer_email: Option<&'a str>,
    customer_phone: Option<&'a str>,
    order_number: Option<&'a str>,
    summary: Option<&'a str>,
}

/// Plain text template for the escalation email.
#[derive(Template)]
#[template(path = "email/escalation.txt")]
struct EscalationEmailText<'a> {
    reason: &'a str,
    customer_name: Option<&'a str>,
    customer_email: Option<&'a str>,
    customer_phone: Option<&'a str>,
    order_number: Option<&'a str>,
    summary: Option<&'a str>,
}

impl<'a> From<&'a Escalation> for EscalationEmailHtml<'a> {
    fn from(e: &'a Escalation) -> Self {
        Self {
            reason: &e.reason,
            customer_name: e.customer_name.as_deref(),
            customer_email: e.customer_email.as_ref().map(Email::as_str),
            customer_phone: e.customer_phone.as_ref().map(PhoneNumber::as_str),
            order_number: e.order_number.as_deref(),
            summary: e.summary.as_deref(),
        }
    }
}

impl<'a> From<&'a Escalation> for EscalationEmailText<'a> {
    fn from(e: &'a Escalation) -> Self {
        Self {
            reason: &e.reason,
            customer_name: e.customer_name.as_deref(),
            customer_email: e.customer_email.as_ref().map(Email::as_str),
            customer_phone: e.customer_phone.as_ref().map(PhoneNumber::as_str),
            order_number: e.order_number.as_deref(),
            summary: e.summary.as_deref(),
        }
    }
}

/// Errors that can occur when sending email.
#[derive(Debug, Error)]
pub enum EmailError {
    /// SMTP transport error.
    #[error("SMTP error: {0}")]
    Smtp(#[from] SmtpError),

    /// Failed to build email message.
    #[error("Failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    /// Invalid email address.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    /// Template rendering error.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

/// Email service for escalation emails.
#[derive(Clone)]
pub struct EmailService {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
    support_address: String,
}

impl EmailService {
    /// Create a new email service from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the SMTP transport cannot be configured.
    pub fn new(config: &EmailConfig) -> Result<Self, SmtpError> {
        let credentials = Credentials::new(
            config.smtp_username.clone(),
            config.smtp_password.expose_secret().to_string(),
        );

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(credentials)
            .build();

        Ok(Self {
            mailer,
            from_address: config.from_address.clone(),
            support_address: config.support_address.clone(),
        })
    }

    /// Send an escalation to the support inbox.
    ///
    /// The customer's email, when known, is set as `Reply-To`.
    ///
    /// # Errors
    ///
    /// Returns error if email fails to send or template fails to render.
    pub async fn send_escalation(&self, escalation: &Escalation) -> Result<(), EmailError> {
        let (text, html) = render_escalation(escalation)?;
        let reply_to = escalation.customer_email.as_ref().map(Email::as_str);

        self.send_multipart_email(&escalation.subject(), reply_to, &text, &html)
            .await
    }

    /// Send a multipart email with both plain text and HTML versions.
    async fn send_multipart_email(
        &self,
        subject: &str,
        reply_to: Option<&str>,
        text_body: &str,
        html_body: &str,
    ) -> Result<(), EmailError> {
        let mut builder = Message::builder()
            .from(parse_mailbox(&self.from_address)?)
            .to(parse_mailbox(&self.support_address)?)
            .subject(subject);

        if let Some(reply_to) = reply_to {
            builder = builder.reply_to(parse_mailbox(reply_to)?);
        }

        let email = builder.multipart(
            MultiPart::alternative()
                .singlepart(
                    SinglePart::builder()
                        .header(ContentType::TEXT_PLAIN)
                        .body(text_body.to_string()),
                )
                .singlepart(
                    SinglePart::builder()
                        .header(ContentType::TEXT_HTML)
                        .body(html_body.to_string()),
                ),
        )?;

        self.mailer.send(email).await?;

        tracing::info!(subject = %subject, "Escalation email sent");
        Ok(())
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, EmailError> {
    address
        .parse()
        .map_err(|_| EmailError::InvalidAddress(address.to_string()))
}

/// Render the plain text and HTML bodies.
fn render_escalation(escalation: &Escalation) -> Result<(String, String), EmailError> {
    let text = EscalationEmailText::from(escalation).render()?;
    let html = EscalationEmailHtml::from(escalation).render()?;
    Ok((text, html))
}
