//! Services behind the route handlers.
//!
//! # Services
//!
//! - `email` - Support escalation delivery via SMTP

pub mod email;

pub use email::{EmailError, EmailService, Escalation};
