//! Order Concierge server library.
//!
//! A thin HTTP layer that lets a voice agent look up Shopify orders by
//! phone, email, order number or id, and hand a caller off to a person
//! through a support escalation email.
//!
//! The binary in `main.rs` only wires configuration, logging and Sentry
//! around [`routes::build_app`]; everything else lives here so it can be
//! driven from tests.
//!
//! # Security
//!
//! This service holds a Shopify Admin API token with read access to orders
//! and customers. It does no authentication of its own and should only be
//! reachable from the agent platform.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod routes;
pub mod services;
pub mod shopify;
pub mod state;

pub use config::AppConfig;
pub use routes::build_app;
pub use state::AppState;
