//! # Prom order server
//! This crate hosts the order-notification service. It is responsible for:
//! Polling one or more Prom.ua shops for orders in the monitored statuses.
//! Recovering supplier/sourcing metadata from product private notes, with a local fallback
//! database keyed by SKU.
//! Pushing a formatted notification per order line to a Telegram channel, then moving the order
//! to the `received` status and recording it in a durable processed-order ledger.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more
//! information.
//!
//! ## Routes
//! The server exposes a single route:
//! * `/`: a liveness check that returns a 200 OK response, for external uptime probing.

pub mod config;
pub mod errors;
pub mod fallback;
pub mod ledger;
pub mod notes;
pub mod processor;
pub mod server;
