//! Operational service around the [`vnpay`] helpers.
//!
//! Loads the gateway configuration at startup and exposes endpoints that
//! exercise it. No checkout flow lives here.
//!
//! # Modules
//!
//! - [`config`] — Service configuration ([`ServerConfig`](config::ServerConfig))
//! - [`routes`] — `/health`, `/echo-ip`, `/metrics`
//! - [`metrics`] — Prometheus counters for requests and IP resolutions

pub mod config;
pub mod metrics;
pub mod routes;

pub use config::ServerConfig;
