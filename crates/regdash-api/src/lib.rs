//! REST client for the external dashboard backend.
//!
//! Implements the [`BackendPort`] defined in `regdash-core` over reqwest.
//! The client is never load-bearing for simulated state: every consumer
//! treats a failure here as a degraded-but-working condition.
//!
//! [`BackendPort`]: regdash_core::ports::backend::BackendPort

mod client;
mod config;
mod http;

pub use client::DashboardApiClient;
pub use config::ApiClientConfig;
