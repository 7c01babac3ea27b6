//! # fonema-server
//!
//! Axum HTTP API for the pronunciation analyzer: configuration, the
//! `/api/analyze` and `/health` routes, error-to-JSON mapping, and
//! graceful shutdown.

#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod health;
pub mod routes;
pub mod server;
pub mod shutdown;
