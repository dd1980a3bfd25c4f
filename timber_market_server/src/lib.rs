//! # Timber Market Gateway server
//! This module hosts the HTTP layer of the gateway. It is responsible for:
//! Accepting marketplace and custom-order requests from the storefront apps.
//! Translating request bodies into engine API calls and engine errors into HTTP statuses.
//! Streaming `designUpdated` events to storefront subscribers over SSE.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! All business routes live under `/api`; see [routes] for the full table. `/health` is a liveness check that
//! returns a 200 OK response.

pub mod config;
pub mod data_objects;
pub mod errors;
pub mod routes;
pub mod server;
pub mod sse;
pub mod uploads;

#[cfg(test)]
mod endpoint_tests;
