//! Thekua storefront backend
//!
//! Library surface of the API service: the binary in `main.rs` wires
//! configuration and serving, everything else lives here so the
//! integration tests can drive the router directly.

pub mod bootstrap;
pub mod error;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod rate_limiter;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod validation;
