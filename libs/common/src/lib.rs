//! Common library for the Thekua storefront backend
//!
//! This crate provides the infrastructure shared by the backend services:
//! PostgreSQL connection pooling, health checks, and the database error
//! taxonomy.

pub mod database;
pub mod error;
