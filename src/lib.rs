//! Figure skating elements REST API.
//!
//! A CRUD service over two resources stored in PostgreSQL: skating element
//! categories (spins, jumps, step sequences, ...) and the individual elements
//! that belong to them.
//!
//! # Layers
//!
//! ```text
//! HTTP request ─▶ api (axum handlers) ─▶ service ─▶ repository (sqlx) ─▶ PostgreSQL
//! ```
//!
//! # Modules
//!
//! - [`api`]: HTTP routes, handlers and error-to-status mapping
//! - [`config`]: Configuration loading from environment
//! - [`db`]: Connection pool bootstrap
//! - [`error`]: Unified error types
//! - [`metrics`]: Prometheus metrics for requests and store queries
//! - [`model`]: Category and element entities and request payloads
//! - [`repository`]: Storage traits, PostgreSQL and in-memory implementations
//! - [`service`]: Pass-through services between handlers and repositories
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod metrics;
pub mod model;
pub mod repository;
pub mod service;
pub mod utils;

pub use config::Config;
pub use error::{AppError, Result, StoreError, StoreResult};
