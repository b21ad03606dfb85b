//! Domain entities and request payloads.
//!
//! This module handles:
//! - Category and element entities as stored in PostgreSQL
//! - The element detail projection joined with its category name
//! - Request payloads carrying only the client-writable fields

pub mod category;
pub mod element;

pub use category::{Category, CategoryPayload};
pub use element::{Element, ElementDetail, ElementPayload};
