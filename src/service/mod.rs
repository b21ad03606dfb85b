//! Service layer between HTTP handlers and repositories.
//!
//! Services forward to their repository unchanged. They exist so handlers
//! depend on a concrete, cloneable type instead of a storage backend.

pub mod category_service;
pub mod element_service;

pub use category_service::CategoryService;
pub use element_service::ElementService;
