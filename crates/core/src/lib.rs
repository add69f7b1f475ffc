//! `stockroom-core` — identifiers and the error model shared by every crate.
//!
//! Nothing in here knows about HTTP or storage.

pub mod entity;
pub mod error;
pub mod id;

pub use entity::Entity;
pub use error::{DomainError, DomainResult, FieldViolation, ValidationErrors};
pub use id::ItemId;
