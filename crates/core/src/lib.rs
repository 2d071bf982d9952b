//! `archery-core` — catalog building blocks shared by the products and pricing crates.
//!
//! This crate contains **pure domain** primitives (no IO, no transport, no storage).

pub mod entity;
pub mod error;
pub mod id;
pub mod status;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{PriceCategoryId, TaxId, VariantAxisId, VariantValueId};
pub use status::Status;
pub use value_object::ValueObject;
