//! Domain types shared across the loyalty services.
//!
//! This crate contains only pure types with no framework dependencies.
//! Import in `usecase/` and `domain/` layers.

pub mod amount;
pub mod pagination;
