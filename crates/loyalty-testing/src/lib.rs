//! Test utilities for the loyalty services.
//!
//! Provides `MockAuth` identity headers and router request helpers.
//! Import from `[dev-dependencies]` only — never in production code.

pub mod auth;
pub mod http;
