//! HTTP and persistence plumbing shared by the loyalty services.

pub mod config;
pub mod error;
pub mod health;
pub mod middleware;
pub mod qr;
pub mod sea_ext;
pub mod serde;
pub mod tracing;
