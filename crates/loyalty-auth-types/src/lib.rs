//! Auth types shared across the loyalty services.
//!
//! Provides the `IdentityHeaders` extractor for gateway-injected identity.

pub mod identity;
