//! sea-orm entities for the points service tables.

pub mod discount_tokens;
pub mod token_usages;
pub mod users;
