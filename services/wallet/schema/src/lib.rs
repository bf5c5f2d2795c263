//! sea-orm entities for the wallet service tables.

pub mod token_credit_logs;
pub mod users;
pub mod wallet_transactions;
pub mod wallets;
