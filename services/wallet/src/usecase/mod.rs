pub mod credit;
pub mod debit;
pub mod user;
pub mod wallet;
