pub mod checkout;
pub mod history;
pub mod token;
pub mod user;
