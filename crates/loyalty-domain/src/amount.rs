//! Point and money amount rules.

use rust_decimal::Decimal;
use serde::Serialize;

/// Largest balance or credit a `NUMERIC(10, 2)` column can hold: 99999999.99
/// (mantissa 9_999_999_999 split into 32-bit words).
pub const MAX_MONEY: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2);

/// Number of decimal places kept for money amounts.
pub const MONEY_SCALE: u32 = 2;

/// Outcome of drawing a point balance against a cart total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CartDiscount {
    pub cart_total: i32,
    pub discount: i32,
    pub final_total: i32,
}

impl CartDiscount {
    /// `discount = min(available, cart_total)`; negative inputs count as zero.
    pub fn compute(available: i32, cart_total: i32) -> Self {
        let cart_total = cart_total.max(0);
        let discount = available.max(0).min(cart_total);
        Self {
            cart_total,
            discount,
            final_total: cart_total - discount,
        }
    }

    /// Nothing to redeem: the cart total passes through unchanged.
    pub fn none(cart_total: i32) -> Self {
        Self {
            cart_total,
            discount: 0,
            final_total: cart_total,
        }
    }
}

/// A money amount is valid when positive, at most two decimal places,
/// and within column range.
pub fn is_valid_money(amount: Decimal) -> bool {
    amount > Decimal::ZERO && amount.scale() <= MONEY_SCALE && amount <= MAX_MONEY
}

/// Render a money amount with exactly two decimal places.
pub fn to_money(amount: Decimal) -> Decimal {
    let mut amount = amount.round_dp(MONEY_SCALE);
    amount.rescale(MONEY_SCALE);
    amount
}
