use uuid::Uuid;

use loyalty_domain::amount::CartDiscount;

use crate::domain::repository::{RedeemPort, TokenRepository, UsageRepository};
use crate::error::PointsServiceError;

pub struct CheckoutInput {
    /// Token returned by a prior apply; `None` when the shopper applied nothing.
    pub token_id: Option<Uuid>,
    pub cart_total: i32,
}

pub struct CheckoutUseCase<T, S, R>
where
    T: TokenRepository,
    S: UsageRepository,
    R: RedeemPort,
{
    pub tokens: T,
    pub usages: S,
    pub redeemer: R,
}

impl<T, S, R> CheckoutUseCase<T, S, R>
where
    T: TokenRepository,
    S: UsageRepository,
    R: RedeemPort,
{
    pub async fn execute(
        &self,
        user_id: Uuid,
        input: CheckoutInput,
    ) -> Result<CartDiscount, PointsServiceError> {
        if input.cart_total < 0 {
            return Err(PointsServiceError::InvalidAmount);
        }
        let Some(token_id) = input.token_id else {
            return Ok(CartDiscount::none(input.cart_total));
        };
        let Some(token) = self.tokens.find_by_id(token_id).await? else {
            return Ok(CartDiscount::none(input.cart_total));
        };
        if self.usages.find(user_id, token.id).await?.is_none() {
            return Err(PointsServiceError::TokenNotApplied);
        }

        let result = CartDiscount::compute(token.remaining_value, input.cart_total);
        if result.discount > 0 {
            self.redeemer
                .redeem(user_id, token.id, result.discount)
                .await?;
        }
        Ok(result)
    }
}
