use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::UserRepository;
use crate::domain::types::{Wallet, WalletUser, validate_user};
use crate::error::WalletServiceError;

pub struct CreateUserInput {
    pub id: Option<Uuid>,
    pub username: String,
    pub email: String,
}

/// Creates a user together with its zero-balance wallet.
pub struct CreateUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> CreateUserUseCase<R> {
    pub async fn execute(
        &self,
        input: CreateUserInput,
    ) -> Result<(WalletUser, Wallet), WalletServiceError> {
        let username = input.username.trim();
        let email = input.email.trim();
        if !validate_user(username, email) {
            return Err(WalletServiceError::InvalidUser);
        }
        let now = Utc::now();
        let user = WalletUser {
            id: input.id.unwrap_or_else(Uuid::now_v7),
            username: username.to_owned(),
            email: email.to_owned(),
            created_at: now,
        };
        let wallet = Wallet::empty(user.id, now);
        self.repo.create_with_wallet(&user, &wallet).await?;
        Ok((user, wallet))
    }
}
