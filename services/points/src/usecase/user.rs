use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::UserRepository;
use crate::domain::types::{PointsUser, validate_user};
use crate::error::PointsServiceError;

pub struct CreateUserInput {
    pub id: Option<Uuid>,
    pub username: String,
    pub email: String,
}

pub struct CreateUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> CreateUserUseCase<R> {
    pub async fn execute(&self, input: CreateUserInput) -> Result<PointsUser, PointsServiceError> {
        let username = input.username.trim();
        let email = input.email.trim();
        if !validate_user(username, email) {
            return Err(PointsServiceError::InvalidUser);
        }
        let user = PointsUser {
            id: input.id.unwrap_or_else(Uuid::now_v7),
            username: username.to_owned(),
            email: email.to_owned(),
            created_at: Utc::now(),
        };
        self.repo.create(&user).await?;
        Ok(user)
    }
}
