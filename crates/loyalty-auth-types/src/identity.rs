//! Gateway-injected identity headers extractor.

use axum::extract::FromRequestParts;
use http::request::Parts;
use uuid::Uuid;

use loyalty_core::error::AppError;

pub const USER_ID_HEADER: &str = "x-loyalty-user-id";
pub const USER_ROLE_HEADER: &str = "x-loyalty-user-role";

/// Minimum role allowed to issue tokens and create users.
pub const ADMIN_ROLE: u8 = 2;

/// User identity injected by the gateway via `x-loyalty-user-id` and `x-loyalty-user-role`.
///
/// Rejects with 401 if either header is absent or malformed.
/// Role enforcement (403) is done by handlers after extraction.
#[derive(Debug, Clone)]
pub struct IdentityHeaders {
    pub user_id: Uuid,
    pub user_role: u8,
}

impl IdentityHeaders {
    pub fn is_admin(&self) -> bool {
        self.user_role >= ADMIN_ROLE
    }
}

impl<S> FromRequestParts<S> for IdentityHeaders
where
    S: Send + Sync,
{
    type Rejection = AppError;

    // Header values are read synchronously so the returned future borrows nothing.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<Uuid>().ok());

        let user_role = parts
            .headers
            .get(USER_ROLE_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u8>().ok());

        async move {
            let user_id = user_id.ok_or(AppError::Unauthorized)?;
            let user_role = user_role.ok_or(AppError::Unauthorized)?;
            Ok(Self { user_id, user_role })
        }
    }
}
