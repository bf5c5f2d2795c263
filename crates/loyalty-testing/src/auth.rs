//! Mock auth helpers for router tests.
//!
//! Services behind the gateway receive `x-loyalty-user-id` + `x-loyalty-user-role`
//! headers. In tests, `MockAuth` builds these headers directly so no gateway is needed.

use axum::http::{HeaderMap, HeaderName, HeaderValue};
use uuid::Uuid;

use loyalty_auth_types::identity::{ADMIN_ROLE, USER_ID_HEADER, USER_ROLE_HEADER};

/// Configurable identity injected into test requests.
#[derive(Debug, Clone, Copy)]
pub struct MockAuth {
    pub user_id: Uuid,
    pub user_role: u8,
}

impl MockAuth {
    pub fn new(user_id: Uuid, user_role: u8) -> Self {
        Self { user_id, user_role }
    }

    /// A regular shopper with a fresh id.
    pub fn member() -> Self {
        Self::new(Uuid::new_v4(), 0)
    }

    /// An operator allowed to issue tokens and create users.
    pub fn admin() -> Self {
        Self::new(Uuid::new_v4(), ADMIN_ROLE)
    }

    /// Return headers as if the gateway injected them.
    pub fn headers(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(
            HeaderName::from_static(USER_ID_HEADER),
            HeaderValue::from_str(&self.user_id.to_string()).unwrap(),
        );
        map.insert(
            HeaderName::from_static(USER_ROLE_HEADER),
            HeaderValue::from_str(&self.user_role.to_string()).unwrap(),
        );
        map
    }
}
