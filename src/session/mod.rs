//! The signed-in admin's session.
//!
//! The session is an explicit value handed to [`ApiClient`](crate::http::ApiClient)
//! at construction; nothing reads ambient storage per request. A
//! [`FileSessionStore`] persists it between CLI invocations as JSON with the
//! keys `token`, `user` and `guestSessionToken`.

pub mod error;
pub mod store;

pub use error::*;
pub use store::*;

use serde::{Deserialize, Serialize};

use crate::domain::Role;
use crate::error::ApiError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<SessionUser>,
    #[serde(default)]
    pub guest_session_token: Option<String>,
}

impl Session {
    pub fn new(token: impl Into<String>, role: Role) -> Self {
        Self {
            token: Some(token.into()),
            user: Some(SessionUser { id: None, role, email: None }),
            guest_session_token: None,
        }
    }

    pub fn bearer_token(&self) -> Option<&str> {
        self.token.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|user| user.role)
    }

    /// Returns the bearer token if this session may call admin endpoints.
    pub fn require_admin(&self) -> Result<&str, ApiError> {
        let token = self.bearer_token().ok_or(ApiError::Unauthenticated)?;
        match self.role() {
            Some(role) if role.is_admin() => Ok(token),
            Some(role) => Err(ApiError::Forbidden(role.to_string())),
            None => Err(ApiError::Forbidden("none".to_string())),
        }
    }
}
