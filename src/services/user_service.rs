use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::controller::ListSource;
use crate::domain::{User, UserStatus, UserStatusUpdate};
use crate::error::ApiError;
use crate::http::{decode_optional_entity, ListPage, ListQuery};
use crate::resource_framework::{Resource, ResourceClient};

impl Resource for User {
    type CreatePayload = ();
    type Patch = Value;

    const BASE_PATH: &'static str = "/api/admin/users";
    const COLLECTION_KEY: &'static str = "users";
    const ENTITY_KEY: &'static str = "user";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Account management. List filters: `role`, `status`, `search`.
#[derive(Clone)]
pub struct UserService {
    inner: ResourceClient<User>,
}

impl_resource_service!(UserService, User, user, users);

impl UserService {
    pub async fn update_user_status(&self, id: &str, status: UserStatus) -> Result<Option<User>, ApiError> {
        let body = self.send_status(id, status).await?;
        decode_optional_entity(body, User::ENTITY_KEY)
    }

    #[instrument(skip(self))]
    async fn send_status(&self, id: &str, status: UserStatus) -> Result<Value, ApiError> {
        if status == UserStatus::Unknown {
            return Err(ApiError::Validation("a known user status is required".to_string()));
        }
        debug!("Sending request");
        let body = self.inner.put_action(id, "status", &UserStatusUpdate { status }).await?;
        info!(status = %status, "User status updated");
        Ok(body)
    }

    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: &str) -> Result<(), ApiError> {
        debug!("Sending request");
        self.inner.delete(id).await
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UserRowAction {
    UpdateStatus { id: String, status: UserStatus },
    Delete(String),
}

#[async_trait]
impl ListSource for UserService {
    type Item = User;
    type Action = UserRowAction;

    async fn fetch(&self, query: &ListQuery) -> Result<ListPage<User>, ApiError> {
        self.list_users(query).await
    }

    async fn apply(&self, action: UserRowAction) -> Result<(), ApiError> {
        match action {
            UserRowAction::UpdateStatus { id, status } => self.send_status(&id, status).await.map(|_| ()),
            UserRowAction::Delete(id) => self.delete_user(&id).await,
        }
    }
}
