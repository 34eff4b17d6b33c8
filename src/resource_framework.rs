use std::fmt::Debug;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::error::ApiError;
use crate::http::{decode_entity, decode_optional_entity, ApiClient, ListPage, ListQuery};

// =============================================================================
// 1. THE ABSTRACTION
// =============================================================================

/// Trait that any backend entity must implement to be served by [`ResourceClient`].
pub trait Resource: DeserializeOwned + Clone + Send + Sync + Debug + 'static {
    type CreatePayload: Serialize + Send + Sync + Debug;
    type Patch: Serialize + Send + Sync + Debug;

    /// Collection endpoint, e.g. `/api/admin/fees`.
    const BASE_PATH: &'static str;
    /// Key holding the list in list responses, e.g. `fees`.
    const COLLECTION_KEY: &'static str;
    /// Key holding one entity in detail responses, e.g. `fee`.
    const ENTITY_KEY: &'static str;

    fn id(&self) -> &str;
}

// =============================================================================
// 2. THE GENERIC CLIENT
// =============================================================================

/// CRUD and action calls against one REST collection.
#[derive(Clone)]
pub struct ResourceClient<T: Resource> {
    api: ApiClient,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Resource> ResourceClient<T> {
    pub fn new(api: ApiClient) -> Self {
        Self { api, _marker: PhantomData }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn item_path(id: &str) -> String {
        format!("{}/{}", T::BASE_PATH, urlencoding::encode(id))
    }

    pub fn action_path(id: &str, action: &str) -> String {
        format!("{}/{}", Self::item_path(id), action)
    }

    pub async fn list(&self, query: &ListQuery) -> Result<ListPage<T>, ApiError> {
        self.api.get_list(T::BASE_PATH, &query.to_query(), T::COLLECTION_KEY).await
    }

    pub async fn get(&self, id: &str) -> Result<T, ApiError> {
        let body = self.api.get(&Self::item_path(id), &Default::default()).await?;
        decode_entity(body, T::ENTITY_KEY)
    }

    /// The created entity, when the backend echoes it.
    pub async fn create(&self, payload: &T::CreatePayload) -> Result<Option<T>, ApiError> {
        let body = self.api.post(T::BASE_PATH, payload).await?;
        let created: Option<T> = decode_optional_entity(body, T::ENTITY_KEY)?;
        match &created {
            Some(entity) => info!(id = entity.id(), "{} created", T::ENTITY_KEY),
            None => info!("{} created without echo", T::ENTITY_KEY),
        }
        Ok(created)
    }

    pub async fn update(&self, id: &str, patch: &T::Patch) -> Result<Option<T>, ApiError> {
        let body = self.send_update(id, patch).await?;
        decode_optional_entity(body, T::ENTITY_KEY)
    }

    /// `PUT <item>` returning the raw body. Row actions use this since the
    /// list is re-fetched afterwards and the echo may be partial.
    pub async fn send_update(&self, id: &str, patch: &T::Patch) -> Result<Value, ApiError> {
        self.api.put(&Self::item_path(id), patch).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.api.delete(&Self::item_path(id)).await.map(|_| ())
    }

    /// `PATCH <item>/toggle`: flips `isActive` server-side.
    pub async fn toggle(&self, id: &str) -> Result<Option<T>, ApiError> {
        let body = self.send_toggle(id).await?;
        decode_optional_entity(body, T::ENTITY_KEY)
    }

    pub async fn send_toggle(&self, id: &str) -> Result<Value, ApiError> {
        self.api.patch(&Self::action_path(id, "toggle"), None).await
    }

    /// `POST <item>/<action>` with a JSON body.
    pub async fn post_action<B: Serialize>(&self, id: &str, action: &str, body: &B) -> Result<Value, ApiError> {
        self.api.post(&Self::action_path(id, action), body).await
    }

    /// `PUT <item>/<action>` with a JSON body.
    pub async fn put_action<B: Serialize>(&self, id: &str, action: &str, body: &B) -> Result<Value, ApiError> {
        self.api.put(&Self::action_path(id, action), body).await
    }
}

// =============================================================================
// 3. EXAMPLE USAGE (Test)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{Filters, Method};
    use crate::mock_framework::{admin_session, create_mock_api, expect_call};
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Coupon {
        id: String,
        code: String,
        #[serde(default)]
        is_active: bool,
    }

    #[derive(Debug, Serialize)]
    struct CouponCreate {
        code: String,
    }

    impl Resource for Coupon {
        type CreatePayload = CouponCreate;
        type Patch = Value;
        const BASE_PATH: &'static str = "/api/admin/coupons";
        const COLLECTION_KEY: &'static str = "coupons";
        const ENTITY_KEY: &'static str = "coupon";

        fn id(&self) -> &str {
            &self.id
        }
    }

    #[test]
    fn item_paths_are_encoded() {
        assert_eq!(ResourceClient::<Coupon>::item_path("a b"), "/api/admin/coupons/a%20b");
        assert_eq!(ResourceClient::<Coupon>::action_path("c1", "toggle"), "/api/admin/coupons/c1/toggle");
    }

    #[tokio::test]
    async fn test_resource_client_crud_and_toggle() {
        let (api, mut backend) = create_mock_api(admin_session(), 10);
        let client = ResourceClient::<Coupon>::new(api);

        let flow = tokio::spawn(async move {
            let query = ListQuery::new(2, 10).with_filters(Filters::new().with("isActive", "true"));
            let page = client.list(&query).await?;
            let created = client.create(&CouponCreate { code: "SALE10".into() }).await?;
            let toggled = client.toggle("c1").await?;
            client.delete("c1").await?;
            Ok::<_, ApiError>((page, created, toggled))
        });

        let list = expect_call(&mut backend, Method::Get, "/api/admin/coupons").await;
        assert_eq!(list.request.query, "page=2&limit=10&isActive=true");
        list.respond(200, json!({"coupons": [{"id": "c1", "code": "SALE10", "isActive": true}]}));

        let create = expect_call(&mut backend, Method::Post, "/api/admin/coupons").await;
        assert_eq!(create.request.body, Some(json!({"code": "SALE10"})));
        create.respond(201, json!({"success": true, "coupon": {"id": "c2", "code": "SALE10"}}));

        expect_call(&mut backend, Method::Patch, "/api/admin/coupons/c1/toggle")
            .await
            .respond(200, json!({"message": "Coupon toggled"}));

        expect_call(&mut backend, Method::Delete, "/api/admin/coupons/c1")
            .await
            .respond(200, json!({"message": "Coupon deleted"}));

        let (page, created, toggled) = flow.await.unwrap().unwrap();
        assert_eq!(page.items.len(), 1);
        assert!(page.items[0].is_active);
        assert_eq!(created.map(|c| c.id), Some("c2".to_string()));
        assert_eq!(toggled, None);
    }
}
