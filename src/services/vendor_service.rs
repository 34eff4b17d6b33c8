use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::controller::ListSource;
use crate::domain::{Vendor, VendorStatus, VendorStatusUpdate};
use crate::error::ApiError;
use crate::http::{decode_optional_entity, ListPage, ListQuery};
use crate::resource_framework::{Resource, ResourceClient};

impl Resource for Vendor {
    type CreatePayload = ();
    type Patch = Value;

    const BASE_PATH: &'static str = "/api/admin/vendors";
    const COLLECTION_KEY: &'static str = "vendors";
    const ENTITY_KEY: &'static str = "vendor";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Vendor approval and moderation. List filters: `status`, `search`.
#[derive(Clone)]
pub struct VendorService {
    inner: ResourceClient<Vendor>,
}

impl_resource_service!(VendorService, Vendor, vendor, vendors);

impl VendorService {
    pub async fn update_vendor_status(
        &self,
        id: &str,
        status: VendorStatus,
        reason: Option<String>,
    ) -> Result<Option<Vendor>, ApiError> {
        let body = self.send_status(id, status, reason).await?;
        decode_optional_entity(body, Vendor::ENTITY_KEY)
    }

    #[instrument(skip(self))]
    async fn send_status(&self, id: &str, status: VendorStatus, reason: Option<String>) -> Result<Value, ApiError> {
        if status == VendorStatus::Unknown {
            return Err(ApiError::Validation("a known vendor status is required".to_string()));
        }
        debug!("Sending request");
        let body = self
            .inner
            .put_action(id, "status", &VendorStatusUpdate { status, reason })
            .await?;
        info!(status = %status, "Vendor status updated");
        Ok(body)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum VendorRowAction {
    UpdateStatus { id: String, status: VendorStatus, reason: Option<String> },
}

#[async_trait]
impl ListSource for VendorService {
    type Item = Vendor;
    type Action = VendorRowAction;

    async fn fetch(&self, query: &ListQuery) -> Result<ListPage<Vendor>, ApiError> {
        self.list_vendors(query).await
    }

    async fn apply(&self, action: VendorRowAction) -> Result<(), ApiError> {
        match action {
            VendorRowAction::UpdateStatus { id, status, reason } => {
                self.send_status(&id, status, reason).await.map(|_| ())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::Method;
    use crate::mock_framework::{admin_session, create_mock_api, expect_call};
    use serde_json::json;

    #[tokio::test]
    async fn suspend_vendor_sends_reason() {
        let (api, mut backend) = create_mock_api(admin_session(), 4);
        let vendors = VendorService::new(api);
        let call = tokio::spawn(async move {
            vendors
                .update_vendor_status("v1", VendorStatus::Suspended, Some("late shipments".into()))
                .await
        });

        let exchange = expect_call(&mut backend, Method::Put, "/api/admin/vendors/v1/status").await;
        assert_eq!(exchange.request.body, Some(json!({"status": "SUSPENDED", "reason": "late shipments"})));
        exchange.respond(200, json!({"success": true, "message": "Vendor suspended"}));

        assert_eq!(call.await.unwrap(), Ok(None));
    }

    #[tokio::test]
    async fn list_vendors_accepts_results_shape() {
        let (api, mut backend) = create_mock_api(admin_session(), 4);
        let vendors = VendorService::new(api);
        let call = tokio::spawn(async move { vendors.list_vendors(&ListQuery::default()).await });

        expect_call(&mut backend, Method::Get, "/api/admin/vendors")
            .await
            .respond(200, json!({"results": [{"_id": "v1", "status": "PENDING", "storeName": "Kente Co"}]}));

        let page = call.await.unwrap().unwrap();
        assert_eq!(page.items[0].display_name(), "Kente Co");
        assert_eq!(page.pagination, None);
    }
}
