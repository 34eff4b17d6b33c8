use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use crate::controller::ListSource;
use crate::domain::{FeeConfig, FeeCreate, FeePatch};
use crate::error::ApiError;
use crate::http::{ListPage, ListQuery};
use crate::resource_framework::{Resource, ResourceClient};

impl Resource for FeeConfig {
    type CreatePayload = FeeCreate;
    type Patch = FeePatch;

    const BASE_PATH: &'static str = "/api/admin/fees";
    const COLLECTION_KEY: &'static str = "fees";
    const ENTITY_KEY: &'static str = "fee";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Platform fee configuration.
///
/// List filters: `level`, `feeType`, `isActive`, `vendorId`, `productId`.
#[derive(Clone)]
pub struct FeeService {
    inner: ResourceClient<FeeConfig>,
}

impl_resource_service!(FeeService, FeeConfig, fee, fees);
impl_mutable_service!(FeeService, FeeConfig, fee);

impl FeeService {
    /// Validates the payload locally, then creates the fee.
    #[instrument(skip(self))]
    pub async fn create_checked_fee(&self, payload: &FeeCreate) -> Result<Option<FeeConfig>, ApiError> {
        if let Err(reason) = payload.validate() {
            warn!(reason = %reason, "Fee rejected before sending");
            return Err(ApiError::Validation(reason));
        }
        debug!("Sending request");
        self.inner.create(payload).await
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FeeRowAction {
    Toggle(String),
    Delete(String),
    Update { id: String, patch: FeePatch },
}

#[async_trait]
impl ListSource for FeeService {
    type Item = FeeConfig;
    type Action = FeeRowAction;

    async fn fetch(&self, query: &ListQuery) -> Result<ListPage<FeeConfig>, ApiError> {
        self.list_fees(query).await
    }

    #[instrument(skip(self))]
    async fn apply(&self, action: FeeRowAction) -> Result<(), ApiError> {
        debug!("Sending request");
        match action {
            FeeRowAction::Toggle(id) => self.inner.send_toggle(&id).await.map(|_| ()),
            FeeRowAction::Delete(id) => self.delete_fee(&id).await,
            FeeRowAction::Update { id, patch } => self.inner.send_update(&id, &patch).await.map(|_| ()),
        }
    }
}
