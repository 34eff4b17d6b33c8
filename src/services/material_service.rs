use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use crate::controller::ListSource;
use crate::domain::{Material, MaterialCreate, MaterialPatch};
use crate::error::ApiError;
use crate::http::{ListPage, ListQuery};
use crate::resource_framework::{Resource, ResourceClient};

impl Resource for Material {
    type CreatePayload = MaterialCreate;
    type Patch = MaterialPatch;

    const BASE_PATH: &'static str = "/api/admin/materials";
    const COLLECTION_KEY: &'static str = "materials";
    const ENTITY_KEY: &'static str = "material";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Fabric materials catalogue. List filters: `weightCategory`, `isActive`, `search`.
#[derive(Clone)]
pub struct MaterialService {
    inner: ResourceClient<Material>,
}

impl_resource_service!(MaterialService, Material, material, materials);
impl_mutable_service!(MaterialService, Material, material);

impl MaterialService {
    #[instrument(skip(self))]
    pub async fn create_checked_material(&self, payload: &MaterialCreate) -> Result<Option<Material>, ApiError> {
        if let Err(reason) = payload.validate() {
            warn!(reason = %reason, "Material rejected before sending");
            return Err(ApiError::Validation(reason));
        }
        debug!("Sending request");
        self.inner.create(payload).await
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MaterialRowAction {
    Toggle(String),
    Delete(String),
    Update { id: String, patch: MaterialPatch },
}

#[async_trait]
impl ListSource for MaterialService {
    type Item = Material;
    type Action = MaterialRowAction;

    async fn fetch(&self, query: &ListQuery) -> Result<ListPage<Material>, ApiError> {
        self.list_materials(query).await
    }

    #[instrument(skip(self))]
    async fn apply(&self, action: MaterialRowAction) -> Result<(), ApiError> {
        debug!("Sending request");
        match action {
            MaterialRowAction::Toggle(id) => self.inner.send_toggle(&id).await.map(|_| ()),
            MaterialRowAction::Delete(id) => self.delete_material(&id).await,
            MaterialRowAction::Update { id, patch } => self.inner.send_update(&id, &patch).await.map(|_| ()),
        }
    }
}
