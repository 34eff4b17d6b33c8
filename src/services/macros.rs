/// Generates `new`, `list_<plural>` and `get_<entity>` for a service
/// wrapping a [`ResourceClient`](crate::resource_framework::ResourceClient).
#[macro_export]
macro_rules! impl_resource_service {
    ($service:ident, $entity:ty, $entity_snake:ident, $plural_snake:ident) => {
        paste::paste! {
            #[allow(dead_code)]
            impl $service {
                pub fn new(api: $crate::http::ApiClient) -> Self {
                    Self { inner: $crate::resource_framework::ResourceClient::new(api) }
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<list_ $plural_snake>](
                    &self,
                    query: &$crate::http::ListQuery,
                ) -> Result<$crate::http::ListPage<$entity>, $crate::error::ApiError> {
                    tracing::debug!("Sending request");
                    self.inner.list(query).await
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<get_ $entity_snake>](&self, id: &str) -> Result<$entity, $crate::error::ApiError> {
                    tracing::debug!("Sending request");
                    self.inner.get(id).await
                }
            }
        }
    };
}

/// Generates `create_<entity>`, `update_<entity>`, `delete_<entity>` and
/// `toggle_<entity>` for services whose collection supports them.
#[macro_export]
macro_rules! impl_mutable_service {
    ($service:ident, $entity:ty, $entity_snake:ident) => {
        paste::paste! {
            #[allow(dead_code)]
            impl $service {
                #[tracing::instrument(skip(self))]
                pub async fn [<create_ $entity_snake>](
                    &self,
                    payload: &<$entity as $crate::resource_framework::Resource>::CreatePayload,
                ) -> Result<Option<$entity>, $crate::error::ApiError> {
                    tracing::debug!("Sending request");
                    self.inner.create(payload).await
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<update_ $entity_snake>](
                    &self,
                    id: &str,
                    patch: &<$entity as $crate::resource_framework::Resource>::Patch,
                ) -> Result<Option<$entity>, $crate::error::ApiError> {
                    tracing::debug!("Sending request");
                    self.inner.update(id, patch).await
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<delete_ $entity_snake>](&self, id: &str) -> Result<(), $crate::error::ApiError> {
                    tracing::debug!("Sending request");
                    self.inner.delete(id).await
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<toggle_ $entity_snake>](&self, id: &str) -> Result<Option<$entity>, $crate::error::ApiError> {
                    tracing::debug!("Sending request");
                    self.inner.toggle(id).await
                }
            }
        }
    };
}
