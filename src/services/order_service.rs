use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::controller::ListSource;
use crate::domain::{CancelOrder, Order, OrderStats, OrderStatus, OrderStatusUpdate};
use crate::error::ApiError;
use crate::http::{decode_optional_entity, ListPage, ListQuery, QueryBuilder};
use crate::resource_framework::{Resource, ResourceClient};

impl Resource for Order {
    type CreatePayload = ();
    type Patch = OrderStatusUpdate;

    const BASE_PATH: &'static str = "/api/admin-orders";
    const COLLECTION_KEY: &'static str = "orders";
    const ENTITY_KEY: &'static str = "order";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Admin order management.
///
/// List filters understood by the backend: `status`, `paymentStatus`,
/// `search`, `startDate`, `endDate`.
#[derive(Clone)]
pub struct OrderService {
    inner: ResourceClient<Order>,
}

impl_resource_service!(OrderService, Order, order, orders);

impl OrderService {
    /// The cancelled order, when the backend echoes a full record.
    pub async fn cancel_order(&self, id: &str, reason: Option<String>) -> Result<Option<Order>, ApiError> {
        let body = self.send_cancel(id, reason).await?;
        decode_optional_entity(body, Order::ENTITY_KEY)
    }

    pub async fn update_order_status(
        &self,
        id: &str,
        status: OrderStatus,
        note: Option<String>,
    ) -> Result<Option<Order>, ApiError> {
        let body = self.send_status(id, status, note).await?;
        decode_optional_entity(body, Order::ENTITY_KEY)
    }

    #[instrument(skip(self))]
    async fn send_cancel(&self, id: &str, reason: Option<String>) -> Result<Value, ApiError> {
        debug!("Sending request");
        let body = self.inner.post_action(id, "cancel", &CancelOrder { reason }).await?;
        info!("Order cancelled");
        Ok(body)
    }

    #[instrument(skip(self))]
    async fn send_status(&self, id: &str, status: OrderStatus, note: Option<String>) -> Result<Value, ApiError> {
        if status == OrderStatus::Unknown {
            return Err(ApiError::Validation("a known order status is required".to_string()));
        }
        debug!("Sending request");
        let body = self
            .inner
            .put_action(id, "status", &OrderStatusUpdate { status, note })
            .await?;
        info!(status = %status, "Order status updated");
        Ok(body)
    }

    #[instrument(skip(self))]
    pub async fn order_stats(&self) -> Result<OrderStats, ApiError> {
        debug!("Sending request");
        let path = format!("{}/stats", Order::BASE_PATH);
        let mut body = self.inner.api().get(&path, &QueryBuilder::new()).await?;
        let stats = match ["stats", "data"].into_iter().find(|key| body.get(*key).is_some()) {
            Some(key) => body[key].take(),
            None => body,
        };
        if stats == Value::Null {
            return Ok(OrderStats::default());
        }
        serde_json::from_value(stats).map_err(|e| ApiError::Decode(format!("invalid order stats: {e}")))
    }
}

/// Row actions on the orders page.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderRowAction {
    Cancel { id: String, reason: Option<String> },
    UpdateStatus { id: String, status: OrderStatus, note: Option<String> },
}

#[async_trait]
impl ListSource for OrderService {
    type Item = Order;
    type Action = OrderRowAction;

    async fn fetch(&self, query: &ListQuery) -> Result<ListPage<Order>, ApiError> {
        self.list_orders(query).await
    }

    async fn apply(&self, action: OrderRowAction) -> Result<(), ApiError> {
        match action {
            OrderRowAction::Cancel { id, reason } => self.send_cancel(&id, reason).await.map(|_| ()),
            OrderRowAction::UpdateStatus { id, status, note } => {
                self.send_status(&id, status, note).await.map(|_| ())
            }
        }
    }
}
