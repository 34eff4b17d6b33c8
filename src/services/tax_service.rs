use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::controller::ListSource;
use crate::domain::{TaxConfig, TaxHistoryEntry, TaxUpdate};
use crate::error::ApiError;
use crate::http::{decode_entity, decode_optional_entity, ApiClient, ListPage, ListQuery};

const TAX_PATH: &str = "/api/admin/tax";
const TAX_HISTORY_PATH: &str = "/api/admin/tax/history";

/// The single platform tax configuration and its change history.
#[derive(Clone)]
pub struct TaxService {
    api: ApiClient,
}

impl TaxService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    #[instrument(skip(self))]
    pub async fn current_tax(&self) -> Result<TaxConfig, ApiError> {
        debug!("Sending request");
        let body = self.api.get(TAX_PATH, &Default::default()).await?;
        decode_tax(body)
    }

    pub async fn update_tax(&self, update: &TaxUpdate) -> Result<Option<TaxConfig>, ApiError> {
        let body = self.send_update(update).await?;
        decode_optional_entity(body, "tax")
    }

    #[instrument(skip(self))]
    async fn send_update(&self, update: &TaxUpdate) -> Result<Value, ApiError> {
        if let Err(reason) = update.validate() {
            warn!(reason = %reason, "Tax update rejected before sending");
            return Err(ApiError::Validation(reason));
        }
        debug!("Sending request");
        let body = self.api.put(TAX_PATH, update).await?;
        info!(tax_rate = update.tax_rate, "Tax rate updated");
        Ok(body)
    }

    #[instrument(skip(self))]
    pub async fn tax_history(&self, query: &ListQuery) -> Result<ListPage<TaxHistoryEntry>, ApiError> {
        debug!("Sending request");
        self.api.get_list(TAX_HISTORY_PATH, &query.to_query(), "history").await
    }
}

/// The tax endpoint has no id, so the bare-object fallback keys off `taxRate`.
fn decode_tax(body: Value) -> Result<TaxConfig, ApiError> {
    if body.get("taxRate").is_some() {
        return serde_json::from_value(body).map_err(|e| ApiError::Decode(format!("invalid tax: {e}")));
    }
    decode_entity(body, "tax")
}

#[async_trait]
impl ListSource for TaxService {
    type Item = TaxHistoryEntry;
    type Action = TaxUpdate;

    async fn fetch(&self, query: &ListQuery) -> Result<ListPage<TaxHistoryEntry>, ApiError> {
        self.tax_history(query).await
    }

    async fn apply(&self, update: TaxUpdate) -> Result<(), ApiError> {
        self.send_update(&update).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::Method;
    use crate::mock_framework::{admin_session, create_mock_api, expect_call};
    use serde_json::json;

    #[tokio::test]
    async fn current_tax_accepts_bare_and_wrapped() {
        let (api, mut backend) = create_mock_api(admin_session(), 4);
        let tax = TaxService::new(api);
        let call = tokio::spawn(async move { (tax.current_tax().await, tax.current_tax().await) });

        expect_call(&mut backend, Method::Get, TAX_PATH)
            .await
            .respond(200, json!({"taxRate": 7.5, "isActive": true}));
        expect_call(&mut backend, Method::Get, TAX_PATH)
            .await
            .respond(200, json!({"success": true, "data": {"taxRate": 5, "description": "VAT"}}));

        let (bare, wrapped) = call.await.unwrap();
        assert_eq!(bare.unwrap().tax_rate, 7.5);
        let wrapped = wrapped.unwrap();
        assert_eq!(wrapped.tax_rate, 5.0);
        assert_eq!(wrapped.description.as_deref(), Some("VAT"));
    }

    #[tokio::test]
    async fn out_of_range_rate_is_rejected_locally() {
        let (api, _backend) = create_mock_api(admin_session(), 4);
        let err = TaxService::new(api)
            .update_tax(&TaxUpdate { tax_rate: 250.0, description: None })
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn history_reads_history_key() {
        let (api, mut backend) = create_mock_api(admin_session(), 4);
        let tax = TaxService::new(api);
        let call = tokio::spawn(async move { tax.tax_history(&ListQuery::new(1, 5)).await });

        let exchange = expect_call(&mut backend, Method::Get, TAX_HISTORY_PATH).await;
        assert_eq!(exchange.request.query, "page=1&limit=5");
        exchange.respond(200, json!({"history": [{"taxRate": 7.5, "previousRate": 5}]}));

        let page = call.await.unwrap().unwrap();
        assert_eq!(page.items[0].previous_rate, Some(5.0));
    }
}
