//! Typed client for the MakerSet REST API.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use makerset_commerce::catalog::{
    InventoryAdjustment, InventoryIncome, SetRatingSummary, VisibilityUpdate,
};
use makerset_commerce::checkout::{
    BackendError, CheckoutBackend, OrderPayload, OrderReceipt, StockCheckRequest,
    StockValidationReport,
};
use makerset_commerce::{PartId, SetId};

use crate::client::FetchClient;
use crate::request::Method;
use crate::FetchError;

/// The MakerSet backend endpoints used by the shop client.
#[derive(Debug, Clone)]
pub struct MakerSetApi {
    client: FetchClient,
}

/// Stock validation answers either bare or inside the usual envelope.
#[derive(Deserialize)]
#[serde(untagged)]
enum StockResponse {
    Report(StockValidationReport),
    Wrapped { data: StockValidationReport },
}

impl MakerSetApi {
    pub fn new(client: FetchClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &FetchClient {
        &self.client
    }

    /// `POST /api/orders/validate-stock`.
    ///
    /// Read-only on the server, so it runs under the client's retry policy.
    pub async fn validate_stock(
        &self,
        request: &StockCheckRequest,
    ) -> Result<StockValidationReport, FetchError> {
        let policy = self.client.policy().clone();
        let response = self
            .client
            .send_json_with_policy(Method::Post, "/api/orders/validate-stock", request, &policy)
            .await?;
        let report = match response.json::<StockResponse>()? {
            StockResponse::Report(report) | StockResponse::Wrapped { data: report } => report,
        };
        if !report.all_valid() {
            warn!(
                failing = report.failures().count(),
                "Stock validation reported unavailable kits"
            );
        }
        Ok(report)
    }

    /// `POST /api/orders`. Sent exactly once.
    pub async fn create_order(&self, order: &OrderPayload) -> Result<OrderReceipt, FetchError> {
        let response = self
            .client
            .send_json(Method::Post, "/api/orders", order)
            .await?;
        let receipt: OrderReceipt = response.envelope()?;
        info!(
            order_id = %receipt.id,
            items = order.item_count(),
            total = order.total_amount,
            "Order created"
        );
        Ok(receipt)
    }

    /// `GET /api/ratings/set/{setId}`.
    pub async fn set_ratings(&self, set_id: SetId) -> Result<SetRatingSummary, FetchError> {
        self.client
            .get(&format!("/api/ratings/set/{set_id}"))
            .await?
            .envelope()
    }

    /// `POST /api/inventory/parts/{partId}/adjust`.
    pub async fn adjust_part_stock(
        &self,
        part_id: PartId,
        adjustment: &InventoryAdjustment,
    ) -> Result<Value, FetchError> {
        adjustment.validate()?;
        let response = self
            .client
            .send_json(
                Method::Post,
                &format!("/api/inventory/parts/{part_id}/adjust"),
                adjustment,
            )
            .await?;
        info!(
            part_id = %part_id,
            adjustment = adjustment.adjustment_type.as_str(),
            quantity = adjustment.quantity,
            "Part stock adjusted"
        );
        optional_data(&response)
    }

    /// `POST /api/inventory/parts/{partId}/income`.
    pub async fn record_part_income(
        &self,
        part_id: PartId,
        income: &InventoryIncome,
    ) -> Result<Value, FetchError> {
        income.validate()?;
        let response = self
            .client
            .send_json(
                Method::Post,
                &format!("/api/inventory/parts/{part_id}/income"),
                income,
            )
            .await?;
        info!(
            part_id = %part_id,
            quantity = income.quantity,
            supplier = %income.supplier,
            "Part income recorded"
        );
        optional_data(&response)
    }

    /// `PUT /api/sets/{setId}/visibility`.
    pub async fn set_visibility(&self, update: &VisibilityUpdate) -> Result<(), FetchError> {
        let response = self
            .client
            .send_json(
                Method::Put,
                &format!("/api/sets/{}/visibility", update.set_id),
                update,
            )
            .await?;
        optional_data(&response)?;
        info!(set_id = %update.set_id, visible = update.visible, "Set visibility changed");
        Ok(())
    }
}

/// Body of an admin write: `data` if present, `null` for empty bodies.
fn optional_data(response: &crate::Response) -> Result<Value, FetchError> {
    if response.body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    let value: Value = response.json()?;
    if value.get("success") == Some(&Value::Bool(false)) {
        let message = value
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("Request was not successful")
            .to_string();
        return Err(FetchError::Server {
            status: response.status,
            message,
        });
    }
    Ok(value.get("data").cloned().unwrap_or(value))
}

#[async_trait]
impl CheckoutBackend for MakerSetApi {
    async fn validate_stock(
        &self,
        request: &StockCheckRequest,
    ) -> Result<StockValidationReport, BackendError> {
        MakerSetApi::validate_stock(self, request)
            .await
            .map_err(BackendError::from)
    }

    async fn create_order(&self, order: &OrderPayload) -> Result<OrderReceipt, BackendError> {
        MakerSetApi::create_order(self, order)
            .await
            .map_err(BackendError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::FetchPolicy;
    use crate::retry::{BackoffStrategy, RetryPolicy};
    use crate::timeout::TimeoutConfig;
    use crate::transport::mock::MockTransport;
    use makerset_commerce::catalog::AdjustmentType;
    use makerset_commerce::checkout::StockCheckItem;
    use std::sync::Arc;

    fn api(transport: Arc<MockTransport>) -> MakerSetApi {
        let policy = FetchPolicy::new(
            TimeoutConfig::from_millis(500),
            RetryPolicy::new(2).with_backoff(BackoffStrategy::None),
        );
        MakerSetApi::new(FetchClient::with_transport("http://shop.test", policy, transport))
    }

    fn body(transport: &MockTransport) -> Value {
        let request = transport.last_request();
        serde_json::from_slice(request.body.as_deref().unwrap_or(b"null")).unwrap()
    }

    #[tokio::test]
    async fn test_validate_stock_retries_server_errors() {
        let transport = Arc::new(
            MockTransport::new()
                .respond(500, r#"{"error": "db down"}"#)
                .respond(200, r#"{"valid": true, "results": []}"#),
        );
        let request = StockCheckRequest {
            items: vec![StockCheckItem {
                set_id: SetId::new(3),
                quantity: 2,
            }],
        };

        let report = api(transport.clone()).validate_stock(&request).await.unwrap();
        assert!(report.all_valid());
        assert_eq!(transport.calls(), 2);
        assert_eq!(body(&transport)["items"][0]["set_id"], 3);
        assert_eq!(
            transport.last_request().url,
            "http://shop.test/api/orders/validate-stock"
        );
    }

    #[tokio::test]
    async fn test_validate_stock_accepts_envelope() {
        let transport = Arc::new(MockTransport::new().respond(
            200,
            r#"{"success": true, "data": {"valid": false, "results": [
                {"set_id": 1, "valid": false, "insufficient_parts": []}]}}"#,
        ));
        let report = api(transport)
            .validate_stock(&StockCheckRequest { items: vec![] })
            .await
            .unwrap();
        assert!(!report.valid);
        assert_eq!(report.results.len(), 1);
    }

    #[tokio::test]
    async fn test_create_order_error_is_not_retried() {
        let transport = Arc::new(
            MockTransport::new()
                .respond(503, r#"{"error": "Service unavailable"}"#)
                .respond(200, r#"{"success": true, "data": {"id": 1}}"#),
        );
        let backend = api(transport.clone());
        let payload: OrderPayload = serde_json::from_value(serde_json::json!({
            "customer_first_name": "Ada",
            "customer_last_name": "Lovelace",
            "customer_email": "ada@example.com",
            "items": [],
            "subtotal": 0.0,
            "shipping_cost": 0.0,
            "shipping_description": "No items",
            "total_amount": 0.0,
            "currency": "EUR"
        }))
        .unwrap();

        let err = CheckoutBackend::create_order(&backend, &payload)
            .await
            .unwrap_err();
        assert_eq!(err.status, Some(503));
        assert_eq!(err.message, "Service unavailable");
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn test_create_order_receipt() {
        let transport = Arc::new(MockTransport::new().respond(
            201,
            r#"{"success": true, "data": {"id": 77, "order_number": "MS-77"}}"#,
        ));
        let payload: OrderPayload = serde_json::from_value(serde_json::json!({
            "items": [], "subtotal": 0.0, "shipping_cost": 0.0,
            "shipping_description": "", "total_amount": 0.0, "currency": "EUR"
        }))
        .unwrap();

        let receipt = api(transport).create_order(&payload).await.unwrap();
        assert_eq!(receipt.reference(), "MS-77");
    }

    #[tokio::test]
    async fn test_set_ratings() {
        let transport = Arc::new(MockTransport::new().respond(
            200,
            r#"{"success": true, "data": {"set_id": 9, "average_rating": 4.5,
                "review_count": 2, "reviews": []}}"#,
        ));
        let summary = api(transport.clone()).set_ratings(SetId::new(9)).await.unwrap();
        assert_eq!(summary.review_count, 2);
        assert_eq!(transport.last_request().url, "http://shop.test/api/ratings/set/9");
        assert_eq!(transport.last_request().method, Method::Get);
    }

    #[tokio::test]
    async fn test_adjust_validates_before_sending() {
        let transport = Arc::new(MockTransport::new());
        let err = api(transport.clone())
            .adjust_part_stock(PartId::new(4), &InventoryAdjustment::new(AdjustmentType::Add, 0))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::InvalidRequest(_)));
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn test_adjust_sends_body() {
        let transport = Arc::new(
            MockTransport::new().respond(200, r#"{"success": true, "data": {"quantity": 12}}"#),
        );
        let adjustment = InventoryAdjustment::new(AdjustmentType::Add, 5).with_notes("recount");
        let data = api(transport.clone())
            .adjust_part_stock(PartId::new(4), &adjustment)
            .await
            .unwrap();
        assert_eq!(data["quantity"], 12);
        assert_eq!(
            transport.last_request().url,
            "http://shop.test/api/inventory/parts/4/adjust"
        );
        assert_eq!(body(&transport)["adjustment_type"], "add");
    }

    #[tokio::test]
    async fn test_visibility_put() {
        let transport = Arc::new(MockTransport::new().respond(204, ""));
        api(transport.clone())
            .set_visibility(&VisibilityUpdate::new(SetId::new(6), true))
            .await
            .unwrap();
        let request = transport.last_request();
        assert_eq!(request.method, Method::Put);
        assert_eq!(request.url, "http://shop.test/api/sets/6/visibility");
        assert_eq!(body(&transport), serde_json::json!({"setId": 6, "visible": true}));
    }

    #[tokio::test]
    async fn test_visibility_failure_envelope() {
        let transport = Arc::new(
            MockTransport::new().respond(200, r#"{"success": false, "error": "Set not found"}"#),
        );
        let err = api(transport)
            .set_visibility(&VisibilityUpdate::new(SetId::new(6), false))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Set not found");
    }
}
