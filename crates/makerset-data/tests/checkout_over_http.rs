//! Checkout driven through the HTTP API against a scripted backend.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use makerset_commerce::cart::{CartStore, KitMetadata, ShippingPolicy};
use makerset_commerce::checkout::{load_customer_info, Checkout, CheckoutState, CustomerInfo};
use makerset_commerce::{CommerceError, SetId};
use makerset_data::{
    BackoffStrategy, FetchClient, FetchError, FetchPolicy, MakerSetApi, Request, Response,
    RetryPolicy, TimeoutConfig, Transport,
};
use makerset_store::MemoryStore;

/// Routes by path and records the requests it served.
struct ScriptedBackend {
    stock_body: String,
    order_status: u16,
    order_body: String,
    seen: Mutex<Vec<Request>>,
}

impl ScriptedBackend {
    fn new(stock_body: &str, order_status: u16, order_body: &str) -> Self {
        Self {
            stock_body: stock_body.to_string(),
            order_status,
            order_body: order_body.to_string(),
            seen: Mutex::new(Vec::new()),
        }
    }

    fn paths(&self) -> Vec<String> {
        self.seen
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.url.trim_start_matches("http://shop.test").to_string())
            .collect()
    }
}

#[async_trait]
impl Transport for ScriptedBackend {
    async fn send(&self, request: Request) -> Result<Response, FetchError> {
        let path = request.url.trim_start_matches("http://shop.test").to_string();
        self.seen.lock().unwrap().push(request);
        let (status, body) = match path.as_str() {
            "/api/orders/validate-stock" => (200, self.stock_body.clone()),
            "/api/orders" => (self.order_status, self.order_body.clone()),
            _ => (404, r#"{"error": "Not found"}"#.to_string()),
        };
        Ok(Response::new(status, Vec::new(), body.into_bytes()))
    }
}

fn api(backend: Arc<ScriptedBackend>) -> MakerSetApi {
    let policy = FetchPolicy::new(
        TimeoutConfig::from_millis(1_000),
        RetryPolicy::new(2).with_backoff(BackoffStrategy::None),
    );
    MakerSetApi::new(FetchClient::with_transport("http://shop.test", policy, backend))
}

fn cart() -> CartStore {
    let mut cart = CartStore::new();
    cart.add_or_increment(SetId::new(7), Some(39.0), KitMetadata::named("Traffic Light"));
    cart
}

fn customer() -> CustomerInfo {
    CustomerInfo {
        customer_first_name: "Grace".to_string(),
        customer_last_name: "Hopper".to_string(),
        customer_email: "grace@example.com".to_string(),
        shipping_address: "1 Harbor Rd".to_string(),
        ..CustomerInfo::default()
    }
}

#[tokio::test]
async fn insufficient_stock_blocks_order() {
    let backend = Arc::new(ScriptedBackend::new(
        r#"{"valid": false, "results": [{"set_id": 7, "valid": false,
            "parts_configured": true, "insufficient_parts": [
                {"part_name": "Resistor", "part_number": "R1", "required": 10, "available": 3}]}]}"#,
        200,
        r#"{"success": true, "data": {"id": 1}}"#,
    ));
    let api = api(backend.clone());
    let policy = ShippingPolicy::default();
    let mut cart = cart();

    let mut checkout = Checkout::new(&mut cart, &api, &policy);
    let err = checkout.place_order(&customer(), false).await.unwrap_err();
    assert_eq!(checkout.state(), CheckoutState::ValidationFailed);

    match err {
        CommerceError::InsufficientStock { message, .. } => {
            assert!(message.contains("Traffic Light"));
            assert!(message.contains("Resistor"));
            assert!(message.contains("need 10, have 3"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(backend.paths(), vec!["/api/orders/validate-stock"]);
    assert_eq!(cart.total_items(), 1);
}

#[tokio::test]
async fn successful_order_clears_cart_and_remembers_customer() {
    let backend = Arc::new(ScriptedBackend::new(
        r#"{"valid": true, "results": [{"set_id": 7, "valid": true}]}"#,
        201,
        r#"{"success": true, "data": {"id": 42, "order_number": "MS-42"}}"#,
    ));
    let api = api(backend.clone());
    let policy = ShippingPolicy::flat(4.5, "Parcel");
    let store = MemoryStore::new();
    let mut cart = cart();

    let mut checkout = Checkout::new(&mut cart, &api, &policy).with_saved_info(&store);
    let receipt = checkout.place_order(&customer(), true).await.unwrap();
    assert_eq!(receipt.reference(), "MS-42");

    assert!(cart.is_empty());
    assert_eq!(load_customer_info(&store).unwrap(), Some(customer()));
    assert_eq!(
        backend.paths(),
        vec!["/api/orders/validate-stock", "/api/orders"]
    );

    let seen = backend.seen.lock().unwrap();
    let body: serde_json::Value = serde_json::from_slice(seen[1].body.as_deref().unwrap()).unwrap();
    assert_eq!(body["customer_email"], "grace@example.com");
    assert_eq!(body["total_amount"], 43.5);
    assert_eq!(body["items"][0]["set_name"], "Traffic Light");
}

#[tokio::test]
async fn rejected_order_keeps_cart() {
    let backend = Arc::new(ScriptedBackend::new(
        r#"{"valid": true, "results": []}"#,
        500,
        r#"{"error": "Database unavailable"}"#,
    ));
    let api = api(backend.clone());
    let policy = ShippingPolicy::default();
    let mut cart = cart();

    let mut checkout = Checkout::new(&mut cart, &api, &policy);
    let err = checkout.place_order(&customer(), false).await.unwrap_err();
    assert!(matches!(err, CommerceError::OrderFailed(ref m) if m == "Database unavailable"));
    assert_eq!(checkout.state(), CheckoutState::SubmitError);

    // One stock check, one order attempt, no retry of the order.
    assert_eq!(backend.paths().len(), 2);
    assert_eq!(cart.total_items(), 1);
}
