//! Checkout orchestration against the order backend.

use async_trait::async_trait;
use makerset_store::KvStore;
use thiserror::Error;
use tracing::{info, warn};

use crate::cart::{CartStore, ShippingPolicy};
use crate::checkout::{
    save_customer_info, CheckoutFlow, CheckoutState, CustomerInfo, OrderPayload, OrderReceipt,
    StockCheckRequest, StockValidationReport,
};
use crate::CommerceError;

/// Failure reported by a [`CheckoutBackend`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct BackendError {
    /// User-presentable message.
    pub message: String,
    /// HTTP status, when the failure came from a response.
    pub status: Option<u16>,
}

impl BackendError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }
}

/// The two backend calls checkout depends on.
#[async_trait]
pub trait CheckoutBackend: Send + Sync {
    /// Check that every requested kit can be built from current stock.
    async fn validate_stock(
        &self,
        request: &StockCheckRequest,
    ) -> Result<StockValidationReport, BackendError>;

    /// Create the order.
    async fn create_order(&self, order: &OrderPayload) -> Result<OrderReceipt, BackendError>;
}

/// One checkout session over a cart.
///
/// Holds the cart exclusively for its lifetime, so the cart cannot change
/// between a passing stock check and the order submission.
pub struct Checkout<'a, B: CheckoutBackend + ?Sized> {
    cart: &'a mut CartStore,
    backend: &'a B,
    shipping: &'a ShippingPolicy,
    saved_info: Option<&'a dyn KvStore>,
    flow: CheckoutFlow,
}

impl<'a, B: CheckoutBackend + ?Sized> Checkout<'a, B> {
    /// Start a checkout session.
    pub fn new(cart: &'a mut CartStore, backend: &'a B, shipping: &'a ShippingPolicy) -> Self {
        Self {
            cart,
            backend,
            shipping,
            saved_info: None,
            flow: CheckoutFlow::new(),
        }
    }

    /// Store used when the customer asks to remember their details.
    pub fn with_saved_info(mut self, store: &'a dyn KvStore) -> Self {
        self.saved_info = Some(store);
        self
    }

    /// The cart being checked out.
    pub fn cart(&self) -> &CartStore {
        &*self.cart
    }

    /// Current checkout state.
    pub fn state(&self) -> CheckoutState {
        self.flow.state()
    }

    /// Abandon an interrupted attempt.
    ///
    /// Needed only when a validation or submission future was dropped before
    /// it finished.
    pub fn abort(&mut self) {
        self.flow.reset();
    }

    /// Ask the backend whether every line can be fulfilled.
    ///
    /// Never mutates the cart. Transport failures surface as
    /// [`CommerceError::StockValidationFailed`]; an unfulfillable cart as
    /// [`CommerceError::InsufficientStock`] with a message naming each kit
    /// and its short parts.
    pub async fn validate_stock(&mut self) -> Result<StockValidationReport, CommerceError> {
        if self.cart.is_empty() {
            return Err(CommerceError::EmptyCart);
        }
        self.flow.begin_validation()?;

        let request = StockCheckRequest::from_cart(self.cart);
        let report = match self.backend.validate_stock(&request).await {
            Ok(report) => report,
            Err(e) => {
                self.flow.finish_validation(false)?;
                warn!(error = %e, "stock validation request failed");
                return Err(CommerceError::StockValidationFailed(e.message));
            }
        };

        match report.blocking_message(self.cart) {
            None => {
                self.flow.finish_validation(true)?;
                info!(lines = self.cart.len(), "stock validation passed");
                Ok(report)
            }
            Some(message) => {
                self.flow.finish_validation(false)?;
                warn!(
                    failures = report.failures().count(),
                    "checkout blocked by insufficient stock"
                );
                Err(CommerceError::InsufficientStock {
                    message,
                    results: report.results,
                })
            }
        }
    }

    /// Place the order.
    ///
    /// The form is checked first, then stock is validated unless this
    /// session already holds a passing result. On success the cart is
    /// cleared and, if `remember` is set, the form is saved for next time.
    /// On failure the cart is left as it was.
    pub async fn place_order(
        &mut self,
        customer: &CustomerInfo,
        remember: bool,
    ) -> Result<OrderReceipt, CommerceError> {
        customer.validate()?;
        if self.cart.is_empty() {
            return Err(CommerceError::EmptyCart);
        }
        if self.flow.state() != CheckoutState::ValidationPassed {
            self.validate_stock().await?;
        }

        self.flow.begin_submit()?;
        let shipping = self.cart.shipping_info(self.shipping);
        let payload = OrderPayload::build(customer, self.cart, &shipping);

        match self.backend.create_order(&payload).await {
            Ok(receipt) => {
                self.flow.finish_submit(true)?;
                info!(
                    order = %receipt.reference(),
                    items = payload.item_count(),
                    total = payload.total_amount,
                    "order placed"
                );
                self.cart.clear();
                if remember {
                    self.remember(customer);
                }
                Ok(receipt)
            }
            Err(e) => {
                self.flow.finish_submit(false)?;
                warn!(error = %e, "order submission failed");
                Err(CommerceError::OrderFailed(e.message))
            }
        }
    }

    fn remember(&self, customer: &CustomerInfo) {
        let Some(store) = self.saved_info else {
            warn!("asked to remember customer info but no store is configured");
            return;
        };
        // The order already exists; a storage hiccup must not turn it into a failure.
        if let Err(e) = save_customer_info(store, customer) {
            warn!(error = %e, "could not save customer info");
        }
    }
}
