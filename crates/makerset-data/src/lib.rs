//! HTTP client and typed API for the MakerSet backend.
//!
//! [`FetchClient`] wraps a blocking `ureq` agent behind the async
//! [`Transport`] seam, bounds every attempt with a timeout and retries what
//! its [`RetryPolicy`] allows. [`MakerSetApi`] maps the REST endpoints onto
//! `makerset-commerce` types and implements its checkout backend.
//!
//! # Example
//!
//! ```rust,no_run
//! use makerset_data::{FetchClient, FetchPolicy, MakerSetApi};
//! use makerset_commerce::SetId;
//!
//! # async fn run() -> Result<(), makerset_data::FetchError> {
//! let client = FetchClient::new("http://localhost:3000", FetchPolicy::default());
//! let api = MakerSetApi::new(client);
//!
//! let ratings = api.set_ratings(SetId::new(12)).await?;
//! println!("{} ({} reviews)", ratings.average_label(), ratings.review_count);
//! # Ok(())
//! # }
//! ```

mod api;
mod client;
mod error;
mod request;
mod response;
mod retry;
mod timeout;
mod transport;

pub use api::MakerSetApi;
pub use client::{FetchClient, FetchPolicy};
pub use error::FetchError;
pub use request::{Method, Request};
pub use response::{Envelope, Response};
pub use retry::{BackoffStrategy, RetryCondition, RetryPolicy};
pub use timeout::TimeoutConfig;
pub use transport::{Transport, UreqTransport};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FetchClient, FetchError, FetchPolicy, MakerSetApi, Method, Response};
}
