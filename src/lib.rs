//! Async client for the Walrus blob storage HTTP API.
//!
//! Walrus exposes two endpoints: a *publisher* that accepts blob uploads
//! and an *aggregator* that serves downloads and metadata probes.
//! [`WalrusClient`] maps each API operation onto a single HTTP exchange and
//! normalizes every failure into [`WalrusApiError`], carrying the service's
//! structured error envelope when one was returned.
//!
//! ```no_run
//! use walrus_client::{StoreOptions, WalrusClient, WalrusClientArgs};
//!
//! # async fn run() -> Result<(), walrus_client::WalrusClientError> {
//! let client = WalrusClient::new_with_args(&WalrusClientArgs::new(
//!     "https://publisher.walrus-testnet.walrus.space".parse().unwrap(),
//!     "https://aggregator.walrus-testnet.walrus.space".parse().unwrap(),
//! ));
//!
//! let options = StoreOptions { epochs: Some(1), deletable: Some(true), ..Default::default() };
//! let receipt = client.put_blob(&b"hello walrus"[..], &options).await?;
//!
//! if let Some(blob_id) = receipt["newlyCreated"]["blobObject"]["blobId"].as_str() {
//!     let content = client.get_blob(blob_id).await?;
//!     assert_eq!(content, b"hello walrus");
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod constants;
pub mod error;
pub mod http_client;
pub mod types;

use std::time::Duration;

use url::Url;

pub use crate::client::WalrusClient;
pub use crate::constants::DEFAULT_REQUEST_TIMEOUT;
pub use crate::error::{WalrusApiError, WalrusClientError};
pub use crate::types::{BlobMetadata, BoxedAsyncRead, StoreOptions};

/// Validated connection arguments for [`WalrusClient`].
#[derive(Debug, Clone)]
pub struct WalrusClientArgs {
    /// Base URL of the publisher (write side).
    pub publisher_url: Url,
    /// Base URL of the aggregator (read side).
    pub aggregator_url: Url,
    /// Timeout covering the whole HTTP exchange of each operation.
    pub request_timeout: Duration,
}

impl WalrusClientArgs {
    /// Arguments with the default 30 second request timeout.
    pub fn new(publisher_url: Url, aggregator_url: Url) -> Self {
        Self { publisher_url, aggregator_url, request_timeout: DEFAULT_REQUEST_TIMEOUT }
    }
}
