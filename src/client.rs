use std::path::Path;
use std::time::Duration;

use bytes::Bytes;
use futures::TryStreamExt;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::{Body, Method, Response};
use serde_json::Value;
use tokio::io::{AsyncRead, AsyncWriteExt, BufReader};
use tokio_util::io::{ReaderStream, StreamReader};
use tracing::debug;
use url::Url;

use crate::constants::{BLOBS_PATH, BY_OBJECT_ID_SEGMENT, DOWNLOAD_BUFFER_SIZE};
use crate::error::{WalrusApiError, WalrusClientError};
use crate::http_client::{HttpClient, HttpClientBuilder};
use crate::types::{BlobMetadata, BoxedAsyncRead, StoreOptions};
use crate::WalrusClientArgs;

/// Client for the Walrus publisher and aggregator HTTP APIs.
///
/// Holds one connection pool per endpoint and no other state; operations
/// are independent, so the client can be shared freely across tasks.
#[derive(Debug, Clone)]
pub struct WalrusClient {
    publisher: HttpClient,
    aggregator: HttpClient,
}

impl WalrusClient {
    /// Builds a client from validated arguments. Performs no I/O.
    pub fn new_with_args(args: &WalrusClientArgs) -> Self {
        // Every publisher request is a raw-bytes store, so the content type
        // is installed once as a default header.
        let publisher = Self::endpoint(&args.publisher_url, args.request_timeout)
            .default_header(CONTENT_TYPE, HeaderValue::from_static("application/octet-stream"))
            .build()
            .expect("Failed to build HTTP client");
        let aggregator = Self::endpoint(&args.aggregator_url, args.request_timeout)
            .build()
            .expect("Failed to build HTTP client");
        Self { publisher, aggregator }
    }

    fn endpoint(base_url: &Url, timeout: Duration) -> HttpClientBuilder {
        HttpClient::builder(base_url.as_str())
            .expect("Failed to create HTTP client builder")
            .timeout(timeout)
    }

    /// Uploads binary data to the publisher.
    ///
    /// Returns the service's JSON response unmodified; the client imposes
    /// no schema on it. A 2xx response whose body is not valid JSON
    /// surfaces as [`WalrusClientError::Decode`].
    pub async fn put_blob(
        &self,
        data: impl Into<Bytes>,
        options: &StoreOptions,
    ) -> Result<Value, WalrusClientError> {
        self.store(data.into().into(), options, "error uploading blob").await
    }

    /// Uploads a blob read from a file on disk.
    ///
    /// Fails with [`WalrusClientError::FileNotFound`] before any network
    /// call if `path` is not an existing regular file.
    pub async fn put_blob_from_file(
        &self,
        path: impl AsRef<Path>,
        options: &StoreOptions,
    ) -> Result<Value, WalrusClientError> {
        let path = path.as_ref();
        match tokio::fs::metadata(path).await {
            Ok(metadata) if metadata.is_file() => {}
            _ => return Err(WalrusClientError::FileNotFound(path.to_path_buf())),
        }
        let data = tokio::fs::read(path)
            .await
            .map_err(|source| WalrusClientError::FileRead { path: path.to_path_buf(), source })?;
        self.put_blob(data, options).await
    }

    /// Uploads a blob from an async reader without buffering it in memory.
    ///
    /// The reader is consumed once, sequentially, to end of stream.
    pub async fn put_blob_from_stream<R>(
        &self,
        reader: R,
        options: &StoreOptions,
    ) -> Result<Value, WalrusClientError>
    where
        R: AsyncRead + Send + 'static,
    {
        let body = Body::wrap_stream(ReaderStream::new(reader));
        self.store(body, options, "error uploading blob from stream").await
    }

    /// Retrieves a blob from the aggregator by the object ID of its Sui
    /// Blob object, fully loaded into memory.
    pub async fn get_blob_by_object_id(&self, object_id: &str) -> Result<Vec<u8>, WalrusClientError> {
        let context = format!("error retrieving blob by object ID: {object_id}");
        let response = self.fetch(Method::GET, &[BLOBS_PATH, BY_OBJECT_ID_SEGMENT, object_id], &context).await?;
        let content =
            response.bytes().await.map_err(|source| WalrusApiError::from_transport(context, source))?;
        Ok(content.to_vec())
    }

    /// Retrieves a blob from the aggregator by its blob ID, fully loaded
    /// into memory.
    pub async fn get_blob(&self, blob_id: &str) -> Result<Vec<u8>, WalrusClientError> {
        let context = format!("error retrieving blob by blob ID: {blob_id}");
        let response = self.fetch(Method::GET, &[BLOBS_PATH, blob_id], &context).await?;
        let content =
            response.bytes().await.map_err(|source| WalrusApiError::from_transport(context, source))?;
        Ok(content.to_vec())
    }

    /// Retrieves a blob as a live byte stream bound to the open connection.
    ///
    /// The reader is single-pass and not restartable; the caller must
    /// drain or drop it, and dropping it releases the connection.
    pub async fn get_blob_as_stream(&self, blob_id: &str) -> Result<BoxedAsyncRead, WalrusClientError> {
        let context = format!("error retrieving blob as stream by blob ID: {blob_id}");
        let response = self.fetch(Method::GET, &[BLOBS_PATH, blob_id], &context).await?;
        let stream = response.bytes_stream().map_err(std::io::Error::other);
        Ok(Box::pin(StreamReader::new(stream)))
    }

    /// Retrieves a blob and writes it to `path`, streaming through a fixed
    /// 8 KiB buffer instead of holding the whole blob in memory.
    ///
    /// The connection and the destination file handle are released on every
    /// exit path. A failure mid-stream may leave a truncated file behind;
    /// the destination is not cleaned up on error.
    pub async fn get_blob_as_file(
        &self,
        blob_id: &str,
        path: impl AsRef<Path>,
    ) -> Result<(), WalrusClientError> {
        let path = path.as_ref();
        let context = format!("error retrieving blob as file by blob ID: {blob_id}");
        let response = self.fetch(Method::GET, &[BLOBS_PATH, blob_id], &context).await?;
        debug!("Writing blob {blob_id} to {}", path.display());

        let stream = Box::pin(response.bytes_stream().map_err(std::io::Error::other));
        let mut reader = BufReader::with_capacity(DOWNLOAD_BUFFER_SIZE, StreamReader::new(stream));
        let mut file = tokio::fs::File::create(path)
            .await
            .map_err(|source| WalrusClientError::FileWrite { path: path.to_path_buf(), source })?;

        if let Err(error) = tokio::io::copy_buf(&mut reader, &mut file).await {
            // Read-side failures carry the transport error; everything else
            // is a local write failure.
            return Err(match error.downcast::<reqwest::Error>() {
                Ok(source) => WalrusApiError::from_transport(context, source).into(),
                Err(source) => WalrusClientError::FileWrite { path: path.to_path_buf(), source },
            });
        }
        file.flush()
            .await
            .map_err(|source| WalrusClientError::FileWrite { path: path.to_path_buf(), source })?;
        Ok(())
    }

    /// Probes blob metadata with a HEAD request and returns all response
    /// headers verbatim.
    ///
    /// Header names are reported lowercased by the transport; values that
    /// are not valid UTF-8 are replaced lossily.
    pub async fn get_blob_metadata(&self, blob_id: &str) -> Result<BlobMetadata, WalrusClientError> {
        let context = format!("error retrieving metadata for blob ID: {blob_id}");
        let response = self.fetch(Method::HEAD, &[BLOBS_PATH, blob_id], &context).await?;
        Ok(response
            .headers()
            .iter()
            .map(|(name, value)| {
                (name.as_str().to_string(), String::from_utf8_lossy(value.as_bytes()).into_owned())
            })
            .collect())
    }

    /// Shared store path for all three upload entry points.
    async fn store(
        &self,
        body: Body,
        options: &StoreOptions,
        context: &str,
    ) -> Result<Value, WalrusClientError> {
        debug!("Storing blob via {}", self.publisher.base_url());
        let response = self
            .publisher
            .request()
            .method(Method::PUT)
            .path(BLOBS_PATH)
            .query_params(options.query_params())
            .body(body)
            .send()
            .await
            .map_err(|source| WalrusApiError::from_transport(context.to_string(), source))?;

        if !response.status().is_success() {
            return Err(WalrusApiError::from_response(context.to_string(), response).await.into());
        }

        response
            .json()
            .await
            .map_err(|source| WalrusClientError::Decode { context: context.to_string(), source })
    }

    /// Sends an aggregator request and normalizes non-2xx and transport
    /// failures; success responses are handed back untouched.
    async fn fetch(
        &self,
        method: Method,
        segments: &[&str],
        context: &str,
    ) -> Result<Response, WalrusClientError> {
        debug!("Fetching {} from {}", segments.join("/"), self.aggregator.base_url());
        let mut request = self.aggregator.request().method(method);
        for segment in segments {
            request = request.path(segment);
        }
        let response = request
            .send()
            .await
            .map_err(|source| WalrusApiError::from_transport(context.to_string(), source))?;

        if !response.status().is_success() {
            return Err(WalrusApiError::from_response(context.to_string(), response).await.into());
        }
        Ok(response)
    }
}
