use std::time::Duration;

/// Per-request timeout applied when the caller does not provide one.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Publisher store endpoint; also the aggregator blob endpoint prefix.
pub(crate) const BLOBS_PATH: &str = "v1/blobs";

/// Aggregator path segment for lookups by Sui object ID.
pub(crate) const BY_OBJECT_ID_SEGMENT: &str = "by-object-id";

/// Buffer size used when streaming a blob to disk.
pub(crate) const DOWNLOAD_BUFFER_SIZE: usize = 8192;
