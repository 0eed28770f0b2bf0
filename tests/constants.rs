/// Blob ID matching the shape the aggregator hands out (url-safe base64).
pub const TEST_BLOB_ID: &str = "TktRk2y8Ni4vRuJjD8XidZ5qxxWZJjtoz4sU3Xt7cDk";

/// Sui object ID of the Blob object created by a store request.
pub const TEST_OBJECT_ID: &str = "0x0285f63039460d0640b75f8ca0e6834125db82ee54f768f6a32bb8fa56fe09fe";

/// Payload used by the upload/download round-trip tests.
pub const BLOB_CONTENT: &str = "some string with random number: 48745";
