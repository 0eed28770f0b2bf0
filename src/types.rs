use std::collections::HashMap;
use std::pin::Pin;

use tokio::io::AsyncRead;

/// Response headers from a blob metadata probe, keyed by header name as the
/// transport reports it (lowercased).
pub type BlobMetadata = HashMap<String, String>;

/// Single-pass reader over a blob body, bound to the open connection that
/// produced it. Dropping the reader releases the connection.
pub type BoxedAsyncRead = Pin<Box<dyn AsyncRead + Send>>;

/// Optional parameters for blob store requests.
///
/// Unset fields are omitted from the request entirely. The service treats
/// omission differently from an explicit value, so `deletable: None` and
/// `deletable: Some(false)` produce different query strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreOptions {
    /// Encoding type to use for the blob.
    pub encoding_type: Option<String>,
    /// Number of epochs ahead of the current one to store the blob for.
    pub epochs: Option<u64>,
    /// If true, creates a deletable blob instead of a permanent one.
    pub deletable: Option<bool>,
    /// Sui address the created Blob object is sent to.
    pub send_object_to: Option<String>,
}

impl StoreOptions {
    /// Query pairs for the fields that are explicitly set.
    pub(crate) fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(encoding_type) = &self.encoding_type {
            params.push(("encoding_type", encoding_type.clone()));
        }
        if let Some(epochs) = self.epochs {
            params.push(("epochs", epochs.to_string()));
        }
        if let Some(deletable) = self.deletable {
            params.push(("deletable", deletable.to_string()));
        }
        if let Some(send_object_to) = &self.send_object_to {
            params.push(("send_object_to", send_object_to.clone()));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_fields_produce_no_query_pairs() {
        assert!(StoreOptions::default().query_params().is_empty());
    }

    #[test]
    fn deletable_false_is_distinguishable_from_unset() {
        let unset = StoreOptions::default();
        let explicit = StoreOptions { deletable: Some(false), ..Default::default() };
        assert!(unset.query_params().is_empty());
        assert_eq!(explicit.query_params(), vec![("deletable", "false".to_string())]);
    }

    #[test]
    fn all_fields_serialize_in_wire_format() {
        let options = StoreOptions {
            encoding_type: Some("RS2".to_string()),
            epochs: Some(5),
            deletable: Some(true),
            send_object_to: Some("0xabc".to_string()),
        };
        assert_eq!(
            options.query_params(),
            vec![
                ("encoding_type", "RS2".to_string()),
                ("epochs", "5".to_string()),
                ("deletable", "true".to_string()),
                ("send_object_to", "0xabc".to_string()),
            ]
        );
    }
}
