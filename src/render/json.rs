//! Pluggable page encoding.

use crate::protocol::Page;

/// Encodes a [`Page`] into JSON bytes.
pub trait JsonMarshaller: Send + Sync {
    fn marshal(&self, page: &Page) -> Result<Vec<u8>, serde_json::Error>;
}

/// Default encoder backed by `serde_json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SerdeJsonMarshaller;

impl JsonMarshaller for SerdeJsonMarshaller {
    fn marshal(&self, page: &Page) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(page)
    }
}
