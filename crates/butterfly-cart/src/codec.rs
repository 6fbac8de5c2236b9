//! Slot format: a JSON array of line items.
//!
//! ```json
//! [{"id":"a","name":"Toner","price":120000,"quantity":1,"image":"x.jpg"}]
//! ```

use butterfly_core::CartLineItem;

use crate::error::CodecError;

pub fn encode(items: &[CartLineItem]) -> Result<Vec<u8>, CodecError> {
    serde_json::to_vec(items).map_err(CodecError::Encode)
}

/// Strict parse. Anything that is not an array of line items is an error;
/// the store decides what to do about it.
pub fn decode(bytes: &[u8]) -> Result<Vec<CartLineItem>, CodecError> {
    serde_json::from_slice(bytes).map_err(CodecError::Decode)
}
