//! # Cart Store Error Types
//!
//! Error types for the durable slot and the persisted cart format.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / serde_json::Error                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SlotError / CodecError (this module) ← Adds key/path context          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CartStore ← logs with tracing::warn! and SWALLOWS                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  In-memory cart stays authoritative; caller never sees the error       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! These types are public so slot implementations and hosts can report
//! them, but no `CartStore` operation returns them.

use std::path::PathBuf;

use thiserror::Error;

/// Durable slot failures.
#[derive(Debug, Error)]
pub enum SlotError {
    /// Reading the slot failed for a reason other than "not there".
    ///
    /// ## When This Occurs
    /// - Permission denied on the cart file
    /// - The path is a directory
    #[error("Failed to read cart slot '{key}' at {path}: {source}")]
    Read {
        key: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing the slot failed.
    ///
    /// ## When This Occurs
    /// - Disk full
    /// - Read-only data directory
    #[error("Failed to write cart slot '{key}' at {path}: {source}")]
    Write {
        key: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An in-memory slot's lock was poisoned by a panicking writer.
    #[error("Cart slot '{key}' is poisoned")]
    Poisoned { key: String },

    /// Slot refused the operation (used by test doubles and hosts
    /// whose storage can be switched off).
    #[error("Cart slot '{key}' is unavailable: {reason}")]
    Unavailable { key: String, reason: String },
}

/// Persisted cart could not be encoded or decoded.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Failed to encode cart: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Stored cart is not a valid line item list: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Result alias for slot operations.
pub type SlotResult<T> = Result<T, SlotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_error_messages() {
        let err = SlotError::Write {
            key: "cart".to_string(),
            path: PathBuf::from("/tmp/cart.json"),
            source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
        };
        assert_eq!(
            err.to_string(),
            "Failed to write cart slot 'cart' at /tmp/cart.json: disk full"
        );

        let err = SlotError::Poisoned {
            key: "cart".to_string(),
        };
        assert_eq!(err.to_string(), "Cart slot 'cart' is poisoned");
    }

    #[test]
    fn test_codec_error_message() {
        let source = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        let err = CodecError::Decode(source);
        assert!(err
            .to_string()
            .starts_with("Stored cart is not a valid line item list"));
    }
}
