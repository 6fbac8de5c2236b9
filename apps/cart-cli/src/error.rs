//! # CLI Error Type
//!
//! What a failed command reports before exiting non-zero.
//!
//! Cart mutations never fail, so every variant here comes from the
//! boundary: input the user typed, the checkout rules, or writing output.

use butterfly_core::{CoreError, ValidationError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    /// The user typed something the cart should not receive.
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    /// Checkout could not build an order.
    #[error("Cannot place order: {0}")]
    Checkout(#[from] CoreError),

    #[error("Failed to render output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Process exit code for this error.
    ///
    /// - `2`: bad input (same as clap's usage errors)
    /// - `1`: anything else
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Validation(_) => 2,
            CliError::Checkout(CoreError::Validation(_)) => 2,
            _ => 1,
        }
    }
}

pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let err: CliError = ValidationError::Required {
            field: "name".to_string(),
        }
        .into();
        assert_eq!(err.exit_code(), 2);
        assert_eq!(err.to_string(), "Invalid input: name is required");

        let err: CliError = CoreError::EmptyCart.into();
        assert_eq!(err.exit_code(), 1);
        assert_eq!(err.to_string(), "Cannot place order: Cart is empty");
    }
}
