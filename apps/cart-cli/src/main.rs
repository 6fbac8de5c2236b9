//! # butterfly-cart
//!
//! Entry point of the command-line cart host.
//! The actual setup is in lib.rs for better testability.

use std::process::ExitCode;

fn main() -> ExitCode {
    cart_cli::run()
}
