//! CLI support for the `shopbot` binary.
//!
//! ```ignore
//! use shopbot::cli::{parse_args, CliCommand};
//!
//! match parse_args(std::env::args()) {
//!     CliCommand::Version => println!("shopbot {}", VERSION),
//!     CliCommand::Help => println!("{}", USAGE),
//!     CliCommand::Chat { welcome, question } => { /* ... */ }
//! }
//! ```

pub mod args;

pub use args::{parse_args, CliCommand, USAGE};

use crate::error::ChatError;
use crate::models::{RenderedSegment, Sender};

/// The current version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Format one segment as a CLI output line: `[<sender>] <html>`.
pub fn format_segment(segment: &RenderedSegment, sender: Sender) -> String {
    format!("[{}] {}", sender, segment.html())
}

/// Format a failed request for stderr: the shopper-facing message, then
/// what to do about it.
pub fn format_error(err: &ChatError) -> String {
    format!("{}\n{}.", err.user_message(), err.category().recovery_hint())
}
