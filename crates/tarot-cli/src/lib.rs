//! Tarot CLI - resolve entry configurations and describe bundler builds.
//!
//! This crate provides the command-line interface over `tarot-config` and
//! `tarot-describe`. It discovers the project config, layers `TAROT_*`
//! environment variables over it, resolves every entry and prints the result
//! as JSON. It never runs the bundler itself.
//!
//! # Architecture
//!
//! - [`error`] - Error types with actionable hints
//! - [`logger`] - Structured logging with tracing
//! - [`ui`] - Colored status lines on stderr
//! - `commands` - One module per subcommand
//!
//! # Example
//!
//! ```rust
//! use tarot_cli::{error::Result, logger};
//!
//! fn main() -> Result<()> {
//!     logger::init_logger(false, false, false);
//!     // CLI command implementations...
//!     Ok(())
//! }
//! ```

// Public modules
pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod ui;

// Re-export commonly used types
pub use error::{CliError, Result, ResultExt};
