//! Command implementations for the tarot CLI.
//!
//! - [`resolve`] - Print resolved entry configurations
//! - [`describe`] - Print bundler build descriptions
//! - [`check`] - Validate the configuration
//!
//! Each command provides an `execute` function that takes the parsed
//! arguments and returns a Result.

pub mod check;
pub mod describe;
pub mod resolve;
pub(crate) mod utils;

pub use check::execute as check_execute;
pub use describe::execute as describe_execute;
pub use resolve::execute as resolve_execute;
