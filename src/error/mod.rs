//! Error handling module for pickline.
//!
//! This module provides error handling for the completion adapter and its
//! engines with:
//! - A single crate-wide error type wrapping more specific kinds
//! - Dedicated variants for user cancellation, which both completion
//!   engines report through the same blocking-call result
//! - Conversions from collaborator errors (readline, I/O, configuration)
//!
//! # Example
//!
//! ```rust,no_run
//! use pickline::error::{PicklineError, Result};
//!
//! fn read_selection() -> Result<String> {
//!     // Engine calls convert their errors automatically
//!     Ok("selection".to_string())
//! }
//!
//! fn handle(err: &PicklineError) {
//!     if matches!(err, PicklineError::Interrupted) {
//!         // user pressed Ctrl-C; not a failure
//!     }
//! }
//! ```

pub mod kinds;

// Re-export commonly used types
pub use kinds::{ConfigError, PicklineError, Result};
