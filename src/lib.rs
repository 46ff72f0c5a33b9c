//! Pickline
//!
//! Restricted interactive completion with transparent fallback for
//! line-oriented prompts. The crate adapts the generic "read from user
//! with completion" contract onto a narrower, cycling completion UI and
//! falls back to standard readline completion whenever the request is out
//! of the restricted engine's reach.
//!
//! # Modules
//!
//! - `adapter`: The completion request adapter and its rewrites
//! - `cli`: Command-line interface and argument parsing
//! - `config`: Configuration management
//! - `engine`: Completion engine contracts and reference implementations
//! - `error`: Error types and handling
//! - `request`: The completion request data model
//!
//! # Example
//!
//! ```no_run
//! use pickline::{CandidateSource, CompletionAdapter, CompletionRequest, Config};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let mut adapter = CompletionAdapter::new(&config);
//!
//!     let request = CompletionRequest::new(
//!         "branch> ",
//!         CandidateSource::Listed(vec!["main".into(), "dev".into()]),
//!     );
//!
//!     let selection = adapter.read_with_completion(&request)?;
//!     println!("picked {selection}");
//!     Ok(())
//! }
//! ```

pub mod adapter;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod request;

// Re-export commonly used types
pub use adapter::{CompletionAdapter, ExtraProperties};
pub use config::Config;
pub use engine::{CompletionReader, RestrictedReader, Selection, SessionFlags};
pub use error::{PicklineError, Result};
pub use request::{
    CandidateSource, CompletionRequest, DefaultSpec, HistoryHandle, InitialInput,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library version string
///
/// # Returns
/// * `&str` - Version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
