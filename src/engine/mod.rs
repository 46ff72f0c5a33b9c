//! Completion engines
//!
//! This module defines the contracts the adapter delegates to, plus the
//! rustyline-backed reference implementations:
//!
//! - [`CompletionReader`]: the generic blocking "read with completion"
//!   contract. The standard (fallback) engine implements it, and so does
//!   the adapter itself, which makes the adapter substitutable wherever the
//!   generic routine is installed.
//! - [`RestrictedReader`]: the narrower engine. It only accepts a prepared
//!   [`RestrictedPrompt`] (materialized candidate list, at most one default)
//!   and reports the user's in-UI "switch to standard completion" gesture
//!   as a distinguished [`Selection`] outcome rather than a selection.

pub mod flags;
pub mod restricted;
pub mod standard;

pub use flags::{CallScope, SessionFlags};
pub use restricted::RustylineRestrictedReader;
pub use standard::RustylineStandardReader;

use crate::error::Result;
use crate::request::{
    CompletionRequest, FilterPredicate, HistoryHandle, InitialInput,
};

/// Blocking "read from user with completion" contract.
///
/// Implementations block the calling thread until the user completes or
/// cancels interaction. Cancellation surfaces as
/// [`PicklineError::Interrupted`](crate::error::PicklineError::Interrupted)
/// or [`PicklineError::Eof`](crate::error::PicklineError::Eof), identically
/// for every implementation.
pub trait CompletionReader {
    /// Prompt the user and return the selected text.
    fn read(&mut self, request: &CompletionRequest) -> Result<String>;
}

/// Outcome of one restricted-engine interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// The user accepted this text (possibly the default, possibly empty).
    Accepted(String),

    /// The user explicitly requested standard completion instead.
    ///
    /// Carries no payload: the adapter retries with the original request
    /// arguments, never with the rewritten ones.
    SwitchToFallback,
}

/// A request rewritten into the shape the restricted engine can handle.
///
/// Candidates are fully materialized and the default has been collapsed to
/// at most one value. The field list mirrors the generic contract so the
/// engine call signature stays substitutable; `input_method` is always
/// false by the time a prompt reaches the restricted engine.
#[derive(Clone)]
pub struct RestrictedPrompt {
    /// Prompt text
    pub prompt: String,

    /// Materialized, filtered candidate list
    pub candidates: Vec<String>,

    /// Filter predicate (already applied to `candidates`; forwarded for
    /// contract parity)
    pub filter: Option<FilterPredicate>,

    /// Whether the final input must be a member of `candidates`
    pub require_match: bool,

    /// Pre-typed buffer content
    pub initial: Option<InitialInput>,

    /// Where history for this prompt lives
    pub history: HistoryHandle,

    /// Single default value, if any
    pub default: Option<String>,

    /// Input-method flag (never set for restricted prompts)
    pub input_method: bool,
}

/// The restricted completion engine contract.
///
/// `flags` carries the call-scoped enablement state: the adapter arms it
/// right before delegating, and the engine's entry point consumes it via
/// [`SessionFlags::begin_call`] so gesture handlers invoked deep within the
/// interaction can observe "this invocation was adapter-initiated".
pub trait RestrictedReader {
    /// Prompt the user against a fixed candidate list.
    fn read_restricted(
        &mut self,
        prompt: &RestrictedPrompt,
        flags: &SessionFlags,
    ) -> Result<Selection>;
}
