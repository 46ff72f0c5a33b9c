//! Completion request data model
//!
//! This module defines the request shape accepted by the generic
//! "read from user with completion" entry point: the prompt, the candidate
//! source, the optional filter predicate, and the remaining knobs
//! (require-match, initial input, history, default value, input method).
//!
//! A request is immutable for the duration of one adaptation attempt. The
//! adapter works on rewritten copies of the candidate list and default
//! value; the request itself is what the fallback routine receives when the
//! restricted engine cannot serve it.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Predicate applied to individual candidates during expansion.
///
/// A candidate passes if the predicate accepts it or no predicate is given.
pub type FilterPredicate = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Generator for predicate-driven candidate sources.
///
/// Called with the current input text; returns every candidate matching it.
pub type DynamicSource = Arc<dyn Fn(&str) -> Vec<String> + Send + Sync>;

/// Source of completion candidates before filtering.
#[derive(Clone)]
pub enum CandidateSource {
    /// An enumerable collection of candidate strings.
    Listed(Vec<String>),

    /// A dynamic, generator-style source.
    ///
    /// The restricted engine only accepts enumerable collections, so a
    /// request with a dynamic source is always served by the fallback
    /// routine.
    Dynamic(DynamicSource),
}

impl CandidateSource {
    /// Expand the source into an exhaustive ordered candidate list.
    ///
    /// This follows the "all completions of the empty prefix" contract:
    /// every entry the source yields for an empty input, in the source's
    /// natural order, duplicates preserved, filtered by `predicate` when
    /// one is given.
    ///
    /// # Arguments
    /// * `predicate` - Optional filter applied to each candidate
    ///
    /// # Returns
    /// * `Vec<String>` - All matching candidates
    pub fn all_candidates(&self, predicate: Option<&FilterPredicate>) -> Vec<String> {
        let raw: Vec<String> = match self {
            CandidateSource::Listed(items) => items.clone(),
            CandidateSource::Dynamic(generate) => generate(""),
        };

        match predicate {
            Some(accept) => raw.into_iter().filter(|c| accept(c)).collect(),
            None => raw,
        }
    }

    /// Check whether `text` is a member of the source under `predicate`.
    ///
    /// Used by the engines to enforce require-match semantics.
    pub fn contains(&self, text: &str, predicate: Option<&FilterPredicate>) -> bool {
        if let Some(accept) = predicate {
            if !accept(text) {
                return false;
            }
        }

        match self {
            CandidateSource::Listed(items) => items.iter().any(|c| c == text),
            CandidateSource::Dynamic(generate) => generate(text).iter().any(|c| c == text),
        }
    }

    /// Number of entries an enumerable source holds, if enumerable.
    pub fn listed_len(&self) -> Option<usize> {
        match self {
            CandidateSource::Listed(items) => Some(items.len()),
            CandidateSource::Dynamic(_) => None,
        }
    }
}

impl fmt::Debug for CandidateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CandidateSource::Listed(items) => write!(f, "Listed({} candidates)", items.len()),
            CandidateSource::Dynamic(_) => write!(f, "Dynamic"),
        }
    }
}

impl<S: Into<String>> FromIterator<S> for CandidateSource {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        CandidateSource::Listed(iter.into_iter().map(Into::into).collect())
    }
}

/// Initial input: text pre-typed into the prompt buffer, with an optional
/// cursor position (byte index into the text).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InitialInput {
    /// Pre-typed buffer text
    pub text: String,

    /// Cursor position; end of text when absent
    pub cursor: Option<usize>,
}

impl InitialInput {
    /// Create initial input with the cursor at the end of the text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            cursor: None,
        }
    }

    /// Create initial input with an explicit cursor position.
    pub fn with_cursor(text: impl Into<String>, cursor: usize) -> Self {
        Self {
            text: text.into(),
            cursor: Some(cursor),
        }
    }

    /// Split the text at the cursor into (before, after) halves.
    ///
    /// The cursor is clamped to the nearest character boundary at or below
    /// the requested position.
    pub fn split_at_cursor(&self) -> (&str, &str) {
        let mut pos = self.cursor.unwrap_or(self.text.len()).min(self.text.len());
        while pos > 0 && !self.text.is_char_boundary(pos) {
            pos -= 1;
        }
        self.text.split_at(pos)
    }
}

/// Default value for a completion request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DefaultSpec {
    /// No default.
    #[default]
    None,

    /// A single default value.
    Single(String),

    /// An ordered sequence of default values.
    ///
    /// The restricted engine only supports a single default; the adapter
    /// degrades a sequence by surfacing all of its entries at the top of
    /// the candidate list and keeping the first entry as the default.
    Ordered(Vec<String>),
}

impl DefaultSpec {
    /// The effective single default value, if any.
    ///
    /// For an ordered sequence this is the first entry; an empty sequence
    /// has no default.
    pub fn primary(&self) -> Option<&str> {
        match self {
            DefaultSpec::None => None,
            DefaultSpec::Single(value) => Some(value.as_str()),
            DefaultSpec::Ordered(values) => values.first().map(String::as_str),
        }
    }

    /// True when no usable default is present.
    pub fn is_absent(&self) -> bool {
        match self {
            DefaultSpec::None => true,
            DefaultSpec::Single(value) => value.is_empty(),
            DefaultSpec::Ordered(values) => values.is_empty(),
        }
    }
}

/// Opaque handle naming where prompt history lives.
///
/// The engines load history from the named file before the blocking call
/// and save it back afterwards; an empty handle disables persistence.
#[derive(Debug, Clone, Default)]
pub struct HistoryHandle(Option<PathBuf>);

impl HistoryHandle {
    /// A handle with no backing file (no history persistence).
    pub fn none() -> Self {
        Self(None)
    }

    /// A handle backed by the given file.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self(Some(path.into()))
    }

    /// The backing file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.0.as_deref()
    }
}

/// A single "read from user with completion" request.
///
/// Construct with [`CompletionRequest::new`] and the `with_*` builders:
///
/// ```
/// use pickline::request::{CompletionRequest, CandidateSource, DefaultSpec};
///
/// let request = CompletionRequest::new(
///     "color> ",
///     CandidateSource::Listed(vec!["red".into(), "green".into(), "blue".into()]),
/// )
/// .with_require_match(true)
/// .with_default(DefaultSpec::Single("green".into()));
///
/// assert_eq!(request.default.primary(), Some("green"));
/// ```
#[derive(Clone)]
pub struct CompletionRequest {
    /// Prompt text shown to the user
    pub prompt: String,

    /// Candidate source (enumerable list or dynamic generator)
    pub source: CandidateSource,

    /// Optional per-candidate filter
    pub filter: Option<FilterPredicate>,

    /// Whether the final input must be a member of the candidate set
    pub require_match: bool,

    /// Optional pre-typed buffer content
    pub initial: Option<InitialInput>,

    /// Where history for this prompt lives
    pub history: HistoryHandle,

    /// Default value(s)
    pub default: DefaultSpec,

    /// Whether the prompt should run under an input method
    pub input_method: bool,
}

impl CompletionRequest {
    /// Create a request with the given prompt and candidate source.
    pub fn new(prompt: impl Into<String>, source: CandidateSource) -> Self {
        Self {
            prompt: prompt.into(),
            source,
            filter: None,
            require_match: false,
            initial: None,
            history: HistoryHandle::none(),
            default: DefaultSpec::None,
            input_method: false,
        }
    }

    /// Set the candidate filter predicate.
    pub fn with_filter(mut self, filter: FilterPredicate) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Require the final input to be a member of the candidate set.
    pub fn with_require_match(mut self, require_match: bool) -> Self {
        self.require_match = require_match;
        self
    }

    /// Set the initial buffer content.
    pub fn with_initial(mut self, initial: InitialInput) -> Self {
        self.initial = Some(initial);
        self
    }

    /// Set the history handle.
    pub fn with_history(mut self, history: HistoryHandle) -> Self {
        self.history = history;
        self
    }

    /// Set the default value(s).
    pub fn with_default(mut self, default: DefaultSpec) -> Self {
        self.default = default;
        self
    }

    /// Request an input method for this prompt.
    pub fn with_input_method(mut self, input_method: bool) -> Self {
        self.input_method = input_method;
        self
    }

    /// Text portion of the initial input; empty when absent.
    pub fn initial_text(&self) -> &str {
        self.initial.as_ref().map(|i| i.text.as_str()).unwrap_or("")
    }
}

impl fmt::Debug for CompletionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionRequest")
            .field("prompt", &self.prompt)
            .field("source", &self.source)
            .field("filter", &self.filter.as_ref().map(|_| "<predicate>"))
            .field("require_match", &self.require_match)
            .field("initial", &self.initial)
            .field("history", &self.history)
            .field("default", &self.default)
            .field("input_method", &self.input_method)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listed(items: &[&str]) -> CandidateSource {
        items.iter().copied().collect()
    }

    #[test]
    fn test_all_candidates_preserves_order_and_duplicates() {
        let source = listed(&["b", "a", "b", "c"]);
        assert_eq!(source.all_candidates(None), vec!["b", "a", "b", "c"]);
    }

    #[test]
    fn test_all_candidates_applies_predicate() {
        let source = listed(&["apple", "banana", "avocado"]);
        let starts_with_a: FilterPredicate = Arc::new(|c: &str| c.starts_with('a'));
        assert_eq!(
            source.all_candidates(Some(&starts_with_a)),
            vec!["apple", "avocado"]
        );
    }

    #[test]
    fn test_expansion_is_idempotent() {
        let source = listed(&["x", "y", "x"]);
        let accept_all: FilterPredicate = Arc::new(|_: &str| true);
        let first = source.all_candidates(Some(&accept_all));
        let second = source.all_candidates(Some(&accept_all));
        assert_eq!(first, second);
    }

    #[test]
    fn test_dynamic_source_expansion_uses_empty_prefix() {
        let generate: DynamicSource = Arc::new(|prefix: &str| {
            ["one", "two", "three"]
                .iter()
                .filter(|c| c.starts_with(prefix))
                .map(|c| c.to_string())
                .collect()
        });
        let source = CandidateSource::Dynamic(generate);
        assert_eq!(source.all_candidates(None), vec!["one", "two", "three"]);
        assert!(source.contains("two", None));
        assert!(!source.contains("four", None));
    }

    #[test]
    fn test_contains_respects_predicate() {
        let source = listed(&["keep", "drop"]);
        let keep_only: FilterPredicate = Arc::new(|c: &str| c == "keep");
        assert!(source.contains("keep", Some(&keep_only)));
        assert!(!source.contains("drop", Some(&keep_only)));
    }

    #[test]
    fn test_default_spec_primary() {
        assert_eq!(DefaultSpec::None.primary(), None);
        assert_eq!(DefaultSpec::Single("d".into()).primary(), Some("d"));
        assert_eq!(
            DefaultSpec::Ordered(vec!["d1".into(), "d2".into()]).primary(),
            Some("d1")
        );
        assert_eq!(DefaultSpec::Ordered(vec![]).primary(), None);
        assert!(DefaultSpec::Ordered(vec![]).is_absent());
    }

    #[test]
    fn test_initial_input_split() {
        let initial = InitialInput::with_cursor("abcdef", 3);
        assert_eq!(initial.split_at_cursor(), ("abc", "def"));

        let at_end = InitialInput::new("abc");
        assert_eq!(at_end.split_at_cursor(), ("abc", ""));

        // Cursor past the end clamps
        let clamped = InitialInput::with_cursor("ab", 10);
        assert_eq!(clamped.split_at_cursor(), ("ab", ""));
    }

    #[test]
    fn test_request_builder() {
        let request = CompletionRequest::new("pick> ", listed(&["a", "b"]))
            .with_require_match(true)
            .with_initial(InitialInput::new("a"))
            .with_default(DefaultSpec::Single("b".into()))
            .with_input_method(false);

        assert_eq!(request.prompt, "pick> ");
        assert!(request.require_match);
        assert_eq!(request.initial_text(), "a");
        assert_eq!(request.default.primary(), Some("b"));
        assert!(!request.input_method);
    }
}
