//! Completion request adapter
//!
//! This module provides the main adapter that ties the two completion
//! engines together: it receives a generic completion request, decides
//! whether the restricted engine can serve it, rewrites the request into
//! the restricted shape when it can, and delegates to the fallback
//! completion routine when it cannot, or when the user asks for standard
//! completion mid-interaction.
//!
//! There is exactly one control signal of interest, "fall back", modeled
//! as the [`AdaptationOutcome::FallbackRequested`] variant. It is raised
//! for unsupported input methods, active extra completion properties,
//! dynamic candidate sources, oversized candidate sets, and the explicit
//! in-UI gesture, and it is caught at exactly one point: the top of
//! [`CompletionAdapter::read_with_completion`]. The fallback routine
//! always receives the pristine original request, never the rewritten one.

mod normalize;


use std::sync::Arc;

use tracing::debug;

use crate::config::{AdapterConfig, Config};
use crate::engine::{
    CompletionReader, RestrictedPrompt, RestrictedReader, RustylineRestrictedReader,
    RustylineStandardReader, Selection, SessionFlags,
};
use crate::error::Result;
use crate::request::{CandidateSource, CompletionRequest, DefaultSpec};

/// Per-candidate annotation, shown next to the candidate in engines that
/// can render it.
pub type AnnotationFn = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Process-wide extra completion properties.
///
/// The restricted engine cannot render these, so any request arriving
/// while they are active is served by the fallback routine.
#[derive(Clone, Default)]
pub struct ExtraProperties {
    /// Per-candidate annotation text
    pub annotate: Option<AnnotationFn>,
}

impl ExtraProperties {
    /// Whether any extra property is set.
    pub fn is_active(&self) -> bool {
        self.annotate.is_some()
    }
}

/// Outcome of one adaptation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
enum AdaptationOutcome {
    /// The restricted engine served the request.
    Selected(String),

    /// The request cannot or should not be served by the restricted
    /// engine; retry with the fallback routine and the original arguments.
    FallbackRequested,
}

/// Adapter between the generic completion contract and the restricted
/// completion engine.
///
/// The adapter implements [`CompletionReader`] itself, so it can be
/// installed wherever the generic completion routine is expected.
pub struct CompletionAdapter {
    /// Adapter configuration (candidate limit)
    config: AdapterConfig,

    /// Extra completion properties; forces fallback while active
    extra: ExtraProperties,

    /// The restricted engine
    restricted: Box<dyn RestrictedReader>,

    /// The fallback completion routine, resolved once at construction
    fallback: Box<dyn CompletionReader>,

    /// Call-scoped gesture flags shared with the restricted engine
    flags: SessionFlags,
}

impl CompletionAdapter {
    /// Create an adapter with the rustyline reference engines.
    ///
    /// # Arguments
    /// * `config` - Loaded configuration
    pub fn new(config: &Config) -> Self {
        Self::with_extras(config, ExtraProperties::default())
    }

    /// Create an adapter with extra completion properties attached to the
    /// fallback engine.
    ///
    /// # Arguments
    /// * `config` - Loaded configuration
    /// * `extra` - Extra completion properties
    pub fn with_extras(config: &Config, extra: ExtraProperties) -> Self {
        let restricted = Box::new(RustylineRestrictedReader::new(config.history.clone()));
        let fallback = Box::new(
            RustylineStandardReader::new(config.history.clone())
                .with_extra_properties(extra.clone()),
        );
        Self::with_engines(config.adapter.clone(), extra, restricted, fallback)
    }

    /// Create an adapter with explicit collaborator engines.
    ///
    /// The fallback must be a routine other than this adapter itself,
    /// otherwise a request the restricted engine cannot serve would
    /// recurse forever.
    pub fn with_engines(
        config: AdapterConfig,
        extra: ExtraProperties,
        restricted: Box<dyn RestrictedReader>,
        fallback: Box<dyn CompletionReader>,
    ) -> Self {
        Self {
            config,
            extra,
            restricted,
            fallback,
            flags: SessionFlags::new(),
        }
    }

    /// Replace the fallback completion routine.
    pub fn with_fallback(mut self, fallback: Box<dyn CompletionReader>) -> Self {
        self.fallback = fallback;
        self
    }

    /// Prompt the user, preferring the restricted engine.
    ///
    /// This is the generic completion entry point: it accepts the full
    /// request contract and returns the selected text. The request is
    /// never mutated; when the restricted engine cannot serve it, the
    /// fallback routine receives it exactly as passed in.
    ///
    /// # Arguments
    /// * `request` - The completion request
    ///
    /// # Returns
    /// * `Result<String>` - Selected text
    pub fn read_with_completion(&mut self, request: &CompletionRequest) -> Result<String> {
        match self.adapt(request)? {
            AdaptationOutcome::Selected(text) => Ok(text),
            AdaptationOutcome::FallbackRequested => {
                debug!("delegating to the fallback completion routine");
                self.fallback.read(request)
            }
        }
    }

    /// Try to serve `request` with the restricted engine.
    fn adapt(&mut self, request: &CompletionRequest) -> Result<AdaptationOutcome> {
        use AdaptationOutcome::FallbackRequested;

        // 1. Early incompatibility checks
        if request.input_method {
            debug!("input method requested; the restricted engine has no equivalent");
            return Ok(FallbackRequested);
        }
        if self.extra.is_active() {
            debug!("extra completion properties active");
            return Ok(FallbackRequested);
        }
        if matches!(request.source, CandidateSource::Dynamic(_)) {
            debug!("dynamic candidate source");
            return Ok(FallbackRequested);
        }

        // 2. Candidate materialization
        let mut candidates = request.source.all_candidates(request.filter.as_ref());

        // 3. Size guard
        if let Some(limit) = self.config.candidate_limit() {
            if candidates.len() > limit {
                debug!(
                    count = candidates.len(),
                    limit, "candidate set too large for interactive cycling"
                );
                return Ok(FallbackRequested);
            }
        }

        // 4. Default-value list normalization
        let mut default = match &request.default {
            DefaultSpec::Ordered(defaults) if !defaults.is_empty() => {
                candidates = normalize::merge_default_list(defaults, candidates);
                Some(defaults[0].clone())
            }
            other => other.primary().map(str::to_string),
        };

        // 5. Initial-input/default collision workaround: the restricted
        // engine cannot honor both, and the user's typed text wins
        let collides = default
            .as_deref()
            .is_some_and(|d| !d.is_empty() && !request.initial_text().is_empty());
        if collides {
            let promoted = default.take().unwrap_or_default();
            normalize::promote_default(&mut candidates, &promoted);
        }
        let default = default.filter(|d| !d.is_empty());

        // 6. Delegation
        let prepared = RestrictedPrompt {
            prompt: request.prompt.clone(),
            candidates,
            filter: request.filter.clone(),
            require_match: request.require_match,
            initial: request.initial.clone(),
            history: request.history.clone(),
            default,
            input_method: request.input_method,
        };

        self.flags.arm();
        match self.restricted.read_restricted(&prepared, &self.flags)? {
            Selection::Accepted(text) => Ok(AdaptationOutcome::Selected(text)),
            Selection::SwitchToFallback => {
                debug!("user requested standard completion");
                Ok(FallbackRequested)
            }
        }
    }
}

impl CompletionReader for CompletionAdapter {
    fn read(&mut self, request: &CompletionRequest) -> Result<String> {
        self.read_with_completion(request)
    }
}
