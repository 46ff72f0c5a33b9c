//! Rustyline-backed standard completion engine
//!
//! The standard engine is the always-capable side of the adapter: it
//! serves every request shape the generic contract allows, including
//! dynamic candidate sources, filter predicates, multi-valued defaults and
//! extra completion properties. It is the default fallback routine.

use std::borrow::Cow;

use nu_ansi_term::{Color, Style};
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{CompletionType, Config, Context, Editor, Helper};

use crate::adapter::{AnnotationFn, ExtraProperties};
use crate::config::HistoryConfig;
use crate::engine::CompletionReader;
use crate::error::Result;
use crate::request::{CandidateSource, CompletionRequest, FilterPredicate};

/// Standard (fallback) completion engine built on rustyline.
pub struct RustylineStandardReader {
    /// History configuration (size limits; the file comes from the request)
    history: HistoryConfig,

    /// Process-wide extra completion properties, honored in the display
    extra: ExtraProperties,
}

impl RustylineStandardReader {
    /// Create a new standard engine.
    ///
    /// # Arguments
    /// * `history` - History configuration
    pub fn new(history: HistoryConfig) -> Self {
        Self {
            history,
            extra: ExtraProperties::default(),
        }
    }

    /// Attach extra completion properties for candidate annotation.
    pub fn with_extra_properties(mut self, extra: ExtraProperties) -> Self {
        self.extra = extra;
        self
    }

    fn build_editor(
        &self,
        request: &CompletionRequest,
    ) -> Result<Editor<StandardHelper, DefaultHistory>> {
        let config = Config::builder()
            .completion_type(CompletionType::List)
            .max_history_size(self.history.max_size)?
            .history_ignore_space(true)
            .auto_add_history(true)
            .build();

        let helper = StandardHelper::new(
            request.source.clone(),
            request.filter.clone(),
            self.extra.annotate.clone(),
        );
        let mut editor = Editor::<StandardHelper, DefaultHistory>::with_config(config)?;
        editor.set_helper(Some(helper));

        Ok(editor)
    }
}

impl CompletionReader for RustylineStandardReader {
    /// Prompt the user with full completion support.
    ///
    /// # Arguments
    /// * `request` - The original, unrewritten completion request
    ///
    /// # Returns
    /// * `Result<String>` - Selected text
    fn read(&mut self, request: &CompletionRequest) -> Result<String> {
        let mut editor = self.build_editor(request)?;
        if let Some(path) = request.history.path() {
            let _ = editor.load_history(path);
        }

        let (mut left, mut right) = match &request.initial {
            Some(initial) => {
                let (l, r) = initial.split_at_cursor();
                (l.to_string(), r.to_string())
            }
            None => (String::new(), String::new()),
        };

        loop {
            let line =
                editor.readline_with_initial(&request.prompt, (left.as_str(), right.as_str()))?;
            let value = if line.is_empty() {
                request.default.primary().unwrap_or("").to_string()
            } else {
                line
            };

            if request.require_match
                && !value.is_empty()
                && !request.source.contains(&value, request.filter.as_ref())
            {
                eprintln!("{}", Color::Red.paint(format!("[no match: {value}]")));
                left = value;
                right = String::new();
                continue;
            }

            if let Some(path) = request.history.path() {
                let _ = editor.save_history(path);
            }

            return Ok(value);
        }
    }
}

/// Helper for rustyline providing full-contract completion.
pub(crate) struct StandardHelper {
    /// Candidate source (list or generator)
    source: CandidateSource,

    /// Optional per-candidate filter
    filter: Option<FilterPredicate>,

    /// Optional per-candidate annotation for the completion display
    annotate: Option<AnnotationFn>,
}

impl StandardHelper {
    /// Create a new helper.
    pub(crate) fn new(
        source: CandidateSource,
        filter: Option<FilterPredicate>,
        annotate: Option<AnnotationFn>,
    ) -> Self {
        Self {
            source,
            filter,
            annotate,
        }
    }

    /// Complete the whole buffer up to the cursor against the source.
    fn completions_for(&self, line: &str, pos: usize) -> (usize, Vec<Pair>) {
        let prefix = &line[..pos];

        let matches: Vec<String> = match &self.source {
            CandidateSource::Listed(items) => items
                .iter()
                .filter(|c| c.starts_with(prefix))
                .cloned()
                .collect(),
            CandidateSource::Dynamic(generate) => generate(prefix),
        };

        let pairs = matches
            .into_iter()
            .filter(|c| self.filter.as_ref().map_or(true, |accept| accept(c)))
            .map(|c| {
                let display = match self.annotate.as_ref().and_then(|note| note(&c)) {
                    Some(note) => format!("{c} ({note})"),
                    None => c.clone(),
                };
                Pair {
                    display,
                    replacement: c,
                }
            })
            .collect();

        (0, pairs)
    }
}

impl Helper for StandardHelper {}

impl Completer for StandardHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        Ok(self.completions_for(line, pos))
    }
}

impl Hinter for StandardHelper {
    type Hint = String;

    fn hint(&self, _line: &str, _pos: usize, _ctx: &Context<'_>) -> Option<String> {
        None
    }
}

impl Highlighter for StandardHelper {
    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        default: bool,
    ) -> Cow<'b, str> {
        if default {
            Cow::Owned(Style::new().bold().paint(prompt).to_string())
        } else {
            Cow::Borrowed(prompt)
        }
    }
}

impl Validator for StandardHelper {}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn test_listed_completion_with_filter() {
        let source: CandidateSource = ["alpha", "beta", "beach"].iter().copied().collect();
        let no_beta: FilterPredicate = Arc::new(|c: &str| c != "beta");
        let helper = StandardHelper::new(source, Some(no_beta), None);

        let (start, pairs) = helper.completions_for("be", 2);
        assert_eq!(start, 0);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].replacement, "beach");
    }

    #[test]
    fn test_dynamic_completion_consults_generator() {
        let generate = Arc::new(|prefix: &str| {
            ["one", "two", "twelve"]
                .iter()
                .filter(|c| c.starts_with(prefix))
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
        });
        let helper = StandardHelper::new(CandidateSource::Dynamic(generate), None, None);

        let (_start, pairs) = helper.completions_for("tw", 2);
        assert_eq!(pairs.len(), 2);
        assert!(pairs.iter().any(|p| p.replacement == "two"));
        assert!(pairs.iter().any(|p| p.replacement == "twelve"));
    }

    #[test]
    fn test_annotation_shows_in_display_only() {
        let source: CandidateSource = ["main", "dev"].iter().copied().collect();
        let annotate: AnnotationFn = Arc::new(|c: &str| {
            if c == "main" {
                Some("protected".to_string())
            } else {
                None
            }
        });
        let helper = StandardHelper::new(source, None, Some(annotate));

        let (_start, pairs) = helper.completions_for("", 0);
        let main = pairs.iter().find(|p| p.replacement == "main").unwrap();
        let dev = pairs.iter().find(|p| p.replacement == "dev").unwrap();
        assert_eq!(main.display, "main (protected)");
        assert_eq!(dev.display, "dev");
    }
}
