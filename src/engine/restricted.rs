//! Rustyline-backed restricted completion engine
//!
//! The restricted engine is deliberately narrower than the generic
//! completion contract: it only works against a fixed, fully materialized
//! candidate list, completes the whole buffer (not word-wise), and cycles
//! candidates in place. The adapter rewrites requests into this shape, and
//! anything it cannot rewrite goes to the fallback routine instead.
//!
//! Two gesture hook points redirect to the fallback trigger while the
//! call-scoped flag is active: Ctrl-F with the cursor at the end of the
//! buffer and Ctrl-B at the beginning. Everywhere else those keys keep
//! their ordinary cursor-motion behavior.

use std::borrow::Cow;

use nu_ansi_term::{Color, Style};
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{
    Cmd, CompletionType, ConditionalEventHandler, Config, Context, Editor, Event, EventContext,
    EventHandler, Helper, KeyEvent, RepeatCount,
};
use tracing::debug;

use crate::config::HistoryConfig;
use crate::engine::{RestrictedPrompt, RestrictedReader, Selection, SessionFlags};
use crate::error::Result;

/// Restricted completion engine built on rustyline.
pub struct RustylineRestrictedReader {
    /// History configuration (size limits; the file comes from the request)
    history: HistoryConfig,
}

impl RustylineRestrictedReader {
    /// Create a new restricted engine.
    ///
    /// # Arguments
    /// * `history` - History configuration
    pub fn new(history: HistoryConfig) -> Self {
        Self { history }
    }

    /// Build an editor for one prompt, with gesture bindings installed.
    fn build_editor(
        &self,
        prompt: &RestrictedPrompt,
        flags: &SessionFlags,
    ) -> Result<Editor<RestrictedHelper, DefaultHistory>> {
        let config = Config::builder()
            .completion_type(CompletionType::Circular)
            .max_history_size(self.history.max_size)?
            .history_ignore_space(true)
            .auto_add_history(true)
            .build();

        let helper = RestrictedHelper::new(prompt.candidates.clone(), prompt.default.clone());
        let mut editor = Editor::<RestrictedHelper, DefaultHistory>::with_config(config)?;
        editor.set_helper(Some(helper));

        // Gesture hooks: forward at end of buffer, backward at the start
        editor.bind_sequence(
            KeyEvent::ctrl('f'),
            EventHandler::Conditional(Box::new(BoundaryFallbackHandler {
                flags: flags.clone(),
                at_end: true,
            })),
        );
        editor.bind_sequence(
            KeyEvent::ctrl('b'),
            EventHandler::Conditional(Box::new(BoundaryFallbackHandler {
                flags: flags.clone(),
                at_end: false,
            })),
        );

        Ok(editor)
    }
}

impl RestrictedReader for RustylineRestrictedReader {
    /// Prompt the user against the prepared candidate list.
    ///
    /// # Arguments
    /// * `prompt` - Prepared (rewritten) request
    /// * `flags` - Call-scoped gesture flags
    ///
    /// # Returns
    /// * `Result<Selection>` - Accepted text or the fallback gesture
    fn read_restricted(
        &mut self,
        prompt: &RestrictedPrompt,
        flags: &SessionFlags,
    ) -> Result<Selection> {
        // Consume the armed flag for exactly this call
        let _scope = flags.begin_call();

        let mut editor = self.build_editor(prompt, flags)?;
        if let Some(path) = prompt.history.path() {
            let _ = editor.load_history(path);
        }

        let (mut left, mut right) = match &prompt.initial {
            Some(initial) => {
                let (l, r) = initial.split_at_cursor();
                (l.to_string(), r.to_string())
            }
            None => (String::new(), String::new()),
        };

        loop {
            let readline =
                editor.readline_with_initial(&prompt.prompt, (left.as_str(), right.as_str()));

            // The gesture handler submits the line to unwind the editor
            // loop; the request flag, not the submitted text, is the result
            if flags.take_fallback_request() {
                debug!("fallback gesture during restricted interaction");
                return Ok(Selection::SwitchToFallback);
            }

            let line = readline?;
            let value = if line.is_empty() {
                prompt.default.clone().unwrap_or_default()
            } else {
                line
            };

            if prompt.require_match
                && !value.is_empty()
                && !prompt.candidates.iter().any(|c| *c == value)
            {
                eprintln!("{}", Color::Red.paint(format!("[no match: {value}]")));
                // Re-prompt with the rejected text so the user can edit it
                left = value;
                right = String::new();
                continue;
            }

            if let Some(path) = prompt.history.path() {
                let _ = editor.save_history(path);
            }

            return Ok(Selection::Accepted(value));
        }
    }
}

/// Decide whether a boundary gesture should redirect to the fallback
/// trigger instead of its normal cursor motion.
fn should_redirect(active: bool, pos: usize, line_len: usize, at_end: bool) -> bool {
    let at_boundary = if at_end { pos >= line_len } else { pos == 0 };
    active && at_boundary
}

/// Conditional handler for the two fallback gestures.
struct BoundaryFallbackHandler {
    flags: SessionFlags,
    at_end: bool,
}

impl ConditionalEventHandler for BoundaryFallbackHandler {
    fn handle(
        &self,
        _evt: &Event,
        _n: RepeatCount,
        _positive: bool,
        ctx: &EventContext,
    ) -> Option<Cmd> {
        if should_redirect(
            self.flags.is_active(),
            ctx.pos(),
            ctx.line().len(),
            self.at_end,
        ) {
            self.flags.request_fallback();
            // Submit so the blocking call unwinds to the wrapper
            Some(Cmd::AcceptLine)
        } else {
            // Fall through to the default binding (cursor motion)
            None
        }
    }
}

/// Helper for rustyline providing list completion, a default-value hint,
/// and prompt styling.
pub(crate) struct RestrictedHelper {
    /// Fixed candidate list for this prompt
    candidates: Vec<String>,

    /// Single default value, hinted while the buffer is empty
    default: Option<String>,
}

impl RestrictedHelper {
    /// Create a new helper.
    pub(crate) fn new(candidates: Vec<String>, default: Option<String>) -> Self {
        Self {
            candidates,
            default,
        }
    }

    /// Complete the whole buffer up to the cursor against the list.
    ///
    /// # Arguments
    /// * `line` - The input line
    /// * `pos` - Cursor position (byte index)
    ///
    /// # Returns
    /// * `(usize, Vec<Pair>)` - Completion start position and candidates
    fn completions_for(&self, line: &str, pos: usize) -> (usize, Vec<Pair>) {
        let prefix = &line[..pos];
        let pairs = self
            .candidates
            .iter()
            .filter(|c| c.starts_with(prefix))
            .map(|c| Pair {
                display: c.clone(),
                replacement: c.clone(),
            })
            .collect();

        // The entire buffer is the item being completed
        (0, pairs)
    }

    /// Hint text for the current buffer, if any.
    fn hint_for(&self, line: &str) -> Option<String> {
        if line.is_empty() {
            self.default.as_ref().map(|d| format!(" (default {d})"))
        } else {
            None
        }
    }
}

impl Helper for RestrictedHelper {}

impl Completer for RestrictedHelper {
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

impl Hinter for RestrictedHelper {
    type Hint = String;

    fn hint(&self, line: &str, _pos: usize, _ctx: &Context<'_>) -> Option<String> {
        self.hint_for(line)
    }
}

impl Highlighter for RestrictedHelper {
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

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(Color::DarkGray.paint(hint).to_string())
    }
}

impl Validator for RestrictedHelper {}
